//! # Generator Configuration
//!
//! Growth parameters are an immutable snapshot passed to each generation
//! call. Every field has a default, so a TOML file only needs the values it
//! changes:
//!
//! ```toml
//! chain_budget = 16
//! max_extent = 96
//!
//! [chain_costs]
//! room = 6
//!
//! [corridor_weights]
//! crossing = 0.25
//! ```

use serde::{Deserialize, Serialize};

use shaftworks_shared::{BlockPos, WORLD_MAX_Y, WORLD_MIN_Y};

use crate::error::{ConfigError, ConfigResult};
use crate::pieces::PieceTag;
use crate::placement::PlacementBounds;

/// Largest accepted `max_extent`, the horizontal reach of the world border.
pub const MAX_EXTENT: i32 = 30_000_000;

/// Chain length consumed by each piece kind.
///
/// All costs must be at least 1 so that every branch terminates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChainCosts {
    /// Straight tunnel.
    pub tunnel: u32,
    /// 90 degree turn.
    pub turn: u32,
    /// Descending stairs.
    pub stairs: u32,
    /// Three-way crossing.
    pub crossing: u32,
    /// Side room.
    pub room: u32,
    /// Dead end cap.
    pub dead_end: u32,
}

impl ChainCosts {
    /// Cost of placing a piece of kind `tag`.
    ///
    /// The entrance only ever starts a structure and costs nothing.
    #[must_use]
    pub const fn cost(&self, tag: PieceTag) -> u32 {
        match tag {
            PieceTag::Entrance => 0,
            PieceTag::Tunnel => self.tunnel,
            PieceTag::Turn => self.turn,
            PieceTag::Stairs => self.stairs,
            PieceTag::Crossing => self.crossing,
            PieceTag::Room => self.room,
            PieceTag::DeadEnd => self.dead_end,
        }
    }
}

impl Default for ChainCosts {
    fn default() -> Self {
        Self {
            tunnel: 1,
            turn: 2,
            stairs: 2,
            crossing: 3,
            room: 4,
            dead_end: 1,
        }
    }
}

/// Odds of each non-straight corridor kind. Leftover mass is a tunnel.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorridorWeights {
    /// Turn left or right.
    pub turn: f64,
    /// Stairs down.
    pub stairs: f64,
    /// Crossing.
    pub crossing: f64,
    /// Dead end.
    pub dead_end: f64,
}

impl CorridorWeights {
    /// `(kind, chance)` table in evaluation order.
    #[must_use]
    pub const fn table(&self) -> [(PieceTag, f64); 4] {
        [
            (PieceTag::Turn, self.turn),
            (PieceTag::Stairs, self.stairs),
            (PieceTag::Crossing, self.crossing),
            (PieceTag::DeadEnd, self.dead_end),
        ]
    }

    fn values(&self) -> [f64; 4] {
        [self.turn, self.stairs, self.crossing, self.dead_end]
    }
}

impl Default for CorridorWeights {
    fn default() -> Self {
        Self {
            turn: 0.2,
            stairs: 0.1,
            crossing: 0.15,
            dead_end: 0.05,
        }
    }
}

/// Inclusive Y range.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeightRange {
    /// Lowest value.
    pub min: i32,
    /// Highest value.
    pub max: i32,
}

impl HeightRange {
    /// Creates a range.
    #[must_use]
    pub const fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }
}

/// Parameters of one generation run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Chain length of the start piece.
    pub chain_budget: u32,
    /// Per-kind chain costs.
    pub chain_costs: ChainCosts,
    /// Corridor kind odds.
    pub corridor_weights: CorridorWeights,
    /// Chance of each side room beside a tunnel.
    pub side_room_chance: f64,
    /// Chance of each crossing branch.
    pub crossing_branch_chance: f64,
    /// Chance that a room continues through its far wall.
    pub room_exit_chance: f64,
    /// Floor height of the start piece.
    pub start_y: HeightRange,
    /// Lowest Y any piece may occupy.
    pub min_y: i32,
    /// Highest Y any piece may occupy.
    pub max_y: i32,
    /// Horizontal reach from the start piece's centre.
    pub max_extent: i32,
    /// Retry a corridor that does not fit as a dead end.
    pub cap_blocked_corridors: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            chain_budget: 12,
            chain_costs: ChainCosts::default(),
            corridor_weights: CorridorWeights::default(),
            side_room_chance: 0.1,
            crossing_branch_chance: 0.7,
            room_exit_chance: 0.5,
            start_y: HeightRange::new(20, 50),
            min_y: WORLD_MIN_Y + 1,
            max_y: WORLD_MAX_Y,
            max_extent: 80,
            cap_blocked_corridors: true,
        }
    }
}

impl GeneratorConfig {
    /// Parses a configuration from TOML text and validates it.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` for malformed text and
    /// `ConfigError::Invalid` if validation fails.
    pub fn from_toml_str(text: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the constraints growth relies on.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` naming the first violated constraint.
    pub fn validate(&self) -> ConfigResult<()> {
        let costs = self.chain_costs;
        for (name, cost) in [
            ("tunnel", costs.tunnel),
            ("turn", costs.turn),
            ("stairs", costs.stairs),
            ("crossing", costs.crossing),
            ("room", costs.room),
            ("dead_end", costs.dead_end),
        ] {
            if cost == 0 {
                return Err(ConfigError::Invalid(format!("chain cost of {name} must be at least 1")));
            }
        }
        if self.corridor_weights.values().iter().any(|w| !w.is_finite()) {
            return Err(ConfigError::Invalid("corridor weights must be finite".into()));
        }
        for (name, chance) in [
            ("side_room_chance", self.side_room_chance),
            ("crossing_branch_chance", self.crossing_branch_chance),
            ("room_exit_chance", self.room_exit_chance),
        ] {
            if !chance.is_finite() {
                return Err(ConfigError::Invalid(format!("{name} must be finite")));
            }
        }
        if self.start_y.min > self.start_y.max {
            return Err(ConfigError::Invalid(format!(
                "start_y range is inverted ({} > {})",
                self.start_y.min, self.start_y.max
            )));
        }
        if self.min_y > self.max_y {
            return Err(ConfigError::Invalid(format!(
                "vertical bounds are inverted ({} > {})",
                self.min_y, self.max_y
            )));
        }
        if self.start_y.min < self.min_y || self.start_y.max > self.max_y {
            return Err(ConfigError::Invalid(
                "start_y must lie within min_y..=max_y".into(),
            ));
        }
        let (_, entrance_height, _) = PieceTag::Entrance.dimensions();
        if self.start_y.max > self.max_y - (entrance_height - 1) {
            return Err(ConfigError::Invalid(format!(
                "start_y.max leaves no room for the {entrance_height} block entrance below max_y"
            )));
        }
        if self.max_extent <= 0 || self.max_extent > MAX_EXTENT {
            return Err(ConfigError::Invalid(format!(
                "max_extent must lie within 1..={MAX_EXTENT}"
            )));
        }
        Ok(())
    }

    /// Start floor heights, lowered where needed so the entrance stays
    /// below `max_y`.
    #[must_use]
    pub fn start_floor_range(&self) -> (i32, i32) {
        let (_, entrance_height, _) = PieceTag::Entrance.dimensions();
        let top = self.max_y.saturating_sub(entrance_height - 1);
        (self.start_y.min.min(top), self.start_y.max.min(top))
    }

    /// Placement bounds around the start piece centre.
    #[must_use]
    pub const fn bounds(&self, center: BlockPos) -> PlacementBounds {
        PlacementBounds::new(self.min_y, self.max_y, center, self.max_extent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = GeneratorConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.chain_budget, 12);
        assert_eq!(config.chain_costs.cost(PieceTag::Room), 4);
        assert_eq!(config.chain_costs.cost(PieceTag::Entrance), 0);
    }

    #[test]
    fn test_partial_toml() {
        let config = GeneratorConfig::from_toml_str(
            r#"
            chain_budget = 20
            [chain_costs]
            room = 6
            "#,
        )
        .unwrap();
        assert_eq!(config.chain_budget, 20);
        assert_eq!(config.chain_costs.room, 6);
        assert_eq!(config.chain_costs.tunnel, 1);
        assert_eq!(config.max_extent, 80);
    }

    #[test]
    fn test_zero_cost_rejected() {
        let err = GeneratorConfig::from_toml_str("[chain_costs]\ntunnel = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(msg) if msg.contains("tunnel")));
    }

    #[test]
    fn test_inverted_start_range_rejected() {
        let config = GeneratorConfig {
            start_y: HeightRange::new(50, 20),
            ..GeneratorConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_non_finite_weight_rejected() {
        let mut config = GeneratorConfig::default();
        config.corridor_weights.turn = f64::INFINITY;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_extent_beyond_world_border_rejected() {
        let err = GeneratorConfig::from_toml_str("max_extent = 2147483647").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(msg) if msg.contains("max_extent")));
        assert!(GeneratorConfig::from_toml_str("max_extent = 0").is_err());
        assert!(GeneratorConfig::from_toml_str("max_extent = 30000000").is_ok());
    }

    #[test]
    fn test_entrance_must_fit_below_max_y() {
        let config = GeneratorConfig {
            start_y: HeightRange::new(20, WORLD_MAX_Y),
            ..GeneratorConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(msg)) if msg.contains("entrance")));
        assert_eq!(config.start_floor_range(), (20, WORLD_MAX_Y - 5));

        let fits = GeneratorConfig {
            start_y: HeightRange::new(20, WORLD_MAX_Y - 5),
            ..GeneratorConfig::default()
        };
        assert!(fits.validate().is_ok());
    }

    #[test]
    fn test_malformed_toml() {
        assert!(matches!(
            GeneratorConfig::from_toml_str("chain_budget = \"many\""),
            Err(ConfigError::Parse(_))
        ));
    }
}
