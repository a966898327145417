//! # Persistence Integration Tests
//!
//! Proves that structure records restore every piece variant exactly and
//! that damaged records are rejected instead of misread.

use shaftworks_procedural::persistence::{encode_frame, ByteReader, ByteWriter};
use shaftworks_procedural::{
    Biome, GeneratorConfig, MineshaftStructure, PersistenceError, Piece, PieceTag, PieceVariant,
    ThemeRepository, TurnSide, WorldSeed,
};
use shaftworks_shared::{BlockPos, ChunkCoord, Direction};

fn every_variant() -> Vec<PieceVariant> {
    vec![
        PieceVariant::Entrance,
        PieceVariant::Tunnel,
        PieceVariant::Turn { side: TurnSide::Left },
        PieceVariant::Turn { side: TurnSide::Right },
        PieceVariant::Stairs,
        PieceVariant::Crossing,
        PieceVariant::Room { has_exit: false },
        PieceVariant::Room { has_exit: true },
        PieceVariant::DeadEnd,
    ]
}

/// Test: Each variant survives a piece record with geometry, facing, chain
/// length and payload intact.
#[test]
fn test_piece_record_every_variant() {
    for (i, variant) in every_variant().into_iter().enumerate() {
        let facing = Direction::ALL[i % 4];
        let piece = Piece::new(variant, BlockPos::new(-37 + i as i32, 12, 905), facing, i as u32);

        let mut writer = ByteWriter::new();
        piece.write_record(&mut writer);
        let bytes = writer.into_inner();
        let mut reader = ByteReader::new(&bytes);

        assert_eq!(Piece::read_record(&mut reader).unwrap(), piece, "{variant:?}");
        assert_eq!(reader.remaining(), 0, "{variant:?} left bytes behind");
    }
}

/// Test: Generated structures restore to the same pieces across many seeds.
#[test]
fn test_structure_record_restores_pieces() {
    let themes = ThemeRepository::builtin();
    let config = GeneratorConfig {
        chain_budget: 20,
        ..GeneratorConfig::default()
    };
    for seed in 0..25 {
        let shaft = MineshaftStructure::generate(
            WorldSeed::new(seed),
            ChunkCoord::new(seed as i32, -(seed as i32)),
            &themes,
            &Biome::Savanna,
            &config,
        );
        let restored = MineshaftStructure::from_bytes(&shaft.to_bytes(), &themes).unwrap();
        assert_eq!(restored.pieces(), shaft.pieces(), "seed {seed}");
        assert_eq!(restored.theme(), shaft.theme());
        assert!(restored.is_materialized());
        assert!(!shaft.is_materialized());
    }
}

/// Test: Damaged frames are rejected with the matching error.
#[test]
fn test_damaged_records_rejected() {
    let themes = ThemeRepository::builtin();
    let shaft = MineshaftStructure::generate(
        WorldSeed::new(99),
        ChunkCoord::new(0, 0),
        &themes,
        &Biome::Plains,
        &GeneratorConfig::default(),
    );
    let bytes = shaft.to_bytes();

    assert_eq!(MineshaftStructure::from_bytes(&[], &themes), Err(PersistenceError::Truncated));
    assert_eq!(
        MineshaftStructure::from_bytes(&bytes[..bytes.len() / 2], &themes),
        Err(PersistenceError::Truncated)
    );

    let mut bad_magic = bytes.clone();
    bad_magic[..4].copy_from_slice(b"MINE");
    assert_eq!(MineshaftStructure::from_bytes(&bad_magic, &themes), Err(PersistenceError::BadMagic));

    let mut newer = bytes.clone();
    newer[4..8].copy_from_slice(&2u32.to_le_bytes());
    assert_eq!(
        MineshaftStructure::from_bytes(&newer, &themes),
        Err(PersistenceError::UnsupportedVersion(2))
    );

    let mut bad_crc = bytes;
    let last = bad_crc.len() - 1;
    bad_crc[last] ^= 0x5A;
    assert!(matches!(
        MineshaftStructure::from_bytes(&bad_crc, &themes),
        Err(PersistenceError::ChecksumMismatch { .. })
    ));
}

fn body_with_piece(tag: u8, facing: u8, payload: &[u8]) -> Vec<u8> {
    let mut body = ByteWriter::new();
    body.put_u64(1);
    body.put_i32(0);
    body.put_i32(0);
    body.put_u32(12);
    body.put_str("oak");
    body.put_u32(1);
    body.put_u8(tag);
    for value in [0, 30, 0, 4, 34, 4] {
        body.put_i32(value);
    }
    body.put_u8(facing);
    body.put_u32(3);
    for byte in payload {
        body.put_u8(*byte);
    }
    encode_frame(&body.into_inner())
}

/// Test: Invalid tags, facings, turn sides and room exit flags inside a
/// valid frame are reported, not guessed.
#[test]
fn test_invalid_piece_fields_rejected() {
    let themes = ThemeRepository::builtin();

    let ok = body_with_piece(PieceTag::Turn as u8, Direction::East as u8, &[1]);
    let restored = MineshaftStructure::from_bytes(&ok, &themes).unwrap();
    assert_eq!(restored.pieces()[0].variant, PieceVariant::Turn { side: TurnSide::Right });

    assert_eq!(
        MineshaftStructure::from_bytes(&body_with_piece(42, 0, &[]), &themes),
        Err(PersistenceError::UnknownPieceTag(42))
    );
    assert_eq!(
        MineshaftStructure::from_bytes(&body_with_piece(PieceTag::Tunnel as u8, 9, &[]), &themes),
        Err(PersistenceError::InvalidDirection(9))
    );
    assert_eq!(
        MineshaftStructure::from_bytes(&body_with_piece(PieceTag::Turn as u8, 0, &[2]), &themes),
        Err(PersistenceError::InvalidTurnSide(2))
    );
    assert_eq!(
        MineshaftStructure::from_bytes(&body_with_piece(PieceTag::Room as u8, 0, &[]), &themes),
        Err(PersistenceError::Truncated)
    );
    assert_eq!(
        MineshaftStructure::from_bytes(&body_with_piece(PieceTag::Room as u8, 0, &[2]), &themes),
        Err(PersistenceError::InvalidRoomExit(2))
    );
    let room = body_with_piece(PieceTag::Room as u8, 0, &[1]);
    assert_eq!(
        MineshaftStructure::from_bytes(&room, &themes).unwrap().pieces()[0].variant,
        PieceVariant::Room { has_exit: true }
    );
}
