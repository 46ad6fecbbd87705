use tui_blast::core::{board_hash, Board, BoardConfig};
use tui_blast::types::ColorId;

fn fnv1a64_bytes(bytes: impl Iterator<Item = u8>) -> u64 {
    // FNV-1a 64-bit.
    let mut h: u64 = 0xcbf29ce484222325;
    for b in bytes {
        h ^= b as u64;
        h = h.wrapping_mul(0x00000100000001B3);
    }
    h
}

fn fnv1a64_colors(colors: &[Option<ColorId>]) -> u64 {
    fnv1a64_bytes(colors.iter().map(|c| c.unwrap_or(0xFF)))
}

#[test]
fn snapshot_sets_board_hash() {
    let mut board = Board::new(BoardConfig::default().with_seed(1)).unwrap();
    let snap = board.snapshot();
    assert_eq!(snap.board_hash, fnv1a64_colors(&snap.colors));

    let (target, _) = board.hint().unwrap();
    board.click(target.row, target.col).unwrap();
    let after = board.snapshot();
    assert_eq!(after.board_hash, fnv1a64_colors(&after.colors));
    assert_eq!(after.cycle, 1);
}

#[test]
fn board_hash_helper_matches_reference() {
    let colors = [Some(0), None, Some(4), Some(255)];
    assert_eq!(board_hash(&colors), fnv1a64_colors(&colors));
    assert_eq!(board_hash(&[]), 0xcbf29ce484222325);
}

#[test]
fn snapshot_serializes_to_json() {
    let board = Board::new(BoardConfig::default().with_size(2, 3).with_seed(5)).unwrap();
    let value = serde_json::to_value(board.snapshot()).unwrap();
    assert_eq!(value["rows"], 2);
    assert_eq!(value["columns"], 3);
    assert_eq!(value["phase"], "idle");
    assert_eq!(value["colors"].as_array().map(Vec::len), Some(6));
    assert_eq!(value["board_hash"], board.snapshot().board_hash);
}
