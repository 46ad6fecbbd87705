//! Grid store tests

mod common;

use tui_blast::core::{BoardError, Grid};
use tui_blast::types::{Block, BlockId};

#[test]
fn test_new_grid_is_empty() {
    let grid = Grid::new(3, 4).unwrap();
    assert_eq!(grid.rows(), 3);
    assert_eq!(grid.columns(), 4);
    assert_eq!(grid.len(), 12);
    assert_eq!(grid.occupied_count(), 0);
    for row in 0..3 {
        for col in 0..4 {
            assert_eq!(grid.get(row, col), Ok(None));
        }
    }
}

#[test]
fn test_out_of_bounds_access_is_an_error() {
    let mut grid = Grid::new(2, 2).unwrap();
    let expected = BoardError::OutOfBounds {
        row: 2,
        col: 0,
        rows: 2,
        columns: 2,
    };
    assert_eq!(grid.get(2, 0), Err(expected.clone()));
    assert_eq!(grid.spawn(2, 0, 1).unwrap_err(), expected);
    assert!(grid.get(0, -1).is_err());
    assert!(grid.take(-1, 0).is_err());
    assert!(grid.mark_visited(0, 5, 1).is_err());
    assert!(grid.occupant(-1, -1).is_none());
}

#[test]
fn test_set_normalizes_block_position() {
    let mut grid = Grid::new(3, 3).unwrap();
    let stray = Block {
        id: BlockId(7),
        color: 2,
        row: 0,
        col: 0,
    };
    grid.set(2, 1, Some(stray)).unwrap();

    let stored = grid.get(2, 1).unwrap().unwrap();
    assert_eq!((stored.row, stored.col), (2, 1));
    assert_eq!(stored.id, BlockId(7));
    assert!(grid.positions_consistent());
}

#[test]
fn test_spawn_issues_fresh_ids() {
    let mut grid = Grid::new(1, 3).unwrap();
    let a = grid.spawn(0, 0, 1).unwrap();
    let b = grid.spawn(0, 1, 1).unwrap();
    let c = grid.spawn(0, 0, 2).unwrap();
    assert_ne!(a.id, b.id);
    assert_ne!(a.id, c.id);
    assert_ne!(b.id, c.id);
    assert_eq!(grid.color_at(0, 0), Ok(Some(2)));
}

#[test]
fn test_take_and_recolor() {
    let mut grid = Grid::from_color_rows(&[[0, 1]]).unwrap();
    assert!(grid.recolor(0, 1, 3).unwrap());
    assert_eq!(grid.color_at(0, 1), Ok(Some(3)));

    let taken = grid.take(0, 0).unwrap().unwrap();
    assert_eq!(taken.color, 0);
    assert_eq!(grid.get(0, 0), Ok(None));
    assert!(!grid.recolor(0, 0, 1).unwrap());
}

#[test]
fn test_pass_ids_strictly_increase() {
    let mut grid = common::random_grid(4, 4, 3, 5);
    let mut last = grid.current_pass();
    for _ in 0..1000 {
        let pass = grid.begin_new_pass();
        assert!(pass > last);
        last = pass;
    }
    assert_eq!(grid.current_pass(), last);
}

#[test]
fn test_marks_from_old_passes_do_not_count() {
    let mut grid = Grid::new(2, 2).unwrap();
    let first = grid.begin_new_pass();
    grid.mark_visited(1, 1, first).unwrap();
    assert!(grid.is_visited(1, 1, first).unwrap());

    let second = grid.begin_new_pass();
    assert!(!grid.is_visited(1, 1, second).unwrap());
}

#[test]
fn test_ragged_rows_are_rejected() {
    let err = Grid::from_cells(&[vec![Some(0), Some(1)], vec![Some(0)]]).unwrap_err();
    assert!(matches!(err, BoardError::InvalidConfiguration(_)));
}

#[test]
fn test_color_rows_round_trip() {
    let rows = vec![vec![Some(0), None, Some(2)], vec![None, Some(1), Some(1)]];
    let grid = Grid::from_cells(&rows).unwrap();
    assert_eq!(grid.color_rows(), rows);
    assert_eq!(grid.occupied_count(), 4);
}
