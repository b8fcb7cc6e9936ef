//! Adjacency and jump geometry on the 5x5 grid

use super::types::{Position, BOARD_SIZE};

/// The 8 king-move offsets, as `(dx, dy)`.
pub const DIRECTIONS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// True iff both coordinates lie inside the grid.
pub fn in_bounds(pos: Position) -> bool {
    let size = BOARD_SIZE as i32;
    (0..size).contains(&pos.x) && (0..size).contains(&pos.y)
}

/// Cell jumped over by a two-step move along one of the 8 directions.
///
/// Returns `None` for any other shape (odd deltas, knight-like offsets,
/// longer hops, or a null move).
pub fn midpoint(from: Position, to: Position) -> Option<Position> {
    let dx = to.x - from.x;
    let dy = to.y - from.y;
    let is_jump_delta = |d: i32| d == -2 || d == 0 || d == 2;

    if !is_jump_delta(dx) || !is_jump_delta(dy) || (dx == 0 && dy == 0) {
        return None;
    }

    Some(Position::new((from.x + to.x) / 2, (from.y + to.y) / 2))
}
