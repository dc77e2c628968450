//! Full-board line scan. Every cell is tried as the start of a run in each
//! of the four orientations; a run only counts when all `win_length` cells
//! lie on the board.

use super::board::Board;
use super::types::{Position, Side, WinningLine};

pub fn check_win(board: &Board, side: Side, win_length: usize) -> bool {
    find_winning_line(board, side, win_length).is_some()
}

pub fn find_winning_line(board: &Board, side: Side, win_length: usize) -> Option<WinningLine> {
    if win_length == 0 || win_length > board.size() {
        return None;
    }
    let cells = board.rows();
    let size = board.size();

    for y in 0..size {
        for x in 0..size {
            if cells[y][x] != Some(side) {
                continue;
            }

            let start = Position::new(x, y);
            let span = win_length - 1;
            if check_horizontal(cells, x, y, side, win_length) {
                return Some(WinningLine::new(side, start, Position::new(x + span, y)));
            }
            if check_vertical(cells, x, y, side, win_length) {
                return Some(WinningLine::new(side, start, Position::new(x, y + span)));
            }
            if check_diagonal_nw_se(cells, x, y, side, win_length) {
                return Some(WinningLine::new(side, start, Position::new(x + span, y + span)));
            }
            if check_diagonal_sw_ne(cells, x, y, side, win_length) {
                return Some(WinningLine::new(side, start, Position::new(x + span, y - span)));
            }
        }
    }

    None
}

fn check_horizontal(
    cells: &[Vec<Option<Side>>],
    x: usize,
    y: usize,
    side: Side,
    win_length: usize,
) -> bool {
    if x + win_length > cells.len() {
        return false;
    }
    (0..win_length).all(|i| cells[y][x + i] == Some(side))
}

fn check_vertical(
    cells: &[Vec<Option<Side>>],
    x: usize,
    y: usize,
    side: Side,
    win_length: usize,
) -> bool {
    if y + win_length > cells.len() {
        return false;
    }
    (0..win_length).all(|i| cells[y + i][x] == Some(side))
}

fn check_diagonal_nw_se(
    cells: &[Vec<Option<Side>>],
    x: usize,
    y: usize,
    side: Side,
    win_length: usize,
) -> bool {
    let size = cells.len();
    if x + win_length > size || y + win_length > size {
        return false;
    }
    (0..win_length).all(|i| cells[y + i][x + i] == Some(side))
}

fn check_diagonal_sw_ne(
    cells: &[Vec<Option<Side>>],
    x: usize,
    y: usize,
    side: Side,
    win_length: usize,
) -> bool {
    if x + win_length > cells.len() || y + 1 < win_length {
        return false;
    }
    (0..win_length).all(|i| cells[y - i][x + i] == Some(side))
}
