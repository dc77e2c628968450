use serde::{Deserialize, Serialize};

use super::types::Side;

/// Square grid indexed `cells[y][x]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Board {
    cells: Vec<Vec<Option<Side>>>,
}

impl Board {
    pub fn new(size: usize) -> Self {
        Self {
            cells: vec![vec![None; size]; size],
        }
    }

    pub fn size(&self) -> usize {
        self.cells.len()
    }

    pub fn in_bounds(&self, x: usize, y: usize) -> bool {
        x < self.size() && y < self.size()
    }

    /// `None` when out of bounds, `Some(None)` for an empty cell.
    pub fn get(&self, x: usize, y: usize) -> Option<Option<Side>> {
        self.cells.get(y).and_then(|row| row.get(x)).copied()
    }

    pub fn is_empty_at(&self, x: usize, y: usize) -> bool {
        self.get(x, y) == Some(None)
    }

    pub(crate) fn set(&mut self, x: usize, y: usize, side: Side) {
        self.cells[y][x] = Some(side);
    }

    pub(crate) fn clear_cell(&mut self, x: usize, y: usize) {
        self.cells[y][x] = None;
    }

    pub fn rows(&self) -> &[Vec<Option<Side>>] {
        &self.cells
    }

    pub fn occupied_count(&self) -> usize {
        self.cells
            .iter()
            .map(|row| row.iter().filter(|cell| cell.is_some()).count())
            .sum()
    }

    pub fn render(&self) -> String {
        let mut out = String::with_capacity(self.size() * (self.size() + 1));
        for row in &self.cells {
            for cell in row {
                out.push(cell.map(|side| side.symbol()).unwrap_or('.'));
            }
            out.push('\n');
        }
        out
    }
}
