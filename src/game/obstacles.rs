//! Static blocked cells for `MapType::Obstacles` sessions.
//!
//! A map file is plain text, one line per board row. `#` or `X` marks a blocked
//! cell; any other character (typically `.` or a space) is free. Rows shorter
//! than the board are padded with free cells.

use anyhow::{Context, Result, bail};
use rand::Rng;
use std::path::Path;

use super::state::{Board, Position};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Obstacles {
    cells: Vec<Position>,
}

impl Obstacles {
    pub fn from_cells(cells: Vec<Position>) -> Self {
        Self { cells }
    }

    /// Parse a text map for `board`
    pub fn parse_map(text: &str, board: &Board) -> Result<Self> {
        let mut cells = Vec::new();

        for (y, line) in text.lines().enumerate() {
            for (x, ch) in line.chars().enumerate() {
                if !matches!(ch, '#' | 'X') {
                    continue;
                }
                let pos = Position::new(x as i32, y as i32);
                if !board.contains(pos) {
                    bail!(
                        "obstacle at ({}, {}) lies outside the {}x{} board",
                        pos.x,
                        pos.y,
                        board.width,
                        board.height
                    );
                }
                cells.push(pos);
            }
        }

        Ok(Self { cells })
    }

    pub fn from_map_file(path: &Path, board: &Board) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read obstacle map {:?}", path))?;
        Self::parse_map(&text, board).with_context(|| format!("Invalid obstacle map {:?}", path))
    }

    /// Scatter up to `count` obstacles over the board interior, leaving every
    /// cell in `keep_clear` free.
    pub fn generate<R: Rng>(rng: &mut R, board: &Board, count: usize, keep_clear: &[Position]) -> Self {
        let mut cells: Vec<Position> = Vec::with_capacity(count);
        let free = board
            .interior()
            .filter(|pos| !keep_clear.contains(pos))
            .count();
        let target = count.min(free);

        while cells.len() < target {
            let pos = Position::new(
                rng.gen_range(1..board.width - 1),
                rng.gen_range(1..board.height - 1),
            );
            if !keep_clear.contains(&pos) && !cells.contains(&pos) {
                cells.push(pos);
            }
        }

        Self { cells }
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.cells.contains(&pos)
    }

    /// Drop every cell in `cells`
    pub fn clear_cells(&mut self, cells: &[Position]) {
        self.cells.retain(|pos| !cells.contains(pos));
    }

    pub fn cells(&self) -> &[Position] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}
