use rand::Rng;
use rand::distributions::{Distribution, Standard};
use rand::seq::IteratorRandom;

use super::state::{Board, Position};

/// Random draws tried before falling back to a scan of every free cell
const MAX_RANDOM_ATTEMPTS: usize = 64;

/// Effect granted by a food item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FoodKind {
    Normal,
    SpeedUp,
    SlowDown,
    DoublePoints,
}

impl FoodKind {
    pub const ALL: [FoodKind; 4] = [
        FoodKind::Normal,
        FoodKind::SpeedUp,
        FoodKind::SlowDown,
        FoodKind::DoublePoints,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FoodKind::Normal => "Normal",
            FoodKind::SpeedUp => "Speed Up",
            FoodKind::SlowDown => "Slow Down",
            FoodKind::DoublePoints => "Double Points",
        }
    }
}

impl Distribution<FoodKind> for Standard {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> FoodKind {
        FoodKind::ALL[rng.gen_range(0..FoodKind::ALL.len())]
    }
}

/// A food item on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Food {
    pub position: Position,
    pub kind: FoodKind,
}

impl Food {
    pub fn new(position: Position, kind: FoodKind) -> Self {
        Self { position, kind }
    }

    /// Place a food of random kind on a random free interior cell.
    ///
    /// Cells on the outer edge are never used. Returns `None` only when every
    /// interior cell is blocked.
    pub fn spawn<R, F>(rng: &mut R, board: &Board, is_blocked: F) -> Option<Food>
    where
        R: Rng,
        F: Fn(Position) -> bool,
    {
        let kind: FoodKind = rng.sample(Standard);
        spawn_position(rng, board, is_blocked).map(|position| Food::new(position, kind))
    }
}

fn spawn_position<R, F>(rng: &mut R, board: &Board, is_blocked: F) -> Option<Position>
where
    R: Rng,
    F: Fn(Position) -> bool,
{
    if board.width < 3 || board.height < 3 {
        return None;
    }

    for _ in 0..MAX_RANDOM_ATTEMPTS {
        let pos = Position::new(
            rng.gen_range(1..board.width - 1),
            rng.gen_range(1..board.height - 1),
        );
        if !is_blocked(pos) {
            return Some(pos);
        }
    }

    // Nearly full board
    board.interior().filter(|pos| !is_blocked(*pos)).choose(rng)
}
