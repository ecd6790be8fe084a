/// Heading of the snake.
///
/// `Paused` is the fifth state: it suspends movement and is only ever entered
/// explicitly through a pause toggle. The last active heading is kept by the
/// caller so it can be restored on resume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
    Paused,
}

impl Direction {
    /// The four headings that actually move the snake
    pub const MOVING: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Returns true if turning from self to other would be a 180-degree turn
    pub fn is_opposite(&self, other: Direction) -> bool {
        matches!(
            (self, other),
            (Direction::Up, Direction::Down)
                | (Direction::Down, Direction::Up)
                | (Direction::Left, Direction::Right)
                | (Direction::Right, Direction::Left)
        )
    }

    /// Geometric opposite; `Paused` has none and maps to itself
    pub fn opposite(&self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::Paused => Direction::Paused,
        }
    }

    /// Whether a snake heading `self` may switch to `next`.
    ///
    /// Any heading is accepted while paused; otherwise only the exact reversal
    /// is forbidden.
    pub fn accepts(&self, next: Direction) -> bool {
        *self == Direction::Paused || !self.is_opposite(next)
    }

    pub fn is_paused(&self) -> bool {
        *self == Direction::Paused
    }

    /// Returns the delta (dx, dy) for moving in this direction
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
            Direction::Paused => (0, 0),
        }
    }
}

/// Action applied to the snake at the start of a logic tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Attempt to switch to a heading (including `Paused`)
    Move(Direction),
    /// Keep the current heading
    Continue,
}

impl From<Direction> for Action {
    fn from(direction: Direction) -> Self {
        Action::Move(direction)
    }
}
