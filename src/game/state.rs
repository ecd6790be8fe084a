use super::action::Direction;
use super::config::GameMode;
use super::effects::EffectTimers;
use super::food::Food;
use super::obstacles::Obstacles;

/// Largest frame delta fed into the snake clock, in seconds
pub const MAX_UPDATE_DELTA: f32 = 1.0 / 30.0;

/// A cell on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }
}

/// The playing field: a half-open `[0, width) x [0, height)` rectangle of cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    pub width: i32,
    pub height: i32,
    pub mode: GameMode,
}

impl Board {
    pub fn new(width: usize, height: usize, mode: GameMode) -> Self {
        Self {
            width: width as i32,
            height: height as i32,
            mode,
        }
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.x < self.width && pos.y >= 0 && pos.y < self.height
    }

    pub fn center(&self) -> Position {
        Position::new(self.width / 2, self.height / 2)
    }

    /// Neighbouring cell in `direction`, wrapped around the edges in unbounded mode
    pub fn step(&self, pos: Position, direction: Direction) -> Position {
        let next = pos.moved_in_direction(direction);
        match self.mode {
            GameMode::Bounded => next,
            GameMode::Unbounded => Position::new(
                next.x.rem_euclid(self.width),
                next.y.rem_euclid(self.height),
            ),
        }
    }

    /// Cells at least one cell away from every edge
    pub fn interior(&self) -> impl Iterator<Item = Position> + '_ {
        (1..self.height - 1).flat_map(move |y| (1..self.width - 1).map(move |x| Position::new(x, y)))
    }
}

/// The snake: segments head-first, heading, speed and its movement clock
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    body: Vec<Position>,
    direction: Direction,
    /// Cells per second
    speed: f32,
    accumulated_time: f32,
    board: Board,
    food: Option<Position>,
}

impl Snake {
    /// Create a snake with its head at `head`, its body trailing behind it.
    ///
    /// `direction` must be a moving heading; a paused snake would stack every
    /// segment on the head.
    pub fn new(head: Position, direction: Direction, length: usize, speed: f32, board: Board) -> Self {
        debug_assert!(!direction.is_paused());
        let mut body = vec![head];

        let back = direction.opposite();
        for i in 1..length.max(1) {
            let prev = body[i - 1];
            body.push(prev.moved_in_direction(back));
        }

        Self {
            body,
            direction,
            speed,
            accumulated_time: 0.0,
            board,
            food: None,
        }
    }

    /// Let the snake know where the current food sits
    pub fn sense_food(&mut self, food: Option<Position>) {
        self.food = food;
    }

    /// Try to switch heading. A 180-degree reversal is rejected unless the snake
    /// is paused, in which case any heading resumes motion.
    pub fn change_direction(&mut self, new_direction: Direction) -> bool {
        if !self.direction.accepts(new_direction) {
            return false;
        }
        self.direction = new_direction;
        true
    }

    /// The cell the head would occupy after one move. A paused snake stays put.
    pub fn create_new_head(&self) -> Position {
        self.board.step(self.head(), self.direction)
    }

    /// Whether the next move lands on the food
    pub fn touch_food(&self) -> bool {
        self.food == Some(self.create_new_head())
    }

    /// Advance one cell, growing by one if the new head is the food.
    /// Returns whether food was eaten.
    pub fn move_forward(&mut self) -> bool {
        debug_assert!(!self.direction.is_paused());
        let new_head = self.create_new_head();
        let ate_food = self.touch_food();

        self.body.insert(0, new_head);
        if !ate_food {
            self.body.pop();
        }

        ate_food
    }

    pub fn is_part_of_snake(&self, x: i32, y: i32) -> bool {
        self.body.contains(&Position::new(x, y))
    }

    /// Head outside the board. Never true on an unbounded board, where moves wrap.
    pub fn hit_wall(&self) -> bool {
        match self.board.mode {
            GameMode::Bounded => !self.board.contains(self.head()),
            GameMode::Unbounded => false,
        }
    }

    /// Head overlaps any other segment
    pub fn hit_self(&self) -> bool {
        self.body_segments().contains(&self.head())
    }

    pub fn hit_obstacle(&self, obstacles: &Obstacles) -> bool {
        obstacles.contains(self.head())
    }

    pub fn check_collision(&self) -> bool {
        self.hit_wall() || self.hit_self()
    }

    /// Feed frame time into the movement clock, clamped to `MAX_UPDATE_DELTA`
    pub fn update(&mut self, delta_time: f32) {
        self.accumulated_time += delta_time.clamp(0.0, MAX_UPDATE_DELTA);
    }

    /// Whether enough time has built up for one move at the current speed
    pub fn move_due(&self) -> bool {
        self.speed > 0.0 && self.accumulated_time >= 1.0 / self.speed
    }

    pub fn accumulated_time(&self) -> f32 {
        self.accumulated_time
    }

    pub fn reset_accumulated_time(&mut self) {
        self.accumulated_time = 0.0;
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn set_speed(&mut self, speed: f32) {
        self.speed = speed;
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// All segments, head first
    pub fn segments(&self) -> &[Position] {
        &self.body
    }

    /// Get body segments (excluding head)
    pub fn body_segments(&self) -> &[Position] {
        &self.body[1..]
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Always false: a snake keeps at least its head
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Why a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Snake hit a wall
    Wall,
    /// Snake hit itself
    SelfCollision,
    /// Snake hit an obstacle cell
    Obstacle,
}

/// Complete game state
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    pub food: Option<Food>,
    pub obstacles: Obstacles,
    pub effects: EffectTimers,
    pub board: Board,
    pub score: u32,
    /// `score / points_per_level`
    pub level: u32,
    /// Speed before food effects; level-ups raise it
    pub base_speed: f32,
    /// Cells moved so far
    pub steps: u32,
    pub is_alive: bool,
    pub collision: Option<CollisionType>,
}

impl GameState {
    /// Create a new game state. The snake starts at the base speed.
    pub fn new(snake: Snake, food: Option<Food>, obstacles: Obstacles, effects: EffectTimers) -> Self {
        let board = snake.board;
        let base_speed = snake.speed();
        let mut state = Self {
            snake,
            food,
            obstacles,
            effects,
            board,
            score: 0,
            level: 0,
            base_speed,
            steps: 0,
            is_alive: true,
            collision: None,
        };
        state.set_food(food);
        state
    }

    /// Replace the food and tell the snake about it
    pub fn set_food(&mut self, food: Option<Food>) {
        self.food = food;
        self.snake.sense_food(food.map(|f| f.position));
    }

    /// Check if a position is within the grid bounds
    pub fn is_in_bounds(&self, pos: Position) -> bool {
        self.board.contains(pos)
    }

    /// Cell taken by the snake or an obstacle
    pub fn is_blocked(&self, pos: Position) -> bool {
        self.snake.is_part_of_snake(pos.x, pos.y) || self.obstacles.contains(pos)
    }

    /// Push the effective speed (base speed plus open effect windows) to the snake
    pub fn sync_speed(&mut self) {
        let speed = self.effects.effective_speed(self.base_speed);
        self.snake.set_speed(speed);
    }
}
