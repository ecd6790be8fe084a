use log::{debug, info};
use rand::SeedableRng;
use rand::rngs::StdRng;

use super::{
    action::{Action, Direction},
    config::{GameConfig, MapType},
    effects::EffectTimers,
    food::{Food, FoodKind},
    obstacles::Obstacles,
    state::{Board, CollisionType, GameState, Position, Snake},
};

/// Cells ahead of a fresh snake kept free of procedural obstacles
const SPAWN_RUNWAY: usize = 3;

/// Information about a step
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepInfo {
    /// Kind of the food eaten this step, if any
    pub ate_food: Option<FoodKind>,
    /// Points gained this step
    pub points: u32,
    /// Whether the score crossed onto a level boundary
    pub leveled_up: bool,
    /// Type of collision if one occurred
    pub collision_type: Option<CollisionType>,
}

/// Result of a logic tick
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    /// Whether the snake moved one cell this tick
    pub moved: bool,
    /// Whether the session has ended
    pub terminated: bool,
    /// Additional information about the step
    pub info: StepInfo,
}

impl StepResult {
    fn idle(terminated: bool) -> Self {
        Self {
            moved: false,
            terminated,
            info: StepInfo::default(),
        }
    }
}

/// The game engine that handles all game logic
pub struct GameEngine {
    config: GameConfig,
    rng: StdRng,
    obstacle_map: Option<Obstacles>,
}

impl GameEngine {
    /// Create a new game engine with the given configuration
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            rng: StdRng::from_entropy(),
            obstacle_map: None,
        }
    }

    /// Engine with reproducible food and obstacle placement
    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        Self {
            config,
            rng: StdRng::seed_from_u64(seed),
            obstacle_map: None,
        }
    }

    /// Use a loaded map instead of random obstacles in `MapType::Obstacles` sessions
    pub fn with_obstacle_map(mut self, obstacles: Obstacles) -> Self {
        self.obstacle_map = Some(obstacles);
        self
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn board(&self) -> Board {
        Board::new(
            self.config.grid_width,
            self.config.grid_height,
            self.config.mode,
        )
    }

    /// Build a fresh session state: centered snake heading up, obstacles, food
    pub fn reset(&mut self) -> GameState {
        let board = self.board();

        let snake = Snake::new(
            board.center(),
            Direction::Up,
            self.config.initial_snake_length,
            self.config.difficulty.base_speed(),
            board,
        );

        let obstacles = self.build_obstacles(&board, &snake);
        let mut state = GameState::new(snake, None, obstacles, EffectTimers::new(&self.config));

        let food = self.spawn_food(&state);
        state.set_food(food);

        info!(
            "New session: {}x{} {:?}, {:?} ({} cells/s), {:?} map with {} obstacles",
            board.width,
            board.height,
            self.config.mode,
            self.config.difficulty,
            state.base_speed,
            self.config.map,
            state.obstacles.len()
        );

        state
    }

    /// Run one logic tick: apply the action, feed the movement clock, and when a
    /// move is due, advance the snake and resolve food and collisions.
    pub fn step(&mut self, state: &mut GameState, action: Action, delta_time: f32) -> StepResult {
        if !state.is_alive {
            return StepResult::idle(true);
        }

        if let Action::Move(direction) = action {
            state.snake.change_direction(direction);
        }

        state.snake.update(delta_time);
        if !state.snake.move_due() {
            return StepResult::idle(false);
        }
        state.snake.reset_accumulated_time();

        if state.snake.direction().is_paused() {
            return StepResult::idle(false);
        }

        let ate_food = state.snake.move_forward();
        state.steps += 1;

        let mut info = StepInfo::default();
        if ate_food {
            self.consume_food(state, &mut info);
        }

        if let Some(collision_type) = self.check_collision(state) {
            state.is_alive = false;
            state.collision = Some(collision_type);
            info.collision_type = Some(collision_type);
            info!(
                "Session over: {:?} at {:?}, score {}, length {}",
                collision_type,
                state.snake.head(),
                state.score,
                state.snake.len()
            );
        }

        StepResult {
            moved: true,
            terminated: !state.is_alive,
            info,
        }
    }

    fn consume_food(&mut self, state: &mut GameState, info: &mut StepInfo) {
        let Some(food) = state.food else {
            return;
        };

        state.effects.trigger(food.kind);
        let points = state.effects.points_per_food();
        state.score += points;

        let per_level = self.config.points_per_level;
        state.level = state.score / per_level;
        if state.score % per_level == 0 {
            state.base_speed += self.config.level_speed_bonus;
            info.leveled_up = true;
            info!(
                "Level {} reached, base speed {}",
                state.level, state.base_speed
            );
        }
        state.sync_speed();

        debug!(
            "Ate {:?} at {:?}: +{} (score {}, speed {})",
            food.kind,
            food.position,
            points,
            state.score,
            state.snake.speed()
        );

        info.ate_food = Some(food.kind);
        info.points = points;

        let next = self.spawn_food(state);
        state.set_food(next);
    }

    /// Check if the head now sits on a wall, the body, or an obstacle
    fn check_collision(&self, state: &GameState) -> Option<CollisionType> {
        if state.snake.hit_wall() {
            return Some(CollisionType::Wall);
        }

        if state.snake.hit_self() {
            return Some(CollisionType::SelfCollision);
        }

        if state.snake.hit_obstacle(&state.obstacles) {
            return Some(CollisionType::Obstacle);
        }

        None
    }

    /// Spawn food at a random free interior cell
    fn spawn_food(&mut self, state: &GameState) -> Option<Food> {
        Food::spawn(&mut self.rng, &state.board, |pos| state.is_blocked(pos))
    }

    fn build_obstacles(&mut self, board: &Board, snake: &Snake) -> Obstacles {
        if self.config.map == MapType::Empty {
            return Obstacles::default();
        }

        let mut keep_clear: Vec<Position> = snake.segments().to_vec();
        let mut ahead = snake.head();
        for _ in 0..SPAWN_RUNWAY {
            ahead = board.step(ahead, snake.direction());
            keep_clear.push(ahead);
        }

        match &self.obstacle_map {
            Some(map) => {
                let mut obstacles = map.clone();
                obstacles.clear_cells(&keep_clear);
                obstacles
            }
            None => Obstacles::generate(&mut self.rng, board, self.config.obstacle_count, &keep_clear),
        }
    }
}
