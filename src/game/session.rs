//! Frame-level coordinator for one play-through.
//!
//! The presentation layer calls [`Session::advance`] once per rendered frame
//! with the frame's elapsed time, feeds player intents through
//! [`Session::push_direction`] and [`Session::toggle_pause`], and reads a
//! [`Snapshot`] afterwards to draw the post-tick state.

use log::debug;

use super::{
    action::{Action, Direction},
    clock::FixedStep,
    effects::EffectTimers,
    engine::{GameEngine, StepResult},
    food::Food,
    state::{Board, CollisionType, GameState, Position},
};
use crate::input::DirectionQueue;

/// Read-only view of a session for rendering
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    pub board: Board,
    /// Head first
    pub snake: &'a [Position],
    pub heading: Direction,
    pub food: Option<Food>,
    pub obstacles: &'a [Position],
    pub score: u32,
    pub level: u32,
    pub speed: f32,
    pub effects: &'a EffectTimers,
    pub paused: bool,
    pub is_over: bool,
    pub collision: Option<CollisionType>,
}

pub struct Session {
    engine: GameEngine,
    state: GameState,
    input: DirectionQueue,
    clock: FixedStep,
    /// Heading restored when a pause is toggled off
    resume_direction: Direction,
}

impl Session {
    pub fn new(mut engine: GameEngine) -> Self {
        let state = engine.reset();
        let input = DirectionQueue::new(engine.config().input_queue_capacity);
        let clock = FixedStep::from_hz(engine.config().logic_hz);
        let resume_direction = state.snake.direction();

        Self {
            engine,
            state,
            input,
            clock,
            resume_direction,
        }
    }

    /// Throw the current play-through away and start a fresh one
    pub fn restart(&mut self) {
        self.state = self.engine.reset();
        self.input.clear();
        self.clock.reset();
        self.resume_direction = self.state.snake.direction();
    }

    /// Queue a turn. Dropped when the queue is full or the turn would reverse
    /// the last pending heading.
    pub fn push_direction(&mut self, direction: Direction) -> bool {
        if direction.is_paused() {
            return self.toggle_pause();
        }
        self.input.push(direction, self.state.snake.direction())
    }

    /// Queue a pause, or the remembered heading when a pause is pending or active
    pub fn toggle_pause(&mut self) -> bool {
        let current = self.state.snake.direction();
        let pending = self.input.last().unwrap_or(current);

        if pending.is_paused() {
            return self.input.push(self.resume_direction, current);
        }

        if self.input.push(Direction::Paused, current) {
            self.resume_direction = pending;
            return true;
        }
        false
    }

    /// Advance by one rendered frame.
    ///
    /// Runs at most one logic tick, consuming at most one queued direction,
    /// then counts the food effect windows down. Effect windows keep running
    /// while paused. Returns the tick's result when a tick ran.
    pub fn advance(&mut self, delta_time: f32) -> Option<StepResult> {
        if !self.state.is_alive {
            return None;
        }

        let mut result = None;
        if self.clock.advance(delta_time) {
            let action = self
                .input
                .pop()
                .map(Action::from)
                .unwrap_or(Action::Continue);
            result = Some(self.engine.step(&mut self.state, action, delta_time));
        }

        if self.state.is_alive {
            let expired = self.state.effects.advance(delta_time);
            if expired.changes_speed() {
                self.state.sync_speed();
            }
            if expired.any() {
                debug!(
                    "Effect window closed: {:?}, speed now {}",
                    expired,
                    self.state.snake.speed()
                );
            }
        }

        result
    }

    pub fn is_paused(&self) -> bool {
        self.state.snake.direction().is_paused()
    }

    pub fn is_over(&self) -> bool {
        !self.state.is_alive
    }

    pub fn score(&self) -> u32 {
        self.state.score
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            board: self.state.board,
            snake: self.state.snake.segments(),
            heading: self.state.snake.direction(),
            food: self.state.food,
            obstacles: self.state.obstacles.cells(),
            score: self.state.score,
            level: self.state.level,
            speed: self.state.snake.speed(),
            effects: &self.state.effects,
            paused: self.is_paused(),
            is_over: !self.state.is_alive,
            collision: self.state.collision,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{FoodKind, GameConfig, GameMode};

    const FRAME: f32 = 0.05;

    fn session(config: GameConfig) -> Session {
        Session::new(GameEngine::with_seed(config, 42))
    }

    /// Unbounded board with no food, so the snake can run forever
    fn open_session() -> Session {
        let mut config = GameConfig::small();
        config.mode = GameMode::Unbounded;
        let mut session = session(config);
        session.state.set_food(None);
        session
    }

    fn run_frames(session: &mut Session, frames: usize) {
        for _ in 0..frames {
            session.advance(FRAME);
        }
    }

    #[test]
    fn test_one_tick_per_period() {
        let mut session = open_session();
        assert!(session.advance(0.02).is_none());
        assert!(session.advance(0.04).is_some());
        assert!(session.advance(0.02).is_none());
        // a long frame still runs a single tick
        assert!(session.advance(1.0).is_some());
        assert!(session.advance(0.01).is_none());
    }

    #[test]
    fn test_queued_turn_applies_on_next_tick() {
        let mut session = open_session();
        assert!(session.push_direction(Direction::Left));
        assert_eq!(session.state().snake.direction(), Direction::Up);

        session.advance(FRAME);
        assert_eq!(session.state().snake.direction(), Direction::Left);
    }

    #[test]
    fn test_queue_consumes_one_direction_per_tick() {
        let mut session = open_session();
        assert!(session.push_direction(Direction::Left));
        assert!(session.push_direction(Direction::Down));

        session.advance(FRAME);
        assert_eq!(session.state().snake.direction(), Direction::Left);
        session.advance(FRAME);
        assert_eq!(session.state().snake.direction(), Direction::Down);
    }

    #[test]
    fn test_queued_reversal_rejected() {
        let mut session = open_session();
        assert!(session.push_direction(Direction::Left));
        assert!(!session.push_direction(Direction::Right));
        assert!(session.push_direction(Direction::Down));
        assert!(session.push_direction(Direction::Right));
        // full
        assert!(!session.push_direction(Direction::Up));
    }

    #[test]
    fn test_pause_freezes_snake() {
        let mut session = open_session();
        assert!(session.toggle_pause());
        session.advance(FRAME);
        assert!(session.is_paused());

        let head = session.state().snake.head();
        run_frames(&mut session, 20);
        assert_eq!(session.state().snake.head(), head);
    }

    #[test]
    fn test_pause_toggle_twice_restores_heading() {
        let mut session = open_session();
        session.push_direction(Direction::Right);
        session.advance(FRAME);
        assert_eq!(session.state().snake.direction(), Direction::Right);

        // both toggles queued before a tick
        assert!(session.toggle_pause());
        assert!(session.toggle_pause());
        run_frames(&mut session, 2);
        assert_eq!(session.state().snake.direction(), Direction::Right);

        // toggles separated by ticks
        session.toggle_pause();
        run_frames(&mut session, 3);
        assert!(session.is_paused());
        session.toggle_pause();
        session.advance(FRAME);
        assert_eq!(session.state().snake.direction(), Direction::Right);
    }

    #[test]
    fn test_effect_windows_run_while_paused() {
        let mut session = open_session();
        session.state.effects.trigger(FoodKind::SpeedUp);
        session.state.sync_speed();
        session.toggle_pause();
        session.advance(FRAME);
        assert!(session.is_paused());
        assert_eq!(session.state().snake.speed(), 20.0);

        // 11 seconds at 20 FPS
        run_frames(&mut session, 220);
        assert!(session.is_paused());
        assert_eq!(session.state().effects.remaining(FoodKind::SpeedUp), 0.0);
        assert_eq!(session.state().snake.speed(), 15.0);
    }

    #[test]
    fn test_speed_up_reverts_after_ten_seconds() {
        let mut session = open_session();
        let next = session.state.snake.create_new_head();
        session.state.set_food(Some(Food::new(next, FoodKind::SpeedUp)));

        for _ in 0..10 {
            session.advance(FRAME);
            if session.score() > 0 {
                break;
            }
        }
        assert_eq!(session.score(), 1);
        assert_eq!(session.state().snake.speed(), 20.0);
        session.state.set_food(None);

        // 9.5 s
        run_frames(&mut session, 190);
        assert_eq!(session.state().snake.speed(), 20.0);

        // past 10 s
        run_frames(&mut session, 20);
        assert_eq!(session.state().snake.speed(), 15.0);
    }

    #[test]
    fn test_wall_ends_session() {
        let mut session = session(GameConfig::small());
        session.state.set_food(None);

        // 10x10 board, head starts at (5,5) heading up
        run_frames(&mut session, 200);
        assert!(session.is_over());
        assert_eq!(session.snapshot().collision, Some(CollisionType::Wall));
        assert!(session.advance(FRAME).is_none());
    }

    #[test]
    fn test_restart_builds_fresh_state() {
        let mut session = session(GameConfig::small());
        session.state.score = 9;
        session.state.is_alive = false;
        session.push_direction(Direction::Left);

        session.restart();
        assert!(!session.is_over());
        assert_eq!(session.score(), 0);
        assert_eq!(session.state().snake.len(), 2);
        assert!(session.push_direction(Direction::Left));
    }

    #[test]
    fn test_snapshot_mirrors_state() {
        let session = session(GameConfig::small());
        let snapshot = session.snapshot();
        assert_eq!(snapshot.snake, session.state().snake.segments());
        assert_eq!(snapshot.food, session.state().food);
        assert_eq!(snapshot.heading, Direction::Up);
        assert_eq!(snapshot.speed, 15.0);
        assert!(!snapshot.paused);
        assert!(!snapshot.is_over);
    }
}
