use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use log::{info, warn};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::{Duration, Instant};
use tokio::time::interval;

use crate::game::{Direction, GameEngine, Session};
use crate::input::{InputHandler, KeyAction};
use crate::leaderboard::Leaderboard;
use crate::metrics::SessionMetrics;
use crate::render::{Hud, MENU_ITEMS, Renderer};

/// Interactive play in the terminal.
///
/// One task owns everything: key events are queued into the session as they
/// arrive, and each render frame advances the simulation before drawing.
pub struct HumanMode {
    session: Session,
    leaderboard: Leaderboard,
    metrics: SessionMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    menu_selection: usize,
    should_quit: bool,
    last_frame: Instant,
}

impl HumanMode {
    pub fn new(engine: GameEngine, leaderboard: Leaderboard) -> Self {
        let mut mode = Self {
            session: Session::new(engine),
            leaderboard,
            metrics: SessionMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            menu_selection: 0,
            should_quit: false,
            last_frame: Instant::now(),
        };
        mode.load_leaderboard();
        mode
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        if let Err(err) = self.leaderboard.save() {
            warn!("Leaderboard not saved on exit: {:#}", err);
        }

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        // Render at 30 FPS (33ms per frame); logic ticks are throttled inside the session
        let render_interval = Duration::from_millis(33);
        let mut render_timer = interval(render_interval);
        self.last_frame = Instant::now();

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event);
                    }
                }

                // Advance and render one frame
                _ = render_timer.tick() => {
                    let now = Instant::now();
                    let delta_time = now.duration_since(self.last_frame).as_secs_f32();
                    self.last_frame = now;
                    self.advance_frame(delta_time);

                    let hud = Hud {
                        leaderboard: self.leaderboard.scores(),
                        metrics: &self.metrics,
                        menu_selection: self.menu_selection,
                    };
                    let snapshot = self.session.snapshot();
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &snapshot, &hud);
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return;
            }

            let action = self.input_handler.handle_key_event(key);
            self.handle_action(action);
        }
    }

    fn handle_action(&mut self, action: KeyAction) {
        if self.session.is_over() {
            self.handle_menu_action(action);
            return;
        }

        match action {
            KeyAction::Turn(direction) => {
                self.session.push_direction(direction);
            }
            KeyAction::TogglePause => {
                self.session.toggle_pause();
            }
            KeyAction::Quit => {
                self.should_quit = true;
            }
            KeyAction::Confirm | KeyAction::Restart | KeyAction::None => {}
        }
    }

    fn handle_menu_action(&mut self, action: KeyAction) {
        let items = MENU_ITEMS.len();
        match action {
            KeyAction::Turn(Direction::Up) => {
                self.menu_selection = (self.menu_selection + items - 1) % items;
            }
            KeyAction::Turn(Direction::Down) => {
                self.menu_selection = (self.menu_selection + 1) % items;
            }
            KeyAction::Confirm => {
                if self.menu_selection == 0 {
                    self.restart();
                } else {
                    self.should_quit = true;
                }
            }
            KeyAction::Restart => self.restart(),
            KeyAction::Quit => self.should_quit = true,
            _ => {}
        }
    }

    fn advance_frame(&mut self, delta_time: f32) {
        let was_over = self.session.is_over();
        let playing = !was_over && !self.session.is_paused();

        self.session.advance(delta_time);
        self.metrics.tick(delta_time, playing);

        if !was_over && self.session.is_over() {
            self.finish_game();
        }
    }

    fn finish_game(&mut self) {
        let score = self.session.score();
        self.metrics.on_game_over(score);
        self.menu_selection = 0;

        if self.leaderboard.update(score) {
            info!("New leaderboard entry {}: {:?}", score, self.leaderboard.scores());
        }
        if let Err(err) = self.leaderboard.save() {
            warn!("Leaderboard not saved: {:#}", err);
        }
    }

    fn restart(&mut self) {
        self.load_leaderboard();
        self.session.restart();
        self.metrics.on_game_start();
        self.menu_selection = 0;
    }

    fn load_leaderboard(&mut self) {
        if let Err(err) = self.leaderboard.load() {
            warn!("Starting with an empty leaderboard: {:#}", err);
        }
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::GameConfig;
    use tempfile::TempDir;

    fn mode_in(dir: &TempDir) -> HumanMode {
        let engine = GameEngine::with_seed(GameConfig::small(), 17);
        let leaderboard = Leaderboard::new(dir.path().join("record.dat"), 3);
        HumanMode::new(engine, leaderboard)
    }

    fn play_until_over(mode: &mut HumanMode) {
        for _ in 0..400 {
            mode.advance_frame(0.05);
            if mode.session.is_over() {
                break;
            }
        }
        assert!(mode.session.is_over());
    }

    #[test]
    fn test_game_initialization() {
        let temp_dir = TempDir::new().unwrap();
        let mode = mode_in(&temp_dir);
        assert!(!mode.session.is_over());
        assert_eq!(mode.session.score(), 0);
        assert_eq!(mode.leaderboard.scores(), &[0, 0, 0]);
    }

    #[test]
    fn test_game_over_saves_leaderboard() {
        let temp_dir = TempDir::new().unwrap();
        let mut mode = mode_in(&temp_dir);

        play_until_over(&mut mode);

        assert_eq!(mode.metrics.games_played, 1);
        assert_eq!(mode.leaderboard.scores()[0], mode.session.score());

        let bytes = std::fs::read(temp_dir.path().join("record.dat")).unwrap();
        assert_eq!(bytes.len(), 12);
    }

    #[test]
    fn test_menu_restart_and_quit() {
        let temp_dir = TempDir::new().unwrap();
        let mut mode = mode_in(&temp_dir);
        play_until_over(&mut mode);

        // Turns drive the menu while the game is over
        mode.handle_action(KeyAction::Turn(Direction::Down));
        assert_eq!(mode.menu_selection, 1);
        mode.handle_action(KeyAction::Turn(Direction::Down));
        assert_eq!(mode.menu_selection, 0);

        mode.handle_action(KeyAction::Confirm);
        assert!(!mode.session.is_over());
        assert_eq!(mode.session.score(), 0);

        play_until_over(&mut mode);
        mode.handle_action(KeyAction::Turn(Direction::Up));
        mode.handle_action(KeyAction::Confirm);
        assert!(mode.should_quit);
    }

    #[test]
    fn test_restart_ignored_while_playing() {
        let temp_dir = TempDir::new().unwrap();
        let mut mode = mode_in(&temp_dir);
        mode.handle_action(KeyAction::Restart);
        mode.handle_action(KeyAction::TogglePause);
        mode.advance_frame(0.05);
        assert!(mode.session.is_paused());
        assert!(!mode.should_quit);

        mode.handle_action(KeyAction::Quit);
        assert!(mode.should_quit);
    }
}
