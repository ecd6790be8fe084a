use std::time::Duration;

/// Play clock and run counters shown in the HUD.
///
/// Time only accrues while the snake is actually playing, not while paused or
/// on the game-over screen.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionMetrics {
    pub elapsed_time: Duration,
    /// Best score since the program started
    pub best_score: u32,
    pub games_played: u32,
}

impl SessionMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one frame of play time
    pub fn tick(&mut self, delta_time: f32, playing: bool) {
        if playing && delta_time > 0.0 {
            self.elapsed_time += Duration::from_secs_f32(delta_time);
        }
    }

    pub fn on_game_start(&mut self) {
        self.elapsed_time = Duration::ZERO;
    }

    pub fn on_game_over(&mut self, final_score: u32) {
        self.games_played += 1;
        if final_score > self.best_score {
            self.best_score = final_score;
        }
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }
}
