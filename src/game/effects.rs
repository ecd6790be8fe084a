use super::config::GameConfig;
use super::food::FoodKind;

/// Countdown windows opened by special food.
///
/// Speed effects never touch the base speed: the snake runs at
/// `effective_speed(base)`, so closing a window simply drops its modifier.
/// Eating the same kind again while its window is open restarts the countdown
/// without stacking the modifier.
#[derive(Debug, Clone, PartialEq)]
pub struct EffectTimers {
    speed_up: f32,
    slow_down: f32,
    double_points: f32,
    duration: f32,
    speed_up_delta: f32,
    slow_down_factor: f32,
}

/// Windows that closed during one `advance`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Expired {
    pub speed_up: bool,
    pub slow_down: bool,
    pub double_points: bool,
}

impl Expired {
    pub fn any(&self) -> bool {
        self.speed_up || self.slow_down || self.double_points
    }

    pub fn changes_speed(&self) -> bool {
        self.speed_up || self.slow_down
    }
}

impl EffectTimers {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            speed_up: 0.0,
            slow_down: 0.0,
            double_points: 0.0,
            duration: config.effect_duration,
            speed_up_delta: config.speed_up_delta,
            slow_down_factor: config.slow_down_factor,
        }
    }

    /// Open (or restart) the window for `kind`. Normal food has no window.
    pub fn trigger(&mut self, kind: FoodKind) {
        match kind {
            FoodKind::Normal => {}
            FoodKind::SpeedUp => self.speed_up = self.duration,
            FoodKind::SlowDown => self.slow_down = self.duration,
            FoodKind::DoublePoints => self.double_points = self.duration,
        }
    }

    /// Count every open window down by `delta_time` seconds
    pub fn advance(&mut self, delta_time: f32) -> Expired {
        Expired {
            speed_up: count_down(&mut self.speed_up, delta_time),
            slow_down: count_down(&mut self.slow_down, delta_time),
            double_points: count_down(&mut self.double_points, delta_time),
        }
    }

    pub fn is_active(&self, kind: FoodKind) -> bool {
        self.remaining(kind) > 0.0
    }

    /// Seconds left in the window for `kind`
    pub fn remaining(&self, kind: FoodKind) -> f32 {
        match kind {
            FoodKind::Normal => 0.0,
            FoodKind::SpeedUp => self.speed_up,
            FoodKind::SlowDown => self.slow_down,
            FoodKind::DoublePoints => self.double_points,
        }
    }

    /// Points for one food eaten right now
    pub fn points_per_food(&self) -> u32 {
        if self.is_active(FoodKind::DoublePoints) { 2 } else { 1 }
    }

    pub fn effective_speed(&self, base_speed: f32) -> f32 {
        let mut speed = base_speed;
        if self.is_active(FoodKind::SpeedUp) {
            speed += self.speed_up_delta;
        }
        if self.is_active(FoodKind::SlowDown) {
            speed *= self.slow_down_factor;
        }
        speed
    }
}

fn count_down(timer: &mut f32, delta_time: f32) -> bool {
    if *timer <= 0.0 {
        return false;
    }
    *timer -= delta_time;
    if *timer <= 0.0 {
        *timer = 0.0;
        return true;
    }
    false
}
