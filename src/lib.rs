//! Grid Snake - a Snake game with a fixed-step simulation core
//!
//! This library provides:
//! - Core game logic: snake, food effects, obstacles, logic tick (game module)
//! - Buffered directional input and key mapping (input module)
//! - Persisted high score table (leaderboard module)
//! - TUI rendering and the interactive front end (render and modes modules)

pub mod game;
pub mod input;
pub mod leaderboard;
pub mod metrics;
pub mod modes;
pub mod render;
