//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! The terminal front end drives it through [`Session`] and draws its [`Snapshot`].

pub mod action;
pub mod clock;
pub mod config;
pub mod effects;
pub mod engine;
pub mod food;
pub mod obstacles;
pub mod session;
pub mod state;

// Re-export commonly used types
pub use action::{Action, Direction};
pub use clock::FixedStep;
pub use config::{DifficultyPreset, GameConfig, GameMode, MapType};
pub use effects::{EffectTimers, Expired};
pub use engine::{GameEngine, StepInfo, StepResult};
pub use food::{Food, FoodKind};
pub use obstacles::Obstacles;
pub use session::{Session, Snapshot};
pub use state::{Board, CollisionType, GameState, Position, Snake};
