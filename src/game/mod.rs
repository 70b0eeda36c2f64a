//! Game module

pub mod collision;
pub mod direction;
pub mod engine;
pub mod enemy;
pub mod food;
pub mod game_loop;
pub mod lifecycle;
pub mod location;
pub mod notification;
pub mod snake;
pub mod spawn;
pub mod state;

pub use lifecycle::Game;
