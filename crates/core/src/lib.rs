//! Star Match game logic. Keep this crate free of terminal and file IO.

pub mod config;
pub mod digits;
pub mod error;
pub mod events;
pub mod generator;
pub mod rng;
pub mod runner;
pub mod session;
pub mod timer;

pub use config::*;
pub use digits::*;
pub use error::*;
pub use events::*;
pub use generator::*;
pub use rng::*;
pub use runner::*;
pub use session::*;
pub use timer::*;
