#![forbid(unsafe_code)]

pub mod catalog;
pub mod error;
pub mod model;
pub mod player;
pub mod randomizer;
pub mod time;
pub mod verifier;

pub use catalog::Catalog;
pub use error::Error;
pub use player::ExplanationPlayer;
pub use randomizer::Randomizer;
pub use time::Clock;
