//! Value types mirroring the scoreboard backend payloads.

mod contest;
mod course;
mod game;
mod golf;
mod ids;
mod player;
mod rivalry;
mod team;
pub mod validation;

pub use contest::*;
pub use course::*;
pub use game::*;
pub use golf::*;
pub use ids::*;
pub use player::*;
pub use rivalry::*;
pub use team::*;
pub use validation::ValidationError;
