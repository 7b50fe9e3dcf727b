pub mod counts;
pub mod engine;
pub mod error;
pub mod risk;

pub use counts::*;
pub use engine::*;
pub use error::{ScoreError, TableError};
pub use risk::*;
