pub mod error;
pub mod id;
pub mod tolerance;
pub mod traits;

pub use error::{GeoArcError, Result};
pub use id::EventId;
pub use tolerance::MatchTolerance;
