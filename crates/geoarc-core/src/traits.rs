use crate::error::Result;

/// Validate structural integrity of a configuration or entity collection.
pub trait Validate {
    fn validate(&self) -> Result<()>;
}
