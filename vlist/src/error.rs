use core::fmt;

/// Rejected list configuration.
///
/// Returned by [`crate::ListOptions::validate`] and [`crate::HeightList::new`]. Values are never
/// clamped into range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ConfigError {
    /// The estimated item height is zero, negative, or not finite.
    InvalidEstimatedHeight(f64),
    /// The buffer count is negative (only reachable through [`crate::ListConfig`]).
    NegativeBufferCount(i64),
    /// The initial viewport height is negative or not finite.
    InvalidViewportHeight(f64),
    /// The initial scroll offset is negative or not finite.
    InvalidScrollOffset(f64),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidEstimatedHeight(h) => {
                write!(f, "estimated item height must be finite and positive (got {h})")
            }
            Self::NegativeBufferCount(n) => {
                write!(f, "buffer count must not be negative (got {n})")
            }
            Self::InvalidViewportHeight(h) => {
                write!(f, "viewport height must be finite and non-negative (got {h})")
            }
            Self::InvalidScrollOffset(o) => {
                write!(f, "scroll offset must be finite and non-negative (got {o})")
            }
        }
    }
}

impl core::error::Error for ConfigError {}
