use thiserror::Error;

/// Rejected configuration values.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("particle count {requested} exceeds the maximum of {max}")]
    TooManyParticles { requested: usize, max: usize },
}

/// A shape parameter that cannot produce finite geometry.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ShapeError {
    #[error("shape parameter `{name}` must be finite and positive, got {value}")]
    NonPositive { name: &'static str, value: f32 },
    #[error("spiral needs at least one arm")]
    NoArms,
    #[error("glyph point {index} is not finite")]
    NonFinitePoint { index: usize },
}
