use thiserror::Error;

/// Errors raised while loading a world configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config RON: {0}")]
    Parse(String),

    #[error("Config failed validation: {}", format_violations(.0))]
    Invalid(Vec<ValidationError>),
}

/// A single configuration constraint violation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("chunk_size must be positive, got {0}")]
    NonPositiveChunkSize(f32),
    #[error("view_radius must be non-negative, got {0}")]
    NegativeViewRadius(i32),
    #[error("{name} spacing must be positive, got {spacing}")]
    NonPositiveSpacing { name: &'static str, spacing: f32 },
    #[error("{name} half-width {half_width} leaves no gap in spacing {spacing}")]
    RoadTooWide {
        name: &'static str,
        half_width: f32,
        spacing: f32,
    },
    #[error("{name} range is inverted: min {min} > max {max}")]
    InvertedRange { name: &'static str, min: u32, max: u32 },
    #[error("warp k1*a1 = {0} must be below 1 for lane solving to converge")]
    WarpNotContracting(f32),
    #[error("{name} must be in [0, 1], got {value}")]
    OutOfUnitRange { name: &'static str, value: f32 },
    #[error("{name} must be positive, got {value}")]
    NonPositive { name: &'static str, value: f32 },
}

fn format_violations(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}
