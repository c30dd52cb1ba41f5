use thiserror::Error;

/// Rejected simulation configuration. Raised before any simulation state exists.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("grid must be at least {min}x{min}, got {width}x{height}")]
    InvalidDimensions {
        width: usize,
        height: usize,
        min: usize,
    },

    #[error("agent count must be positive")]
    NoAgents,

    #[error("tick count must be positive")]
    NoTicks,

    #[error("decay factor must lie in [0, 1), got {0}")]
    InvalidDecayFactor(f64),

    #[error("deposit amount must be non-negative and fit in an f32, got {0}")]
    InvalidDepositAmount(f64),

    #[error("sensor angle must be finite, got {0}")]
    InvalidSensorAngle(f64),

    #[error("sensor distance must be finite and non-negative, got {0}")]
    InvalidSensorDistance(f64),

    #[error("step distance must be finite and positive, got {0}")]
    InvalidStepDistance(f64),

    #[error("step distance {step} does not fit inside a {width}x{height} grid, must be below {max}")]
    StepTooLong {
        step: f64,
        width: usize,
        height: usize,
        max: f64,
    },

    #[error("agent {index} at ({x}, {y}) is not strictly inside the grid")]
    AgentOutsideGrid { index: usize, x: f64, y: f64 },

    #[error("palette must hold between 2 and 256 colors, got {0}")]
    InvalidPaletteSize(usize),

    #[error("foreground index {index} is outside a palette of {size} colors")]
    ForegroundOutOfPalette { index: u8, size: usize },

    #[error("failed to load configuration: {0}")]
    Load(String),
}

/// Failure while turning snapshots into an animated image.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("image encoding error: {0}")]
    Image(#[from] image::ImageError),

    #[error("frame is {got_width}x{got_height}, expected {width}x{height}")]
    FrameSizeMismatch {
        width: u32,
        height: u32,
        got_width: u32,
        got_height: u32,
    },

    #[error("no frames to encode")]
    NoFrames,
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let e = ConfigError::InvalidDimensions {
            width: 2,
            height: 640,
            min: 3,
        };
        assert_eq!(e.to_string(), "grid must be at least 3x3, got 2x640");

        let e = ConfigError::ForegroundOutOfPalette {
            index: 254,
            size: 16,
        };
        assert_eq!(
            e.to_string(),
            "foreground index 254 is outside a palette of 16 colors"
        );

        let e = RenderError::NoFrames;
        assert_eq!(e.to_string(), "no frames to encode");
    }

    #[test]
    fn test_io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
        let e: RenderError = io.into();
        assert!(matches!(e, RenderError::Io(_)));
        assert!(e.to_string().contains("disk full"));
    }
}
