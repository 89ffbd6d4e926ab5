use crate::algorithms::sample::SamplingError;

use thiserror::Error;

/// A parameter of a stroke call is out of range.
#[non_exhaustive]
#[derive(Error, Copy, Clone, Debug, PartialEq)]
pub enum InvalidArgument {
    #[error("The line width must be a positive finite number, got {0}.")]
    LineWidth(f32),
    #[error("A {width}x{height} canvas is too large.")]
    CanvasSize { width: u32, height: u32 },
    #[error(transparent)]
    Sampling(#[from] SamplingError),
}

/// A gradient could not be built from the provided stops.
#[non_exhaustive]
#[derive(Error, Copy, Clone, Debug, PartialEq, Eq)]
pub enum InvalidConfiguration {
    #[error("A gradient needs at least one stop.")]
    NoStops,
    #[error("The offset of gradient stop {index} is not a number.")]
    OffsetIsNaN { index: usize },
}

/// The path gradient stroker's error enumeration.
#[non_exhaustive]
#[derive(Error, Copy, Clone, Debug, PartialEq)]
pub enum PathGradientError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(#[from] InvalidArgument),
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(#[from] InvalidConfiguration),
}

impl From<SamplingError> for PathGradientError {
    fn from(value: SamplingError) -> Self {
        PathGradientError::InvalidArgument(value.into())
    }
}

/// A color could not be parsed from its hexadecimal notation.
#[non_exhaustive]
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum ColorParseError {
    #[error("Expected 6 or 8 hexadecimal digits, got {src:?}.")]
    Length { src: String },
    #[error("Invalid hexadecimal digit in {src:?}.")]
    Digit { src: String },
}
