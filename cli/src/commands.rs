use sweep::algorithms::sample::SamplingError;
use sweep::extra::parser::ParseError;
use sweep::paint::gradient::GradientStop;
use sweep::paint::{
    Color, ColorParseError, InvalidArgument, InvalidConfiguration, LineCap, PathGradientError,
};
use sweep::path::Path;

use std::io;
use thiserror::Error;

pub struct RenderCmd {
    pub path: Path,
    pub output: Box<dyn io::Write>,
    pub line_width: f32,
    pub line_cap: LineCap,
    pub step: f32,
    pub tolerance: f32,
    pub stops: Vec<GradientStop>,
    pub size: Option<(u32, u32)>,
    pub background: Color,
}

pub struct SampleCmd {
    pub path: Path,
    pub output: Box<dyn io::Write>,
    pub step: f32,
    pub tolerance: f32,
    /// Print the stroked segments and their colors instead of the samples.
    pub segments: Option<Vec<GradientStop>>,
}

pub struct LengthCmd {
    pub path: Path,
    pub output: Box<dyn io::Write>,
    pub tolerance: f32,
}

#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Io(#[from] io::Error),
    #[error("Failed to parse the path: {0}")]
    Path(#[from] ParseError),
    #[error("{0}")]
    Sampling(#[from] SamplingError),
    #[error("{0}")]
    Stroke(#[from] PathGradientError),
    #[error("{0}")]
    Gradient(#[from] InvalidConfiguration),
    #[error("Invalid color: {0}")]
    Color(#[from] ColorParseError),
    #[error("{0}")]
    Canvas(#[from] InvalidArgument),
    #[error("The image would be {width}x{height} pixels, the maximum is {max}x{max}. Use --size to pick a smaller image.")]
    ImageSize { width: f32, height: f32, max: u32 },
    #[error("Invalid value {value:?} for {name}.")]
    Value { name: &'static str, value: String },
    #[error("Cannot open file {file}: {error}")]
    Input { file: String, error: io::Error },
}

/// Parses a gradient stop list such as `0:#000000,0.5:#ff0000,1:#ffffff`.
pub fn parse_stops(src: &str) -> Result<Vec<GradientStop>, CliError> {
    let mut stops = Vec::new();
    for item in src.split(',').map(str::trim).filter(|item| !item.is_empty()) {
        let invalid = || CliError::Value {
            name: "stops",
            value: item.to_string(),
        };

        let mut parts = item.splitn(2, ':');
        let offset = parts
            .next()
            .and_then(|offset| offset.trim().parse::<f32>().ok())
            .ok_or_else(invalid)?;
        let color = parts.next().ok_or_else(invalid)?;

        stops.push(GradientStop::new(offset, Color::from_hex(color)?));
    }

    Ok(stops)
}

/// Parses a size such as `640x480`.
pub fn parse_size(src: &str) -> Result<(u32, u32), CliError> {
    let invalid = || CliError::Value {
        name: "size",
        value: src.to_string(),
    };

    let mut parts = src.splitn(2, |c| c == 'x' || c == 'X');
    let width = parts.next().and_then(|w| w.trim().parse::<u32>().ok());
    let height = parts.next().and_then(|h| h.trim().parse::<u32>().ok());

    match (width, height) {
        (Some(w), Some(h)) if w > 0 && h > 0 => Ok((w, h)),
        _ => Err(invalid()),
    }
}

pub fn parse_line_cap(src: &str) -> Result<LineCap, CliError> {
    match src {
        "butt" => Ok(LineCap::Butt),
        "round" => Ok(LineCap::Round),
        "square" => Ok(LineCap::Square),
        _ => Err(CliError::Value {
            name: "cap",
            value: src.to_string(),
        }),
    }
}

#[test]
fn stops() {
    let stops = parse_stops("0:#000000, 0.5:#ff0000 ,1:#ffffff").unwrap();
    assert_eq!(stops.len(), 3);
    assert_eq!(stops[1], GradientStop::new(0.5, Color::RED));

    assert!(parse_stops("0.5").is_err());
    assert!(parse_stops("x:#000000").is_err());
    assert!(matches!(parse_stops("0:#00"), Err(CliError::Color(_))));
    assert!(parse_stops("").unwrap().is_empty());
}

#[test]
fn size() {
    assert_eq!(parse_size("640x480").unwrap(), (640, 480));
    assert!(parse_size("640").is_err());
    assert!(parse_size("0x10").is_err());
    assert!(parse_size("axb").is_err());
}

#[test]
fn line_cap() {
    assert_eq!(parse_line_cap("round").unwrap(), LineCap::Round);
    assert!(parse_line_cap("miter").is_err());
}
