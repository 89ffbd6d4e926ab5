use crate::commands::{CliError, RenderCmd};

use sweep::algorithms::aabb::bounding_box;
use sweep::paint::stroke::{PathGradientOptions, PathGradientStroker};
use sweep::paint::{Gradient, PixelCanvas};
use sweep::path::Path;

use std::io::Write;

/// Largest width or height of a rendered image.
pub const MAX_IMAGE_SIZE: u32 = 16384;

pub fn render(mut cmd: RenderCmd) -> Result<(), CliError> {
    let gradient = Gradient::new(cmd.stops.iter().cloned())?;

    let options = PathGradientOptions::DEFAULT
        .with_line_width(cmd.line_width)
        .with_line_cap(cmd.line_cap)
        .with_step(cmd.step)
        .with_tolerance(cmd.tolerance);

    let (width, height) = image_size(cmd.size, &cmd.path, cmd.line_width)?;

    info!("rendering a {}x{} image", width, height);

    let mut canvas = PixelCanvas::try_with_background(width, height, cmd.background)?;
    let mut stroker = PathGradientStroker::new();
    stroker.stroke(&mut canvas, &cmd.path, &gradient, &options)?;

    debug!("{} samples", stroker.samples().len());

    canvas.write_ppm(&mut cmd.output)?;
    cmd.output.flush()?;

    Ok(())
}

/// Picks the explicit size if any, otherwise fits the path and its stroke, starting
/// from the origin.
pub fn image_size(
    size: Option<(u32, u32)>,
    path: &Path,
    line_width: f32,
) -> Result<(u32, u32), CliError> {
    let (width, height) = match size {
        Some((w, h)) => (w as f32, h as f32),
        None => {
            let aabb = bounding_box(path);
            let margin = line_width.max(0.0) + 1.0;
            (
                (aabb.max.x + margin).ceil().max(1.0),
                (aabb.max.y + margin).ceil().max(1.0),
            )
        }
    };

    // Also catches NaN and infinite bounds.
    let max = MAX_IMAGE_SIZE as f32;
    if !(width <= max && height <= max) {
        return Err(CliError::ImageSize {
            width,
            height,
            max: MAX_IMAGE_SIZE,
        });
    }

    Ok((width as u32, height as u32))
}

#[cfg(test)]
fn render_to_sink(src: &str, size: Option<(u32, u32)>) -> Result<(), CliError> {
    use sweep::extra::parser::parse_svg_path;
    use sweep::paint::{Color, GradientStop, LineCap};

    render(RenderCmd {
        path: parse_svg_path(src)?,
        output: Box::new(std::io::sink()),
        line_width: 2.0,
        line_cap: LineCap::Butt,
        step: 1.0,
        tolerance: 0.01,
        stops: vec![
            GradientStop::new(0.0, Color::BLACK),
            GradientStop::new(1.0, Color::WHITE),
        ],
        size,
        background: Color::BLACK,
    })
}

#[test]
fn fit_image_to_path() {
    let path = sweep::extra::parser::parse_svg_path("M 0 0 L 10.5 20").unwrap();
    assert_eq!(image_size(None, &path, 2.0).unwrap(), (14, 23));
    assert_eq!(image_size(Some((5, 6)), &path, 2.0).unwrap(), (5, 6));

    assert!(render_to_sink("M 0 0 L 10 20", None).is_ok());
}

#[test]
fn far_away_paths_need_an_explicit_size() {
    assert!(matches!(
        render_to_sink("M 0 0 L 1e5 1e5", None),
        Err(CliError::ImageSize { .. })
    ));
    assert!(matches!(
        render_to_sink("M 0 0 L 10 10", Some((100_000, 100_000))),
        Err(CliError::ImageSize { .. })
    ));

    // An explicit size renders the visible part only.
    assert!(render_to_sink("M 0 0 L 1e5 1e5", Some((16, 16))).is_ok());
}
