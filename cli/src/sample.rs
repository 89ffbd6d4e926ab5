use crate::commands::{CliError, LengthCmd, SampleCmd};

use sweep::algorithms::length::approximate_length;
use sweep::algorithms::sample::sample_by_arc_length;
use sweep::paint::stroke::{stroke_path_gradient, PathGradientOptions};
use sweep::paint::gradient::GradientStop;
use sweep::paint::{Gradient, RecordingCanvas};

use std::io::Write;

pub fn sample(mut cmd: SampleCmd) -> Result<(), CliError> {
    if let Some(stops) = cmd.segments.take() {
        return segments(cmd, &stops);
    }

    let samples = sample_by_arc_length(&cmd.path, cmd.step, cmd.tolerance)?;

    for sample in &samples {
        writeln!(
            &mut *cmd.output,
            "{} {} {}",
            sample.position.x, sample.position.y, sample.fraction
        )?;
    }

    Ok(())
}

fn segments(mut cmd: SampleCmd, stops: &[GradientStop]) -> Result<(), CliError> {
    let gradient = Gradient::new(stops.iter().cloned())?;
    let options = PathGradientOptions::DEFAULT
        .with_step(cmd.step)
        .with_tolerance(cmd.tolerance);

    let mut canvas = RecordingCanvas::new();
    stroke_path_gradient(&mut canvas, &cmd.path, &gradient, &options)?;

    for segment in canvas.segments() {
        writeln!(
            &mut *cmd.output,
            "{} {} {} {} {}",
            segment.from.x, segment.from.y, segment.to.x, segment.to.y, segment.style.color
        )?;
    }

    Ok(())
}

pub fn length(mut cmd: LengthCmd) -> Result<(), CliError> {
    if !(cmd.tolerance > 0.0) {
        return Err(CliError::Value {
            name: "tolerance",
            value: cmd.tolerance.to_string(),
        });
    }

    let length = approximate_length(&cmd.path, cmd.tolerance);
    writeln!(&mut *cmd.output, "{}", length)?;

    Ok(())
}
