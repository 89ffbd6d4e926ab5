extern crate clap;
extern crate env_logger;
#[macro_use]
extern crate log;
extern crate sweep;

mod commands;
mod render;
mod sample;

use clap::{App, AppSettings, Arg, ArgMatches, SubCommand};
use commands::*;

use sweep::extra::parser::parse_svg_path;
use sweep::paint::Color;

use std::fs::File;
use std::io::{self, stdout, BufWriter, Read};
use std::process;

const DEFAULT_STEP: &str = "0.1";
const DEFAULT_TOLERANCE: &str = "0.01";

fn main() {
    env_logger::init();

    let matches = App::new("sweep command-line interface")
        .version("0.1")
        .about("Strokes paths with gradients that follow their arc length")
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .subcommand(
            input_args(SubCommand::with_name("render"))
                .about("Renders a gradient stroke into a PPM image")
                .arg(
                    Arg::with_name("WIDTH")
                        .short("w")
                        .long("width")
                        .help("Sets the stroke width (1.0 by default)")
                        .value_name("WIDTH")
                        .takes_value(true)
                        .default_value("1.0"),
                )
                .arg(
                    Arg::with_name("CAP")
                        .short("c")
                        .long("cap")
                        .help("Sets the line cap")
                        .value_name("CAP")
                        .takes_value(true)
                        .possible_values(&["butt", "round", "square"])
                        .default_value("butt"),
                )
                .arg(
                    Arg::with_name("STOPS")
                        .long("stops")
                        .help("Sets the gradient stops, for example \"0:#000000,1:#ffffff\"")
                        .value_name("STOPS")
                        .takes_value(true)
                        .default_value("0:#000000,1:#ffffff"),
                )
                .arg(
                    Arg::with_name("SIZE")
                        .long("size")
                        .help("Sets the image size, for example 640x480 (fits the path by default)")
                        .value_name("WxH")
                        .takes_value(true),
                )
                .arg(
                    Arg::with_name("BACKGROUND")
                        .long("background")
                        .help("Sets the background color (white by default)")
                        .value_name("COLOR")
                        .takes_value(true)
                        .default_value("#ffffff"),
                ),
        )
        .subcommand(
            input_args(SubCommand::with_name("sample"))
                .about("Prints the arc-length samples of a path as \"x y fraction\" lines")
                .arg(
                    Arg::with_name("SEGMENTS")
                        .long("segments")
                        .help("Prints the stroked segments and their colors instead")
                        .value_name("STOPS")
                        .takes_value(true),
                ),
        )
        .subcommand(
            input_args(SubCommand::with_name("length"))
                .about("Prints the approximate length of a path"),
        )
        .get_matches();

    if let Err(e) = run(&matches) {
        error!("{:?}", e);
        eprintln!("error: {}", e);
        process::exit(1);
    }
}

// Arguments shared by all subcommands.
fn input_args<'a, 'b>(app: App<'a, 'b>) -> App<'a, 'b> {
    app.arg(
        Arg::with_name("PATH")
            .value_name("PATH")
            .help("An SVG path")
            .takes_value(true)
            .required_unless("INPUT"),
    )
    .arg(
        Arg::with_name("INPUT")
            .help("Reads the SVG path from a file")
            .short("i")
            .long("input")
            .value_name("FILE")
            .takes_value(true),
    )
    .arg(
        Arg::with_name("OUTPUT")
            .help("Sets the output file to use")
            .value_name("FILE")
            .short("o")
            .long("output")
            .takes_value(true),
    )
    .arg(
        Arg::with_name("STEP")
            .short("s")
            .long("step")
            .help("Sets the distance between two samples (0.1 by default)")
            .value_name("STEP")
            .takes_value(true)
            .default_value(DEFAULT_STEP),
    )
    .arg(
        Arg::with_name("TOLERANCE")
            .short("t")
            .long("tolerance")
            .help("Sets the tolerance threshold for flattening (0.01 by default)")
            .value_name("TOLERANCE")
            .takes_value(true)
            .default_value(DEFAULT_TOLERANCE),
    )
}

fn run(matches: &ArgMatches) -> Result<(), CliError> {
    match matches.subcommand() {
        ("render", Some(m)) => render::render(RenderCmd {
            path: get_path(m)?,
            output: get_output(m)?,
            line_width: get_number(m, "WIDTH")?,
            line_cap: parse_line_cap(m.value_of("CAP").unwrap_or("butt"))?,
            step: get_number(m, "STEP")?,
            tolerance: get_number(m, "TOLERANCE")?,
            stops: parse_stops(m.value_of("STOPS").unwrap_or(""))?,
            size: m.value_of("SIZE").map(parse_size).transpose()?,
            background: Color::from_hex(m.value_of("BACKGROUND").unwrap_or("#ffffff"))?,
        }),
        ("sample", Some(m)) => sample::sample(SampleCmd {
            path: get_path(m)?,
            output: get_output(m)?,
            step: get_number(m, "STEP")?,
            tolerance: get_number(m, "TOLERANCE")?,
            segments: m.value_of("SEGMENTS").map(parse_stops).transpose()?,
        }),
        ("length", Some(m)) => sample::length(LengthCmd {
            path: get_path(m)?,
            output: get_output(m)?,
            tolerance: get_number(m, "TOLERANCE")?,
        }),
        _ => Ok(()),
    }
}

fn get_path(matches: &ArgMatches) -> Result<sweep::path::Path, CliError> {
    let mut input = matches.value_of("PATH").unwrap_or("").to_string();

    if let Some(file_name) = matches.value_of("INPUT") {
        let mut file = File::open(file_name).map_err(|error| CliError::Input {
            file: file_name.to_string(),
            error,
        })?;
        input.clear();
        file.read_to_string(&mut input)?;
    }

    let path = parse_svg_path(&input)?;
    debug!("parsed a path with {} sub-paths", path.num_sub_paths());

    Ok(path)
}

fn get_output(matches: &ArgMatches) -> Result<Box<dyn io::Write>, CliError> {
    Ok(match matches.value_of("OUTPUT") {
        Some(file_name) => Box::new(BufWriter::new(File::create(file_name)?)),
        None => Box::new(stdout()),
    })
}

fn get_number(matches: &ArgMatches, name: &'static str) -> Result<f32, CliError> {
    let value = matches.value_of(name).unwrap_or("");
    value.trim().parse::<f32>().map_err(|_| CliError::Value {
        name,
        value: value.to_string(),
    })
}
