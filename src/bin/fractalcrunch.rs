// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use clap::{App, Arg, ArgMatches};
use env_logger::Env;
use failure::Error;
use log::{info, warn};
use num::Complex;
use std::process;
use std::str::FromStr;

use fractalcrunch::output::{self, FilenameContext, OutputFormat};
use fractalcrunch::{
    fill_buffer, normalize_zoom, remap, ColorAlgo, FractalBuffer, FractalKind, FractalParameters,
    IntegralPlane, Palette, PlaneMapper, Rgb,
};

fn parse_pair<T>(s: &str, separator: char) -> Option<(T, T)>
where
    T: FromStr,
{
    match s.find(separator) {
        None => None,
        Some(index) => match (T::from_str(&s[..index]), T::from_str(&s[index + 1..])) {
            (Ok(l), Ok(r)) => Some((l, r)),
            _ => None,
        },
    }
}

fn parse_triple<T: FromStr>(s: &str) -> Option<[T; 3]> {
    let mut parts = s.split(',').map(|p| T::from_str(p.trim()));
    match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some(Ok(a)), Some(Ok(b)), Some(Ok(c)), None) => Some([a, b, c]),
        _ => None,
    }
}

fn parse_complex(s: &str) -> Option<Complex<f64>> {
    match parse_pair(s, ',') {
        Some((re, im)) => Some(Complex { re, im }),
        None => None,
    }
}

fn validate_pair<T: FromStr>(s: &str, separator: char, err: &str) -> Result<(), String> {
    match parse_pair::<T>(s, separator) {
        Some(_) => Ok(()),
        None => Err(err.to_string()),
    }
}

fn validate_triple<T: FromStr>(s: &str, err: &str) -> Result<(), String> {
    match parse_triple::<T>(s) {
        Some(_) => Ok(()),
        None => Err(err.to_string()),
    }
}

fn validate_parse<T>(s: &str) -> Result<(), String>
where
    T: FromStr,
    T::Err: ToString,
{
    T::from_str(s).map(|_| ()).map_err(|e| e.to_string())
}

fn validate_range<T: FromStr + Ord>(
    s: &str,
    low: T,
    high: T,
    isnotanumber_err: &str,
    isnotinrange_err: &str,
) -> Result<(), String> {
    match T::from_str(s) {
        Ok(i) => {
            if i >= low && i <= high {
                Ok(())
            } else {
                Err(isnotinrange_err.to_string())
            }
        }
        Err(_) => Err(isnotanumber_err.to_string()),
    }
}

const OUTPUT: &str = "output";
const SIZE: &str = "size";
const LEFTLOWER: &str = "leftlower";
const RIGHTUPPER: &str = "rightupper";
const FRACTAL: &str = "fractal";
const JULIA: &str = "julia";
const BAILOUT: &str = "bailout";
const THREADS: &str = "threads";
const COLORING: &str = "coloring";
const RGB_BASE: &str = "rgb-base";
const RGB_FREQ: &str = "rgb-freq";
const RGB_PHASE: &str = "rgb-phase";
const RGB_AMP: &str = "rgb-amp";
const SET_COLOR: &str = "set-color";
const FORMAT: &str = "format";
const ZOOM: &str = "zoom";
const XCOORD: &str = "xcoord";
const YCOORD: &str = "ycoord";
const PRINT: &str = "print";
const QUIET: &str = "quiet";

fn args<'a>() -> ArgMatches<'a> {
    let max_threads = num_cpus::get();

    App::new("fractalcrunch")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Elf M. Sternberg <elf.sternberg@gmail.com>")
        .about("Escape-time fractal generator")
        .arg(
            Arg::with_name(OUTPUT)
                .long(OUTPUT)
                .short("o")
                .takes_value(true)
                .default_value("fractal_%f_%wx%h_b%b")
                .help("Output file name pattern (%f %b %w %h %z %c %x %y %Zr %ZR %Zi %ZI)"),
        )
        .arg(
            Arg::with_name(SIZE)
                .long(SIZE)
                .short("s")
                .takes_value(true)
                .default_value("1000x1000")
                .validator(|s| validate_pair::<u16>(&s, 'x', "Could not parse output image size"))
                .help("Size of output image"),
        )
        .arg(
            Arg::with_name(LEFTLOWER)
                .long(LEFTLOWER)
                .short("l")
                .takes_value(true)
                .allow_hyphen_values(true)
                .default_value("-2.5,-1.5")
                .validator(|s| validate_pair::<f64>(&s, ',', "Could not parse left lower corner"))
                .help("Left lower corner of the complex plane"),
        )
        .arg(
            Arg::with_name(RIGHTUPPER)
                .long(RIGHTUPPER)
                .short("r")
                .takes_value(true)
                .allow_hyphen_values(true)
                .default_value("1.0,1.5")
                .validator(|s| validate_pair::<f64>(&s, ',', "Could not parse right upper corner"))
                .help("Right upper corner of the complex plane"),
        )
        .arg(
            Arg::with_name(FRACTAL)
                .long(FRACTAL)
                .short("f")
                .takes_value(true)
                .default_value("mandelbrot")
                .validator(|s| validate_parse::<FractalKind>(&s))
                .help("mandelbrot, tricorn, julia or burningship"),
        )
        .arg(
            Arg::with_name(JULIA)
                .long(JULIA)
                .short("j")
                .takes_value(true)
                .allow_hyphen_values(true)
                .default_value("-0.7,0.27015")
                .validator(|s| validate_pair::<f64>(&s, ',', "Could not parse julia constant"))
                .help("Julia set constant"),
        )
        .arg(
            Arg::with_name(BAILOUT)
                .long(BAILOUT)
                .short("b")
                .takes_value(true)
                .default_value("1000")
                .validator(|s| {
                    validate_range(
                        &s,
                        1,
                        u32::max_value(),
                        "Could not parse bailout",
                        "Bailout must be at least 1",
                    )
                })
                .help("Maximum number of iterations per point"),
        )
        .arg(
            Arg::with_name(THREADS)
                .long(THREADS)
                .short("t")
                .takes_value(true)
                .validator(move |s| {
                    validate_range(
                        &s,
                        1,
                        max_threads,
                        "Could not parse thread count",
                        &format!("Thread count must be between 1 and {}", max_threads),
                    )
                })
                .help("Number of threads to use in solver (default: one per core)"),
        )
        .arg(
            Arg::with_name(COLORING)
                .long(COLORING)
                .short("c")
                .takes_value(true)
                .default_value("linear")
                .validator(|s| validate_parse::<ColorAlgo>(&s))
                .help("linear, sine or bernstein"),
        )
        .arg(
            Arg::with_name(RGB_BASE)
                .long(RGB_BASE)
                .takes_value(true)
                .default_value("127,127,127")
                .validator(|s| validate_triple::<u8>(&s, "Could not parse base color"))
                .help("Base color as r,g,b"),
        )
        .arg(
            Arg::with_name(RGB_FREQ)
                .long(RGB_FREQ)
                .takes_value(true)
                .default_value("0.1,0.1,0.1")
                .validator(|s| validate_triple::<f64>(&s, "Could not parse frequencies"))
                .help("Per channel frequency as r,g,b; negative values are made positive"),
        )
        .arg(
            Arg::with_name(RGB_PHASE)
                .long(RGB_PHASE)
                .takes_value(true)
                .allow_hyphen_values(true)
                .default_value("0,2,4")
                .validator(|s| validate_triple::<f64>(&s, "Could not parse phases"))
                .help("Per channel phase for sine coloring as r,g,b"),
        )
        .arg(
            Arg::with_name(RGB_AMP)
                .long(RGB_AMP)
                .takes_value(true)
                .default_value("128,128,128")
                .validator(|s| validate_triple::<f64>(&s, "Could not parse amplitudes"))
                .help("Per channel amplitude for Bernstein coloring as r,g,b"),
        )
        .arg(
            Arg::with_name(SET_COLOR)
                .long(SET_COLOR)
                .takes_value(true)
                .default_value("0,0,0")
                .validator(|s| validate_triple::<u8>(&s, "Could not parse set color"))
                .help("Color of points inside the set as r,g,b"),
        )
        .arg(
            Arg::with_name(FORMAT)
                .long(FORMAT)
                .takes_value(true)
                .multiple(true)
                .use_delimiter(true)
                .validator(|s| validate_parse::<OutputFormat>(&s))
                .help("Outputs to write: pnm-bw, pnm-grey, pnm-col, png, jpg, csv"),
        )
        .arg(
            Arg::with_name(ZOOM)
                .long(ZOOM)
                .takes_value(true)
                .requires_all(&[XCOORD, YCOORD])
                .validator(|s| validate_parse::<f64>(&s))
                .help("Zoom factor; use together with --xcoord and --ycoord"),
        )
        .arg(
            Arg::with_name(XCOORD)
                .long(XCOORD)
                .takes_value(true)
                .requires(ZOOM)
                .validator(|s| validate_parse::<f64>(&s))
                .help("Image x coordinate to zoom into"),
        )
        .arg(
            Arg::with_name(YCOORD)
                .long(YCOORD)
                .takes_value(true)
                .requires(ZOOM)
                .validator(|s| validate_parse::<f64>(&s))
                .help("Image y coordinate to zoom into"),
        )
        .arg(
            Arg::with_name(PRINT)
                .long(PRINT)
                .short("p")
                .help("Print the buffer to the terminal"),
        )
        .arg(
            Arg::with_name(QUIET)
                .long(QUIET)
                .short("q")
                .help("Only log warnings and errors"),
        )
        .get_matches()
}

// Every value read here has a default or has passed its validator.
fn value<T: FromStr>(matches: &ArgMatches, name: &str) -> Result<T, Error> {
    matches
        .value_of(name)
        .and_then(|s| T::from_str(s).ok())
        .ok_or_else(|| failure::format_err!("Could not parse --{}", name))
}

fn pair<T: FromStr>(matches: &ArgMatches, name: &str, separator: char) -> Result<(T, T), Error> {
    matches
        .value_of(name)
        .and_then(|s| parse_pair(s, separator))
        .ok_or_else(|| failure::format_err!("Could not parse --{}", name))
}

fn triple<T: FromStr>(matches: &ArgMatches, name: &str) -> Result<[T; 3], Error> {
    matches
        .value_of(name)
        .and_then(parse_triple)
        .ok_or_else(|| failure::format_err!("Could not parse --{}", name))
}

fn threads(matches: &ArgMatches) -> Result<usize, Error> {
    if matches.is_present(THREADS) {
        value(matches, THREADS)
    } else {
        Ok(num_cpus::get())
    }
}

fn palette(matches: &ArgMatches) -> Result<Palette, Error> {
    let base: [u8; 3] = triple(matches, RGB_BASE)?;
    let set: [u8; 3] = triple(matches, SET_COLOR)?;
    let freq: [f64; 3] = triple(matches, RGB_FREQ)?;
    Ok(Palette {
        base: Rgb(base[0], base[1], base[2]),
        set_color: Rgb(set[0], set[1], set[2]),
        freq: [freq[0].abs(), freq[1].abs(), freq[2].abs()],
        phase: triple(matches, RGB_PHASE)?,
        amplitude: triple(matches, RGB_AMP)?,
    })
}

fn run(matches: &ArgMatches) -> Result<(), Error> {
    let (width, height): (u16, u16) = pair(matches, SIZE, 'x')?;
    let (width, height) = (usize::from(width), usize::from(height));
    let leftlower = matches
        .value_of(LEFTLOWER)
        .and_then(parse_complex)
        .ok_or_else(|| failure::format_err!("Could not parse --{}", LEFTLOWER))?;
    let rightupper = matches
        .value_of(RIGHTUPPER)
        .and_then(parse_complex)
        .ok_or_else(|| failure::format_err!("Could not parse --{}", RIGHTUPPER))?;
    let julia = matches
        .value_of(JULIA)
        .and_then(parse_complex)
        .ok_or_else(|| failure::format_err!("Could not parse --{}", JULIA))?;

    let mut plane = PlaneMapper::new(width, height, leftlower, rightupper)?;

    let mut zoom = 0.0;
    let mut focus = (0.0, 0.0);
    if matches.is_present(ZOOM) {
        zoom = normalize_zoom(value(matches, ZOOM)?)?;
        focus = (value(matches, XCOORD)?, value(matches, YCOORD)?);
        let bounds = remap(plane.complex_plane, zoom, focus, IntegralPlane(width, height));
        plane = PlaneMapper::from_plane(plane.integral_plane, bounds)?;
        info!("Zoomed {}x into pixel ({}, {})", zoom, focus.0, focus.1);
    }

    let kind: FractalKind = value(matches, FRACTAL)?;
    let col_algo: ColorAlgo = value(matches, COLORING)?;
    let params = FractalParameters::new(kind, plane, value(matches, BAILOUT)?)?
        .with_julia(julia)
        .with_coloring(col_algo, palette(matches)?)
        .with_threads(threads(matches)?)?;
    info!("{}", params);

    let mut buffer = FractalBuffer::new(width, height);
    fill_buffer(&params, &mut buffer)?;

    if matches.is_present(PRINT) {
        println!("{}", output::ascii(&buffer, params.bailout));
    }

    let formats = match matches.values_of(FORMAT) {
        Some(values) => values
            .map(OutputFormat::from_str)
            .collect::<Result<Vec<_>, _>>()?,
        None => vec![],
    };
    if formats.is_empty() && !matches.is_present(PRINT) {
        warn!("No output format given, nothing written");
    }

    let pattern = matches.value_of(OUTPUT).unwrap_or("fractal");
    let ctx = FilenameContext {
        zoom,
        xcoord: focus.0,
        ycoord: focus.1,
        ..FilenameContext::from_params(&params)
    };
    let base = output::filename_from_pattern(pattern, &ctx);
    for format in formats {
        output::write_buffer(&buffer, &params, format, &base)?;
    }
    Ok(())
}

fn main() {
    let matches = args();
    let level = if matches.is_present(QUIET) { "warn" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(level)).init();

    if let Err(e) = run(&matches) {
        eprintln!("Render failure: {}", e);
        process::exit(1);
    }
}
