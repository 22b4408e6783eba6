// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Writes a filled buffer to disk: as a black and white, grey or color
//! PNM bitmap, as PNG or JPEG, or as a pair of CSV files holding the
//! raw and continuous indices.  Also expands the `%` patterns allowed
//! in output file names.

use image::pnm::{PNMEncoder, PNMSubtype, SampleEncoding};
use image::ColorType;
use itertools::Itertools;
use log::info;
use std::convert::TryFrom;
use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::coloring::{colorize, grey};
use crate::error::{ConfigError, OutputError};
use crate::iterations::{FractalBuffer, Iterations};
use crate::params::FractalParameters;
use crate::planes::ComplexPlane;

/// The supported outputs.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// Black for points inside the set, white for the rest.
    PnmBw,
    /// Greyscale PNM.
    PnmGrey,
    /// Color PNM.
    PnmColor,
    /// Color PNG.
    Png,
    /// Color JPEG.
    Jpg,
    /// The raw numbers, as two CSV files.
    Csv,
}

impl OutputFormat {
    /// All formats, in command line order.
    pub const ALL: [OutputFormat; 6] = [
        OutputFormat::PnmBw,
        OutputFormat::PnmGrey,
        OutputFormat::PnmColor,
        OutputFormat::Png,
        OutputFormat::Jpg,
        OutputFormat::Csv,
    ];

    /// The name used on the command line.
    pub fn name(self) -> &'static str {
        match self {
            OutputFormat::PnmBw => "pnm-bw",
            OutputFormat::PnmGrey => "pnm-grey",
            OutputFormat::PnmColor => "pnm-col",
            OutputFormat::Png => "png",
            OutputFormat::Jpg => "jpg",
            OutputFormat::Csv => "csv",
        }
    }

    /// File extension appended to the expanded file name.
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::PnmBw => "bw.pgm",
            OutputFormat::PnmGrey => "pgm",
            OutputFormat::PnmColor => "ppm",
            OutputFormat::Png => "png",
            OutputFormat::Jpg => "jpg",
            OutputFormat::Csv => "csv",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        OutputFormat::ALL
            .iter()
            .find(|format| format.name() == wanted)
            .cloned()
            .ok_or_else(|| ConfigError::UnknownFormat(s.to_string()))
    }
}

/// Values available to file name patterns.
#[derive(Clone, Debug)]
pub struct FilenameContext<'a> {
    /// `%f`
    pub fractal: &'a str,
    /// `%b`
    pub bailout: u32,
    /// `%w`
    pub width: usize,
    /// `%h`
    pub height: usize,
    /// `%z`
    pub zoom: f64,
    /// `%c`
    pub cores: usize,
    /// `%x`
    pub xcoord: f64,
    /// `%y`
    pub ycoord: f64,
    /// `%Zr`, `%ZR`, `%Zi`, `%ZI`
    pub bounds: ComplexPlane,
}

impl FilenameContext<'static> {
    /// A context describing `params`, with no zoom applied.
    pub fn from_params(params: &FractalParameters) -> Self {
        FilenameContext {
            fractal: params.kind.name(),
            bailout: params.bailout,
            width: params.width(),
            height: params.height(),
            zoom: 0.0,
            cores: params.threads,
            xcoord: 0.0,
            ycoord: 0.0,
            bounds: params.plane.complex_plane,
        }
    }
}

/// Expands the `%` patterns of `pattern`.  Unknown patterns are left
/// as they are.  Floats that happen to be integral print without a
/// fractional part.
pub fn filename_from_pattern(pattern: &str, ctx: &FilenameContext) -> String {
    let (xl, xh, yl, yh) = ctx.bounds.bounds();
    let substitutions = [
        ("%Zr", xl.to_string()),
        ("%ZR", xh.to_string()),
        ("%Zi", yl.to_string()),
        ("%ZI", yh.to_string()),
        ("%f", ctx.fractal.to_string()),
        ("%b", ctx.bailout.to_string()),
        ("%w", ctx.width.to_string()),
        ("%h", ctx.height.to_string()),
        ("%z", ctx.zoom.to_string()),
        ("%c", ctx.cores.to_string()),
        ("%x", ctx.xcoord.to_string()),
        ("%y", ctx.ycoord.to_string()),
    ];
    substitutions
        .iter()
        .fold(pattern.to_string(), |name, (from, to)| name.replace(from, to))
}

/// Inside the set is black, outside white.
pub fn bw_pixels(buffer: &FractalBuffer, params: &FractalParameters) -> Vec<u8> {
    buffer
        .as_slice()
        .iter()
        .map(|record| if record.is_inside(params.bailout) { 0 } else { 255 })
        .collect()
}

/// One grey byte per pixel.
pub fn grey_pixels(buffer: &FractalBuffer, params: &FractalParameters) -> Vec<u8> {
    buffer
        .as_slice()
        .iter()
        .map(|record| grey(record, params.bailout, params.col_algo, &params.palette))
        .collect()
}

/// Three bytes per pixel, red first.
pub fn rgb_pixels(buffer: &FractalBuffer, params: &FractalParameters) -> Vec<u8> {
    buffer
        .as_slice()
        .iter()
        .flat_map(|record| {
            colorize(record, params.bailout, params.col_algo, &params.palette)
                .channels()
                .to_vec()
        })
        .collect()
}

/// An ASCII rendering of the buffer: `*` inside the set, `.` outside.
pub fn ascii(buffer: &FractalBuffer, bailout: u32) -> String {
    buffer
        .rows()
        .map(|row| {
            row.iter()
                .map(|record| if record.is_inside(bailout) { '*' } else { '.' })
                .collect::<String>()
        })
        .join("\n")
}

/// The encoders take `u32` dimensions.
fn image_size(path: &Path, bounds: (usize, usize)) -> Result<(u32, u32), OutputError> {
    match (u32::try_from(bounds.0), u32::try_from(bounds.1)) {
        (Ok(width), Ok(height)) => Ok((width, height)),
        _ => Err(OutputError::Encode(
            path.display().to_string(),
            format!("image size {}x{} is too large", bounds.0, bounds.1),
        )),
    }
}

fn write_pnm(path: &Path, pixels: &[u8], subtype: PNMSubtype, color: ColorType, bounds: (usize, usize)) -> Result<(), OutputError> {
    let (width, height) = image_size(path, bounds)?;
    let name = path.display().to_string();
    let output = File::create(path).map_err(|e| OutputError::Io(name.clone(), e))?;
    let mut encoder = PNMEncoder::new(output).with_subtype(subtype);
    encoder
        .encode(pixels, width, height, color)
        .map_err(|e| OutputError::Encode(name, e.to_string()))
}

fn write_rgb_image(path: &Path, pixels: &[u8], bounds: (usize, usize)) -> Result<(), OutputError> {
    let (width, height) = image_size(path, bounds)?;
    image::save_buffer(path, pixels, width, height, ColorType::RGB(8))
        .map_err(|e| OutputError::Encode(path.display().to_string(), e.to_string()))
}

fn write_csv_file<F>(path: &Path, buffer: &FractalBuffer, cell: F) -> Result<(), OutputError>
where
    F: Fn(&Iterations) -> String,
{
    let name = path.display().to_string();
    let file = File::create(path).map_err(|e| OutputError::Io(name.clone(), e))?;
    let mut out = BufWriter::new(file);
    for row in buffer.rows() {
        writeln!(out, "{}", row.iter().map(|record| cell(record)).join(";"))
            .map_err(|e| OutputError::Io(name.clone(), e))?;
    }
    out.flush().map_err(|e| OutputError::Io(name, e))
}

/// Writes the raw indices to `<base>_iterindex.csv` and the
/// continuous indices to `<base>_contindex.csv`.
pub fn write_csv(buffer: &FractalBuffer, base: &str) -> Result<Vec<PathBuf>, OutputError> {
    let iter_path = PathBuf::from(format!("{}_iterindex.csv", base));
    let cont_path = PathBuf::from(format!("{}_contindex.csv", base));
    write_csv_file(&iter_path, buffer, |record| record.default_index.to_string())?;
    write_csv_file(&cont_path, buffer, |record| record.continuous_index.to_string())?;
    Ok(vec![iter_path, cont_path])
}

/// Writes `buffer` in `format` to `base` plus the format's extension
/// (CSV output writes two files derived from `base`).  Returns the
/// paths written.
pub fn write_buffer(
    buffer: &FractalBuffer,
    params: &FractalParameters,
    format: OutputFormat,
    base: &str,
) -> Result<Vec<PathBuf>, OutputError> {
    let bounds = (buffer.width(), buffer.height());
    let path = PathBuf::from(format!("{}.{}", base, format.extension()));
    let written = match format {
        OutputFormat::PnmBw => {
            let pixels = bw_pixels(buffer, params);
            let subtype = PNMSubtype::Graymap(SampleEncoding::Binary);
            write_pnm(&path, &pixels, subtype, ColorType::Gray(8), bounds)?;
            vec![path]
        }
        OutputFormat::PnmGrey => {
            let pixels = grey_pixels(buffer, params);
            let subtype = PNMSubtype::Graymap(SampleEncoding::Binary);
            write_pnm(&path, &pixels, subtype, ColorType::Gray(8), bounds)?;
            vec![path]
        }
        OutputFormat::PnmColor => {
            let pixels = rgb_pixels(buffer, params);
            let subtype = PNMSubtype::Pixmap(SampleEncoding::Binary);
            write_pnm(&path, &pixels, subtype, ColorType::RGB(8), bounds)?;
            vec![path]
        }
        OutputFormat::Png | OutputFormat::Jpg => {
            write_rgb_image(&path, &rgb_pixels(buffer, params), bounds)?;
            vec![path]
        }
        OutputFormat::Csv => write_csv(buffer, base)?,
    };
    for path in &written {
        info!("Wrote {}", path.display());
    }
    Ok(written)
}
