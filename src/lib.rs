#![deny(missing_docs)]
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Escape-time fractal generator
//!
//! Take a point on the complex plane, square it, add a constant, and
//! repeat.  Some points fly off to infinity, some never leave the
//! neighbourhood of the origin.  Counting how many steps a point
//! survives before its distance from the origin exceeds 2 gives its
//! "escape time", and coloring every pixel of an image by the escape
//! time of the point under it draws the fractal.
//!
//! This crate computes escape times for the Mandelbrot set, the
//! Tricorn, Julia sets and the Burning Ship, fills an image-sized
//! buffer with them (on one thread or on a pool of workers, one row
//! at a time), colors them with one of three palettes, and writes the
//! result out.  `zoom::remap` turns a click on an image into the
//! bounds of a magnified image around it.
//!
//! ```
//! use fractalcrunch::{fill_buffer, FractalBuffer, FractalKind, FractalParameters, PlaneMapper};
//! use num::Complex;
//!
//! let plane = PlaneMapper::new(10, 10, Complex::new(-2.5, -1.5), Complex::new(1.0, 1.5)).unwrap();
//! let params = FractalParameters::new(FractalKind::Mandelbrot, plane, 10).unwrap();
//! let mut buffer = FractalBuffer::new(10, 10);
//! fill_buffer(&params, &mut buffer).unwrap();
//! assert_eq!(buffer.get(6, 5).unwrap().default_index, 10);
//! ```

pub mod coloring;
pub mod cruncher;
pub mod error;
pub mod fractal;
pub mod iterations;
pub mod output;
pub mod params;
pub mod planes;
pub mod zoom;

pub use crate::coloring::{colorize, ColorAlgo, Palette, Rgb};
pub use crate::cruncher::{fill_buffer, fill_buffer_multi, fill_buffer_single};
pub use crate::error::{ConfigError, CrunchError, OutputError};
pub use crate::fractal::{evaluate, smooth, Escape, FractalKind};
pub use crate::iterations::{FractalBuffer, Iterations};
pub use crate::params::FractalParameters;
pub use crate::planes::{ComplexPlane, IntegralPlane, Pixel, PlaneMapper};
pub use crate::zoom::{normalize_zoom, remap};
