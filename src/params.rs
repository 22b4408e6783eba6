// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Everything a fill pass needs to know, validated up front.  Once
//! built, a `FractalParameters` is only ever read.

use num::Complex;
use std::fmt;

use crate::coloring::{ColorAlgo, Palette};
use crate::error::ConfigError;
use crate::fractal::FractalKind;
use crate::planes::PlaneMapper;

/// Julia constant used when none is given.
pub const DEFAULT_JULIA: Complex<f64> = Complex {
    re: -0.7,
    im: 0.27015,
};

/// The parameters of one fill pass.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FractalParameters {
    /// Which fractal to compute.
    pub kind: FractalKind,
    /// Image size, complex bounds and the step between pixels.
    pub plane: PlaneMapper,
    /// Maximum number of iterations per point.
    pub bailout: u32,
    /// The additive constant of the Julia set.  Ignored by every other
    /// fractal.
    pub julia: Complex<f64>,
    /// How the buffer will be colored.  Decides whether the
    /// continuous index gets computed.
    pub col_algo: ColorAlgo,
    /// Colors handed to the coloring functions by the writers.
    pub palette: Palette,
    /// Size of the worker pool.  One means a sequential fill.
    pub threads: usize,
}

impl FractalParameters {
    /// Parameters for a sequential, escape-time colored fill with the
    /// default palette and Julia constant.
    pub fn new(kind: FractalKind, plane: PlaneMapper, bailout: u32) -> Result<Self, ConfigError> {
        if bailout == 0 {
            return Err(ConfigError::ZeroBailout);
        }
        Ok(FractalParameters {
            kind,
            plane,
            bailout,
            julia: DEFAULT_JULIA,
            col_algo: ColorAlgo::EscapeTimeLinear,
            palette: Palette::default(),
            threads: 1,
        })
    }

    /// Sets the Julia constant.
    pub fn with_julia(mut self, julia: Complex<f64>) -> Self {
        self.julia = julia;
        self
    }

    /// Sets the coloring algorithm and its palette.
    pub fn with_coloring(mut self, col_algo: ColorAlgo, palette: Palette) -> Self {
        self.col_algo = col_algo;
        self.palette = palette;
        self
    }

    /// Sets the worker pool size.
    pub fn with_threads(mut self, threads: usize) -> Result<Self, ConfigError> {
        if threads == 0 {
            return Err(ConfigError::ZeroThreads);
        }
        self.threads = threads;
        Ok(self)
    }

    /// Image width.
    pub fn width(&self) -> usize {
        self.plane.width()
    }

    /// Image height.
    pub fn height(&self) -> usize {
        self.plane.height()
    }
}

impl fmt::Display for FractalParameters {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let (xl, xh, yl, yh) = self.plane.complex_plane.bounds();
        write!(
            f,
            "{} {}x{}, bailout {}, Re [{}, {}], Im [{}, {}], {} coloring, {} thread(s)",
            self.kind,
            self.width(),
            self.height(),
            self.bailout,
            xl,
            xh,
            yl,
            yh,
            self.col_algo,
            self.threads
        )?;
        if self.kind == FractalKind::Julia {
            write!(f, ", c = {}", self.julia)?;
        }
        Ok(())
    }
}
