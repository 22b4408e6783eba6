// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Error types.  Configuration problems are caught when the
//! parameters are built; once a fill pass starts, the only thing that
//! can go wrong is a worker thread dying.

use failure::Fail;
use std::io;

/// Rejections raised while building fractal parameters.
#[derive(Debug, Fail, PartialEq)]
pub enum ConfigError {
    /// The left lower corner is not to the left of, or not below, the
    /// right upper corner.
    #[fail(
        display = "The left lower corner ({}, {}) must be left of and below the right upper corner ({}, {})",
        xl, yl, xh, yh
    )]
    BadShape {
        /// Real part of the left lower corner.
        xl: f64,
        /// Real part of the right upper corner.
        xh: f64,
        /// Imaginary part of the left lower corner.
        yl: f64,
        /// Imaginary part of the right upper corner.
        yh: f64,
    },

    /// One of the corners is NaN or infinite.
    #[fail(display = "The complex plane bounds must be finite")]
    NonFiniteBounds,

    /// Width or height is zero.
    #[fail(display = "Image size {}x{} is empty", _0, _1)]
    EmptyImage(usize, usize),

    /// A bailout of zero would never iterate.
    #[fail(display = "Bailout must be greater than zero")]
    ZeroBailout,

    /// The worker pool needs at least one worker.
    #[fail(display = "Thread count must be at least one")]
    ZeroThreads,

    /// Zoom factors must be positive and finite.
    #[fail(display = "Invalid zoom factor {}", _0)]
    InvalidZoom(f64),

    /// Unknown fractal name.
    #[fail(display = "Unknown fractal type '{}'", _0)]
    UnknownFractal(String),

    /// Unknown coloring algorithm name.
    #[fail(display = "Unknown coloring algorithm '{}'", _0)]
    UnknownColoring(String),

    /// Unknown output format name.
    #[fail(display = "Unknown output format '{}'", _0)]
    UnknownFormat(String),
}

/// Failures of a fill pass.
#[derive(Debug, Fail, PartialEq)]
pub enum CrunchError {
    /// The buffer handed to the filler does not match the resolution.
    #[fail(
        display = "Buffer is {}x{} but the parameters ask for {}x{}",
        _0, _1, _2, _3
    )]
    BufferMismatch(usize, usize, usize, usize),

    /// A row worker panicked; the buffer is only partially filled.
    #[fail(display = "A row worker panicked during the fill")]
    WorkerPanicked,
}

/// Failures while writing a buffer out.
#[derive(Debug, Fail)]
pub enum OutputError {
    /// Plain I/O failure.
    #[fail(display = "Could not write {}: {}", _0, _1)]
    Io(String, #[cause] io::Error),

    /// The image encoder refused the data.
    #[fail(display = "Could not encode {}: {}", _0, _1)]
    Encode(String, String),
}
