// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The per-pixel record and the row-major buffer that holds one for
//! every pixel of the image.

use std::fmt;
use std::slice::{Chunks, ChunksMut};

/// What the cruncher learned about a single pixel.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Iterations {
    /// The raw escape time.  Equal to the bailout when the point never
    /// escaped, i.e. it is considered part of the set.
    pub default_index: u32,
    /// Fractional escape time for smooth coloring.  Left at zero unless
    /// the coloring algorithm asks for it.
    pub continuous_index: f64,
}

impl Iterations {
    /// A record carrying only the raw escape time.
    pub fn new(default_index: u32) -> Self {
        Iterations {
            default_index,
            continuous_index: 0.0,
        }
    }

    /// A record carrying both the raw and the smoothed escape time.
    pub fn with_continuous(default_index: u32, continuous_index: f64) -> Self {
        Iterations {
            default_index,
            continuous_index,
        }
    }

    /// True when the point never escaped.
    pub fn is_inside(&self, bailout: u32) -> bool {
        self.default_index == bailout
    }
}

impl fmt::Display for Iterations {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.default_index, self.continuous_index)
    }
}

/// A `height` by `width` grid of `Iterations`, stored row-major in a
/// single allocation so that rows can be handed out as disjoint
/// mutable slices.
#[derive(Clone, Debug, PartialEq)]
pub struct FractalBuffer {
    width: usize,
    height: usize,
    cells: Vec<Iterations>,
}

impl FractalBuffer {
    /// Allocates a zeroed buffer.
    pub fn new(width: usize, height: usize) -> Self {
        FractalBuffer {
            width,
            height,
            cells: vec![Iterations::default(); width * height],
        }
    }

    /// Columns per row.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// True if either dimension is zero.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// The record at `column`, `row`, if it lies inside the grid.
    pub fn get(&self, column: usize, row: usize) -> Option<&Iterations> {
        if column >= self.width || row >= self.height {
            return None;
        }
        self.cells.get(row * self.width + column)
    }

    /// Rows, top to bottom.
    pub fn rows(&self) -> Chunks<'_, Iterations> {
        self.cells.chunks(self.width.max(1))
    }

    /// Mutable rows, top to bottom.  Each slice is exactly `width` long
    /// and no two overlap.
    pub fn rows_mut(&mut self) -> ChunksMut<'_, Iterations> {
        self.cells.chunks_mut(self.width.max(1))
    }

    /// All records in row-major order.
    pub fn as_slice(&self) -> &[Iterations] {
        &self.cells
    }
}
