// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Contains the PlaneMapper struct, which describes a relationship
//! between a rectangle on the integral plane with an origin at 0,0,
//! and a rectangle on the complex plane with an arbitrary pair of
//! corners defining the leftlower and rightupper corners.
use num::Complex;

use crate::error::ConfigError;

/// Width and height of the integral plane.  The plane starts at 0,0
/// and every coordinate is a non-negative integer.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct IntegralPlane(pub usize, pub usize);

/// The lower-left corner and upper-right corner of the complex plane,
/// treating the real part of each value as the x-component and the
/// imaginary part as the y-component.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ComplexPlane(pub Complex<f64>, pub Complex<f64>);

impl ComplexPlane {
    /// Builds the plane from `(xl, xh, yl, yh)` bounds.
    pub fn from_bounds(xl: f64, xh: f64, yl: f64, yh: f64) -> Self {
        ComplexPlane(Complex::new(xl, yl), Complex::new(xh, yh))
    }

    /// The bounds as `(xl, xh, yl, yh)`.
    pub fn bounds(&self) -> (f64, f64, f64, f64) {
        (self.0.re, self.1.re, self.0.im, self.1.im)
    }
}

/// Column and row of a pixel.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Pixel(pub usize, pub usize);

/// Maps pixels of an integral plane onto points of a complex plane.
/// The step between two neighbouring pixels is fixed at construction.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PlaneMapper {
    /// The right-upper corner of the integral plane; the left-lower is
    /// at 0,0.
    pub integral_plane: IntegralPlane,
    /// Left-lower and right-upper corners of the complex plane.
    pub complex_plane: ComplexPlane,
    // Complex distance covered by one pixel, real then imaginary.
    deltas: (f64, f64),
}

impl PlaneMapper {
    /// Takes the image size and the two corners of the complex plane.
    /// Fails unless the plane has a positive, finite extent in both
    /// directions and the image has at least one pixel.
    pub fn new(
        width: usize,
        height: usize,
        leftlower: Complex<f64>,
        rightupper: Complex<f64>,
    ) -> Result<PlaneMapper, ConfigError> {
        let corners = [leftlower.re, leftlower.im, rightupper.re, rightupper.im];
        if corners.iter().any(|c| !c.is_finite()) {
            return Err(ConfigError::NonFiniteBounds);
        }

        if rightupper.re <= leftlower.re || rightupper.im <= leftlower.im {
            return Err(ConfigError::BadShape {
                xl: leftlower.re,
                xh: rightupper.re,
                yl: leftlower.im,
                yh: rightupper.im,
            });
        }

        if width == 0 || height == 0 {
            return Err(ConfigError::EmptyImage(width, height));
        }

        let deltas = (
            (rightupper.re - leftlower.re) / (width as f64),
            (rightupper.im - leftlower.im) / (height as f64),
        );

        Ok(PlaneMapper {
            integral_plane: IntegralPlane(width, height),
            complex_plane: ComplexPlane(leftlower, rightupper),
            deltas,
        })
    }

    /// Same as `new`, taking the complex plane as a whole.
    pub fn from_plane(plane: IntegralPlane, bounds: ComplexPlane) -> Result<PlaneMapper, ConfigError> {
        PlaneMapper::new(plane.0, plane.1, bounds.0, bounds.1)
    }

    /// Image width in pixels.
    pub fn width(&self) -> usize {
        self.integral_plane.0
    }

    /// Image height in pixels.
    pub fn height(&self) -> usize {
        self.integral_plane.1
    }

    /// The total number of points in the integral grid.
    pub fn len(&self) -> usize {
        self.integral_plane.0 * self.integral_plane.1
    }

    /// Always false for a mapper built through `new`.
    pub fn is_empty(&self) -> bool {
        self.integral_plane.0 == 0 || self.integral_plane.1 == 0
    }

    /// Real distance between two neighbouring columns.
    pub fn xdelta(&self) -> f64 {
        self.deltas.0
    }

    /// Imaginary distance between two neighbouring rows.
    pub fn ydelta(&self) -> f64 {
        self.deltas.1
    }

    /// Real part of the given column.
    #[inline]
    pub fn column_to_re(&self, column: usize) -> f64 {
        self.complex_plane.0.re + (column as f64) * self.deltas.0
    }

    /// Imaginary part of the given row.
    #[inline]
    pub fn row_to_im(&self, row: usize) -> f64 {
        self.complex_plane.0.im + (row as f64) * self.deltas.1
    }

    /// Given a pixel on the integral plane, return the point it covers
    /// on the complex plane.  Computed directly from the pixel so that
    /// every pixel gets the same value no matter what order they are
    /// visited in.
    pub fn pixel_to_point(&self, pixel: &Pixel) -> Complex<f64> {
        Complex::new(self.column_to_re(pixel.0), self.row_to_im(pixel.1))
    }

    /// Given a point on the complex plane, return the pixel it falls
    /// into.  Points left of or below the plane clamp to zero.
    pub fn point_to_pixel(&self, point: &Complex<f64>) -> Pixel {
        let left = (point.re - self.complex_plane.0.re) / self.deltas.0;
        let top = (point.im - self.complex_plane.0.im) / self.deltas.1;
        Pixel(left.round() as usize, top.round() as usize)
    }
}
