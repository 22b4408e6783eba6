// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Escape-time iteration for the supported fractal families.
//!
//! Every family iterates `z -> f(z) + c` starting from a point of the
//! complex plane and counts how many steps it takes for `|z|` to
//! exceed 2.  The families differ only in `f` and in where `c` comes
//! from:
//!
//! * Mandelbrot: `f(z) = z²`, `c` is the starting point.
//! * Tricorn: `f(z) = conj(z)²`, `c` is the starting point.
//! * Burning Ship: `f(z) = (|re z| + i|im z|)²`, `c` is the starting
//!   point.
//! * Julia: `f(z) = z²`, `c` is a fixed constant for the whole image.

use num::Complex;
use std::f64::consts::LN_2;
use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

const ESCAPE_RADIUS_SQR: f64 = 4.0;

/// The fractal families.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FractalKind {
    /// The Mandelbrot set.
    Mandelbrot,
    /// The Mandelbar, iterating the complex conjugate.
    Tricorn,
    /// A Julia set for a fixed constant.
    Julia,
    /// The Burning Ship.
    BurningShip,
}

/// Where an orbit ended up.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Escape {
    /// Steps taken.  Equals the bailout if the orbit never left the
    /// escape radius.
    pub iterations: u32,
    /// The last value of `z`.
    pub z: Complex<f64>,
}

/// An escape-time function for one fractal family.  Takes the sampled
/// point, the Julia constant (ignored by every family but Julia) and
/// the bailout.
pub type Evaluator = fn(Complex<f64>, Complex<f64>, u32) -> Escape;

impl FractalKind {
    /// All families, in command line order.
    pub const ALL: [FractalKind; 4] = [
        FractalKind::Mandelbrot,
        FractalKind::Tricorn,
        FractalKind::Julia,
        FractalKind::BurningShip,
    ];

    /// Resolves the family to its iteration function.  Done once per
    /// fill so the pixel loop never branches on the family.
    pub fn evaluator(self) -> Evaluator {
        match self {
            FractalKind::Mandelbrot => mandelbrot,
            FractalKind::Tricorn => tricorn,
            FractalKind::Julia => julia,
            FractalKind::BurningShip => burning_ship,
        }
    }

    /// The name used on the command line and in file names.
    pub fn name(self) -> &'static str {
        match self {
            FractalKind::Mandelbrot => "mandelbrot",
            FractalKind::Tricorn => "tricorn",
            FractalKind::Julia => "julia",
            FractalKind::BurningShip => "burningship",
        }
    }
}

impl fmt::Display for FractalKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FractalKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace(|c: char| c == '-' || c == '_', "");
        FractalKind::ALL
            .iter()
            .find(|kind| kind.name() == wanted)
            .cloned()
            .ok_or_else(|| ConfigError::UnknownFractal(s.to_string()))
    }
}

/// The shared iteration loop.  `step` maps `(x, y, c)` to the next
/// `z`; everything else is the same for every family.
#[inline(always)]
fn escape<F>(start: Complex<f64>, c: Complex<f64>, bailout: u32, step: F) -> Escape
where
    F: Fn(f64, f64, Complex<f64>) -> (f64, f64),
{
    let (mut x, mut y) = (start.re, start.im);
    let mut iterations = 0;
    while x * x + y * y <= ESCAPE_RADIUS_SQR && iterations < bailout {
        let (nx, ny) = step(x, y, c);
        x = nx;
        y = ny;
        iterations += 1;
    }
    Escape {
        iterations,
        z: Complex::new(x, y),
    }
}

#[inline(always)]
fn square(x: f64, y: f64, c: Complex<f64>) -> (f64, f64) {
    (x * x - y * y + c.re, 2.0 * x * y + c.im)
}

/// Mandelbrot escape time of `point`.
pub fn mandelbrot(point: Complex<f64>, _julia: Complex<f64>, bailout: u32) -> Escape {
    escape(point, point, bailout, square)
}

/// Tricorn escape time of `point`.
pub fn tricorn(point: Complex<f64>, _julia: Complex<f64>, bailout: u32) -> Escape {
    escape(point, point, bailout, |x, y, c| {
        (x * x - y * y + c.re, -2.0 * x * y + c.im)
    })
}

/// Julia escape time of `point` for the constant `julia`.
pub fn julia(point: Complex<f64>, julia: Complex<f64>, bailout: u32) -> Escape {
    escape(point, julia, bailout, square)
}

/// Burning Ship escape time of `point`.
pub fn burning_ship(point: Complex<f64>, _julia: Complex<f64>, bailout: u32) -> Escape {
    escape(point, point, bailout, |x, y, c| square(x.abs(), y.abs(), c))
}

/// Escape time of `point` for any family.  Convenient for one-off
/// evaluations; fills should resolve `FractalKind::evaluator` once
/// instead.
pub fn evaluate(point: Complex<f64>, kind: FractalKind, bailout: u32, julia: Complex<f64>) -> Escape {
    (kind.evaluator())(point, julia, bailout)
}

/// Turns an integer escape time and the final `z` into a fractional
/// "continuous index" that removes the banding of plain escape-time
/// coloring.  `|z|` is floored at `f64::EPSILON`, which keeps the
/// result finite for orbits that stop exactly on the origin.
pub fn smooth(iterations: u32, z: Complex<f64>) -> f64 {
    let modulus = z.norm_sqr().sqrt().max(std::f64::EPSILON);
    f64::from(iterations) + 1.0 - (LN_2 / modulus) / LN_2
}
