// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Maps iteration records to colors.
//!
//! Three algorithms are available.  Plain escape-time coloring cycles
//! through a band of colors as the escape time grows and is the
//! cheapest, but shows visible bands.  Continuous sine coloring runs
//! the smoothed escape time through three out-of-phase sine waves.
//! Bernstein coloring blends the normalised escape time through cubic
//! Bernstein polynomials, which gives a smooth gradient that does not
//! repeat.
//!
//! None of these hold state.  Everything they need comes in through a
//! `Palette`, which callers pass explicitly with every call.

use num::clamp;
use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;
use crate::iterations::Iterations;

/// An 8 bit per channel color.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Black, the default color of points inside the set.
    pub const BLACK: Rgb = Rgb(0, 0, 0);

    /// The channels as an array, red first.
    pub fn channels(self) -> [u8; 3] {
        [self.0, self.1, self.2]
    }

    fn from_channels(c: [u8; 3]) -> Rgb {
        Rgb(c[0], c[1], c[2])
    }
}

/// Selects how iteration records become colors.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ColorAlgo {
    /// Escape time mapped linearly onto a band of colors.
    EscapeTimeLinear,
    /// Continuous index run through sine waves.
    ContinuousSine,
    /// Escape time ratio blended through Bernstein polynomials.
    ContinuousBernstein,
}

impl ColorAlgo {
    /// All algorithms, in command line order.
    pub const ALL: [ColorAlgo; 3] = [
        ColorAlgo::EscapeTimeLinear,
        ColorAlgo::ContinuousSine,
        ColorAlgo::ContinuousBernstein,
    ];

    /// Only the sine algorithm reads the continuous index, so the
    /// cruncher skips computing it otherwise.
    pub fn needs_continuous_index(self) -> bool {
        self == ColorAlgo::ContinuousSine
    }

    /// The name used on the command line.
    pub fn name(self) -> &'static str {
        match self {
            ColorAlgo::EscapeTimeLinear => "linear",
            ColorAlgo::ContinuousSine => "sine",
            ColorAlgo::ContinuousBernstein => "bernstein",
        }
    }
}

impl fmt::Display for ColorAlgo {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ColorAlgo {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        ColorAlgo::ALL
            .iter()
            .find(|algo| algo.name() == wanted)
            .cloned()
            .ok_or_else(|| ConfigError::UnknownColoring(s.to_string()))
    }
}

/// Parameters shared by the coloring algorithms.  What each triple
/// means depends on the algorithm; each function documents which ones
/// it reads.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Palette {
    /// Lowest value of each channel.
    pub base: Rgb,
    /// Color of points inside the set.
    pub set_color: Rgb,
    /// How fast each channel changes with the escape time.  A channel
    /// with a frequency of zero stays at its base value.
    pub freq: [f64; 3],
    /// Phase offset of each channel's sine wave.
    pub phase: [f64; 3],
    /// Peak height of each channel's Bernstein curve.
    pub amplitude: [f64; 3],
}

impl Default for Palette {
    fn default() -> Self {
        Palette {
            base: Rgb(127, 127, 127),
            set_color: Rgb::BLACK,
            freq: [0.1, 0.1, 0.1],
            phase: [0.0, 2.0, 4.0],
            amplitude: [128.0, 128.0, 128.0],
        }
    }
}

/// Escape-time coloring.  Reads `base` and `freq`.
///
/// Each channel with a positive frequency walks from its base value
/// towards 255 as the escape time grows, wrapping back to the base
/// when it gets there.
pub fn rgb_linear(its: u32, palette: &Palette) -> Rgb {
    let mut rgb = palette.base.channels();
    for (channel, freq) in rgb.iter_mut().zip(palette.freq.iter()) {
        let base = i64::from(*channel);
        let span = 255 - base;
        if *freq > 0.0 && span > 0 {
            let step = (freq * f64::from(its)) as i64;
            *channel = (base + step % span) as u8;
        }
    }
    Rgb::from_channels(rgb)
}

/// Continuous sine coloring.  Reads `base`, `freq` and `phase`.
///
/// Based on Jim Bumgardner's sine wave color cycling:
/// `|sin(freq * index + phase)|` scaled into `base..255`.
pub fn rgb_continuous_sine(continuous_index: f64, palette: &Palette) -> Rgb {
    let mut rgb = palette.base.channels();
    for (i, channel) in rgb.iter_mut().enumerate() {
        let freq = palette.freq[i];
        if freq > 0.0 {
            let base = f64::from(*channel);
            let wave = (freq * continuous_index + palette.phase[i]).sin().abs();
            *channel = clamp((wave * (255.0 - base) + base).floor(), 0.0, 255.0) as u8;
        }
    }
    Rgb::from_channels(rgb)
}

/// Bernstein polynomial coloring.  Reads `base` and `amplitude`.
///
/// With `t = its / bailout`, red follows `9(1-t)t³`, green
/// `15(1-t)²t²` and blue `8.5(1-t)³t`.  Each curve is scaled by the
/// channel's amplitude and lifted by its base.  Channels saturate at
/// 255.
pub fn rgb_continuous_bernstein(its: u32, bailout: u32, palette: &Palette) -> Rgb {
    let t = f64::from(its) / f64::from(bailout.max(1));
    let u = 1.0 - t;
    let curves = [
        9.0 * u * t * t * t,
        15.0 * u * u * t * t,
        8.5 * u * u * u * t,
    ];

    let mut rgb = palette.base.channels();
    for (i, channel) in rgb.iter_mut().enumerate() {
        let value = f64::from(*channel) + palette.amplitude[i] * curves[i];
        *channel = clamp(value, 0.0, 255.0) as u8;
    }
    Rgb::from_channels(rgb)
}

/// Color of a single record.  Points inside the set always get the
/// palette's set color; everything else goes through `algo`.
pub fn colorize(record: &Iterations, bailout: u32, algo: ColorAlgo, palette: &Palette) -> Rgb {
    if record.is_inside(bailout) {
        return palette.set_color;
    }
    match algo {
        ColorAlgo::EscapeTimeLinear => rgb_linear(record.default_index, palette),
        ColorAlgo::ContinuousSine => rgb_continuous_sine(record.continuous_index, palette),
        ColorAlgo::ContinuousBernstein => {
            rgb_continuous_bernstein(record.default_index, bailout, palette)
        }
    }
}

/// Grey value of a single record: the red channel of `colorize`.
pub fn grey(record: &Iterations, bailout: u32, algo: ColorAlgo, palette: &Palette) -> u8 {
    colorize(record, bailout, algo, palette).0
}
