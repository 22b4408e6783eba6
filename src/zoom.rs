// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Zooming into an image.  Takes a pixel of the current image and a
//! magnification and returns the complex plane bounds of the next
//! image, centred on that pixel.

use crate::error::ConfigError;
use crate::planes::{ComplexPlane, IntegralPlane};

/// Checks a user supplied zoom factor.  Zero means "no zoom" and
/// becomes one; anything else has to be positive and finite.
pub fn normalize_zoom(zoom: f64) -> Result<f64, ConfigError> {
    if zoom == 0.0 {
        return Ok(1.0);
    }
    if !zoom.is_finite() || zoom < 0.0 {
        return Err(ConfigError::InvalidZoom(zoom));
    }
    Ok(zoom)
}

/// New bounds after magnifying `bounds` by `zoom` around the pixel
/// `focus` of an image of size `resolution`.
///
/// The pixel is mapped onto the current plane, the per-pixel step is
/// divided by `zoom`, and the new plane is laid out around the mapped
/// point with the same resolution.  `zoom` is not checked here; pass
/// it through `normalize_zoom` first.
pub fn remap(bounds: ComplexPlane, zoom: f64, focus: (f64, f64), resolution: IntegralPlane) -> ComplexPlane {
    let (xl, xh, yl, yh) = bounds.bounds();
    let (width, height) = (resolution.0 as f64, resolution.1 as f64);

    let xdelta = (xh - xl) / width;
    let ydelta = (yh - yl) / height;

    let xcenter = xl + focus.0 * xdelta;
    let ycenter = yl + focus.1 * ydelta;

    let xdelta_zoom = xdelta / zoom;
    let ydelta_zoom = ydelta / zoom;

    ComplexPlane::from_bounds(
        xcenter - (width / 2.0) * xdelta_zoom,
        xcenter + (width / 2.0) * xdelta_zoom,
        ycenter - (height / 2.0) * ydelta_zoom,
        ycenter + (height / 2.0) * ydelta_zoom,
    )
}
