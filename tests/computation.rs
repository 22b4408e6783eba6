// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use fractalcrunch::{
    evaluate, fill_buffer_multi, fill_buffer_single, smooth, ColorAlgo, FractalBuffer,
    FractalKind, FractalParameters, Palette, PlaneMapper,
};
use num::Complex;
use rand::Rng;

fn plane(width: usize, height: usize) -> PlaneMapper {
    PlaneMapper::new(width, height, Complex::new(-2.5, -1.5), Complex::new(1.0, 1.5)).unwrap()
}

fn crunch_sized(
    kind: FractalKind,
    julia: Complex<f64>,
    bailout: u32,
    width: usize,
    height: usize,
) -> Vec<u32> {
    let params = FractalParameters::new(kind, plane(width, height), bailout)
        .unwrap()
        .with_julia(julia);
    let mut buffer = FractalBuffer::new(width, height);
    fill_buffer_single(&params, &mut buffer).unwrap();
    buffer.as_slice().iter().map(|i| i.default_index).collect()
}

fn crunch(kind: FractalKind, julia: Complex<f64>, bailout: u32) -> Vec<u32> {
    crunch_sized(kind, julia, bailout, 10, 10)
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

// Point (column, row) of a 50x50 grid over the default plane.
fn grid_point(column: u32, row: u32) -> Complex<f64> {
    let dx = 3.5 / 50.0;
    let dy = 3.0 / 50.0;
    Complex::new(-2.5 + f64::from(column) * dx, -1.5 + f64::from(row) * dy)
}

#[rustfmt::skip]
const MANDELBROT_10X10: [u32; 100] = [
    0, 0, 0, 0, 1, 1, 1, 1, 1, 1,
    0, 0, 0, 1, 2, 2, 2, 2, 1, 1,
    0, 0, 0, 2, 2, 3, 4, 10, 3, 1,
    0, 0, 2, 2, 3, 5, 10, 10, 10, 2,
    0, 0, 3, 4, 10, 10, 10, 10, 10, 2,
    0, 0, 10, 10, 10, 10, 10, 10, 10, 3,
    0, 0, 3, 4, 10, 10, 10, 10, 10, 2,
    0, 0, 2, 2, 3, 5, 10, 10, 10, 2,
    0, 0, 0, 2, 2, 3, 4, 10, 3, 1,
    0, 0, 0, 1, 2, 2, 2, 2, 1, 1,
];

#[rustfmt::skip]
const MANDELBROT_20X40: [u32; 800] = [
    0, 0, 0, 0, 0, 0, 0, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1,
    0, 0, 0, 0, 0, 0, 0, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1,
    0, 0, 0, 0, 0, 0, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1,
    0, 0, 0, 0, 0, 0, 1, 1, 1, 1, 2, 2, 2, 2, 1, 1, 1, 1, 1, 1,
    0, 0, 0, 0, 0, 0, 1, 1, 2, 2, 2, 2, 2, 2, 2, 2, 1, 1, 1, 1,
    0, 0, 0, 0, 0, 1, 1, 2, 2, 2, 2, 2, 3, 5, 3, 2, 1, 1, 1, 1,
    0, 0, 0, 0, 0, 1, 1, 2, 2, 2, 2, 3, 3, 5, 5, 3, 2, 1, 1, 1,
    0, 0, 0, 0, 0, 1, 2, 2, 2, 2, 2, 3, 4, 6, 11, 3, 3, 2, 1, 1,
    0, 0, 0, 0, 0, 1, 2, 2, 2, 2, 3, 3, 4, 8, 10, 4, 3, 2, 1, 1,
    0, 0, 0, 0, 1, 2, 2, 2, 2, 2, 3, 3, 5, 24, 68, 4, 3, 2, 2, 1,
    0, 0, 0, 0, 1, 2, 2, 2, 2, 3, 3, 5, 6, 88, 88, 6, 4, 2, 2, 1,
    0, 0, 0, 0, 1, 2, 2, 2, 2, 3, 4, 10, 11, 16, 88, 12, 6, 3, 2, 1,
    0, 0, 0, 0, 2, 2, 2, 2, 3, 4, 5, 13, 25, 88, 88, 88, 14, 4, 2, 2,
    0, 0, 0, 0, 2, 2, 2, 3, 4, 4, 5, 12, 88, 88, 88, 88, 88, 4, 2, 2,
    0, 0, 0, 0, 2, 2, 2, 5, 4, 5, 6, 88, 88, 88, 88, 88, 33, 4, 2, 2,
    0, 0, 0, 0, 2, 3, 3, 8, 6, 6, 7, 88, 88, 88, 88, 88, 88, 6, 2, 2,
    0, 0, 0, 1, 3, 3, 4, 7, 11, 16, 10, 88, 88, 88, 88, 88, 88, 5, 2, 2,
    0, 0, 0, 2, 3, 3, 4, 8, 88, 88, 13, 88, 88, 88, 88, 88, 88, 5, 3, 2,
    0, 0, 0, 2, 3, 4, 6, 11, 88, 88, 21, 88, 88, 88, 88, 88, 88, 4, 3, 2,
    0, 0, 0, 3, 4, 5, 8, 19, 88, 88, 42, 88, 88, 88, 88, 88, 88, 4, 3, 2,
    0, 0, 0, 88, 88, 88, 88, 88, 88, 88, 88, 88, 88, 88, 88, 88, 11, 4, 3, 2,
    0, 0, 0, 3, 4, 5, 8, 19, 88, 88, 42, 88, 88, 88, 88, 88, 88, 4, 3, 2,
    0, 0, 0, 2, 3, 4, 6, 11, 88, 88, 21, 88, 88, 88, 88, 88, 88, 4, 3, 2,
    0, 0, 0, 2, 3, 3, 4, 8, 88, 88, 13, 88, 88, 88, 88, 88, 88, 5, 3, 2,
    0, 0, 0, 1, 3, 3, 4, 7, 11, 16, 10, 88, 88, 88, 88, 88, 88, 5, 2, 2,
    0, 0, 0, 0, 2, 3, 3, 8, 6, 6, 7, 88, 88, 88, 88, 88, 88, 6, 2, 2,
    0, 0, 0, 0, 2, 2, 2, 5, 4, 5, 6, 88, 88, 88, 88, 88, 33, 4, 2, 2,
    0, 0, 0, 0, 2, 2, 2, 3, 4, 4, 5, 12, 88, 88, 88, 88, 88, 4, 2, 2,
    0, 0, 0, 0, 2, 2, 2, 2, 3, 4, 5, 13, 25, 88, 88, 88, 14, 4, 2, 2,
    0, 0, 0, 0, 1, 2, 2, 2, 2, 3, 4, 10, 11, 16, 88, 12, 6, 3, 2, 1,
    0, 0, 0, 0, 1, 2, 2, 2, 2, 3, 3, 5, 6, 88, 88, 6, 4, 2, 2, 1,
    0, 0, 0, 0, 1, 2, 2, 2, 2, 2, 3, 3, 5, 24, 68, 4, 3, 2, 2, 1,
    0, 0, 0, 0, 0, 1, 2, 2, 2, 2, 3, 3, 4, 8, 10, 4, 3, 2, 1, 1,
    0, 0, 0, 0, 0, 1, 2, 2, 2, 2, 2, 3, 4, 6, 11, 3, 3, 2, 1, 1,
    0, 0, 0, 0, 0, 1, 1, 2, 2, 2, 2, 3, 3, 5, 5, 3, 2, 1, 1, 1,
    0, 0, 0, 0, 0, 1, 1, 2, 2, 2, 2, 2, 3, 5, 3, 2, 1, 1, 1, 1,
    0, 0, 0, 0, 0, 0, 1, 1, 2, 2, 2, 2, 2, 2, 2, 2, 1, 1, 1, 1,
    0, 0, 0, 0, 0, 0, 1, 1, 1, 1, 2, 2, 2, 2, 1, 1, 1, 1, 1, 1,
    0, 0, 0, 0, 0, 0, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1,
    0, 0, 0, 0, 0, 0, 0, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1,
];

#[rustfmt::skip]
const JULIA_10X10: [u32; 100] = [
    0, 0, 0, 0, 1, 1, 1, 1, 1, 1,
    0, 0, 0, 1, 1, 1, 1, 1, 1, 1,
    0, 0, 0, 1, 1, 2, 2, 3, 3, 2,
    0, 0, 1, 1, 2, 3, 3, 10, 7, 4,
    0, 0, 1, 2, 4, 7, 7, 10, 10, 9,
    0, 0, 1, 4, 10, 10, 10, 10, 10, 10,
    0, 0, 1, 3, 10, 10, 10, 10, 10, 8,
    0, 0, 1, 2, 2, 3, 6, 10, 4, 3,
    0, 0, 0, 1, 2, 2, 2, 3, 2, 2,
    0, 0, 0, 1, 1, 1, 1, 1, 1, 1,
];

#[rustfmt::skip]
const BURNING_SHIP_10X10: [u32; 100] = [
    0, 0, 0, 0, 1, 1, 1, 1, 2, 3,
    0, 0, 0, 1, 2, 8, 2, 2, 4, 10,
    0, 0, 0, 2, 3, 10, 10, 10, 10, 8,
    0, 0, 2, 2, 10, 10, 10, 10, 10, 4,
    0, 0, 3, 6, 10, 10, 10, 10, 10, 3,
    0, 0, 10, 10, 10, 10, 10, 10, 10, 3,
    0, 0, 2, 2, 2, 3, 5, 10, 10, 2,
    0, 0, 1, 1, 2, 2, 2, 4, 4, 2,
    0, 0, 0, 1, 1, 1, 2, 2, 2, 1,
    0, 0, 0, 1, 1, 1, 1, 2, 1, 1,
];

#[test]
fn mandelbrot_grid() {
    assert_eq!(
        crunch(FractalKind::Mandelbrot, Complex::new(0.0, 0.0), 10),
        MANDELBROT_10X10.to_vec()
    );
}

#[test]
fn mandelbrot_tall_grid() {
    assert_eq!(
        crunch_sized(FractalKind::Mandelbrot, Complex::new(0.0, 0.0), 88, 20, 40),
        MANDELBROT_20X40.to_vec()
    );
}

#[test]
fn julia_grid() {
    assert_eq!(
        crunch(FractalKind::Julia, Complex::new(-0.8, 0.156), 10),
        JULIA_10X10.to_vec()
    );
}

#[test]
fn burning_ship_grid() {
    assert_eq!(
        crunch(FractalKind::BurningShip, Complex::new(0.0, 0.0), 10),
        BURNING_SHIP_10X10.to_vec()
    );
}

#[test]
fn single_points() {
    let origin = Complex::new(0.0, 0.0);
    let julia = Complex::new(-0.8, 0.156);
    let cases = [
        (FractalKind::Mandelbrot, (10, 15), 2, (-3.0672, 2.7696)),
        (FractalKind::Mandelbrot, (33, 25), 100, (-0.16332495807107994, 0.0)),
        (FractalKind::Mandelbrot, (41, 27), 55, (2.3637850846657784, -2.264372597523388)),
        (FractalKind::Julia, (10, 15), 1, (2.08, 2.316)),
        (FractalKind::Julia, (33, 25), 22, (1.6532446989801592, -1.939422755899791)),
        (FractalKind::Julia, (41, 27), 12, (-2.825685311882377, -2.588375399038022)),
        (FractalKind::BurningShip, (10, 15), 2, (-3.0672, 2.7696)),
        (FractalKind::BurningShip, (33, 25), 100, (-0.163324958071, 0.0)),
        (FractalKind::BurningShip, (41, 27), 100, (0.469227595221, 0.549612279558)),
    ];
    for &(kind, (column, row), iterations, (re, im)) in cases.iter() {
        let c = if kind == FractalKind::Julia { julia } else { origin };
        let escape = evaluate(grid_point(column, row), kind, 100, c);
        assert_eq!(escape.iterations, iterations, "{} at ({}, {})", kind, column, row);
        assert!((escape.z.re - re).abs() < 1e-6, "{} at ({}, {}): re {}", kind, column, row, escape.z.re);
        assert!((escape.z.im - im).abs() < 1e-6, "{} at ({}, {}): im {}", kind, column, row, escape.z.im);
    }
}

#[test]
fn smoothing_of_escaped_points() {
    let two = evaluate(grid_point(10, 15), FractalKind::Mandelbrot, 100, Complex::new(0.0, 0.0));
    assert!(close(smooth(two.iterations, two.z), 2.758021706608733));
    let fifty_five = evaluate(grid_point(41, 27), FractalKind::Mandelbrot, 100, Complex::new(0.0, 0.0));
    assert!(close(smooth(fifty_five.iterations, fifty_five.z), 55.69450318630743));
}

#[test]
fn tricorn_matches_mandelbrot_on_the_real_axis() {
    // Row 5 is the real axis, where conj(z) == z.
    let tricorn = crunch(FractalKind::Tricorn, Complex::new(0.0, 0.0), 10);
    assert_eq!(tricorn[50..60], MANDELBROT_10X10[50..60]);
    assert!(tricorn.iter().all(|&i| i <= 10));
    assert_ne!(tricorn, MANDELBROT_10X10.to_vec());
}

#[test]
fn single_and_multi_fill_agree() {
    let julia = Complex::new(-0.7, 0.27015);
    for &kind in FractalKind::ALL.iter() {
        for &threads in [1, 2, 3, 4, 7].iter() {
            let params = FractalParameters::new(kind, plane(37, 23), 64)
                .unwrap()
                .with_julia(julia)
                .with_coloring(ColorAlgo::ContinuousSine, Palette::default())
                .with_threads(threads)
                .unwrap();
            let mut single = FractalBuffer::new(37, 23);
            let mut multi = FractalBuffer::new(37, 23);
            fill_buffer_single(&params, &mut single).unwrap();
            fill_buffer_multi(&params, &mut multi).unwrap();
            assert_eq!(single, multi, "{} with {} threads", kind, threads);
        }
    }
}

#[test]
fn escape_time_never_exceeds_the_bailout() {
    let mut rng = rand::thread_rng();
    let julia = Complex::new(-0.8, 0.156);
    for _ in 0..2000 {
        let point = Complex::new(rng.gen_range(-3.0, 3.0), rng.gen_range(-3.0, 3.0));
        let bailout = rng.gen_range(1, 200);
        for &kind in FractalKind::ALL.iter() {
            let escape = evaluate(point, kind, bailout, julia);
            assert!(escape.iterations <= bailout);
            if escape.iterations < bailout {
                assert!(escape.z.norm_sqr() > 4.0);
            }
        }
    }
}

#[test]
fn points_outside_the_radius_escape_immediately() {
    for &kind in [FractalKind::Mandelbrot, FractalKind::Tricorn, FractalKind::BurningShip].iter() {
        let escape = evaluate(Complex::new(2.5, 0.5), kind, 50, Complex::new(0.0, 0.0));
        assert_eq!(escape.iterations, 0);
        assert_eq!(escape.z, Complex::new(2.5, 0.5));
    }
}
