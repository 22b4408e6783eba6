// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Fills a `FractalBuffer` with escape times.
//!
//! Every pixel is independent of every other, so the image can be
//! carved up any way we like.  The unit of work here is a row: the
//! single-threaded filler walks the rows in order, the multi-threaded
//! one puts them all in a queue and lets a fixed number of workers
//! pull from it until it runs dry.  Each row owns a disjoint slice of
//! the buffer, so the workers never need to coordinate beyond taking
//! the next row off the queue.
//!
//! Both fillers compute each pixel's point directly from its column
//! and row, which means they produce bit-identical buffers.

use crossbeam::thread::ScopedJoinHandle;
use log::debug;
use std::sync::{Mutex, PoisonError};
use std::time::Instant;

use crate::error::CrunchError;
use crate::fractal::{smooth, Evaluator};
use crate::iterations::{FractalBuffer, Iterations};
use crate::params::FractalParameters;
use crate::planes::Pixel;

/// The per-pixel work, with the fractal family already resolved.
#[derive(Copy, Clone)]
struct RowCruncher<'a> {
    params: &'a FractalParameters,
    evaluator: Evaluator,
    continuous: bool,
}

impl<'a> RowCruncher<'a> {
    fn new(params: &'a FractalParameters) -> Self {
        RowCruncher {
            params,
            evaluator: params.kind.evaluator(),
            continuous: params.col_algo.needs_continuous_index(),
        }
    }

    /// Computes row `row` into `cells`, which must be that row of the
    /// buffer.
    fn crunch_row(&self, row: usize, cells: &mut [Iterations]) {
        let plane = &self.params.plane;
        for (column, cell) in cells.iter_mut().enumerate() {
            let point = plane.pixel_to_point(&Pixel(column, row));
            let escape = (self.evaluator)(point, self.params.julia, self.params.bailout);
            *cell = if self.continuous {
                Iterations::with_continuous(escape.iterations, smooth(escape.iterations, escape.z))
            } else {
                Iterations::new(escape.iterations)
            };
        }
    }
}

fn check_size(params: &FractalParameters, buffer: &FractalBuffer) -> Result<(), CrunchError> {
    if buffer.width() != params.width() || buffer.height() != params.height() {
        return Err(CrunchError::BufferMismatch(
            buffer.width(),
            buffer.height(),
            params.width(),
            params.height(),
        ));
    }
    Ok(())
}

/// Fills the buffer on the calling thread, row by row.
pub fn fill_buffer_single(params: &FractalParameters, buffer: &mut FractalBuffer) -> Result<(), CrunchError> {
    check_size(params, buffer)?;
    let start = Instant::now();
    let cruncher = RowCruncher::new(params);
    for (row, cells) in buffer.rows_mut().enumerate() {
        cruncher.crunch_row(row, cells);
    }
    debug!("Single-threaded fill took {:?}", start.elapsed());
    Ok(())
}

/// Fills the buffer with a pool of `params.threads` workers.  Returns
/// once every row is done.
pub fn fill_buffer_multi(params: &FractalParameters, buffer: &mut FractalBuffer) -> Result<(), CrunchError> {
    check_size(params, buffer)?;
    let start = Instant::now();
    let threads = params.threads.max(1);
    let cruncher = RowCruncher::new(params);
    let rows = Mutex::new(buffer.rows_mut().enumerate());

    let finished = crossbeam::scope(|spawner| {
        let handles: Vec<ScopedJoinHandle<usize>> = (0..threads)
            .map(|_| {
                let rows = &rows;
                spawner.spawn(move |_| {
                    let mut done = 0;
                    loop {
                        let row = { rows.lock().unwrap_or_else(PoisonError::into_inner).next() };
                        match row {
                            Some((row, cells)) => {
                                cruncher.crunch_row(row, cells);
                                done += 1;
                            }
                            None => {
                                break;
                            }
                        }
                    }
                    done
                })
            })
            .collect();

        handles
            .into_iter()
            .map(|handle| handle.join())
            .collect::<Result<Vec<usize>, _>>()
    });

    match finished {
        Ok(Ok(per_worker)) => {
            debug!(
                "{} workers filled {:?} rows in {:?}",
                threads,
                per_worker,
                start.elapsed()
            );
            Ok(())
        }
        _ => Err(CrunchError::WorkerPanicked),
    }
}

/// Fills the buffer, in parallel if more than one thread is asked for.
pub fn fill_buffer(params: &FractalParameters, buffer: &mut FractalBuffer) -> Result<(), CrunchError> {
    if params.threads > 1 {
        fill_buffer_multi(params, buffer)
    } else {
        fill_buffer_single(params, buffer)
    }
}
