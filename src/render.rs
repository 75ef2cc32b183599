// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The Field Renderer.  Every pixel of the raster is mapped to a
//! sample on the complex plane, the sample is iterated until it
//! escapes or the limit runs out, and the outcome is handed to the
//! color mapper.  Pixels never depend on each other, so the threaded
//! renderer just hands each worker its own band of rows.

use itertools::iproduct;
use num::Complex;
use std::panic;

use crate::color::{color_for, ColorScheme};
use crate::config::RenderConfig;
use crate::planes::{Pixel, PlaneMapper, Raster, Region};
use image::{Rgba, RgbaImage};

const CHANNELS: usize = 4;

/// Iterates `v = v * v + c` from zero and returns the iteration at
/// which `|v|` first exceeds 2, or None if it never does within
/// `limit` iterations.  NaN never compares greater than 2, so NaN
/// samples never escape.
pub fn escape_time(c: Complex<f64>, limit: u32) -> Option<u32> {
    let mut v: Complex<f64> = Complex { re: 0.0, im: 0.0 };
    for n in 0..limit {
        v = v * v + c;
        if v.norm() > 2.0 {
            return Some(n);
        }
    }
    None
}

/// Holds everything needed to paint one image.  Once built it is
/// never mutated, so it can be shared freely between worker threads.
pub struct Renderer {
    plane: PlaneMapper,
    scheme: ColorScheme,
    config: RenderConfig,
}

impl Renderer {
    /// Requires the size of the image, the region of the complex plane
    /// to sample, the coloring and the render parameters.
    pub fn new(raster: Raster, region: Region, scheme: ColorScheme, config: RenderConfig) -> Self {
        Renderer {
            plane: PlaneMapper::new(raster, region),
            scheme,
            config,
        }
    }

    /// The color of a single pixel.
    pub fn paint(&self, pixel: &Pixel) -> Rgba<u8> {
        let c = self.plane.pixel_to_point(pixel);
        match escape_time(c, self.config.iteration_limit) {
            Some(n) => color_for(n, self.scheme, &self.config),
            None => self.config.interior,
        }
    }

    fn blank(&self) -> RgbaImage {
        RgbaImage::new(self.plane.raster.0, self.plane.raster.1)
    }

    /// Paints a contiguous run of whole rows, starting at `first_row`,
    /// into `band`.
    fn render_band(&self, first_row: u32, band: &mut [u8]) {
        let width = self.plane.raster.0 as usize;
        for (i, cell) in band.chunks_exact_mut(CHANNELS).enumerate() {
            let pixel = Pixel((i % width) as u32, first_row + (i / width) as u32);
            cell.copy_from_slice(&self.paint(&pixel).0);
        }
    }

    /// Paints the whole image on the calling thread.
    pub fn render_single(&self) -> RgbaImage {
        let mut image = self.blank();
        let Raster(width, height) = self.plane.raster;
        for (row, column) in iproduct!(0..height, 0..width) {
            image.put_pixel(column, row, self.paint(&Pixel(column, row)));
        }
        image
    }

    /// A multi-threaded version of the render function that takes a
    /// thread count.  The image is cut into bands of whole rows, one
    /// per thread, and each thread writes only to its own band.  The
    /// result is identical to `render_single`.
    pub fn render(&self, threads: usize) -> RgbaImage {
        if threads <= 1 || self.plane.is_empty() {
            return self.render_single();
        }

        let mut image = self.blank();
        let Raster(width, height) = self.plane.raster;
        let rows_per_band = (height as usize + threads - 1) / threads;
        let band_len = rows_per_band * width as usize * CHANNELS;

        let outcome = crossbeam::scope(|spawner| {
            for (i, band) in image.chunks_mut(band_len).enumerate() {
                let first_row = (i * rows_per_band) as u32;
                spawner.spawn(move |_| self.render_band(first_row, band));
            }
        });
        if let Err(cause) = outcome {
            panic::resume_unwind(cause);
        }
        image
    }
}

/// Renders `region` onto a `width` by `height` image using every
/// available CPU.  Total over its inputs: zero sizes give an empty
/// image, inverted or non-finite regions give a mirrored or solid one.
pub fn render(
    width: u32,
    height: u32,
    region: Region,
    scheme: ColorScheme,
    config: &RenderConfig,
) -> RgbaImage {
    Renderer::new(Raster(width, height), region, scheme, *config).render(num_cpus::get())
}
