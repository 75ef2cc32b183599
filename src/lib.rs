#![deny(missing_docs)]
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Mandelbrot set image server
//!
//! The Mandelbrot set is the set of points `c` on the complex plane for
//! which repeatedly squaring a number and adding `c` back in, starting
//! from zero, never runs off to infinity.  Once the running value
//! leaves the circle of radius two it is guaranteed to escape, so
//! counting how many iterations it takes to get there gives every
//! point outside the set a "velocity", and that velocity is what we
//! color.  Points that survive the whole iteration budget are taken to
//! be inside the set and painted black.
//!
//! The renderer maps a pixel grid linearly onto a rectangle of the
//! complex plane, iterates every pixel's sample, and hands the escape
//! iteration to one of a handful of color schemes.  The result is an
//! RGBA image; encoding it, serving it over HTTP, and parsing the
//! command line all live outside the renderer.

pub mod color;
pub mod config;
pub mod errors;
pub mod planes;
pub mod png;
pub mod render;
pub mod server;

pub use color::{color_for, hsv_to_rgba, ColorScheme};
pub use config::{ChannelOverflow, HueNarrowing, RenderConfig};
pub use errors::MandelError;
pub use planes::{PlaneMapper, Raster, Region};
pub use render::{render, Renderer};
