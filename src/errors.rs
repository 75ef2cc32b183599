//! Failures at the edges of the program.  The renderer itself cannot
//! fail; only encoding, writing and serving can.

use failure::Fail;
use std::io;

/// Everything that can go wrong outside the renderer.
#[derive(Debug, Fail)]
pub enum MandelError {
    /// The pixel buffer could not be turned into a PNG stream.
    #[fail(display = "Could not encode image as PNG: {}", _0)]
    Encode(#[cause] image::ImageError),
    /// The PNG stream could not be written to disk.
    #[fail(display = "Could not write image to {}: {}", path, cause)]
    Write {
        /// Where we tried to write.
        path: String,
        /// What the filesystem said.
        #[cause]
        cause: io::Error,
    },
    /// The listener could not be bound or stopped serving.
    #[fail(display = "Server failure on port {}: {}", port, cause)]
    Serve {
        /// The port the server was given.
        port: u16,
        /// What the socket layer said.
        #[cause]
        cause: io::Error,
    },
}

impl From<image::ImageError> for MandelError {
    fn from(err: image::ImageError) -> Self {
        MandelError::Encode(err)
    }
}
