//! Serialization of a rendered image.  This sits outside the renderer
//! proper: the renderer hands back pixels, these functions turn them
//! into PNG bytes or a PNG file.

use image::{ImageOutputFormat, RgbaImage};
use std::fs;
use std::io::Cursor;

use crate::errors::MandelError;

/// Encodes the image as a PNG byte stream.
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>, MandelError> {
    // Write to an intermediary buffer because Seek is required.
    let mut bytes: Vec<u8> = Vec::new();
    image.write_to(&mut Cursor::new(&mut bytes), ImageOutputFormat::Png)?;
    Ok(bytes)
}

/// Encodes the image and writes it to `path`.
pub fn write_png(path: &str, image: &RgbaImage) -> Result<(), MandelError> {
    let bytes = encode_png(image)?;
    fs::write(path, bytes).map_err(|cause| MandelError::Write {
        path: path.to_string(),
        cause,
    })
}
