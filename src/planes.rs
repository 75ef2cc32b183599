//! Contains the PlaneMapper struct, which describes a relationship
//! between a rectangle on the integral plane with an origin at 0,0,
//! and a rectangle on the complex plane bounded by an arbitrary pair
//! of corners.
use num::Complex;

/// Describes the width and height of the pixel grid.  The grid is
/// assumed to start at 0,0 so the origin is not included.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Raster(pub u32, pub u32);

impl Raster {
    /// The total number of pixels in the grid.
    pub fn len(&self) -> usize {
        (self.0 as usize) * (self.1 as usize)
    }

    /// Describes that the grid has no pixels at all.
    pub fn is_empty(&self) -> bool {
        self.0 == 0 || self.1 == 0
    }
}

/// The rectangle of the complex plane being sampled, as its four
/// bounds.  Nothing is validated: an inverted or empty region is
/// accepted and simply produces a mirrored or solid image.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Region {
    /// Real part at the left edge.
    pub xmin: f64,
    /// Imaginary part at the top row.
    pub ymin: f64,
    /// Real part approached by the right edge.
    pub xmax: f64,
    /// Imaginary part approached by the bottom row.
    pub ymax: f64,
}

impl Region {
    /// Builds a region from its four bounds.
    pub fn new(xmin: f64, ymin: f64, xmax: f64, ymax: f64) -> Region {
        Region {
            xmin,
            ymin,
            xmax,
            ymax,
        }
    }

    /// Builds a region from two corners, treating the real part of
    /// each as x and the imaginary part as y.
    pub fn from_corners(leftlower: Complex<f64>, rightupper: Complex<f64>) -> Region {
        Region::new(leftlower.re, leftlower.im, rightupper.re, rightupper.im)
    }
}

/// Describes the column, row of a pixel in the grid.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Pixel(pub u32, pub u32);

/// Maps pixels of a raster onto samples of a region.  Each axis is
/// mapped linearly and independently; there is no aspect-ratio
/// correction.
#[derive(Copy, Clone, Debug)]
pub struct PlaneMapper {
    /// The size of the pixel grid.
    pub raster: Raster,
    /// The bounds of the complex plane.
    pub region: Region,
    // Width and height of the region.
    spans: (f64, f64),
}

impl PlaneMapper {
    /// Constructor.  Never fails; degenerate regions are the caller's
    /// business.
    pub fn new(raster: Raster, region: Region) -> PlaneMapper {
        PlaneMapper {
            raster,
            region,
            spans: (region.xmax - region.xmin, region.ymax - region.ymin),
        }
    }

    /// Describes that the integral plane has no area.
    pub fn is_empty(&self) -> bool {
        self.raster.is_empty()
    }

    /// Real part sampled by pixel column `xc`.
    #[inline]
    pub fn column_to_re(&self, xc: u32) -> f64 {
        f64::from(xc) / f64::from(self.raster.0) * self.spans.0 + self.region.xmin
    }

    /// Imaginary part sampled by pixel row `yc`.
    #[inline]
    pub fn row_to_im(&self, yc: u32) -> f64 {
        f64::from(yc) / f64::from(self.raster.1) * self.spans.1 + self.region.ymin
    }

    /// Given a pixel on the integral cartesian plane, map that to a
    /// point on the complex cartesian plane.
    pub fn pixel_to_point(&self, pixel: &Pixel) -> Complex<f64> {
        Complex::new(self.column_to_re(pixel.0), self.row_to_im(pixel.1))
    }
}
