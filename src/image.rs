//! Minimal in-memory image, as consumed by the displacement field path.

use ndarray::Array2;

use crate::error::{Result, TransformError};
use crate::typedef::PixelId;
use crate::util::number_of_pixels;

/// An N-dimensional image with its physical geometry.
///
/// The pixel buffer holds one row per pixel, with the first axis varying
/// fastest, and one column per pixel component.
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    pixel_id: PixelId,
    size: Vec<usize>,
    origin: Vec<f64>,
    spacing: Vec<f64>,
    /// Row-major direction cosines.
    direction: Vec<f64>,
    data: Array2<f64>,
}

impl Default for Image {
    /// An empty 3D scalar image of `UInt8` pixels.
    fn default() -> Self {
        Image {
            pixel_id: PixelId::UInt8,
            size: vec![0; 3],
            origin: vec![0.; 3],
            spacing: vec![1.; 3],
            direction: identity_direction(3),
            data: Array2::zeros((0, 1)),
        }
    }
}

fn identity_direction(dim: usize) -> Vec<f64> {
    let mut d = vec![0.; dim * dim];
    for i in 0..dim {
        d[i * dim + i] = 1.;
    }
    d
}

impl Image {
    /// Create an image of the given size and pixel type, filled with zeros,
    /// at the origin with unit spacing and identity direction.
    ///
    /// # Errors
    ///
    /// - `TransformError::InvalidArgument` if `size` is empty, or if
    /// `components` is zero, or more than one for a scalar pixel type, or if
    /// the pixel buffer would be too large to allocate.
    pub fn new(size: &[usize], pixel_id: PixelId, components: usize) -> Result<Image> {
        let dim = size.len();
        if dim == 0 {
            return Err(TransformError::InvalidArgument(
                "image must have at least one dimension".to_string(),
            ));
        }
        if components == 0 || (!pixel_id.is_vector() && components != 1) {
            return Err(TransformError::InvalidArgument(format!(
                "{:?} pixels cannot hold {} components",
                pixel_id, components
            )));
        }
        let pixels = number_of_pixels(size, components)?;
        Ok(Image {
            pixel_id,
            size: size.to_vec(),
            origin: vec![0.; dim],
            spacing: vec![1.; dim],
            direction: identity_direction(dim),
            data: Array2::zeros((pixels, components)),
        })
    }

    /// Create an image over an existing pixel buffer, which is taken
    /// without copying.
    ///
    /// # Errors
    ///
    /// - `TransformError::InvalidArgument` if the buffer does not hold one
    /// row per pixel, or its component count is invalid for `pixel_id`.
    pub fn from_data(size: &[usize], pixel_id: PixelId, data: Array2<f64>) -> Result<Image> {
        let mut image = Image::new(size, pixel_id, data.ncols())?;
        if data.nrows() != image.data.nrows() {
            return Err(TransformError::InvalidArgument(format!(
                "buffer of {} pixels given to an image of size {:?}",
                data.nrows(),
                size
            )));
        }
        image.data = data;
        Ok(image)
    }

    /// Builder-style setter for the origin.
    ///
    /// # Errors
    ///
    /// - `TransformError::InvalidArgument` on a length mismatch.
    pub fn with_origin(mut self, origin: &[f64]) -> Result<Image> {
        self.check_geometry("origin", origin.len(), self.dimension())?;
        self.origin = origin.to_vec();
        Ok(self)
    }

    /// Builder-style setter for the spacing.
    ///
    /// # Errors
    ///
    /// - `TransformError::InvalidArgument` on a length mismatch.
    pub fn with_spacing(mut self, spacing: &[f64]) -> Result<Image> {
        self.check_geometry("spacing", spacing.len(), self.dimension())?;
        self.spacing = spacing.to_vec();
        Ok(self)
    }

    /// Builder-style setter for the row-major direction matrix.
    ///
    /// # Errors
    ///
    /// - `TransformError::InvalidArgument` on a length mismatch.
    pub fn with_direction(mut self, direction: &[f64]) -> Result<Image> {
        let dim = self.dimension();
        self.check_geometry("direction", direction.len(), dim * dim)?;
        self.direction = direction.to_vec();
        Ok(self)
    }

    fn check_geometry(&self, what: &str, len: usize, expected: usize) -> Result<()> {
        if len != expected {
            return Err(TransformError::InvalidArgument(format!(
                "image {} needs {} values, got {}",
                what, expected, len
            )));
        }
        Ok(())
    }

    /// Number of spatial dimensions.
    pub fn dimension(&self) -> usize {
        self.size.len()
    }

    /// Pixel type.
    pub fn pixel_id(&self) -> PixelId {
        self.pixel_id
    }

    /// Number of components per pixel.
    pub fn number_of_components_per_pixel(&self) -> usize {
        self.data.ncols()
    }

    /// Number of pixels along each axis.
    pub fn size(&self) -> &[usize] {
        &self.size
    }

    /// Physical position of the first pixel.
    pub fn origin(&self) -> &[f64] {
        &self.origin
    }

    /// Physical distance between pixels along each axis.
    pub fn spacing(&self) -> &[f64] {
        &self.spacing
    }

    /// Row-major direction cosines.
    pub fn direction(&self) -> &[f64] {
        &self.direction
    }

    /// The pixel buffer.
    pub fn data(&self) -> &Array2<f64> {
        &self.data
    }

    /// Mutable access to the pixel buffer.
    pub fn data_mut(&mut self) -> &mut Array2<f64> {
        &mut self.data
    }

    /// Decompose the image into its buffer, leaving nothing behind.
    pub(crate) fn into_data(self) -> Array2<f64> {
        self.data
    }
}
