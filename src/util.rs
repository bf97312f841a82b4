//! Private utility module
use std::mem;
use std::path::Path;

use crate::error::{Result, TransformError};

/// Check whether the file name ends with ".gz".
pub fn is_gz_file<P>(path: P) -> bool
where
    P: AsRef<Path>,
{
    path.as_ref()
        .file_name()
        .map(|a| a.to_string_lossy().ends_with(".gz"))
        .unwrap_or(false)
}

/// Number of pixels of a grid of the given size, checking that a buffer of
/// `components` values per pixel can be addressed.
pub fn number_of_pixels(size: &[usize], components: usize) -> Result<usize> {
    let overflow = || {
        TransformError::InvalidArgument(format!(
            "a grid of size {:?} with {} components is too large",
            size, components
        ))
    };
    let pixels = size
        .iter()
        .try_fold(1usize, |acc, s| acc.checked_mul(*s))
        .ok_or_else(overflow)?;
    let values = pixels.checked_mul(components).ok_or_else(overflow)?;
    if values > isize::MAX as usize / mem::size_of::<f64>() {
        return Err(overflow());
    }
    Ok(pixels)
}

#[cfg(test)]
mod tests {
    use super::{is_gz_file, number_of_pixels};

    #[test]
    fn filenames() {
        assert!(!is_gz_file("/tmp/transform.tfm"));
        assert!(!is_gz_file("transform.txt"));
        assert!(is_gz_file("/tmp/transform.tfm.gz"));
        assert!(is_gz_file("transform.txt.gz"));
        assert!(!is_gz_file("/tmp/gz/"));
        assert!(!is_gz_file("gz"));
    }

    #[test]
    fn pixel_counts() {
        assert_eq!(number_of_pixels(&[3, 4], 2).unwrap(), 12);
        assert_eq!(number_of_pixels(&[0, 4, 5], 3).unwrap(), 0);
        assert!(number_of_pixels(&[usize::MAX, 2], 1).is_err());
        assert!(number_of_pixels(&[1 << 40, 1 << 20], 2).is_err());
        assert!(number_of_pixels(&[usize::MAX / 2], 3).is_err());
    }
}
