//! Types for error handling go here.

use std::io::Error as IOError;

quick_error! {
    /// Error type for all error variants originated by this crate.
    #[derive(Debug)]
    pub enum TransformError {
        /// Malformed caller input: bad dimension, bad kind and dimension
        /// combination, bad parameter vector length, mismatched point
        /// dimensionality or wrong pixel layout.
        InvalidArgument(reason: String) {
            display("Invalid argument: {}", reason)
        }
        /// The operation is not meaningful for the transform's current kind.
        Unsupported(reason: String) {
            display("Unsupported operation: {}", reason)
        }
        /// A conversion which should always succeed by construction did not.
        /// This signals a bug in this crate, not a caller error.
        InternalInconsistency(reason: String) {
            display("Internal inconsistency: {}", reason)
        }
        /// Read a malformed transform file.
        InvalidFormat(line: usize, reason: String) {
            display("Invalid transform file (line {}): {}", line, reason)
        }
        /// The transform file did not contain any transform.
        NoTransform {
            display("There appears to be no transform in the file")
        }
        /// More than one top-level transform was found and the reader
        /// options forbid discarding the extra ones.
        MultipleTransforms(count: usize) {
            display("Expected a single transform, found {}", count)
        }
        /// I/O Error
        Io(err: IOError) {
            from()
            source(err)
            display("I/O error: {}", err)
        }
    }
}

/// Alias type for results originated from this crate.
pub type Result<T> = ::std::result::Result<T, TransformError>;
