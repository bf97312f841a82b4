//! Simplified, dimension-erased spatial transforms.
//!
//! This crate exposes 2D and 3D spatial transforms (identity, translation,
//! scale, Euler, similarity, versor, affine, composite, displacement field
//! and more) through a single [`Transform`] handle, whose kind and dimension
//! are chosen at run time. Handles are cheap to clone: clones share their
//! backend until one of them is modified (copy on write).
//!
//! # Example
//!
//! ```no_run
//! use simple_transform::{read_transform, Euler3DTransform, Transform};
//! # fn run() -> simple_transform::Result<()> {
//! let mut rigid = Euler3DTransform::new();
//! rigid.set_rotation(0.1, 0.0, 0.0)?.set_translation(&[1.0, 2.0, 3.0])?;
//! rigid.write_transform("rigid.tfm")?;
//!
//! let loaded: Transform = read_transform("rigid.tfm")?;
//! let p = loaded.transform_point(&[0.0, 0.0, 0.0])?;
//! # Ok(())
//! # }
//! ```
//!
//! Kind-specific accessors are provided by the facades in [`facade`], which
//! bind to the handle's backend and follow it through copies on write.
#![deny(missing_debug_implementations)]
#![warn(missing_docs, unused_extern_crates, trivial_casts, unused_results)]

#[macro_use]
extern crate quick_error;
#[macro_use]
extern crate num_derive;
#[macro_use]
extern crate tracing;

pub mod backend;
pub mod dispatch;
pub mod error;
pub mod facade;
pub mod geometry;
pub mod image;
pub mod reader;
pub mod transform;
pub mod typedef;
pub mod writer;
mod util;

pub use crate::dispatch::{MultipleTransformPolicy, TransformFactory};
pub use crate::error::{Result, TransformError};
pub use crate::facade::{
    AffineTransform, Euler2DTransform, Euler3DTransform, Similarity2DTransform,
    Similarity3DTransform, VersorRigid3DTransform, VersorTransform,
};
pub use crate::geometry::AnyTransform;
pub use crate::image::Image;
pub use crate::reader::{read_transform, ReaderOptions};
pub use crate::transform::Transform;
pub use crate::typedef::{PixelId, TransformKind};
pub use crate::writer::{write_transform, WriterOptions};
