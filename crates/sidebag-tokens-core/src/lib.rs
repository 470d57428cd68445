//! Core types and image helpers shared by the sidebag token crates.
//!
//! This crate is small on purpose: detected circles, the left/right column
//! split of a page, crop rectangles, grayscale/blur helpers and logging
//! setup. It knows nothing about token names or the filesystem layout.

mod circle;
mod gray;
mod logger;
mod rect;

pub use circle::{partition_columns, Circle, Columns, Side};
pub use gray::{blur_gray, to_gray};
pub use rect::CropRect;

#[cfg(feature = "tracing")]
pub use logger::init_tracing;

pub use logger::{init_with_level, parse_level};
