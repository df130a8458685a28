//! 2D Mathematics Library
//!
//! This crate provides the small set of value types shared by the dotfield
//! crates.
//!
//! ## Core Types
//!
//! - [`Vec2`] - 2D vector in pixel space (x right, y down)
//! - [`Color`] - sRGB colour with HSL construction

mod vec2;
pub mod color;

pub use vec2::Vec2;
pub use color::Color;
