//! Dotfield - an interactive particle backdrop
//!
//! A grid of small squares that drift toward the pointer, light up in
//! random colours and ease back to rest. The field itself lives in
//! `dotfield_core`; this crate holds the desktop application around it.

pub mod config;
pub mod systems;
