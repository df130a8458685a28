//! Particle physics for the dotfield backdrop
//!
//! This crate provides the per-particle simulation, including:
//! - Plain particle records with free update functions
//! - Attractors (pointer-like influence points)
//! - A synthetic orbiting attractor
//! - Click ripples that dim and restore particle opacity
//!
//! Particles never interact with each other, only with attractors, so the
//! order in which a field updates them does not matter.

pub mod attractor;
pub mod orbit;
pub mod particle;
pub mod wave;

// Re-export commonly used types
pub use attractor::Attractor;
pub use orbit::{Orbit, OrbitParams};
pub use particle::{
    integrate, interact, ripple, square, update, Particle, ParticleParams, PendingFade, Square,
};
pub use wave::WaveParams;
