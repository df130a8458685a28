//! Integration tests for drawing a particle field on the CPU framebuffer
//!
//! Checks the pixels a field actually produces:
//! 1. Resting particles draw white at the alpha floor
//! 2. A highlighted particle draws its vivid colour at full alpha

use dotfield_core::{Color, FieldConfig, ParticleField, Vec2};
use dotfield_render::Framebuffer;

const WIDTH: u32 = 200;
const HEIGHT: u32 = 200;

fn seeded_field() -> ParticleField<Framebuffer> {
    ParticleField::new(
        WIDTH,
        HEIGHT,
        FieldConfig::default().with_gap(20).with_seed(99),
        Framebuffer::new(WIDTH, HEIGHT, Color::BLACK),
    )
    .expect("default config is valid")
}

fn byte(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

fn pixel_under(field: &ParticleField<Framebuffer>, position: Vec2) -> Option<[u8; 4]> {
    field
        .surface()
        .pixel(position.x.floor() as u32, position.y.floor() as u32)
}

#[test]
fn test_resting_particles_draw_floor_alpha_white() {
    let mut field = seeded_field();
    field.tick();

    assert_eq!(field.surface().width(), WIDTH);
    assert_eq!(field.surface().height(), HEIGHT);
    assert!(field.particles().iter().any(|p| p.size >= 1.0));

    for p in field.particles() {
        assert_eq!(p.position, p.origin);
        // White at 0.25 over black: 63.75 rounds to 64
        let expected = if p.size > 0.0 {
            [64, 64, 64, 255]
        } else {
            [0, 0, 0, 255]
        };
        assert_eq!(
            pixel_under(&field, p.origin),
            Some(expected),
            "particle at ({}, {})",
            p.origin.x,
            p.origin.y
        );
    }
}

#[test]
fn test_highlighted_particle_draws_vivid_colour() {
    let mut field = seeded_field();

    let target = field
        .particles()
        .iter()
        .position(|p| {
            p.size >= 1.0
                && p.origin.x >= 60.0
                && p.origin.x <= 140.0
                && p.origin.y >= 60.0
                && p.origin.y <= 140.0
        })
        .expect("seeded grid has a sized interior particle");
    let origin = field.particles()[target].origin;

    // 50px away is inside the default pointer radius (sqrt 3000)
    field.pointer_moved(origin + Vec2::new(50.0, 0.0));
    field.tick();

    let p = &field.particles()[target];
    assert_eq!(p.alpha, 1.0);
    assert_ne!(p.color, Color::WHITE);
    // Pushed away from the pointer
    assert!(p.position.x < origin.x);

    let expected = [byte(p.color.r), byte(p.color.g), byte(p.color.b), 255];
    assert_eq!(pixel_under(&field, p.position), Some(expected));
    // The rest spot it left behind is background again
    assert_eq!(pixel_under(&field, origin), Some([0, 0, 0, 255]));
}
