//! Deterministic sampling helpers.
//!
//! All pseudo-randomness in the renderer is derived by hashing pixel and
//! pass indices, so identical runs produce identical images.

use glam::Vec3;
use std::f32::consts::PI;

/// 32-bit integer finalizer (Wang hash).
fn wang_hash(mut seed: u32) -> u32 {
    seed = (seed ^ 61) ^ (seed >> 16);
    seed = seed.wrapping_mul(9);
    seed ^= seed >> 4;
    seed = seed.wrapping_mul(0x27d4_eb2d);
    seed ^ (seed >> 15)
}

/// Tiny xorshift generator seeded from hashed indices.
#[derive(Debug, Clone, Copy)]
pub struct HashRng {
    state: u32,
}

impl HashRng {
    /// Generator for one pixel in one pass; distinct pixels and passes get
    /// decorrelated streams.
    pub fn for_pixel(x: u32, y: u32, pass: u32) -> Self {
        let seed = wang_hash(x ^ y.rotate_left(16) ^ pass.wrapping_mul(0x9e37_79b9));
        Self {
            // xorshift must never sit at zero
            state: seed.max(1),
        }
    }

    pub fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }

    /// Uniform float in [0, 1).
    pub fn next_f32(&mut self) -> f32 {
        (self.next_u32() >> 8) as f32 / (1 << 24) as f32
    }
}

/// Cosine-weighted direction in the hemisphere around `normal`, from two
/// uniform samples.
pub fn cosine_hemisphere(normal: Vec3, u1: f32, u2: f32) -> Vec3 {
    let r = u1.sqrt();
    let phi = 2.0 * PI * u2;
    let local = Vec3::new(r * phi.cos(), r * phi.sin(), (1.0 - u1).max(0.0).sqrt());

    let (tangent, bitangent) = orthonormal_basis(normal);
    (tangent * local.x + bitangent * local.y + normal * local.z).normalize()
}

/// Branch on the dominant component to avoid a degenerate cross product.
fn orthonormal_basis(n: Vec3) -> (Vec3, Vec3) {
    let helper = if n.x.abs() > 0.9 { Vec3::Y } else { Vec3::X };
    let tangent = n.cross(helper).normalize();
    let bitangent = n.cross(tangent);
    (tangent, bitangent)
}
