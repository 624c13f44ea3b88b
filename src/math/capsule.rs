use glam::Vec3;

use super::Aabb;

/// Minimum hit distance; rejects self-intersections at the ray origin.
pub const T_MIN: f32 = 1e-4;

/// Squared segment length below which a capsule degenerates to a sphere.
const DEGENERATE_EPSILON: f32 = 1e-12;

/// Round capsule around the segment [p0, p1]: the shape of one rendered
/// edge, a linear curve with a round cross-section of uniform radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Capsule {
    pub p0: Vec3,
    pub p1: Vec3,
    pub radius: f32,
}

impl Capsule {
    pub fn new(p0: Vec3, p1: Vec3, radius: f32) -> Self {
        Self { p0, p1, radius }
    }

    pub fn bounds(&self) -> Aabb {
        let r = Vec3::splat(self.radius);
        Aabb::new(self.p0.min(self.p1) - r, self.p0.max(self.p1) + r)
    }

    /// Closest intersection distance along `dir` (unit length), if any.
    ///
    /// Body hits are found by the cylinder quadratic restricted to the
    /// segment span; anything that falls off an end is handled by the
    /// spherical caps. Zero-length segments collapse to the sphere case.
    pub fn intersect(&self, origin: Vec3, dir: Vec3) -> Option<f32> {
        let ba = self.p1 - self.p0;
        let baba = ba.dot(ba);
        if baba < DEGENERATE_EPSILON {
            return sphere_intersect(self.p0, self.radius, origin, dir);
        }

        let oa = origin - self.p0;
        let bard = ba.dot(dir);
        let baoa = ba.dot(oa);
        let rdoa = dir.dot(oa);
        let oaoa = oa.dot(oa);

        let a = baba - bard * bard;
        let b = baba * rdoa - baoa * bard;
        let c = baba * oaoa - baoa * baoa - self.radius * self.radius * baba;

        if a.abs() > DEGENERATE_EPSILON {
            let h = b * b - a * c;
            if h >= 0.0 {
                let t = (-b - h.sqrt()) / a;
                let y = baoa + t * bard;
                if t > T_MIN && y > 0.0 && y < baba {
                    return Some(t);
                }
            }
        }

        // Off the segment span (or parallel to the axis): try both caps.
        let t0 = sphere_intersect(self.p0, self.radius, origin, dir);
        let t1 = sphere_intersect(self.p1, self.radius, origin, dir);
        match (t0, t1) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (Some(a), None) => Some(a),
            (None, Some(b)) => Some(b),
            (None, None) => None,
        }
    }

    /// Outward surface normal at a point on (or near) the capsule surface.
    pub fn normal_at(&self, point: Vec3) -> Vec3 {
        let ba = self.p1 - self.p0;
        let pa = point - self.p0;
        let baba = ba.dot(ba);
        let h = if baba < DEGENERATE_EPSILON {
            0.0
        } else {
            (pa.dot(ba) / baba).clamp(0.0, 1.0)
        };
        ((pa - ba * h) / self.radius).normalize()
    }
}

/// Ray-sphere quadratic in half-b form; returns the nearest distance
/// beyond T_MIN.
fn sphere_intersect(center: Vec3, radius: f32, origin: Vec3, dir: Vec3) -> Option<f32> {
    let oc = origin - center;
    let a = dir.dot(dir);
    let half_b = oc.dot(dir);
    let c = oc.dot(oc) - radius * radius;

    let discriminant = half_b * half_b - a * c;
    if discriminant < 0.0 {
        return None;
    }

    let sqrt_d = discriminant.sqrt();
    let t = (-half_b - sqrt_d) / a;
    if t > T_MIN {
        return Some(t);
    }
    let t = (-half_b + sqrt_d) / a;
    if t > T_MIN {
        return Some(t);
    }
    None
}
