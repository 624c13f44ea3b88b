use glam::Vec3;

/// Axis-aligned bounding box.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

/// Inverse of a ray direction with near-zero components clamped, so the
/// slab test never produces NaN from 0 * inf.
pub fn safe_invert(dir: Vec3) -> Vec3 {
    const EPSILON: f32 = 1e-8;
    let invert = |d: f32| {
        if d.abs() < EPSILON {
            1.0 / EPSILON.copysign(d)
        } else {
            1.0 / d
        }
    };
    Vec3::new(invert(dir.x), invert(dir.y), invert(dir.z))
}

impl Aabb {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Inverted box that any `grow` call snaps onto.
    pub fn empty() -> Self {
        Self {
            min: Vec3::splat(f32::INFINITY),
            max: Vec3::splat(f32::NEG_INFINITY),
        }
    }

    pub fn union(&self, other: &Aabb) -> Aabb {
        Aabb {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    pub fn grow(&mut self, point: Vec3) {
        self.min = self.min.min(point);
        self.max = self.max.max(point);
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn extent(&self) -> Vec3 {
        self.max - self.min
    }

    /// Index of the widest axis (0 = x, 1 = y, 2 = z).
    pub fn largest_axis(&self) -> usize {
        let e = self.extent();
        if e.x >= e.y && e.x >= e.z {
            0
        } else if e.y >= e.z {
            1
        } else {
            2
        }
    }

    /// Slab test against a ray with precomputed inverse direction. Returns
    /// true if the box overlaps the parameter interval (0, t_max].
    pub fn hit(&self, origin: Vec3, inv_dir: Vec3, t_max: f32) -> bool {
        let t0 = (self.min - origin) * inv_dir;
        let t1 = (self.max - origin) * inv_dir;

        let t_lo = t0.min(t1);
        let t_hi = t0.max(t1);

        let t_near = t_lo.x.max(t_lo.y).max(t_lo.z);
        let t_far = t_hi.x.min(t_hi.y).min(t_hi.z);

        t_near <= t_far && t_far > 0.0 && t_near < t_max
    }
}
