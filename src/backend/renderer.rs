use glam::{Vec3, Vec4};

use super::bvh::Bvh;
use super::{Context, Framebuffer};
use crate::camera::PerspectiveCamera;
use crate::config::RenderMode;
use crate::geometry::GeometryLayout;
use crate::math::sampling::{cosine_hemisphere, HashRng};
use crate::math::Capsule;
use crate::scene::World;

/// Offset applied along the normal before shooting occlusion rays.
const SHADOW_BIAS: f32 = 1e-3;

/// Unbounded ambient-occlusion reach.
const AO_DISTANCE: f32 = 1e18;

/// Renders a committed world into a framebuffer, one blocking pass at a
/// time. The variant (path-traced or ray-cast) is fixed at construction
/// for the lifetime of the run.
pub struct Renderer<'a> {
    ctx: &'a Context,
    mode: RenderMode,
    primitives: Vec<Capsule>,
    bvh: Bvh,
    background: Vec4,
}

impl<'a> Renderer<'a> {
    /// Ingest the world's geometry buffer (walking it the way its layout
    /// prescribes) and build the acceleration structure.
    pub fn new(ctx: &'a Context, mode: RenderMode, world: &World) -> Self {
        let geometry = world.instance().group().model().geometry();
        let radius = geometry.radius();

        let primitives: Vec<Capsule> = match geometry.layout() {
            GeometryLayout::RoundCurve => (0..geometry.edge_count())
                .map(|i| {
                    let (v0, v1) = geometry.edge(i);
                    Capsule::new(v0, v1, radius)
                })
                .collect(),
            GeometryLayout::Cylinders => geometry
                .interleaved()
                .chunks_exact(6)
                .map(|record| {
                    Capsule::new(
                        Vec3::new(record[0], record[1], record[2]),
                        Vec3::new(record[3], record[4], record[5]),
                        radius,
                    )
                })
                .collect(),
        };

        let bvh = Bvh::build(&primitives);
        log::info!(
            "renderer ready ({:?}): {} primitives",
            mode,
            primitives.len()
        );

        Self {
            ctx,
            mode,
            primitives,
            bvh,
            background: ctx.settings().background.extend(1.0),
        }
    }

    pub fn mode(&self) -> RenderMode {
        self.mode
    }

    /// Render one full pass and blend it into the framebuffer. Blocking:
    /// the call returns only once every pixel of the pass is final, so
    /// consecutive passes never overlap.
    pub fn render_frame(&self, fb: &mut Framebuffer, camera: &PerspectiveCamera, world: &World) {
        let width = fb.width();
        let height = fb.height();
        let pass = fb.passes();

        let mut pixels = vec![Vec4::ZERO; (width * height) as usize];
        for y in 0..height {
            for x in 0..width {
                let mut rng = HashRng::for_pixel(x, y, pass);
                let (jx, jy) = (rng.next_f32(), rng.next_f32());
                let (origin, dir) = camera.primary_ray(x, y, width, height, jx, jy);
                pixels[(y * width + x) as usize] = self.shade(origin, dir, world, &mut rng);
            }
        }
        fb.accumulate(&pixels);
    }

    fn shade(&self, origin: Vec3, dir: Vec3, world: &World, rng: &mut HashRng) -> Vec4 {
        let hit = self
            .bvh
            .closest_hit(origin, dir, &self.primitives, |c, o, d| c.intersect(o, d));

        let Some((id, t)) = hit else {
            return self.background;
        };

        let capsule = &self.primitives[id];
        let point = origin + dir * t;
        let mut normal = capsule.normal_at(point);
        if normal.dot(dir) > 0.0 {
            normal = -normal;
        }

        let material = world.instance().group().model().material();
        let light = world.light();
        let occlusion = self.ambient_occlusion(point, normal, rng);
        let ambient = light.color() * light.intensity() * occlusion;

        let color = match self.mode {
            RenderMode::PathTraced => material.diffuse() * ambient,
            RenderMode::RayCast => {
                // Headlight term keeps single-pass output readable.
                let n_dot_v = normal.dot(-dir).max(0.0);
                material.diffuse() * ambient * (0.3 + 0.7 * n_dot_v)
            }
        };
        color.extend(1.0)
    }

    /// Fraction of the hemisphere above `point` that reaches open space.
    fn ambient_occlusion(&self, point: Vec3, normal: Vec3, rng: &mut HashRng) -> f32 {
        let samples = self.ctx.settings().ao_samples;
        if samples == 0 {
            return 1.0;
        }

        let origin = point + normal * SHADOW_BIAS;
        let mut visible = 0u32;
        for _ in 0..samples {
            let dir = cosine_hemisphere(normal, rng.next_f32(), rng.next_f32());
            let blocked =
                self.bvh
                    .any_hit(origin, dir, AO_DISTANCE, &self.primitives, |c, o, d| {
                        c.intersect(o, d)
                    });
            if !blocked {
                visible += 1;
            }
        }
        visible as f32 / samples as f32
    }
}
