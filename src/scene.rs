//! Scene graph assembly.
//!
//! The graph is a strict ownership chain: Geometry → GeometricModel →
//! Group → Instance → World, plus one ambient Light owned by the World.
//! Construction is the commit point for every node: parameters go in, a
//! frozen value comes out, and there are no mutators. Parents take their
//! children by value, so attaching a node is also the release of the local
//! reference to it; nothing can be committed out of order or mutated after
//! the fact.

use glam::Vec3;

use crate::config::RenderMode;
use crate::geometry::EdgeGeometry;
use crate::math::Aabb;

/// Generic surface material. The only parameterization is which renderer
/// variant it targets; there is no per-run color customization.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    mode: RenderMode,
    diffuse: Vec3,
}

impl Material {
    pub fn generic(mode: RenderMode) -> Self {
        Self {
            mode,
            diffuse: Vec3::splat(0.8),
        }
    }

    pub fn mode(&self) -> RenderMode {
        self.mode
    }

    pub fn diffuse(&self) -> Vec3 {
        self.diffuse
    }
}

/// Geometry bound to a material: one renderable unit.
#[derive(Debug, Clone, PartialEq)]
pub struct GeometricModel {
    geometry: EdgeGeometry,
    material: Material,
}

impl GeometricModel {
    pub fn new(geometry: EdgeGeometry, material: Material) -> Self {
        Self { geometry, material }
    }

    pub fn geometry(&self) -> &EdgeGeometry {
        &self.geometry
    }

    pub fn material(&self) -> Material {
        self.material
    }
}

/// Collection point for models. This viewer always holds exactly one.
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    model: GeometricModel,
}

impl Group {
    pub fn new(model: GeometricModel) -> Self {
        Self { model }
    }

    pub fn model(&self) -> &GeometricModel {
        &self.model
    }
}

/// Places a group in world space. Only the identity transform is
/// supported; there is no per-instance placement.
#[derive(Debug, Clone, PartialEq)]
pub struct Instance {
    group: Group,
}

impl Instance {
    pub fn new(group: Group) -> Self {
        Self { group }
    }

    pub fn group(&self) -> &Group {
        &self.group
    }
}

/// Single ambient light filling the scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    color: Vec3,
    intensity: f32,
}

impl Light {
    pub fn ambient() -> Self {
        Self {
            color: Vec3::ONE,
            intensity: 1.0,
        }
    }

    pub fn color(&self) -> Vec3 {
        self.color
    }

    pub fn intensity(&self) -> f32 {
        self.intensity
    }
}

/// Fully committed scene: the instance chain plus exactly one light.
/// Immutable once built; the render loop only reads it.
#[derive(Debug, Clone, PartialEq)]
pub struct World {
    instance: Instance,
    light: Light,
}

impl World {
    pub fn new(instance: Instance, light: Light) -> Self {
        Self { instance, light }
    }

    pub fn instance(&self) -> &Instance {
        &self.instance
    }

    pub fn light(&self) -> Light {
        self.light
    }

    /// World-space bounds of everything renderable, edge radius included.
    pub fn bounds(&self) -> Aabb {
        let geometry = self.instance.group().model().geometry();
        let mut bounds = Aabb::empty();
        for &v in geometry.vertices() {
            bounds.grow(v);
        }
        let r = Vec3::splat(geometry.radius());
        Aabb::new(bounds.min - r, bounds.max + r)
    }
}

/// Assemble the committed world for one edge geometry, bottom-up:
/// geometry → model → group → instance → world.
pub fn assemble_world(geometry: EdgeGeometry, mode: RenderMode) -> World {
    let material = Material::generic(mode);
    let model = GeometricModel::new(geometry, material);
    let group = Group::new(model);
    let instance = Instance::new(group);
    World::new(instance, Light::ambient())
}
