//! Simple analytic collision worlds for testing and debugging.
//!
//! Deterministic sphere and box obstacles driven by the same
//! signed-distance math as the placement core. Use them to exercise the
//! resolver without wiring up a physics engine.

use glam::Vec3;

use crate::bounds::Bounds3;
use crate::collision::{ColliderId, CollisionWorld, LayerMask, Penetration, ProbeSphere};

/// Obstacle geometry.
#[derive(Clone, Copy, Debug)]
pub enum ObstacleShape {
  /// Solid sphere.
  Sphere { center: Vec3, radius: f32 },
  /// Solid axis-aligned box in world space.
  Box { bounds: Bounds3 },
}

impl ObstacleShape {
  /// Signed distance from a world point to the obstacle surface.
  fn surface_distance(&self, point: Vec3) -> f32 {
    match self {
      Self::Sphere { center, radius } => (point - *center).length() - radius,
      Self::Box { bounds } => bounds.surface_distance(point),
    }
  }
}

/// One obstacle and the collision layers it occupies.
#[derive(Clone, Copy, Debug)]
struct Obstacle {
  shape: ObstacleShape,
  layers: LayerMask,
}

/// Analytic obstacle set implementing [`CollisionWorld`].
///
/// Handles are indices into the obstacle list, in insertion order.
#[derive(Clone, Debug, Default)]
pub struct AnalyticWorld {
  obstacles: Vec<Obstacle>,
}

impl AnalyticWorld {
  /// Create an empty world.
  pub fn new() -> Self {
    Self::default()
  }

  /// Add an obstacle on the given layers, returning its handle.
  pub fn add(&mut self, shape: ObstacleShape, layers: LayerMask) -> ColliderId {
    self.obstacles.push(Obstacle { shape, layers });
    ColliderId::new(self.obstacles.len() as u64 - 1)
  }

  /// Add a solid sphere on layer 1.
  pub fn add_sphere(&mut self, center: Vec3, radius: f32) -> ColliderId {
    self.add(ObstacleShape::Sphere { center, radius }, 1)
  }

  /// Add a solid axis-aligned box on layer 1.
  pub fn add_box(&mut self, bounds: Bounds3) -> ColliderId {
    self.add(ObstacleShape::Box { bounds }, 1)
  }

  /// Number of obstacles.
  pub fn len(&self) -> usize {
    self.obstacles.len()
  }

  /// True when the world has no obstacles.
  pub fn is_empty(&self) -> bool {
    self.obstacles.is_empty()
  }
}

impl CollisionWorld for AnalyticWorld {
  fn overlap_sphere(
    &self,
    center: Vec3,
    radius: f32,
    layers: LayerMask,
    hits: &mut [ColliderId],
  ) -> usize {
    let mut written = 0;
    for (index, obstacle) in self.obstacles.iter().enumerate() {
      if obstacle.layers & layers == 0 {
        continue;
      }
      if obstacle.shape.surface_distance(center) >= radius {
        continue;
      }
      if written == hits.len() {
        break;
      }
      hits[written] = ColliderId::new(index as u64);
      written += 1;
    }
    written
  }

  fn penetration(
    &self,
    probe: ProbeSphere,
    probe_center: Vec3,
    collider: ColliderId,
  ) -> Option<Penetration> {
    let obstacle = self.obstacles.get(collider.raw() as usize)?;

    match obstacle.shape {
      ObstacleShape::Sphere { center, radius } => {
        let offset = probe_center - center;
        let distance = offset.length();
        if distance >= radius + probe.radius {
          return None;
        }
        // Concentric spheres have no separation axis.
        let direction = offset.try_normalize()?;
        Some(Penetration {
          direction,
          depth: radius + probe.radius - distance,
        })
      }
      ObstacleShape::Box { bounds } => {
        let distance = bounds.surface_distance(probe_center);
        if distance >= probe.radius {
          return None;
        }
        let direction = box_separation_axis(&bounds, probe_center)?;
        Some(Penetration {
          direction,
          depth: probe.radius - distance,
        })
      }
    }
  }
}

/// Outward separation axis for a point against a box: the gradient of the
/// box's signed distance, by central differences.
fn box_separation_axis(bounds: &Bounds3, point: Vec3) -> Option<Vec3> {
  const H: f32 = 1e-3;
  let gradient = Vec3::new(
    bounds.surface_distance(point + Vec3::X * H) - bounds.surface_distance(point - Vec3::X * H),
    bounds.surface_distance(point + Vec3::Y * H) - bounds.surface_distance(point - Vec3::Y * H),
    bounds.surface_distance(point + Vec3::Z * H) - bounds.surface_distance(point - Vec3::Z * H),
  );
  gradient.try_normalize()
}
