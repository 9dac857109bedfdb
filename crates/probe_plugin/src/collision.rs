//! Collision-query boundary.
//!
//! The placement core never talks to a physics engine directly. Hosts
//! implement [`CollisionWorld`] over whatever broad-phase they own; the
//! core only needs a sphere-overlap query and a penetration query.
//! [`crate::analytic::AnalyticWorld`] is a self-contained implementation
//! for tests and tools.

use glam::Vec3;

/// Collision layer bitmask. Zero selects no layers.
pub type LayerMask = u32;

/// Opaque handle to a collider owned by the backend.
///
/// Handles are only meaningful to the backend that produced them and must
/// not be retained across queries.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct ColliderId(u64);

impl ColliderId {
  /// Wrap a backend-chosen raw value.
  pub fn new(raw: u64) -> Self {
    Self(raw)
  }

  /// Get the raw value back.
  pub fn raw(&self) -> u64 {
    self.0
  }
}

/// The query shape used for probes: a sphere of the volume's clearance
/// radius.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProbeSphere {
  /// Sphere radius in world units.
  pub radius: f32,
}

/// Separation between an overlapping probe sphere and a collider.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Penetration {
  /// Unit direction that moves the probe out of the collider.
  pub direction: Vec3,
  /// Penetration depth along `direction`, never negative.
  pub depth: f32,
}

impl Penetration {
  /// The displacement that separates the shapes: `direction * depth`.
  #[inline]
  pub fn correction(&self) -> Vec3 {
    self.direction * self.depth
  }
}

/// Black-box collision queries supplied by the host environment.
///
/// Both queries must be safe to call repeatedly and must not retain
/// references beyond the call.
pub trait CollisionWorld {
  /// Collect colliders overlapping a sphere into `hits`, returning how
  /// many were written. Results beyond `hits.len()` are dropped; the
  /// buffer bounds the query, it never grows.
  fn overlap_sphere(
    &self,
    center: Vec3,
    radius: f32,
    layers: LayerMask,
    hits: &mut [ColliderId],
  ) -> usize;

  /// Separation for a probe sphere against one collider.
  ///
  /// `None` is a valid, non-error outcome: the pair does not overlap, or
  /// the backend cannot resolve it (degenerate or unsupported shapes).
  fn penetration(
    &self,
    probe: ProbeSphere,
    probe_center: Vec3,
    collider: ColliderId,
  ) -> Option<Penetration>;
}
