//! Iterative collision resolution for probe candidates.
//!
//! A blocked candidate is nudged along the summed penetration vectors of
//! every collider it overlaps, one damped step per bias in the volume's
//! schedule. Not a physics solve: the bias schedule bounds the work per
//! candidate, and a point that stays blocked after the last step is
//! dropped rather than iterated further.

use glam::Vec3;

use crate::collision::{ColliderId, CollisionWorld, ProbeSphere};
use crate::error::ProbeError;
use crate::volume::ProbeVolume;

/// Tiny offset shared by the overlap-radius shave and the convergence
/// test.
const EPSILON: f32 = 1e-4;

/// Default capacity of the overlap result buffer.
pub const DEFAULT_MAX_OVERLAPS: usize = 10;

/// Batch-scoped resolution context.
///
/// Holds the reusable probe query sphere and the bounded overlap buffer,
/// acquired once per batch and reused across every volume and candidate.
/// [`CollisionResolver::release`] ends the scope; resolving afterwards is
/// a caller bug and fails with [`ProbeError::ResolverReleased`].
#[derive(Debug)]
pub struct CollisionResolver {
  probe: ProbeSphere,
  overlaps: Box<[ColliderId]>,
  released: bool,
}

impl CollisionResolver {
  /// Create a resolver whose overlap buffer holds `max_overlaps`
  /// colliders (clamped to at least 1). Overlaps beyond the capacity are
  /// silently dropped by the query.
  pub fn new(max_overlaps: usize) -> Self {
    Self {
      probe: ProbeSphere { radius: 0.0 },
      overlaps: vec![ColliderId::new(0); max_overlaps.max(1)].into_boxed_slice(),
      released: false,
    }
  }

  /// Capacity of the overlap buffer.
  pub fn max_overlaps(&self) -> usize {
    self.overlaps.len()
  }

  /// True once the scope has been released.
  pub fn is_released(&self) -> bool {
    self.released
  }

  /// End the scope. Idempotent; every resolve afterwards fails.
  pub fn release(&mut self) {
    self.released = true;
  }

  /// Attempt to find an unobstructed position for a probe candidate.
  ///
  /// Returns the resolved local-space position, or `None` when the
  /// candidate stays blocked, escapes a constrained volume's bounds, or
  /// cannot converge. `None` is an expected per-candidate outcome, not an
  /// error.
  pub fn try_resolve<W: CollisionWorld>(
    &mut self,
    world: &W,
    volume: &ProbeVolume,
    candidate_world: Vec3,
  ) -> Result<Option<Vec3>, ProbeError> {
    if self.released {
      return Err(ProbeError::ResolverReleased);
    }

    self.probe.radius = volume.min_clearance();
    if self.overlap_count(world, volume, candidate_world) == 0 {
      return Ok(Some(volume.to_local(candidate_world)));
    }

    let mut position = candidate_world;
    for &bias in volume.iteration_biases() {
      let next = self.resolve_step(world, volume, position, bias);
      let step_sq = (next - position).length_squared();
      position = next;

      if step_sq < EPSILON * EPSILON {
        break;
      }
    }

    let local = volume.to_local(position);
    if volume.constrain_within_bounds() && !volume.bounds().contains_point(local) {
      return Ok(None);
    }
    if self.overlap_count(world, volume, position) != 0 {
      return Ok(None);
    }

    Ok(Some(local))
  }

  /// One damped correction step: sum `direction * depth` over every
  /// overlapped collider, scale by the bias, advance.
  fn resolve_step<W: CollisionWorld>(
    &mut self,
    world: &W,
    volume: &ProbeVolume,
    position: Vec3,
    bias: f32,
  ) -> Vec3 {
    let count = self.overlap_count(world, volume, position);

    let mut correction = Vec3::ZERO;
    for &collider in &self.overlaps[..count] {
      // No result means the backend could not resolve the pair; it
      // contributes nothing.
      let Some(hit) = world.penetration(self.probe, position, collider) else {
        continue;
      };
      correction += hit.correction();
    }

    position + correction * bias
  }

  fn overlap_count<W: CollisionWorld>(
    &mut self,
    world: &W,
    volume: &ProbeVolume,
    center: Vec3,
  ) -> usize {
    if volume.collision_layers() == 0 {
      return 0;
    }
    world.overlap_sphere(
      center,
      volume.min_clearance() - EPSILON,
      volume.collision_layers(),
      &mut self.overlaps,
    )
  }
}

#[cfg(test)]
#[path = "resolver_test.rs"]
mod resolver_test;
