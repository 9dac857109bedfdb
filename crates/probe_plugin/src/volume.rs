//! ProbeVolume - a user-authored placement region and its committed
//! probe set.
//!
//! Volumes are plain data: hosts create and destroy them, edit their
//! parameters through `set_*` methods (which report whether anything
//! changed, so the host can drive its own dirty-tracking or undo), and
//! read the probe set back after a batch run. The placement core only
//! reads parameters and replaces the probe set.

use glam::{Affine3A, Vec3};
use smallvec::SmallVec;

use crate::bounds::Bounds3;
use crate::collision::LayerMask;
use crate::error::ProbeError;
use crate::lattice::LatticeStructure;

/// Default resolver bias schedule: a gentle first nudge, a full step, one
/// overshoot to clear shallow pockets, and a settling step.
pub const DEFAULT_ITERATION_BIASES: [f32; 4] = [0.6, 1.0, 1.2, 1.0];

/// Floor for [`ProbeVolume::min_spacing`].
pub const MIN_SPACING_FLOOR: f32 = 1.0;

/// Floor for [`ProbeVolume::min_clearance`].
pub const MIN_CLEARANCE_FLOOR: f32 = 0.01;

/// A box-shaped placement region with its lattice, resolver, and
/// ordering parameters, plus the most recently committed probe set.
#[derive(Clone, Debug)]
pub struct ProbeVolume {
  bounds: Bounds3,
  structure: LatticeStructure,
  min_spacing: f32,
  min_clearance: f32,
  constrain_within_bounds: bool,
  collision_layers: LayerMask,
  priority: i32,
  iteration_biases: SmallVec<[f32; 4]>,
  transform: Affine3A,
  probes: Vec<Vec3>,
}

impl Default for ProbeVolume {
  fn default() -> Self {
    Self {
      bounds: Bounds3::default(),
      structure: LatticeStructure::default(),
      min_spacing: 4.0,
      min_clearance: 0.5,
      constrain_within_bounds: true,
      collision_layers: 1,
      priority: 0,
      iteration_biases: SmallVec::from_slice(&DEFAULT_ITERATION_BIASES),
      transform: Affine3A::IDENTITY,
      probes: Vec::new(),
    }
  }
}

impl ProbeVolume {
  /// Create a volume with the stock parameters and identity transform.
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_bounds(mut self, bounds: Bounds3) -> Self {
    self.bounds = bounds;
    self
  }

  pub fn with_structure(mut self, structure: LatticeStructure) -> Self {
    self.structure = structure;
    self
  }

  pub fn with_min_spacing(mut self, spacing: f32) -> Self {
    self.min_spacing = spacing.max(MIN_SPACING_FLOOR);
    self
  }

  pub fn with_min_clearance(mut self, clearance: f32) -> Self {
    self.min_clearance = clearance.max(MIN_CLEARANCE_FLOOR);
    self
  }

  pub fn with_constrain_within_bounds(mut self, constrain: bool) -> Self {
    self.constrain_within_bounds = constrain;
    self
  }

  pub fn with_collision_layers(mut self, layers: LayerMask) -> Self {
    self.collision_layers = layers;
    self
  }

  pub fn with_priority(mut self, priority: i32) -> Self {
    self.priority = priority;
    self
  }

  /// Replace the bias schedule. At least one bias is required.
  pub fn with_iteration_biases(mut self, biases: &[f32]) -> Result<Self, ProbeError> {
    self.set_iteration_biases(biases)?;
    Ok(self)
  }

  pub fn with_transform(mut self, transform: Affine3A) -> Self {
    self.transform = transform;
    self
  }

  pub fn bounds(&self) -> Bounds3 {
    self.bounds
  }

  pub fn structure(&self) -> LatticeStructure {
    self.structure
  }

  pub fn min_spacing(&self) -> f32 {
    self.min_spacing
  }

  pub fn min_clearance(&self) -> f32 {
    self.min_clearance
  }

  pub fn constrain_within_bounds(&self) -> bool {
    self.constrain_within_bounds
  }

  pub fn collision_layers(&self) -> LayerMask {
    self.collision_layers
  }

  pub fn priority(&self) -> i32 {
    self.priority
  }

  pub fn iteration_biases(&self) -> &[f32] {
    &self.iteration_biases
  }

  pub fn transform(&self) -> Affine3A {
    self.transform
  }

  /// The committed probe positions, in local space. Fully replaced on
  /// every regeneration.
  pub fn probes(&self) -> &[Vec3] {
    &self.probes
  }

  /// Set the placement box. Returns whether the value changed.
  pub fn set_bounds(&mut self, bounds: Bounds3) -> bool {
    let changed = self.bounds != bounds;
    self.bounds = bounds;
    changed
  }

  /// Set the lattice structure. Returns whether the value changed.
  pub fn set_structure(&mut self, structure: LatticeStructure) -> bool {
    let changed = self.structure != structure;
    self.structure = structure;
    changed
  }

  /// Set the minimum spacing, clamped to [`MIN_SPACING_FLOOR`]. Returns
  /// whether the stored value changed.
  pub fn set_min_spacing(&mut self, spacing: f32) -> bool {
    let clamped = spacing.max(MIN_SPACING_FLOOR);
    let changed = self.min_spacing != clamped;
    self.min_spacing = clamped;
    changed
  }

  /// Set the minimum clearance, clamped to [`MIN_CLEARANCE_FLOOR`].
  /// Returns whether the stored value changed.
  pub fn set_min_clearance(&mut self, clearance: f32) -> bool {
    let clamped = clearance.max(MIN_CLEARANCE_FLOOR);
    let changed = self.min_clearance != clamped;
    self.min_clearance = clamped;
    changed
  }

  /// Set the bounds-constraint flag. Returns whether the value changed.
  pub fn set_constrain_within_bounds(&mut self, constrain: bool) -> bool {
    let changed = self.constrain_within_bounds != constrain;
    self.constrain_within_bounds = constrain;
    changed
  }

  /// Set the collision layer mask. Returns whether the value changed.
  pub fn set_collision_layers(&mut self, layers: LayerMask) -> bool {
    let changed = self.collision_layers != layers;
    self.collision_layers = layers;
    changed
  }

  /// Set the batch priority. Returns whether the value changed.
  pub fn set_priority(&mut self, priority: i32) -> bool {
    let changed = self.priority != priority;
    self.priority = priority;
    changed
  }

  /// Replace the bias schedule. At least one bias is required; an empty
  /// slice is rejected here so the resolver never sees one.
  pub fn set_iteration_biases(&mut self, biases: &[f32]) -> Result<bool, ProbeError> {
    if biases.is_empty() {
      return Err(ProbeError::EmptyBiasSequence);
    }
    let changed = self.iteration_biases.as_slice() != biases;
    self.iteration_biases = SmallVec::from_slice(biases);
    Ok(changed)
  }

  /// Set the local-to-world transform. Returns whether the value changed.
  pub fn set_transform(&mut self, transform: Affine3A) -> bool {
    let changed = self.transform != transform;
    self.transform = transform;
    changed
  }

  /// Convert a local-frame point to world space.
  #[inline]
  pub fn to_world(&self, local: Vec3) -> Vec3 {
    self.transform.transform_point3(local)
  }

  /// Convert a world-space point to the volume's local frame.
  #[inline]
  pub fn to_local(&self, world: Vec3) -> Vec3 {
    self.transform.inverse().transform_point3(world)
  }

  /// Signed distance from a world-space point to this volume's box
  /// surface, measured in the volume's local frame.
  pub fn surface_distance_to(&self, world: Vec3) -> f32 {
    self.bounds.surface_distance(self.to_local(world))
  }

  /// Quick density estimate (lattice cells over box volume). Inaccurate
  /// but stable, used to order batch processing.
  pub fn density_estimate(&self) -> f32 {
    let size = self.bounds.size;
    let cells = (size.x / self.min_spacing).ceil()
      * (size.y / self.min_spacing).ceil()
      * (size.z / self.min_spacing).ceil();
    cells / self.bounds.volume().max(1.0)
  }

  pub(crate) fn clear_probes(&mut self) {
    self.probes.clear();
  }

  pub(crate) fn commit_probes(&mut self, probes: Vec<Vec3>) {
    self.probes = probes;
  }
}

#[cfg(test)]
#[path = "volume_test.rs"]
mod volume_test;
