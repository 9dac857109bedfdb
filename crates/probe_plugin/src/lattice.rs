//! Lattice candidate generation over a box.
//!
//! Produces the raw sample grid the resolver later filters. Generation is
//! deterministic: the same box, structure, and spacing always yield the
//! same ordered sequence, so a regeneration pass can be replayed exactly.

use glam::Vec3;

use crate::bounds::Bounds3;

/// Point-packing pattern for lattice candidates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LatticeStructure {
  /// A plain cubic grid.
  #[default]
  SimpleCubic,

  /// One of the two interleaved cubic sub-lattices of a checkerboard,
  /// with the spacing tightened by sqrt(2) so the nearest-neighbor
  /// distance stays comparable to [`LatticeStructure::SimpleCubic`].
  BodyCenteredCubic,
}

/// Lattice candidates for a box, structure, and minimum spacing.
///
/// The iterator is finite and restartable: construct it again from the
/// same inputs to replay the identical sequence. Candidate order is
/// stable but not part of the public contract.
pub fn lattice_points(
  bounds: Bounds3,
  structure: LatticeStructure,
  min_spacing: f32,
) -> LatticePoints {
  let mut spacing = min_spacing.max(1.0);
  if structure == LatticeStructure::BodyCenteredCubic {
    spacing /= std::f32::consts::SQRT_2;
  }

  let count = [
    axis_count(bounds.size.x, spacing),
    axis_count(bounds.size.y, spacing),
    axis_count(bounds.size.z, spacing),
  ];

  // A single-point axis keeps a zero step and collapses to the center.
  let step = Vec3::new(
    bounds.size.x / count[0].saturating_sub(1).max(1) as f32,
    bounds.size.y / count[1].saturating_sub(1).max(1) as f32,
    bounds.size.z / count[2].saturating_sub(1).max(1) as f32,
  );

  LatticePoints {
    min: bounds.min(),
    size: bounds.size,
    count,
    step,
    structure,
    cursor: 0,
  }
}

fn axis_count(extent: f32, spacing: f32) -> u32 {
  ((extent / spacing).ceil() as u32).max(1)
}

/// Iterator state for [`lattice_points`].
#[derive(Clone, Debug)]
pub struct LatticePoints {
  min: Vec3,
  size: Vec3,
  count: [u32; 3],
  step: Vec3,
  structure: LatticeStructure,
  cursor: u64,
}

impl LatticePoints {
  /// Grid index count per axis, before any structure pruning.
  pub fn grid_count(&self) -> [u32; 3] {
    self.count
  }

  fn position(&self, x: u32, y: u32, z: u32) -> Vec3 {
    self.min
      + Vec3::new(
        axis_offset(x, self.count[0], self.size.x, self.step.x),
        axis_offset(y, self.count[1], self.size.y, self.step.y),
        axis_offset(z, self.count[2], self.size.z, self.step.z),
      )
  }
}

fn axis_offset(index: u32, count: u32, extent: f32, step: f32) -> f32 {
  if count <= 1 {
    extent * 0.5
  } else {
    index as f32 * step
  }
}

impl Iterator for LatticePoints {
  type Item = Vec3;

  fn next(&mut self) -> Option<Vec3> {
    let [cx, cy, cz] = self.count;
    let total = cx as u64 * cy as u64 * cz as u64;

    // Row-major, x outermost and z innermost.
    while self.cursor < total {
      let index = self.cursor;
      self.cursor += 1;

      let x = (index / (cy as u64 * cz as u64)) as u32;
      let y = (index / cz as u64 % cy as u64) as u32;
      let z = (index % cz as u64) as u32;

      // Checkerboard pruning keeps one of the two interleaved sub-lattices.
      if self.structure == LatticeStructure::BodyCenteredCubic && (x + y + z) % 2 == 1 {
        continue;
      }

      return Some(Self::position(self, x, y, z));
    }

    None
  }

  fn size_hint(&self) -> (usize, Option<usize>) {
    let [cx, cy, cz] = self.count;
    let total = cx as u64 * cy as u64 * cz as u64;
    let remaining = (total - self.cursor.min(total)) as usize;
    match self.structure {
      LatticeStructure::SimpleCubic => (remaining, Some(remaining)),
      // Pruning discards at most every other index.
      LatticeStructure::BodyCenteredCubic => (remaining / 2, Some(remaining)),
    }
  }
}

#[cfg(test)]
#[path = "lattice_test.rs"]
mod lattice_test;
