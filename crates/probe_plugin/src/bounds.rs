//! Axis-aligned box primitive with signed-distance queries.

use glam::Vec3;

/// Axis-aligned box described by center and full size, in a volume's
/// local frame.
///
/// Size components are non-negative; constructors clamp negative extents
/// to zero.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds3 {
  /// Center of the box.
  pub center: Vec3,
  /// Full extents (width, height, depth).
  pub size: Vec3,
}

impl Bounds3 {
  /// Create a box from center and size.
  pub fn new(center: Vec3, size: Vec3) -> Self {
    Self {
      center,
      size: size.max(Vec3::ZERO),
    }
  }

  /// Create a box from min and max corners.
  pub fn from_min_max(min: Vec3, max: Vec3) -> Self {
    Self::new((min + max) * 0.5, max - min)
  }

  /// Minimum corner.
  #[inline]
  pub fn min(&self) -> Vec3 {
    self.center - self.size * 0.5
  }

  /// Maximum corner.
  #[inline]
  pub fn max(&self) -> Vec3 {
    self.center + self.size * 0.5
  }

  /// Componentwise interval test, boundary inclusive.
  #[inline]
  pub fn contains_point(&self, point: Vec3) -> bool {
    let min = self.min();
    let max = self.max();
    point.x >= min.x
      && point.x <= max.x
      && point.y >= min.y
      && point.y <= max.y
      && point.z >= min.z
      && point.z <= max.z
  }

  /// Shrink the box by the same margin on every axis, keeping the center.
  /// Axes smaller than twice the margin collapse to zero size.
  pub fn shrunk_by(&self, margin: f32) -> Self {
    Self::new(self.center, self.size - Vec3::splat(2.0 * margin))
  }

  /// Box volume (zero for degenerate boxes).
  #[inline]
  pub fn volume(&self) -> f32 {
    self.size.x * self.size.y * self.size.z
  }

  /// Signed distance from a local-frame point to the box surface.
  ///
  /// Negative inside, zero on a face, positive outside. Exact for
  /// axis-aligned boxes.
  pub fn surface_distance(&self, point: Vec3) -> f32 {
    let q = (point - self.center).abs() - self.size * 0.5;
    q.x.max(q.y).max(q.z).min(0.0) + q.max(Vec3::ZERO).length()
  }
}

impl Default for Bounds3 {
  /// A 10x6x10 box lifted 3 units above the local origin, the stock
  /// placement region for a room-scale volume.
  fn default() -> Self {
    Self {
      center: Vec3::new(0.0, 3.0, 0.0),
      size: Vec3::new(10.0, 6.0, 10.0),
    }
  }
}
