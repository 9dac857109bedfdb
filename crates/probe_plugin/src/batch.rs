//! Multi-volume batch orchestration.
//!
//! Volumes are regenerated strictly in sequence: each volume's committed
//! probe set becomes visible to the reach test before the next volume
//! runs, which is what keeps neighbors from placing competing probes at
//! shared boundaries. Do not parallelize across volumes without
//! restructuring that dependency.

use glam::Vec3;
use web_time::Instant;

use crate::collision::CollisionWorld;
use crate::error::ProbeError;
use crate::lattice::lattice_points;
use crate::resolver::{CollisionResolver, DEFAULT_MAX_OVERLAPS};
use crate::volume::ProbeVolume;

/// Batch-wide settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BatchOptions {
  /// Capacity of the shared overlap buffer (clamped to at least 1).
  pub max_overlaps: usize,
}

impl Default for BatchOptions {
  fn default() -> Self {
    Self {
      max_overlaps: DEFAULT_MAX_OVERLAPS,
    }
  }
}

/// Counters for one batch run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BatchSummary {
  /// Volumes whose probe sets were replaced.
  pub volumes_processed: usize,
  /// Lattice candidates considered across all volumes.
  pub candidates: usize,
  /// Candidates committed as probes.
  pub accepted: usize,
  /// Candidates skipped because an already-processed volume covers them.
  pub rejected_reach: usize,
  /// Candidates the resolver could not place.
  pub rejected_obstructed: usize,
  /// Wall-clock time for the whole batch, in microseconds.
  pub elapsed_us: u64,
}

/// Regenerate every volume's probe set against the given collision world.
///
/// Volumes are processed in priority order (higher first), ties broken by
/// the density estimate (sparser first), so cheap volumes are never
/// blocked behind dense neighbors. Each volume's previous probe set is
/// discarded before new candidates are considered, and a volume that
/// accepts no candidates still completes successfully with an empty set.
#[cfg_attr(feature = "tracing", tracing::instrument(skip_all, name = "probes::regenerate"))]
pub fn regenerate_probes<W: CollisionWorld>(
  volumes: &mut [ProbeVolume],
  world: &W,
  options: &BatchOptions,
) -> Result<BatchSummary, ProbeError> {
  let started = Instant::now();
  let mut summary = BatchSummary::default();

  // Resolver resources are acquired once for the whole batch and must be
  // released exactly once, including on the error path.
  let mut resolver = CollisionResolver::new(options.max_overlaps);
  let result = process_in_order(volumes, world, &mut resolver, &mut summary);
  resolver.release();

  summary.elapsed_us = started.elapsed().as_micros() as u64;
  result.map(|()| summary)
}

fn process_in_order<W: CollisionWorld>(
  volumes: &mut [ProbeVolume],
  world: &W,
  resolver: &mut CollisionResolver,
  summary: &mut BatchSummary,
) -> Result<(), ProbeError> {
  let order = processing_order(volumes);

  let mut processed: Vec<usize> = Vec::with_capacity(volumes.len());
  for index in order {
    #[cfg(feature = "tracing")]
    let _span = tracing::info_span!("regenerate_volume", index).entered();

    // Full replace: previous contents are gone before any candidate runs.
    volumes[index].clear_probes();

    let volume = &volumes[index];
    let lattice_bounds = volume.bounds().shrunk_by(volume.min_clearance());

    let mut accepted = Vec::new();
    for local in lattice_points(lattice_bounds, volume.structure(), volume.min_spacing()) {
      summary.candidates += 1;
      let candidate_world = volume.to_world(local);

      if within_reach_of_processed(volumes, &processed, candidate_world) {
        summary.rejected_reach += 1;
        continue;
      }

      match resolver.try_resolve(world, volume, candidate_world)? {
        Some(resolved) => accepted.push(resolved),
        None => summary.rejected_obstructed += 1,
      }
    }

    summary.accepted += accepted.len();
    summary.volumes_processed += 1;

    // Commit before the next volume so its reach test sees this set.
    volumes[index].commit_probes(accepted);
    processed.push(index);
  }

  Ok(())
}

/// Priority descending, then density estimate ascending; stable for full
/// ties so reruns keep a deterministic order.
fn processing_order(volumes: &[ProbeVolume]) -> Vec<usize> {
  let mut order: Vec<usize> = (0..volumes.len()).collect();
  order.sort_by(|&a, &b| {
    volumes[b]
      .priority()
      .cmp(&volumes[a].priority())
      .then_with(|| {
        volumes[a]
          .density_estimate()
          .total_cmp(&volumes[b].density_estimate())
      })
  });
  order
}

/// True when an already-processed volume claims the position: closer to
/// that volume's box surface than half its spacing, measured in the
/// owning volume's local frame.
fn within_reach_of_processed(
  volumes: &[ProbeVolume],
  processed: &[usize],
  world_position: Vec3,
) -> bool {
  processed.iter().any(|&index| {
    let other = &volumes[index];
    other.surface_distance_to(world_position) < other.min_spacing() * 0.5
  })
}

#[cfg(test)]
#[path = "batch_test.rs"]
mod batch_test;
