use glam::{Affine3A, Vec3};

use super::*;
use crate::analytic::AnalyticWorld;
use crate::bounds::Bounds3;

/// The stock volume: a 10x6x10 box, spacing 4, clearance 0.5. Its shrunk
/// lattice box is 9x5x9, giving a 3x2x3 grid of 18 candidates.
fn stock_volume() -> ProbeVolume {
  ProbeVolume::new()
}

#[test]
fn open_scene_places_the_full_grid() {
  let world = AnalyticWorld::new();
  let mut volumes = vec![stock_volume()];

  let summary = regenerate_probes(&mut volumes, &world, &BatchOptions::default()).unwrap();

  assert_eq!(summary.volumes_processed, 1);
  assert_eq!(summary.candidates, 18);
  assert_eq!(summary.accepted, 18);
  assert_eq!(summary.rejected_reach, 0);
  assert_eq!(summary.rejected_obstructed, 0);

  let volume = &volumes[0];
  assert_eq!(volume.probes().len(), 18);

  // Every probe sits inside the clearance-shrunk box.
  let lattice_bounds = volume.bounds().shrunk_by(volume.min_clearance());
  for probe in volume.probes() {
    assert!(lattice_bounds.surface_distance(*probe) <= 1e-5);
  }
}

#[test]
fn centered_obstacle_drops_exactly_one_probe() {
  let mut world = AnalyticWorld::new();
  // Solid sphere dead on the middle candidate (0, 0.5, 0), larger than
  // the clearance radius. Penetration has no separation axis there, so
  // the candidate cannot be moved and is dropped.
  world.add_sphere(Vec3::new(0.0, 0.5, 0.0), 1.0);

  let mut volumes = vec![stock_volume()];
  let summary = regenerate_probes(&mut volumes, &world, &BatchOptions::default()).unwrap();

  assert_eq!(summary.accepted, 17);
  assert_eq!(summary.rejected_obstructed, 1);
  assert_eq!(volumes[0].probes().len(), 17);
}

#[test]
fn offset_obstacle_relocates_the_blocked_probe() {
  let mut world = AnalyticWorld::new();
  // Just off the middle candidate: the bias schedule walks the probe to
  // x = -0.7, clear of the obstacle but still inside the box.
  world.add_sphere(Vec3::new(0.3, 0.5, 0.0), 0.5);

  let mut volumes = vec![stock_volume()];
  let summary = regenerate_probes(&mut volumes, &world, &BatchOptions::default()).unwrap();

  assert_eq!(summary.accepted, 18);
  assert_eq!(volumes[0].probes().len(), 18);

  let relocated = Vec3::new(-0.7, 0.5, 0.0);
  assert!(
    volumes[0].probes().iter().any(|p| (*p - relocated).length() < 1e-3),
    "expected a probe relocated to {relocated:?}"
  );
}

#[test]
fn regeneration_replaces_instead_of_merging() {
  let mut volumes = vec![stock_volume()];

  let empty = AnalyticWorld::new();
  regenerate_probes(&mut volumes, &empty, &BatchOptions::default()).unwrap();
  assert_eq!(volumes[0].probes().len(), 18);

  let mut blocked = AnalyticWorld::new();
  blocked.add_sphere(Vec3::new(0.0, 0.5, 0.0), 1.0);
  regenerate_probes(&mut volumes, &blocked, &BatchOptions::default()).unwrap();
  assert_eq!(volumes[0].probes().len(), 17);
}

#[test]
fn empty_layer_mask_accepts_everything() {
  let mut world = AnalyticWorld::new();
  world.add_sphere(Vec3::new(0.0, 3.0, 0.0), 50.0);

  let mut volumes = vec![stock_volume().with_collision_layers(0)];
  let summary = regenerate_probes(&mut volumes, &world, &BatchOptions::default()).unwrap();

  assert_eq!(summary.accepted, 18);
}

#[test]
fn fully_buried_volume_completes_with_an_empty_set() {
  let mut world = AnalyticWorld::new();
  // The obstacle swallows the whole volume; every candidate either stays
  // blocked or is pushed outside the constrained bounds.
  world.add_box(Bounds3::new(Vec3::new(0.0, 3.0, 0.0), Vec3::splat(30.0)));

  let mut volumes = vec![stock_volume()];
  let summary = regenerate_probes(&mut volumes, &world, &BatchOptions::default()).unwrap();

  assert_eq!(summary.volumes_processed, 1);
  assert_eq!(summary.accepted, 0);
  assert_eq!(summary.rejected_obstructed, 18);
  assert!(volumes[0].probes().is_empty());
}

#[test]
fn adjacent_volumes_keep_half_spacing_from_the_shared_face() {
  let world = AnalyticWorld::new();

  // Two identical boxes sharing the face at world x = 5.
  let first = stock_volume();
  let second = stock_volume().with_transform(Affine3A::from_translation(Vec3::new(10.0, 0.0, 0.0)));
  let mut volumes = vec![first, second];

  let summary = regenerate_probes(&mut volumes, &world, &BatchOptions::default()).unwrap();

  // The first-processed volume keeps its full grid; the second loses its
  // whole candidate plane next to the shared face.
  assert_eq!(volumes[0].probes().len(), 18);
  assert_eq!(volumes[1].probes().len(), 12);
  assert_eq!(summary.rejected_reach, 6);

  let reach = volumes[0].min_spacing() * 0.5;
  for probe in volumes[1].probes() {
    let world_position = volumes[1].to_world(*probe);
    assert!(
      volumes[0].surface_distance_to(world_position) >= reach - 1e-3,
      "probe {world_position:?} landed inside the neighbor's reach"
    );
  }

  // No two probes from different volumes end up closer than s/2.
  for a in volumes[0].probes() {
    let a_world = volumes[0].to_world(*a);
    for b in volumes[1].probes() {
      let b_world = volumes[1].to_world(*b);
      assert!((a_world - b_world).length() >= reach - 1e-3);
    }
  }
}

#[test]
fn priority_overrides_input_and_density_order() {
  let world = AnalyticWorld::new();

  let first = stock_volume();
  let second = stock_volume()
    .with_transform(Affine3A::from_translation(Vec3::new(10.0, 0.0, 0.0)))
    .with_priority(10);
  let mut volumes = vec![first, second];

  regenerate_probes(&mut volumes, &world, &BatchOptions::default()).unwrap();

  // The high-priority volume went first and kept its full grid; the
  // other gave up the plane near the shared face.
  assert_eq!(volumes[1].probes().len(), 18);
  assert_eq!(volumes[0].probes().len(), 12);
}

#[test]
fn density_breaks_ties_sparser_first() {
  let world = AnalyticWorld::new();

  // Same box and priority, but the first-listed volume is denser, so the
  // sparser one is processed first and claims the shared space.
  let dense = stock_volume().with_min_spacing(2.0);
  let sparse = stock_volume();
  let mut volumes = vec![dense, sparse];

  regenerate_probes(&mut volumes, &world, &BatchOptions::default()).unwrap();

  assert_eq!(volumes[1].probes().len(), 18);
  // Every candidate of the dense volume lies within the sparse volume's
  // reach, so nothing is left for it.
  assert!(volumes[0].probes().is_empty());
}

#[test]
fn summary_counts_are_consistent() {
  let mut world = AnalyticWorld::new();
  world.add_sphere(Vec3::new(0.0, 0.5, 0.0), 1.0);

  let first = stock_volume();
  let second = stock_volume().with_transform(Affine3A::from_translation(Vec3::new(10.0, 0.0, 0.0)));
  let mut volumes = vec![first, second];

  let summary = regenerate_probes(&mut volumes, &world, &BatchOptions::default()).unwrap();

  assert_eq!(summary.volumes_processed, 2);
  assert_eq!(summary.candidates, 36);
  assert_eq!(
    summary.accepted + summary.rejected_reach + summary.rejected_obstructed,
    summary.candidates
  );
  assert_eq!(
    summary.accepted,
    volumes.iter().map(|v| v.probes().len()).sum::<usize>()
  );
}
