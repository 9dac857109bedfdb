//! probe_plugin - Framework/engine independent light probe placement
//!
//! This crate computes collision-free, spatially well-distributed probe
//! positions inside oriented box volumes. Candidates are generated on a
//! cubic or body-centered-cubic lattice, pushed out of solid geometry by
//! an iterative penetration solver, and kept from clustering at the
//! boundaries between neighboring volumes.
//!
//! # Features
//!
//! - **Lattice generation**: simple-cubic and body-centered-cubic
//!   candidate grids with a guaranteed minimum spacing
//! - **Collision resolution**: damped penetration-vector relaxation that
//!   nudges blocked candidates into clear space
//! - **Multi-volume batches**: volumes processed in priority/density
//!   order so neighbors never place competing probes
//! - **Backend-agnostic**: collision queries live behind the
//!   [`CollisionWorld`] trait; an analytic sphere/box backend ships for
//!   tests and tools
//!
//! # Example
//!
//! ```ignore
//! use probe_plugin::{regenerate_probes, AnalyticWorld, BatchOptions, ProbeVolume};
//!
//! let mut volumes = vec![ProbeVolume::new()];
//! let world = AnalyticWorld::new();
//!
//! let summary = regenerate_probes(&mut volumes, &world, &BatchOptions::default())?;
//! println!("placed {} probes", summary.accepted);
//! # Ok::<(), probe_plugin::ProbeError>(())
//! ```

pub mod bounds;
pub mod error;

// Re-export commonly used items
pub use bounds::Bounds3;
pub use error::ProbeError;

// Lattice candidate generation
pub mod lattice;
pub use lattice::{lattice_points, LatticePoints, LatticeStructure};

// Collision-query boundary supplied by the host
pub mod collision;
pub use collision::{ColliderId, CollisionWorld, LayerMask, Penetration, ProbeSphere};

// Analytic backend for tests and debugging
pub mod analytic;
pub use analytic::{AnalyticWorld, ObstacleShape};

// Placement volumes and their committed probe sets
pub mod volume;
pub use volume::{ProbeVolume, DEFAULT_ITERATION_BIASES};

// Iterative collision resolution
pub mod resolver;
pub use resolver::{CollisionResolver, DEFAULT_MAX_OVERLAPS};

// Multi-volume batch orchestration
pub mod batch;
pub use batch::{regenerate_probes, BatchOptions, BatchSummary};

// Engine-agnostic metrics collection
pub mod metrics;
