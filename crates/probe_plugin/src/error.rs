//! Error taxonomy for probe placement.
//!
//! Only caller bugs surface as errors. A candidate that cannot be placed
//! (blocked by geometry, pushed out of bounds, or claimed by a neighboring
//! volume) is reported as an absent result, never as an `Err`.

use thiserror::Error;

/// Fatal caller errors.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ProbeError {
  /// An empty bias sequence was supplied where at least one bias is
  /// required. Rejected where the sequence is set, not at use.
  #[error("iteration bias sequence must contain at least one bias")]
  EmptyBiasSequence,

  /// A resolve was attempted after the resolver scope was released.
  #[error("collision resolver used after its scope was released")]
  ResolverReleased,
}
