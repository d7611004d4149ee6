#![deny(missing_docs)]
#![doc = "Lazy, duplicate-free enumerators over integer partitions, multiset permutations and lattice points."]

/// Compositions of an integer into a fixed number of nonnegative parts.
pub mod lattice;
/// Non-increasing partitions with a fixed number of parts.
pub mod partitions;
/// Distinct orderings of a multiset.
pub mod permutations;

pub use lattice::LatticePoints;
pub use partitions::Partitions;
pub use permutations::Permutations;
