#![deny(missing_docs)]
#![doc = "Rigorous ball arithmetic, exact rational polynomials and real root isolation used by the quadrature pipeline."]

pub mod ball;
pub mod dyadic;
pub mod poly;
pub mod roots;

pub use ball::Ball;
pub use dyadic::pow2;
pub use poly::{BallPoly, RationalPoly};
pub use roots::{real_roots, root_bound, SturmSequence};

/// Re-exported big-number types so downstream crates share one version.
pub use num_bigint::BigInt;
pub use num_rational::BigRational;
