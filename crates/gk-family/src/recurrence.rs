use gk_arb::{BigInt, BigRational, RationalPoly};

fn ratio(numer: i64, denom: i64) -> BigRational {
    BigRational::new(BigInt::from(numer), BigInt::from(denom))
}

/// Three-term recurrence `p_{k+1} = (a_k x + b_k) p_k - c_k p_{k-1}` with `p_0 = 1`.
#[derive(Clone, Copy)]
pub struct Recurrence {
    step: fn(i64) -> (BigRational, BigRational, BigRational),
}

impl std::fmt::Debug for Recurrence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Recurrence").finish_non_exhaustive()
    }
}

impl Recurrence {
    /// Builds a recurrence from its coefficient function `k -> (a_k, b_k, c_k)`.
    pub fn new(step: fn(i64) -> (BigRational, BigRational, BigRational)) -> Self {
        Self { step }
    }

    /// Probabilists' Hermite: `He_{k+1} = x He_k - k He_{k-1}`.
    pub fn hermite_pro() -> Self {
        Self::new(|k| (ratio(1, 1), ratio(0, 1), ratio(k, 1)))
    }

    /// Physicists' Hermite: `H_{k+1} = 2x H_k - 2k H_{k-1}`.
    pub fn hermite_phys() -> Self {
        Self::new(|k| (ratio(2, 1), ratio(0, 1), ratio(2 * k, 1)))
    }

    /// Legendre: `(k+1) P_{k+1} = (2k+1) x P_k - k P_{k-1}`.
    pub fn legendre() -> Self {
        Self::new(|k| (ratio(2 * k + 1, k + 1), ratio(0, 1), ratio(k, k + 1)))
    }

    /// Laguerre: `(k+1) L_{k+1} = (2k+1-x) L_k - k L_{k-1}`.
    pub fn laguerre() -> Self {
        Self::new(|k| (ratio(-1, k + 1), ratio(2 * k + 1, k + 1), ratio(k, k + 1)))
    }

    /// Chebyshev, first kind: `T_1 = x`, `T_{k+1} = 2x T_k - T_{k-1}`.
    pub fn chebyshev_t() -> Self {
        Self::new(|k| {
            let a = if k == 0 { 1 } else { 2 };
            (ratio(a, 1), ratio(0, 1), ratio(1, 1))
        })
    }

    /// Chebyshev, second kind: `U_1 = 2x`, `U_{k+1} = 2x U_k - U_{k-1}`.
    pub fn chebyshev_u() -> Self {
        Self::new(|_| (ratio(2, 1), ratio(0, 1), ratio(1, 1)))
    }

    /// Degree-`n` member of the family.
    pub fn polynomial(&self, n: usize) -> RationalPoly {
        let mut previous = RationalPoly::zero();
        let mut current = RationalPoly::one();
        for k in 0..n as i64 {
            let (a, b, c) = (self.step)(k);
            let linear = RationalPoly::from_coeffs(vec![b, a]);
            let next = &(&linear * &current) - &previous.scale(&c);
            previous = current;
            current = next;
        }
        current
    }
}
