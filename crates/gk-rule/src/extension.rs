//! Nested polynomial extension and max-min ordering of generators.

use gk_arb::{real_roots, Ball, BigRational, RationalPoly, SturmSequence};
use gk_core::errors::{precision_error, ErrorInfo, GkError};
use gk_family::{apply_moments, WeightFamily};
use num_traits::{One, Signed, Zero};
use serde::{Deserialize, Serialize};

fn extension_error(code: &str, message: &str) -> GkError {
    GkError::Extension(ErrorInfo::new(code, message))
}

/// Product of every polynomial extracted so far, together with its factors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolynomialChain {
    product: RationalPoly,
    factors: Vec<RationalPoly>,
}

impl PolynomialChain {
    /// Starts a chain from the base orthogonal polynomial.
    pub fn start(base: RationalPoly) -> Self {
        Self {
            product: base.clone(),
            factors: vec![base],
        }
    }

    /// Accumulated product polynomial.
    pub fn product(&self) -> &RationalPoly {
        &self.product
    }

    /// Factors in extraction order, base polynomial first.
    pub fn factors(&self) -> &[RationalPoly] {
        &self.factors
    }

    /// Degree of the accumulated product.
    pub fn degree(&self) -> usize {
        self.product.degree().unwrap_or(0)
    }

    /// Consumes the chain and appends `factor`.
    pub fn extend(self, factor: RationalPoly) -> Self {
        let product = &self.product * &factor;
        let mut factors = self.factors;
        factors.push(factor);
        Self { product, factors }
    }
}

/// One attempted extension level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelRecord {
    /// Position in the requested level list.
    pub level: usize,
    /// Degree of the polynomial sought at this level.
    pub degree: usize,
    /// Nonnegative roots appended to the generator list.
    pub roots_kept: usize,
    /// False when no admissible extension existed.
    pub solvable: bool,
    /// Sign check of the level's interpolatory weights; absent when not requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub positive_weights: Option<bool>,
}

/// Acceptance criteria applied on top of root placement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtensionCriteria {
    /// Treat a level as unsolvable when the one-dimensional interpolatory
    /// rule on the accumulated roots has a weight that is not strictly positive.
    pub require_positive_weights: bool,
}

/// Generators gathered across extension levels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorList {
    /// Requested extension degrees.
    pub levels: Vec<usize>,
    /// Working precision of the root enclosures, in bits.
    pub working_prec: u32,
    /// Nonnegative roots, each level's block in max-min order.
    pub generators: Vec<Ball>,
    /// One record per attempted level.
    pub records: Vec<LevelRecord>,
}

impl GeneratorList {
    /// Number of generators.
    pub fn len(&self) -> usize {
        self.generators.len()
    }

    /// True when no generator was produced.
    pub fn is_empty(&self) -> bool {
        self.generators.is_empty()
    }

    /// Generator balls in order.
    pub fn generators(&self) -> &[Ball] {
        &self.generators
    }

    /// Number of levels whose roots were appended.
    pub fn levels_completed(&self) -> usize {
        self.records.iter().filter(|record| record.solvable).count()
    }

    /// True when every requested level was completed.
    pub fn is_complete(&self) -> bool {
        self.levels_completed() == self.levels.len()
    }
}

/// Keeps the nonnegative roots and orders them largest, smallest, largest, ...
///
/// Ties go to the first candidate encountered.
pub fn max_min_sort(roots: &[Ball]) -> Vec<Ball> {
    let mut remaining: Vec<&Ball> = roots
        .iter()
        .filter(|root| root.has_nonnegative_mid())
        .collect();
    let mut ordered = Vec::with_capacity(remaining.len());
    let mut take_largest = true;
    while !remaining.is_empty() {
        let mut best = 0;
        for (index, candidate) in remaining.iter().enumerate().skip(1) {
            let order = candidate.cmp_mid(remaining[best]);
            let better = if take_largest {
                order.is_gt()
            } else {
                order.is_lt()
            };
            if better {
                best = index;
            }
        }
        ordered.push(remaining.remove(best).clone());
        take_largest = !take_largest;
    }
    ordered
}

/// Solves `matrix * x = rhs` exactly; free unknowns are set to zero.
///
/// Returns `None` for inconsistent systems.
fn solve_exact(mut matrix: Vec<Vec<BigRational>>, mut rhs: Vec<BigRational>) -> Option<Vec<BigRational>> {
    let rows = matrix.len();
    let cols = matrix.first().map_or(0, Vec::len);
    let mut pivots = Vec::new();
    let mut row = 0;
    for col in 0..cols {
        let Some(found) = (row..rows).find(|&r| !matrix[r][col].is_zero()) else {
            continue;
        };
        matrix.swap(row, found);
        rhs.swap(row, found);
        let inv = BigRational::one() / &matrix[row][col];
        for entry in matrix[row].iter_mut() {
            *entry *= &inv;
        }
        rhs[row] *= &inv;
        for other in 0..rows {
            if other == row || matrix[other][col].is_zero() {
                continue;
            }
            let factor = matrix[other][col].clone();
            for k in 0..cols {
                let delta = &factor * &matrix[row][k];
                matrix[other][k] -= delta;
            }
            let delta = &factor * &rhs[row];
            rhs[other] -= delta;
        }
        pivots.push((row, col));
        row += 1;
        if row == rows {
            break;
        }
    }
    if (row..rows).any(|r| !rhs[r].is_zero()) {
        return None;
    }
    let mut solution = vec![BigRational::zero(); cols];
    for (r, c) in pivots {
        solution[c] = rhs[r].clone();
    }
    Some(solution)
}

fn roots_inside_support(family: &dyn WeightFamily, poly: &RationalPoly) -> usize {
    let support = family.support();
    let sturm = SturmSequence::new(poly);
    let counted = sturm.count_between(support.lower.as_ref(), support.upper.as_ref());
    // count_between is closed on the right; the support is open.
    let on_upper = support
        .upper
        .as_ref()
        .map_or(0, |upper| usize::from(poly.eval(upper).is_zero()));
    counted - on_upper
}

/// Searches for the monic degree-`degree` extension of `chain`.
///
/// The extension `E` makes `chain * E` orthogonal to every polynomial of
/// degree below `degree` under the family's moment functional. `None` means
/// the level is not solvable: the system is inconsistent, or `E` fails to
/// have `degree` simple real roots inside the support that are disjoint from
/// the chain's roots.
pub fn find_extension(
    family: &dyn WeightFamily,
    chain: &PolynomialChain,
    degree: usize,
) -> Option<RationalPoly> {
    if degree == 0 {
        return None;
    }
    let moments = family.moments(chain.degree() + 2 * degree);
    // Moment of chain * x^i, for i < 2 * degree.
    let shifted: Vec<BigRational> = (0..2 * degree)
        .map(|i| apply_moments(&chain.product().shift(i), &moments))
        .collect::<Option<_>>()?;
    let matrix = (0..degree)
        .map(|k| (0..degree).map(|j| shifted[k + j].clone()).collect())
        .collect();
    let rhs = (0..degree).map(|k| -shifted[k + degree].clone()).collect();
    let mut coeffs = solve_exact(matrix, rhs)?;
    coeffs.push(BigRational::one());
    let extension = RationalPoly::from_coeffs(coeffs);

    let squarefree = extension.gcd(&extension.derivative()).degree() == Some(0);
    let coprime = extension.gcd(chain.product()).degree() == Some(0);
    if !squarefree || !coprime {
        return None;
    }
    if roots_inside_support(family, &extension) != degree {
        return None;
    }
    Some(extension)
}

fn eval_at_ball(poly: &RationalPoly, x: &Ball, prec: u32) -> Ball {
    poly.coeffs().iter().rev().fold(Ball::zero(), |acc, coeff| {
        acc.mul(x, prec).add(&Ball::exact(coeff.clone()), prec)
    })
}

/// Weights of the one-dimensional interpolatory rule on the real roots of
/// `poly`, for the normalised weight: `w_i = L(poly / (x - x_i)) / poly'(x_i)`.
///
/// `poly` must have simple real roots only. Weights follow the increasing
/// order of the roots.
pub fn interpolatory_weights(
    family: &dyn WeightFamily,
    poly: &RationalPoly,
    working_prec: u32,
) -> Result<Vec<Ball>, GkError> {
    let prec = working_prec;
    let degree = poly.degree().unwrap_or(0);
    let moments = family.moments(degree);
    let derivative = poly.derivative();
    let coeffs = poly.coeffs();
    let mut weights = Vec::with_capacity(degree);
    for root in real_roots(poly, prec)? {
        // Synthetic division by (x - root).
        let mut quotient = vec![Ball::zero(); degree];
        let mut carry = Ball::zero();
        for k in (1..=degree).rev() {
            carry = carry.mul(&root, prec).add(&Ball::exact(coeffs[k].clone()), prec);
            quotient[k - 1] = carry.clone();
        }
        let numerator = quotient
            .iter()
            .zip(&moments)
            .filter(|(_, moment)| !moment.is_zero())
            .fold(Ball::zero(), |acc, (coeff, moment)| {
                acc.add(&coeff.mul_rational(moment, prec), prec)
            });
        let slope = eval_at_ball(&derivative, &root, prec);
        let weight = numerator.checked_div(&slope, prec).ok_or_else(|| {
            precision_error("derivative-contains-zero", "derivative at a root encloses zero")
                .with_context("root", root.to_f64())
                .with_context("working_prec", prec)
        })?;
        weights.push(weight);
    }
    Ok(weights)
}

/// True when every interpolatory weight on the roots of `poly` is strictly
/// positive, false when one is provably not.
///
/// Fails with a precision error when a sign cannot be decided.
pub fn has_positive_weights(
    family: &dyn WeightFamily,
    poly: &RationalPoly,
    working_prec: u32,
) -> Result<bool, GkError> {
    let weights = interpolatory_weights(family, poly, working_prec)?;
    if weights.iter().any(|weight| !weight.upper().is_positive()) {
        return Ok(false);
    }
    if let Some(index) = weights.iter().position(|weight| !weight.lower().is_positive()) {
        return Err(
            precision_error("weight-sign-undecided", "interpolatory weight encloses zero")
                .with_context("index", index)
                .with_context("working_prec", working_prec)
                .with_hint("raise the working precision"),
        );
    }
    Ok(true)
}

/// Computes the nested generator list for `levels` at `working_prec` bits,
/// accepting an extension on root placement alone.
pub fn compute_generators(
    family: &dyn WeightFamily,
    levels: &[usize],
    working_prec: u32,
) -> Result<GeneratorList, GkError> {
    compute_generators_with(family, levels, working_prec, ExtensionCriteria::default())
}

/// Computes the nested generator list for `levels` at `working_prec` bits.
///
/// An unsolvable level stops the extension early; the returned list then
/// reports `is_complete() == false`.
pub fn compute_generators_with(
    family: &dyn WeightFamily,
    levels: &[usize],
    working_prec: u32,
    criteria: ExtensionCriteria,
) -> Result<GeneratorList, GkError> {
    let Some((&first, rest)) = levels.split_first() else {
        return Err(extension_error("empty-levels", "at least one extension level is required"));
    };
    if let Some(position) = levels.iter().position(|&level| level == 0) {
        return Err(GkError::Extension(
            ErrorInfo::new("zero-level", "extension levels must be positive")
                .with_context("position", position),
        ));
    }
    if working_prec == 0 {
        return Err(extension_error("zero-precision", "working precision must be positive"));
    }

    let weight_check = |poly: &RationalPoly| -> Result<Option<bool>, GkError> {
        if criteria.require_positive_weights {
            has_positive_weights(family, poly, working_prec).map(Some)
        } else {
            Ok(None)
        }
    };

    let base = family.polynomial(first);
    let positive_weights = weight_check(&base)?;
    if positive_weights == Some(false) {
        return Ok(GeneratorList {
            levels: levels.to_vec(),
            working_prec,
            generators: Vec::new(),
            records: vec![LevelRecord {
                level: 0,
                degree: first,
                roots_kept: 0,
                solvable: false,
                positive_weights,
            }],
        });
    }
    let roots = max_min_sort(&real_roots(&base, working_prec)?);
    let mut records = vec![LevelRecord {
        level: 0,
        degree: first,
        roots_kept: roots.len(),
        solvable: true,
        positive_weights,
    }];
    let mut generators = roots;
    let mut chain = PolynomialChain::start(base);

    for (offset, &degree) in rest.iter().enumerate() {
        let level = offset + 1;
        let Some(extension) = find_extension(family, &chain, degree) else {
            records.push(LevelRecord {
                level,
                degree,
                roots_kept: 0,
                solvable: false,
                positive_weights: None,
            });
            break;
        };
        let positive_weights = weight_check(&(chain.product() * &extension))?;
        if positive_weights == Some(false) {
            records.push(LevelRecord {
                level,
                degree,
                roots_kept: 0,
                solvable: false,
                positive_weights,
            });
            break;
        }
        let roots = max_min_sort(&real_roots(&extension, working_prec)?);
        records.push(LevelRecord {
            level,
            degree,
            roots_kept: roots.len(),
            solvable: true,
            positive_weights,
        });
        generators.extend(roots);
        chain = chain.extend(extension);
    }

    Ok(GeneratorList {
        levels: levels.to_vec(),
        working_prec,
        generators,
        records,
    })
}
