use gk_arb::{Ball, BigInt, BigRational};
use gk_family::Family;
use gk_rule::{compute_generators, compute_generators_with, max_min_sort, ExtensionCriteria};
use proptest::prelude::*;

#[test]
fn hermite_nine_point_generators() {
    let list = compute_generators(&Family::HermitePro, &[1, 2, 6], 96).expect("generators");
    assert!(list.is_complete());
    assert_eq!(list.levels_completed(), 3);
    let expected = [0.0, 1.7320508, 4.1849560, 0.7410953, 2.8612796];
    assert_eq!(list.len(), expected.len());
    for (ball, value) in list.generators().iter().zip(expected) {
        assert!((ball.to_f64() - value).abs() < 1e-7, "{ball} vs {value}");
        assert!(ball.radius_below(96));
    }
    let kept: Vec<usize> = list.records.iter().map(|r| r.roots_kept).collect();
    assert_eq!(kept, vec![1, 1, 3]);
}

#[test]
fn hermite_thirty_five_point_sequence_completes() {
    let list = compute_generators(&Family::HermitePro, &[1, 2, 6, 10, 16], 128).expect("generators");
    assert!(list.is_complete());
    assert_eq!(list.len(), 18);
    assert!((list.generators()[5].to_f64() - 6.3633945).abs() < 1e-6);
    assert!((list.generators()[10].to_f64() - 9.0169398).abs() < 1e-6);
}

#[test]
fn inconsistent_extension_terminates_early() {
    let list = compute_generators(&Family::HermitePro, &[1, 1], 64).expect("generators");
    assert!(!list.is_complete());
    assert_eq!(list.levels_completed(), 1);
    assert_eq!(list.len(), 1);
    assert!(!list.records[1].solvable);

    let list = compute_generators(&Family::HermitePro, &[1, 2, 2, 6], 64).expect("generators");
    assert_eq!(list.levels_completed(), 2);
    assert_eq!(list.records.len(), 3);
    assert_eq!(list.len(), 2);
}

#[test]
fn positive_weight_criterion_stops_before_the_nineteen_point_level() {
    let criteria = ExtensionCriteria {
        require_positive_weights: true,
    };
    let list = compute_generators_with(&Family::HermitePro, &[1, 2, 6, 10, 16], 128, criteria)
        .expect("generators");
    assert!(!list.is_complete());
    assert_eq!(list.records.len(), 4);
    assert_eq!(list.len(), 5);
    assert!(list.records[..3].iter().all(|r| r.solvable && r.positive_weights == Some(true)));
    assert!(!list.records[3].solvable);
    assert_eq!(list.records[3].positive_weights, Some(false));

    let unchecked = compute_generators(&Family::HermitePro, &[1, 2, 6, 10], 128).expect("generators");
    assert!(unchecked.is_complete());
    assert!(unchecked.records.iter().all(|r| r.positive_weights.is_none()));
}

#[test]
fn patterson_legendre_sequence_keeps_positive_weights() {
    let criteria = ExtensionCriteria {
        require_positive_weights: true,
    };
    let list = compute_generators_with(&Family::Legendre, &[1, 2, 4, 8], 128, criteria).expect("generators");
    assert!(list.is_complete());
    assert!(list.records.iter().all(|r| r.positive_weights == Some(true)));
}

#[test]
fn malformed_levels_are_errors() {
    let family = Family::Legendre;
    assert_eq!(compute_generators(&family, &[], 64).unwrap_err().code(), "empty-levels");
    assert_eq!(compute_generators(&family, &[1, 0], 64).unwrap_err().code(), "zero-level");
    assert_eq!(compute_generators(&family, &[1], 0).unwrap_err().code(), "zero-precision");
}

#[test]
fn higher_precision_tightens_generators() {
    let coarse = compute_generators(&Family::Legendre, &[1, 2, 4], 64).expect("coarse");
    let fine = compute_generators(&Family::Legendre, &[1, 2, 4], 160).expect("fine");
    assert_eq!(coarse.len(), fine.len());
    for (a, b) in coarse.generators().iter().zip(fine.generators()) {
        assert!(b.rad() <= a.rad());
        assert!(a.overlaps(b));
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn never_completes_more_than_requested(
        levels in proptest::collection::vec(1usize..4, 1..4),
        legendre in any::<bool>(),
    ) {
        let family = if legendre { Family::Legendre } else { Family::HermitePro };
        let list = compute_generators(&family, &levels, 64).unwrap();
        prop_assert!(list.levels_completed() <= levels.len());
        prop_assert!(list.records.len() <= levels.len());
        let kept: usize = list.records.iter().map(|r| r.roots_kept).sum();
        prop_assert_eq!(kept, list.len());
        prop_assert!(list.generators().iter().all(Ball::has_nonnegative_mid));
        if !list.is_complete() {
            prop_assert!(!list.records.last().unwrap().solvable);
        }
    }

    #[test]
    fn max_min_order_is_a_fixed_point(mids in proptest::collection::vec(0i64..6, 0..9)) {
        let roots: Vec<Ball> = mids
            .iter()
            .enumerate()
            .map(|(i, &m)| {
                Ball::with_radius(
                    BigRational::from_integer(BigInt::from(m)),
                    BigRational::new(BigInt::from(i as i64), BigInt::from(1024)),
                )
            })
            .collect();
        let sorted = max_min_sort(&roots);
        prop_assert_eq!(max_min_sort(&sorted), sorted);
    }
}
