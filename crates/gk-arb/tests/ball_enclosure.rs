use gk_arb::{Ball, BigInt, BigRational};
use proptest::prelude::*;

fn q(n: i64, d: i64) -> BigRational {
    BigRational::new(BigInt::from(n), BigInt::from(d))
}

proptest! {
    #[test]
    fn operations_enclose_exact_rational_results(
        a in -1000i64..1000,
        b in 1i64..1000,
        c in -1000i64..1000,
        d in 1i64..1000,
        prec in 8u32..96,
    ) {
        let x = q(a, b);
        let y = q(c, d);
        let bx = Ball::from_rational(&x, prec);
        let by = Ball::from_rational(&y, prec);
        prop_assert!(bx.add(&by, prec).contains(&(&x + &y)));
        prop_assert!(bx.sub(&by, prec).contains(&(&x - &y)));
        prop_assert!(bx.mul(&by, prec).contains(&(&x * &y)));
        if let Some(quotient) = bx.checked_div(&by, prec) {
            prop_assert!(quotient.contains(&(&x / &y)));
        }
    }

    #[test]
    fn accuracy_threshold_is_monotone(a in -1000i64..1000, b in 1i64..1000, prec in 4u32..80, looser in 0u32..4) {
        let ball = Ball::from_rational(&q(a, b), prec);
        if ball.radius_below(prec) {
            prop_assert!(ball.radius_below(prec.saturating_sub(looser)));
        }
    }
}

#[test]
fn higher_precision_never_widens_a_square() {
    let third = q(1, 3);
    let low = Ball::from_rational(&third, 40).pow_u32(2, 40);
    let high = Ball::from_rational(&third, 120).pow_u32(2, 120);
    assert!(high.rad() <= low.rad());
    assert!(high.contains(&q(1, 9)));
}
