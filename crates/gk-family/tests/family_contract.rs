use gk_arb::{BigInt, BigRational, SturmSequence};
use gk_family::{Family, WeightFamily};

#[test]
fn polynomials_have_all_roots_inside_support() {
    for family in Family::ALL {
        let support = family.support();
        for n in 1..=8 {
            let p = family.polynomial(n);
            assert_eq!(p.degree(), Some(n));
            let sturm = SturmSequence::new(&p);
            assert_eq!(sturm.count_real(), n, "{family} degree {n}");
            let inside = sturm.count_between(support.lower.as_ref(), support.upper.as_ref());
            let on_upper = support
                .upper
                .as_ref()
                .map_or(0, |hi| usize::from(p.eval(hi) == BigRational::from_integer(BigInt::from(0))));
            assert_eq!(inside - on_upper, n, "{family} degree {n}");
        }
    }
}

#[test]
fn transcendental_factors_match_known_masses() {
    let expected = [
        (Family::HermitePro, (2.0 * std::f64::consts::PI).sqrt()),
        (Family::HermitePhys, std::f64::consts::PI.sqrt()),
        (Family::Legendre, 2.0),
        (Family::Laguerre, 1.0),
        (Family::ChebyshevT, std::f64::consts::PI),
        (Family::ChebyshevU, std::f64::consts::FRAC_PI_2),
    ];
    for (family, mass) in expected {
        let factor = family.transcendental_factor(96);
        assert!(factor.radius_below(90), "{family}");
        assert!(!factor.contains_zero(), "{family}");
        assert!((factor.to_f64() - mass).abs() < 1e-14, "{family}");
    }
}

#[test]
fn family_is_selected_through_configuration_strings() {
    let family: Family = serde_yaml::from_str("chebyshev-u").expect("yaml");
    assert_eq!(family, Family::ChebyshevU);
    let json = serde_json::to_string(&Family::HermitePhys).expect("json");
    assert_eq!(json, "\"hermite-phys\"");
    assert!(!Family::Laguerre.is_symmetric());
    assert!(Family::Legendre.is_symmetric());
}
