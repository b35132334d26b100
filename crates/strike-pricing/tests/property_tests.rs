//! Property-based tests for pricing invariants.
//!
//! These tests verify relationships that must hold for any valid input:
//! - Put-call parity for the analytic price
//! - Greek signs and delta bounds
//! - American lattice value never below European lattice value
//! - Implied volatility recovers the price it was solved from

use proptest::prelude::*;
use strike_core::prelude::*;
use strike_pricing::lattice::{BinomialLattice, TreeLayout};
use strike_pricing::prelude::*;

// =============================================================================
// GENERATORS
// =============================================================================

fn market(spot: f64, rate: f64, dividend: f64, vol: f64) -> MarketParameters {
    MarketParameters::new(spot, rate, dividend)
        .unwrap()
        .with_volatility(vol)
        .unwrap()
}

fn european(option_type: OptionType, strike: f64, expiry: f64) -> VanillaOption {
    VanillaOption::new(option_type, OptionStyle::European, strike, expiry).unwrap()
}

// =============================================================================
// ANALYTIC PRICER
// =============================================================================

proptest! {
    #[test]
    fn prop_put_call_parity(
        spot in 50.0f64..150.0,
        strike in 50.0f64..150.0,
        expiry in 0.05f64..3.0,
        rate in 0.0f64..0.10,
        dividend in 0.0f64..0.05,
        vol in 0.05f64..1.0,
    ) {
        let m = market(spot, rate, dividend, vol);
        let call = BlackScholes.price(&european(OptionType::Call, strike, expiry), &m).unwrap();
        let put = BlackScholes.price(&european(OptionType::Put, strike, expiry), &m).unwrap();

        let parity = spot * (-dividend * expiry).exp() - strike * (-rate * expiry).exp();
        prop_assert!((call - put - parity).abs() < 1e-3);
    }

    #[test]
    fn prop_greek_signs(
        spot in 50.0f64..150.0,
        strike in 50.0f64..150.0,
        expiry in 0.05f64..3.0,
        rate in 0.0f64..0.10,
        dividend in 0.0f64..0.05,
        vol in 0.05f64..1.0,
    ) {
        let m = market(spot, rate, dividend, vol);
        let call = BlackScholes.greeks(&european(OptionType::Call, strike, expiry), &m).unwrap();
        let put = BlackScholes.greeks(&european(OptionType::Put, strike, expiry), &m).unwrap();

        prop_assert!((0.0..=1.0).contains(&call.delta));
        prop_assert!((-1.0..=0.0).contains(&put.delta));
        prop_assert!(call.gamma >= 0.0 && put.gamma >= 0.0);
        prop_assert!(call.vega >= 0.0 && put.vega >= 0.0);
        prop_assert!(call.rho >= 0.0 && put.rho <= 0.0);
    }

    #[test]
    fn prop_implied_vol_round_trip(
        moneyness in 0.8f64..1.25,
        expiry in 0.25f64..2.0,
        rate in 0.0f64..0.08,
        vol in 0.05f64..1.0,
        is_call in any::<bool>(),
    ) {
        let option_type = if is_call { OptionType::Call } else { OptionType::Put };
        let option = european(option_type, 100.0 * moneyness, expiry);
        let m = market(100.0, rate, 0.0, vol);

        let target = BlackScholes.price(&option, &m).unwrap();
        let pv_strike = option.strike_price() * (-rate * expiry).exp();
        let floor = match option_type {
            OptionType::Call => (100.0 - pv_strike).max(0.0),
            OptionType::Put => (pv_strike - 100.0).max(0.0),
        };
        prop_assume!(target - floor > 1e-6);

        let solved = implied_volatility(&option, &m.without_volatility(), target).unwrap();
        prop_assert!(solved > 0.0);

        let repriced = BlackScholes
            .price(&option, &m.with_volatility(solved).unwrap())
            .unwrap();
        prop_assert!((repriced - target).abs() < 1e-5);
    }
}

// =============================================================================
// LATTICE
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_american_at_least_european(
        spot in 70.0f64..130.0,
        expiry in 0.1f64..2.0,
        rate in 0.0f64..0.08,
        dividend in 0.0f64..0.04,
        vol in 0.1f64..0.6,
        is_call in any::<bool>(),
    ) {
        let option_type = if is_call { OptionType::Call } else { OptionType::Put };
        let option = european(option_type, 100.0, expiry);
        let m = market(spot, rate, dividend, vol);
        let lattice = BinomialLattice::new(60)
            .unwrap()
            .with_layout(TreeLayout::Recombining);

        let euro = lattice.price(&option, &m).unwrap();
        let amer = lattice
            .price(&option.with_style(OptionStyle::American), &m)
            .unwrap();

        prop_assert!(amer >= euro - 1e-10);
    }

    #[test]
    fn prop_american_at_least_european_on_flat_tree(
        spot in 70.0f64..130.0,
        expiry in 0.1f64..2.0,
        rate in 0.0f64..0.08,
        dividend in 0.0f64..0.04,
        vol in 0.1f64..0.6,
        steps in 4usize..=12,
        is_call in any::<bool>(),
    ) {
        let option_type = if is_call { OptionType::Call } else { OptionType::Put };
        let option = european(option_type, 100.0, expiry);
        let m = market(spot, rate, dividend, vol);
        let lattice = BinomialLattice::new(steps).unwrap();
        prop_assert_eq!(lattice.layout(), TreeLayout::NonRecombining);

        let euro = lattice.price(&option, &m).unwrap();
        let amer = lattice
            .price(&option.with_style(OptionStyle::American), &m)
            .unwrap();

        prop_assert!(amer >= euro - 1e-9);
    }

    #[test]
    fn prop_lattice_layouts_identical(
        spot in 80.0f64..120.0,
        rate in 0.0f64..0.08,
        vol in 0.1f64..0.5,
        steps in 1usize..12,
    ) {
        let put = VanillaOption::new(OptionType::Put, OptionStyle::American, 100.0, 1.0).unwrap();
        let m = market(spot, rate, 0.0, vol);
        let lattice = BinomialLattice::new(steps).unwrap();

        let full = lattice.price(&put, &m).unwrap();
        let recombining = lattice
            .with_layout(TreeLayout::Recombining)
            .price(&put, &m)
            .unwrap();

        prop_assert!((full - recombining).abs() < 1e-9);
    }
}
