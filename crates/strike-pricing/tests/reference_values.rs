//! Integration tests against textbook reference values.
//!
//! The canonical case is S = K = 100, T = 1, r = 5%, σ = 20%, q = 0.

use approx::assert_abs_diff_eq;
use strike_core::prelude::*;
use strike_pricing::lattice::{BinomialLattice, TreeLayout};
use strike_pricing::prelude::*;

fn reference_market() -> MarketParameters {
    MarketParameters::new(100.0, 0.05, 0.0)
        .unwrap()
        .with_volatility(0.2)
        .unwrap()
}

fn option(option_type: OptionType, style: OptionStyle) -> VanillaOption {
    VanillaOption::new(option_type, style, 100.0, 1.0).unwrap()
}

#[test]
fn analytic_call_and_put() {
    let m = reference_market();
    let call = BlackScholes
        .valuation(&option(OptionType::Call, OptionStyle::European), &m)
        .unwrap()
        .rounded();
    let put = BlackScholes
        .valuation(&option(OptionType::Put, OptionStyle::European), &m)
        .unwrap()
        .rounded();

    assert_eq!(call.price, 10.4506);
    assert_eq!(call.greeks.unwrap().delta, 0.6368);
    assert_eq!(put.price, 5.5735);
    assert_eq!(put.greeks.unwrap().delta, -0.3632);
}

#[test]
fn european_lattice_converges_to_analytic() {
    let m = reference_market();
    let lattice = BinomialLattice::new(500).unwrap();

    for option_type in [OptionType::Call, OptionType::Put] {
        let euro = option(option_type, OptionStyle::European);
        let analytic = BlackScholes.price(&euro, &m).unwrap();
        let tree = lattice.price(&euro, &m).unwrap();
        assert_abs_diff_eq!(tree, analytic, epsilon = 0.01);
    }
}

#[test]
fn lattice_error_shrinks_with_steps() {
    let m = reference_market();
    let call = option(OptionType::Call, OptionStyle::European);
    let analytic = BlackScholes.price(&call, &m).unwrap();

    let coarse = BinomialLattice::new(20).unwrap().price(&call, &m).unwrap();
    let fine = BinomialLattice::new(2000).unwrap().price(&call, &m).unwrap();

    assert!((fine - analytic).abs() < (coarse - analytic).abs());
    assert_abs_diff_eq!(fine, analytic, epsilon = 0.002);
}

#[test]
fn american_put_exceeds_european_put() {
    let m = reference_market();
    let american = option(OptionType::Put, OptionStyle::American);

    let lattice = BinomialLattice::new(100)
        .unwrap()
        .with_layout(TreeLayout::Recombining);
    let price = lattice.report(&american.into(), &m).unwrap().price;

    // Widely published CRR value is about 6.08
    assert!(price >= 5.5735);
    assert_abs_diff_eq!(price, 6.08, epsilon = 0.02);
}

#[test]
fn american_call_without_dividends_has_no_early_exercise() {
    let m = reference_market();
    let lattice = BinomialLattice::new(200)
        .unwrap()
        .with_layout(TreeLayout::Recombining);

    let euro = lattice
        .price(&option(OptionType::Call, OptionStyle::European), &m)
        .unwrap();
    let amer = lattice
        .price(&option(OptionType::Call, OptionStyle::American), &m)
        .unwrap();

    assert_abs_diff_eq!(amer, euro, epsilon = 1e-9);
}

#[test]
fn non_recombining_tree_at_its_limit() {
    let m = reference_market();
    let american = option(OptionType::Put, OptionStyle::American);

    let full = BinomialLattice::new(20).unwrap();
    let recombining = full.with_layout(TreeLayout::Recombining);

    assert_abs_diff_eq!(
        full.price(&american, &m).unwrap(),
        recombining.price(&american, &m).unwrap(),
        epsilon = 1e-8
    );
}

#[test]
fn pricers_share_one_interface() {
    let m = reference_market();
    let instrument: Instrument = option(OptionType::Call, OptionStyle::European).into();
    let lattice = BinomialLattice::new(1000).unwrap();
    let pricers: [&dyn OptionPricer; 2] = [&BlackScholes, &lattice];

    let prices: Vec<f64> = pricers
        .iter()
        .map(|p| p.value(&instrument, &m).unwrap().price)
        .collect();

    assert_abs_diff_eq!(prices[0], prices[1], epsilon = 0.01);
}

#[test]
fn warrant_haircut() {
    let m = reference_market();
    let call = option(OptionType::Call, OptionStyle::European);

    let warrant = BlackScholes.warrant_price(&call, &m, 9_000.0, 1_000.0).unwrap();
    assert_abs_diff_eq!(warrant, 10.450_583_572 * 0.9, epsilon = 1e-8);
}
