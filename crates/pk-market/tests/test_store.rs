//! Store lifecycle tests: creation, replacement, case folding, and queries.

use approx::assert_abs_diff_eq;
use pk_market::{MarketStore, VolValueType, YcValueType};

#[test]
fn spot_rate_curve_prices_discounts() {
    let store = MarketStore::new();
    store
        .yc_create("USD", &[1.0, 2.0, 5.0], &[0.05, 0.045, 0.04], YcValueType::SpotRates)
        .unwrap();

    assert_abs_diff_eq!(store.discount("USD", 0.0).unwrap(), 1.0, epsilon = 0.0);
    assert_abs_diff_eq!(
        store.discount("USD", 2.0).unwrap(),
        (-0.045 * 2.0_f64).exp(),
        epsilon = 1e-14
    );
}

#[test]
fn names_are_case_insensitive() {
    let store = MarketStore::new();
    store
        .yc_create("USD", &[1.0], &[0.05], YcValueType::SpotRates)
        .unwrap();

    assert!(store.discount("usd", 1.0).is_ok());
    assert!(store.discount("Usd", 1.0).is_ok());
}

#[test]
fn same_folded_name_replaces() {
    let store = MarketStore::new();
    store
        .yc_create("USD", &[1.0], &[0.05], YcValueType::SpotRates)
        .unwrap();
    store
        .yc_create("usd", &[1.0], &[0.10], YcValueType::SpotRates)
        .unwrap();

    let list = store.list();
    assert_eq!(list.yield_curves.len(), 1, "only one entry may survive");
    // The replacement curve answers the queries.
    assert_abs_diff_eq!(store.spot_rate("USD", 1.0).unwrap(), 0.10, epsilon = 1e-14);
}

#[test]
fn fwd_rate_matches_log_discount_identity() {
    let store = MarketStore::new();
    store
        .yc_create("EUR", &[0.5, 1.0, 3.0, 7.0], &[0.02, 0.025, 0.03, 0.028], YcValueType::SpotRates)
        .unwrap();

    let (t1, t2) = (1.0, 3.0);
    let expected = (store.discount("EUR", t1).unwrap().ln()
        - store.discount("EUR", t2).unwrap().ln())
        / (t2 - t1);
    assert_abs_diff_eq!(store.fwd_rate("EUR", t1, t2).unwrap(), expected, epsilon = 1e-12);
}

#[test]
fn curves_and_vols_are_independent_namespaces() {
    let store = MarketStore::new();
    store
        .yc_create("USD", &[1.0], &[0.05], YcValueType::SpotRates)
        .unwrap();
    store
        .vol_create("USD", &[1.0, 2.0], &[0.20, 0.22], VolValueType::SpotVols)
        .unwrap();

    let list = store.list();
    assert_eq!(list.yield_curves, vec!["USD".to_string()]);
    assert_eq!(list.volatilities, vec!["USD".to_string()]);
    assert_abs_diff_eq!(store.spot_vol("usd", 2.0).unwrap(), 0.22, epsilon = 1e-14);
}

#[test]
fn clear_empties_both_kinds() {
    let store = MarketStore::new();
    store
        .yc_create("USD", &[1.0], &[0.05], YcValueType::SpotRates)
        .unwrap();
    store
        .vol_create("EURVOL", &[1.0], &[0.20], VolValueType::SpotVols)
        .unwrap();

    store.clear();
    let list = store.list();
    assert!(list.yield_curves.is_empty());
    assert!(list.volatilities.is_empty());
    assert!(store.discount("USD", 1.0).is_err());
}

#[test]
fn list_is_sorted() {
    let store = MarketStore::new();
    for name in ["zar", "USD", "eur", "GBP"] {
        store
            .yc_create(name, &[1.0], &[0.05], YcValueType::SpotRates)
            .unwrap();
    }
    assert_eq!(
        store.list().yield_curves,
        vec!["eur".to_string(), "GBP".into(), "USD".into(), "zar".into()]
    );
}
