
use approx::assert_abs_diff_eq;
use callprice_lib::{
    calculate_d1_d2, call_greeks, implied_volatility, price_call, put_price, ContractParams,
    PricingError,
};
use test_utils::{atm_params, load_reference_cases};

/// Prices and Greeks against independently computed reference values.
#[test]
fn test_reference_scenarios() {
    let cases = load_reference_cases().expect("Failed to load reference cases");
    assert!(!cases.is_empty(), "Fixture should contain scenarios");

    for case in &cases {
        let params = case.params();
        let price = price_call(&params).expect("valid params");
        let put = put_price(&params).expect("valid params");
        let greeks = call_greeks(&params).expect("valid params");
        let expected = case.greeks();

        assert!(
            (price - case.call_price).abs() < 1e-8,
            "{}: call {} vs {}",
            case.name,
            price,
            case.call_price
        );
        assert!(
            (put - case.put_price).abs() < 1e-8,
            "{}: put {} vs {}",
            case.name,
            put,
            case.put_price
        );
        assert!(
            (greeks.delta - expected.delta).abs() < 1e-8,
            "{}: delta",
            case.name
        );
        assert!(
            (greeks.gamma - expected.gamma).abs() < 1e-8,
            "{}: gamma",
            case.name
        );
        assert!(
            (greeks.theta - expected.theta).abs() < 1e-8,
            "{}: theta",
            case.name
        );
        assert!((greeks.vega - expected.vega).abs() < 1e-8, "{}: vega", case.name);
    }
}

#[test]
fn test_concrete_atm_scenario() {
    let params = atm_params();
    assert_abs_diff_eq!(price_call(&params).unwrap(), 10.4506, epsilon = 1e-2);

    let g = call_greeks(&params).unwrap();
    assert_abs_diff_eq!(g.delta, 0.6368, epsilon = 1e-2);
    assert_abs_diff_eq!(g.gamma, 0.0188, epsilon = 1e-2);
    assert_abs_diff_eq!(g.vega, 37.52, epsilon = 1e-2);
    assert_abs_diff_eq!(g.theta, -6.41, epsilon = 1e-2);
}

/// C - P = S0 e^(-qT) - K e^(-rT) across a grid of strikes and dividends.
#[test]
fn test_put_call_parity_grid() {
    for &strike in &[60.0, 90.0, 100.0, 110.0, 150.0] {
        for &q in &[0.0, 0.01, 0.05] {
            for &r in &[-0.01, 0.0, 0.04] {
                let params =
                    ContractParams::new(100.0, strike, r, 0.3, 0.75).with_dividend_yield(q);
                let c = price_call(&params).unwrap();
                let p = put_price(&params).unwrap();
                let parity = params.current_price * params.dividend_discount_factor()
                    - strike * params.discount_factor();
                assert!(
                    (c - p - parity).abs() < 1e-6,
                    "parity broken for K={strike}, q={q}, r={r}"
                );
            }
        }
    }
}

/// With S0 = K and zero rates the call is worth strictly between 0 and S0.
#[test]
fn test_atm_zero_rate_bounds() {
    for &sigma in &[0.01, 0.2, 1.0, 3.0] {
        for &t in &[0.01, 1.0, 10.0] {
            let params = ContractParams::new(100.0, 100.0, 0.0, sigma, t);
            let price = price_call(&params).unwrap();
            assert!(
                price > 0.0 && price < 100.0,
                "sigma={sigma}, t={t}: {price}"
            );
        }
    }
}

#[test]
fn test_greeks_bounds() {
    for &spot in &[50.0, 95.0, 100.0, 105.0, 200.0] {
        for &q in &[0.0, 0.03] {
            for &t in &[0.1, 1.0, 5.0] {
                let params = ContractParams::new(spot, 100.0, 0.02, 0.25, t).with_dividend_yield(q);
                let g = call_greeks(&params).unwrap();
                let max_delta = params.dividend_discount_factor();
                assert!(g.delta >= 0.0 && g.delta <= max_delta, "delta {}", g.delta);
                assert!(g.gamma >= 0.0, "gamma {}", g.gamma);
                assert!(g.vega >= 0.0, "vega {}", g.vega);
            }
        }
    }
}

#[test]
fn test_invalid_inputs_return_domain_errors() {
    let base = atm_params();
    let invalid = [
        ("volatility", ContractParams {
            volatility: 0.0,
            ..base
        }),
        ("time_to_maturity", ContractParams {
            time_to_maturity: 0.0,
            ..base
        }),
        ("current_price", ContractParams {
            current_price: 0.0,
            ..base
        }),
        ("current_price", ContractParams {
            current_price: -10.0,
            ..base
        }),
        ("strike_price", ContractParams {
            strike_price: -1.0,
            ..base
        }),
        ("dividend_yield", base.with_dividend_yield(-0.02)),
    ];

    for (field, params) in invalid {
        for result in [
            price_call(&params),
            put_price(&params),
            call_greeks(&params).map(|g| g.delta),
            calculate_d1_d2(&params).map(|(d1, _)| d1),
        ] {
            match result {
                Err(PricingError::InvalidParameter { name, .. }) => assert_eq!(name, field),
                other => panic!("expected domain error for {field}, got {other:?}"),
            }
        }
    }
}

#[test]
fn test_implied_volatility_recovers_reference_vols() {
    let cases = load_reference_cases().expect("Failed to load reference cases");
    for case in &cases {
        let params = case.params();
        let iv = implied_volatility(&params, case.call_price).expect("solvable");
        assert!(
            (iv - case.volatility).abs() < 1e-6,
            "{}: iv {} vs {}",
            case.name,
            iv,
            case.volatility
        );
    }
}
