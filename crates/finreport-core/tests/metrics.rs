use finreport_core::metrics::{
    apply_derived_metrics, growth_pct, margin_pct, PROFIT_MARGIN_PCT, REVENUE_GROWTH_PCT,
};
use polars::prelude::*;

fn report(rows: &[(i32, f64, f64, f64)]) -> DataFrame {
    df!(
        "year" => rows.iter().map(|r| r.0).collect::<Vec<i32>>(),
        "revenue" => rows.iter().map(|r| r.1).collect::<Vec<f64>>(),
        "expenses" => rows.iter().map(|r| r.2).collect::<Vec<f64>>(),
        "profit" => rows.iter().map(|r| r.3).collect::<Vec<f64>>(),
    )
    .unwrap()
}

#[test]
fn two_year_report_matches_hand_calculation() -> PolarsResult<()> {
    let df = apply_derived_metrics(&report(&[
        (2020, 100.0, 80.0, 20.0),
        (2021, 150.0, 100.0, 50.0),
    ]))?;

    let growth = df.column(REVENUE_GROWTH_PCT)?.f64()?;
    assert!(growth.get(0).is_none());
    assert!((growth.get(1).unwrap() - 50.0).abs() < 1e-9);

    let margin = df.column(PROFIT_MARGIN_PCT)?.f64()?;
    assert!((margin.get(0).unwrap() - 20.0).abs() < 1e-9);
    assert!((margin.get(1).unwrap() - 100.0 / 3.0).abs() < 1e-9);

    Ok(())
}

#[test]
fn zero_revenue_leaves_margin_undefined() -> PolarsResult<()> {
    let df = apply_derived_metrics(&report(&[
        (2019, 80.0, 70.0, 10.0),
        (2020, 0.0, 5.0, 10.0),
        (2021, 0.0, 0.0, 0.0),
        (2022, 50.0, 45.0, 5.0),
    ]))?;

    let revenue = df.column("revenue")?.f64()?;
    let margin = df.column(PROFIT_MARGIN_PCT)?.f64()?;
    for idx in 0..df.height() {
        assert_eq!(
            margin.get(idx).is_none(),
            revenue.get(idx) == Some(0.0),
            "row {idx}"
        );
    }

    Ok(())
}

#[test]
fn growth_after_zero_revenue_is_undefined() -> PolarsResult<()> {
    let df = apply_derived_metrics(&report(&[
        (2019, 80.0, 70.0, 10.0),
        (2020, 0.0, 5.0, -5.0),
        (2021, 40.0, 30.0, 10.0),
    ]))?;

    let growth = df.column(REVENUE_GROWTH_PCT)?.f64()?;
    assert_eq!(growth.get(1), Some(-100.0));
    assert!(growth.get(2).is_none());

    Ok(())
}

#[test]
fn derived_values_are_finite_or_null() -> PolarsResult<()> {
    let df = apply_derived_metrics(&report(&[
        (2018, 0.0, 0.0, 0.0),
        (2019, 10.0, 20.0, -10.0),
        (2020, 0.0, 1.0, -1.0),
        (2021, 25.0, 0.0, 25.0),
    ]))?;

    for name in [REVENUE_GROWTH_PCT, PROFIT_MARGIN_PCT] {
        let values = df.column(name)?.f64()?;
        assert!(
            values.into_iter().flatten().all(f64::is_finite),
            "{name} holds a non-finite value"
        );
    }
    assert_eq!(df.height(), 4);

    Ok(())
}

#[test]
fn overflowing_quotients_are_undefined() -> PolarsResult<()> {
    assert_eq!(margin_pct(1.0, 1e-310), None);
    assert_eq!(growth_pct(1e-310, 1.0), None);

    let df = apply_derived_metrics(&report(&[
        (2020, 1e-310, 0.0, 5.0),
        (2021, 1e308, 0.0, 1e308),
    ]))?;

    let growth = df.column(REVENUE_GROWTH_PCT)?.f64()?;
    assert_eq!(growth.get(0), None);
    assert_eq!(growth.get(1), None);

    let margin = df.column(PROFIT_MARGIN_PCT)?.f64()?;
    assert_eq!(margin.get(0), None);
    assert_eq!(margin.get(1), Some(100.0));

    Ok(())
}

#[test]
fn scalar_helpers_guard_division() {
    assert_eq!(growth_pct(0.0, 10.0), None);
    assert_eq!(growth_pct(200.0, 150.0), Some(-25.0));
    assert_eq!(margin_pct(10.0, 0.0), None);
    assert_eq!(margin_pct(-5.0, 50.0), Some(-10.0));
}
