use interest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

#[test]
fn test_result_projects_to_chart_and_view() {
    let config = InterestConfig::builder().currency(Currency::Usd).build().unwrap();
    let res = SimpleInterestCalculator::new()
        .principal("10000")
        .rate("5")
        .time("3")
        .label("Personal Loan")
        .calculate_interest(&config)
        .unwrap();

    let chart = ChartData::from_result(&res);
    assert_eq!(chart.title, "Amount Distribution");
    assert_eq!(chart.slice(SliceKind::Interest).unwrap().value, dec!(1500));

    let view = ResultView::with_config(&res, &config);
    assert_eq!(view.total_amount.text, "$ 11500");

    let explanation = res.explain();
    assert!(explanation.contains("Personal Loan"));
    assert!(explanation.contains("Simple Interest: 1500"));
}

#[test]
fn test_currency_never_changes_numbers() {
    let npr = InterestConfig::default();
    let jpy = InterestConfig::default().with_currency(Currency::Jpy);
    let calc = SimpleInterestCalculator::new().principal(777).rate("3.5").time(2);

    let a = calc.calculate_interest(&npr).unwrap();
    let b = calc.calculate_interest(&jpy).unwrap();
    assert_eq!(a, b);
    assert_ne!(
        ResultView::with_config(&a, &npr).interest.text,
        ResultView::with_config(&b, &jpy).interest.text
    );
}

#[test]
fn test_result_json_round_trip_keeps_contract_names() {
    let res = compute(20000, 4, 5);
    let json = serde_json::to_value(&res).unwrap();
    let field = |name: &str| json[name].as_str().unwrap().parse::<Decimal>().unwrap();
    assert_eq!(field("interest"), dec!(4000));
    assert_eq!(field("totalAmount"), dec!(24000));

    let back: CalculationResult = serde_json::from_value(json).unwrap();
    assert_eq!(back, res);
}
