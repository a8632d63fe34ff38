use indicator_forms::workflows::indicators::calculations::{
    average, core_percentage, funding_ratio, growth_rate, turnover_rate,
};
use indicator_forms::workflows::indicators::{
    compile, data_quality, quality_records, score, CompletionScore, FieldType, QualityRecord,
    ResponseStore, ResponseValue,
};
use indicator_forms::workflows::spreadsheet::RowSet;

fn turnover_indicator_rows() -> RowSet {
    RowSet::from_records([[
        ("Indicator", "Staff Turnover Rate"),
        ("Measurement Method", "Count staff at the start and end of the year"),
    ]])
}

#[test]
fn turnover_inputs_fully_answered_score_one_hundred() {
    let indicators = compile(&turnover_indicator_rows()).expect("compiles");
    let responses: ResponseStore = [
        ("indicator_0_staffAtStart", ResponseValue::Number(12.0)),
        ("indicator_0_staffAtEnd", ResponseValue::Number(10.0)),
        ("indicator_0_staffLeft", ResponseValue::Number(3.0)),
    ]
    .into_iter()
    .collect();

    assert_eq!(
        score(&indicators, &responses),
        CompletionScore {
            percentage: 100,
            completed: 3,
            total: 3,
        }
    );

    let rate = indicators[0]
        .field("indicator_0_turnoverRate")
        .and_then(|field| field.computed_value(&responses));
    assert_eq!(rate, Some(27.0));
    let average_staff = indicators[0]
        .field("indicator_0_averageStaff")
        .and_then(|field| field.computed_value(&responses));
    assert_eq!(average_staff, Some(11.0));
}

#[test]
fn partial_answers_round_to_whole_percentages() {
    let indicators = compile(&turnover_indicator_rows()).expect("compiles");
    let responses: ResponseStore = [("indicator_0_staffAtStart", ResponseValue::Number(0.0))]
        .into_iter()
        .collect();

    let result = score(&indicators, &responses);
    assert_eq!(result.completed, 1);
    assert_eq!(result.percentage, 33);
}

#[test]
fn scores_stay_in_range_for_empty_inputs() {
    let empty = score(&[], &ResponseStore::default());
    assert_eq!(empty.percentage, 0);
    assert_eq!(empty.total, 0);

    let quality = data_quality(&[]);
    assert_eq!(
        (quality.completeness, quality.standardization, quality.overall_score),
        (0, 0, 0)
    );
}

#[test]
fn data_quality_counts_structured_types_only() {
    let indicators = compile(&RowSet::from_records([
        [("Indicator", "Volunteers"), ("Method", "How many volunteers?")],
        [("Indicator", "Highlights"), ("Method", "Describe")],
    ]))
    .expect("compiles");
    let responses: ResponseStore = [
        ("indicator_0_value", ResponseValue::Text("14".into())),
        ("indicator_1_value", ResponseValue::Text("A good year".into())),
    ]
    .into_iter()
    .collect();

    let records = quality_records(&indicators, &responses);
    assert_eq!(
        records,
        vec![
            QualityRecord::new(FieldType::Number, Some(ResponseValue::Text("14".into()))),
            QualityRecord::new(
                FieldType::TextShort,
                Some(ResponseValue::Text("A good year".into()))
            ),
        ]
    );

    let quality = data_quality(&records);
    assert_eq!(quality.completeness, 100);
    assert_eq!(quality.standardization, 50);
    assert_eq!(quality.overall_score, 80);
}

#[test]
fn calculation_functions_match_reference_values() {
    assert_eq!(turnover_rate(Some(3.0), Some(11.0)), 27.0);
    assert_eq!(funding_ratio(Some(75_000.0), Some(150_000.0)), 0.5);
    assert_eq!(core_percentage(Some(150_000.0), Some(225_000.0)), 67.0);
    assert_eq!(average(&[Some(10.0), None, Some(f64::NAN), Some(20.0)]), 15.0);
    assert_eq!(growth_rate(Some(200.0), Some(250.0)), 25.0);
}

#[test]
fn calculation_functions_never_divide_by_zero() {
    for value in [
        turnover_rate(Some(5.0), Some(0.0)),
        turnover_rate(Some(5.0), None),
        funding_ratio(Some(5.0), Some(0.0)),
        core_percentage(Some(5.0), None),
        growth_rate(None, Some(5.0)),
        average(&[]),
    ] {
        assert_eq!(value, 0.0);
    }
}
