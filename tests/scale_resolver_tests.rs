use approx::assert_relative_eq;
use chartscope::api::{ColorSchemaEntry, ScaleConfigPatch, ScaleResolver};
use chartscope::core::{
    AggregatedDataPatch, ChartType, DomainOverride, DomainValue, KeyRecord, KeyType, KeyValue,
    Margin, RIGHT_AXIS_GROUP, ScaleDomain, ScaleKind, SeriesPoint, SeriesRecord,
};
use chrono::{TimeZone, Utc};

fn sized_resolver(chart_type: ChartType, key_type: KeyType) -> ScaleResolver {
    let mut resolver = ScaleResolver::new();
    resolver.set_config(
        ScaleConfigPatch::default()
            .with_margin(Margin::new(10.0, 20.0, 30.0, 40.0))
            .with_size(460.0, 240.0)
            .with_chart_type(chart_type)
            .with_key_type(key_type),
    );
    resolver
}

fn key_records(keys: &[&str], values: &[(&str, f64)]) -> Vec<KeyRecord> {
    keys.iter()
        .map(|key| {
            KeyRecord::new(
                *key,
                values
                    .iter()
                    .map(|(id, value)| SeriesPoint::new(*id, *value))
                    .collect(),
            )
        })
        .collect()
}

#[test]
fn string_keys_keep_given_order_on_point_scale() {
    let mut resolver = sized_resolver(ChartType::Line, KeyType::String);
    resolver.set_data(
        AggregatedDataPatch::default()
            .with_data_by_key(key_records(&["c", "a", "b"], &[("s1", 1.0)]))
            .with_data_by_series(vec![SeriesRecord::new(
                "s1",
                vec![KeyValue::new("c", 1.0), KeyValue::new("a", 2.0)],
            )]),
    );

    let scales = resolver.scales();
    assert_eq!(scales.x_scale.kind(), ScaleKind::Point);
    assert_eq!(
        scales.x_scale.domain(),
        ScaleDomain::Categories(vec!["c".into(), "a".into(), "b".into()])
    );
    assert_eq!(scales.x_scale.range(), (0.0, 400.0));
    assert_eq!(scales.x_scale.map(&"c".into()), Some(0.0));
    assert_eq!(scales.x_scale.map(&"b".into()), Some(400.0));
}

#[test]
fn bar_charts_use_unpadded_bands() {
    let mut resolver = sized_resolver(ChartType::Bar, KeyType::String);
    resolver.set_data(
        AggregatedDataPatch::default()
            .with_data_by_key(key_records(&["a", "b", "c", "d"], &[("s1", 1.0)])),
    );

    let scales = resolver.scales();
    assert_eq!(scales.x_scale.kind(), ScaleKind::Band);
    assert_relative_eq!(scales.x_scale.bandwidth(), 100.0);
    assert_eq!(scales.x_scale.map(&"c".into()), Some(200.0));
}

#[test]
fn number_keys_use_extent_on_linear_scale() {
    let mut resolver = sized_resolver(ChartType::Line, KeyType::Number);
    resolver.set_data(AggregatedDataPatch::default().with_data_by_key(vec![
        KeyRecord::new(5.0, vec![]),
        KeyRecord::new(-3.0, vec![]),
        KeyRecord::new(12.0, vec![]),
    ]));

    let x_scale = resolver.scales().x_scale;
    assert_eq!(x_scale.kind(), ScaleKind::Linear);
    assert_eq!(x_scale.domain(), ScaleDomain::Continuous(-3.0, 12.0));
    assert_relative_eq!(x_scale.map(&DomainValue::Number(12.0)).expect("mapped"), 400.0);
}

#[test]
fn time_keys_use_extent_on_time_scale() {
    let first = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
    let middle = Utc.with_ymd_and_hms(2020, 6, 1, 0, 0, 0).unwrap();
    let last = Utc.with_ymd_and_hms(2021, 1, 1, 0, 0, 0).unwrap();

    let mut resolver = sized_resolver(ChartType::Line, KeyType::Time);
    resolver.set_data(AggregatedDataPatch::default().with_data_by_key(vec![
        KeyRecord::new(middle, vec![]),
        KeyRecord::new(last, vec![]),
        KeyRecord::new(first, vec![]),
    ]));

    let x_scale = resolver.scales().x_scale;
    assert_eq!(x_scale.kind(), ScaleKind::Time);
    assert_eq!(x_scale.domain(), ScaleDomain::Time(first, last));
    assert_relative_eq!(x_scale.map(&first.into()).expect("first"), 0.0);
    assert_relative_eq!(x_scale.map(&last.into()).expect("last"), 400.0);
}

#[test]
fn explicit_x_domain_overrides_data() {
    let mut resolver = sized_resolver(ChartType::Line, KeyType::Number);
    resolver
        .set_config(ScaleConfigPatch::default().with_x_domain(DomainOverride::Extent(0.0, 100.0)))
        .set_data(
            AggregatedDataPatch::default().with_data_by_key(vec![KeyRecord::new(40.0, vec![])]),
        );

    let x_scale = resolver.scales().x_scale;
    assert_eq!(x_scale.domain(), ScaleDomain::Continuous(0.0, 100.0));
    assert_relative_eq!(x_scale.map(&DomainValue::Number(50.0)).expect("mapped"), 200.0);
}

#[test]
fn y_scale_is_inverted_and_rounded() {
    let resolver = sized_resolver(ChartType::Line, KeyType::String);
    let y_scale = resolver.build_y_scale((0.0, 3.0));

    assert_eq!(y_scale.range(), (200.0, 0.0));
    assert_eq!(y_scale.map(&DomainValue::Number(0.0)), Some(200.0));
    assert_eq!(y_scale.map(&DomainValue::Number(3.0)), Some(0.0));
    assert_eq!(y_scale.map(&DomainValue::Number(1.0)), Some(133.0));
}

#[test]
fn stacked_y_domain_spans_zero_to_tallest_stack() {
    let mut resolver = sized_resolver(ChartType::StackedBar, KeyType::String);
    resolver.set_data(
        AggregatedDataPatch::default()
            .with_data_by_key(vec![
                KeyRecord::new(
                    "a",
                    vec![SeriesPoint::new("s1", 10.0), SeriesPoint::new("s2", 5.0)],
                ),
                KeyRecord::new(
                    "b",
                    vec![SeriesPoint::new("s1", 30.0), SeriesPoint::new("s2", 12.0)],
                ),
            ])
            .with_flat_data_sorted(vec![
                KeyValue::new("b", 30.0),
                KeyValue::new("a", 10.0),
                KeyValue::new("b", 12.0),
                KeyValue::new("a", 5.0),
            ]),
    );

    let scales = resolver.scales();
    let y_scale = scales.y_scale.expect("stacked charts always have a y scale");
    assert_eq!(y_scale.domain(), ScaleDomain::Continuous(0.0, 42.0));
    assert!(scales.y2_scale.is_none());
    assert!(!scales.has_second_axis);
    assert_eq!(
        scales.x_scale.domain(),
        ScaleDomain::Categories(vec!["b".into(), "a".into()])
    );
}

#[test]
fn stacked_y_override_is_used_verbatim() {
    let mut resolver = sized_resolver(ChartType::StackedArea, KeyType::String);
    resolver.set_config(ScaleConfigPatch::default().with_y_domain(DomainOverride::Extent(-5.0, 5.0)));
    resolver.set_data(
        AggregatedDataPatch::default()
            .with_data_by_key(key_records(&["a"], &[("s1", 100.0)])),
    );

    let y_scale = resolver.scales().y_scale.expect("y scale");
    assert_eq!(y_scale.domain(), ScaleDomain::Continuous(-5.0, 5.0));
}

#[test]
fn right_axis_group_enables_secondary_scale() {
    let mut resolver = sized_resolver(ChartType::Line, KeyType::String);
    resolver.set_data(
        AggregatedDataPatch::default()
            .with_data_by_key(key_records(&["a", "b"], &[("left", 1.0), ("right", 2.0)]))
            .with_data_by_series(vec![
                SeriesRecord::new(
                    "left",
                    vec![KeyValue::new("a", 3.0), KeyValue::new("b", 9.0)],
                ),
                SeriesRecord::new(
                    "right",
                    vec![KeyValue::new("a", 100.0), KeyValue::new("b", 250.0)],
                )
                .with_group(RIGHT_AXIS_GROUP),
            ]),
    );

    let scales = resolver.scales();
    assert!(scales.has_second_axis);
    assert_eq!(
        scales.y_scale.expect("left axis").domain(),
        ScaleDomain::Continuous(3.0, 9.0)
    );
    assert_eq!(
        scales.y2_scale.expect("right axis").domain(),
        ScaleDomain::Continuous(100.0, 250.0)
    );
}

#[test]
fn missing_groups_yield_absent_axes() {
    let mut resolver = sized_resolver(ChartType::Grouped, KeyType::String);
    resolver.set_data(
        AggregatedDataPatch::default().with_data_by_series(vec![
            SeriesRecord::new("right-only", vec![KeyValue::new("a", 4.0)])
                .with_group(RIGHT_AXIS_GROUP),
        ]),
    );

    let scales = resolver.scales();
    assert!(scales.y_scale.is_none());
    assert!(scales.y2_scale.is_some());

    resolver.set_data(
        AggregatedDataPatch::default()
            .with_data_by_series(vec![SeriesRecord::new("left", vec![KeyValue::new("a", 4.0)])]),
    );
    let scales = resolver.scales();
    assert!(!scales.has_second_axis);
    assert!(scales.y2_scale.is_none());
}

#[test]
fn split_by_groups_concatenates_series_in_group_order() {
    let mut resolver = ScaleResolver::new();
    resolver.set_data(AggregatedDataPatch::default().with_data_by_series(vec![
        SeriesRecord::new("a", vec![KeyValue::new("k1", 1.0)]).with_group(RIGHT_AXIS_GROUP),
        SeriesRecord::new("b", vec![KeyValue::new("k1", 2.0), KeyValue::new("k2", 3.0)]),
        SeriesRecord::new("c", vec![KeyValue::new("k3", 4.0)]).with_group(RIGHT_AXIS_GROUP),
    ]));

    let groups = resolver.split_by_groups();
    let order: Vec<&str> = groups.keys().map(String::as_str).collect();
    assert_eq!(order, vec![RIGHT_AXIS_GROUP, "0"]);
    assert_eq!(groups[RIGHT_AXIS_GROUP].all_values, vec![1.0, 4.0]);
    assert_eq!(
        groups[RIGHT_AXIS_GROUP].all_keys,
        vec![DomainValue::category("k1"), DomainValue::category("k3")]
    );
    assert_eq!(groups["0"].all_values, vec![2.0, 3.0]);
}

#[test]
fn color_scale_uses_schema_keys_and_default_fallback() {
    let mut resolver = ScaleResolver::new();
    resolver
        .set_config(
            ScaleConfigPatch::default()
                .with_color_schema(vec![
                    ColorSchemaEntry::new("red"),
                    ColorSchemaEntry::keyed("pinned", "blue"),
                ])
                .with_default_color("gray"),
        )
        .set_data(AggregatedDataPatch::default().with_data_by_series(vec![
            SeriesRecord::new("first", vec![]),
            SeriesRecord::new("second", vec![]),
            SeriesRecord::new("third", vec![]),
        ]));

    let colors = resolver.build_color_scale();
    assert_eq!(colors.domain_len(), 3);
    assert_eq!(colors.get("first").as_deref(), Some("red"));
    assert_eq!(colors.get("pinned").as_deref(), Some("blue"));
    assert_eq!(colors.get("second").as_deref(), Some("gray"));
    assert_eq!(colors.get("third").as_deref(), Some("gray"));
    assert_eq!(colors.get("unknown").as_deref(), Some("gray"));
}

#[test]
fn margin_patch_replaces_whole_margin() {
    let mut resolver = ScaleResolver::new();
    resolver.set_config(ScaleConfigPatch::default().with_margin(Margin::new(1.0, 2.0, 3.0, 4.0)));
    resolver.set_config(ScaleConfigPatch::default().with_size(100.0, 50.0));

    let config = resolver.config();
    assert_eq!(config.margin, Margin::new(1.0, 2.0, 3.0, 4.0));
    assert_eq!(config.width, 100.0);
    assert_eq!(config.chart_width(), 94.0);
    assert_eq!(config.chart_height(), 46.0);
}

#[test]
fn repeated_resolution_is_deterministic() {
    let mut resolver = sized_resolver(ChartType::Line, KeyType::String);
    resolver.set_data(
        AggregatedDataPatch::default()
            .with_data_by_key(key_records(&["a", "b"], &[("s1", 1.0)]))
            .with_data_by_series(vec![SeriesRecord::new("s1", vec![KeyValue::new("a", 1.0)])]),
    );

    assert_eq!(resolver.scales(), resolver.scales());
}
