use chartscope::api::{ColorSchemaEntry, ScaleConfigPatch, ScaleResolver};
use chartscope::core::{
    AggregatedDataPatch, ChartType, DomainValue, KeyRecord, KeyType, KeyValue, LEFT_AXIS_GROUP,
    RIGHT_AXIS_GROUP, ScaleDomain, SeriesPoint, SeriesRecord,
};
use proptest::prelude::*;

fn resolver_with(chart_type: ChartType, key_type: KeyType) -> ScaleResolver {
    let mut resolver = ScaleResolver::new();
    resolver.set_config(
        ScaleConfigPatch::default()
            .with_size(800.0, 600.0)
            .with_chart_type(chart_type)
            .with_key_type(key_type),
    );
    resolver
}

proptest! {
    #[test]
    fn string_keys_auto_domain_is_order_preserving_identity(
        keys in proptest::collection::hash_set("[a-z]{1,6}", 1..20)
    ) {
        let keys: Vec<String> = keys.into_iter().collect();
        let records = keys
            .iter()
            .map(|key| KeyRecord::new(key.as_str(), vec![]))
            .collect();

        let mut resolver = resolver_with(ChartType::Line, KeyType::String);
        resolver.set_data(AggregatedDataPatch::default().with_data_by_key(records));

        let expected: Vec<DomainValue> = keys.iter().map(|key| key.as_str().into()).collect();
        prop_assert_eq!(resolver.scales().x_scale.domain(), ScaleDomain::Categories(expected));
    }

    #[test]
    fn number_keys_auto_domain_is_extent(
        keys in proptest::collection::vec(-1.0e6f64..1.0e6, 1..40)
    ) {
        let records = keys.iter().map(|key| KeyRecord::new(*key, vec![])).collect();
        let mut resolver = resolver_with(ChartType::Line, KeyType::Number);
        resolver.set_data(AggregatedDataPatch::default().with_data_by_key(records));

        let min = keys.iter().copied().fold(f64::INFINITY, f64::min);
        let max = keys.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        prop_assert_eq!(resolver.scales().x_scale.domain(), ScaleDomain::Continuous(min, max));
    }

    #[test]
    fn stacked_y_max_is_tallest_stack(
        stacks in proptest::collection::vec(
            proptest::collection::vec(0.0f64..1_000.0, 1..6),
            1..25
        )
    ) {
        let records: Vec<KeyRecord> = stacks
            .iter()
            .enumerate()
            .map(|(index, values)| {
                KeyRecord::new(
                    format!("k{index}"),
                    values
                        .iter()
                        .enumerate()
                        .map(|(series, value)| SeriesPoint::new(format!("s{series}"), *value))
                        .collect(),
                )
            })
            .collect();
        let expected_max = records
            .iter()
            .map(KeyRecord::stack_height)
            .fold(f64::NEG_INFINITY, f64::max);

        let mut resolver = resolver_with(ChartType::StackedArea, KeyType::String);
        resolver.set_data(AggregatedDataPatch::default().with_data_by_key(records));

        let y_scale = resolver.scales().y_scale.expect("stacked y scale");
        prop_assert_eq!(y_scale.domain(), ScaleDomain::Continuous(0.0, expected_max));
    }

    #[test]
    fn second_axis_iff_some_series_is_on_right_group(
        groups in proptest::collection::vec(proptest::bool::ANY, 1..12)
    ) {
        let series = groups
            .iter()
            .enumerate()
            .map(|(index, on_right)| {
                let group = if *on_right { RIGHT_AXIS_GROUP } else { LEFT_AXIS_GROUP };
                SeriesRecord::new(format!("s{index}"), vec![KeyValue::new("a", index as f64)])
                    .with_group(group)
            })
            .collect();

        let mut resolver = resolver_with(ChartType::Grouped, KeyType::String);
        resolver.set_data(AggregatedDataPatch::default().with_data_by_series(series));

        let scales = resolver.scales();
        let any_right = groups.iter().any(|on_right| *on_right);
        prop_assert_eq!(scales.has_second_axis, any_right);
        prop_assert_eq!(scales.y2_scale.is_some(), any_right);
    }

    #[test]
    fn series_beyond_schema_fall_back_to_default_color(
        schema_len in 0usize..5,
        extra in 1usize..5
    ) {
        let schema = (0..schema_len)
            .map(|index| ColorSchemaEntry::new(format!("color-{index}")))
            .collect();
        let series = (0..schema_len + extra)
            .map(|index| SeriesRecord::new(format!("s{index}"), vec![]))
            .collect();

        let mut resolver = ScaleResolver::new();
        resolver
            .set_config(
                ScaleConfigPatch::default()
                    .with_color_schema(schema)
                    .with_default_color("fallback"),
            )
            .set_data(AggregatedDataPatch::default().with_data_by_series(series));

        let colors = resolver.build_color_scale();
        prop_assert_eq!(colors.domain_len(), schema_len + extra);
        for index in 0..schema_len {
            let expected = format!("color-{index}");
            prop_assert_eq!(colors.get(&format!("s{index}")), Some(expected));
        }
        for index in schema_len..schema_len + extra {
            let color = colors.get(&format!("s{index}"));
            prop_assert_eq!(color.as_deref(), Some("fallback"));
        }
    }
}
