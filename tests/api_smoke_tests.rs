use std::cell::RefCell;
use std::rc::Rc;

use approx::assert_relative_eq;
use chartscope::api::{
    ColorSchemaEntry, ScaleConfigPatch, ScaleResolver, TooltipConfigPatch, TooltipController,
    TooltipPhase, TooltipScales,
};
use chartscope::core::{
    AggregatedDataPatch, ChartType, DomainValue, KeyRecord, KeyType, KeyValue, RIGHT_AXIS_GROUP,
    ScaleKind, SeriesPoint, SeriesRecord,
};
use chartscope::interaction::{PanelDispatcher, PointerEvent};
use chartscope::render::{NullPanelHost, PanelMode, Swatch};
use chrono::{DateTime, TimeZone, Utc};

fn day(d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, d, 0, 0, 0)
        .single()
        .expect("valid date")
}

fn dataset() -> AggregatedDataPatch {
    let days = [day(1), day(2), day(3)];
    let revenue = [10.0, 20.0, 30.0];
    let visits = [1200.0, 800.0, 4500.0];

    let data_by_key = days
        .iter()
        .enumerate()
        .map(|(i, date)| {
            KeyRecord::new(
                *date,
                vec![
                    SeriesPoint::new("revenue", revenue[i]),
                    SeriesPoint::new("visits", visits[i]),
                ],
            )
        })
        .collect();
    let series = |id: &str, values: &[f64]| {
        SeriesRecord::new(
            id,
            days.iter()
                .zip(values)
                .map(|(date, value)| KeyValue::new(*date, *value))
                .collect(),
        )
    };
    let flat_data_sorted = days
        .iter()
        .zip(revenue)
        .map(|(date, value)| KeyValue::new(*date, value))
        .collect();

    AggregatedDataPatch::default()
        .with_data_by_key(data_by_key)
        .with_data_by_series(vec![
            series("revenue", &revenue[..]),
            series("visits", &visits[..]).with_group(RIGHT_AXIS_GROUP),
        ])
        .with_flat_data_sorted(flat_data_sorted)
        .with_group_keys(vec!["0".to_owned(), RIGHT_AXIS_GROUP.to_owned()])
}

#[test]
fn resolver_to_tooltip_smoke_flow() {
    let mut resolver = ScaleResolver::new();
    resolver
        .set_config(
            ScaleConfigPatch::default()
                .with_size(800.0, 600.0)
                .with_key_type(KeyType::Time)
                .with_chart_type(ChartType::Line)
                .with_color_schema(vec![
                    ColorSchemaEntry::new("#1f77b4"),
                    ColorSchemaEntry::new("#ff7f0e"),
                ]),
        )
        .set_data(dataset());

    let scales = resolver.scales();
    assert_eq!(scales.x_scale.kind(), ScaleKind::Time);
    assert!(scales.has_second_axis);

    let x_mid = scales
        .x_scale
        .map(&DomainValue::from(day(2)))
        .expect("time key maps");
    assert_relative_eq!(x_mid, 350.0, epsilon = 1e-9);

    let y_scale = scales.y_scale.as_ref().expect("left axis");
    assert_relative_eq!(
        y_scale.map(&DomainValue::Number(20.0)).expect("value maps"),
        250.0
    );
    let y2_scale = scales.y2_scale.as_ref().expect("right axis");
    assert_relative_eq!(
        y2_scale.map(&DomainValue::Number(4500.0)).expect("value maps"),
        0.0
    );

    let tooltip = Rc::new(RefCell::new(TooltipController::new(
        NullPanelHost::with_panel_size(150.0, 50.0),
        PanelMode::Tooltip,
    )));
    tooltip
        .borrow_mut()
        .set_config(
            TooltipConfigPatch::default()
                .with_size(800.0, 600.0)
                .with_chart_type(ChartType::Line),
        )
        .set_scales(TooltipScales::default().with_color_scale(scales.color_scale.clone()));

    let mut dispatcher = PanelDispatcher::new();
    TooltipController::bind_events(&tooltip, &mut dispatcher);

    let hovered = resolver.data().data_by_key[1].clone();
    dispatcher.dispatch(&PointerEvent::Over);
    dispatcher.dispatch(&PointerEvent::Move {
        data_point: hovered,
        x: 450.0,
        y: 120.0,
    });

    {
        let controller = tooltip.borrow();
        assert_eq!(controller.phase(), TooltipPhase::Shown);
        let view = controller.view().expect("tooltip view");
        assert_eq!(view.title, "May 02, 2024");

        let values: Vec<&str> = view
            .items
            .iter()
            .filter_map(|item| item.value.as_deref())
            .collect();
        assert_eq!(values, vec!["800", "20.0"]);
        assert!(matches!(
            &view.items[0].swatch,
            Swatch::Line { color: Some(color), .. } if color == "#ff7f0e"
        ));

        // past the middle of a 796px chart: panel flips to the pointer's left
        let left = view.left_px.expect("positioned");
        assert_relative_eq!(left, 450.0 - 150.0 - 4.0 + 2.0);
    }

    dispatcher.dispatch(&PointerEvent::Out);
    assert_eq!(tooltip.borrow().phase(), TooltipPhase::Hidden);

    tooltip.borrow_mut().destroy();
    assert_eq!(tooltip.borrow().host().attached_len(), 0);
}
