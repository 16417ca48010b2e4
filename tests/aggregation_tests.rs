use approx::assert_relative_eq;
use indexmap::IndexMap;
use perfchart::api::{
    Chart, ChartConfig, HistoryWindow, MetricDescriptor, MetricSample, MetricSpec, Semantics,
    SeriesId,
};
use perfchart::core::{PushDirection, Style, Unit};
use perfchart::render::NullRenderer;
use proptest::prelude::*;

fn chart_with(style: Style, metrics: usize) -> (Chart<NullRenderer>, Vec<SeriesId>) {
    let config = ChartConfig::new(HistoryWindow::new(16, 8)).with_style(style);
    let mut chart = Chart::new(NullRenderer::default(), config).expect("chart init");
    let ids = (0..metrics)
        .map(|i| {
            let descriptor = MetricDescriptor::new(
                MetricSpec::new("network.interface.packets").with_instance(format!("eth{i}")),
                Unit::count(),
                Semantics::Instant,
            );
            chart.add_series(descriptor, None).expect("add series")
        })
        .collect();
    (chart, ids)
}

fn tick(chart: &mut Chart<NullRenderer>, ids: &[SeriesId], values: &[f64]) {
    let mut source: IndexMap<SeriesId, MetricSample> = ids
        .iter()
        .zip(values)
        .map(|(id, value)| {
            let sample = if value.is_nan() {
                MetricSample::Error
            } else {
                MetricSample::instant(*value)
            };
            (*id, sample)
        })
        .collect();
    chart
        .tick(&mut source, PushDirection::Front)
        .expect("tick");
}

fn newest_display(chart: &Chart<NullRenderer>, ids: &[SeriesId]) -> Vec<f64> {
    ids.iter()
        .map(|id| {
            chart
                .series(*id)
                .and_then(|series| series.buffer().display(0))
                .expect("newest display")
        })
        .collect()
}

#[test]
fn line_style_displays_raw_values() {
    let (mut chart, ids) = chart_with(Style::Line, 2);
    tick(&mut chart, &ids, &[4.0, 9.0]);
    assert_eq!(newest_display(&chart, &ids), vec![4.0, 9.0]);
}

#[test]
fn stack_accumulates_in_insertion_order() {
    let (mut chart, ids) = chart_with(Style::Stack, 3);
    tick(&mut chart, &ids, &[1.0, 2.0, 3.0]);
    assert_eq!(newest_display(&chart, &ids), vec![1.0, 3.0, 6.0]);
}

#[test]
fn stack_skips_gaps_without_breaking_the_sum() {
    let (mut chart, ids) = chart_with(Style::Stack, 3);
    tick(&mut chart, &ids, &[1.0, f64::NAN, 3.0]);
    let display = newest_display(&chart, &ids);
    assert_eq!(display[0], 1.0);
    assert!(display[1].is_nan());
    assert_eq!(display[2], 4.0);
}

#[test]
fn hiding_a_series_removes_it_from_the_stack() {
    let (mut chart, ids) = chart_with(Style::Stack, 3);
    tick(&mut chart, &ids, &[1.0, 2.0, 3.0]);
    chart.set_series_hidden(ids[0], true).expect("hide");

    let display = newest_display(&chart, &ids);
    assert!(display[0].is_nan());
    assert_eq!(&display[1..], &[2.0, 5.0]);

    chart.set_series_hidden(ids[0], false).expect("show");
    assert_eq!(newest_display(&chart, &ids), vec![1.0, 3.0, 6.0]);
}

#[test]
fn utilisation_stacks_percentages_of_the_total() {
    let (mut chart, ids) = chart_with(Style::Utilisation, 3);
    tick(&mut chart, &ids, &[1.0, 1.0, 2.0]);
    assert_eq!(newest_display(&chart, &ids), vec![25.0, 50.0, 100.0]);
}

#[test]
fn utilisation_ignores_hidden_series_in_the_total() {
    let (mut chart, ids) = chart_with(Style::Utilisation, 3);
    tick(&mut chart, &ids, &[1.0, 1.0, 2.0]);
    chart.set_series_hidden(ids[2], true).expect("hide");

    let display = newest_display(&chart, &ids);
    assert_eq!(&display[..2], &[50.0, 100.0]);
    assert!(display[2].is_nan());
}

#[test]
fn utilisation_of_an_all_zero_column_is_empty() {
    let (mut chart, ids) = chart_with(Style::Utilisation, 2);
    tick(&mut chart, &ids, &[0.0, 0.0]);
    assert!(newest_display(&chart, &ids).iter().all(|value| value.is_nan()));
}

#[test]
fn fetch_errors_become_gaps_in_every_style() {
    for style in [Style::Bar, Style::Area, Style::Line, Style::Stack, Style::Utilisation] {
        let (mut chart, ids) = chart_with(style, 2);
        tick(&mut chart, &ids, &[f64::NAN, 5.0]);
        let display = newest_display(&chart, &ids);
        assert!(display[0].is_nan(), "{style:?} should keep the gap");
        let raw = chart
            .series(ids[0])
            .and_then(|series| series.buffer().raw(0))
            .expect("raw");
        assert!(raw.is_nan());
    }
}

#[test]
fn late_series_is_padded_for_stack_continuity() {
    let (mut chart, ids) = chart_with(Style::Stack, 1);
    tick(&mut chart, &ids, &[1.0]);
    tick(&mut chart, &ids, &[2.0]);

    let late = chart
        .add_series(
            MetricDescriptor::new(MetricSpec::new("late"), Unit::count(), Semantics::Instant),
            None,
        )
        .expect("add late series");
    let series = chart.series(late).expect("late series");
    assert_eq!(series.buffer().count(), 0);
    assert_eq!(series.buffer().stored_len(), 2);

    let ids = vec![ids[0], late];
    tick(&mut chart, &ids, &[3.0, 4.0]);
    assert_eq!(newest_display(&chart, &ids), vec![3.0, 7.0]);

    let series = chart.series(late).expect("late series");
    assert_eq!(series.buffer().count(), 1);
    assert_eq!(series.buffer().stored_len(), 3);
    assert_eq!(series.buffer().display(1), None);
}

#[test]
fn style_change_rebuilds_all_history() {
    let (mut chart, ids) = chart_with(Style::Line, 2);
    tick(&mut chart, &ids, &[1.0, 2.0]);
    tick(&mut chart, &ids, &[3.0, 4.0]);

    chart.set_style(Style::Stack).expect("to stack");
    let older: Vec<f64> = ids
        .iter()
        .map(|id| chart.series(*id).and_then(|s| s.buffer().display(1)).expect("display"))
        .collect();
    assert_eq!(older, vec![1.0, 3.0]);
    assert_eq!(newest_display(&chart, &ids), vec![3.0, 7.0]);

    chart.set_style(Style::Line).expect("back to line");
    assert_eq!(newest_display(&chart, &ids), vec![3.0, 4.0]);
}

proptest! {
    #[test]
    fn utilisation_tops_out_at_one_hundred(
        values in prop::collection::vec(0.001f64..1.0e6, 1..8)
    ) {
        let (mut chart, ids) = chart_with(Style::Utilisation, values.len());
        tick(&mut chart, &ids, &values);
        let display = newest_display(&chart, &ids);
        assert_relative_eq!(display[display.len() - 1], 100.0, max_relative = 1e-9);
        prop_assert!(display.windows(2).all(|pair| pair[0] <= pair[1] + 1e-9));
    }

    #[test]
    fn stack_display_is_prefix_sum(
        values in prop::collection::vec(-1.0e6f64..1.0e6, 1..8)
    ) {
        let (mut chart, ids) = chart_with(Style::Stack, values.len());
        tick(&mut chart, &ids, &values);
        let display = newest_display(&chart, &ids);
        let mut running = 0.0;
        for (value, shown) in values.iter().zip(display) {
            running += value;
            assert_relative_eq!(shown, running, epsilon = 1e-6);
        }
    }
}
