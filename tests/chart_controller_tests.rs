use indexmap::IndexMap;
use perfchart::ChartError;
use perfchart::api::{
    Chart, ChartConfig, HistoryWindow, MetricDescriptor, MetricSample, MetricSpec, Semantics,
    SeriesId, UTILISATION_AXIS_TITLE, source_from_fn,
};
use perfchart::core::{CurveShape, PushDirection, SpaceScale, Style, TimeScale, Unit, YAxisScale};
use perfchart::render::{ColorScheme, NullRenderer};

fn chart(style: Style) -> Chart<NullRenderer> {
    let config = ChartConfig::new(HistoryWindow::new(10, 4)).with_style(style);
    Chart::new(NullRenderer::default(), config).expect("chart init")
}

fn metric(name: &str, units: Unit) -> MetricDescriptor {
    MetricDescriptor::new(MetricSpec::new(name), units, Semantics::Instant)
}

fn tick_all(chart: &mut Chart<NullRenderer>, value: f64) {
    let mut source = source_from_fn(|_, _| MetricSample::instant(value));
    chart
        .tick(&mut source, PushDirection::Front)
        .expect("tick");
}

#[test]
fn first_series_fixes_chart_unit() {
    let mut chart = chart(Style::Line);
    chart
        .add_series(metric("disk.dev.read_bytes", Unit::space(SpaceScale::Kbyte)), None)
        .expect("first series");
    assert_eq!(chart.unit(), Unit::space(SpaceScale::Kbyte));

    chart
        .add_series(metric("disk.dev.write_bytes", Unit::space(SpaceScale::Mbyte)), None)
        .expect("same dimension, other scale");
    assert_eq!(chart.series_count(), 2);
}

#[test]
fn mismatched_dimensions_are_rejected() {
    let mut chart = chart(Style::Line);
    chart
        .add_series(metric("kernel.all.load", Unit::count()), None)
        .expect("first series");

    let err = chart
        .add_series(metric("mem.util.used", Unit::space(SpaceScale::Byte)), None)
        .expect_err("space on a count chart");
    assert!(matches!(err, ChartError::IncompatibleUnits { .. }));
    assert_eq!(chart.series_count(), 1);
}

#[test]
fn event_and_sampled_metrics_never_mix() {
    let mut sampled = chart(Style::Line);
    sampled
        .add_series(metric("kernel.all.load", Unit::count()), None)
        .expect("first series");
    let err = sampled
        .add_series(
            MetricDescriptor::event(MetricSpec::new("event.records"), Unit::space(SpaceScale::Byte)),
            None,
        )
        .expect_err("event on sampled chart");
    assert!(matches!(err, ChartError::IncompatibleType(_)));

    let mut events = chart(Style::None);
    events
        .add_series(
            MetricDescriptor::event(MetricSpec::new("event.records"), Unit::count()),
            None,
        )
        .expect("event chart");
    assert_eq!(events.style(), Style::Event);
    assert!(events.is_event_chart());
    assert_eq!(events.scale(), YAxisScale::EVENT);

    let err = events
        .add_series(metric("kernel.all.load", Unit::count()), None)
        .expect_err("sampled on event chart");
    assert!(matches!(err, ChartError::IncompatibleType(_)));

    let err = events.set_style(Style::Line).expect_err("event charts keep their style");
    assert!(matches!(err, ChartError::InvalidStyleTransition { .. }));
}

#[test]
fn sampled_series_need_a_drawable_style() {
    let mut chart = chart(Style::None);
    let err = chart
        .add_series(metric("kernel.all.load", Unit::count()), None)
        .expect_err("no style yet");
    assert!(matches!(err, ChartError::InvalidStyleTransition { .. }));

    chart.set_style(Style::Bar).expect("pick a style");
    chart
        .add_series(metric("kernel.all.load", Unit::count()), None)
        .expect("now accepted");

    let err = chart.set_style(Style::None).expect_err("cannot go back to none");
    assert!(matches!(err, ChartError::InvalidStyleTransition { .. }));
    let err = chart.set_style(Style::Event).expect_err("event is automatic");
    assert!(matches!(err, ChartError::InvalidStyleTransition { .. }));
}

#[test]
fn removed_series_keep_sampling_and_can_be_revived() {
    let mut chart = chart(Style::Line);
    let a = chart
        .add_series(metric("a", Unit::count()), None)
        .expect("a");
    let b = chart
        .add_series(metric("b", Unit::count()), None)
        .expect("b");

    chart.remove_series(b).expect("remove");
    assert!(!chart.is_active(b));
    assert!(chart.is_active(a));
    tick_all(&mut chart, 3.0);

    assert_eq!(chart.renderer().last_curve_count, 1);
    assert_eq!(chart.series(b).expect("still owned").buffer().count(), 1);
    assert_eq!(chart.series_ids(), vec![a, b]);

    chart.revive_series(b).expect("revive");
    assert!(chart.is_active(b));
    assert_eq!(chart.renderer().last_curve_count, 2);

    let renders = chart.renderer().render_count;
    chart.revive_series(b).expect("revive again");
    assert_eq!(chart.renderer().render_count, renders);
}

fn raw_and_display(chart: &Chart<NullRenderer>, id: SeriesId) -> Vec<(Option<f64>, Option<f64>)> {
    let finite = |value: f64| (!value.is_nan()).then_some(value);
    chart
        .series(id)
        .expect("series")
        .buffer()
        .populated()
        .map(|sample| (finite(sample.raw), finite(sample.display)))
        .collect()
}

#[test]
fn revived_series_match_one_that_was_never_removed() {
    let mut chart = chart(Style::Line);
    let used = || metric("mem.util.used", Unit::space(SpaceScale::Byte));
    let kept = chart.add_series(used(), Some("kept")).expect("kept");
    let revived = chart.add_series(used(), Some("revived")).expect("revived");
    chart.remove_series(revived).expect("remove");

    for sample in [
        MetricSample::instant(10.0),
        MetricSample::Error,
        MetricSample::instant(2048.0),
        MetricSample::instant(512.0),
    ] {
        let mut source = source_from_fn(|_, _| sample);
        chart
            .tick(&mut source, PushDirection::Front)
            .expect("tick");
    }
    assert_eq!(chart.unit(), Unit::space(SpaceScale::Kbyte));

    chart.revive_series(revived).expect("revive");
    let expected = raw_and_display(&chart, kept);
    assert_eq!(expected.len(), 4);
    assert_eq!(expected[0], (Some(0.5), Some(0.5)));
    assert_eq!(expected[2], (None, None));
    assert_eq!(raw_and_display(&chart, revived), expected);
}

#[test]
fn backward_ticks_keep_late_series_in_the_same_column() {
    let mut chart = chart(Style::Stack);
    let a = chart
        .add_series(metric("a", Unit::count()), None)
        .expect("a");
    for value in [1.0, 2.0, 3.0] {
        let mut source = source_from_fn(|_, _| MetricSample::instant(value));
        chart
            .tick(&mut source, PushDirection::Back)
            .expect("back tick");
    }

    let b = chart
        .add_series(metric("b", Unit::count()), None)
        .expect("b");
    let mut source = IndexMap::from([
        (a, MetricSample::instant(10.0)),
        (b, MetricSample::instant(100.0)),
    ]);
    chart
        .tick(&mut source, PushDirection::Back)
        .expect("back tick");

    let column = |id: SeriesId, index: usize| raw_and_display(&chart, id)[index];
    assert_eq!(column(a, 3), (Some(10.0), Some(10.0)));
    assert_eq!(column(b, 3), (Some(100.0), Some(110.0)));
    assert_eq!(column(b, 0), (None, None));

    let ticked = (raw_and_display(&chart, a), raw_and_display(&chart, b));
    chart.refresh().expect("refresh");
    assert_eq!((raw_and_display(&chart, a), raw_and_display(&chart, b)), ticked);
}

#[test]
fn unknown_handles_are_reported() {
    let mut other = chart(Style::Line);
    other
        .add_series(metric("a", Unit::count()), None)
        .expect("a");
    let stranger = other
        .add_series(metric("b", Unit::count()), None)
        .expect("b");

    let mut chart = chart(Style::Line);
    chart
        .add_series(metric("a", Unit::count()), None)
        .expect("a");
    let err = chart.remove_series(stranger).expect_err("unknown");
    assert!(matches!(err, ChartError::UnknownSeries(1)));
    assert!(!chart.is_active(stranger));
}

#[test]
fn counters_are_rate_converted() {
    let mut chart = chart(Style::Line);
    let id = chart
        .add_series(
            MetricDescriptor::new(
                MetricSpec::new("network.interface.in.bytes").with_instance("eth0"),
                Unit::space(SpaceScale::Byte),
                Semantics::Counter,
            ),
            None,
        )
        .expect("counter");
    assert_eq!(chart.unit().to_string(), "byte / sec");

    let mut source = IndexMap::from([(id, MetricSample::counter(1.0e9, 250.0))]);
    chart
        .tick(&mut source, PushDirection::Front)
        .expect("tick");
    let series = chart.series(id).expect("series");
    assert_eq!(series.buffer().raw(0), Some(250.0));
    assert_eq!(series.label(), "...ce.in.bytes[eth0]");
}

#[test]
fn time_counters_are_plotted_as_fractions() {
    let mut chart = chart(Style::Stack);
    let id = chart
        .add_series(
            MetricDescriptor::new(
                MetricSpec::new("kernel.all.cpu.sys"),
                Unit::time(TimeScale::Millisec),
                Semantics::Counter,
            ),
            Some("sys"),
        )
        .expect("counter");
    assert_eq!(chart.unit().dim_time, 0);
    assert_eq!(chart.unit().to_string(), "");
    let series = chart.series(id).expect("series");
    assert_eq!(series.scale(), 0.001);
    assert_eq!(series.label(), "sys");

    tick_all(&mut chart, 500.0);
    let series = chart.series(id).expect("series");
    assert_eq!(series.buffer().raw(0), Some(0.5));
}

#[test]
fn raw_values_are_plotted_without_rate_conversion() {
    let config = ChartConfig::new(HistoryWindow::new(10, 4))
        .with_style(Style::Line)
        .with_rate_convert(false);
    let mut chart = Chart::new(NullRenderer::default(), config).expect("chart init");
    let id = chart
        .add_series(
            MetricDescriptor::new(
                MetricSpec::new("network.interface.in.bytes"),
                Unit::space(SpaceScale::Byte),
                Semantics::Counter,
            ),
            None,
        )
        .expect("counter");
    assert_eq!(chart.unit(), Unit::space(SpaceScale::Byte));

    let mut source = IndexMap::from([(id, MetricSample::counter(100.0, 2.0))]);
    chart
        .tick(&mut source, PushDirection::Front)
        .expect("tick");
    assert_eq!(chart.series(id).expect("series").buffer().raw(0), Some(100.0));
}

#[test]
fn utilisation_pins_percentage_axis() {
    let mut chart = chart(Style::Line);
    chart
        .add_series(metric("a", Unit::count()), None)
        .expect("a");

    chart.set_style(Style::Utilisation).expect("to utilisation");
    assert_eq!(chart.scale(), YAxisScale::PERCENTAGE);
    assert_eq!(chart.y_axis_title(), UTILISATION_AXIS_TITLE);
    let frame = chart.render_frame().expect("frame");
    assert_eq!(frame.y_bounds, Some((0.0, 100.0)));
    assert_eq!(frame.curves[0].stroke.shape, CurveShape::Steps);
    assert!(frame.curves[0].stroke.filled);

    chart.set_style(Style::Bar).expect("to bar");
    assert!(chart.auto_scale());
    assert_eq!(chart.y_axis_title(), "count");
    let frame = chart.render_frame().expect("frame");
    assert_eq!(frame.curves[0].stroke.shape, CurveShape::Sticks);
}

#[test]
fn history_window_limits_storage_and_drawing() {
    let mut chart = chart(Style::Line);
    let id = chart
        .add_series(metric("a", Unit::count()), None)
        .expect("a");
    for value in 1..=8 {
        tick_all(&mut chart, f64::from(value));
    }
    let frame = chart.renderer().last_frame.as_ref().expect("frame");
    assert_eq!(frame.curves[0].values, vec![8.0, 7.0, 6.0, 5.0]);

    chart
        .set_history_window(HistoryWindow::new(3, 2))
        .expect("shrink");
    assert_eq!(chart.history(), HistoryWindow::new(3, 2));
    let series = chart.series(id).expect("series");
    assert_eq!(series.buffer().capacity(), 3);
    assert_eq!(series.buffer().count(), 3);
    let frame = chart.renderer().last_frame.as_ref().expect("frame");
    assert_eq!(frame.curves[0].values, vec![8.0, 7.0]);

    let err = chart
        .set_history_window(HistoryWindow::new(2, 5))
        .expect_err("visible beyond sample");
    assert!(matches!(err, ChartError::InvalidData(_)));
}

#[test]
fn live_data_can_be_preserved_and_punched_out() {
    let mut chart = chart(Style::Line);
    let id = chart
        .add_series(metric("a", Unit::count()), None)
        .expect("a");
    for value in [1.0, 2.0, 3.0] {
        tick_all(&mut chart, value);
    }

    chart.preserve_live_data(0, 2);
    chart.punchout_live_data(1);
    let buffer = chart.series(id).expect("series").buffer();
    assert_eq!(buffer.raw(0), Some(1.0));
    assert!(buffer.raw(1).expect("slot 1").is_nan());

    chart.preserve_live_data(2, 9);
    let buffer = chart.series(id).expect("series").buffer();
    assert!(buffer.display(2).expect("slot 2").is_nan());
}

#[test]
fn offscreen_ticks_do_not_draw() {
    let mut chart = chart(Style::Line);
    let id = chart
        .add_series(metric("a", Unit::count()), None)
        .expect("a");
    let renders = chart.renderer().render_count;

    let mut source = source_from_fn(|_, _| MetricSample::instant(5.0));
    chart
        .tick_offscreen(&mut source, PushDirection::Front)
        .expect("tick");
    assert_eq!(chart.renderer().render_count, renders);
    assert_eq!(chart.series(id).expect("series").buffer().display(0), Some(5.0));

    chart.refresh().expect("refresh");
    assert_eq!(chart.renderer().render_count, renders + 1);
}

#[test]
fn colors_follow_the_scheme_sequence() {
    let scheme = ColorScheme::default();
    let mut chart = chart(Style::Line);
    let a = chart
        .add_series(metric("a", Unit::count()), None)
        .expect("a");
    let b = chart
        .add_series(metric("b", Unit::count()), None)
        .expect("b");
    assert_eq!(chart.color(a), scheme.colors[0]);
    assert_eq!(chart.color(b), scheme.colors[1]);
    assert_eq!(chart.color_sequence(), 2);

    chart.set_scheme(scheme.clone()).expect("scheme");
    assert_eq!(chart.color_sequence(), 0);
    let c = chart
        .add_series(metric("c", Unit::count()), None)
        .expect("c");
    assert_eq!(chart.color(c), scheme.colors[0]);
}

#[test]
fn titles_expand_the_short_host_name() {
    let mut chart = chart(Style::Line);
    assert_eq!(chart.expanded_title("web.example.com"), None);

    chart
        .set_title(Some("CPU on %h (%h)".to_owned()))
        .expect("title");
    assert_eq!(chart.title(), Some("CPU on %h (%h)"));
    assert_eq!(
        chart.expanded_title("web.example.com").as_deref(),
        Some("CPU on web (web)")
    );
    assert_eq!(
        chart.expanded_title("10.1.2.3").as_deref(),
        Some("CPU on 10.1.2.3 (10.1.2.3)")
    );
}

#[test]
fn legend_is_hidden_until_there_is_a_series() {
    let mut chart = chart(Style::Line);
    assert!(!chart.legend_visible());
    chart
        .add_series(metric("a", Unit::count()), None)
        .expect("a");
    assert!(chart.legend_visible());

    chart.set_legend_visible(false).expect("hide legend");
    let frame = chart.renderer().last_frame.as_ref().expect("frame");
    assert!(!frame.legend_visible);
}

#[test]
fn point_readout_uses_the_chart_unit() {
    let mut chart = chart(Style::Line);
    chart
        .add_series(metric("mem.util.used", Unit::space(SpaceScale::Mbyte)), None)
        .expect("a");
    let text = chart.point_selected(60.5, 3.25).expect("readout");
    assert_eq!(text, "[3.25 Mbyte at 00:01:00.500]");
    assert!(chart.picker().selection().is_some());

    let err = chart.pointer_moved(f64::NAN, 1.0).expect_err("not finite");
    assert!(matches!(err, ChartError::InvalidData(_)));
}

#[test]
fn config_survives_json_roundtrip() {
    let config = ChartConfig::new(HistoryWindow::new(120, 30))
        .with_style(Style::Area)
        .with_title("Disk on %h");
    let json = config.to_json_pretty().expect("serialize");
    let parsed = ChartConfig::from_json_str(&json).expect("parse");
    assert_eq!(parsed, config);

    let minimal = ChartConfig::from_json_str(r#"{"history":{"sample":10,"visible":5}}"#)
        .expect("defaults fill the rest");
    assert!(minimal.rate_convert);
    assert_eq!(minimal.style, Style::None);

    let err = ChartConfig::from_json_str(r#"{"history":{"sample":10,"visible":5},"style":"Event"}"#)
        .expect_err("event style is never configured");
    assert!(matches!(err, ChartError::InvalidStyleTransition { .. }));
}

#[test]
fn tracing_subscriber_installs_at_most_once() {
    let first = perfchart::telemetry::init_tracing_with_filter("perfchart=trace");
    let second = perfchart::telemetry::init_default_tracing();
    assert!(!(first && second));

    let mut chart = chart(Style::Line);
    chart
        .add_series(metric("a", Unit::count()), None)
        .expect("a");
    tick_all(&mut chart, 1.0);
}
