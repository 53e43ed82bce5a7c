use gdp_compare::chart::ChartSettings;
use gdp_compare::{
    Dashboard, Dataset, MemoryEngine, Metric, QuickFilter, SeriesPair, ValueMode, View,
};

fn dataset() -> Dataset {
    let p = SeriesPair {
        china: vec![Some(100.0), Some(110.0), Some(120.0)],
        usa: vec![Some(200.0), Some(210.0), Some(220.0)],
    };
    let g = SeriesPair {
        china: vec![None, Some(10.0), Some(9.09)],
        usa: vec![None, Some(5.0), Some(4.76)],
    };
    Dataset {
        years: vec![2020, 2021, 2022],
        nominal: p.clone(),
        real: p.clone(),
        ppp: p,
        nominal_growth: g.clone(),
        real_growth: g.clone(),
        ppp_growth: g,
    }
}

fn dashboard() -> Dashboard<MemoryEngine> {
    Dashboard::new(
        dataset(),
        ChartSettings::default(),
        MemoryEngine::new(1000, 600),
        MemoryEngine::new(1000, 600),
    )
}

#[test]
fn switching_away_and_back_rebuilds_the_same_option() {
    let mut dash = dashboard();
    dash.start().unwrap();
    let first = dash.static_chart().current().cloned().unwrap();

    dash.set_metric(Metric::Ppp).unwrap();
    dash.set_mode(ValueMode::Growth).unwrap();
    assert_ne!(dash.static_chart().current().unwrap(), &first);

    dash.set_mode(ValueMode::Value).unwrap();
    dash.set_metric(Metric::Nominal).unwrap();
    assert_eq!(dash.static_chart().current().unwrap(), &first);
    // every change is a full replace
    assert_eq!(dash.static_chart().replace_count(), 5);
    assert_eq!(dash.static_chart().patch_count(), 0);
}

#[test]
fn growth_selector_switches_mode() {
    let mut dash = dashboard();
    dash.start().unwrap();
    dash.set_metric_selector("real-growth").unwrap();
    assert_eq!(dash.selection().metric, Metric::Real);
    assert!(dash.is_mode_active(ValueMode::Growth));
    assert!(!dash.is_mode_active(ValueMode::Value));
    let option = dash.static_chart().current().unwrap();
    assert!(option.series.iter().all(|s| s.meta.key.growth));
    assert!(option.series.iter().all(|s| s.mark_point.is_none()));
}

#[test]
fn filters_patch_only_a_rendered_interactive_chart() {
    let mut dash = dashboard();
    dash.start().unwrap();
    assert_eq!(dash.selection().view, View::Static);

    // not rendered yet: recorded, not sent
    dash.apply_filter(QuickFilter::All).unwrap();
    assert_eq!(dash.interactive_chart().patch_count(), 0);
    assert!(dash.interactive_chart().current().is_none());
    assert!(!dash.is_filter_active(QuickFilter::All));

    dash.show_interactive().unwrap();
    assert_eq!(dash.interactive_chart().replace_count(), 1);
    let opt = dash.interactive_chart().current().unwrap();
    assert_eq!(opt.visible_series().count(), 12);
    assert!(dash.is_filter_active(QuickFilter::All));

    dash.apply_filter_button("btn-growth").unwrap();
    assert_eq!(dash.interactive_chart().replace_count(), 1);
    assert_eq!(dash.interactive_chart().patch_count(), 1);
    let opt = dash.interactive_chart().current().unwrap();
    assert_eq!(opt.visible_series().count(), 6);
    assert!(opt.visible_series().all(|s| s.meta.key.growth));
    assert!(dash.is_filter_active(QuickFilter::Growth));

    // unknown buttons are ignored
    dash.apply_filter_button("btn-ppp").unwrap();
    assert_eq!(dash.interactive_chart().patch_count(), 1);
    assert!(dash.is_filter_active(QuickFilter::Growth));
}

#[test]
fn zoom_and_restore_apply_to_the_visible_chart() {
    let mut dash = dashboard();
    dash.start().unwrap();
    dash.zoom(80.0, 20.0).unwrap();
    let opt = dash.static_chart().current().unwrap();
    assert_eq!(opt.zoom_window(), (20.0, 80.0));
    assert!(opt.data_zoom.iter().all(|z| z.start == 20.0 && z.end == 80.0));

    dash.restore().unwrap();
    assert_eq!(dash.static_chart().current().unwrap().zoom_window(), (0.0, 100.0));

    dash.resize(640, 480).unwrap();
    assert_eq!(dash.static_chart().size(), (640, 480));
    assert_eq!(dash.interactive_chart().size(), (640, 480));
}
