use gdp_compare::chart::{ChartSettings, ZoomWindow, build_interactive};
use gdp_compare::presets::{all_series, preset_for, series_name};
use gdp_compare::{Dataset, Lang, Metric, MetricKey, QuickFilter, SeriesPair};

fn selected_for(button: &str) -> usize {
    let filter = QuickFilter::from_button_id(button).expect("known button");
    preset_for(filter).selected_count()
}

#[test]
fn button_counts() {
    assert_eq!(selected_for("btn-all"), 12);
    assert_eq!(selected_for("btn-nominal"), 2);
    assert_eq!(selected_for("btn-real"), 2);
    assert_eq!(selected_for("btn-growth"), 6);
    assert!(QuickFilter::from_button_id("btn-ppp").is_none());
}

#[test]
fn presets_cover_every_series() {
    for filter in QuickFilter::ALL {
        let sel = preset_for(filter);
        assert_eq!(sel.len(), 12);
        for id in all_series() {
            // every id has an explicit entry, selected or not
            assert!(sel.iter().any(|(k, _)| k == id));
        }
    }
}

#[test]
fn growth_preset_shows_only_growth_series() {
    let sel = preset_for(QuickFilter::Growth);
    for (id, on) in sel.iter() {
        assert_eq!(on, id.key.growth, "{}", series_name(id, Lang::En));
    }
    let nominal = preset_for(QuickFilter::Nominal);
    for (id, on) in nominal.iter() {
        assert_eq!(on, id.key == MetricKey::level(Metric::Nominal));
    }
}

#[test]
fn named_maps_match_interactive_legend() {
    let p = SeriesPair {
        china: vec![Some(1.0)],
        usa: vec![Some(2.0)],
    };
    let data = Dataset {
        years: vec![2022],
        nominal: p.clone(),
        real: p.clone(),
        ppp: p.clone(),
        nominal_growth: p.clone(),
        real_growth: p.clone(),
        ppp_growth: p,
    };
    for lang in [Lang::Zh, Lang::En] {
        let settings = ChartSettings {
            lang,
            ..Default::default()
        };
        let option = build_interactive(&data, &preset_for(QuickFilter::All), &settings, ZoomWindow::default());
        for filter in QuickFilter::ALL {
            let named = preset_for(filter).named(lang);
            let mut keys: Vec<&String> = named.keys().collect();
            let mut legend: Vec<&String> = option.legend.data.iter().collect();
            keys.sort();
            legend.sort();
            assert_eq!(keys, legend);
        }
    }
}
