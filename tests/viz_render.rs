use gdp_compare::chart::{ChartSettings, ZoomWindow, build_interactive, build_single};
use gdp_compare::presets::preset_for;
use gdp_compare::{
    Dataset, ImageEngine, Lang, MetricKey, QuickFilter, RenderEngine, SeriesPair, resolve, viz,
};
use std::fs;
use tempfile::tempdir;

fn dataset() -> Dataset {
    let level = SeriesPair {
        china: vec![Some(1100.0), Some(1230.0), None, Some(1790.0)],
        usa: vec![Some(1820.0), Some(1950.0), Some(2140.0), Some(2540.0)],
    };
    let growth = SeriesPair {
        china: vec![None, Some(11.8), None, Some(-0.5)],
        usa: vec![None, Some(7.1), Some(9.7), Some(18.7)],
    };
    Dataset {
        years: vec![2019, 2020, 2021, 2022],
        nominal: level.clone(),
        real: level.clone(),
        ppp: level,
        nominal_growth: growth.clone(),
        real_growth: growth.clone(),
        ppp_growth: growth,
    }
}

fn settings() -> ChartSettings {
    ChartSettings {
        lang: Lang::En,
        ..Default::default()
    }
}

#[test]
fn single_charts_render_to_svg_and_png() {
    let data = dataset();
    let dir = tempdir().unwrap();
    for key in MetricKey::ALL {
        let (pair, labels) = resolve::resolve(&data, key, Lang::En);
        let option = build_single(&data.years, pair, key, &labels, &settings(), ZoomWindow::default());
        for ext in ["svg", "png"] {
            let path = dir.path().join(format!("{key}.{ext}"));
            viz::render_to_file(&option, &path, 800, 500).unwrap();
            assert!(fs::metadata(&path).unwrap().len() > 0, "{key}.{ext} is empty");
        }
    }
    let svg = fs::read_to_string(dir.path().join("nominal.svg")).unwrap();
    assert!(svg.contains("<svg"));
    assert!(svg.contains("China"));
}

#[test]
fn image_engine_redraws_on_patch_and_resize() {
    let data = dataset();
    let dir = tempdir().unwrap();
    let path = dir.path().join("all.svg");
    let mut engine = ImageEngine::new(&path, 1000, 600);

    assert!(engine.save_as_image(dir.path().join("early.svg")).is_err());
    assert!(engine.set_legend_selected(&Default::default()).is_err());

    let option = build_interactive(&data, &preset_for(QuickFilter::All), &settings(), ZoomWindow::default());
    engine.set_option(&option).unwrap();
    let all = fs::read_to_string(&path).unwrap();

    engine
        .set_legend_selected(&preset_for(QuickFilter::Growth).named(Lang::En))
        .unwrap();
    let growth = fs::read_to_string(&path).unwrap();
    assert_ne!(all, growth);
    assert_eq!(engine.current().unwrap().visible_series().count(), 6);

    engine.resize(640, 400).unwrap();
    assert!(fs::read_to_string(&path).unwrap().contains("640"));

    let copy = dir.path().join("copy.png");
    engine.save_as_image(&copy).unwrap();
    assert!(fs::metadata(&copy).unwrap().len() > 0);
}

#[test]
fn zoomed_chart_renders() {
    let data = dataset();
    let dir = tempdir().unwrap();
    let key = MetricKey::default();
    let (pair, labels) = resolve::resolve(&data, key, Lang::En);
    let option = build_single(&data.years, pair, key, &labels, &settings(), ZoomWindow::new(50.0, 100.0));
    let path = dir.path().join("zoomed.svg");
    viz::render_to_file(&option, &path, 800, 500).unwrap();
    assert!(fs::metadata(&path).unwrap().len() > 0);
}
