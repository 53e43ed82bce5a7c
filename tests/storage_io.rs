use gdp_compare::storage;
use gdp_compare::{DatasetError, MetricKey};
use std::fs;
use tempfile::tempdir;

const JSON: &str = r#"{
    "years": [2021, 2022],
    "nominal": {"china": [17820, 17963], "usa": [23315, 25464]},
    "real": {"china": [15870, 16350], "usa": [20650, 21050]},
    "ppp": {"china": [28800, 30300], "usa": [23315, 25464]},
    "nominalGrowth": {"china": [0.8], "usa": [9.22]},
    "realGrowth": {"china": [3.02], "usa": [1.94]},
    "pppGrowth": {"china": [5.21], "usa": [9.22]}
}"#;

#[test]
fn load_json_and_js_files() {
    let dir = tempdir().unwrap();
    let json_path = dir.path().join("gdp.json");
    fs::write(&json_path, JSON).unwrap();
    let from_json = storage::load_dataset(&json_path).unwrap();

    let js_path = dir.path().join("gdp-data.js");
    fs::write(&js_path, format!("/* data */\nwindow.gdpData = {JSON};\n")).unwrap();
    let from_js = storage::load_dataset(&js_path).unwrap();

    assert_eq!(from_json, from_js);
    assert_eq!(from_json.real_growth.china, vec![None, Some(3.02)]);
}

#[test]
fn misaligned_series_are_rejected() {
    let bad = JSON.replace("[15870, 16350]", "[15870]");
    let err = storage::parse_dataset(&bad).unwrap_err();
    let inner = err.downcast_ref::<DatasetError>().expect("dataset error");
    assert!(matches!(inner, DatasetError::Misaligned { found: 1, expected: 2, .. }));
    assert!(storage::load_dataset("/definitely/not/here.json").is_err());
}

#[test]
fn export_csv_is_tidy() {
    let data = storage::parse_dataset(JSON).unwrap();
    let dir = tempdir().unwrap();
    let path = dir.path().join("gdp.csv");
    storage::save_csv(&data, &path).unwrap();

    let txt = fs::read_to_string(&path).unwrap();
    let mut lines = txt.lines();
    assert_eq!(lines.next(), Some("year,country,metric,growth,value"));
    assert_eq!(lines.count(), MetricKey::ALL.len() * 2 * data.years.len());
    assert!(txt.contains("2021,china,nominal,true,\n"));
    assert!(txt.contains("2022,usa,ppp,false,25464.0\n"));
}

#[test]
fn option_json_round_trips() {
    use gdp_compare::chart::{ChartSettings, ZoomWindow, build_single};
    use gdp_compare::{ChartOption, Lang, resolve};

    let data = storage::parse_dataset(JSON).unwrap();
    let key = MetricKey::default();
    let (pair, labels) = resolve::resolve(&data, key, Lang::Zh);
    let option = build_single(&data.years, pair, key, &labels, &ChartSettings::default(), ZoomWindow::default());

    let dir = tempdir().unwrap();
    let path = dir.path().join("option.json");
    storage::save_option_json(&option, &path).unwrap();
    let v: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(v["xAxis"]["axisLabel"]["formatter"], "{value}年");
    assert_eq!(v["series"][0]["markPoint"]["data"][0]["type"], "max");
    let back: ChartOption = serde_json::from_value(v).unwrap();
    assert_eq!(back, option);
}

#[test]
fn demo_js_file_loads_like_the_json_one() {
    let root = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("demos");
    let from_js = storage::load_dataset(root.join("gdp.js")).unwrap();
    let from_json = storage::load_dataset(root.join("gdp.json")).unwrap();
    assert_eq!(from_js, from_json);
    assert_eq!(from_js.years.first(), Some(&2015));
    assert_eq!(from_js.nominal_growth.china[0], None);
}
