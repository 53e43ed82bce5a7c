use gdp_compare::resolve::{self, labels};
use gdp_compare::{Dataset, Lang, MetricKey, SeriesPair};

fn pair(seed: f64) -> SeriesPair {
    SeriesPair {
        china: vec![Some(seed), Some(seed + 1.0)],
        usa: vec![Some(seed + 2.0), None],
    }
}

fn dataset() -> Dataset {
    Dataset {
        years: vec![2021, 2022],
        nominal: pair(1.0),
        real: pair(10.0),
        ppp: pair(20.0),
        nominal_growth: pair(30.0),
        real_growth: pair(40.0),
        ppp_growth: pair(50.0),
    }
}

#[test]
fn growth_units_and_only_growth_units_end_in_percent() {
    for lang in [Lang::Zh, Lang::En] {
        for key in MetricKey::ALL {
            let l = labels(key, lang);
            assert_eq!(l.is_growth, key.growth, "{key} {lang:?}");
            assert_eq!(l.unit.ends_with('%'), key.growth, "{key} {lang:?}: {}", l.unit);
            assert!(!l.title.is_empty());
        }
    }
}

#[test]
fn every_key_resolves_to_its_own_slice() {
    let data = dataset();
    for key in MetricKey::ALL {
        let (slice, _) = resolve::resolve(&data, key, Lang::Zh);
        assert!(std::ptr::eq(slice, data.series(key)), "{key}");
    }
    let (real_growth, _) = resolve::resolve(&data, MetricKey::parse("real-growth").unwrap(), Lang::En);
    assert_eq!(real_growth.china[0], Some(40.0));
}

#[test]
fn titles_differ_per_key_and_language() {
    let mut seen = std::collections::HashSet::new();
    for lang in [Lang::Zh, Lang::En] {
        for key in MetricKey::ALL {
            assert!(seen.insert(labels(key, lang).title), "duplicate title for {key}");
        }
    }
    assert_eq!(seen.len(), 12);
}

#[test]
fn unknown_selector_falls_back_to_nominal_level() {
    let data = dataset();
    let (slice, l) = resolve::resolve_selector(&data, "gnp-per-capita", Lang::Zh);
    assert!(std::ptr::eq(slice, &data.nominal));
    assert!(!l.is_growth);
    assert_eq!(l, labels(MetricKey::default(), Lang::Zh));
}
