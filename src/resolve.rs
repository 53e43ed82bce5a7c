//! Metric key -> (dataset slice, labels).

use crate::format::Lang;
use crate::models::{Country, Dataset, Metric, MetricKey, SeriesPair};
use serde::{Deserialize, Serialize};

/// Title, axis unit and growth flag for one metric key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelBundle {
    pub title: String,
    pub unit: String,
    pub is_growth: bool,
}

struct LabelRow {
    zh_title: &'static str,
    zh_unit: &'static str,
    en_title: &'static str,
    en_unit: &'static str,
}

/// Indexed by [`MetricKey::index`].
const LABELS: [LabelRow; 6] = [
    LabelRow {
        zh_title: "中美名义GDP对比(1978-至今)",
        zh_unit: "十亿美元",
        en_title: "China vs. USA nominal GDP (1978-present)",
        en_unit: "billion US$",
    },
    LabelRow {
        zh_title: "中美实际GDP对比(1978-至今)",
        zh_unit: "十亿美元(2015年不变价)",
        en_title: "China vs. USA real GDP (1978-present)",
        en_unit: "billion US$ (constant 2015)",
    },
    LabelRow {
        zh_title: "中美GDP(PPP)对比(1978-至今)",
        zh_unit: "十亿国际元",
        en_title: "China vs. USA GDP, PPP (1978-present)",
        en_unit: "billion international $",
    },
    LabelRow {
        zh_title: "中美名义GDP增速对比(1978-至今)",
        zh_unit: "增长率%",
        en_title: "China vs. USA nominal GDP growth (1978-present)",
        en_unit: "growth rate %",
    },
    LabelRow {
        zh_title: "中美实际GDP增速对比(1978-至今)",
        zh_unit: "增长率%",
        en_title: "China vs. USA real GDP growth (1978-present)",
        en_unit: "growth rate %",
    },
    LabelRow {
        zh_title: "中美GDP(PPP)增速对比(1978-至今)",
        zh_unit: "增长率%",
        en_title: "China vs. USA GDP growth, PPP (1978-present)",
        en_unit: "growth rate %",
    },
];

/// Labels for a metric key.
pub fn labels(key: MetricKey, lang: Lang) -> LabelBundle {
    let row = &LABELS[key.index()];
    let (title, unit) = match lang {
        Lang::Zh => (row.zh_title, row.zh_unit),
        Lang::En => (row.en_title, row.en_unit),
    };
    LabelBundle {
        title: title.to_string(),
        unit: unit.to_string(),
        is_growth: key.growth,
    }
}

/// Borrow the slice of `dataset` for `key` together with its labels.
pub fn resolve(dataset: &Dataset, key: MetricKey, lang: Lang) -> (&SeriesPair, LabelBundle) {
    (dataset.series(key), labels(key, lang))
}

/// Like [`resolve`] but from a selector string; unknown selectors resolve
/// to nominal/level.
pub fn resolve_selector<'a>(
    dataset: &'a Dataset,
    selector: &str,
    lang: Lang,
) -> (&'a SeriesPair, LabelBundle) {
    resolve(dataset, MetricKey::from_selector(selector), lang)
}

/// Display name of a country.
pub fn country_name(country: Country, lang: Lang) -> &'static str {
    match (country, lang) {
        (Country::China, Lang::Zh) => "中国",
        (Country::Usa, Lang::Zh) => "美国",
        (Country::China, Lang::En) => "China",
        (Country::Usa, Lang::En) => "USA",
    }
}

/// Short metric name used in multi-series legends, e.g. `名义GDP增速` / `nominal GDP growth`.
pub fn metric_name(key: MetricKey, lang: Lang) -> String {
    let base = match (key.metric, lang) {
        (Metric::Nominal, Lang::Zh) => "名义GDP",
        (Metric::Real, Lang::Zh) => "实际GDP",
        (Metric::Ppp, Lang::Zh) => "GDP(PPP)",
        (Metric::Nominal, Lang::En) => "nominal GDP",
        (Metric::Real, Lang::En) => "real GDP",
        (Metric::Ppp, Lang::En) => "GDP (PPP)",
    };
    match (key.growth, lang) {
        (false, _) => base.to_string(),
        (true, Lang::Zh) => format!("{base}增速"),
        (true, Lang::En) => format!("{base} growth"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn growth_flag_and_unit_suffix_agree() {
        for lang in [Lang::Zh, Lang::En] {
            for key in MetricKey::ALL {
                let b = labels(key, lang);
                assert_eq!(b.is_growth, key.growth);
                assert_eq!(b.unit.ends_with('%'), key.growth, "{key} {lang:?}");
            }
        }
    }

    #[test]
    fn unknown_selector_is_nominal() {
        let ds = Dataset {
            years: vec![2000],
            nominal: SeriesPair {
                china: vec![Some(1.0)],
                usa: vec![Some(2.0)],
            },
            ..Default::default()
        };
        let (pair, bundle) = resolve_selector(&ds, "bogus", Lang::Zh);
        assert!(std::ptr::eq(pair, &ds.nominal));
        assert_eq!(bundle, labels(MetricKey::default(), Lang::Zh));
    }

    #[test]
    fn series_names() {
        assert_eq!(metric_name(MetricKey::growth(Metric::Real), Lang::Zh), "实际GDP增速");
        assert_eq!(metric_name(MetricKey::level(Metric::Ppp), Lang::En), "GDP (PPP)");
        assert_eq!(country_name(Country::Usa, Lang::Zh), "美国");
    }
}
