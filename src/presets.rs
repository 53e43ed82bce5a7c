//! Quick-filter presets for the 12-series interactive chart.

use crate::format::Lang;
use crate::models::{Country, Metric, MetricKey};
use crate::option::SeriesMeta;
use crate::resolve::{country_name, metric_name};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// The four quick-filter buttons.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuickFilter {
    All,
    #[default]
    Nominal,
    Real,
    Growth,
}

impl QuickFilter {
    pub const ALL: [QuickFilter; 4] = [
        QuickFilter::Nominal,
        QuickFilter::Real,
        QuickFilter::Growth,
        QuickFilter::All,
    ];

    /// Parse a button id (`btn-growth`) or bare name (`growth`).
    pub fn from_button_id(id: &str) -> Option<Self> {
        let id = id.trim().to_ascii_lowercase();
        match id.strip_prefix("btn-").unwrap_or(&id) {
            "all" => Some(QuickFilter::All),
            "nominal" => Some(QuickFilter::Nominal),
            "real" => Some(QuickFilter::Real),
            "growth" => Some(QuickFilter::Growth),
            _ => None,
        }
    }

    pub fn button_id(self) -> &'static str {
        match self {
            QuickFilter::All => "btn-all",
            QuickFilter::Nominal => "btn-nominal",
            QuickFilter::Real => "btn-real",
            QuickFilter::Growth => "btn-growth",
        }
    }

    pub fn label(self, lang: Lang) -> &'static str {
        match (self, lang) {
            (QuickFilter::All, Lang::Zh) => "全部",
            (QuickFilter::Nominal, Lang::Zh) => "名义GDP",
            (QuickFilter::Real, Lang::Zh) => "实际GDP",
            (QuickFilter::Growth, Lang::Zh) => "增速",
            (QuickFilter::All, Lang::En) => "All",
            (QuickFilter::Nominal, Lang::En) => "Nominal",
            (QuickFilter::Real, Lang::En) => "Real",
            (QuickFilter::Growth, Lang::En) => "Growth",
        }
    }

    fn admits(self, id: SeriesMeta) -> bool {
        match self {
            QuickFilter::All => true,
            QuickFilter::Nominal => id.key == MetricKey::level(Metric::Nominal),
            QuickFilter::Real => id.key == MetricKey::level(Metric::Real),
            QuickFilter::Growth => id.key.growth,
        }
    }
}

impl fmt::Display for QuickFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.button_id().trim_start_matches("btn-"))
    }
}

/// Every series of the interactive chart, in drawing order.
pub fn all_series() -> Vec<SeriesMeta> {
    MetricKey::ALL
        .into_iter()
        .flat_map(|key| Country::ALL.into_iter().map(move |country| SeriesMeta { country, key }))
        .collect()
}

/// Display name of an interactive series, e.g. `中国 名义GDP增速`.
pub fn series_name(id: SeriesMeta, lang: Lang) -> String {
    format!("{} {}", country_name(id.country, lang), metric_name(id.key, lang))
}

/// Legend visibility per series.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegendSelection(BTreeMap<SeriesMeta, bool>);

impl LegendSelection {
    pub fn is_selected(&self, id: SeriesMeta) -> bool {
        self.0.get(&id).copied().unwrap_or(false)
    }

    pub fn selected_count(&self) -> usize {
        self.0.values().filter(|v| **v).count()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (SeriesMeta, bool)> + '_ {
        self.0.iter().map(|(k, v)| (*k, *v))
    }

    /// The display-name keyed map used by the engine's legend.
    pub fn named(&self, lang: Lang) -> BTreeMap<String, bool> {
        self.0
            .iter()
            .map(|(id, on)| (series_name(*id, lang), *on))
            .collect()
    }
}

/// Legend map for a quick filter; covers all 12 series.
pub fn preset_for(filter: QuickFilter) -> LegendSelection {
    LegendSelection(
        all_series()
            .into_iter()
            .map(|id| (id, filter.admits(id)))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn button_ids_round_trip() {
        for f in QuickFilter::ALL {
            assert_eq!(QuickFilter::from_button_id(f.button_id()), Some(f));
            assert_eq!(QuickFilter::from_button_id(&f.to_string()), Some(f));
        }
        assert_eq!(QuickFilter::from_button_id("btn-ppp"), None);
    }

    #[test]
    fn names_are_unique() {
        for lang in [Lang::Zh, Lang::En] {
            let named = preset_for(QuickFilter::All).named(lang);
            assert_eq!(named.len(), 12);
        }
    }

    #[test]
    fn real_preset_selects_real_levels() {
        let sel = preset_for(QuickFilter::Real);
        assert_eq!(sel.selected_count(), 2);
        assert!(sel.is_selected(SeriesMeta {
            country: Country::Usa,
            key: MetricKey::level(Metric::Real)
        }));
        assert!(!sel.is_selected(SeriesMeta {
            country: Country::Usa,
            key: MetricKey::growth(Metric::Real)
        }));
    }
}
