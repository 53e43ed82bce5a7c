use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Country of a series. Only the two compared economies exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Country {
    China,
    Usa,
}

impl Country {
    pub const ALL: [Country; 2] = [Country::China, Country::Usa];

    /// Stable lowercase id, matching the dataset field names.
    pub fn id(self) -> &'static str {
        match self {
            Country::China => "china",
            Country::Usa => "usa",
        }
    }
}

/// GDP measure.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    #[default]
    Nominal,
    Real,
    Ppp,
}

impl Metric {
    pub const ALL: [Metric; 3] = [Metric::Nominal, Metric::Real, Metric::Ppp];

    pub fn id(self) -> &'static str {
        match self {
            Metric::Nominal => "nominal",
            Metric::Real => "real",
            Metric::Ppp => "ppp",
        }
    }
}

/// One of the six dataset slices: a metric, either as a level or as its growth rate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MetricKey {
    pub metric: Metric,
    pub growth: bool,
}

impl MetricKey {
    /// All keys, levels first, in metric order.
    pub const ALL: [MetricKey; 6] = [
        MetricKey::level(Metric::Nominal),
        MetricKey::level(Metric::Real),
        MetricKey::level(Metric::Ppp),
        MetricKey::growth(Metric::Nominal),
        MetricKey::growth(Metric::Real),
        MetricKey::growth(Metric::Ppp),
    ];

    pub const fn level(metric: Metric) -> Self {
        Self { metric, growth: false }
    }

    pub const fn growth(metric: Metric) -> Self {
        Self { metric, growth: true }
    }

    /// Position in [`MetricKey::ALL`]; used to index lookup tables.
    pub fn index(self) -> usize {
        let m = match self.metric {
            Metric::Nominal => 0,
            Metric::Real => 1,
            Metric::Ppp => 2,
        };
        if self.growth { m + 3 } else { m }
    }

    /// Parse a selector value such as `"real"` or `"ppp-growth"`.
    ///
    /// Unknown values fall back to nominal/level.
    pub fn from_selector(s: &str) -> Self {
        Self::parse(s).unwrap_or_default()
    }

    /// Strict variant of [`MetricKey::from_selector`].
    pub fn parse(s: &str) -> Option<Self> {
        let norm = s.trim().to_ascii_lowercase().replace('_', "-");
        let (base, growth) = match norm.strip_suffix("-growth") {
            Some(base) => (base.to_string(), true),
            None => (norm, false),
        };
        let metric = match base.as_str() {
            "nominal" => Metric::Nominal,
            "real" => Metric::Real,
            "ppp" => Metric::Ppp,
            _ => return None,
        };
        Some(Self { metric, growth })
    }

    pub fn as_selector(self) -> String {
        if self.growth {
            format!("{}-growth", self.metric.id())
        } else {
            self.metric.id().to_string()
        }
    }
}

impl fmt::Display for MetricKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_selector())
    }
}

/// Single-chart display mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueMode {
    #[default]
    Value,
    Growth,
}

/// Which chart of the dual-view page is showing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    /// Nothing rendered yet.
    #[default]
    None,
    Static,
    Interactive,
}

/// Values of both countries for one metric, index-aligned with `Dataset::years`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeriesPair {
    pub china: Vec<Option<f64>>,
    pub usa: Vec<Option<f64>>,
}

impl SeriesPair {
    pub fn get(&self, country: Country) -> &[Option<f64>] {
        match country {
            Country::China => &self.china,
            Country::Usa => &self.usa,
        }
    }

    fn get_mut(&mut self, country: Country) -> &mut Vec<Option<f64>> {
        match country {
            Country::China => &mut self.china,
            Country::Usa => &mut self.usa,
        }
    }
}

/// Pre-computed GDP figures as shipped with the page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    #[serde(deserialize_with = "de_years")]
    pub years: Vec<i32>,
    pub nominal: SeriesPair,
    pub real: SeriesPair,
    pub ppp: SeriesPair,
    pub nominal_growth: SeriesPair,
    pub real_growth: SeriesPair,
    pub ppp_growth: SeriesPair,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DatasetError {
    #[error("dataset has no years")]
    NoYears,
    #[error("years are not strictly increasing at index {index} ({year})")]
    YearsNotIncreasing { index: usize, year: i32 },
    #[error("{key}.{country} has {found} values, expected {expected}")]
    Misaligned {
        key: String,
        country: &'static str,
        found: usize,
        expected: usize,
    },
}

impl Dataset {
    pub fn series(&self, key: MetricKey) -> &SeriesPair {
        match (key.metric, key.growth) {
            (Metric::Nominal, false) => &self.nominal,
            (Metric::Real, false) => &self.real,
            (Metric::Ppp, false) => &self.ppp,
            (Metric::Nominal, true) => &self.nominal_growth,
            (Metric::Real, true) => &self.real_growth,
            (Metric::Ppp, true) => &self.ppp_growth,
        }
    }

    fn series_mut(&mut self, key: MetricKey) -> &mut SeriesPair {
        match (key.metric, key.growth) {
            (Metric::Nominal, false) => &mut self.nominal,
            (Metric::Real, false) => &mut self.real,
            (Metric::Ppp, false) => &mut self.ppp,
            (Metric::Nominal, true) => &mut self.nominal_growth,
            (Metric::Real, true) => &mut self.real_growth,
            (Metric::Ppp, true) => &mut self.ppp_growth,
        }
    }

    /// Check alignment without modifying anything.
    ///
    /// Growth series may lack the leading entry (no prior-year baseline).
    pub fn validate(&self) -> Result<(), DatasetError> {
        if self.years.is_empty() {
            return Err(DatasetError::NoYears);
        }
        for (i, w) in self.years.windows(2).enumerate() {
            if w[1] <= w[0] {
                return Err(DatasetError::YearsNotIncreasing {
                    index: i + 1,
                    year: w[1],
                });
            }
        }
        let n = self.years.len();
        for key in MetricKey::ALL {
            let pair = self.series(key);
            for country in Country::ALL {
                let found = pair.get(country).len();
                let ok = found == n || (key.growth && found + 1 == n);
                if !ok {
                    return Err(DatasetError::Misaligned {
                        key: key.as_selector(),
                        country: country.id(),
                        found,
                        expected: n,
                    });
                }
            }
        }
        Ok(())
    }

    /// Validate and pad short growth series with a leading gap, so every
    /// series indexes 1:1 with `years`.
    pub fn normalized(mut self) -> Result<Self, DatasetError> {
        self.validate()?;
        let n = self.years.len();
        for key in MetricKey::ALL.into_iter().filter(|k| k.growth) {
            let pair = self.series_mut(key);
            for country in Country::ALL {
                let values = pair.get_mut(country);
                if values.len() + 1 == n {
                    values.insert(0, None);
                }
            }
        }
        Ok(self)
    }
}

/// Serde helper: accept year labels as JSON numbers or numeric strings
/// (`1978` and `"1978"` both occur in hand-maintained data files).
fn de_years<'de, D>(deserializer: D) -> Result<Vec<i32>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::{self, Visitor};

    struct Year(i32);

    impl<'de> Deserialize<'de> for Year {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: serde::Deserializer<'de>,
        {
            struct YearVisitor;

            impl<'de> Visitor<'de> for YearVisitor {
                type Value = Year;

                fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                    write!(f, "a year as integer or string")
                }

                fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
                where
                    E: de::Error,
                {
                    i32::try_from(v).map(Year).map_err(E::custom)
                }

                fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
                where
                    E: de::Error,
                {
                    i32::try_from(v).map(Year).map_err(E::custom)
                }

                fn visit_f64<E>(self, v: f64) -> Result<Self::Value, E>
                where
                    E: de::Error,
                {
                    if v.fract() != 0.0 {
                        return Err(E::custom("fractional year"));
                    }
                    Ok(Year(v as i32))
                }

                fn visit_str<E>(self, s: &str) -> Result<Self::Value, E>
                where
                    E: de::Error,
                {
                    s.trim()
                        .trim_end_matches('年')
                        .parse::<i32>()
                        .map(Year)
                        .map_err(E::custom)
                }
            }

            deserializer.deserialize_any(YearVisitor)
        }
    }

    let years: Vec<Year> = Vec::deserialize(deserializer)?;
    Ok(years.into_iter().map(|y| y.0).collect())
}
