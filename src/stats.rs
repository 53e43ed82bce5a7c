use crate::models::{Country, Dataset, MetricKey};
use serde::{Deserialize, Serialize};

/// Summary statistics for one series.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Summary {
    pub key: MetricKey,
    pub country: Country,
    pub count: usize,
    pub missing: usize,
    pub min: Option<f64>,
    pub max: Option<f64>,
    /// Year of the maximum (first one on ties).
    pub max_year: Option<i32>,
    pub mean: Option<f64>,
    pub median: Option<f64>,
}

/// Index and value of the largest present value; earliest index wins ties.
pub fn max_point(values: &[Option<f64>]) -> Option<(usize, f64)> {
    values
        .iter()
        .enumerate()
        .filter_map(|(i, v)| v.map(|v| (i, v)))
        .fold(None, |best, (i, v)| match best {
            Some((_, b)) if b >= v => best,
            _ => Some((i, v)),
        })
}

fn summarize(key: MetricKey, country: Country, years: &[i32], values: &[Option<f64>]) -> Summary {
    let mut vals: Vec<f64> = values.iter().flatten().copied().collect();
    let missing = values.len() - vals.len();
    vals.sort_by(f64::total_cmp);
    let count = vals.len();
    let min = vals.first().cloned();
    let max = vals.last().cloned();
    let mean = if count > 0 {
        Some(vals.iter().copied().sum::<f64>() / count as f64)
    } else {
        None
    };
    let median = if count == 0 {
        None
    } else if count % 2 == 1 {
        Some(vals[count / 2])
    } else {
        Some((vals[count / 2 - 1] + vals[count / 2]) / 2.0)
    };
    let max_year = max_point(values).and_then(|(i, _)| years.get(i).copied());
    Summary { key, country, count, missing, min, max, max_year, mean, median }
}

/// One summary per (metric key, country), in key order.
pub fn dataset_summary(dataset: &Dataset) -> Vec<Summary> {
    let mut out = Vec::new();
    for key in MetricKey::ALL {
        let pair = dataset.series(key);
        for country in Country::ALL {
            out.push(summarize(key, country, &dataset.years, pair.get(country)));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn max_point_skips_gaps_and_keeps_first_tie() {
        assert_eq!(max_point(&[None, Some(2.0), Some(5.0), Some(5.0)]), Some((2, 5.0)));
        assert_eq!(max_point(&[None, None]), None);
        assert_eq!(max_point(&[Some(-3.0), Some(-1.0)]), Some((1, -1.0)));
    }

    #[test]
    fn gaps_count_as_missing() {
        let s = summarize(
            MetricKey::default(),
            Country::China,
            &[2000, 2001, 2002, 2003],
            &[Some(4.0), None, Some(1.0), Some(3.0)],
        );
        assert_eq!(s.count, 3);
        assert_eq!(s.missing, 1);
        assert_eq!(s.min, Some(1.0));
        assert_eq!(s.max, Some(4.0));
        assert_eq!(s.max_year, Some(2000));
        assert_eq!(s.median, Some(3.0));
    }
}
