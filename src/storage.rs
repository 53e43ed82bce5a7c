use crate::models::{Country, Dataset, MetricKey};
use crate::option::ChartOption;
use anyhow::{Context, Result, anyhow};
use csv::WriterBuilder;
use log::info;
use regex::Regex;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

/// `const gdpData = {...};` as found in the page's data script.
const JS_ASSIGNMENT: &str =
    r"(?s)(?:(?:const|let|var)\s+[A-Za-z_$][\w$]*|window\.[A-Za-z_$][\w$]*)\s*=\s*(\{.*\})\s*;?";

/// Parse a dataset from JSON text, or from a JS file that assigns an object
/// literal to a variable. The literal is read as JSON5, so unquoted keys,
/// trailing commas and comments are accepted. The result is validated and
/// normalized.
pub fn parse_dataset(text: &str) -> Result<Dataset> {
    let re = Regex::new(JS_ASSIGNMENT)?;
    let body = match re.captures(text) {
        Some(caps) => caps.get(1).map(|m| m.as_str()).unwrap_or(text),
        None => text,
    };
    let dataset: Dataset = json5::from_str(body).context("parsing dataset")?;
    Ok(dataset.normalized()?)
}

/// Load a dataset from a `.json` or `.js` file.
pub fn load_dataset<P: AsRef<Path>>(path: P) -> Result<Dataset> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let dataset = parse_dataset(&text).with_context(|| format!("loading {}", path.display()))?;
    info!(
        "loaded {} years ({}..{}) from {}",
        dataset.years.len(),
        dataset.years.first().copied().unwrap_or_default(),
        dataset.years.last().copied().unwrap_or_default(),
        path.display()
    );
    Ok(dataset)
}

/// Save a chart option as pretty JSON.
pub fn save_option_json<P: AsRef<Path>>(option: &ChartOption, path: P) -> Result<()> {
    let mut f = File::create(path)?;
    let s = serde_json::to_string_pretty(option)?;
    f.write_all(s.as_bytes())?;
    Ok(())
}

/// Save the dataset as tidy CSV: one row per (year, country, metric).
pub fn save_csv<P: AsRef<Path>>(dataset: &Dataset, path: P) -> Result<()> {
    let mut wtr = WriterBuilder::new().from_path(path)?;
    wtr.serialize(("year", "country", "metric", "growth", "value"))?;
    for key in MetricKey::ALL {
        let pair = dataset.series(key);
        for country in Country::ALL {
            let values = pair.get(country);
            for (i, year) in dataset.years.iter().enumerate() {
                let value = values
                    .get(i)
                    .ok_or_else(|| anyhow!("{key}.{} shorter than years", country.id()))?;
                wtr.serialize((year, country.id(), key.metric.id(), key.growth, value))?;
            }
        }
    }
    wtr.flush()?;
    Ok(())
}
