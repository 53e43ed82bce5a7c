//! Chart builders: resolved data + labels -> [`ChartOption`].
//!
//! Every call builds a complete option from scratch; nothing is patched.

use crate::format::{Lang, format_value};
use crate::models::{Country, Dataset, MetricKey, SeriesPair};
use crate::option::*;
use crate::presets::{LegendSelection, all_series, series_name};
use crate::resolve::{LabelBundle, country_name};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const CHINA_COLOR: &str = "#e74c3c";
pub const USA_COLOR: &str = "#3498db";
const TOOLTIP_BACKGROUND: &str = "rgba(255, 255, 255, 0.8)";
const GRID_COLOR: &str = "#f5f5f5";
const AXIS_COLOR: &str = "#999";

pub fn country_color(country: Country) -> &'static str {
    match country {
        Country::China => CHINA_COLOR,
        Country::Usa => USA_COLOR,
    }
}

/// Language and number locale used for every label of a chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartSettings {
    pub lang: Lang,
    pub locale: String,
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            lang: Lang::Zh,
            locale: "en".to_string(),
        }
    }
}

/// Visible part of the year axis, in percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoomWindow {
    pub start: f64,
    pub end: f64,
}

impl Default for ZoomWindow {
    fn default() -> Self {
        Self {
            start: 0.0,
            end: 100.0,
        }
    }
}

impl ZoomWindow {
    /// Clamp to 0..=100 and order the bounds.
    pub fn new(start: f64, end: f64) -> Self {
        let a = start.clamp(0.0, 100.0);
        let b = end.clamp(0.0, 100.0);
        Self {
            start: a.min(b),
            end: a.max(b),
        }
    }
}

fn axis_line() -> AxisLine {
    AxisLine {
        line_style: ColorStyle {
            color: AXIS_COLOR.to_string(),
        },
    }
}

/// Everything but the series.
fn scaffold(
    title: &str,
    unit: &str,
    growth_ticks: bool,
    legend: Vec<String>,
    years: &[i32],
    settings: &ChartSettings,
    zoom: ZoomWindow,
) -> ChartOption {
    ChartOption {
        title: Title {
            text: title.to_string(),
            left: "center".to_string(),
            top: 10,
            text_style: TextStyle {
                font_size: 18,
                font_weight: "bold".to_string(),
            },
        },
        tooltip: Tooltip {
            trigger: "axis".to_string(),
            formatter: TooltipFormatter {
                lang: settings.lang,
                locale: settings.locale.clone(),
            },
            background_color: TOOLTIP_BACKGROUND.to_string(),
            border_color: "#ccc".to_string(),
            border_width: 1,
        },
        legend: Legend {
            data: legend,
            bottom: 10,
            selected: Default::default(),
        },
        grid: Grid {
            left: "5%".to_string(),
            right: "5%".to_string(),
            top: 60,
            bottom: 60,
            contain_label: true,
        },
        toolbox: Toolbox {
            feature: ToolboxFeature::default(),
            right: 20,
            top: 20,
        },
        data_zoom: vec![
            DataZoom {
                kind: ZoomKind::Inside,
                start: zoom.start,
                end: zoom.end,
                bottom: None,
                height: None,
                x_axis_index: vec![0],
            },
            DataZoom {
                kind: ZoomKind::Slider,
                start: zoom.start,
                end: zoom.end,
                bottom: Some(10),
                height: Some(20),
                x_axis_index: vec![0],
            },
        ],
        x_axis: CategoryAxis {
            kind: "category".to_string(),
            data: years.to_vec(),
            axis_line: axis_line(),
            axis_label: CategoryLabel {
                formatter: settings.lang.year_template().to_string(),
            },
        },
        y_axis: ValueAxis {
            kind: "value".to_string(),
            name: unit.to_string(),
            name_text_style: NameTextStyle {
                padding: [0, 30, 0, 0],
            },
            axis_line: axis_line(),
            split_line: AxisLine {
                line_style: ColorStyle {
                    color: GRID_COLOR.to_string(),
                },
            },
            axis_label: ValueLabel {
                formatter: TickFormatter {
                    growth: growth_ticks,
                    lang: settings.lang,
                },
            },
        },
        series: Vec::new(),
    }
}

/// Two-series comparison chart for one metric key.
///
/// Level charts pin each country's maximum; growth charts do not.
pub fn build_single(
    years: &[i32],
    pair: &SeriesPair,
    key: MetricKey,
    labels: &LabelBundle,
    settings: &ChartSettings,
    zoom: ZoomWindow,
) -> ChartOption {
    let lang = settings.lang;
    let legend = Country::ALL
        .iter()
        .map(|c| country_name(*c, lang).to_string())
        .collect();
    let mut option = scaffold(
        &labels.title,
        &labels.unit,
        labels.is_growth,
        legend,
        years,
        settings,
        zoom,
    );

    for country in Country::ALL {
        let color = country_color(country).to_string();
        let mark_point = (!labels.is_growth).then(|| MarkPoint {
            data: vec![MarkPointItem {
                kind: "max".to_string(),
                name: match lang {
                    Lang::Zh => "最大值".to_string(),
                    Lang::En => "max".to_string(),
                },
            }],
            symbol: "pin".to_string(),
            symbol_size: 50,
            item_style: ItemStyle {
                color: color.clone(),
                border_color: None,
                border_width: None,
            },
        });
        option.series.push(LineSeries {
            name: country_name(country, lang).to_string(),
            kind: "line".to_string(),
            data: pair.get(country).to_vec(),
            symbol: "circle".to_string(),
            symbol_size: 6,
            connect_nulls: false,
            item_style: ItemStyle {
                color: color.clone(),
                border_color: None,
                border_width: None,
            },
            line_style: LineStyle {
                width: 3.0,
                kind: LineType::Solid,
                shadow_color: Some("rgba(0, 0, 0, 0.3)".to_string()),
                shadow_blur: Some(5),
                shadow_offset_y: Some(3),
            },
            emphasis: Emphasis {
                item_style: ItemStyle {
                    color: color.clone(),
                    border_color: Some(color),
                    border_width: Some(3),
                },
            },
            mark_point,
            meta: SeriesMeta { country, key },
        });
    }
    option
}

fn line_type(key: MetricKey) -> LineType {
    use crate::models::Metric;
    match key.metric {
        Metric::Nominal => LineType::Solid,
        Metric::Real => LineType::Dashed,
        Metric::Ppp => LineType::Dotted,
    }
}

/// Title and axis name of the multi-series chart.
pub fn interactive_labels(lang: Lang) -> LabelBundle {
    let (title, unit) = match lang {
        Lang::Zh => ("中美GDP多指标对比(1978-至今)", "十亿美元 / 增长率(%)"),
        Lang::En => (
            "China vs. USA GDP, all measures (1978-present)",
            "billion $ / growth rate (%)",
        ),
    };
    LabelBundle {
        title: title.to_string(),
        unit: unit.to_string(),
        is_growth: false,
    }
}

/// All six metrics for both countries on one axis pair; `selection` decides
/// which of the 12 lines are shown.
pub fn build_interactive(
    dataset: &Dataset,
    selection: &LegendSelection,
    settings: &ChartSettings,
    zoom: ZoomWindow,
) -> ChartOption {
    let lang = settings.lang;
    let labels = interactive_labels(lang);
    let ids = all_series();
    let legend = ids.iter().map(|id| series_name(*id, lang)).collect();
    let mut option = scaffold(
        &labels.title,
        &labels.unit,
        false,
        legend,
        &dataset.years,
        settings,
        zoom,
    );
    option.legend.selected = selection.named(lang);

    for id in ids {
        let color = country_color(id.country).to_string();
        let (width, symbol_size) = if id.key.growth { (1.5, 3) } else { (3.0, 4) };
        option.series.push(LineSeries {
            name: series_name(id, lang),
            kind: "line".to_string(),
            data: dataset.series(id.key).get(id.country).to_vec(),
            symbol: "circle".to_string(),
            symbol_size,
            connect_nulls: false,
            item_style: ItemStyle {
                color: color.clone(),
                border_color: None,
                border_width: None,
            },
            line_style: LineStyle {
                width,
                kind: line_type(id.key),
                shadow_color: None,
                shadow_blur: None,
                shadow_offset_y: None,
            },
            emphasis: Emphasis {
                item_style: ItemStyle {
                    color: color.clone(),
                    border_color: Some(color),
                    border_width: Some(2),
                },
            },
            mark_point: None,
            meta: id,
        });
    }
    option
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TooltipRow {
    pub name: String,
    pub value: String,
}

/// Text shown when hovering one year.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TooltipContent {
    pub header: String,
    pub rows: Vec<TooltipRow>,
}

impl TooltipContent {
    pub fn value_of(&self, name: &str) -> Option<&str> {
        self.rows
            .iter()
            .find(|r| r.name == name)
            .map(|r| r.value.as_str())
    }

    /// Markup as the browser tooltip shows it.
    pub fn to_html(&self) -> String {
        let mut out = format!("{}<br/>", self.header);
        for row in &self.rows {
            out.push_str(&format!("{}: {}<br/>", row.name, row.value));
        }
        out
    }
}

impl fmt::Display for TooltipContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.header)?;
        for row in &self.rows {
            writeln!(f, "{}: {}", row.name, row.value)?;
        }
        Ok(())
    }
}

/// Evaluate the tooltip formatter of `option` at a category index.
///
/// Rows come from the visible series; labels and percent formatting are
/// derived from each series' [`SeriesMeta`], never from its display name.
pub fn tooltip(option: &ChartOption, index: usize) -> Option<TooltipContent> {
    let year = *option.x_axis.data.get(index)?;
    let fmt = &option.tooltip.formatter;
    let single_key = option
        .series
        .first()
        .map(|s| s.meta.key)
        .filter(|k| option.series.iter().all(|s| s.meta.key == *k));

    let rows = option
        .visible_series()
        .map(|s| {
            let name = match single_key {
                Some(_) => country_name(s.meta.country, fmt.lang).to_string(),
                None => series_name(s.meta, fmt.lang),
            };
            let value = s.data.get(index).copied().flatten();
            TooltipRow {
                name,
                value: format_value(value, s.meta.key.growth, fmt.lang, &fmt.locale),
            }
        })
        .collect();

    Some(TooltipContent {
        header: fmt.lang.year_label(year),
        rows,
    })
}

/// Tooltip at a year rather than an index.
pub fn tooltip_at_year(option: &ChartOption, year: i32) -> Option<TooltipContent> {
    let index = option.x_axis.data.iter().position(|y| *y == year)?;
    tooltip(option, index)
}
