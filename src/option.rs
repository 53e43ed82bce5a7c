//! Declarative chart configuration.
//!
//! The structs mirror the ECharts option object field by field, so that
//! `serde_json::to_value(&option)` is what gets handed to `setOption` in the
//! browser. Formatters are plain data here ([`TickFormatter`],
//! [`TooltipFormatter`]); each engine turns them into behavior.

use crate::format::Lang;
use crate::models::{Country, MetricKey};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartOption {
    pub title: Title,
    pub tooltip: Tooltip,
    pub legend: Legend,
    pub grid: Grid,
    pub toolbox: Toolbox,
    pub data_zoom: Vec<DataZoom>,
    pub x_axis: CategoryAxis,
    pub y_axis: ValueAxis,
    pub series: Vec<LineSeries>,
}

impl ChartOption {
    /// Visible window of the category axis in percent, from the first zoom control.
    pub fn zoom_window(&self) -> (f64, f64) {
        self.data_zoom
            .first()
            .map(|z| (z.start, z.end))
            .unwrap_or((0.0, 100.0))
    }

    /// A series is shown unless the legend selection explicitly turns it off.
    pub fn is_visible(&self, series: &LineSeries) -> bool {
        self.legend
            .selected
            .get(&series.name)
            .copied()
            .unwrap_or(true)
    }

    pub fn visible_series(&self) -> impl Iterator<Item = &LineSeries> {
        self.series.iter().filter(|s| self.is_visible(s))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Title {
    pub text: String,
    pub left: String,
    pub top: u32,
    pub text_style: TextStyle,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextStyle {
    pub font_size: u32,
    pub font_weight: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tooltip {
    pub trigger: String,
    pub formatter: TooltipFormatter,
    pub background_color: String,
    pub border_color: String,
    pub border_width: u32,
}

/// Per-category tooltip: year header plus one `name: value` row per series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TooltipFormatter {
    pub lang: Lang,
    pub locale: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Legend {
    pub data: Vec<String>,
    pub bottom: u32,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub selected: BTreeMap<String, bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Grid {
    pub left: String,
    pub right: String,
    pub top: u32,
    pub bottom: u32,
    pub contain_label: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Toolbox {
    pub feature: ToolboxFeature,
    pub right: u32,
    pub top: u32,
}

/// Built-in toolbox buttons; an empty object enables a feature with defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolboxFeature {
    pub data_zoom: Enabled,
    pub restore: Enabled,
    pub save_as_image: Enabled,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Enabled {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZoomKind {
    /// Drag/scroll inside the plot.
    Inside,
    Slider,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataZoom {
    #[serde(rename = "type")]
    pub kind: ZoomKind,
    pub start: f64,
    pub end: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bottom: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    pub x_axis_index: Vec<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AxisLine {
    pub line_style: ColorStyle,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorStyle {
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryAxis {
    #[serde(rename = "type")]
    pub kind: String,
    pub data: Vec<i32>,
    pub axis_line: AxisLine,
    pub axis_label: CategoryLabel,
}

/// Label template, `{value}` is replaced by the category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryLabel {
    pub formatter: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueAxis {
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    pub name_text_style: NameTextStyle,
    pub axis_line: AxisLine,
    pub split_line: AxisLine,
    pub axis_label: ValueLabel,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NameTextStyle {
    pub padding: [u32; 4],
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueLabel {
    pub formatter: TickFormatter,
}

/// Value-axis tick text, see [`crate::format::axis_tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TickFormatter {
    pub growth: bool,
    pub lang: Lang,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineType {
    Solid,
    Dashed,
    Dotted,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineStyle {
    pub width: f64,
    #[serde(rename = "type")]
    pub kind: LineType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shadow_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shadow_blur: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shadow_offset_y: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemStyle {
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_width: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Emphasis {
    pub item_style: ItemStyle,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkPoint {
    pub data: Vec<MarkPointItem>,
    pub symbol: String,
    pub symbol_size: u32,
    pub item_style: ItemStyle,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkPointItem {
    /// Statistic to mark, e.g. `"max"`.
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
}

/// What a series shows, carried next to its display name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SeriesMeta {
    pub country: Country,
    pub key: MetricKey,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineSeries {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    /// `None` is a gap: the line breaks there.
    pub data: Vec<Option<f64>>,
    pub symbol: String,
    pub symbol_size: u32,
    pub connect_nulls: bool,
    pub item_style: ItemStyle,
    pub line_style: LineStyle,
    pub emphasis: Emphasis,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mark_point: Option<MarkPoint>,
    pub meta: SeriesMeta,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zoom_kind_and_toolbox_serialize_like_echarts() {
        let z = DataZoom {
            kind: ZoomKind::Slider,
            start: 0.0,
            end: 100.0,
            bottom: Some(10),
            height: Some(20),
            x_axis_index: vec![0],
        };
        let v = serde_json::to_value(&z).unwrap();
        assert_eq!(v["type"], "slider");
        assert_eq!(v["xAxisIndex"], serde_json::json!([0]));

        let f = serde_json::to_value(ToolboxFeature::default()).unwrap();
        assert_eq!(
            f,
            serde_json::json!({"dataZoom": {}, "restore": {}, "saveAsImage": {}})
        );
    }
}
