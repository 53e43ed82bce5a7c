//! Visualization: draw a [`ChartOption`] to **SVG** or **PNG** with plotters.
//!
//! - Category axis of years with the option's label template
//! - Value axis with the GDP tick formatter (trillion scale, percent for growth)
//! - Lines broken at gaps, circle markers, dashed/dotted strokes
//! - Max-value pins on level charts
//! - Legend band at the bottom; deselected series are hidden and greyed out
//! - The option's dataZoom window limits the visible years

pub mod legend;
pub mod style;
pub mod text;

use crate::engine::RenderEngine;
use crate::format::{axis_tick, format_number};
use crate::option::{ChartOption, LineSeries};
use crate::stats::max_point;
use anyhow::{Result, anyhow};
use log::{debug, info};

use plotters::backend::DrawingBackend;
use plotters::coord::Shift;
use plotters::coord::cartesian::Cartesian2d;
use plotters::coord::types::RangedCoordf64;
use plotters::prelude::*;
use plotters::series::LineSeries as PlottersLine;
use plotters::style::FontFamily;

use plotters_bitmap::BitMapBackend;
use plotters_svg::SVGBackend;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Once;

use legend::{LegendItem, draw_legend_band, legend_band_height_px};
use style::{dash_pattern, line_style, marker_style, parse_color, split_dashes};
use text::estimate_text_width_px;

/// One-time registration for a fallback "sans-serif" font when using the `ab_glyph` text path.
/// Required because `ab_glyph` doesn't discover OS fonts.
static INIT_FONTS: Once = Once::new();

fn ensure_fonts_registered() {
    INIT_FONTS.call_once(|| {
        let _ = plotters::style::register_font(
            "sans-serif",
            plotters::style::FontStyle::Normal,
            include_bytes!("../../assets/DejaVuSans.ttf"),
        );
    });
}

const MARGIN: i32 = 16;
const Y_LABELS: usize = 8;
const AXIS_COLOR: RGBColor = RGBColor(0x99, 0x99, 0x99);

type Chart<'a, DB> = ChartContext<'a, DB, Cartesian2d<RangedCoordf64, RangedCoordf64>>;

/// Render `option` to `out_path`: SVG when the extension is `svg`, PNG otherwise.
pub fn render_to_file<P: AsRef<Path>>(
    option: &ChartOption,
    out_path: P,
    width: u32,
    height: u32,
) -> Result<()> {
    ensure_fonts_registered();
    let out_path = out_path.as_ref();
    let path_string = out_path.to_string_lossy().into_owned();

    if out_path.extension().and_then(|s| s.to_str()) == Some("svg") {
        let root = SVGBackend::new(path_string.as_str(), (width, height)).into_drawing_area();
        draw_option(root, option)?;
    } else {
        let root = BitMapBackend::new(path_string.as_str(), (width, height)).into_drawing_area();
        draw_option(root, option)?;
    }
    info!("wrote chart to {}", out_path.display());
    Ok(())
}

/// Category index range covered by a zoom window in percent.
pub fn zoom_range(n: usize, start_pct: f64, end_pct: f64) -> (usize, usize) {
    if n == 0 {
        return (0, 0);
    }
    let last = (n - 1) as f64;
    let lo = ((start_pct / 100.0) * last).floor().clamp(0.0, last) as usize;
    let hi = ((end_pct / 100.0) * last).ceil().clamp(0.0, last) as usize;
    (lo, hi.max(lo))
}

/// Runs of consecutive present values as `(year, value)` points.
fn segments(years: &[i32], data: &[Option<f64>], lo: usize, hi: usize) -> Vec<Vec<(f64, f64)>> {
    let mut out = Vec::new();
    let mut cur = Vec::new();
    for i in lo..=hi {
        match (years.get(i), data.get(i).copied().flatten()) {
            (Some(y), Some(v)) => cur.push((*y as f64, v)),
            _ => {
                if !cur.is_empty() {
                    out.push(std::mem::take(&mut cur));
                }
            }
        }
    }
    if !cur.is_empty() {
        out.push(cur);
    }
    out
}

/// Value range of the visible series within the window, always including zero.
fn value_range(option: &ChartOption, lo: usize, hi: usize) -> (f64, f64) {
    let (mut min_v, mut max_v) = (0.0f64, 0.0f64);
    for s in option.visible_series() {
        for v in s.data.iter().skip(lo).take(hi + 1 - lo).flatten() {
            min_v = min_v.min(*v);
            max_v = max_v.max(*v);
        }
    }
    if (max_v - min_v).abs() < f64::EPSILON {
        max_v = min_v + 1.0;
    }
    let pad = (max_v - min_v) * 0.05;
    (if min_v < 0.0 { min_v - pad } else { min_v }, max_v + pad)
}

/// Tight left label area from the formatted tick labels.
fn left_label_area_px(ymin: f64, ymax: f64, format: &dyn Fn(f64) -> String, font_px: u32) -> u32 {
    let mut max_px = 0u32;
    for i in 0..=Y_LABELS {
        let v = ymin + (ymax - ymin) * (i as f64 / Y_LABELS as f64);
        max_px = max_px.max(estimate_text_width_px(&format(v), font_px));
    }
    max_px.saturating_add(18).clamp(48, 140)
}

fn draw_line<DB: DrawingBackend>(chart: &mut Chart<'_, DB>, series: &LineSeries, pts: &[(f64, f64)]) -> Result<()> {
    let stroke = line_style(series);
    match dash_pattern(series.line_style.kind) {
        None => {
            chart
                .draw_series(PlottersLine::new(pts.to_vec(), stroke))
                .map_err(|e| anyhow!("{:?}", e))?;
        }
        Some((on, off)) => {
            let px: Vec<(f64, f64)> = pts
                .iter()
                .map(|p| {
                    let (x, y) = chart.backend_coord(p);
                    (x as f64, y as f64)
                })
                .collect();
            let pieces = split_dashes(pts, &px, on, off);
            chart
                .draw_series(pieces.into_iter().map(|p| PathElement::new(p, stroke)))
                .map_err(|e| anyhow!("{:?}", e))?;
        }
    }
    Ok(())
}

/// Pin with the value above the maximum of the visible window.
fn draw_max_pin<DB: DrawingBackend>(
    chart: &mut Chart<'_, DB>,
    series: &LineSeries,
    years: &[i32],
    lo: usize,
    hi: usize,
    locale: &str,
) -> Result<()> {
    let Some(mark) = series.mark_point.as_ref() else {
        return Ok(());
    };
    if !mark.data.iter().any(|m| m.kind == "max") {
        return Ok(());
    }
    if series.data.len() <= lo {
        return Ok(());
    }
    let end = hi.min(series.data.len() - 1);
    let Some((offset, value)) = max_point(&series.data[lo..=end]) else {
        return Ok(());
    };
    let Some(year) = years.get(lo + offset) else {
        return Ok(());
    };
    let color = parse_color(&mark.item_style.color);
    let label = format_number(value, locale);
    let label_w = estimate_text_width_px(&label, 11) as i32;
    let r = (mark.symbol_size / 5).max(4) as i32;
    chart
        .draw_series(std::iter::once(
            EmptyElement::at((*year as f64, value))
                + Circle::new((0, -r - 4), r, color.filled())
                + PathElement::new(vec![(0, -4), (0, 0)], color.stroke_width(2))
                + Text::new(label, (-label_w / 2, -2 * r - 20), (FontFamily::SansSerif, 11)),
        ))
        .map_err(|e| anyhow!("{:?}", e))?;
    Ok(())
}

/// Draw a full option onto any plotters backend.
pub fn draw_option<DB: DrawingBackend>(root: DrawingArea<DB, Shift>, option: &ChartOption) -> Result<()> {
    let years = &option.x_axis.data;
    if years.is_empty() {
        return Err(anyhow!("no data to plot"));
    }
    let (start, end) = option.zoom_window();
    let (lo, hi) = zoom_range(years.len(), start, end);
    let (x_min, x_max) = (years[lo] as f64 - 0.5, years[hi] as f64 + 0.5);
    let (y_min, y_max) = value_range(option, lo, hi);

    let tick = option.y_axis.axis_label.formatter;
    let y_fmt = move |v: f64| axis_tick(v, tick.growth, tick.lang);
    let template = option.x_axis.axis_label.formatter.clone();
    let x_fmt = move |x: &f64| template.replace("{value}", &(x.round() as i64).to_string());

    let left_label_px = left_label_area_px(y_min, y_max, &y_fmt, 12);
    let axis_x_start_px = MARGIN + left_label_px as i32;

    let items: Vec<LegendItem> = option
        .series
        .iter()
        .map(|s| LegendItem {
            label: s.name.clone(),
            color: parse_color(&s.item_style.color),
            line: s.line_style.kind,
            selected: option.is_visible(s),
        })
        .collect();

    let (root_w, root_h) = root.dim_in_pixel();
    let band_h = legend_band_height_px(&items, axis_x_start_px, root_w as i32).max(40);
    root.fill(&WHITE).map_err(|e| anyhow!("{:?}", e))?;
    let (plot_area, legend_area) = root.split_vertically((root_h as i32 - band_h).max(40));

    let mut chart = ChartBuilder::on(&plot_area)
        .margin(MARGIN as u32)
        .caption(
            option.title.text.as_str(),
            (FontFamily::SansSerif, option.title.text_style.font_size + 4),
        )
        .set_label_area_size(LabelAreaPosition::Left, left_label_px)
        .set_label_area_size(LabelAreaPosition::Bottom, 44)
        .build_cartesian_2d(x_min..x_max, y_min..y_max)
        .map_err(|e| anyhow!("{:?}", e))?;

    let y_label_fmt = |v: &f64| y_fmt(*v);
    chart
        .configure_mesh()
        .disable_x_mesh()
        .y_desc(option.y_axis.name.as_str())
        .x_labels((hi - lo + 1).min(12))
        .y_labels(Y_LABELS)
        .x_label_formatter(&x_fmt)
        .y_label_formatter(&y_label_fmt)
        .axis_style(AXIS_COLOR)
        .bold_line_style(parse_color(&option.y_axis.split_line.line_style.color))
        .light_line_style(WHITE)
        .label_style((FontFamily::SansSerif, 12))
        .axis_desc_style((FontFamily::SansSerif, 14))
        .draw()
        .map_err(|e| anyhow!("{:?}", e))?;

    let locale = option.tooltip.formatter.locale.clone();
    for series in option.visible_series() {
        let segs = segments(years, &series.data, lo, hi);
        for seg in &segs {
            if seg.len() > 1 {
                draw_line(&mut chart, series, seg)?;
            }
        }
        let radius = (series.symbol_size / 2).max(1);
        let fill = marker_style(series);
        chart
            .draw_series(
                segs.iter()
                    .flatten()
                    .map(|p| Circle::new(*p, radius, fill)),
            )
            .map_err(|e| anyhow!("{:?}", e))?;
        draw_max_pin(&mut chart, series, years, lo, hi, &locale)?;
    }
    debug!(
        "drew {} of {} series over {}..={}",
        option.visible_series().count(),
        option.series.len(),
        years[lo],
        years[hi]
    );

    draw_legend_band(&legend_area, &items, axis_x_start_px)?;

    plot_area.present().map_err(|e| anyhow!("{:?}", e))?;
    legend_area.present().map_err(|e| anyhow!("{:?}", e))?;
    Ok(())
}

/// Engine that redraws an image file on every update.
#[derive(Debug, Clone)]
pub struct ImageEngine {
    path: PathBuf,
    width: u32,
    height: u32,
    current: Option<ChartOption>,
}

impl ImageEngine {
    pub fn new<P: Into<PathBuf>>(path: P, width: u32, height: u32) -> Self {
        Self {
            path: path.into(),
            width,
            height,
            current: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn current(&self) -> Option<&ChartOption> {
        self.current.as_ref()
    }

    /// Toolbox "save as image": write the current chart to another file.
    pub fn save_as_image<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let option = self
            .current
            .as_ref()
            .ok_or_else(|| anyhow!("nothing rendered yet"))?;
        render_to_file(option, path, self.width, self.height)
    }

    fn redraw(&self) -> Result<()> {
        match &self.current {
            Some(option) => render_to_file(option, &self.path, self.width, self.height),
            None => Ok(()),
        }
    }
}

impl RenderEngine for ImageEngine {
    fn set_option(&mut self, option: &ChartOption) -> Result<()> {
        self.current = Some(option.clone());
        self.redraw()
    }

    fn set_legend_selected(&mut self, selected: &BTreeMap<String, bool>) -> Result<()> {
        let option = self
            .current
            .as_mut()
            .ok_or_else(|| anyhow!("legend patch before any option was set"))?;
        option.legend.selected = selected.clone();
        self.redraw()
    }

    fn resize(&mut self, width: u32, height: u32) -> Result<()> {
        self.width = width;
        self.height = height;
        self.redraw()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zoom_range_covers_window() {
        assert_eq!(zoom_range(11, 0.0, 100.0), (0, 10));
        assert_eq!(zoom_range(11, 50.0, 100.0), (5, 10));
        assert_eq!(zoom_range(11, 25.0, 26.0), (2, 3));
        assert_eq!(zoom_range(1, 0.0, 100.0), (0, 0));
        assert_eq!(zoom_range(0, 0.0, 100.0), (0, 0));
    }

    #[test]
    fn gaps_split_segments() {
        let years = [2000, 2001, 2002, 2003, 2004];
        let data = [Some(1.0), Some(2.0), None, Some(4.0), Some(5.0)];
        let segs = segments(&years, &data, 0, 4);
        assert_eq!(segs.len(), 2);
        assert_eq!(segs[0], vec![(2000.0, 1.0), (2001.0, 2.0)]);
        assert_eq!(segs[1], vec![(2003.0, 4.0), (2004.0, 5.0)]);
        assert_eq!(segments(&years, &data, 2, 2).len(), 0);
    }
}
