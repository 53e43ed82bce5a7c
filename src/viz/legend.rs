//! Legend band below the plot: one entry per series, deselected entries greyed out.

use anyhow::Result;
use plotters::backend::DrawingBackend;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::FontFamily;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use super::style::dash_pattern;
use super::text::{estimate_text_width_px, truncate_to_width};
use crate::option::LineType;

const FONT_PX: u32 = 14;
const LINE_H: i32 = FONT_PX as i32 + 2;
const ROW_GAP: i32 = 6;
const PAD_BAND: i32 = 8;
const SAMPLE_W: i32 = 24;
const SAMPLE_TO_TEXT: i32 = 6;
const TRAILING_GAP: i32 = 16;

/// Color of deselected entries.
const INACTIVE: RGBColor = RGBColor(204, 204, 204);

#[derive(Debug, Clone)]
pub struct LegendItem {
    pub label: String,
    pub color: RGBAColor,
    pub line: LineType,
    pub selected: bool,
}

/// Greedy left-to-right packing; returns rows of (item index, label, block width).
fn pack_rows(items: &[LegendItem], start_x: i32, total_w: i32) -> Vec<Vec<(usize, String, i32)>> {
    let usable = (total_w - start_x - PAD_BAND).max(80);
    let text_cap = ((usable as f32) * 0.45).max(60.0) as u32;
    let mut rows: Vec<Vec<(usize, String, i32)>> = Vec::new();
    let mut cur: Vec<(usize, String, i32)> = Vec::new();
    let mut x = 0;
    for (i, item) in items.iter().enumerate() {
        let label = truncate_to_width(&item.label, FONT_PX, text_cap);
        let block_w =
            SAMPLE_W + SAMPLE_TO_TEXT + estimate_text_width_px(&label, FONT_PX) as i32 + TRAILING_GAP;
        if x + block_w > usable && !cur.is_empty() {
            rows.push(std::mem::take(&mut cur));
            x = 0;
        }
        x += block_w;
        cur.push((i, label, block_w));
    }
    if !cur.is_empty() {
        rows.push(cur);
    }
    rows
}

/// Height in pixels the band needs for `items` at width `total_w`.
pub fn legend_band_height_px(items: &[LegendItem], start_x: i32, total_w: i32) -> i32 {
    let rows = pack_rows(items, start_x, total_w).len() as i32;
    if rows == 0 {
        return 0;
    }
    2 * PAD_BAND + rows * LINE_H + (rows - 1) * ROW_GAP
}

/// Line sample with the series' dash pattern and a marker dot in the middle.
fn draw_sample<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    x: i32,
    y: i32,
    color: RGBAColor,
    line: LineType,
) -> Result<()> {
    let style = ShapeStyle {
        color,
        filled: false,
        stroke_width: 2,
    };
    match dash_pattern(line) {
        None => {
            area.draw(&PathElement::new(vec![(x, y), (x + SAMPLE_W, y)], style))
                .map_err(|e| anyhow::anyhow!("{:?}", e))?;
        }
        Some((on, off)) => {
            let (on, off) = (on as i32, off as i32);
            let mut sx = x;
            while sx < x + SAMPLE_W {
                let ex = (sx + on).min(x + SAMPLE_W);
                area.draw(&PathElement::new(vec![(sx, y), (ex, y)], style))
                    .map_err(|e| anyhow::anyhow!("{:?}", e))?;
                sx += on + off;
            }
        }
    }
    area.draw(&Circle::new((x + SAMPLE_W / 2, y), 4, color.filled()))
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    Ok(())
}

/// Draw the band. `start_x` aligns the first entry with the plot's y-axis.
pub fn draw_legend_band<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    items: &[LegendItem],
    start_x: i32,
) -> Result<()> {
    area.fill(&WHITE).map_err(|e| anyhow::anyhow!("{:?}", e))?;
    let (w, _) = area.dim_in_pixel();
    let rows = pack_rows(items, start_x, w as i32);

    let mut y = PAD_BAND + LINE_H / 2;
    for row in rows {
        let mut x = start_x;
        for (idx, label, block_w) in row {
            let item = &items[idx];
            let (color, text_color) = if item.selected {
                (item.color, BLACK.to_rgba())
            } else {
                (INACTIVE.to_rgba(), INACTIVE.to_rgba())
            };
            draw_sample(area, x, y, color, item.line)?;
            let style = TextStyle::from((FontFamily::SansSerif, FONT_PX))
                .color(&text_color)
                .pos(Pos::new(HPos::Left, VPos::Center));
            area.draw(&Text::new(label, (x + SAMPLE_W + SAMPLE_TO_TEXT, y), style))
                .map_err(|e| anyhow::anyhow!("{:?}", e))?;
            x += block_w;
        }
        y += LINE_H + ROW_GAP;
    }
    Ok(())
}
