//! Option styles -> plotters styles: CSS colors, stroke widths, dash patterns.

use crate::option::{LineSeries, LineType};
use plotters::prelude::*;

/// Parse `#rgb`, `#rrggbb` or `rgba(r, g, b, a)`; anything else is black.
pub fn parse_color(css: &str) -> RGBAColor {
    let s = css.trim();
    if let Some(hex) = s.strip_prefix('#') {
        let expand = |c: u8| c * 16 + c;
        let digits: Vec<u8> = hex
            .chars()
            .filter_map(|c| c.to_digit(16).map(|d| d as u8))
            .collect();
        return match (hex.len(), digits.len()) {
            (3, 3) => RGBAColor(expand(digits[0]), expand(digits[1]), expand(digits[2]), 1.0),
            (6, 6) => RGBAColor(
                digits[0] * 16 + digits[1],
                digits[2] * 16 + digits[3],
                digits[4] * 16 + digits[5],
                1.0,
            ),
            _ => BLACK.to_rgba(),
        };
    }
    let inner = s
        .strip_prefix("rgba(")
        .or_else(|| s.strip_prefix("rgb("))
        .and_then(|rest| rest.strip_suffix(')'));
    if let Some(inner) = inner {
        let parts: Vec<f64> = inner
            .split(',')
            .filter_map(|p| p.trim().parse::<f64>().ok())
            .collect();
        if parts.len() >= 3 {
            let ch = |v: f64| v.clamp(0.0, 255.0) as u8;
            let alpha = parts.get(3).copied().unwrap_or(1.0).clamp(0.0, 1.0);
            return RGBAColor(ch(parts[0]), ch(parts[1]), ch(parts[2]), alpha);
        }
    }
    BLACK.to_rgba()
}

/// Stroke style of a series line; lines take the item color.
pub fn line_style(series: &LineSeries) -> ShapeStyle {
    ShapeStyle {
        color: parse_color(&series.item_style.color),
        filled: false,
        stroke_width: series.line_style.width.round().max(1.0) as u32,
    }
}

/// Marker fill of a series.
pub fn marker_style(series: &LineSeries) -> ShapeStyle {
    parse_color(&series.item_style.color).filled()
}

/// On/off lengths in pixels; `None` for a solid line.
pub fn dash_pattern(kind: LineType) -> Option<(f64, f64)> {
    match kind {
        LineType::Solid => None,
        LineType::Dashed => Some((8.0, 5.0)),
        LineType::Dotted => Some((2.0, 4.0)),
    }
}

/// Cut a polyline into dash pieces.
///
/// `data` are the points in chart coordinates, `px` their pixel
/// projections; the pattern is measured in pixels and continues across
/// vertices. Pieces are returned in chart coordinates.
pub fn split_dashes(
    data: &[(f64, f64)],
    px: &[(f64, f64)],
    on: f64,
    off: f64,
) -> Vec<Vec<(f64, f64)>> {
    let mut pieces = Vec::new();
    if data.len() < 2 || data.len() != px.len() || on <= 0.0 {
        return pieces;
    }
    let period = on + off.max(0.0);
    let lerp = |a: (f64, f64), b: (f64, f64), t: f64| (a.0 + (b.0 - a.0) * t, a.1 + (b.1 - a.1) * t);

    // Distance travelled along the path, modulo the pattern period.
    let mut phase = 0.0f64;
    let mut current: Vec<(f64, f64)> = Vec::new();
    for i in 0..data.len() - 1 {
        let (d0, d1) = (data[i], data[i + 1]);
        let len = ((px[i + 1].0 - px[i].0).powi(2) + (px[i + 1].1 - px[i].1).powi(2)).sqrt();
        if len == 0.0 {
            continue;
        }
        let mut pos = 0.0;
        while pos < len {
            let drawing = phase < on;
            let left_in_state = if drawing { on - phase } else { period - phase };
            let step = left_in_state.min(len - pos);
            if drawing {
                if current.is_empty() {
                    current.push(lerp(d0, d1, pos / len));
                }
                current.push(lerp(d0, d1, (pos + step) / len));
            }
            pos += step;
            phase += step;
            if drawing && phase >= on {
                pieces.push(std::mem::take(&mut current));
            }
            if phase >= period {
                phase -= period;
            }
        }
    }
    if current.len() >= 2 {
        pieces.push(current);
    }
    pieces
}
