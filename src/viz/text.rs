//! Text measurement and truncation.

/// Width in tenths of an em: wide (CJK) characters take a full em, Latin text about 0.6.
fn char_width_tenths(ch: char) -> u32 {
    let c = ch as u32;
    let wide = (0x2E80..=0x9FFF).contains(&c)
        || (0xAC00..=0xD7A3).contains(&c)
        || (0xF900..=0xFAFF).contains(&c)
        || (0xFF00..=0xFF60).contains(&c);
    if wide { 10 } else { 6 }
}

/// Heuristic: estimate pixel width of text (Plotters has no built-in text measuring).
pub fn estimate_text_width_px(text: &str, font_px: u32) -> u32 {
    let tenths: u32 = text.chars().map(char_width_tenths).sum();
    (tenths * font_px).div_ceil(10)
}

/// Truncate to fit `max_px` and add a single ellipsis if needed.
pub fn truncate_to_width(text: &str, font_px: u32, max_px: u32) -> String {
    if estimate_text_width_px(text, font_px) <= max_px {
        return text.to_string();
    }
    let budget = max_px.saturating_sub(estimate_text_width_px("…", font_px));
    let mut out = String::new();
    for ch in text.chars() {
        out.push(ch);
        if estimate_text_width_px(&out, font_px) > budget {
            out.pop();
            break;
        }
    }
    out.push('…');
    out
}
