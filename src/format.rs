//! Label language and number formatting: tooltip values, percentages and axis ticks.

use num_format::{Locale, ToFormattedString};
use serde::{Deserialize, Serialize};

/// Language of titles, units, series names and tooltip text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    /// Simplified Chinese, the page's native language.
    #[default]
    Zh,
    En,
}

impl Lang {
    pub fn parse(tag: &str) -> Option<Self> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "zh" | "zh_cn" | "zh-cn" | "cn" | "chinese" => Some(Lang::Zh),
            "en" | "en_us" | "en-us" | "english" => Some(Lang::En),
            _ => None,
        }
    }

    /// Placeholder shown for absent values.
    pub fn no_data(self) -> &'static str {
        match self {
            Lang::Zh => "无数据",
            Lang::En => "no data",
        }
    }

    /// Suffix for axis ticks at trillion scale (values are in billions).
    pub fn trillion(self) -> &'static str {
        match self {
            Lang::Zh => "万亿",
            Lang::En => "tn",
        }
    }

    /// Category label template for the year axis.
    pub fn year_template(self) -> &'static str {
        match self {
            Lang::Zh => "{value}年",
            Lang::En => "{value}",
        }
    }

    pub fn year_label(self, year: i32) -> String {
        self.year_template().replace("{value}", &year.to_string())
    }
}

/// Map a user-provided locale tag to a `num_format::Locale` and its decimal separator char.
///
/// Supported tags (case-insensitive): `en`, `us`, `en_US`, `zh`, `de`, `de_DE`, `german`,
/// `fr`, `es`, `it`, `pt`, `nl`. Defaults to English.
pub fn map_locale(tag: &str) -> (&'static Locale, char) {
    match tag.to_lowercase().as_str() {
        "de" | "de_de" | "german" => (&Locale::de, ','),
        "fr" | "fr_fr" => (&Locale::fr, ','),
        "es" | "es_es" => (&Locale::es, ','),
        "it" | "it_it" => (&Locale::it, ','),
        "pt" | "pt_pt" | "pt_br" => (&Locale::pt, ','),
        "nl" | "nl_nl" => (&Locale::nl, ','),
        "zh" | "zh_cn" => (&Locale::zh, '.'),
        _ => (&Locale::en, '.'),
    }
}

/// Thousands-grouped number with at most two decimals, trailing zeros trimmed.
pub fn format_number(value: f64, locale_tag: &str) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let (locale, dec_sep) = map_locale(locale_tag);
    let cents = (value.abs() * 100.0).round() as u64;
    let int_part = cents / 100;
    let frac = cents % 100;
    let sign = if value < 0.0 && cents > 0 { "-" } else { "" };
    let grouped = int_part.to_formatted_string(locale);
    if frac == 0 {
        format!("{sign}{grouped}")
    } else {
        let frac = format!("{frac:02}");
        format!("{sign}{grouped}{dec_sep}{}", frac.trim_end_matches('0'))
    }
}

/// Percentage with two decimals, e.g. `6.95%`.
pub fn format_percent(value: f64) -> String {
    format!("{value:.2}%")
}

/// Tooltip value: percent for growth series, grouped number otherwise,
/// and the placeholder for gaps.
pub fn format_value(value: Option<f64>, is_growth: bool, lang: Lang, locale_tag: &str) -> String {
    match value {
        None => lang.no_data().to_string(),
        Some(v) if is_growth => format_percent(v),
        Some(v) => format_number(v, locale_tag),
    }
}

/// Value-axis tick label. Values are in billions: from 1000 upwards they are
/// shown at trillion scale with no decimals, halves rounded up like JS `toFixed(0)`.
pub fn axis_tick(value: f64, is_growth: bool, lang: Lang) -> String {
    if is_growth {
        format!("{}%", plain_number(value))
    } else if value >= 1000.0 {
        format!("{}{}", (value / 1000.0).round() as i64, lang.trillion())
    } else {
        plain_number(value)
    }
}

/// Shortest plain rendering: integers without a decimal point, others as-is.
pub fn plain_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        // Tick values come out of float steps; cut representation noise.
        let s = format!("{value:.6}");
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_are_grouped() {
        assert_eq!(format_number(14687.67, "en"), "14,687.67");
        assert_eq!(format_number(14687.0, "en"), "14,687");
        assert_eq!(format_number(1234.5, "de"), "1.234,5");
        assert_eq!(format_number(-0.001, "en"), "0");
        assert_eq!(format_number(-2500.25, "en"), "-2,500.25");
    }

    #[test]
    fn percent_has_two_decimals() {
        assert_eq!(format_percent(6.949), "6.95%");
        assert_eq!(format_percent(-2.2), "-2.20%");
    }

    #[test]
    fn tick_labels() {
        assert_eq!(axis_tick(1000.0, false, Lang::Zh), "1万亿");
        assert_eq!(axis_tick(25000.0, false, Lang::En), "25tn");
        assert_eq!(axis_tick(500.0, false, Lang::Zh), "500");
        assert_eq!(axis_tick(1500.0, false, Lang::Zh), "2万亿");
        assert_eq!(axis_tick(2500.0, false, Lang::Zh), "3万亿");
        assert_eq!(axis_tick(2499.0, false, Lang::En), "2tn");
        assert_eq!(axis_tick(12.5, true, Lang::Zh), "12.5%");
        assert_eq!(axis_tick(-5.0, true, Lang::En), "-5%");
    }

    #[test]
    fn gaps_use_placeholder() {
        assert_eq!(format_value(None, false, Lang::Zh, "en"), "无数据");
        assert_eq!(format_value(None, true, Lang::En, "en"), "no data");
        assert_eq!(format_value(Some(3.0), true, Lang::En, "en"), "3.00%");
    }

    #[test]
    fn year_labels_follow_language() {
        assert_eq!(Lang::Zh.year_label(2022), "2022年");
        assert_eq!(Lang::En.year_label(2022), "2022");
        assert_eq!(Lang::parse("EN"), Some(Lang::En));
        assert_eq!(Lang::parse("klingon"), None);
    }
}
