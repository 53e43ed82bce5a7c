//! Standalone HTML pages that hand options to ECharts in the browser.
//!
//! Options are embedded as JSON. The tick and tooltip formatters travel as
//! data ([`crate::option::TickFormatter`], [`crate::option::TooltipFormatter`])
//! and are swapped for JS functions by `attachFormatters` before `setOption`.

use crate::chart::{ChartSettings, ZoomWindow, build_interactive, build_single};
use crate::engine::RenderEngine;
use crate::format::Lang;
use crate::models::{Dataset, Metric, MetricKey};
use crate::option::ChartOption;
use crate::presets::{QuickFilter, preset_for};
use crate::resolve::{metric_name, resolve};
use anyhow::{Result, anyhow};
use log::info;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

const ECHARTS_CDN: &str = "https://cdn.jsdelivr.net/npm/echarts@5/dist/echarts.min.js";

const JS_HELPERS: &str = r#"
const NO_DATA = { zh: '无数据', en: 'no data' };
const TRILLION = { zh: '万亿', en: 'tn' };
function formatNumber(v, locale) {
  return Number(v).toLocaleString(locale, { maximumFractionDigits: 2 });
}
function formatPercent(v) {
  return Number(v).toFixed(2) + '%';
}
function axisTick(v, growth, lang) {
  if (growth) return v + '%';
  if (v >= 1000) return (v / 1000).toFixed(0) + TRILLION[lang];
  return String(v);
}
function yearLabel(y, lang) {
  return lang === 'zh' ? y + '年' : String(y);
}
function isGap(v) {
  return v === null || v === undefined || v === '-' || (typeof v === 'number' && isNaN(v));
}
function attachFormatters(source) {
  const option = JSON.parse(JSON.stringify(source));
  const tick = option.yAxis.axisLabel.formatter;
  option.yAxis.axisLabel.formatter = v => axisTick(v, tick.growth, tick.lang);
  const tip = option.tooltip.formatter;
  const series = option.series;
  option.tooltip.formatter = params => {
    let out = yearLabel(params[0].axisValue, tip.lang) + '<br/>';
    params.forEach(p => {
      const meta = series[p.seriesIndex].meta;
      const text = isGap(p.value)
        ? NO_DATA[tip.lang]
        : (meta.key.growth ? formatPercent(p.value) : formatNumber(p.value, tip.locale));
      out += p.seriesName + ': ' + text + '<br/>';
    });
    return out;
  };
  return option;
}
"#;

const PAGE_STYLE: &str = r#"
body { font-family: sans-serif; margin: 0; padding: 16px; background: #fafafa; }
.controls { display: flex; gap: 8px; align-items: center; margin-bottom: 12px; flex-wrap: wrap; }
button { padding: 6px 12px; border: 1px solid #ccc; background: #fff; cursor: pointer; }
button.active { background: #3498db; color: #fff; border-color: #3498db; }
.chart { background: #fff; }
"#;

/// JSON for embedding inside `<script>`.
fn script_json<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string(value)?.replace("</", "<\\/"))
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn html_lang(lang: Lang) -> &'static str {
    match lang {
        Lang::Zh => "zh-CN",
        Lang::En => "en",
    }
}

/// Page with one chart showing `option`.
pub fn chart_page(option: &ChartOption, width: u32, height: u32) -> Result<String> {
    let lang = option.tooltip.formatter.lang;
    let script = r#"
const chart = echarts.init(document.getElementById('chart'));
chart.setOption(attachFormatters(OPTION), true);
window.addEventListener('resize', () => chart.resize());
"#;
    Ok(format!(
        "<!DOCTYPE html>\n<html lang=\"{}\">\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n\
         <script src=\"{}\"></script>\n<style>{}</style>\n</head>\n<body>\n\
         <div id=\"chart\" class=\"chart\" style=\"width:{}px;height:{}px\"></div>\n\
         <script>\n{}\nconst OPTION = {};\n{}</script>\n</body>\n</html>\n",
        html_lang(lang),
        escape_html(&option.title.text),
        ECHARTS_CDN,
        PAGE_STYLE,
        width,
        height,
        JS_HELPERS,
        script_json(option)?,
        script,
    ))
}

fn ui_text(lang: Lang) -> [&'static str; 4] {
    match lang {
        Lang::Zh => ["数值", "增速", "静态视图", "交互视图"],
        Lang::En => ["Value", "Growth", "Static view", "Interactive view"],
    }
}

const DASHBOARD_SCRIPT: &str = r#"
let currentChartType = 'nominal';
let showGrowth = false;
let activeFilter = INITIAL_FILTER;
const staticChart = echarts.init(document.getElementById('chart'));
const interactiveChart = echarts.init(document.getElementById('chart-interactive'));

function renderStatic() {
  const key = showGrowth ? currentChartType + '-growth' : currentChartType;
  staticChart.setOption(attachFormatters(OPTIONS[key] || OPTIONS['nominal']), true);
}
function updateActiveButtons() {
  document.getElementById('value-view').classList.toggle('active', !showGrowth);
  document.getElementById('growth-view').classList.toggle('active', showGrowth);
  Object.keys(PRESETS).forEach(id => {
    document.getElementById(id).classList.toggle('active', id === activeFilter);
  });
}
function applyFilter(id) {
  if (!PRESETS[id]) return;
  activeFilter = id;
  interactiveChart.setOption({ legend: { selected: PRESETS[id] } });
  updateActiveButtons();
}
function showView(view) {
  const interactive = view === 'interactive';
  document.getElementById('static-panel').style.display = interactive ? 'none' : 'block';
  document.getElementById('interactive-panel').style.display = interactive ? 'block' : 'none';
  document.getElementById('static-view').classList.toggle('active', !interactive);
  document.getElementById('interactive-view').classList.toggle('active', interactive);
  if (interactive) {
    interactiveChart.setOption(attachFormatters(INTERACTIVE), true);
    applyFilter(activeFilter);
    interactiveChart.resize();
  } else {
    renderStatic();
    staticChart.resize();
  }
}

document.getElementById('chart-type').addEventListener('change', e => {
  currentChartType = e.target.value;
  renderStatic();
});
document.getElementById('value-view').addEventListener('click', () => {
  showGrowth = false;
  updateActiveButtons();
  renderStatic();
});
document.getElementById('growth-view').addEventListener('click', () => {
  showGrowth = true;
  updateActiveButtons();
  renderStatic();
});
document.getElementById('static-view').addEventListener('click', () => showView('static'));
document.getElementById('interactive-view').addEventListener('click', () => showView('interactive'));
Object.keys(PRESETS).forEach(id => {
  document.getElementById(id).addEventListener('click', () => applyFilter(id));
});
window.addEventListener('resize', () => {
  staticChart.resize();
  interactiveChart.resize();
});

updateActiveButtons();
showView('static');
"#;

/// Dual-view page: the single comparison chart with metric selector and
/// value/growth toggle, plus the 12-series chart with quick filters.
///
/// All six single-chart options are pre-built; switching only picks one.
pub fn dashboard_page(
    dataset: &Dataset,
    settings: &ChartSettings,
    initial_filter: QuickFilter,
    width: u32,
    height: u32,
) -> Result<String> {
    let lang = settings.lang;
    let mut options: BTreeMap<String, ChartOption> = BTreeMap::new();
    for key in MetricKey::ALL {
        let (pair, labels) = resolve(dataset, key, lang);
        options.insert(
            key.as_selector(),
            build_single(&dataset.years, pair, key, &labels, settings, ZoomWindow::default()),
        );
    }
    let interactive = build_interactive(
        dataset,
        &preset_for(initial_filter),
        settings,
        ZoomWindow::default(),
    );
    let presets: BTreeMap<&str, BTreeMap<String, bool>> = QuickFilter::ALL
        .iter()
        .map(|f| (f.button_id(), preset_for(*f).named(lang)))
        .collect();

    let title = options
        .get("nominal")
        .map(|o| o.title.text.clone())
        .ok_or_else(|| anyhow!("nominal option missing"))?;
    let [value_txt, growth_txt, static_txt, interactive_txt] = ui_text(lang);

    let mut controls = String::from("<select id=\"chart-type\">");
    for metric in Metric::ALL {
        controls.push_str(&format!(
            "<option value=\"{}\">{}</option>",
            metric.id(),
            metric_name(MetricKey::level(metric), lang)
        ));
    }
    controls.push_str("</select>\n");
    controls.push_str(&format!(
        "<button id=\"value-view\">{value_txt}</button><button id=\"growth-view\">{growth_txt}</button>\n"
    ));

    let mut filters = String::new();
    for f in QuickFilter::ALL {
        filters.push_str(&format!(
            "<button id=\"{}\">{}</button>",
            f.button_id(),
            f.label(lang)
        ));
    }

    Ok(format!(
        "<!DOCTYPE html>\n<html lang=\"{lang_attr}\">\n<head>\n<meta charset=\"utf-8\">\n<title>{title}</title>\n\
         <script src=\"{cdn}\"></script>\n<style>{style}</style>\n</head>\n<body>\n\
         <div class=\"controls\"><button id=\"static-view\">{static_txt}</button>\
         <button id=\"interactive-view\">{interactive_txt}</button></div>\n\
         <div id=\"static-panel\">\n<div class=\"controls\">{controls}</div>\n\
         <div id=\"chart\" class=\"chart\" style=\"width:{width}px;height:{height}px\"></div>\n</div>\n\
         <div id=\"interactive-panel\" style=\"display:none\">\n<div class=\"controls\">{filters}</div>\n\
         <div id=\"chart-interactive\" class=\"chart\" style=\"width:{width}px;height:{height}px\"></div>\n</div>\n\
         <script>\n{helpers}\nconst OPTIONS = {options};\nconst INTERACTIVE = {interactive};\n\
         const PRESETS = {presets};\nconst INITIAL_FILTER = '{initial}';\n{script}</script>\n</body>\n</html>\n",
        lang_attr = html_lang(lang),
        title = escape_html(&title),
        cdn = ECHARTS_CDN,
        style = PAGE_STYLE,
        helpers = JS_HELPERS,
        options = script_json(&options)?,
        interactive = script_json(&interactive)?,
        presets = script_json(&presets)?,
        initial = initial_filter.button_id(),
        script = DASHBOARD_SCRIPT,
    ))
}

/// Write a page to disk.
pub fn write_page<P: AsRef<Path>>(html: &str, path: P) -> Result<()> {
    let path = path.as_ref();
    fs::write(path, html)?;
    info!("wrote page to {}", path.display());
    Ok(())
}

/// Engine that rewrites a single-chart HTML page on every update.
#[derive(Debug, Clone)]
pub struct HtmlEngine {
    path: PathBuf,
    width: u32,
    height: u32,
    current: Option<ChartOption>,
}

impl HtmlEngine {
    pub fn new<P: Into<PathBuf>>(path: P, width: u32, height: u32) -> Self {
        Self {
            path: path.into(),
            width,
            height,
            current: None,
        }
    }

    pub fn current(&self) -> Option<&ChartOption> {
        self.current.as_ref()
    }

    fn write(&self) -> Result<()> {
        match &self.current {
            Some(option) => write_page(&chart_page(option, self.width, self.height)?, &self.path),
            None => Ok(()),
        }
    }
}

impl RenderEngine for HtmlEngine {
    fn set_option(&mut self, option: &ChartOption) -> Result<()> {
        self.current = Some(option.clone());
        self.write()
    }

    fn set_legend_selected(&mut self, selected: &BTreeMap<String, bool>) -> Result<()> {
        let option = self
            .current
            .as_mut()
            .ok_or_else(|| anyhow!("legend patch before any option was set"))?;
        option.legend.selected = selected.clone();
        self.write()
    }

    fn resize(&mut self, width: u32, height: u32) -> Result<()> {
        self.width = width;
        self.height = height;
        self.write()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn script_json_cannot_close_the_tag() {
        let s = script_json(&"</script>").unwrap();
        assert_eq!(s, "\"<\\/script>\"");
    }

    #[test]
    fn titles_are_escaped() {
        assert_eq!(escape_html("a<b & \"c\""), "a&lt;b &amp; &quot;c&quot;");
    }
}
