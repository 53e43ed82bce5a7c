//! Selection state and the dashboard that re-renders on every change.

use crate::chart::{ChartSettings, ZoomWindow, build_interactive, build_single};
use crate::engine::RenderEngine;
use crate::models::{Dataset, Metric, MetricKey, ValueMode, View};
use crate::option::ChartOption;
use crate::presets::{QuickFilter, preset_for};
use crate::resolve::resolve;
use anyhow::Result;
use log::debug;

/// What the user has picked. Only the dashboard mutates it.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Selection {
    pub metric: Metric,
    pub mode: ValueMode,
    pub view: View,
    /// Highlighted quick-filter button of the interactive view.
    pub filter: QuickFilter,
    pub zoom: ZoomWindow,
}

impl Selection {
    pub fn metric_key(&self) -> MetricKey {
        MetricKey {
            metric: self.metric,
            growth: self.mode == ValueMode::Growth,
        }
    }
}

/// Application state: dataset, selection and the two chart handles
/// (single comparison chart, 12-series interactive chart).
pub struct Dashboard<E: RenderEngine> {
    dataset: Dataset,
    settings: ChartSettings,
    selection: Selection,
    static_chart: E,
    interactive_chart: E,
    interactive_rendered: bool,
}

impl<E: RenderEngine> Dashboard<E> {
    pub fn new(dataset: Dataset, settings: ChartSettings, static_chart: E, interactive_chart: E) -> Self {
        Self {
            dataset,
            settings,
            selection: Selection::default(),
            static_chart,
            interactive_chart,
            interactive_rendered: false,
        }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn settings(&self) -> &ChartSettings {
        &self.settings
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn static_chart(&self) -> &E {
        &self.static_chart
    }

    pub fn interactive_chart(&self) -> &E {
        &self.interactive_chart
    }

    /// Option of the single comparison chart for the current selection.
    pub fn static_option(&self) -> ChartOption {
        let key = self.selection.metric_key();
        let (pair, labels) = resolve(&self.dataset, key, self.settings.lang);
        build_single(
            &self.dataset.years,
            pair,
            key,
            &labels,
            &self.settings,
            self.selection.zoom,
        )
    }

    /// Option of the interactive chart with the active preset applied.
    pub fn interactive_option(&self) -> ChartOption {
        build_interactive(
            &self.dataset,
            &preset_for(self.selection.filter),
            &self.settings,
            self.selection.zoom,
        )
    }

    /// First render: show the static chart.
    pub fn start(&mut self) -> Result<()> {
        if self.selection.view == View::None {
            self.selection.view = View::Static;
        }
        self.render()
    }

    pub fn set_metric(&mut self, metric: Metric) -> Result<()> {
        self.selection.metric = metric;
        self.render_static()
    }

    /// Selector string from the metric control, e.g. `real` or `ppp-growth`.
    ///
    /// A `-growth` selector also switches to growth mode; a bare metric keeps
    /// the current mode. Unknown values select nominal/level.
    pub fn set_metric_selector(&mut self, selector: &str) -> Result<()> {
        match MetricKey::parse(selector) {
            Some(key) => {
                self.selection.metric = key.metric;
                if key.growth {
                    self.selection.mode = ValueMode::Growth;
                }
            }
            None => {
                debug!("unknown selector {selector:?}, using nominal");
                let key = MetricKey::default();
                self.selection.metric = key.metric;
                self.selection.mode = ValueMode::Value;
            }
        }
        self.render_static()
    }

    /// Replace the whole selection and render the visible chart once.
    /// A `View::None` selection is shown as the static chart.
    pub fn select(&mut self, selection: Selection) -> Result<()> {
        self.selection = selection;
        if self.selection.view == View::None {
            self.selection.view = View::Static;
        }
        self.render()
    }

    pub fn set_mode(&mut self, mode: ValueMode) -> Result<()> {
        self.selection.mode = mode;
        self.render_static()
    }

    pub fn show_static(&mut self) -> Result<()> {
        self.selection.view = View::Static;
        self.render_static()
    }

    pub fn show_interactive(&mut self) -> Result<()> {
        self.selection.view = View::Interactive;
        self.render_interactive()
    }

    /// Rewrite the interactive chart's legend map to a preset. Data is not rebuilt.
    pub fn apply_filter(&mut self, filter: QuickFilter) -> Result<()> {
        self.selection.filter = filter;
        if !self.interactive_rendered {
            return Ok(());
        }
        debug!("legend patch: {filter}");
        let named = preset_for(filter).named(self.settings.lang);
        self.interactive_chart.set_legend_selected(&named)
    }

    /// Quick filter by button id; unknown ids are ignored.
    pub fn apply_filter_button(&mut self, id: &str) -> Result<()> {
        match QuickFilter::from_button_id(id) {
            Some(f) => self.apply_filter(f),
            None => Ok(()),
        }
    }

    /// Show `start..end` percent of the year axis.
    pub fn zoom(&mut self, start: f64, end: f64) -> Result<()> {
        self.selection.zoom = ZoomWindow::new(start, end);
        self.render()
    }

    /// Toolbox "restore": full year range again.
    pub fn restore(&mut self) -> Result<()> {
        self.selection.zoom = ZoomWindow::default();
        self.render()
    }

    pub fn resize(&mut self, width: u32, height: u32) -> Result<()> {
        self.static_chart.resize(width, height)?;
        self.interactive_chart.resize(width, height)
    }

    /// Which value/growth toggle is highlighted.
    pub fn is_mode_active(&self, mode: ValueMode) -> bool {
        self.selection.mode == mode
    }

    pub fn is_filter_active(&self, filter: QuickFilter) -> bool {
        self.selection.view == View::Interactive && self.selection.filter == filter
    }

    fn render(&mut self) -> Result<()> {
        match self.selection.view {
            View::None => Ok(()),
            View::Static => self.render_static(),
            View::Interactive => self.render_interactive(),
        }
    }

    fn render_static(&mut self) -> Result<()> {
        if self.selection.view == View::None {
            self.selection.view = View::Static;
        }
        let option = self.static_option();
        debug!("static chart: {}", self.selection.metric_key());
        self.static_chart.set_option(&option)
    }

    fn render_interactive(&mut self) -> Result<()> {
        let option = self.interactive_option();
        debug!("interactive chart: {}", self.selection.filter);
        self.interactive_chart.set_option(&option)?;
        self.interactive_rendered = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::MemoryEngine;
    use crate::models::SeriesPair;

    fn dataset() -> Dataset {
        let p = SeriesPair {
            china: vec![Some(1.0), Some(2.0)],
            usa: vec![Some(3.0), Some(4.0)],
        };
        Dataset {
            years: vec![2000, 2001],
            nominal: p.clone(),
            real: p.clone(),
            ppp: p.clone(),
            nominal_growth: p.clone(),
            real_growth: p.clone(),
            ppp_growth: p,
        }
    }

    fn dashboard() -> Dashboard<MemoryEngine> {
        Dashboard::new(
            dataset(),
            ChartSettings::default(),
            MemoryEngine::new(800, 600),
            MemoryEngine::new(800, 600),
        )
    }

    #[test]
    fn nothing_rendered_before_start() {
        let d = dashboard();
        assert_eq!(d.selection().view, View::None);
        assert!(d.static_chart().current().is_none());
    }

    #[test]
    fn selector_sets_growth_mode() {
        let mut d = dashboard();
        d.start().unwrap();
        d.set_metric_selector("ppp-growth").unwrap();
        assert_eq!(d.selection().metric_key(), MetricKey::growth(Metric::Ppp));
        assert!(d.is_mode_active(ValueMode::Growth));
        d.set_metric_selector("unknown").unwrap();
        assert_eq!(d.selection().metric_key(), MetricKey::default());
        assert!(d.is_mode_active(ValueMode::Value));
    }

    #[test]
    fn unknown_selector_in_growth_mode_shows_nominal_level() {
        let mut d = dashboard();
        d.start().unwrap();
        d.set_mode(ValueMode::Growth).unwrap();
        d.set_metric_selector("bogus-growth").unwrap();
        assert_eq!(d.selection().metric_key(), MetricKey::level(Metric::Nominal));
        let opt = d.static_chart().current().unwrap();
        assert!(opt.series.iter().all(|s| !s.meta.key.growth));
        assert!(opt.series.iter().all(|s| s.mark_point.is_some()));
    }

    #[test]
    fn bare_metric_selector_keeps_mode() {
        let mut d = dashboard();
        d.start().unwrap();
        d.set_mode(ValueMode::Growth).unwrap();
        d.set_metric_selector("real").unwrap();
        assert_eq!(d.selection().metric_key(), MetricKey::growth(Metric::Real));
    }

    #[test]
    fn select_renders_once() {
        let mut d = dashboard();
        d.select(Selection {
            metric: Metric::Ppp,
            mode: ValueMode::Growth,
            zoom: ZoomWindow::new(50.0, 100.0),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(d.selection().view, View::Static);
        assert_eq!(d.static_chart().replace_count(), 1);
        let opt = d.static_chart().current().unwrap();
        assert_eq!(opt.zoom_window(), (50.0, 100.0));
        assert!(opt.series.iter().all(|s| s.meta.key == MetricKey::growth(Metric::Ppp)));
    }

    #[test]
    fn filter_before_interactive_is_remembered() {
        let mut d = dashboard();
        d.start().unwrap();
        d.apply_filter(QuickFilter::Growth).unwrap();
        assert_eq!(d.interactive_chart().patch_count(), 0);
        d.show_interactive().unwrap();
        let opt = d.interactive_chart().current().unwrap();
        assert_eq!(opt.legend.selected.values().filter(|v| **v).count(), 6);
        assert!(d.is_filter_active(QuickFilter::Growth));
    }

    #[test]
    fn zoom_and_restore_rebuild_active_view() {
        let mut d = dashboard();
        d.start().unwrap();
        d.zoom(80.0, 20.0).unwrap();
        let opt = d.static_chart().current().unwrap();
        assert_eq!(opt.zoom_window(), (20.0, 80.0));
        d.restore().unwrap();
        let opt = d.static_chart().current().unwrap();
        assert_eq!(opt.zoom_window(), (0.0, 100.0));
        assert_eq!(d.static_chart().replace_count(), 3);
    }
}
