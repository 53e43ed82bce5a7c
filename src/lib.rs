//! gdp_compare
//!
//! A Rust library for building China vs. USA GDP comparison charts from a
//! pre-computed dataset. Pairs with the `gdpc` CLI.
//!
//! ### Features
//! - Load the dataset from JSON or a JS file that assigns it to a variable
//! - Resolve any of the six views (nominal, real, PPP; level or growth) to
//!   a series pair and localized labels (Chinese or English)
//! - Build declarative, ECharts-compatible chart options: a two-series
//!   comparison chart and a twelve-series interactive chart with quick filters
//! - Render options as SVG/PNG images or as standalone HTML pages
//! - Drive both charts through a small state machine ([`Dashboard`])
//! - Summary statistics and a tidy CSV export
//!
//! ### Example
//! ```no_run
//! use gdp_compare::{ChartSettings, Lang, MetricKey, ZoomWindow, chart, resolve, storage, viz};
//!
//! let data = storage::load_dataset("gdp.json")?;
//! let key = MetricKey::parse("real-growth").unwrap_or_default();
//! let (pair, labels) = resolve::resolve(&data, key, Lang::En);
//! let settings = ChartSettings { lang: Lang::En, ..Default::default() };
//! let option = chart::build_single(&data.years, pair, key, &labels, &settings, ZoomWindow::default());
//! viz::render_to_file(&option, "real_growth.svg", 1000, 600)?;
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod chart;
pub mod engine;
pub mod format;
pub mod html;
pub mod models;
pub mod option;
pub mod presets;
pub mod resolve;
pub mod state;
pub mod stats;
pub mod storage;
pub mod viz;

pub use chart::{ChartSettings, ZoomWindow};
pub use engine::{MemoryEngine, RenderEngine};
pub use format::Lang;
pub use html::HtmlEngine;
pub use models::{Country, Dataset, DatasetError, Metric, MetricKey, SeriesPair, ValueMode, View};
pub use option::{ChartOption, SeriesMeta};
pub use presets::{LegendSelection, QuickFilter};
pub use state::{Dashboard, Selection};
pub use viz::ImageEngine;
