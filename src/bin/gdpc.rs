use anyhow::{Result, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use gdp_compare::chart::{self, ChartSettings, ZoomWindow};
use gdp_compare::resolve::{country_name, metric_name};
use gdp_compare::{
    Dashboard, Dataset, HtmlEngine, ImageEngine, Lang, MemoryEngine, Metric, MetricKey, QuickFilter,
    RenderEngine, Selection, ValueMode, View,
};
use gdp_compare::{html, presets, stats, storage};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(
    name = "gdpc",
    version,
    about = "Build and render China vs. USA GDP comparison charts"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the two-series comparison chart (.svg, .png or .html).
    Render(RenderArgs),
    /// Render the twelve-series chart with a quick filter applied (.svg, .png or .html).
    Interactive(InteractiveArgs),
    /// Write the dual-view HTML dashboard.
    Dashboard(DashboardArgs),
    /// Print or save the chart option as JSON.
    #[command(name = "option")]
    Opt(OptionArgs),
    /// Print the tooltip of the comparison chart for one year.
    Tooltip(TooltipArgs),
    /// Print summary statistics for every series.
    Stats(CommonArgs),
    /// Export the dataset as tidy CSV.
    Export(ExportArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum LangArg {
    Zh,
    En,
}

impl From<LangArg> for Lang {
    fn from(l: LangArg) -> Self {
        match l {
            LangArg::Zh => Lang::Zh,
            LangArg::En => Lang::En,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum MetricArg {
    Nominal,
    Real,
    Ppp,
}

impl From<MetricArg> for Metric {
    fn from(m: MetricArg) -> Self {
        match m {
            MetricArg::Nominal => Metric::Nominal,
            MetricArg::Real => Metric::Real,
            MetricArg::Ppp => Metric::Ppp,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum FilterArg {
    All,
    Nominal,
    Real,
    Growth,
}

impl From<FilterArg> for QuickFilter {
    fn from(f: FilterArg) -> Self {
        match f {
            FilterArg::All => QuickFilter::All,
            FilterArg::Nominal => QuickFilter::Nominal,
            FilterArg::Real => QuickFilter::Real,
            FilterArg::Growth => QuickFilter::Growth,
        }
    }
}

#[derive(Args, Debug)]
struct CommonArgs {
    /// Dataset file (.json, or .js assigning the object to a variable).
    #[arg(short, long)]
    data: PathBuf,
    /// Label language.
    #[arg(long, value_enum, default_value_t = LangArg::Zh)]
    lang: LangArg,
    /// Locale for number grouping in tooltips (e.g., en, de, fr).
    #[arg(long, default_value = "en")]
    locale: String,
}

impl CommonArgs {
    fn settings(&self) -> ChartSettings {
        ChartSettings {
            lang: self.lang.into(),
            locale: self.locale.clone(),
        }
    }
}

#[derive(Args, Debug)]
struct SeriesArgs {
    /// Which GDP measure to chart.
    #[arg(short, long, value_enum, default_value_t = MetricArg::Nominal)]
    metric: MetricArg,
    /// Chart the year-over-year growth rate instead of the level.
    #[arg(long, default_value_t = false)]
    growth: bool,
}

impl SeriesArgs {
    fn key(&self) -> MetricKey {
        MetricKey {
            metric: self.metric.into(),
            growth: self.growth,
        }
    }
}

#[derive(Args, Debug)]
struct SizeArgs {
    /// Width of the chart (default 1000).
    #[arg(long, default_value_t = 1000)]
    width: u32,
    /// Height of the chart (default 600).
    #[arg(long, default_value_t = 600)]
    height: u32,
}

#[derive(Args, Debug)]
struct RenderArgs {
    #[command(flatten)]
    common: CommonArgs,
    #[command(flatten)]
    series: SeriesArgs,
    #[command(flatten)]
    size: SizeArgs,
    /// Visible part of the year axis in percent, as START:END (e.g., 50:100).
    #[arg(long)]
    zoom: Option<String>,
    /// Output path.
    #[arg(short, long)]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct InteractiveArgs {
    #[command(flatten)]
    common: CommonArgs,
    #[command(flatten)]
    size: SizeArgs,
    /// Quick filter applied to the legend.
    #[arg(long, value_enum, default_value_t = FilterArg::Nominal)]
    filter: FilterArg,
    /// Output path.
    #[arg(short, long)]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct DashboardArgs {
    #[command(flatten)]
    common: CommonArgs,
    #[command(flatten)]
    size: SizeArgs,
    /// Quick filter highlighted when the interactive view first opens.
    #[arg(long, value_enum, default_value_t = FilterArg::Nominal)]
    filter: FilterArg,
    /// Output HTML path.
    #[arg(short, long)]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct OptionArgs {
    #[command(flatten)]
    common: CommonArgs,
    #[command(flatten)]
    series: SeriesArgs,
    /// Build the twelve-series option instead of the comparison chart.
    #[arg(long, default_value_t = false)]
    interactive: bool,
    /// Quick filter for --interactive.
    #[arg(long, value_enum, default_value_t = FilterArg::Nominal)]
    filter: FilterArg,
    /// Save to file instead of printing.
    #[arg(short, long)]
    out: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct TooltipArgs {
    #[command(flatten)]
    common: CommonArgs,
    #[command(flatten)]
    series: SeriesArgs,
    /// Year to hover.
    #[arg(short, long)]
    year: i32,
}

#[derive(Args, Debug)]
struct ExportArgs {
    #[command(flatten)]
    common: CommonArgs,
    /// Output CSV path.
    #[arg(short, long)]
    out: PathBuf,
}

fn fmt_opt(v: Option<f64>) -> String {
    match v {
        Some(x) if x.is_finite() => {
            // Format up to 4 decimals, then trim trailing zeros and trailing dot.
            let s = format!("{:.4}", x);
            s.trim_end_matches('0').trim_end_matches('.').to_string()
        }
        _ => "NA".to_string(),
    }
}

fn parse_zoom(s: &str) -> Option<ZoomWindow> {
    let (a, b) = s.split_once(':')?;
    let start = a.trim().parse::<f64>().ok()?;
    let end = b.trim().parse::<f64>().ok()?;
    Some(ZoomWindow::new(start, end))
}

/// Engine by output extension.
fn engine_for(path: &Path, width: u32, height: u32) -> Result<Box<dyn RenderEngine>> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();
    let engine: Box<dyn RenderEngine> = match ext.as_str() {
        "svg" | "png" => Box::new(ImageEngine::new(path, width, height)),
        "html" | "htm" => Box::new(HtmlEngine::new(path, width, height)),
        other => bail!("unsupported output format: {:?} (use .svg, .png or .html)", other),
    };
    Ok(engine)
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Interactive(args) => cmd_interactive(args),
        Command::Dashboard(args) => cmd_dashboard(args),
        Command::Opt(args) => cmd_option(args),
        Command::Tooltip(args) => cmd_tooltip(args),
        Command::Stats(args) => cmd_stats(args),
        Command::Export(args) => cmd_export(args),
    }
}

fn load(common: &CommonArgs) -> Result<Dataset> {
    storage::load_dataset(&common.data)
}

fn cmd_render(args: RenderArgs) -> Result<()> {
    let data = load(&args.common)?;
    let engine = engine_for(&args.out, args.size.width, args.size.height)?;
    let idle: Box<dyn RenderEngine> = Box::new(MemoryEngine::new(args.size.width, args.size.height));
    let zoom = match args.zoom.as_deref() {
        Some(z) => parse_zoom(z)
            .ok_or_else(|| anyhow::anyhow!("invalid --zoom, expected START:END in percent"))?,
        None => ZoomWindow::default(),
    };
    let mode = if args.series.growth {
        ValueMode::Growth
    } else {
        ValueMode::Value
    };
    let mut dash = Dashboard::new(data, args.common.settings(), engine, idle);
    dash.select(Selection {
        metric: args.series.metric.into(),
        mode,
        view: View::Static,
        zoom,
        ..Default::default()
    })?;
    eprintln!("Wrote {} chart to {}", args.series.key(), args.out.display());
    Ok(())
}

fn cmd_interactive(args: InteractiveArgs) -> Result<()> {
    let data = load(&args.common)?;
    let engine = engine_for(&args.out, args.size.width, args.size.height)?;
    let idle: Box<dyn RenderEngine> = Box::new(MemoryEngine::new(args.size.width, args.size.height));
    let mut dash = Dashboard::new(data, args.common.settings(), idle, engine);
    let filter: QuickFilter = args.filter.into();
    dash.apply_filter(filter)?;
    dash.show_interactive()?;
    eprintln!("Wrote interactive chart ({}) to {}", filter, args.out.display());
    Ok(())
}

fn cmd_dashboard(args: DashboardArgs) -> Result<()> {
    let data = load(&args.common)?;
    let page = html::dashboard_page(
        &data,
        &args.common.settings(),
        args.filter.into(),
        args.size.width,
        args.size.height,
    )?;
    html::write_page(&page, &args.out)?;
    eprintln!("Wrote dashboard to {}", args.out.display());
    Ok(())
}

fn cmd_option(args: OptionArgs) -> Result<()> {
    let data = load(&args.common)?;
    let settings = args.common.settings();
    let option = if args.interactive {
        chart::build_interactive(
            &data,
            &presets::preset_for(args.filter.into()),
            &settings,
            ZoomWindow::default(),
        )
    } else {
        let key = args.series.key();
        let (pair, labels) = gdp_compare::resolve::resolve(&data, key, settings.lang);
        chart::build_single(&data.years, pair, key, &labels, &settings, ZoomWindow::default())
    };
    match args.out.as_ref() {
        Some(path) => {
            storage::save_option_json(&option, path)?;
            eprintln!("Saved option to {}", path.display());
        }
        None => println!("{}", serde_json::to_string_pretty(&option)?),
    }
    Ok(())
}

fn cmd_tooltip(args: TooltipArgs) -> Result<()> {
    let data = load(&args.common)?;
    let settings = args.common.settings();
    let key = args.series.key();
    let (pair, labels) = gdp_compare::resolve::resolve(&data, key, settings.lang);
    let option = chart::build_single(&data.years, pair, key, &labels, &settings, ZoomWindow::default());
    match chart::tooltip_at_year(&option, args.year) {
        Some(content) => print!("{}", content),
        None => bail!("year {} is not in the dataset", args.year),
    }
    Ok(())
}

fn cmd_stats(args: CommonArgs) -> Result<()> {
    let data = load(&args)?;
    let lang: Lang = args.lang.into();
    for s in stats::dataset_summary(&data) {
        println!(
            "{} • {}  count={} missing={}  min={} max={} ({}) mean={} median={}",
            country_name(s.country, lang),
            metric_name(s.key, lang),
            s.count,
            s.missing,
            fmt_opt(s.min),
            fmt_opt(s.max),
            s.max_year.map(|y| y.to_string()).unwrap_or_else(|| "NA".to_string()),
            fmt_opt(s.mean),
            fmt_opt(s.median)
        );
    }
    Ok(())
}

fn cmd_export(args: ExportArgs) -> Result<()> {
    let data = load(&args.common)?;
    storage::save_csv(&data, &args.out)?;
    eprintln!(
        "Saved {} rows to {}",
        data.years.len() * MetricKey::ALL.len() * 2,
        args.out.display()
    );
    Ok(())
}
