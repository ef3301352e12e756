//! Futday CLI — daily report generation and session diagnostics.
//!
//! Commands:
//! - `report` — run the full pipeline and save the markdown document
//! - `sessions` — resolve the trading day and print the session summary
//!   without news or narrative (fast diagnostic for a symbol/date)

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use futday_core::data::{MinuteFeed, SinaFuturesFeed};
use futday_core::domain::{PriceSeries, SessionStats};
use futday_core::narrative::{DeepSeekClient, TextGenerator};
use futday_core::news::{EastmoneySearch, NewsSource, SerperSearch};
use futday_core::session::{partition_sessions, resolve_trading_day};
use futday_report::{
    save_report, DailyReport, MarkdownReportGenerator, ReportConfig, ReportOrchestrator,
    ReportRequest,
};

#[derive(Parser)]
#[command(
    name = "futday",
    about = "Futday CLI — daily commodity-futures report generator"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the daily report and save it as markdown.
    Report {
        /// Contract symbol (e.g., CU2601, RB2601, AG2606).
        #[arg(long)]
        symbol: String,

        /// Commodity name used for news queries (e.g., copper, rebar).
        #[arg(long)]
        commodity: String,

        /// Nominal report date (YYYY-MM-DD). Defaults to today.
        #[arg(long)]
        date: Option<String>,

        /// Path to a TOML config file with API credentials.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output directory. Overrides the config value.
        #[arg(long)]
        output_dir: Option<PathBuf>,

        /// Skip news aggregation and the intel sweep.
        #[arg(long, default_value_t = false)]
        no_news: bool,

        /// Skip AI narrative; use the mechanical session description.
        #[arg(long, default_value_t = false)]
        no_ai: bool,
    },
    /// Resolve the trading day and print the session summary only.
    Sessions {
        /// Contract symbol (e.g., CU2601).
        #[arg(long)]
        symbol: String,

        /// Nominal date (YYYY-MM-DD). Defaults to today.
        #[arg(long)]
        date: Option<String>,

        /// Backward search cap in calendar days.
        #[arg(long, default_value_t = 7)]
        lookback: u32,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Report {
            symbol,
            commodity,
            date,
            config,
            output_dir,
            no_news,
            no_ai,
        } => run_report(symbol, commodity, date, config, output_dir, no_news, no_ai),
        Commands::Sessions {
            symbol,
            date,
            lookback,
        } => run_sessions(symbol, date, lookback),
    }
}

fn parse_date(date: Option<String>) -> Result<NaiveDate> {
    match date {
        Some(s) => NaiveDate::parse_from_str(&s, "%Y-%m-%d")
            .with_context(|| format!("invalid date '{s}', expected YYYY-MM-DD")),
        None => Ok(chrono::Local::now().date_naive()),
    }
}

#[allow(clippy::too_many_arguments)]
fn run_report(
    symbol: String,
    commodity: String,
    date: Option<String>,
    config_path: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    no_news: bool,
    no_ai: bool,
) -> Result<()> {
    let nominal = parse_date(date)?;

    let mut config = match config_path {
        Some(path) => ReportConfig::from_file(&path)?,
        None => ReportConfig::default(),
    };
    if let Some(dir) = output_dir {
        config.output_dir = dir;
    }

    let feed: Box<dyn MinuteFeed> = Box::new(SinaFuturesFeed::new());

    let mut sources: Vec<Box<dyn NewsSource>> = Vec::new();
    if !no_news {
        if let Some(serper) = &config.serper {
            sources.push(Box::new(SerperSearch::new(serper.api_key.clone(), nominal)));
        }
        sources.push(Box::new(EastmoneySearch::new(nominal)));
    }

    let generator: Option<Box<dyn TextGenerator>> = if no_ai {
        None
    } else {
        config.deepseek.as_ref().map(|ds| {
            Box::new(DeepSeekClient::new(
                ds.api_key.clone(),
                ds.endpoint.clone(),
                ds.model.clone(),
            )) as Box<dyn TextGenerator>
        })
    };

    let output_dir = config.output_dir.clone();
    let orchestrator = ReportOrchestrator::new(feed, sources, generator, config);
    let report = orchestrator.run(ReportRequest {
        symbol,
        commodity,
        date: nominal,
    })?;

    print_summary(&report);

    let markdown = MarkdownReportGenerator.generate(&report);
    let path = save_report(&markdown, report.resolved.date, &output_dir)?;
    println!("Report saved to: {}", path.display());

    Ok(())
}

fn run_sessions(symbol: String, date: Option<String>, lookback: u32) -> Result<()> {
    let nominal = parse_date(date)?;

    let feed = SinaFuturesFeed::new();
    let bars = feed.fetch_minute_bars(&symbol)?;
    let series = PriceSeries::from_bars(symbol.clone(), bars);
    println!(
        "{symbol}: {} bars ({} dropped during canonicalization)",
        series.len(),
        series.dropped()
    );

    let resolved = resolve_trading_day(&series, nominal, lookback)?;
    println!(
        "Resolved trading day: {} ({} day(s) before {nominal})",
        resolved.date, resolved.days_back
    );

    let summary = partition_sessions(&series, resolved.date);
    print_session("Day", summary.day.as_ref());
    print_session("Night", summary.night.as_ref());

    Ok(())
}

fn print_session(label: &str, stats: Option<&SessionStats>) {
    match stats {
        Some(s) => println!(
            "{label:<6} open {:.2}  high {:.2}  low {:.2}  close {:.2}  change {:+.2} ({:+.2}%)",
            s.open, s.high, s.low, s.close, s.change, s.change_pct
        ),
        None => println!("{label:<6} unavailable"),
    }
}

fn print_summary(report: &DailyReport) {
    println!();
    println!("=== Daily Report ===");
    println!(
        "Contract:      {} ({})",
        report.request.symbol, report.request.commodity
    );
    println!(
        "Trading day:   {} ({} day(s) before nominal {})",
        report.resolved.date, report.resolved.days_back, report.request.date
    );
    print_session("Day", report.summary.day.as_ref());
    print_session("Night", report.summary.night.as_ref());
    if let Some(ma20) = report.indicators.ma20 {
        println!("MA20:          {ma20:.2}");
    }
    if let Some(rsi) = report.indicators.rsi14 {
        println!("RSI(14):       {rsi:.2}");
    }
    if let Some(position) = report.indicators.price_position {
        println!("Price:         {position}");
    }
    println!("News items:    {}", report.news.len());
    println!(
        "Narrative:     {}",
        if report.narrative.ai_generated {
            "AI-generated"
        } else {
            "mechanical"
        }
    );
    if report.dropped_bars > 0 {
        println!("WARNING: {} malformed bars dropped", report.dropped_bars);
    }
    println!();
}
