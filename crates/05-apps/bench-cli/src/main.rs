//! Command-line front end for comparing the native and sandboxed reducers.

use anyhow::{bail, Context, Result};
use bench::{BenchConfig, BenchmarkOutcome, DataSize, Session, SessionConfig};
use clap::{Args, Parser, Subcommand, ValueEnum};
use futures::executor::block_on;
use item_source::{ItemSource, RandomItems};
use log::info;
use runtime_native::NativeEngine;
use runtime_sandbox::{SandboxLoader, SandboxReducer};
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use view_model::{Action, EngineKind, ItemRef, ViewEngine, DEFAULT_ITEMS_PER_PAGE};

/// Text rendering helpers used by the CLI commands.
mod render {
    use bench::{LoadReport, OperationResult, Presentation};
    use std::fmt::Write;
    use timing::format_ms;
    use view_model::{SortKey, ViewSnapshot};

    /// Format the per-operation comparison table.
    pub fn comparison(results: &[OperationResult]) -> String {
        let mut out = String::new();
        writeln!(
            out,
            "{:<20} {:>12} {:>12} {:>8}",
            "Operation", "Native", "Sandboxed", "Speedup"
        )
        .expect("write header");
        for result in results {
            let speedup = result
                .speedup
                .map_or_else(|| "n/a".to_string(), |speedup| format!("{speedup:.2}x"));
            writeln!(
                out,
                "{:<20} {:>12} {:>12} {:>8}",
                result.operation,
                format_ms(result.native_time()),
                format_ms(result.sandboxed_time()),
                speedup
            )
            .expect("write row");
        }
        out
    }

    /// Format the timings of a data load.
    pub fn load(report: &LoadReport) -> String {
        let sandboxed = report
            .sandboxed_ms
            .map_or_else(|| "-".to_string(), format_ms);
        format!(
            "Loaded {} items (native {}, sandboxed {})\n",
            report.items,
            format_ms(report.native_ms),
            sandboxed
        )
    }

    /// Format the current page and its surrounding state.
    pub fn presentation(view: &Presentation) -> String {
        let mut out = String::new();
        writeln!(
            out,
            "[{}] {} of {} items match",
            view.reducer_type.as_str().to_uppercase(),
            view.filtered_count,
            view.total_items
        )
        .expect("write summary");
        let playable = view
            .filter_playable
            .map_or("any", |playable| if playable { "yes" } else { "no" });
        writeln!(
            out,
            "Page {} of {} | tag: {} | playable: {} | sort: {} {}",
            view.current_page + 1,
            view.total_pages,
            view.filter_tag.as_deref().unwrap_or("any"),
            playable,
            view.sort_by.map_or("none", SortKey::as_str),
            view.sort_order
        )
        .expect("write criteria");
        for item in &view.page_items {
            writeln!(
                out,
                "  {:<12} {:.1}  {:<8}  {}  ({})",
                item.id,
                item.rating,
                if item.is_playable { "playable" } else { "locked" },
                item.title,
                item.tags.join(", ")
            )
            .expect("write item");
        }
        if let Some(stats) = &view.metrics_summary {
            writeln!(
                out,
                "Dispatch: avg {} (min {}, max {})",
                format_ms(stats.average),
                format_ms(stats.min),
                format_ms(stats.max)
            )
            .expect("write metrics");
        }
        if let Some(count) = view.long_tasks {
            writeln!(out, "Long tasks: {count}").expect("write long tasks");
        }
        out
    }

    /// Format one replayed action.
    pub fn step(index: usize, action: &str, view: &ViewSnapshot, agree: bool) -> String {
        format!(
            "{index:>3} {action:<20} filtered={} page={}/{} {}\n",
            view.filtered_count,
            view.current_page + 1,
            view.total_pages(),
            if agree { "ok" } else { "DIVERGED" }
        )
    }
}

/// Benchmark the native reducer against its sandboxed twin.
#[derive(Parser, Debug)]
#[command(author, version, about = "Compare native and sandboxed view reducers", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load data into both engines and run the operation menu.
    Run(RunArgs),
    /// Apply filters, sort and paging, then print the page.
    View(ViewArgs),
    /// Replay a JSON action script on both engines and check they agree.
    Replay(ReplayArgs),
}

#[derive(Args, Debug)]
struct RunArgs {
    /// Items to generate (10000, 20000 or 50000).
    #[arg(long, value_parser = parse_size, default_value = "10000")]
    size: DataSize,
    /// Samples per operation and engine.
    #[arg(long, default_value_t = bench::DEFAULT_ITERATIONS)]
    iterations: usize,
    /// Pause between operations in milliseconds.
    #[arg(long, default_value_t = 10)]
    settle_ms: u64,
    /// Seed for generated items.
    #[arg(long)]
    seed: Option<u64>,
    /// Print results as JSON.
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug)]
struct ViewArgs {
    /// Items to generate (10000, 20000 or 50000).
    #[arg(long, value_parser = parse_size, default_value = "10000")]
    size: DataSize,
    /// Engine serving the dispatches.
    #[arg(long, value_enum, default_value_t = EngineArg::Native)]
    engine: EngineArg,
    /// Only show items with this tag.
    #[arg(long)]
    tag: Option<String>,
    /// Only show playable (true) or locked (false) items.
    #[arg(long)]
    playable: Option<bool>,
    /// Sort key.
    #[arg(long, value_enum)]
    sort: Option<SortArg>,
    /// Sort descending.
    #[arg(long)]
    desc: bool,
    /// Zero-based page to show.
    #[arg(long)]
    page: Option<usize>,
    /// Seed for generated items.
    #[arg(long)]
    seed: Option<u64>,
    /// Print the view as JSON.
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug)]
struct ReplayArgs {
    /// JSON array of actions, e.g. [{"type":"NEXT_PAGE"}].
    #[arg(value_name = "SCRIPT")]
    script: PathBuf,
    /// Items loaded before the script runs.
    #[arg(long, value_parser = parse_size, default_value = "10000")]
    size: DataSize,
    /// Seed for generated items.
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum EngineArg {
    /// In-process value reducer.
    Native,
    /// Store behind the sandbox boundary.
    Sandboxed,
}

impl From<EngineArg> for EngineKind {
    fn from(arg: EngineArg) -> Self {
        match arg {
            EngineArg::Native => EngineKind::Native,
            EngineArg::Sandboxed => EngineKind::Sandboxed,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum SortArg {
    /// By rating.
    Rating,
    /// By title.
    Title,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    match cli.command {
        Command::Run(args) => handle_run(args),
        Command::View(args) => handle_view(args),
        Command::Replay(args) => handle_replay(args),
    }
}

fn handle_run(args: RunArgs) -> Result<()> {
    let config = SessionConfig {
        bench: BenchConfig {
            iterations: args.iterations,
            settle_delay: Duration::from_millis(args.settle_ms),
            ..BenchConfig::default()
        },
        seed: args.seed,
        ..SessionConfig::default()
    };
    let mut session = Session::new(config);
    session.set_data_size(args.size);
    block_on(session.load_sandbox()).context("failed to load the sandboxed module")?;
    let report = session.load_data().context("failed to load data")?;

    match block_on(session.run_benchmark()).context("benchmark failed")? {
        BenchmarkOutcome::Completed(results) => {
            if args.json {
                println!("{}", serde_json::to_string_pretty(&results)?);
            } else {
                print!("{}", render::load(&report));
                print!("{}", render::comparison(&results));
            }
            Ok(())
        }
        BenchmarkOutcome::Refused(refusal) => bail!("benchmark refused: {}", refusal.reason()),
    }
}

fn handle_view(args: ViewArgs) -> Result<()> {
    let mut session = Session::new(SessionConfig {
        seed: args.seed,
        ..SessionConfig::default()
    });
    session.set_data_size(args.size);
    let kind = EngineKind::from(args.engine);
    if kind == EngineKind::Sandboxed {
        block_on(session.load_sandbox()).context("failed to load the sandboxed module")?;
    }
    session.set_reducer_type(kind);
    session.load_data().context("failed to load data")?;

    for action in view_actions(&args) {
        session
            .dispatch(&action)
            .with_context(|| format!("dispatch {} failed", action.name()))?;
    }

    let view = session.view()?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        print!("{}", render::presentation(&view));
    }
    Ok(())
}

fn view_actions(args: &ViewArgs) -> Vec<Action> {
    let mut actions = Vec::new();
    if let Some(tag) = &args.tag {
        actions.push(Action::FilterByTag(Some(tag.clone())));
    }
    if let Some(playable) = args.playable {
        actions.push(Action::FilterByPlayable(Some(playable)));
    }
    match args.sort {
        Some(SortArg::Rating) => actions.push(Action::SortByRating),
        Some(SortArg::Title) => actions.push(Action::SortByTitle),
        None => {}
    }
    if args.desc {
        actions.push(Action::ToggleSortOrder);
    }
    if let Some(page) = args.page {
        actions.push(Action::SetPage(page));
    }
    actions
}

fn handle_replay(args: ReplayArgs) -> Result<()> {
    let text = fs::read_to_string(&args.script)
        .with_context(|| format!("failed to read script {:?}", args.script))?;
    let actions: Vec<Action> = serde_json::from_str(&text)
        .with_context(|| format!("failed to parse script {:?}", args.script))?;

    let mut source = match args.seed {
        Some(seed) => RandomItems::seeded(seed),
        None => RandomItems::from_entropy(),
    };
    let items: Arc<[ItemRef]> = source
        .generate(args.size.count())
        .into_iter()
        .map(Arc::new)
        .collect();

    let module =
        block_on(SandboxLoader::new().load()).context("failed to load the sandboxed module")?;
    let mut engines: [Box<dyn ViewEngine>; 2] = [
        Box::new(NativeEngine::new(DEFAULT_ITEMS_PER_PAGE)),
        Box::new(SandboxReducer::with_module(module)),
    ];
    let load = Action::SetItems(items);
    for engine in engines.iter_mut() {
        engine.dispatch(&load)?;
    }
    info!("replaying {} actions over {} items", actions.len(), args.size.count());

    let mut diverged = None;
    for (index, action) in actions.iter().enumerate() {
        let [native, sandboxed] = &mut engines;
        let expected = native.dispatch(action)?;
        let actual = sandboxed.dispatch(action)?;
        let agree = expected == actual && native.page_items()? == sandboxed.page_items()?;
        print!("{}", render::step(index + 1, action.name(), &expected, agree));
        if !agree && diverged.is_none() {
            diverged = Some(index + 1);
        }
    }

    if let Some(step) = diverged {
        bail!("engines diverged at step {step}");
    }
    println!("engines agree on {} actions", actions.len());
    Ok(())
}

fn parse_size(input: &str) -> Result<DataSize, String> {
    let count = input
        .replace('_', "")
        .parse::<usize>()
        .map_err(|_| format!("invalid number '{input}'"))?;
    DataSize::from_count(count)
        .ok_or_else(|| format!("unsupported size {count}; choose 10000, 20000 or 50000"))
}
