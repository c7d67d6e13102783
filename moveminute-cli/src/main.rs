mod render;

use anyhow::{Result, bail};
use chrono::{Duration, Local, NaiveDate};
use clap::{Parser, Subcommand};
use moveminute_core::{
    ActivityEntry, Config, CsvStore, NewEntry, OTHER_SENTINEL, Store, activity_options,
    metrics::{recent_minutes, running_distance_30d},
};
use render::{ColorMode, RenderOptions, Renderer};
use std::io::{self, IsTerminal};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Accepted `--date` layouts, tried in order after the keywords.
const INPUT_DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y"];

/// mvm — single-user exercise log over a flat CSV file
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Prints the log file location
    #[arg(long, short)]
    path: bool,
    /// Control ANSI colors in output.
    /// By default, colors are disabled when output is redirected (e.g with `>` or `|`).
    #[arg(long, value_enum, env = "MVM_COLOR", default_value_t = ColorMode::Auto)]
    color: ColorMode,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Log a new activity
    Log {
        /// Occurrence date: today, yesterday, YYYY-MM-DD or DD/MM/YYYY
        #[arg(long, short, default_value = "today")]
        date: String,
        /// Activity name, one of the suggestions (see `mvm activities`)
        /// or "Other" together with --label
        #[arg(long, short)]
        activity: String,
        /// Your own activity name, required with `--activity Other`
        #[arg(long, short)]
        label: Option<String>,
        /// Duration in minutes
        #[arg(long, default_value_t = 30)]
        duration: u32,
        /// Distance in miles
        #[arg(long)]
        distance: Option<f64>,
        /// Free-text notes
        #[arg(long, short, default_value = "")]
        notes: String,
    },
    /// Show summary metrics and all entries, newest first
    Dashboard,
    /// List the current activity suggestions
    Activities,
    /// What this tool is
    About,
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("mvm: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();
}

fn run() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    let config = Config::load()?;
    let store = CsvStore::new(&config);

    let use_color = match cli.color {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => {
            if std::env::var_os("NO_COLOR").is_some() {
                false
            } else {
                io::stdout().is_terminal()
            }
        }
    };
    let renderer = Renderer::new(Some(RenderOptions {
        date_format: config.date_format.clone(),
        use_color,
    }));

    if cli.path {
        renderer.print_info(&format!("{}", store.path().display()));
        return Ok(());
    }

    match cli.command {
        Some(Command::Log {
            date,
            activity,
            label,
            duration,
            distance,
            notes,
        }) => log_activity(&config, &store, &renderer, LogArgs {
            date,
            activity,
            label,
            duration,
            distance,
            notes,
        }),
        Some(Command::Dashboard) | None => dashboard(&store, &renderer),
        Some(Command::Activities) => list_activities(&config, &store, &renderer),
        Some(Command::About) => {
            renderer.print_md(ABOUT);
            Ok(())
        }
    }
}

struct LogArgs {
    date: String,
    activity: String,
    label: Option<String>,
    duration: u32,
    distance: Option<f64>,
    notes: String,
}

fn log_activity(config: &Config, store: &CsvStore, renderer: &Renderer, args: LogArgs) -> Result<()> {
    let date = parse_date_arg(&args.date, Local::now().date_naive())?;

    if args.activity != OTHER_SENTINEL {
        let options = activity_options(&config.activities, &store.load_all()?);
        if !options.contains(&args.activity) {
            bail!(
                "unknown activity '{}'; pick one of the suggestions (see `mvm activities`) \
                 or use --activity Other --label '{}'",
                args.activity,
                args.activity
            );
        }
    }

    let saved = store.append(&NewEntry {
        date,
        choice: args.activity,
        custom_label: args.label,
        duration_min: args.duration,
        distance_miles: args.distance,
        notes: args.notes,
    })?;

    renderer.print_info(&format!("Entry saved for {}!", saved.activity));
    renderer.print_entries_table(std::slice::from_ref(&saved));
    Ok(())
}

fn dashboard(store: &CsvStore, renderer: &Renderer) -> Result<()> {
    let mut entries = store.load_all()?;
    if entries.is_empty() {
        renderer.print_info("No data yet. Log some activities!");
        return Ok(());
    }

    let today = Local::now().date_naive();
    renderer.print_md("# Activity Dashboard");
    renderer.print_metrics(
        recent_minutes(&entries, today),
        running_distance_30d(&entries, today),
    );

    sort_for_display(&mut entries);
    renderer.print_entries_table(&entries);
    Ok(())
}

/// Newest first, rows without a parseable date at the bottom. Display order
/// only; the file keeps insertion order.
fn sort_for_display(entries: &mut [ActivityEntry]) {
    entries.sort_by(|a, b| b.day().cmp(&a.day()));
}

fn list_activities(config: &Config, store: &CsvStore, renderer: &Renderer) -> Result<()> {
    let options = activity_options(&config.activities, &store.load_all()?);
    let mut md = String::from("# Activities\n");
    for option in options {
        md.push_str(&format!("* {option}\n"));
    }
    renderer.print_md(&md);
    Ok(())
}

fn parse_date_arg(s: &str, today: NaiveDate) -> Result<NaiveDate> {
    let s = s.trim();
    match s.to_lowercase().as_str() {
        "today" => return Ok(today),
        "yesterday" => return Ok(today - Duration::days(1)),
        _ => {}
    }
    for format in INPUT_DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(s, format) {
            return Ok(date);
        }
    }
    bail!("'{s}' is not a date; use today, yesterday, YYYY-MM-DD or DD/MM/YYYY")
}

const ABOUT: &str = "# About\n\
    Log different types of physical activities and track your progress \
    over time. Entries live in a single CSV file (`mvm --path` shows \
    where); `mvm dashboard` sums up the last week and month.\n";
