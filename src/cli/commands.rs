use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use serde_json::{json, Value};

use crate::cli::abbrev;
use crate::cli::error::{user_error, validate_input_path, validate_tier};
use crate::cli::output::{
    format_case_table, format_dashboard, format_date, format_stage_detail, format_stage_table,
    get_terminal_width, is_tty, TableOptions,
};
use crate::config::Config;
use crate::deadline::select_most_urgent;
use crate::load::{load_cases, load_stages, read_source};
use crate::models::{Case, LabelLanguage, UrgencyClassification, WorkflowStage};
use crate::report::{filter_by_tier, rank_stages, summarize_cases, CaseSummary, TierCounts};
use crate::utils::{local_today, parse_date_expr};

#[derive(Parser)]
#[command(name = "prazo")]
#[command(about = "Deadline prioritizer for case workflow stages")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Arguments shared by every command that reads backend records
#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// JSON file exported from the backend ("-" for stdin; defaults to data.location)
    pub file: Option<String>,
    /// Reference date (YYYY-MM-DD, today, tomorrow, yesterday, +Nd, -Nd)
    #[arg(long)]
    pub today: Option<String>,
    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List stages ranked by urgency
    Stages {
        #[command(flatten)]
        input: InputArgs,
        /// Hide completed stages
        #[arg(long)]
        active: bool,
    },
    /// Show the single most urgent stage of a stage list
    Urgent {
        #[command(flatten)]
        input: InputArgs,
    },
    /// Summarize cases by their most urgent stage
    Cases {
        #[command(flatten)]
        input: InputArgs,
        /// Only show cases in this tier (overdue, due-soon, normal, complete)
        #[arg(long)]
        tier: Option<String>,
    },
    /// Show dashboard with case counts per urgency tier
    Status {
        #[command(flatten)]
        input: InputArgs,
        /// Number of most urgent cases to list
        #[arg(long, default_value_t = 3)]
        top: usize,
    },
}

/// Resolved settings for one invocation
///
/// `today` is sampled once here and threaded through every computation.
struct RunContext {
    today: NaiveDate,
    language: LabelLanguage,
    table: TableOptions,
    source: PathBuf,
    json: bool,
}

impl RunContext {
    fn resolve(input: &InputArgs) -> Result<Self> {
        let config = Config::load()?;

        let now = local_today();
        let today = match &input.today {
            Some(expr) => match parse_date_expr(expr, now) {
                Ok(date) => date,
                Err(e) => user_error(&e.to_string()),
            },
            None => now,
        };
        log::debug!("Reference date: {}", today);

        let source = match &input.file {
            Some(file) => {
                if let Err(e) = validate_input_path(file) {
                    user_error(&e);
                }
                PathBuf::from(file)
            }
            None => match config.data_location.clone() {
                Some(path) => path,
                None => user_error(
                    "No input file given and no data.location set in ~/.prazo/rc",
                ),
            },
        };
        log::debug!("Reading records from {}", source.display());

        Ok(RunContext {
            today,
            language: config.labels,
            table: TableOptions {
                color: config.color.enabled(is_tty()),
                max_width: get_terminal_width(),
            },
            source,
            json: input.json,
        })
    }

    fn read_stages(&self) -> Result<Vec<WorkflowStage>> {
        let content = read_source(&self.source)?;
        Ok(load_stages(&content)?)
    }

    fn read_cases(&self) -> Result<Vec<Case>> {
        let content = read_source(&self.source)?;
        Ok(load_cases(&content)?)
    }
}

pub fn run() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let args = match abbrev::expand_command_abbreviations(args) {
        Ok(expanded) => expanded,
        Err(e) => user_error(&e),
    };

    let clap_args = std::iter::once("prazo".to_string())
        .chain(args)
        .collect::<Vec<_>>();
    let cli = match Cli::try_parse_from(clap_args) {
        Ok(cli) => cli,
        Err(e) => {
            // Help and version go to stdout and are not failures
            e.print().context("Failed to print usage")?;
            if e.use_stderr() {
                std::process::exit(1);
            }
            return Ok(());
        }
    };

    handle_command(cli)
}

fn handle_command(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Stages { input, active } => handle_stages(&input, active),
        Commands::Urgent { input } => handle_urgent(&input),
        Commands::Cases { input, tier } => handle_cases(&input, tier),
        Commands::Status { input, top } => handle_status(&input, top),
    }
}

fn handle_stages(input: &InputArgs, active_only: bool) -> Result<()> {
    let ctx = RunContext::resolve(input)?;
    let stages = ctx.read_stages()?;

    let mut ranked = rank_stages(&stages, ctx.today, ctx.language);
    if active_only {
        ranked.retain(|r| r.stage.is_active());
    }

    if ctx.json {
        let rows: Vec<Value> = ranked
            .iter()
            .map(|r| stage_json(r.stage, &r.urgency))
            .collect();
        println!("{}", serde_json::to_string_pretty(&rows)?);
    } else {
        print!("{}", format_stage_table(&ranked, ctx.table));
    }
    Ok(())
}

fn handle_urgent(input: &InputArgs) -> Result<()> {
    let ctx = RunContext::resolve(input)?;
    let stages = ctx.read_stages()?;

    let chosen = select_most_urgent(&stages, ctx.today)
        .map(|stage| (stage, stage.classify(ctx.today, ctx.language)));

    if ctx.json {
        let value = chosen
            .as_ref()
            .map(|(stage, urgency)| stage_json(stage, urgency))
            .unwrap_or(Value::Null);
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        match &chosen {
            Some((stage, urgency)) => print!("{}", format_stage_detail(stage, urgency, ctx.table)),
            None => println!("No stages."),
        }
    }
    Ok(())
}

fn handle_cases(input: &InputArgs, tier: Option<String>) -> Result<()> {
    let tier = match tier.as_deref().map(validate_tier) {
        Some(Ok(tier)) => Some(tier),
        Some(Err(e)) => user_error(&e),
        None => None,
    };

    let ctx = RunContext::resolve(input)?;
    let cases = ctx.read_cases()?;

    let mut summaries = summarize_cases(&cases, ctx.today, ctx.language);
    if let Some(tier) = tier {
        summaries = filter_by_tier(summaries, tier);
    }

    if ctx.json {
        let rows: Vec<Value> = summaries.iter().map(case_json).collect();
        println!("{}", serde_json::to_string_pretty(&rows)?);
    } else {
        print!("{}", format_case_table(&summaries, ctx.table));
    }
    Ok(())
}

fn handle_status(input: &InputArgs, top: usize) -> Result<()> {
    let ctx = RunContext::resolve(input)?;
    let cases = ctx.read_cases()?;

    let summaries = summarize_cases(&cases, ctx.today, ctx.language);
    let counts = TierCounts::tally(&summaries);
    let top_cases = &summaries[..top.min(summaries.len())];

    if ctx.json {
        let most_urgent: Vec<Value> = top_cases.iter().map(case_json).collect();
        let value = json!({
            "today": ctx.today.format("%Y-%m-%d").to_string(),
            "counts": counts,
            "most_urgent": most_urgent,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        print!("{}", format_dashboard(&counts, top_cases, ctx.table));
    }
    Ok(())
}

fn stage_json(stage: &WorkflowStage, urgency: &UrgencyClassification) -> Value {
    json!({
        "id": stage.id,
        "status": stage.status,
        "unit": stage.unit,
        "deadline": format_date(stage.deadline),
        "extended_deadline": stage.extended_deadline.map(format_date),
        "days_remaining": urgency.days_remaining,
        "tier": urgency.tier,
        "label": urgency.label,
    })
}

fn case_json(summary: &CaseSummary) -> Value {
    let stage = match (summary.stage, &summary.urgency) {
        (Some(stage), Some(urgency)) => stage_json(stage, urgency),
        _ => Value::Null,
    };
    json!({
        "id": summary.case.id,
        "number": summary.case.number,
        "subject": summary.case.subject,
        "stage": stage,
    })
}
