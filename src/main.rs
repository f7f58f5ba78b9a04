use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use serde::Serialize;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use persona_survey::cli::{Cli, Commands, OutputFormat};
use persona_survey::commands::{self, FillResult};
use persona_survey::models::analytics::{QuestionStats, SurveyAnalytics, SurveyStats};
use persona_survey::{AppState, BatchReport, CommandResponse};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging(cli.verbose);
    let format = cli.output;

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            match format {
                OutputFormat::Text => eprintln!("error: {:#}", e),
                OutputFormat::Json => print_json(&CommandResponse::<()>::err(format!("{:#}", e))),
            }
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose {
        "persona_survey=debug,persona_survey_llm=debug"
    } else {
        "persona_survey=info,persona_survey_llm=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut state = AppState::load(cli.config.as_deref()).context("loading configuration")?;
    let format = cli.output;

    match cli.command {
        Commands::Init { force } => {
            let result = commands::init_config(&mut state, force)?;
            emit(format, &result, |r| {
                println!("Initialized persona-survey.");
                println!("Configuration: {}", r.config_path.display());
                println!("Personas:      {}", r.personas_dir.display());
                println!("Data:          {}", r.data_dir.display());
                println!("Templates:     {}", r.prompts_dir.display());
            });
        }
        Commands::Import { file } => {
            let survey = commands::import_survey(&state, &file)
                .await
                .with_context(|| format!("importing {}", file.display()))?;
            emit(format, &survey, |s| {
                println!("Imported survey {} ({} questions)", s.id, s.questions.len());
            });
        }
        Commands::List => {
            let surveys = commands::list_surveys(&state).await?;
            emit(format, &surveys, |list| {
                if list.is_empty() {
                    println!("No surveys.");
                }
                for stats in list {
                    print_stats_line(stats);
                }
            });
        }
        Commands::Fill { survey_id, persona } => {
            let result = commands::fill_survey(&state, &survey_id, persona.as_deref()).await?;
            emit(format, &result, |r| match r {
                FillResult::Batch(report) => print_batch(report),
                FillResult::Single(response) => {
                    println!("{}: response {}", response.respondent, response.id);
                }
            });
        }
        Commands::Analyze { survey_id } => {
            let analytics = commands::analyze_survey(&state, &survey_id).await?;
            emit(format, &analytics, print_analytics);
        }
        Commands::Export { survey_id, out } => {
            let path = commands::export_survey(&state, &survey_id, out.as_deref()).await?;
            emit(format, &path, |p| println!("Exported to {}", p.display()));
        }
        Commands::Stats { survey_id } => {
            let stats = commands::survey_stats(&state, &survey_id).await?;
            emit(format, &stats, print_stats_line);
        }
        Commands::Duplicate { survey_id, title } => {
            let copy = commands::duplicate_survey(&state, &survey_id, title.as_deref()).await?;
            emit(format, &copy, |s| println!("Created {} \"{}\"", s.id, s.title));
        }
        Commands::Delete { survey_id } => {
            commands::delete_survey(&state, &survey_id).await?;
            emit(format, &survey_id, |id| println!("Deleted {}", id));
        }
        Commands::Health => {
            let health = commands::check_health(&state).await?;
            emit(format, &health, |h| {
                println!("{} {} at {}: {}", h.backend, h.model, h.base_url, h.status);
                if let Some(error) = &h.error {
                    println!("  {}", error);
                }
            });
            if !health.reachable {
                anyhow::bail!("generation backend is unreachable");
            }
        }
    }

    Ok(())
}

fn emit<T: Serialize>(format: OutputFormat, value: &T, text: impl FnOnce(&T)) {
    match format {
        OutputFormat::Text => text(value),
        OutputFormat::Json => print_json(&CommandResponse::ok(value)),
    }
}

fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("error: cannot serialize output: {}", e),
    }
}

fn print_stats_line(stats: &SurveyStats) {
    println!(
        "{}  {}  questions={} responses={}/{} ({:.1}%)",
        stats.survey_id,
        stats.title,
        stats.question_count,
        stats.completed_responses,
        stats.total_responses,
        stats.completion_rate
    );
}

fn print_batch(report: &BatchReport) {
    for outcome in &report.outcomes {
        match (&outcome.error, outcome.response_id()) {
            (None, Some(id)) => println!(
                "ok      {}  response {} (fallbacks: {}, warnings: {})",
                outcome.persona,
                id,
                outcome.fallback_answers.len(),
                outcome.warnings.len()
            ),
            (Some(error), _) => println!("FAILED  {}  {}", outcome.persona, error),
            (None, None) => println!("FAILED  {}", outcome.persona),
        }
    }
    println!(
        "{} succeeded, {} failed",
        report.succeeded(),
        report.failed()
    );
}

fn print_analytics(analytics: &SurveyAnalytics) {
    println!("{} ({})", analytics.title, analytics.survey_id);
    println!(
        "responses: {} total, {} completed ({:.1}%)",
        analytics.summary.total_responses,
        analytics.summary.completed_responses,
        analytics.summary.completion_rate
    );

    for question in &analytics.questions {
        println!();
        println!("Q{}. {}", question.question_id, question.question_text);
        match &question.stats {
            QuestionStats::SingleChoice(stats) | QuestionStats::MultipleChoice(stats) => {
                for choice in &stats.choices {
                    println!("  {:<20} {:>4}  {:>5.1}%", choice.option, choice.count, choice.percentage);
                }
            }
            QuestionStats::Rating(stats) => {
                println!(
                    "  average {:.2}  min {}  max {}",
                    stats.average, stats.min, stats.max
                );
                for (value, count) in &stats.distribution {
                    println!("  {:>3}: {}", value, count);
                }
            }
            QuestionStats::Text(stats) => {
                println!("  average length {:.1}", stats.average_length);
                let words: Vec<String> = stats
                    .common_words
                    .iter()
                    .map(|w| format!("{} ({})", w.word, w.count))
                    .collect();
                if !words.is_empty() {
                    println!("  common words: {}", words.join(", "));
                }
            }
        }
    }
}
