use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use late_grader::config::{self, GraderContext, DEFAULT_ROOT, DEFAULT_TIMEZONE};
use late_grader::{GradeError, Grader};
use tracing::info;
use tracing_subscriber::EnvFilter;

const EXIT_SUCCESS: i32 = 0;
// Anything that is not a GradeError, e.g. a failure to print
const EXIT_FAILURE: i32 = 1;

#[derive(Subcommand, Debug)]
enum Commands {
    /// Apply the submission cap and late penalty to results.json (default if no subcommand)
    Grade,
    /// Check config.json against config.schema.json without grading
    Validate,
}

#[derive(Parser, Debug)]
#[command(name = "late-grader")]
#[command(about = "Applies submission caps and late penalties to autograder results", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Autograder root holding source/, results/ and submission_metadata.json
    #[arg(long, global = true, default_value = DEFAULT_ROOT)]
    root: String,

    /// IANA time zone used for dates shown to students
    #[arg(long, global = true, default_value = DEFAULT_TIMEZONE)]
    timezone: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let command = cli.command.unwrap_or(Commands::Grade);
    let ctx = GraderContext::new(&cli.root, &cli.timezone)?;
    info!(root = %ctx.root().display(), timezone = ctx.timezone().name(), "starting");

    match command {
        Commands::Grade => {
            let grader = Grader::load(ctx).context("Failed to load grading inputs")?;
            let report = grader.grade().context("Failed to grade submission")?;

            let use_colors = late_grader::output::should_use_colors();
            println!("{}", late_grader::output::format_summary(&report, use_colors));
        }
        Commands::Validate => {
            let config = config::load_config(&ctx).context("Invalid grading config")?;
            let cap = config
                .max_submissions
                .filter(|&cap| cap > 0)
                .map_or_else(|| "unlimited".to_string(), |cap| cap.to_string());

            println!("{} is valid", ctx.config_path().display());
            println!("  max_submissions: {}", cap);
            println!("  max_late_days:   {}", config.max_late_days);
            println!("  no_penalty_days: {}", config.no_penalty_days);
            println!("  penalty:         {}", config.penalty);
            println!("  extensions:      {}", config.extensions.len());
        }
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        let code = e
            .downcast_ref::<GradeError>()
            .map_or(EXIT_FAILURE, GradeError::exit_code);
        std::process::exit(code);
    }

    std::process::exit(EXIT_SUCCESS);
}
