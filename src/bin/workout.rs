//! Workout CLI - Command-line interface for Synheart Workout
//!
//! Commands:
//! - demo: Summarize the reference sensor packages
//! - summarize: Summarize sensor packages from a file or stdin
//! - validate: Check sensor packages without summarizing them
//! - schema: Describe the sensor package format

use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use synheart_workout::adapter::SensorPackageAdapter;
use synheart_workout::pipeline::{sample_packages, ErrorPolicy, WorkoutProcessor};
use synheart_workout::reporter::Reporter;
use synheart_workout::types::{SensorPackage, SummaryEnvelope, WorkoutSummary, WorkoutType};
use synheart_workout::{ComputeError, PRODUCER_NAME, WORKOUT_VERSION};

/// Workout - distance, speed and calories from raw sensor packages
#[derive(Parser)]
#[command(name = "workout")]
#[command(author = "Synheart AI Inc")]
#[command(version = WORKOUT_VERSION)]
#[command(about = "Summarize workouts from raw sensor packages", long_about = None)]
struct Cli {
    /// Log debug output to stderr (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Summarize the reference sensor packages
    Demo {
        /// Output format
        #[arg(long, default_value = "text")]
        output_format: OutputFormat,
    },

    /// Summarize sensor packages
    Summarize {
        /// Input file path (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Output file path (use - for stdout)
        #[arg(short, long, default_value = "-")]
        output: PathBuf,

        /// Input format
        #[arg(long, default_value = "ndjson")]
        input_format: InputFormat,

        /// Output format
        #[arg(long, default_value = "text")]
        output_format: OutputFormat,

        /// Skip packages that cannot be summarized instead of failing the batch
        #[arg(long)]
        skip_invalid: bool,

        /// Reject packages with non-positive duration, weight, height or pool length
        #[arg(long)]
        strict: bool,
    },

    /// Check sensor packages without summarizing them
    Validate {
        /// Input file path (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Input format
        #[arg(long, default_value = "ndjson")]
        input_format: InputFormat,

        /// Output validation report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Describe the sensor package format
    Schema {
        /// Output as JSON schema
        #[arg(long)]
        json_schema: bool,
    },
}

#[derive(Clone, ValueEnum)]
enum InputFormat {
    /// Newline-delimited JSON (one package per line)
    Ndjson,
    /// JSON array of packages
    Json,
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    /// One summary line per package
    Text,
    /// Newline-delimited JSON (one summary envelope per line)
    Ndjson,
    /// JSON array of summary envelopes
    Json,
    /// Pretty-printed JSON
    JsonPretty,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!(
                "{}",
                serde_json::to_string(&CliError::from(e)).unwrap_or_else(|_| "Unknown error".to_string())
            );
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<(), WorkoutCliError> {
    match cli.command {
        Commands::Demo { output_format } => cmd_demo(output_format),

        Commands::Summarize {
            input,
            output,
            input_format,
            output_format,
            skip_invalid,
            strict,
        } => cmd_summarize(
            &input,
            &output,
            input_format,
            output_format,
            skip_invalid,
            strict,
        ),

        Commands::Validate {
            input,
            input_format,
            json,
        } => cmd_validate(&input, input_format, json),

        Commands::Schema { json_schema } => {
            cmd_schema(json_schema);
            Ok(())
        }
    }
}

fn cmd_demo(output_format: OutputFormat) -> Result<(), WorkoutCliError> {
    let outcome = WorkoutProcessor::new().process(&sample_packages())?;
    print!("{}", format_output(&outcome.summaries, &output_format)?);
    Ok(())
}

fn cmd_summarize(
    input: &Path,
    output: &Path,
    input_format: InputFormat,
    output_format: OutputFormat,
    skip_invalid: bool,
    strict: bool,
) -> Result<(), WorkoutCliError> {
    let packages = read_packages(input, &input_format)?;

    if packages.is_empty() {
        return Err(WorkoutCliError::NoPackages);
    }

    let policy = if skip_invalid {
        ErrorPolicy::Skip
    } else {
        ErrorPolicy::Abort
    };
    let mut processor = WorkoutProcessor::new().with_policy(policy);
    if strict {
        processor = processor.with_validation();
    }

    tracing::debug!(policy = ?processor.policy(), strict, "summarizing packages");

    let outcome = processor.process(&packages)?;

    if !outcome.skipped.is_empty() {
        tracing::warn!(
            skipped = outcome.skipped.len(),
            total = packages.len(),
            "some packages were skipped"
        );
    }

    let output_data = format_output(&outcome.summaries, &output_format)?;

    if output.to_string_lossy() == "-" {
        print!("{}", output_data);
    } else {
        fs::write(output, output_data)?;
    }

    Ok(())
}

fn cmd_validate(input: &Path, input_format: InputFormat, json: bool) -> Result<(), WorkoutCliError> {
    let packages = read_packages(input, &input_format)?;
    let results = SensorPackageAdapter::validate_packages(&packages);

    let report = ValidationReport {
        total_packages: packages.len(),
        valid_packages: packages.len() - results.len(),
        invalid_packages: results.len(),
        errors: results
            .iter()
            .map(|r| ValidationErrorDetail {
                index: r.index,
                workout_type: r.workout_type.clone(),
                error: r.issue.to_string(),
            })
            .collect(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Validation Report");
        println!("=================");
        println!("Total packages:   {}", report.total_packages);
        println!("Valid packages:   {}", report.valid_packages);
        println!("Invalid packages: {}", report.invalid_packages);

        if !report.errors.is_empty() {
            println!("\nErrors:");
            for err in &report.errors {
                println!(
                    "  - Package {} (index {}): {}",
                    err.workout_type, err.index, err.error
                );
            }
        }
    }

    if report.invalid_packages > 0 {
        Err(WorkoutCliError::ValidationFailed(report.invalid_packages))
    } else {
        Ok(())
    }
}

fn cmd_schema(json_schema: bool) {
    if json_schema {
        println!("{}", get_input_json_schema());
        return;
    }

    println!("Sensor package format ({} {})", PRODUCER_NAME, WORKOUT_VERSION);
    println!();
    println!("Each package is an object {{\"workout_type\": TAG, \"data\": [...]}}");
    println!("or a pair [TAG, [...]]. Readings are positional:");
    println!();
    for workout_type in WorkoutType::ALL {
        println!(
            "  {}  {:<14} {}",
            workout_type.tag(),
            workout_type.name(),
            workout_type.reading_names().join(", ")
        );
    }
    println!();
    println!("Units: action (count), duration (h), weight (kg), height (cm),");
    println!("       length_pool (m), count_pool (laps)");
}

// Helper functions

fn read_packages(input: &Path, input_format: &InputFormat) -> Result<Vec<SensorPackage>, WorkoutCliError> {
    let input_data = if input.to_string_lossy() == "-" {
        if atty::is(atty::Stream::Stdin) {
            tracing::warn!("reading sensor packages from an interactive terminal; end input with Ctrl-D");
        }
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        fs::read_to_string(input)?
    };

    let packages = match input_format {
        InputFormat::Ndjson => SensorPackageAdapter::parse_ndjson(&input_data)?,
        InputFormat::Json => SensorPackageAdapter::parse_array(&input_data)?,
    };

    tracing::debug!(count = packages.len(), "read sensor packages");

    Ok(packages)
}

fn format_output(summaries: &[WorkoutSummary], format: &OutputFormat) -> Result<String, WorkoutCliError> {
    match format {
        OutputFormat::Text => Ok(summaries.iter().map(|s| s.message() + "\n").collect()),
        OutputFormat::Ndjson => {
            let mut lines: Vec<String> = Vec::new();
            for envelope in encode_envelopes(summaries) {
                lines.push(serde_json::to_string(&envelope)?);
            }
            Ok(lines.join("\n") + "\n")
        }
        OutputFormat::Json => Ok(serde_json::to_string(&encode_envelopes(summaries))? + "\n"),
        OutputFormat::JsonPretty => {
            Ok(serde_json::to_string_pretty(&encode_envelopes(summaries))? + "\n")
        }
    }
}

fn encode_envelopes(summaries: &[WorkoutSummary]) -> Vec<SummaryEnvelope> {
    let reporter = Reporter::new();
    summaries.iter().map(|s| reporter.encode(s)).collect()
}

fn get_input_json_schema() -> String {
    let tags: Vec<&str> = WorkoutType::ALL.iter().map(|t| t.tag()).collect();

    serde_json::json!({
        "$schema": "https://json-schema.org/draft/2020-12/schema",
        "$id": "https://synheart.ai/schemas/workout.sensor_package.v1.json",
        "title": "workout.sensor_package.v1",
        "description": "Synheart workout sensor package",
        "oneOf": [
            {
                "type": "object",
                "required": ["workout_type", "data"],
                "properties": {
                    "workout_type": { "type": "string", "enum": tags },
                    "data": { "type": "array", "items": { "type": "number" }, "minItems": 3, "maxItems": 5 }
                }
            },
            {
                "type": "array",
                "prefixItems": [
                    { "type": "string", "enum": tags },
                    { "type": "array", "items": { "type": "number" }, "minItems": 3, "maxItems": 5 }
                ],
                "minItems": 2,
                "maxItems": 2
            }
        ]
    })
    .to_string()
}

// Error types

#[derive(Debug)]
enum WorkoutCliError {
    Io(io::Error),
    Compute(ComputeError),
    Json(serde_json::Error),
    NoPackages,
    ValidationFailed(usize),
}

impl From<io::Error> for WorkoutCliError {
    fn from(e: io::Error) -> Self {
        WorkoutCliError::Io(e)
    }
}

impl From<ComputeError> for WorkoutCliError {
    fn from(e: ComputeError) -> Self {
        WorkoutCliError::Compute(e)
    }
}

impl From<serde_json::Error> for WorkoutCliError {
    fn from(e: serde_json::Error) -> Self {
        WorkoutCliError::Json(e)
    }
}

#[derive(serde::Serialize)]
struct CliError {
    code: String,
    message: String,
    hint: Option<String>,
}

impl From<WorkoutCliError> for CliError {
    fn from(e: WorkoutCliError) -> Self {
        match e {
            WorkoutCliError::Io(e) => CliError {
                code: "IO_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check file paths and permissions".to_string()),
            },
            WorkoutCliError::Compute(e) => {
                let (code, hint) = match &e {
                    ComputeError::UnknownWorkoutType(_) => {
                        ("UNKNOWN_WORKOUT_TYPE", "Supported tags are SWM, RUN and WLK")
                    }
                    ComputeError::ArityMismatch { .. } => (
                        "ARITY_MISMATCH",
                        "Run 'workout schema' for the readings each tag expects",
                    ),
                    ComputeError::InvalidPackage { .. } => (
                        "INVALID_PACKAGE",
                        "Run 'workout validate' for details, or drop --strict",
                    ),
                    _ => ("PARSE_ERROR", "Ensure input matches the sensor package format"),
                };
                CliError {
                    code: code.to_string(),
                    message: e.to_string(),
                    hint: Some(hint.to_string()),
                }
            }
            WorkoutCliError::Json(e) => CliError {
                code: "JSON_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check JSON syntax".to_string()),
            },
            WorkoutCliError::NoPackages => CliError {
                code: "NO_PACKAGES".to_string(),
                message: "No sensor packages found in input".to_string(),
                hint: Some("Ensure input file is not empty".to_string()),
            },
            WorkoutCliError::ValidationFailed(count) => CliError {
                code: "VALIDATION_FAILED".to_string(),
                message: format!("{} packages failed validation", count),
                hint: Some("Fix validation errors and retry".to_string()),
            },
        }
    }
}

// Report types

#[derive(serde::Serialize)]
struct ValidationReport {
    total_packages: usize,
    valid_packages: usize,
    invalid_packages: usize,
    errors: Vec<ValidationErrorDetail>,
}

#[derive(serde::Serialize)]
struct ValidationErrorDetail {
    index: usize,
    workout_type: String,
    error: String,
}
