use crate::render;
use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand};
use hr_attrition::config::AppConfig;
use hr_attrition::error::AppError;
use hr_attrition::telemetry;
use hr_attrition::workflows::attrition::{
    cleaning, AttritionPipeline, DatasetImporter, PipelineOutput,
};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "hr-attrition",
    about = "Clean HR exports, score attrition risk, and report retention insights",
    version
)]
struct Cli {
    #[command(flatten)]
    paths: PathArgs,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the full analysis and print the attrition report (default command)
    Analyze(AnalyzeArgs),
    /// Clean and merge the datasets, then write processed files to the output directory
    Preprocess(PreprocessArgs),
    /// Print the data quality report as JSON
    Quality,
}

#[derive(Args, Debug, Default)]
struct PathArgs {
    /// Directory holding employee_data.csv, performance_data.csv and exit_survey_data.csv
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
    /// Directory that receives processed CSV and JSON files
    #[arg(long, global = true)]
    output_dir: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
struct AnalyzeArgs {
    /// Print the report as JSON instead of text
    #[arg(long)]
    json: bool,
    /// Number of high-risk employees to list
    #[arg(long)]
    top: Option<usize>,
    /// Reporting date (YYYY-MM-DD), defaults to today
    #[arg(long, value_parser = parse_date)]
    today: Option<NaiveDate>,
}

#[derive(Args, Debug, Default)]
struct PreprocessArgs {
    /// Reporting date (YYYY-MM-DD), defaults to today
    #[arg(long, value_parser = parse_date)]
    today: Option<NaiveDate>,
}

pub(crate) fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let mut config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    if let Some(data_dir) = cli.paths.data_dir {
        config.data.data_dir = data_dir;
    }
    if let Some(output_dir) = cli.paths.output_dir {
        config.data.output_dir = output_dir;
    }

    info!(
        environment = ?config.environment,
        data_dir = %config.data.data_dir.display(),
        "starting attrition analysis"
    );

    let command = cli
        .command
        .unwrap_or_else(|| Command::Analyze(AnalyzeArgs::default()));

    match command {
        Command::Analyze(args) => run_analyze(config, args),
        Command::Preprocess(args) => run_preprocess(config, args),
        Command::Quality => run_quality(config),
    }
}

fn run_analyze(mut config: AppConfig, args: AnalyzeArgs) -> Result<(), AppError> {
    if let Some(top) = args.top {
        config.analysis.top_risk_listing = top;
    }

    let output = run_pipeline(&config, args.today)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&output.report)?);
    } else {
        render::attrition_report(&output.report);
    }

    Ok(())
}

fn run_preprocess(config: AppConfig, args: PreprocessArgs) -> Result<(), AppError> {
    let output = run_pipeline(&config, args.today)?;
    let files = output.export(&config.data.output_dir)?;

    render::dataset_summary(&output.dataset_summary);
    render::quality_report(output.quality());
    render::exported_files(&files);

    Ok(())
}

fn run_quality(config: AppConfig) -> Result<(), AppError> {
    let raw = DatasetImporter::from_config(&config.data)?;
    let cleaned = cleaning::clean_dataset(&raw)?;
    println!("{}", serde_json::to_string_pretty(&cleaned.quality)?);
    Ok(())
}

fn run_pipeline(config: &AppConfig, today: Option<NaiveDate>) -> Result<PipelineOutput, AppError> {
    let today = today.unwrap_or_else(|| Local::now().date_naive());
    let raw = DatasetImporter::from_config(&config.data)?;
    let output = AttritionPipeline::new(config.analysis.clone()).run(&raw, today)?;
    Ok(output)
}

fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}
