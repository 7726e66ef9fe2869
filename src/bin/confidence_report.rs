use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use clap::{Parser, ValueEnum};
use logprob_confidence::{
    summarize, AnalysisInput, AnalysisResult, AnalyzerConfig, ConfidenceAnalyzerBuilder,
    ConfidenceReport, ErrorResult, Granularity,
};
use serde::Serialize;

#[path = "confidence_report/json_report_formatter.rs"]
mod json_report_formatter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum InputFormat {
    /// A chat-completion response body requested with `logprobs: true`.
    Completion,
    /// `{ "text"?: ..., "tokens": [{ "text", "logprob" }] }`.
    Tokens,
}

impl InputFormat {
    fn as_str(self) -> &'static str {
        match self {
            Self::Completion => "completion",
            Self::Tokens => "tokens",
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "confidence_report")]
#[command(about = "Map per-token logprobs of a model response onto confidence segments")]
struct Args {
    /// Response JSON to analyze.
    input: PathBuf,
    #[arg(
        long,
        env = "CONFIDENCE_REPORT_INPUT_FORMAT",
        value_enum,
        default_value_t = InputFormat::Completion
    )]
    input_format: InputFormat,
    /// token, word or sentence; anything else means sentence.
    #[arg(long, env = "CONFIDENCE_REPORT_GRANULARITY")]
    granularity: Option<String>,
    #[arg(long, env = "CONFIDENCE_REPORT_CONFIG")]
    config: Option<PathBuf>,
    /// Defaults to stdout.
    #[arg(long, env = "CONFIDENCE_REPORT_OUT")]
    out: Option<PathBuf>,
    #[arg(long, env = "CONFIDENCE_REPORT_SUMMARY", default_value_t = false)]
    summary: bool,
}

#[derive(Debug, Serialize)]
struct Meta {
    generated_at: String,
    input_path: String,
    input_format: &'static str,
    token_count: usize,
}

#[derive(Debug, Serialize)]
struct Report {
    meta: Meta,
    result: AnalysisResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<ConfidenceReport>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let out = args.out.clone();
    if let Err(message) = run(args) {
        tracing::error!(error = %message, "confidence_report: failed");
        let error = ErrorResult { error: message };
        if let Err(write_err) = json_report_formatter::write_report(out.as_deref(), &error) {
            tracing::warn!(error = %write_err, "confidence_report: error report not written");
        }
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), String> {
    let mut config = match args.config.as_deref() {
        Some(path) => AnalyzerConfig::load(path).map_err(|err| err.to_string())?,
        None => AnalyzerConfig::default(),
    };
    if let Some(granularity) = args.granularity.as_deref() {
        config.granularity = Granularity::from(granularity);
    }

    let input = load_input(&args.input, args.input_format)?;
    tracing::info!(
        input = %args.input.display(),
        token_count = input.tokens.len(),
        granularity = config.granularity.as_str(),
        "confidence_report: input loaded"
    );

    let analyzer = ConfidenceAnalyzerBuilder::new(config).build();
    let result = analyzer.analyze(&input).map_err(|err| err.to_string())?;
    let summary = args
        .summary
        .then(|| summarize(&result, analyzer.config()));

    let report = Report {
        meta: Meta {
            generated_at: Utc::now().to_rfc3339(),
            input_path: args.input.to_string_lossy().into_owned(),
            input_format: args.input_format.as_str(),
            token_count: input.tokens.len(),
        },
        result,
        summary,
    };
    json_report_formatter::write_report(args.out.as_deref(), &report)?;
    if let Some(path) = args.out.as_deref() {
        tracing::info!(
            out = %path.display(),
            segment_count = report.result.segment_count(),
            "confidence_report: report written"
        );
    }
    Ok(())
}

fn load_input(path: &Path, format: InputFormat) -> Result<AnalysisInput, String> {
    let data = fs::read_to_string(path)
        .map_err(|err| format!("Failed to read input '{}': {err}", path.display()))?;
    let input = match format {
        InputFormat::Completion => AnalysisInput::from_chat_completion_json(&data),
        InputFormat::Tokens => AnalysisInput::from_json(&data),
    };
    input.map_err(|err| err.to_string())
}
