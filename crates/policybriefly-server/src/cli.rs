//! Command-line parsing and the one-shot `analyze` / `sample` commands.

use std::path::PathBuf;

use policybriefly_analyze::{render, AnalysisOptions, ExportFormat, SummaryTier};
use policybriefly_core::Result;
use policybriefly_ingest::Document;

use crate::pipeline::Pipeline;

pub const USAGE: &str = "\
PolicyBriefly: plain-language briefings for policy documents

Usage: policybriefly [command]

Commands:
  (none) | serve                 Start the HTTP API
  analyze <file> [options]       Analyze a PDF or text file and print the report
  sample [options]               Analyze the bundled EPA sample rule
  help                           Show this help message

Options:
  --length short|medium|detailed Summary length (default medium)
  --no-bias                      Skip bias detection
  --no-impact                    Skip impact scoring
  --json                         Print JSON instead of the text report";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Serve,
    Analyze {
        path: PathBuf,
        options: AnalysisOptions,
        format: ExportFormat,
    },
    Sample {
        options: AnalysisOptions,
        format: ExportFormat,
    },
    Help,
}

/// Parse arguments, excluding the program name.
pub fn parse_args(args: &[String]) -> std::result::Result<Command, String> {
    let Some(first) = args.first() else {
        return Ok(Command::Serve);
    };

    match first.as_str() {
        "serve" => Ok(Command::Serve),
        "--help" | "-h" | "help" => Ok(Command::Help),
        "analyze" => {
            let mut rest = args[1..].iter();
            let mut path = None;
            let mut flags = Vec::new();
            while let Some(arg) = rest.next() {
                if arg == "--length" {
                    let value = rest.next().ok_or("--length needs a value")?;
                    flags.push(arg.clone());
                    flags.push(value.clone());
                } else if arg.starts_with("--") {
                    flags.push(arg.clone());
                } else if path.is_none() {
                    path = Some(PathBuf::from(arg));
                } else {
                    return Err(format!("Unexpected argument: {}", arg));
                }
            }
            let path = path.ok_or("Usage: policybriefly analyze <file> [options]")?;
            let (options, format) = parse_flags(&flags)?;
            Ok(Command::Analyze {
                path,
                options,
                format,
            })
        }
        "sample" => {
            let (options, format) = parse_flags(&args[1..])?;
            Ok(Command::Sample { options, format })
        }
        other => Err(format!(
            "Unknown command: {}. Use 'policybriefly help' for usage.",
            other
        )),
    }
}

fn parse_flags(flags: &[String]) -> std::result::Result<(AnalysisOptions, ExportFormat), String> {
    let mut options = AnalysisOptions::default();
    let mut format = ExportFormat::Text;
    let mut iter = flags.iter();
    while let Some(flag) = iter.next() {
        match flag.as_str() {
            "--length" => {
                let value = iter.next().ok_or("--length needs a value")?;
                options.length = SummaryTier::parse(value)
                    .ok_or_else(|| format!("Unknown summary length: {}", value))?;
            }
            "--no-bias" => options.include_bias = false,
            "--no-impact" => options.include_impact = false,
            "--json" => format = ExportFormat::Json,
            other => return Err(format!("Unknown option: {}", other)),
        }
    }
    Ok((options, format))
}

/// Analyze one document and render the report.
pub async fn analyze_document(
    pipeline: &Pipeline,
    document: &Document,
    options: &AnalysisOptions,
    format: ExportFormat,
) -> Result<String> {
    let result = pipeline.run(document, options).await;
    render(&result, format)
}
