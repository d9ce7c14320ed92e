//! pdfpages - Split PDF pages into files and merge them back.

mod cli;

use clap::{CommandFactory, Parser};
use serde::Serialize;
use std::process;

use crate::cli::Cli;
use pdfpages::config::Config;
use pdfpages::error::PdfPagesError;
use pdfpages::extract::{ExtractionPlan, ExtractionReport, Extractor, PdfiumRenderer};
use pdfpages::merge::{MergePlan, MergeReport, Merger};
use pdfpages::output::{
    OutputFormatter, display_extraction_plan, display_extraction_report, display_merge_plan,
    display_merge_report, display_source_info,
};
use pdfpages::validation::Validator;

/// Everything a run produced, printed with `--json`.
#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
struct RunSummary {
    dry_run: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    extraction: Option<ExtractionReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    extraction_plan: Option<ExtractionPlan>,
    #[serde(skip_serializing_if = "Option::is_none")]
    merge: Option<MergeReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    merge_plan: Option<MergePlan>,
}

fn main() {
    process::exit(exit_code(Cli::parse()));
}

/// Run the CLI and map the outcome to a process exit code.
///
/// Help printed because nothing was requested counts as a failure.
fn exit_code(cli: Cli) -> i32 {
    if !cli.has_work() {
        Cli::command().print_help().ok();
        println!();
        return 1;
    }

    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("Error: {err}");
            1
        }
    }
}

/// Route `log` records to stderr; `RUST_LOG` overrides the default filter.
fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "warn,pdfpages=debug,pdfpages_cli=debug"
    } else {
        "warn"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .try_init()
        .ok();
}

/// Main application logic.
fn run(cli: Cli) -> Result<(), PdfPagesError> {
    let config = cli.to_config()?;
    log::debug!("{config:?}");

    let formatter = if config.json {
        OutputFormatter::quiet()
    } else {
        OutputFormatter::from_config(&config)
    };

    if formatter.is_verbose() {
        formatter.section(&format!("{} v{}", pdfpages::NAME, pdfpages::VERSION));
        formatter.blank_line();
    }

    let validator = Validator::new();
    validator.validate_config(&config)?;

    let summary = if config.dry_run {
        dry_run(&config, &validator, &formatter)?
    } else {
        execute(&config, &validator, &formatter)?
    };

    if config.json {
        let json = serde_json::to_string_pretty(&summary)
            .map_err(|e| PdfPagesError::other(format!("Failed to serialize report: {e}")))?;
        println!("{json}");
    }

    Ok(())
}

/// Run the requested pipelines, extraction first.
fn execute(
    config: &Config,
    validator: &Validator,
    formatter: &OutputFormatter,
) -> Result<RunSummary, PdfPagesError> {
    let mut summary = RunSummary::default();

    if let Some(request) = config.extraction_request() {
        if formatter.is_verbose() {
            display_source_info(formatter, &validator.inspect_source(&request.source)?);
        }

        formatter.info(&format!(
            "Extracting pages {} of {}...",
            request.range,
            request.source.display()
        ));
        let report = extractor(config).extract(&request, &config.output_root)?;
        display_extraction_report(formatter, &report);
        summary.extraction = Some(report);
    }

    if let Some(request) = config.merge_request() {
        formatter.info(&format!("Merging {}...", request.folder.display()));
        let report = Merger::new().merge(&request)?;
        display_merge_report(formatter, &report);
        summary.merge = Some(report);
    }

    Ok(summary)
}

/// Print what [`execute`] would do.
fn dry_run(
    config: &Config,
    validator: &Validator,
    formatter: &OutputFormatter,
) -> Result<RunSummary, PdfPagesError> {
    let mut summary = RunSummary {
        dry_run: true,
        ..RunSummary::default()
    };

    if let Some(request) = config.extraction_request() {
        if formatter.is_verbose() {
            display_source_info(formatter, &validator.inspect_source(&request.source)?);
        }
        let plan = extractor(config).plan(&request, &config.output_root)?;
        display_extraction_plan(formatter, &plan);
        summary.extraction_plan = Some(plan);
    }

    if let Some(request) = config.merge_request() {
        match Merger::new().plan(&request) {
            Ok(plan) => {
                display_merge_plan(formatter, &plan);
                summary.merge_plan = Some(plan);
            }
            // Extraction would populate the folder before the merge runs.
            Err(PdfPagesError::NoFilesToMerge { .. } | PdfPagesError::FolderNotFound { .. })
                if summary.extraction_plan.is_some() =>
            {
                formatter.info(&format!(
                    "Would merge the files extracted into {}",
                    request.folder.display()
                ));
            }
            Err(err) => return Err(err),
        }
    }

    formatter.blank_line();
    formatter.success("Dry run completed successfully");
    formatter.info("  Run without --dry-run to write the files");
    Ok(summary)
}

fn extractor(config: &Config) -> Extractor<PdfiumRenderer> {
    let renderer = match &config.pdfium_lib {
        Some(dir) => PdfiumRenderer::with_library_dir(dir),
        None => PdfiumRenderer::new(),
    };
    Extractor::with_renderer(renderer)
}
