//! The end-to-end workflow command: upload, infer, preview, apply.

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use colored::Colorize;

use datamend_core::file::LocalFile;
use datamend_core::format::{format_relative_time, group_thousands, modification_summary};
use datamend_core::modification::{CONFIDENCE_THRESHOLD, is_confidence_acceptable};
use datamend_core::workflow::{ModificationService, WorkflowController};

use crate::render;

pub async fn run(
    service: Arc<dyn ModificationService>,
    path: &Path,
    instruction: &str,
    apply: bool,
) -> Result<()> {
    let candidate = LocalFile::from_path(path)?;
    let controller = WorkflowController::new(service);

    controller.submit_upload(&candidate).await;
    let state = controller.state().await;
    if state.has_error() {
        eprintln!("{}", state.error.red());
        std::process::exit(1);
    }
    if let Some(file) = &state.file {
        println!("{} {}", "Uploaded".green(), render::file_summary(file));
    }

    controller.request_modification(instruction).await;
    let state = controller.state().await;
    if state.has_error() {
        eprintln!("{}", state.error.red());
        std::process::exit(1);
    }
    let Some(proposal) = &state.proposal else {
        eprintln!("{}", "No proposal was generated".red());
        std::process::exit(1);
    };

    let modification = &proposal.modification;
    println!();
    println!("{}", "Proposed modification".bold());
    println!("  column:      {}", modification.column_name);
    println!("  description: {}", modification.description);
    println!(
        "  pattern:     {} -> {}",
        modification.regex_pattern, modification.replacement
    );
    println!(
        "  confidence:  {}",
        render::confidence_text(modification.confidence)
    );

    let stats = &proposal.preview.stats;
    if let Some(problem) = &stats.error {
        // Domain errors arrive inside a successful response; render them
        println!("  {} {}", "warning:".yellow(), problem.yellow());
    }

    println!();
    println!("{}", "Preview".bold());
    render::print_table(&proposal.preview.columns, &proposal.preview.data);
    let summary = modification_summary(stats);
    println!(
        "  {} of {} rows would change ({})",
        summary.modified_rows, summary.total_rows, summary.change_rate
    );

    if !is_confidence_acceptable(modification.confidence) {
        println!();
        println!(
            "{}",
            format!(
                "Confidence is below the apply threshold ({:.0}%); refine the instruction and try again.",
                CONFIDENCE_THRESHOLD * 100.0
            )
            .yellow()
        );
        return Ok(());
    }

    if !apply {
        println!();
        println!("Re-run with --apply to commit this modification to the whole file.");
        return Ok(());
    }

    controller.apply_proposal().await;
    let state = controller.state().await;
    match state.processed_files.first() {
        Some(record) => {
            println!();
            println!("{} {}", "Processed".green(), record.name);
            println!("  url: {}", record.file_url);
            println!(
                "  {} of {} rows modified, created {}",
                group_thousands(record.stats.modified_rows),
                group_thousands(record.stats.total_rows),
                format_relative_time(&record.created_at)
            );
        }
        None => {
            // Apply is fire-and-forget: a failure resets the form quietly
            println!();
            println!("{}", "The modification was not applied.".yellow());
        }
    }
    Ok(())
}
