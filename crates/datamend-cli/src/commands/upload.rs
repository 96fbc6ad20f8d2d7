use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use colored::Colorize;

use datamend_core::file::LocalFile;
use datamend_core::workflow::{ModificationService, WorkflowController};

use crate::render;

pub async fn run(service: Arc<dyn ModificationService>, path: &Path) -> Result<()> {
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
        println!("  id: {}", file.id);
        println!("  url: {}", file.file_url);
        if let Some(headers) = &file.headers {
            println!("  columns: {}", headers.join(", "));
        }
    }
    Ok(())
}
