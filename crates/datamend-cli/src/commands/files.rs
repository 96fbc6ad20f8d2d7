use std::sync::Arc;

use anyhow::Result;
use colored::Colorize;

use datamend_core::file::FileKind;
use datamend_core::workflow::ModificationService;

use crate::render;

pub async fn list(service: Arc<dyn ModificationService>, kind: Option<FileKind>) -> Result<()> {
    match service.list_files(kind).await {
        Ok(files) => {
            if files.is_empty() {
                println!("No uploaded files.");
                return Ok(());
            }
            for file in &files {
                println!("{:>6}  {}", file.id, render::file_summary(file));
            }
            Ok(())
        }
        Err(err) => {
            eprintln!("{}", err.user_message().red());
            std::process::exit(1);
        }
    }
}

pub async fn delete(service: Arc<dyn ModificationService>, file_id: i64) -> Result<()> {
    match service.delete_file(file_id).await {
        Ok(()) => {
            println!("Deleted file {file_id}.");
            Ok(())
        }
        Err(err) => {
            eprintln!("{}", err.user_message().red());
            std::process::exit(1);
        }
    }
}
