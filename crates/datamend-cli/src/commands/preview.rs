use std::sync::Arc;

use anyhow::Result;
use colored::Colorize;

use datamend_core::format::group_thousands;
use datamend_core::workflow::ModificationService;

use crate::render;

pub async fn run(service: Arc<dyn ModificationService>, file_id: i64, rows: Option<u32>) -> Result<()> {
    match service.fetch_preview(file_id, rows).await {
        Ok(preview) => {
            render::print_table(&preview.columns, &preview.data);
            println!(
                "  showing {} of {} rows",
                preview.data.len(),
                group_thousands(preview.total_rows)
            );
            Ok(())
        }
        Err(err) => {
            eprintln!("{}", err.user_message().red());
            std::process::exit(1);
        }
    }
}
