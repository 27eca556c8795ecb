//! Upload subcommand with a streaming progress readout.

use crate::commands::datasets::require_login;
use crate::context::AppContext;
use anyhow::Result;
use datadeck_application::UploadUseCase;
use datadeck_core::gateway::ProgressFn;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;

pub async fn run(ctx: &AppContext, path: &Path) -> Result<()> {
    require_login(ctx).await?;

    let usecase = UploadUseCase::new(ctx.gateway.clone());
    let progress: ProgressFn = Arc::new(|sent, total| {
        if total > 0 {
            let percent = sent * 100 / total;
            print!("\rUploading... {percent:>3}%");
            let _ = std::io::stdout().flush();
        }
    });

    let summary = usecase.upload_file(path, Some(progress)).await?;
    println!(
        "\rUploaded {} ({} rows, {} columns, {})",
        summary.filename,
        summary.row_count,
        summary.column_count,
        summary.file_size_mb()
    );
    Ok(())
}
