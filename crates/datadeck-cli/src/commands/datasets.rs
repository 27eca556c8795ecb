//! Dataset directory subcommands.

use crate::commands::confirm;
use crate::context::AppContext;
use crate::format;
use anyhow::{bail, Result};

pub async fn list(ctx: &AppContext) -> Result<()> {
    require_login(ctx).await?;

    let datasets = ctx.gateway.list_datasets().await?;
    if datasets.is_empty() {
        println!("No datasets uploaded yet.");
        return Ok(());
    }

    println!(
        "{:<26} {:>8} {:>6} {:>10}  {:<24} {}",
        "ID", "ROWS", "COLS", "SIZE", "UPLOADED", "FILENAME"
    );
    for dataset in datasets {
        println!(
            "{:<26} {:>8} {:>6} {:>10}  {:<24} {}",
            dataset.id,
            dataset.row_count,
            dataset.column_count,
            dataset.file_size_mb(),
            format::upload_date(&dataset.upload_date),
            dataset.filename
        );
    }
    Ok(())
}

pub async fn delete(ctx: &AppContext, id: &str, yes: bool) -> Result<()> {
    require_login(ctx).await?;

    if !yes && !confirm(&format!("Delete dataset {id}? This cannot be undone."))? {
        println!("Aborted.");
        return Ok(());
    }
    ctx.gateway.delete_dataset(id).await?;
    println!("Deleted {id}.");
    Ok(())
}

pub(crate) async fn require_login(ctx: &AppContext) -> Result<()> {
    if !ctx.session.is_authenticated().await {
        bail!("not logged in; run `datadeck login` first");
    }
    Ok(())
}
