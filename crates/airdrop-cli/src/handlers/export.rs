use crate::cli::{ExportArgs, ImportArgs};
use crate::context::CliContext;
use crate::output;
use airdrop_domain::Intent;
use airdrop_persistence::AtomicWriter;
use std::path::PathBuf;

pub fn handle_export(ctx: &CliContext, args: ExportArgs) -> anyhow::Result<()> {
    let file = ctx.controller.export(&ctx.model, ctx.model.today())?;
    let path = match args.output {
        Some(dir) if dir.is_dir() => dir.join(&file.filename),
        Some(path) => path,
        None => PathBuf::from(&file.filename),
    };
    AtomicWriter::write_atomic(&path, file.payload.as_bytes())?;
    tracing::info!("Exported board to {}", path.display());

    let board = ctx.model.board();
    output::output_success(serde_json::json!({
        "path": path.display().to_string(),
        "columns": board.columns.len(),
        "cards": board.total_cards(),
    }));
    Ok(())
}

pub fn handle_import(ctx: &mut CliContext, args: ImportArgs) -> anyhow::Result<()> {
    let payload = std::fs::read_to_string(&args.file)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", args.file.display(), e))?;
    ctx.execute(Intent::Import { payload }, false)?;

    let board = ctx.model.board();
    output::output_success(serde_json::json!({
        "imported": args.file.display().to_string(),
        "columns": board.columns.len(),
        "cards": board.total_cards(),
    }));
    Ok(())
}
