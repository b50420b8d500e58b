use maptool_core::api_models::PersistedFileKind;
use maptool_persistence::unpacked::UnpackedFile;
use miette::{Context, IntoDiagnostic, Result};

use super::CommandContext;
use crate::cli::LocateAssetCommandArguments;


pub fn cli_locate_asset(
    context: &CommandContext,
    arguments: LocateAssetCommandArguments,
) -> Result<()> {
    let unpacked_file = UnpackedFile::open(
        &arguments.directory_path,
        PersistedFileKind::Campaign,
        &context.managers,
    )
    .into_diagnostic()
    .wrap_err("failed to open extracted campaign")?;

    let asset_file_path = unpacked_file.asset_file_path(
        &arguments.asset_id,
        arguments.extension.as_deref(),
        &context.configuration.persistence.default_campaign_version,
    );

    println!("{}", asset_file_path.display());

    if !asset_file_path.is_file() {
        eprintln!("Warning: no file exists at that path.");
    }

    Ok(())
}
