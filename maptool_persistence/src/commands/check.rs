use maptool_persistence::{
    unpacked::UnpackedFile,
    version_check::{check_program_version, VersionCheck},
};
use miette::{Context, IntoDiagnostic, Result};

use super::CommandContext;
use crate::cli::CheckCommandArguments;


pub fn cli_check(context: &CommandContext, arguments: CheckCommandArguments) -> Result<()> {
    let application = &context.configuration.application;
    let default_campaign_version = &context.configuration.persistence.default_campaign_version;

    let unpacked_file = UnpackedFile::open(
        &arguments.directory_path,
        arguments.kind.0,
        &context.managers,
    )
    .into_diagnostic()
    .wrap_err("failed to open extracted file")?;


    println!(
        "Written by program version: {}",
        unpacked_file.program_version().unwrap_or("(unknown)")
    );
    println!(
        "Content model version: {}",
        unpacked_file.content_version(default_campaign_version)
    );

    match check_program_version(
        &application.version,
        unpacked_file.program_version(),
        application.development_mode,
    ) {
        VersionCheck::Compatible => {}
        VersionCheck::WrittenByNewerVersion {
            application_version,
            file_program_version,
        } => {
            println!(
                "Warning: written by a newer program version ({} > {}).",
                file_program_version, application_version
            );
        }
    }

    println!();

    let content_version = unpacked_file.content_version(default_campaign_version);
    let pending_versions = unpacked_file
        .version_manager()
        .pending_versions(&content_version);

    if !pending_versions.is_empty() {
        println!(
            "Upgrade required: transformations from {} later model versions are pending:",
            pending_versions.len()
        );
        for pending_version in &pending_versions {
            println!("  {}", pending_version);
        }
    } else {
        println!("No upgrade required.");
    }

    Ok(())
}
