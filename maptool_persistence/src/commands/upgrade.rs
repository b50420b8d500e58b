use maptool_core::api_models::ApiData;
use maptool_persistence::{
    unpacked::{UnpackedFile, UpgradeOptions},
    version_check::{check_program_version, VersionCheck},
};
use miette::{miette, Context, IntoDiagnostic, Result};
use tracing::info;

use super::{ask_for_confirmation, CommandContext};
use crate::cli::UpgradeCommandArguments;


pub fn cli_upgrade(context: &CommandContext, arguments: UpgradeCommandArguments) -> Result<()> {
    let application = &context.configuration.application;
    let persistence = &context.configuration.persistence;

    let mut unpacked_file = UnpackedFile::open(
        &arguments.directory_path,
        arguments.kind.0,
        &context.managers,
    )
    .into_diagnostic()
    .wrap_err("failed to open extracted file")?;


    let version_check = check_program_version(
        &application.version,
        unpacked_file.program_version(),
        application.development_mode,
    );

    if let VersionCheck::WrittenByNewerVersion {
        application_version,
        file_program_version,
    } = &version_check
    {
        if !arguments.assume_yes {
            let question = format!(
                "This file was written by version {} and this is version {}. \
                Upgrading it may lose data. Are you sure you want to continue?",
                file_program_version, application_version
            );

            if !ask_for_confirmation(&question)? {
                return Err(miette!("User aborted command."));
            }
        }
    }


    let upgrade_options = UpgradeOptions {
        application_version: application.version.clone(),
        default_campaign_version: persistence.default_campaign_version.clone(),
        output_directory: arguments.output_directory.clone(),
    };

    let report = unpacked_file
        .upgrade(&upgrade_options)
        .into_diagnostic()
        .wrap_err("failed to upgrade extracted file")?;

    info!(
        output_directory = %report.output_directory.display(),
        "Upgrade finished."
    );


    if arguments.json {
        let report_json = report
            .to_json()
            .into_diagnostic()
            .wrap_err("failed to serialize upgrade report")?;

        println!(
            "{}",
            serde_json::to_string_pretty(&report_json)
                .into_diagnostic()
                .wrap_err("failed to format upgrade report")?
        );

        return Ok(());
    }


    if !report.was_upgrade_needed() {
        println!(
            "Content is already at the current model version ({}), only versions were updated.",
            report.previous_content_version
        );
    } else {
        println!(
            "Applied {} transformations (content was at version {}):",
            report.applied_transformations.len(),
            report.previous_content_version
        );
        for applied in &report.applied_transformations {
            println!("  {} (registered for {})", applied.name, applied.registered_version);
        }
    }

    println!();
    println!(
        "Upgraded file written to {}.",
        report.output_directory.display()
    );

    Ok(())
}
