use clap::Parser;
use maptool_configuration::Configuration;
use maptool_transforms::StandardVersionManagers;
use miette::{Context, IntoDiagnostic, Result};
use tracing::info;

mod cli;
mod commands;
mod logging;

use crate::cli::{CliArgs, CliCommand};
use crate::commands::{
    check::cli_check,
    locate_asset::cli_locate_asset,
    transform::cli_transform,
    upgrade::cli_upgrade,
    CommandContext,
};
use crate::logging::initialize_tracing;


fn main() -> Result<()> {
    // Parse CLI arguments.
    let arguments = CliArgs::parse();

    // Load configuration.
    let configuration = match arguments.configuration_file_path.as_ref() {
        Some(path) => Configuration::load_from_path(path),
        None => Configuration::load_from_default_path(),
    }
    .into_diagnostic()
    .wrap_err("Failed to load configuration file.")?;


    configuration
        .base_paths
        .create_base_data_directory_if_missing()
        .into_diagnostic()
        .wrap_err("Failed to create base data directory.")?;

    configuration
        .logging
        .create_log_file_output_directory_if_missing()
        .into_diagnostic()
        .wrap_err("Failed to create log file output directory.")?;

    let _guard = initialize_tracing(
        configuration.logging.console_output_level_filter(),
        configuration.logging.log_file_output_level_filter(),
        &configuration.logging.log_file_output_directory,
        "maptool_persistence.log",
    )
    .wrap_err("Failed to initialize tracing.")?;

    info!(
        file_path = %configuration.configuration_file_path.display(),
        application_version = configuration.application.version.as_str(),
        "Configuration loaded."
    );


    let managers = StandardVersionManagers::new()
        .into_diagnostic()
        .wrap_err("Failed to set up model version transformations.")?;

    let context = CommandContext {
        configuration,
        managers,
    };


    match arguments.command {
        CliCommand::Upgrade(upgrade_arguments) => cli_upgrade(&context, upgrade_arguments),
        CliCommand::Check(check_arguments) => cli_check(&context, check_arguments),
        CliCommand::Transform(transform_arguments) => cli_transform(&context, transform_arguments),
        CliCommand::LocateAsset(locate_asset_arguments) => {
            cli_locate_asset(&context, locate_asset_arguments)
        }
    }
}
