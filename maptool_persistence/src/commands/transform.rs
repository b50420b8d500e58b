use std::{fs, io::Read};

use maptool_model_version::ModelVersionManager;
use miette::{Context, IntoDiagnostic, Result};
use tracing::info;

use super::CommandContext;
use crate::cli::{ManagerArgument, TransformCommandArguments};


pub fn cli_transform(context: &CommandContext, arguments: TransformCommandArguments) -> Result<()> {
    let input = match arguments.input_file_path.as_ref() {
        Some(input_file_path) => fs::read_to_string(input_file_path)
            .into_diagnostic()
            .wrap_err_with(|| format!("failed to read {}", input_file_path.display()))?,
        None => {
            let mut input = String::new();
            std::io::stdin()
                .read_to_string(&mut input)
                .into_diagnostic()
                .wrap_err("failed to read standard input")?;

            input
        }
    };


    let manager: &ModelVersionManager = match arguments.manager {
        ManagerArgument::Campaign => &context.managers.campaign,
        ManagerArgument::Token => &context.managers.token,
        ManagerArgument::AssetName => &context.managers.asset_name,
    };

    let outcome = manager.transform_with_details(&input, &arguments.file_version);

    info!(
        file_version = arguments.file_version.as_str(),
        applied_transformations = outcome.applied.len(),
        "Transformed input."
    );

    print!("{}", outcome.output);

    Ok(())
}
