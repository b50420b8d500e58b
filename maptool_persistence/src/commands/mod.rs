use std::io::{self, Write};

use maptool_configuration::Configuration;
use maptool_transforms::StandardVersionManagers;
use miette::{Context, IntoDiagnostic, Result};

pub(crate) mod check;
pub(crate) mod locate_asset;
pub(crate) mod transform;
pub(crate) mod upgrade;


/// State shared by all subcommands.
pub(crate) struct CommandContext {
    pub(crate) configuration: Configuration,
    pub(crate) managers: StandardVersionManagers,
}


/// Asks a yes/no question on the terminal. Anything but `y` counts as no.
pub(crate) fn ask_for_confirmation(question: &str) -> Result<bool> {
    print!("{} [y/N] ", question);
    io::stdout()
        .flush()
        .into_diagnostic()
        .wrap_err("failed to flush terminal output")?;

    let mut user_response = String::new();
    io::stdin()
        .read_line(&mut user_response)
        .into_diagnostic()
        .wrap_err("failed to read user terminal input")?;

    Ok(user_response.trim_end().eq_ignore_ascii_case("y"))
}
