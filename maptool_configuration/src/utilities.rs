use std::{env::current_dir, path::PathBuf};


/// Returns the default configuration filepath, which is at
/// `{current directory}/data/configuration.toml`.
///
/// If the current directory can't be determined, the path is relative.
pub fn get_default_configuration_file_path() -> PathBuf {
    let mut configuration_filepath = current_dir().unwrap_or_default();
    configuration_filepath.push("data/configuration.toml");

    configuration_filepath
}
