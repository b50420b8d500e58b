use maptool_model_version::{clean_version_number, is_before};


/// Outcome of comparing the running program's version with the one that wrote a file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum VersionCheck {
    /// The file can be loaded without asking.
    Compatible,

    /// The file was written by a newer program version; loading it may lose data,
    /// so the user should confirm first.
    WrittenByNewerVersion {
        application_version: String,
        file_program_version: String,
    },
}

impl VersionCheck {
    pub fn requires_confirmation(&self) -> bool {
        matches!(self, Self::WrittenByNewerVersion { .. })
    }
}


/// Answers the question "can this program version load a file that was written with
/// `file_program_version`?".
///
/// A missing file version is treated as `0`, i.e. as very old. In development mode
/// every file is considered compatible.
pub fn check_program_version(
    application_version: &str,
    file_program_version: Option<&str>,
    development_mode: bool,
) -> VersionCheck {
    if development_mode {
        return VersionCheck::Compatible;
    }

    let cleaned_application_version = clean_version_number(Some(application_version));
    let cleaned_file_program_version = clean_version_number(file_program_version);

    if is_before(
        &cleaned_application_version,
        &cleaned_file_program_version,
    ) {
        VersionCheck::WrittenByNewerVersion {
            application_version: application_version.to_string(),
            file_program_version: file_program_version.unwrap_or_default().to_string(),
        }
    } else {
        VersionCheck::Compatible
    }
}
