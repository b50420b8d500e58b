use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::{traits::TryResolve, BasePathsConfigurationError, MissingBasePathCreationError};


/// Placeholder that other configured paths can use to refer to the base data directory.
pub const BASE_DATA_DIRECTORY_PLACEHOLDER: &str = "{BASE_DATA_DIRECTORY}";


fn default_base_data_directory_path() -> String {
    "./data".to_string()
}


#[derive(Deserialize, Debug)]
pub(super) struct UnresolvedBasePathsConfiguration {
    #[serde(default = "default_base_data_directory_path")]
    base_data_directory_path: String,
}


/// Directories every other configured path can be placed relative to.
#[derive(Debug, Clone)]
pub struct BasePathsConfiguration {
    /// Directory for logs and other files the tooling produces.
    ///
    /// Canonicalized if it already exists when the configuration is loaded.
    pub base_data_directory_path: PathBuf,
}


impl TryResolve for UnresolvedBasePathsConfiguration {
    type Resolved = BasePathsConfiguration;
    type Error = BasePathsConfigurationError;

    fn try_resolve(self) -> Result<Self::Resolved, Self::Error> {
        if self.base_data_directory_path.trim().is_empty() {
            return Err(BasePathsConfigurationError::EmptyBaseDataDirectoryPath);
        }

        let configured_path = PathBuf::from(self.base_data_directory_path);

        if !configured_path.exists() {
            return Ok(Self::Resolved {
                base_data_directory_path: configured_path,
            });
        }

        if !configured_path.is_dir() {
            return Err(BasePathsConfigurationError::BaseDataPathIsNotADirectory {
                path: configured_path,
            });
        }

        let base_data_directory_path = dunce::canonicalize(&configured_path).map_err(|error| {
            BasePathsConfigurationError::UnableToCanonicalizeBaseDataDirectory {
                path: configured_path,
                error,
            }
        })?;

        Ok(Self::Resolved {
            base_data_directory_path,
        })
    }
}


impl BasePathsConfiguration {
    /// Expands [`BASE_DATA_DIRECTORY_PLACEHOLDER`] in a configured path.
    pub(crate) fn expand_placeholders(&self, configured_path: &str) -> PathBuf {
        let base_data_directory = self.base_data_directory_path.to_string_lossy();

        PathBuf::from(configured_path.replace(
            BASE_DATA_DIRECTORY_PLACEHOLDER,
            base_data_directory.as_ref(),
        ))
    }

    pub fn create_base_data_directory_if_missing(&self) -> Result<(), MissingBasePathCreationError> {
        create_directory_if_missing(&self.base_data_directory_path)
    }
}


fn create_directory_if_missing(directory_path: &Path) -> Result<(), MissingBasePathCreationError> {
    if directory_path.is_dir() {
        return Ok(());
    }

    if directory_path.exists() {
        return Err(MissingBasePathCreationError::NotADirectory {
            path: directory_path.to_path_buf(),
        });
    }

    std::fs::create_dir_all(directory_path).map_err(|error| {
        MissingBasePathCreationError::UnableToCreateDirectory {
            directory_path: directory_path.to_path_buf(),
            error,
        }
    })
}



#[cfg(test)]
mod test {
    use std::fs;

    use super::*;

    fn unresolved(path: &str) -> UnresolvedBasePathsConfiguration {
        UnresolvedBasePathsConfiguration {
            base_data_directory_path: path.to_string(),
        }
    }

    #[test]
    fn missing_directory_is_kept_as_configured() {
        let base_paths = unresolved("./does-not-exist-yet/data").try_resolve().unwrap();

        assert_eq!(
            base_paths.base_data_directory_path,
            PathBuf::from("./does-not-exist-yet/data")
        );
    }

    #[test]
    fn existing_directory_is_canonicalized() {
        let temporary_directory = tempfile::tempdir().unwrap();
        let nested_directory = temporary_directory.path().join("data");
        fs::create_dir(&nested_directory).unwrap();

        let configured = format!("{}/../data", nested_directory.display());
        let base_paths = unresolved(&configured).try_resolve().unwrap();

        assert_eq!(
            base_paths.base_data_directory_path,
            dunce::canonicalize(&nested_directory).unwrap()
        );
    }

    #[test]
    fn rejects_empty_path_and_files() {
        assert!(matches!(
            unresolved("  ").try_resolve(),
            Err(BasePathsConfigurationError::EmptyBaseDataDirectoryPath)
        ));

        let temporary_directory = tempfile::tempdir().unwrap();
        let file_path = temporary_directory.path().join("data");
        fs::write(&file_path, b"").unwrap();

        assert!(matches!(
            unresolved(&file_path.to_string_lossy()).try_resolve(),
            Err(BasePathsConfigurationError::BaseDataPathIsNotADirectory { .. })
        ));
    }

    #[test]
    fn expands_placeholder() {
        let base_paths = BasePathsConfiguration {
            base_data_directory_path: PathBuf::from("/srv/maptool"),
        };

        assert_eq!(
            base_paths.expand_placeholders("{BASE_DATA_DIRECTORY}/logs"),
            PathBuf::from("/srv/maptool/logs")
        );
        assert_eq!(
            base_paths.expand_placeholders("/var/log/maptool"),
            PathBuf::from("/var/log/maptool")
        );
    }

    #[test]
    fn creates_missing_directory() {
        let temporary_directory = tempfile::tempdir().unwrap();
        let base_paths = BasePathsConfiguration {
            base_data_directory_path: temporary_directory.path().join("a/b"),
        };

        base_paths.create_base_data_directory_if_missing().unwrap();
        assert!(temporary_directory.path().join("a/b").is_dir());

        base_paths.create_base_data_directory_if_missing().unwrap();
    }
}
