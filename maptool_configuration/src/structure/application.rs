use maptool_model_version::{clean_version_number, DEFAULT_EMPTY_VERSION};
use serde::Deserialize;

use crate::{traits::TryResolve, ApplicationConfigurationError};


#[derive(Deserialize, Debug)]
pub(super) struct UnresolvedApplicationConfiguration {
    version: String,

    #[serde(default)]
    development_mode: bool,
}


/// Details about the running program that end up in (and are checked against) persisted files.
#[derive(Debug, Clone)]
pub struct ApplicationConfiguration {
    /// Program version written into the `version` property of saved files, e.g. `1.4.1`.
    pub version: String,

    /// In development mode, files written by newer program versions are loaded without asking.
    pub development_mode: bool,
}


impl TryResolve for UnresolvedApplicationConfiguration {
    type Resolved = ApplicationConfiguration;
    type Error = ApplicationConfigurationError;

    fn try_resolve(self) -> Result<Self::Resolved, Self::Error> {
        if !self.development_mode
            && clean_version_number(Some(&self.version)) == DEFAULT_EMPTY_VERSION
        {
            return Err(ApplicationConfigurationError::MissingVersionNumber {
                version: self.version,
            });
        }

        Ok(Self::Resolved {
            version: self.version,
            development_mode: self.development_mode,
        })
    }
}
