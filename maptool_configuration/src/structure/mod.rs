use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

mod application;
mod base_paths;
mod logging;
mod persistence;

pub use application::*;
pub use base_paths::*;
pub use logging::*;
pub use persistence::*;

use crate::traits::{TryResolve, TryResolveWithContext};
use crate::utilities::get_default_configuration_file_path;
use crate::{ConfigurationLoadingError, ConfigurationResolutionError};



#[derive(Deserialize, Debug)]
pub(crate) struct UnresolvedConfiguration {
    /// Base paths.
    base_paths: UnresolvedBasePathsConfiguration,

    /// Logging-related configuration.
    logging: UnresolvedLoggingConfiguration,

    /// Details about the running program.
    application: UnresolvedApplicationConfiguration,

    /// Configuration related to loading and saving campaign and token files.
    persistence: Option<UnresolvedPersistenceConfiguration>,
}


/// The entire MapTool persistence tooling configuration.
#[derive(Debug, Clone)]
pub struct Configuration {
    /// This is the file path this [`Configuration`] instance was loaded from.
    pub configuration_file_path: PathBuf,

    /// Base paths
    pub base_paths: BasePathsConfiguration,

    /// Logging-related configuration.
    pub logging: LoggingConfiguration,

    /// Details about the running program.
    pub application: ApplicationConfiguration,

    /// Configuration related to loading and saving campaign and token files.
    pub persistence: PersistenceConfiguration,
}



pub(crate) struct ConfigurationResolutionContext {
    configuration_file_path: PathBuf,
}


impl<'r> TryResolveWithContext<'r> for UnresolvedConfiguration {
    type Resolved = Configuration;
    type Context = ConfigurationResolutionContext;
    type Error = ConfigurationResolutionError;

    fn try_resolve_with_context(
        self,
        context: Self::Context,
    ) -> Result<Self::Resolved, Self::Error> {
        let base_paths = self.base_paths.try_resolve()?;
        let logging = self.logging.try_resolve_with_context(&base_paths)?;
        let application = self.application.try_resolve()?;
        let persistence = match self.persistence {
            Some(unresolved_persistence) => unresolved_persistence.try_resolve()?,
            None => PersistenceConfiguration::default(),
        };

        Ok(Configuration {
            configuration_file_path: context.configuration_file_path,
            base_paths,
            logging,
            application,
            persistence,
        })
    }
}


impl Configuration {
    /// Load the configuration from a specific file path.
    pub fn load_from_path<S: AsRef<Path>>(
        configuration_file_path: S,
    ) -> Result<Self, ConfigurationLoadingError> {
        // Read the configuration file into memory as a string.
        let configuration_string =
            fs::read_to_string(configuration_file_path.as_ref()).map_err(|error| {
                ConfigurationLoadingError::UnableToReadConfigurationFile {
                    path: configuration_file_path.as_ref().to_path_buf(),
                    error,
                }
            })?;

        let configuration_file_path = dunce::canonicalize(configuration_file_path.as_ref())
            .unwrap_or_else(|_| configuration_file_path.as_ref().to_path_buf());

        Self::load_from_str(&configuration_string, configuration_file_path)
    }

    /// Load the configuration from the default path (`./data/configuration.toml`).
    pub fn load_from_default_path() -> Result<Self, ConfigurationLoadingError> {
        Configuration::load_from_path(get_default_configuration_file_path())
    }

    pub(crate) fn load_from_str(
        configuration_string: &str,
        configuration_file_path: PathBuf,
    ) -> Result<Self, ConfigurationLoadingError> {
        // Parse the string into the [`UnresolvedConfiguration`] structure and then resolve it.
        let unresolved_configuration =
            toml::from_str::<UnresolvedConfiguration>(configuration_string)
                .map_err(|error| ConfigurationLoadingError::ParsingError { error })?;

        let resolved_configuration =
            unresolved_configuration.try_resolve_with_context(ConfigurationResolutionContext {
                configuration_file_path,
            })?;

        Ok(resolved_configuration)
    }
}
