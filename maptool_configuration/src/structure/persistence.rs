use maptool_model_version::ModelVersion;
use serde::Deserialize;

use crate::{traits::TryResolve, PersistenceConfigurationError};


fn default_campaign_version() -> String {
    // Campaign files only started recording their model version in 1.3.51.
    "1.3.50".to_string()
}


#[derive(Deserialize, Debug)]
pub(super) struct UnresolvedPersistenceConfiguration {
    #[serde(default = "default_campaign_version")]
    default_campaign_version: String,
}


#[derive(Debug, Clone)]
pub struct PersistenceConfiguration {
    /// Campaign model version assumed for campaign files that don't record one.
    pub default_campaign_version: ModelVersion,
}


impl TryResolve for UnresolvedPersistenceConfiguration {
    type Resolved = PersistenceConfiguration;
    type Error = PersistenceConfigurationError;

    fn try_resolve(self) -> Result<Self::Resolved, Self::Error> {
        let default_campaign_version = ModelVersion::parse_strict(&self.default_campaign_version)
            .map_err(
                |error| PersistenceConfigurationError::InvalidDefaultCampaignVersion { error },
            )?;

        Ok(Self::Resolved {
            default_campaign_version,
        })
    }
}

impl Default for PersistenceConfiguration {
    fn default() -> Self {
        Self {
            default_campaign_version: ModelVersion::new(default_campaign_version()),
        }
    }
}
