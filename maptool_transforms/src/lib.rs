//! Concrete model version transformations for campaign, token and asset data,
//! and the standard set of [`ModelVersionManager`]s that register them.

use std::sync::Arc;

use maptool_model_version::{ModelVersionManager, ModelVersionTransformation};

mod asset_name;
mod errors;
mod export_info;
mod pc_vision;
mod token_property_map;

pub use asset_name::AssetNameTransform;
pub use errors::*;
pub use export_info::ExportInfoTransform;
pub use pc_vision::PcVisionTransform;
pub use token_property_map::TokenPropertyMapTransform;


/// Pattern used to locate asset image data written before `1.3.51`, which had no file extension.
pub const LEGACY_ASSET_NAME_PATTERN: &str = r"^(.*)\.(dat)?$";

/// Replacement for [`LEGACY_ASSET_NAME_PATTERN`].
pub const LEGACY_ASSET_NAME_REPLACEMENT: &str = "$1";


/// The three version managers used when loading persisted data.
///
/// To add a new transformation, register it under the campaign model version that
/// introduces the change: it will then be applied to every file older than that version.
/// If finer granularity is needed than the current version allows, append another
/// component (e.g. `1.3.51.1`).
pub struct StandardVersionManagers {
    /// Transformations for campaign `content.xml` data.
    pub campaign: ModelVersionManager,

    /// Transformations for asset file names inside a campaign.
    pub asset_name: ModelVersionManager,

    /// Transformations for standalone token `content.xml` data.
    pub token: ModelVersionManager,
}

impl StandardVersionManagers {
    pub fn new() -> Result<Self, TransformConstructionError> {
        let campaign = ModelVersionManager::new();
        let asset_name = ModelVersionManager::new();
        let token = ModelVersionManager::new();

        let token_property_map: Arc<dyn ModelVersionTransformation> =
            Arc::new(TokenPropertyMapTransform::new());

        campaign.register_transformation(
            "1.3.51",
            [Arc::new(PcVisionTransform::new()) as Arc<dyn ModelVersionTransformation>],
        );
        campaign.register_transformation(
            "1.3.75",
            [Arc::new(ExportInfoTransform::new()) as Arc<dyn ModelVersionTransformation>],
        );
        campaign.register_transformation("1.3.78", [Arc::clone(&token_property_map)]);

        // Asset names are file paths, not XML.
        asset_name.register_transformation(
            "1.3.51",
            [Arc::new(AssetNameTransform::new(
                LEGACY_ASSET_NAME_PATTERN,
                LEGACY_ASSET_NAME_REPLACEMENT,
            )?) as Arc<dyn ModelVersionTransformation>],
        );

        // Campaigns contain tokens, so the token manager is a subset of the campaign one.
        token.register_transformation("1.3.78", [token_property_map]);

        Ok(Self {
            campaign,
            asset_name,
            token,
        })
    }
}
