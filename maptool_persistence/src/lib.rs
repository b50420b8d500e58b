//! Loading and upgrading persisted MapTool campaign and token files.
//!
//! Packed files are zip containers; this crate works on their extracted form
//! (see [`unpacked::UnpackedFile`]). Upgrading runs the model version
//! transformations from [`maptool_transforms`] over the serialized content and
//! records the new program and campaign versions in the file's properties.

pub mod errors;
pub mod properties;
pub mod unpacked;
pub mod version_check;


/// Name of the serialized model inside a packed file.
pub const CONTENT_FILE_NAME: &str = "content.xml";

/// Name of the property map inside a packed file.
pub const PROPERTIES_FILE_NAME: &str = "properties.xml";

/// Directory with asset image data inside a packed file.
pub const ASSETS_DIRECTORY_NAME: &str = "assets";

/// Property holding the version of the program that wrote the file.
pub const PROPERTY_PROGRAM_VERSION: &str = "version";

/// Property holding the campaign model version (campaign files only).
pub const PROPERTY_CAMPAIGN_VERSION: &str = "campaignVersion";

/// Program version whose files store raw asset image data at `assets/<id>`,
/// regardless of the campaign version.
pub const RAW_ASSET_PROGRAM_VERSION: &str = "1.3.b64";

/// Campaign model version written by this tooling.
///
/// Whenever a new campaign transformation is registered, bump this to the version
/// the transformation was registered under.
pub const CURRENT_CAMPAIGN_VERSION: &str = "1.4.1";
