use std::{
    fs,
    path::{Path, PathBuf},
};

use chrono::Utc;
use fs_more::directory::{copy_directory, DestinationDirectoryRule, DirectoryCopyOptions};
use maptool_core::api_models::{AppliedTransformationSummary, PersistedFileKind, UpgradeReport};
use maptool_model_version::{ModelVersion, ModelVersionManager, TransformationOutcome};
use maptool_transforms::StandardVersionManagers;
use tracing::{debug, info};

use crate::{
    errors::PersistenceError,
    properties::{PackedProperties, PropertyValue},
    ASSETS_DIRECTORY_NAME,
    CONTENT_FILE_NAME,
    CURRENT_CAMPAIGN_VERSION,
    PROPERTIES_FILE_NAME,
    PROPERTY_CAMPAIGN_VERSION,
    PROPERTY_PROGRAM_VERSION,
    RAW_ASSET_PROGRAM_VERSION,
};


/// Settings for [`UnpackedFile::upgrade`].
#[derive(Clone, Debug)]
pub struct UpgradeOptions {
    /// Program version to record in the upgraded file.
    pub application_version: String,

    /// Campaign model version assumed when a campaign doesn't record one.
    pub default_campaign_version: ModelVersion,

    /// If set, the upgraded file is written to this (not yet existing) directory
    /// instead of being upgraded in place.
    pub output_directory: Option<PathBuf>,
}


/// A packed campaign or token file that has been extracted into a directory.
///
/// The directory contains `content.xml` (the serialized model), `properties.xml`
/// (see [`PackedProperties`]) and, optionally, an `assets` directory with image data.
pub struct UnpackedFile<'m> {
    directory_path: PathBuf,
    kind: PersistedFileKind,
    properties: PackedProperties,
    managers: &'m StandardVersionManagers,
}

impl<'m> UnpackedFile<'m> {
    pub fn open<P>(
        directory_path: P,
        kind: PersistedFileKind,
        managers: &'m StandardVersionManagers,
    ) -> Result<Self, PersistenceError>
    where
        P: AsRef<Path>,
    {
        let directory_path = directory_path.as_ref().to_path_buf();

        if !directory_path.is_dir() {
            return Err(PersistenceError::NotADirectory {
                path: directory_path,
            });
        }

        let properties_file_path = directory_path.join(PROPERTIES_FILE_NAME);

        // A packed file without properties is valid, it just doesn't know its version.
        let properties = if properties_file_path.is_file() {
            let properties_xml = fs::read_to_string(&properties_file_path).map_err(|error| {
                PersistenceError::UnableToReadFile {
                    path: properties_file_path.clone(),
                    error,
                }
            })?;

            PackedProperties::parse(&properties_xml).map_err(|error| {
                PersistenceError::InvalidProperties {
                    path: properties_file_path.clone(),
                    error,
                }
            })?
        } else {
            debug!(
                directory = %directory_path.display(),
                "No properties file found, continuing with empty properties."
            );

            PackedProperties::new()
        };

        Ok(Self {
            directory_path,
            kind,
            properties,
            managers,
        })
    }

    pub fn directory_path(&self) -> &Path {
        &self.directory_path
    }

    pub fn kind(&self) -> PersistedFileKind {
        self.kind
    }

    pub fn properties(&self) -> &PackedProperties {
        &self.properties
    }

    /// Version of the program that wrote this file, as recorded in its properties.
    pub fn program_version(&self) -> Option<&str> {
        self.properties.get_value(PROPERTY_PROGRAM_VERSION)
    }

    /// Model version the content is in.
    ///
    /// Campaigns record this separately from the program version, and campaigns
    /// that don't record it predate the property entirely (hence the default).
    /// Tokens use the program version.
    pub fn content_version(&self, default_campaign_version: &ModelVersion) -> String {
        match self.kind {
            PersistedFileKind::Campaign => self
                .properties
                .get_value(PROPERTY_CAMPAIGN_VERSION)
                .map(str::to_string)
                .unwrap_or_else(|| default_campaign_version.to_string()),
            PersistedFileKind::Token => self.program_version().unwrap_or_default().to_string(),
        }
    }

    pub fn version_manager(&self) -> &'m ModelVersionManager {
        match self.kind {
            PersistedFileKind::Campaign => &self.managers.campaign,
            PersistedFileKind::Token => &self.managers.token,
        }
    }

    pub fn is_upgrade_required(&self, default_campaign_version: &ModelVersion) -> bool {
        self.version_manager()
            .is_transformation_required(&self.content_version(default_campaign_version))
    }

    fn content_file_path(&self) -> PathBuf {
        self.directory_path.join(CONTENT_FILE_NAME)
    }

    /// Reads `content.xml` exactly as stored.
    pub fn read_raw_content(&self) -> Result<String, PersistenceError> {
        let content_file_path = self.content_file_path();

        fs::read_to_string(&content_file_path).map_err(|error| PersistenceError::UnableToReadFile {
            path: content_file_path,
            error,
        })
    }

    /// Reads `content.xml` and brings it up to the current model version.
    pub fn read_content(
        &self,
        default_campaign_version: &ModelVersion,
    ) -> Result<TransformationOutcome, PersistenceError> {
        let content_version = self.content_version(default_campaign_version);
        let raw_content = self.read_raw_content()?;

        if !self
            .version_manager()
            .is_transformation_required(&content_version)
        {
            return Ok(TransformationOutcome {
                output: raw_content,
                applied: Vec::new(),
            });
        }

        Ok(self
            .version_manager()
            .transform_with_details(&raw_content, &content_version))
    }

    /// Path to the image data of an asset (already joined with the directory of this file).
    ///
    /// Assets are stored as `assets/<id>.<extension>`, with `dat` used when the
    /// extension is unknown. Campaigns from before `1.3.51` stored them without any
    /// extension, which the asset name transformations take care of.
    /// Files written by `1.3.b64` always store raw image data at `assets/<id>`.
    pub fn asset_file_path(
        &self,
        asset_id: &str,
        extension: Option<&str>,
        default_campaign_version: &ModelVersion,
    ) -> PathBuf {
        if self.program_version() == Some(RAW_ASSET_PROGRAM_VERSION) {
            return self
                .directory_path
                .join(ASSETS_DIRECTORY_NAME)
                .join(asset_id);
        }

        let extension = extension
            .filter(|extension| !extension.is_empty())
            .unwrap_or("dat");

        let relative_path = format!("{}/{}.{}", ASSETS_DIRECTORY_NAME, asset_id, extension);

        let relative_path = match self.kind {
            PersistedFileKind::Campaign => self.managers.asset_name.transform(
                &relative_path,
                &self.content_version(default_campaign_version),
            ),
            PersistedFileKind::Token => relative_path,
        };

        self.directory_path.join(relative_path)
    }

    /// Brings the file up to the current model version and records the new versions
    /// in its properties.
    pub fn upgrade(&mut self, options: &UpgradeOptions) -> Result<UpgradeReport, PersistenceError> {
        let source_directory = self.directory_path.clone();
        let previous_program_version = self.program_version().map(str::to_string);
        let previous_content_version = self.content_version(&options.default_campaign_version);

        let raw_content = self.read_raw_content()?;
        let outcome = self
            .version_manager()
            .transform_with_details(&raw_content, &previous_content_version);
        let content_changed = outcome.output != raw_content;

        let output_directory = match options.output_directory.as_ref() {
            Some(output_directory) if output_directory != &source_directory => {
                copy_directory_contents(&source_directory, output_directory)?;
                output_directory.clone()
            }
            _ => source_directory.clone(),
        };

        if content_changed {
            write_file(
                &output_directory.join(CONTENT_FILE_NAME),
                &outcome.output,
            )?;
        }


        self.properties.insert(
            PROPERTY_PROGRAM_VERSION,
            PropertyValue::string(options.application_version.as_str()),
        );

        let campaign_version = match self.kind {
            PersistedFileKind::Campaign => {
                self.properties.insert(
                    PROPERTY_CAMPAIGN_VERSION,
                    PropertyValue::string(CURRENT_CAMPAIGN_VERSION),
                );

                Some(CURRENT_CAMPAIGN_VERSION.to_string())
            }
            PersistedFileKind::Token => None,
        };

        write_file(
            &output_directory.join(PROPERTIES_FILE_NAME),
            &self.properties.to_xml(),
        )?;

        self.directory_path = output_directory.clone();


        info!(
            directory = %output_directory.display(),
            previous_content_version = previous_content_version.as_str(),
            applied_transformations = outcome.applied.len(),
            content_changed,
            "Upgraded persisted file."
        );

        Ok(UpgradeReport {
            kind: self.kind,
            source_directory,
            output_directory,
            previous_program_version,
            previous_content_version,
            program_version: options.application_version.clone(),
            campaign_version,
            applied_transformations: outcome
                .applied
                .into_iter()
                .map(|applied| AppliedTransformationSummary {
                    registered_version: applied.registered_version.to_string(),
                    name: applied.name,
                })
                .collect(),
            content_changed,
            upgraded_at: Utc::now(),
        })
    }
}


fn write_file(file_path: &Path, contents: &str) -> Result<(), PersistenceError> {
    fs::write(file_path, contents).map_err(|error| PersistenceError::UnableToWriteFile {
        path: file_path.to_path_buf(),
        error,
    })
}


/// Canonicalizes `path`, which may not exist yet.
///
/// The deepest existing ancestor is canonicalized and the missing components are appended to it.
fn resolve_possibly_missing_path(path: &Path) -> Result<PathBuf, PersistenceError> {
    let absolute_path = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .map_err(|error| PersistenceError::UnableToResolvePath {
                path: path.to_path_buf(),
                error,
            })?
            .join(path)
    };

    let mut existing_ancestor = absolute_path.as_path();
    let mut missing_components = Vec::new();

    while !existing_ancestor.exists() {
        let (Some(parent), Some(file_name)) =
            (existing_ancestor.parent(), existing_ancestor.file_name())
        else {
            break;
        };

        missing_components.push(file_name.to_os_string());
        existing_ancestor = parent;
    }

    let mut resolved_path = dunce::canonicalize(existing_ancestor).map_err(|error| {
        PersistenceError::UnableToResolvePath {
            path: existing_ancestor.to_path_buf(),
            error,
        }
    })?;

    for missing_component in missing_components.into_iter().rev() {
        resolved_path.push(missing_component);
    }

    Ok(resolved_path)
}


/// Copies the contents of `source_directory` into the new `destination_directory`,
/// which must not exist yet and must not lie inside `source_directory`.
fn copy_directory_contents(
    source_directory: &Path,
    destination_directory: &Path,
) -> Result<(), PersistenceError> {
    if destination_directory.exists() {
        return Err(PersistenceError::OutputDirectoryAlreadyExists {
            path: destination_directory.to_path_buf(),
        });
    }

    let resolved_source_directory = resolve_possibly_missing_path(source_directory)?;
    let resolved_destination_directory = resolve_possibly_missing_path(destination_directory)?;

    if resolved_destination_directory.starts_with(&resolved_source_directory) {
        return Err(PersistenceError::OutputDirectoryInsideSource {
            source_directory_path: source_directory.to_path_buf(),
            output_directory_path: destination_directory.to_path_buf(),
        });
    }


    let copy_result = copy_directory(
        &resolved_source_directory,
        &resolved_destination_directory,
        DirectoryCopyOptions {
            destination_directory_rule: DestinationDirectoryRule::DisallowExisting,
            ..Default::default()
        },
    )
    .map_err(|error| PersistenceError::UnableToCopyDirectory {
        source_directory_path: source_directory.to_path_buf(),
        destination_directory_path: destination_directory.to_path_buf(),
        error,
    })?;

    debug!(
        source_directory = %source_directory.display(),
        destination_directory = %destination_directory.display(),
        total_bytes_copied = copy_result.total_bytes_copied,
        "Copied extracted file to output directory."
    );

    Ok(())
}
