use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};


/// Kind of a persisted file.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum PersistedFileKind {
    Campaign,
    Token,
}


/// A single transformation that was applied during an upgrade.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct AppliedTransformationSummary {
    /// Model version the transformation was registered under.
    pub registered_version: String,

    pub name: String,
}


/// Summary of upgrading a persisted file to the current model version.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct UpgradeReport {
    pub kind: PersistedFileKind,

    /// Directory the file was read from.
    pub source_directory: PathBuf,

    /// Directory the upgraded file was written to (may equal the source directory).
    pub output_directory: PathBuf,

    /// Program version recorded in the file before the upgrade.
    pub previous_program_version: Option<String>,

    /// Model version the content was considered to be in before the upgrade.
    pub previous_content_version: String,

    /// Program version recorded in the file after the upgrade.
    pub program_version: String,

    /// Campaign model version recorded after the upgrade (campaigns only).
    pub campaign_version: Option<String>,

    pub applied_transformations: Vec<AppliedTransformationSummary>,

    /// Whether the content was actually modified by the applied transformations.
    pub content_changed: bool,

    pub upgraded_at: DateTime<Utc>,
}

impl UpgradeReport {
    pub fn was_upgrade_needed(&self) -> bool {
        !self.applied_transformations.is_empty()
    }
}



#[cfg(test)]
mod test {
    use serde_json::json;

    use super::*;
    use crate::api_models::ApiData;

    #[test]
    fn report_converts_to_json() {
        let upgraded_at = DateTime::<Utc>::from_timestamp(0, 0).unwrap();

        let report = UpgradeReport {
            kind: PersistedFileKind::Campaign,
            source_directory: PathBuf::from("old"),
            output_directory: PathBuf::from("new"),
            previous_program_version: Some("1.3.b50".to_string()),
            previous_content_version: "1.3.50".to_string(),
            program_version: "1.4.1".to_string(),
            campaign_version: Some("1.4.1".to_string()),
            applied_transformations: vec![AppliedTransformationSummary {
                registered_version: "1.3.51".to_string(),
                name: "pc-vision".to_string(),
            }],
            content_changed: true,
            upgraded_at,
        };

        assert!(report.was_upgrade_needed());
        assert_eq!(
            report.to_json().unwrap(),
            json!({
                "kind": "campaign",
                "source_directory": "old",
                "output_directory": "new",
                "previous_program_version": "1.3.b50",
                "previous_content_version": "1.3.50",
                "program_version": "1.4.1",
                "campaign_version": "1.4.1",
                "applied_transformations": [
                    { "registered_version": "1.3.51", "name": "pc-vision" }
                ],
                "content_changed": true,
                "upgraded_at": "1970-01-01T00:00:00Z",
            })
        );
    }
}
