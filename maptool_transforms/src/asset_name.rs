use maptool_model_version::ModelVersionTransformation;
use regex::Regex;

use crate::TransformConstructionError;


/// Rewrites asset file names with a regular expression.
///
/// The replacement may reference capture groups (`$1`, `${name}`), as accepted by
/// [`Regex::replace_all`].
#[derive(Clone, Debug)]
pub struct AssetNameTransform {
    pattern: Regex,
    replacement: String,
}

impl AssetNameTransform {
    pub fn new<S>(pattern: &str, replacement: S) -> Result<Self, TransformConstructionError>
    where
        S: Into<String>,
    {
        let compiled_pattern =
            Regex::new(pattern).map_err(|error| TransformConstructionError::InvalidPattern {
                pattern: pattern.to_string(),
                error: Box::new(error),
            })?;

        Ok(Self {
            pattern: compiled_pattern,
            replacement: replacement.into(),
        })
    }
}

impl ModelVersionTransformation for AssetNameTransform {
    fn name(&self) -> &str {
        "asset-name"
    }

    fn transform(&self, input: &str) -> String {
        self.pattern
            .replace_all(input, self.replacement.as_str())
            .into_owned()
    }
}



#[cfg(test)]
mod test {
    use super::*;
    use crate::{LEGACY_ASSET_NAME_PATTERN, LEGACY_ASSET_NAME_REPLACEMENT};

    #[test]
    fn strips_legacy_dat_extension() {
        let transform =
            AssetNameTransform::new(LEGACY_ASSET_NAME_PATTERN, LEGACY_ASSET_NAME_REPLACEMENT)
                .unwrap();

        assert_eq!(transform.transform("assets/abc.dat"), "assets/abc");
        assert_eq!(transform.transform("assets/abc."), "assets/abc");
        assert_eq!(transform.transform("assets/abc.png"), "assets/abc.png");
        assert_eq!(transform.transform("assets/abc"), "assets/abc");
    }

    #[test]
    fn rejects_invalid_patterns() {
        let error = AssetNameTransform::new("(unclosed", "$1").unwrap_err();

        assert!(matches!(
            error,
            TransformConstructionError::InvalidPattern { ref pattern, .. } if pattern == "(unclosed"
        ));
    }
}
