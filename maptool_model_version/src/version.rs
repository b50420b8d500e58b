use std::{cmp::Ordering, convert::Infallible, fmt::Display, hash::Hash, str::FromStr};

use thiserror::Error;


/// Version used when a version string is missing or cleans down to nothing.
pub const DEFAULT_EMPTY_VERSION: &str = "0";


/// Failed to strictly parse a model version (see [`ModelVersion::parse_strict`]).
#[derive(Error, Debug, PartialEq, Eq)]
#[error("\"{}\" is not a valid model version (expected e.g. \"1.3.51\")", .raw_version)]
pub struct InvalidModelVersionError {
    pub raw_version: String,
}


/// Removes any characters from a version string other than ASCII digits and periods.
///
/// If the version is missing or the cleaning results in an empty string,
/// [`DEFAULT_EMPTY_VERSION`] (`"0"`) is returned instead.
///
/// ```
/// # use maptool_model_version::clean_version_number;
/// assert_eq!(clean_version_number(Some("1.3.b51")), "1.3.51");
/// assert_eq!(clean_version_number(Some("development")), "0");
/// assert_eq!(clean_version_number(None), "0");
/// ```
pub fn clean_version_number(version: Option<&str>) -> String {
    let Some(version) = version else {
        return DEFAULT_EMPTY_VERSION.to_string();
    };

    let cleaned: String = version
        .chars()
        .filter(|character| character.is_ascii_digit() || *character == '.')
        .collect();

    if cleaned.is_empty() {
        DEFAULT_EMPTY_VERSION.to_string()
    } else {
        cleaned
    }
}


fn parse_component(component: &str) -> u64 {
    component.trim().parse::<u64>().unwrap_or(0)
}

/// Splits a version into numeric components.
///
/// A version that starts with a period (or has none) is a single component,
/// so `.5` parses as `[0]`, not `[0, 5]`.
fn parse_components(version: &str) -> Vec<u64> {
    match version.find('.') {
        Some(first_period_index) if first_period_index > 0 => {
            version.split('.').map(parse_component).collect()
        }
        _ => vec![parse_component(version)],
    }
}

fn compare_components(first: &[u64], second: &[u64]) -> Ordering {
    let component_count = first.len().max(second.len());

    for index in 0..component_count {
        let first_value = first.get(index).copied().unwrap_or(0);
        let second_value = second.get(index).copied().unwrap_or(0);

        match first_value.cmp(&second_value) {
            Ordering::Equal => continue,
            other => return other,
        }
    }

    Ordering::Equal
}


/// Returns `true` if `first_version` comes strictly before `second_version`.
///
/// Versions look like `1.3.51` or `1.3.64.1` and may have any number of period-separated
/// components. A component that cannot be parsed as an integer is treated as `0`, and the
/// shorter version is padded with `0` components, so `1.3` and `1.3.0` are equal.
///
/// A blank `first_version` is unknown and therefore before everything.
/// A blank `second_version` means there is nothing to compare against, so nothing is before it.
pub fn is_before(first_version: &str, second_version: &str) -> bool {
    if first_version.trim().is_empty() {
        return true;
    }
    if second_version.trim().is_empty() {
        return false;
    }

    compare_components(
        &parse_components(first_version),
        &parse_components(second_version),
    ) == Ordering::Less
}



/// A cleaned model version (see [`clean_version_number`]).
///
/// Ordering and equality are numeric and component-wise, with missing trailing
/// components counting as zero.
#[derive(Clone, Debug)]
pub struct ModelVersion {
    cleaned: String,
    components: Vec<u64>,
}

impl ModelVersion {
    /// Cleans the given version string and parses it. Never fails.
    pub fn new<S>(raw_version: S) -> Self
    where
        S: AsRef<str>,
    {
        let cleaned = clean_version_number(Some(raw_version.as_ref()));
        let components = parse_components(&cleaned);

        Self {
            cleaned,
            components,
        }
    }

    /// Same as [`Self::new`], but for optional version strings (e.g. a property
    /// that might be missing from a file). `None` results in version `0`.
    pub fn from_optional(raw_version: Option<&str>) -> Self {
        Self::new(clean_version_number(raw_version))
    }

    /// Parses a version that must only consist of non-empty numeric components
    /// separated by periods. Nothing is cleaned away.
    pub fn parse_strict(raw_version: &str) -> Result<Self, InvalidModelVersionError> {
        let is_valid = !raw_version.is_empty()
            && raw_version
                .split('.')
                .all(|component| !component.is_empty() && component.parse::<u64>().is_ok());

        if !is_valid {
            return Err(InvalidModelVersionError {
                raw_version: raw_version.to_string(),
            });
        }

        Ok(Self::new(raw_version))
    }

    pub fn as_str(&self) -> &str {
        &self.cleaned
    }

    pub fn components(&self) -> &[u64] {
        &self.components
    }

    /// Returns `true` if this version comes strictly before `other`.
    pub fn is_before(&self, other: &ModelVersion) -> bool {
        self < other
    }
}

impl FromStr for ModelVersion {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl Display for ModelVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.cleaned)
    }
}

impl PartialEq for ModelVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ModelVersion {}

impl PartialOrd for ModelVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ModelVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        compare_components(&self.components, &other.components)
    }
}

impl Hash for ModelVersion {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        // Trailing zero components must not influence the hash, since `1.3 == 1.3.0`.
        let significant_length = self
            .components
            .iter()
            .rposition(|component| *component != 0)
            .map(|index| index + 1)
            .unwrap_or(0);

        self.components[..significant_length].hash(state);
    }
}



#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn cleans_version_numbers() {
        assert_eq!(clean_version_number(Some("1.3.51")), "1.3.51");
        assert_eq!(clean_version_number(Some("1.3b51")), "1.351");
        assert_eq!(clean_version_number(Some("v1.4.1-beta")), "1.4.1");
        assert_eq!(clean_version_number(Some("")), "0");
        assert_eq!(clean_version_number(Some("DEVELOPMENT")), "0");
        assert_eq!(clean_version_number(None), "0");
    }

    #[test]
    fn compares_versions_component_wise() {
        assert!(is_before("1.3.50", "1.3.51"));
        assert!(is_before("1.3.9", "1.3.10"));
        assert!(is_before("1.3.53", "1.3.53.1"));
        assert!(is_before("1.3", "1.3.0.1"));

        assert!(!is_before("1.3.51", "1.3.51"));
        assert!(!is_before("1.3.51", "1.3.50"));
        assert!(!is_before("1.3", "1.3.0"));
        assert!(!is_before("2", "1.99.99"));
    }

    #[test]
    fn blank_versions_are_handled() {
        assert!(is_before("", "1.3.51"));
        assert!(is_before("   ", ""));
        assert!(!is_before("1.3.51", ""));
    }

    #[test]
    fn unparseable_components_count_as_zero() {
        assert!(is_before("1.x.5", "1.1"));
        assert!(!is_before("1.3.x", "1.3"));
    }

    #[test]
    fn leading_period_makes_a_single_component() {
        assert_eq!(parse_components(".5"), vec![0]);
        assert_eq!(parse_components(".5.1"), vec![0]);
        assert_eq!(parse_components("5"), vec![5]);
        assert_eq!(parse_components("1.3.51"), vec![1, 3, 51]);

        assert!(!is_before("0.1", ".5"));
        assert!(is_before(".5", "0.1"));
        assert_eq!(ModelVersion::new(".5"), ModelVersion::new("0"));
    }

    #[test]
    fn model_versions_are_ordered_numerically() {
        let mut versions = vec![
            ModelVersion::new("1.3.78"),
            ModelVersion::new("1.3.8"),
            ModelVersion::new("1.3.51"),
            ModelVersion::new("1.10"),
        ];
        versions.sort();

        let sorted: Vec<&str> = versions.iter().map(ModelVersion::as_str).collect();
        assert_eq!(sorted, vec!["1.3.8", "1.3.51", "1.3.78", "1.10"]);

        assert_eq!(ModelVersion::new("1.3"), ModelVersion::new("1.3.0"));
        assert!(ModelVersion::new("1.3.50").is_before(&ModelVersion::new("1.3.51")));
    }

    #[test]
    fn missing_version_becomes_zero() {
        let version = ModelVersion::from_optional(None);

        assert_eq!(version.as_str(), "0");
        assert_eq!(version.components(), &[0]);
    }

    #[test]
    fn strict_parsing_rejects_garbage() {
        assert!(ModelVersion::parse_strict("1.4.1").is_ok());
        assert!(ModelVersion::parse_strict("1.4.").is_err());
        assert!(ModelVersion::parse_strict("1.4b1").is_err());
        assert!(ModelVersion::parse_strict("").is_err());
    }
}
