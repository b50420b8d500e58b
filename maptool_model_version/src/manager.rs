use std::{
    collections::BTreeMap,
    sync::{Arc, PoisonError, RwLock},
};

use tracing::debug;

use crate::{ModelVersion, ModelVersionTransformation};


/// A transformation that was run by [`ModelVersionManager::transform_with_details`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppliedTransformation {
    /// Version the transformation was registered under.
    pub registered_version: ModelVersion,

    /// Name of the transformation (see [`ModelVersionTransformation::name`]).
    pub name: String,
}


/// Output of [`ModelVersionManager::transform_with_details`].
#[derive(Clone, Debug)]
pub struct TransformationOutcome {
    /// The upgraded text.
    pub output: String,

    /// Every transformation that was run, in the order it was run.
    pub applied: Vec<AppliedTransformation>,
}

impl TransformationOutcome {
    pub fn was_anything_applied(&self) -> bool {
        !self.applied.is_empty()
    }
}


type RegisteredTransformations = BTreeMap<ModelVersion, Vec<Arc<dyn ModelVersionTransformation>>>;


/// Holds model version transformations and applies them to data written by older versions.
///
/// A transformation registered under e.g. `1.3.51` is run for any file version
/// strictly before that, such as `1.3.50` or `1.3.50.1`, but not for `1.3.51` itself.
/// Put differently, the version to register under is the model version that
/// introduced the change.
///
/// Registered versions are applied in ascending (numeric, component-wise) order,
/// and transformations registered under the same version are applied in the order
/// they were registered.
///
/// The manager can be shared between threads; registration takes a write lock,
/// everything else a read lock.
#[derive(Default)]
pub struct ModelVersionManager {
    transformations: RwLock<RegisteredTransformations>,
}

impl ModelVersionManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers one or more transformations to run when processing data
    /// from before `version` (only digits and periods of `version` are kept).
    pub fn register_transformation<S, I>(&self, version: S, transformations: I)
    where
        S: AsRef<str>,
        I: IntoIterator<Item = Arc<dyn ModelVersionTransformation>>,
    {
        let version = ModelVersion::new(version);

        let mut registered = self
            .transformations
            .write()
            .unwrap_or_else(PoisonError::into_inner);

        let transformations_for_version = registered.entry(version.clone()).or_default();

        for transformation in transformations {
            debug!(
                version = %version,
                transformation = transformation.name(),
                "Registered model version transformation."
            );

            transformations_for_version.push(transformation);
        }
    }

    /// Returns all versions that have at least one transformation registered, in ascending order.
    pub fn registered_versions(&self) -> Vec<ModelVersion> {
        self.transformations
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect()
    }

    /// Returns `true` if some transformation would run for data written with `file_version`.
    ///
    /// This lets callers skip reading the whole file into memory when it is already up to date.
    pub fn is_transformation_required(&self, file_version: &str) -> bool {
        let file_version = ModelVersion::new(file_version);

        self.transformations
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .any(|registered_version| file_version.is_before(registered_version))
    }

    /// Returns the registered versions whose transformations would run for data
    /// written with `file_version`, in ascending order.
    pub fn pending_versions(&self, file_version: &str) -> Vec<ModelVersion> {
        let file_version = ModelVersion::new(file_version);

        self.transformations
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .filter(|registered_version| file_version.is_before(registered_version))
            .cloned()
            .collect()
    }

    /// Applies all transformations registered for versions after `file_version` to `input`.
    pub fn transform(&self, input: &str, file_version: &str) -> String {
        self.transform_with_details(input, file_version).output
    }

    /// Same as [`Self::transform`], but additionally reports which transformations were run.
    pub fn transform_with_details(&self, input: &str, file_version: &str) -> TransformationOutcome {
        let file_version = ModelVersion::new(file_version);

        let registered = self
            .transformations
            .read()
            .unwrap_or_else(PoisonError::into_inner);

        let mut output = input.to_string();
        let mut applied = Vec::new();

        for (registered_version, transformations) in registered.range(file_version.clone()..) {
            if !file_version.is_before(registered_version) {
                continue;
            }

            for transformation in transformations {
                debug!(
                    file_version = %file_version,
                    registered_version = %registered_version,
                    transformation = transformation.name(),
                    "Applying model version transformation."
                );

                output = transformation.transform(&output);

                applied.push(AppliedTransformation {
                    registered_version: registered_version.clone(),
                    name: transformation.name().to_string(),
                });
            }
        }

        TransformationOutcome { output, applied }
    }
}



#[cfg(test)]
mod test {
    use super::*;

    struct AppendTransformation {
        name: &'static str,
    }

    impl ModelVersionTransformation for AppendTransformation {
        fn name(&self) -> &str {
            self.name
        }

        fn transform(&self, input: &str) -> String {
            format!("{}[{}]", input, self.name)
        }
    }

    fn append(name: &'static str) -> Arc<dyn ModelVersionTransformation> {
        Arc::new(AppendTransformation { name })
    }

    fn prepared_manager() -> ModelVersionManager {
        let manager = ModelVersionManager::new();

        // Registered out of order on purpose.
        manager.register_transformation("1.3.78", [append("c")]);
        manager.register_transformation("1.3.51", [append("a1"), append("a2")]);
        manager.register_transformation("1.3.9", [append("early")]);
        manager.register_transformation("1.3.75", [append("b")]);
        manager.register_transformation("1.3.51", [append("a3")]);

        manager
    }

    #[test]
    fn applies_later_transformations_in_order() {
        let manager = prepared_manager();

        assert_eq!(
            manager.transform("x", "1.3.50"),
            "x[a1][a2][a3][b][c]"
        );
        assert_eq!(manager.transform("x", "1.3.51"), "x[b][c]");
        assert_eq!(manager.transform("x", "1.3.76"), "x[c]");
        assert_eq!(manager.transform("x", "1.3.78"), "x");
        assert_eq!(manager.transform("x", "1.4.1"), "x");
    }

    #[test]
    fn versions_are_ordered_numerically_not_lexically() {
        let manager = prepared_manager();

        assert_eq!(manager.transform("x", "1.3.8"), "x[early][a1][a2][a3][b][c]");
        assert_eq!(manager.transform("x", "1.3.10"), "x[a1][a2][a3][b][c]");
    }

    #[test]
    fn unknown_version_receives_every_transformation() {
        let manager = prepared_manager();

        assert_eq!(manager.transform("x", ""), "x[early][a1][a2][a3][b][c]");
        assert_eq!(manager.transform("x", "unknown"), "x[early][a1][a2][a3][b][c]");
    }

    #[test]
    fn reports_whether_transformation_is_required() {
        let manager = prepared_manager();

        assert!(manager.is_transformation_required("1.3.50"));
        assert!(manager.is_transformation_required("1.3.77.9"));
        assert!(!manager.is_transformation_required("1.3.78"));
        assert!(!manager.is_transformation_required("1.3.78.0"));
        assert!(!manager.is_transformation_required("2.0"));

        assert!(!ModelVersionManager::new().is_transformation_required("0"));
    }

    #[test]
    fn lists_registered_versions() {
        let manager = prepared_manager();

        let versions: Vec<String> = manager
            .registered_versions()
            .iter()
            .map(ToString::to_string)
            .collect();

        assert_eq!(versions, vec!["1.3.9", "1.3.51", "1.3.75", "1.3.78"]);
    }

    #[test]
    fn lists_pending_versions() {
        let manager = prepared_manager();

        let pending: Vec<String> = manager
            .pending_versions("1.3.51")
            .iter()
            .map(ToString::to_string)
            .collect();

        assert_eq!(pending, vec!["1.3.75", "1.3.78"]);
        assert!(manager.pending_versions("1.3.78").is_empty());
    }

    #[test]
    fn details_list_applied_transformations() {
        let manager = prepared_manager();

        let outcome = manager.transform_with_details("x", "1.3.75");

        assert!(outcome.was_anything_applied());
        assert_eq!(outcome.output, "x[c]");
        assert_eq!(
            outcome.applied,
            vec![AppliedTransformation {
                registered_version: ModelVersion::new("1.3.78"),
                name: "c".to_string(),
            }]
        );

        assert!(!manager
            .transform_with_details("x", "1.3.78")
            .was_anything_applied());
    }

    #[test]
    fn can_be_shared_between_threads() {
        let manager = Arc::new(prepared_manager());

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let manager = Arc::clone(&manager);
                std::thread::spawn(move || manager.transform("x", "1.3.76"))
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), "x[c]");
        }
    }
}
