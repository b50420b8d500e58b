/// A single text rewrite that upgrades serialized data written by an older model version.
///
/// Transformations operate on the raw serialized text (usually XML, but a file name
/// works just as well) and have no knowledge of the version they were registered under;
/// that is handled by [`ModelVersionManager`][crate::ModelVersionManager].
pub trait ModelVersionTransformation: Send + Sync {
    /// Short human-readable name, used in logs and upgrade reports.
    fn name(&self) -> &str;

    /// Rewrites `input`, returning the upgraded text.
    ///
    /// Text the transformation does not apply to must be returned unchanged.
    fn transform(&self, input: &str) -> String;
}
