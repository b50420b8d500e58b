use serde::Serialize;
use serde_json::Value;


/// Gives a type a generic JSON-tree view of its own fields.
///
/// Anything that implements [`Serialize`] gets this for free; the only failure modes
/// are the ones of `serde_json` itself (e.g. a map with non-string keys).
pub trait ApiData: Serialize {
    fn to_json(&self) -> Result<Value, serde_json::Error> {
        serde_json::to_value(self)
    }
}

impl<T> ApiData for T where T: Serialize + ?Sized {}
