//! Model versioning for serialized MapTool data.
//!
//! Every packed file records the version of the program (and, for campaigns,
//! of the campaign model) it was written with. When the model changes in an
//! incompatible way, a [`ModelVersionTransformation`] is registered with a
//! [`ModelVersionManager`] under the version in which the change was introduced.
//! Loading a file written by an earlier version then runs every transformation
//! registered *after* the file's version over the serialized text, in version order.
//!
//! Your starting point should probably be [`ModelVersionManager::transform`].

mod manager;
mod transformation;
mod version;

pub use manager::*;
pub use transformation::*;
pub use version::*;
