use std::{io, path::PathBuf};

use thiserror::Error;

use crate::properties::PropertiesParseError;


#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("\"{}\" is not a directory", .path.display())]
    NotADirectory { path: PathBuf },

    #[error("unable to read \"{}\"", .path.display())]
    UnableToReadFile {
        path: PathBuf,

        #[source]
        error: io::Error,
    },

    #[error("unable to write \"{}\"", .path.display())]
    UnableToWriteFile {
        path: PathBuf,

        #[source]
        error: io::Error,
    },

    #[error("invalid properties file at \"{}\"", .path.display())]
    InvalidProperties {
        path: PathBuf,

        #[source]
        error: PropertiesParseError,
    },

    #[error("output directory \"{}\" already exists", .path.display())]
    OutputDirectoryAlreadyExists { path: PathBuf },

    #[error(
        "output directory \"{}\" is inside the source directory \"{}\"",
        .output_directory_path.display(),
        .source_directory_path.display()
    )]
    OutputDirectoryInsideSource {
        source_directory_path: PathBuf,

        output_directory_path: PathBuf,
    },

    #[error("unable to resolve the canonical path of \"{}\"", .path.display())]
    UnableToResolvePath {
        path: PathBuf,

        #[source]
        error: io::Error,
    },

    #[error(
        "unable to copy \"{}\" to \"{}\"",
        .source_directory_path.display(),
        .destination_directory_path.display()
    )]
    UnableToCopyDirectory {
        source_directory_path: PathBuf,

        destination_directory_path: PathBuf,

        #[source]
        error: fs_more::error::CopyDirectoryError,
    },
}
