//! Output directory preparation and image filename generation.
//!
//! Both extraction pipelines call [`prepare_output_directory`] before any
//! video is opened, and name every written image through
//! [`generate_image_filename`].

use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};

use uuid::Uuid;

use crate::error::FramesiftError;

/// Ensure the output location exists and is a directory.
///
/// Missing path segments are created. The call is idempotent: preparing an
/// already-prepared directory succeeds without side effects.
///
/// # Errors
///
/// - [`FramesiftError::PathConflict`] if the path exists but is not a
///   directory.
/// - [`FramesiftError::PermissionDenied`] if the environment refuses the
///   creation.
/// - [`FramesiftError::DirectoryCreation`] for any other creation failure,
///   carrying the underlying I/O error.
pub fn prepare_output_directory<P: AsRef<Path>>(path: P) -> Result<(), FramesiftError> {
    let path = path.as_ref();

    if path.exists() {
        if path.is_dir() {
            return Ok(());
        }
        return Err(FramesiftError::PathConflict {
            path: path.to_path_buf(),
        });
    }

    match std::fs::create_dir_all(path) {
        Ok(()) => {
            log::debug!("Created output directory {}", path.display());
            Ok(())
        }
        Err(error) => match error.kind() {
            ErrorKind::PermissionDenied => Err(FramesiftError::PermissionDenied {
                path: path.to_path_buf(),
            }),
            // A non-directory appeared at the path between the existence
            // check and the creation attempt.
            ErrorKind::AlreadyExists => Err(FramesiftError::PathConflict {
                path: path.to_path_buf(),
            }),
            _ => Err(FramesiftError::DirectoryCreation {
                path: path.to_path_buf(),
                source: error,
            }),
        },
    }
}

/// Generate a fresh, non-colliding PNG path inside `output_directory`.
///
/// Each call produces a new name; the file itself is not created.
pub fn generate_image_filename<P: AsRef<Path>>(output_directory: P) -> PathBuf {
    output_directory
        .as_ref()
        .join(format!("{}.png", Uuid::new_v4()))
}
