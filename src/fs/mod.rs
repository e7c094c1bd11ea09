//! Filesystem module.
//!
//! Provides:
//! - Path and directory management
//! - Filename generation for drops and collections

pub mod naming;
pub mod paths;

pub use naming::{collection_folder_name, drop_file_stem, sanitize_path_component};
pub use paths::{dir_exists, ensure_dir, with_suffix};
