//! Exploded AAR folder layout
//!
//! ```text
//! <folder>/
//!   res.apk            static resource library (optional)
//!   jars/libs/*.jar    bundled local jars
//! ```

use std::path::{Path, PathBuf};
use tracing::debug;

pub const FD_JARS: &str = "jars";
pub const FD_LIBS: &str = "libs";
pub const FN_RESOURCE_STATIC_LIBRARY: &str = "res.apk";

fn local_jar_files(folder: &Path) -> Vec<PathBuf> {
    let libs = folder.join(FD_JARS).join(FD_LIBS);
    let entries = match std::fs::read_dir(&libs) {
        Ok(entries) => entries,
        Err(e) => {
            // Absent in most AARs
            if e.kind() != std::io::ErrorKind::NotFound {
                debug!(folder = %libs.display(), error = %e, "Cannot list local jars");
            }
            return Vec::new();
        }
    };

    let mut jars: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.is_file()
                && path
                    .extension()
                    .map(|ext| ext.eq_ignore_ascii_case("jar"))
                    .unwrap_or(false)
        })
        .collect();
    jars.sort();
    jars
}

/// Local jars relative to the folder (`jars/libs/<name>.jar`), sorted
pub fn find_local_jars_as_strings(folder: &Path) -> Vec<String> {
    local_jar_files(folder)
        .iter()
        .filter_map(|path| path.file_name())
        .map(|name| format!("{}/{}/{}", FD_JARS, FD_LIBS, name.to_string_lossy()))
        .collect()
}

/// Local jars as paths under the folder, sorted
pub fn find_local_jars_as_files(folder: &Path) -> Vec<PathBuf> {
    local_jar_files(folder)
}

/// `res.apk` of the folder, if present
pub fn find_res_static_library(folder: &Path) -> Option<PathBuf> {
    let file = folder.join(FN_RESOURCE_STATIC_LIBRARY);
    file.is_file().then_some(file)
}
