//! Platform-specific filesystem path helpers.

use std::ffi::OsString;
use std::path::PathBuf;

/// Path to Promptlet's debug log file, in the OS temp directory.
#[must_use]
pub fn log_path() -> PathBuf {
    std::env::temp_dir().join("promptlet.log")
}

#[cfg(not(windows))]
fn home_dir_from(var_os: &mut impl FnMut(&'static str) -> Option<OsString>) -> Option<PathBuf> {
    var_os("HOME").map(PathBuf::from)
}

/// Like [`config_dir`], reading variables through `var_os`.
#[must_use]
#[cfg(windows)]
pub fn config_dir_with(
    var_os: &mut impl FnMut(&'static str) -> Option<OsString>,
) -> Option<PathBuf> {
    var_os("APPDATA").map(PathBuf::from)
}

/// Like [`config_dir`], reading variables through `var_os`.
#[must_use]
#[cfg(not(windows))]
pub fn config_dir_with(
    var_os: &mut impl FnMut(&'static str) -> Option<OsString>,
) -> Option<PathBuf> {
    var_os("XDG_CONFIG_HOME").map(PathBuf::from).or_else(|| {
        home_dir_from(var_os).map(|home| {
            #[cfg(target_os = "macos")]
            {
                home.join("Library").join("Application Support")
            }

            #[cfg(not(target_os = "macos"))]
            {
                home.join(".config")
            }
        })
    })
}

/// Like [`data_local_dir`], reading variables through `var_os`.
#[must_use]
#[cfg(windows)]
pub fn data_local_dir_with(
    var_os: &mut impl FnMut(&'static str) -> Option<OsString>,
) -> Option<PathBuf> {
    var_os("LOCALAPPDATA")
        .or_else(|| var_os("APPDATA"))
        .map(PathBuf::from)
}

/// Like [`data_local_dir`], reading variables through `var_os`.
#[must_use]
#[cfg(not(windows))]
pub fn data_local_dir_with(
    var_os: &mut impl FnMut(&'static str) -> Option<OsString>,
) -> Option<PathBuf> {
    var_os("XDG_DATA_HOME").map(PathBuf::from).or_else(|| {
        home_dir_from(var_os).map(|home| {
            #[cfg(target_os = "macos")]
            {
                home.join("Library").join("Application Support")
            }

            #[cfg(not(target_os = "macos"))]
            {
                home.join(".local").join("share")
            }
        })
    })
}

/// Resolve the user configuration directory for the current platform.
#[must_use]
pub fn config_dir() -> Option<PathBuf> {
    config_dir_with(&mut |key| std::env::var_os(key))
}

/// Resolve the local application data directory for the current platform.
#[must_use]
pub fn data_local_dir() -> Option<PathBuf> {
    data_local_dir_with(&mut |key| std::env::var_os(key))
}
