use std::env;
use std::path::PathBuf;

const APP_DIR: &str = "roomsched";

/// Platform data directories searched for the seed file, in order.
pub fn data_dirs() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    #[cfg(all(unix, not(target_os = "macos")))]
    {
        if let Ok(data_home) = env::var("XDG_DATA_HOME") {
            paths.push(PathBuf::from(data_home));
        } else if let Some(home) = env::home_dir() {
            paths.push(home.join(".local/share"));
        }
    }
    #[cfg(target_os = "macos")]
    {
        if let Some(home) = env::home_dir() {
            paths.push(home.join("Library/Application Support"));
        }
    }
    #[cfg(target_os = "windows")]
    {
        if let Ok(local) = env::var("LOCALAPPDATA") {
            paths.push(PathBuf::from(local));
        } else if let Ok(roaming) = env::var("APPDATA") {
            paths.push(PathBuf::from(roaming));
        }
    }

    paths.into_iter().map(|base| base.join(APP_DIR)).collect()
}
