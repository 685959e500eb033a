use crate::launcher::BrowserKind;
use crate::{Error, Result};
use std::path::{Path, PathBuf};

/// Firefox prefs required for a quiet, remotely-debuggable headless run.
const FIREFOX_PREFS: &str = r#"user_pref("browser.shell.checkDefaultBrowser", false);
user_pref("browser.aboutwelcome.enabled", false);
user_pref("browser.sessionstore.resume_from_crash", false);
user_pref("datareporting.policy.dataSubmissionEnabled", false);
user_pref("toolkit.telemetry.reportingpolicy.firstRun", false);
user_pref("devtools.debugger.remote-enabled", true);
user_pref("devtools.chrome.enabled", true);
user_pref("remote.active-protocols", 2);
"#;

/// Manages browser profile directories.
pub struct ProfileManager {
    path: PathBuf,
    is_temporary: bool,
}

impl ProfileManager {
    /// Create a temporary profile that will be deleted on drop.
    pub fn temporary(kind: BrowserKind) -> Result<Self> {
        let temp_dir = tempfile::tempdir().map_err(Error::Io)?;

        let path = temp_dir.keep();
        Self::seed(kind, &path)?;

        Ok(Self {
            path,
            is_temporary: true,
        })
    }

    /// Create or use a persistent profile at the given path.
    pub fn persistent(kind: BrowserKind, path: PathBuf) -> Result<Self> {
        // Create directory if it doesn't exist
        if !path.exists() {
            std::fs::create_dir_all(&path).map_err(Error::Io)?;
        }
        Self::seed(kind, &path)?;

        Ok(Self {
            path,
            is_temporary: false,
        })
    }

    /// Firefox reads prefs from user.js in the profile dir; Chromium needs
    /// nothing beyond the directory itself.
    fn seed(kind: BrowserKind, path: &Path) -> Result<()> {
        if kind == BrowserKind::Firefox {
            std::fs::write(path.join("user.js"), FIREFOX_PREFS).map_err(Error::Io)?;
        }
        Ok(())
    }

    /// Get the profile directory path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Check if this is a temporary profile.
    pub fn is_temporary(&self) -> bool {
        self.is_temporary
    }
}

impl Drop for ProfileManager {
    fn drop(&mut self) {
        if self.is_temporary && self.path.exists() {
            let _ = std::fs::remove_dir_all(&self.path);
        }
    }
}
