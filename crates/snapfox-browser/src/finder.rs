use crate::launcher::BrowserKind;
use crate::{Error, Result};
use std::path::{Path, PathBuf};

/// Locates a browser binary on the system for a given engine variant.
pub struct BrowserFinder {
    kind: BrowserKind,
    custom_path: Option<PathBuf>,
}

impl BrowserFinder {
    /// Create a new BrowserFinder with optional custom path.
    pub fn new(kind: BrowserKind, custom_path: Option<PathBuf>) -> Self {
        Self { kind, custom_path }
    }

    /// Find the binary, checking custom path first, then platform defaults,
    /// then a $PATH lookup.
    pub fn find(&self) -> Result<PathBuf> {
        // Try custom path first
        if let Some(ref path) = self.custom_path {
            return self.validate_path(path);
        }

        // Try platform-specific default paths
        for path in Self::default_paths(self.kind) {
            if let Ok(valid_path) = self.validate_path(&path) {
                return Ok(valid_path);
            }
        }

        // Fall back to whatever is on $PATH
        for name in Self::binary_names(self.kind) {
            if let Ok(path) = which::which(name) {
                return Ok(path);
            }
        }

        Err(Error::Launch(format!(
            "{} not found. Checked: {}. Use --browser-path to specify location.",
            self.kind,
            Self::default_paths(self.kind)
                .iter()
                .map(|p| p.display().to_string())
                .collect::<Vec<_>>()
                .join(", ")
        )))
    }

    /// Binary names probed on $PATH per engine variant.
    fn binary_names(kind: BrowserKind) -> &'static [&'static str] {
        match kind {
            BrowserKind::Firefox => &["firefox", "firefox-esr"],
            BrowserKind::Chromium => &["google-chrome", "chromium", "chromium-browser"],
        }
    }

    /// Platform-specific default install locations per engine variant.
    fn default_paths(kind: BrowserKind) -> Vec<PathBuf> {
        #[cfg(target_os = "macos")]
        return match kind {
            BrowserKind::Firefox => vec![PathBuf::from(
                "/Applications/Firefox.app/Contents/MacOS/firefox",
            )],
            BrowserKind::Chromium => vec![
                PathBuf::from("/Applications/Google Chrome.app/Contents/MacOS/Google Chrome"),
                PathBuf::from("/Applications/Chromium.app/Contents/MacOS/Chromium"),
            ],
        };

        #[cfg(target_os = "linux")]
        return match kind {
            BrowserKind::Firefox => vec![
                PathBuf::from("/usr/bin/firefox"),
                PathBuf::from("/usr/bin/firefox-esr"),
                PathBuf::from("/snap/bin/firefox"),
            ],
            BrowserKind::Chromium => vec![
                PathBuf::from("/usr/bin/google-chrome"),
                PathBuf::from("/usr/bin/chromium"),
                PathBuf::from("/usr/bin/chromium-browser"),
            ],
        };

        #[cfg(target_os = "windows")]
        return match kind {
            BrowserKind::Firefox => vec![
                PathBuf::from(r"C:\Program Files\Mozilla Firefox\firefox.exe"),
                PathBuf::from(r"C:\Program Files (x86)\Mozilla Firefox\firefox.exe"),
            ],
            BrowserKind::Chromium => vec![
                PathBuf::from(r"C:\Program Files\Google\Chrome\Application\chrome.exe"),
                PathBuf::from(r"C:\Program Files (x86)\Google\Chrome\Application\chrome.exe"),
            ],
        };

        #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
        {
            let _ = kind;
            return vec![];
        }
    }

    /// Validate that a path exists and is executable.
    fn validate_path(&self, path: &Path) -> Result<PathBuf> {
        if !path.exists() {
            return Err(Error::Launch(format!(
                "{} not found at: {}",
                self.kind,
                path.display()
            )));
        }

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let metadata = std::fs::metadata(path).map_err(Error::Io)?;
            let permissions = metadata.permissions();
            if permissions.mode() & 0o111 == 0 {
                return Err(Error::Launch(format!(
                    "{} binary not executable: {}",
                    self.kind,
                    path.display()
                )));
            }
        }

        Ok(path.to_path_buf())
    }
}
