use crate::{Error, Result};
use std::path::PathBuf;
use std::process::{Child, Command, Stdio};
use std::time::Duration;

/// Browser engine variant to launch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowserKind {
    Firefox,
    Chromium,
}

impl BrowserKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BrowserKind::Firefox => "firefox",
            BrowserKind::Chromium => "chromium",
        }
    }
}

impl std::fmt::Display for BrowserKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Manages browser process startup.
pub struct BrowserLauncher {
    kind: BrowserKind,
    binary_path: PathBuf,
    profile_path: PathBuf,
    headless: bool,
    debugging_port: u16,
}

impl BrowserLauncher {
    /// Create a new BrowserLauncher.
    pub fn new(
        kind: BrowserKind,
        binary_path: PathBuf,
        profile_path: PathBuf,
        headless: bool,
    ) -> Self {
        Self {
            kind,
            binary_path,
            profile_path,
            headless,
            debugging_port: 9222,
        }
    }

    /// Launch the browser process.
    pub fn launch(&self) -> Result<BrowserProcess> {
        let args = self.build_args();

        tracing::debug!(
            "launching {} ({}) with args: {:?}",
            self.kind,
            self.binary_path.display(),
            args
        );

        let child = Command::new(&self.binary_path)
            .args(&args)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| Error::Launch(format!("Failed to launch {}: {}", self.kind, e)))?;

        Ok(BrowserProcess::new(child))
    }

    /// Build the variant-specific command-line arguments.
    fn build_args(&self) -> Vec<String> {
        match self.kind {
            BrowserKind::Firefox => {
                let mut args = vec![
                    "--remote-debugging-port".to_string(),
                    self.debugging_port.to_string(),
                    "--profile".to_string(),
                    self.profile_path.display().to_string(),
                    "--no-remote".to_string(),
                    "--new-instance".to_string(),
                ];
                if self.headless {
                    args.push("--headless".to_string());
                }
                args.push("about:blank".to_string());
                args
            }
            BrowserKind::Chromium => {
                let mut args = vec![
                    format!("--remote-debugging-port={}", self.debugging_port),
                    "--no-first-run".to_string(),
                    "--no-default-browser-check".to_string(),
                    format!("--user-data-dir={}", self.profile_path.display()),
                ];
                if self.headless {
                    args.push("--headless=new".to_string());
                }
                args.push("about:blank".to_string());
                args
            }
        }
    }

    /// Get the debugging port.
    pub fn debugging_port(&self) -> u16 {
        self.debugging_port
    }
}

/// A launched browser process.
///
/// Kills the process on drop unless its exit has already been observed, so a
/// failure between launch and close cannot leak a running browser.
pub struct BrowserProcess {
    child: Child,
    exited: bool,
}

impl BrowserProcess {
    fn new(child: Child) -> Self {
        Self {
            child,
            exited: false,
        }
    }

    /// OS process id.
    pub fn id(&self) -> u32 {
        self.child.id()
    }

    /// Give the browser `grace` to exit on its own after a protocol-level
    /// close, then force-kill it.
    pub async fn wait_for_exit(&mut self, grace: Duration) -> Result<()> {
        let deadline = tokio::time::Instant::now() + grace;
        loop {
            if let Some(status) = self.child.try_wait().map_err(Error::Io)? {
                tracing::debug!("browser exited with status {}", status);
                self.exited = true;
                return Ok(());
            }
            if tokio::time::Instant::now() >= deadline {
                tracing::warn!("browser did not exit within {:?}, killing", grace);
                return self.kill();
            }
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
    }

    /// Force-kill the process and reap it.
    pub fn kill(&mut self) -> Result<()> {
        self.child.kill().map_err(Error::Io)?;
        self.child.wait().map_err(Error::Io)?;
        self.exited = true;
        Ok(())
    }
}

impl Drop for BrowserProcess {
    fn drop(&mut self) {
        if self.exited {
            return;
        }
        match self.child.try_wait() {
            Ok(Some(_)) => {}
            _ => {
                tracing::warn!("browser process {} still running, killing", self.child.id());
                let _ = self.child.kill();
                let _ = self.child.wait();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_firefox_launcher_builds_args() {
        let launcher = BrowserLauncher {
            kind: BrowserKind::Firefox,
            binary_path: PathBuf::from("/usr/bin/firefox"),
            profile_path: PathBuf::from("/tmp/profile"),
            headless: true,
            debugging_port: 9222,
        };

        let args = launcher.build_args();

        assert!(args.contains(&"--remote-debugging-port".to_string()));
        assert!(args.contains(&"9222".to_string()));
        assert!(args.contains(&"--profile".to_string()));
        assert!(args.contains(&"/tmp/profile".to_string()));
        assert!(args.contains(&"--no-remote".to_string()));
        assert!(args.contains(&"--headless".to_string()));
        assert_eq!(args.last(), Some(&"about:blank".to_string()));
    }

    #[test]
    fn test_chromium_launcher_builds_args() {
        let launcher = BrowserLauncher {
            kind: BrowserKind::Chromium,
            binary_path: PathBuf::from("/usr/bin/chromium"),
            profile_path: PathBuf::from("/tmp/profile"),
            headless: true,
            debugging_port: 9222,
        };

        let args = launcher.build_args();

        assert!(args.contains(&"--remote-debugging-port=9222".to_string()));
        assert!(args.contains(&"--no-first-run".to_string()));
        assert!(args.contains(&"--no-default-browser-check".to_string()));
        assert!(args.iter().any(|a| a.starts_with("--user-data-dir=")));
        assert!(args.contains(&"--headless=new".to_string()));
    }

    #[test]
    fn test_headful_launcher_omits_headless_flag() {
        let launcher = BrowserLauncher {
            kind: BrowserKind::Firefox,
            binary_path: PathBuf::from("/usr/bin/firefox"),
            profile_path: PathBuf::from("/tmp/profile"),
            headless: false,
            debugging_port: 9222,
        };

        let args = launcher.build_args();

        assert!(!args.iter().any(|a| a.contains("headless")));
    }

    #[test]
    fn test_browser_kind_display() {
        assert_eq!(BrowserKind::Firefox.to_string(), "firefox");
        assert_eq!(BrowserKind::Chromium.to_string(), "chromium");
    }
}
