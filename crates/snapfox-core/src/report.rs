use crate::Result;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Summary of a single capture run.
#[derive(Debug, Clone, Serialize)]
pub struct CaptureReport {
    /// URL requested on the command line (after scheme normalization).
    pub requested_url: String,
    /// URL the page ended up on after redirects.
    pub final_url: String,
    /// Page title at capture time, empty when the page has none.
    pub page_title: String,
    /// Path the screenshot was written to.
    pub output_path: PathBuf,
    /// Screenshot size in bytes.
    pub bytes_written: usize,
    /// Engine variant that produced the capture.
    pub browser: String,
    /// RFC 3339 UTC timestamp of the capture.
    pub captured_at: String,
    /// Wall-clock duration of the whole run in milliseconds.
    pub duration_ms: u64,
}

impl CaptureReport {
    /// Current time in the format `captured_at` expects.
    pub fn now() -> String {
        chrono::Utc::now().to_rfc3339()
    }

    /// Render as pretty JSON for `--json` output.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the JSON report next to the screenshot.
    pub fn write_to(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_json_pretty()?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_report() -> CaptureReport {
        CaptureReport {
            requested_url: "https://example.com/".to_string(),
            final_url: "https://example.com/home".to_string(),
            page_title: "Example".to_string(),
            output_path: PathBuf::from("example.png"),
            bytes_written: 12_345,
            browser: "firefox".to_string(),
            captured_at: CaptureReport::now(),
            duration_ms: 4_200,
        }
    }

    #[test]
    fn test_report_serializes_to_json() {
        let report = sample_report();
        let json = report.to_json_pretty().unwrap();

        assert!(json.contains("\"requested_url\": \"https://example.com/\""));
        assert!(json.contains("\"final_url\": \"https://example.com/home\""));
        assert!(json.contains("\"page_title\": \"Example\""));
        assert!(json.contains("\"bytes_written\": 12345"));
        assert!(json.contains("\"browser\": \"firefox\""));
    }

    #[test]
    fn test_report_writes_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");

        sample_report().write_to(&path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("duration_ms"));
    }
}
