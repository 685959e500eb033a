use anyhow::Result;
use console::style;
use snapfox_browser::{BrowserFinder, BrowserKind, BrowserLauncher, DebugSession, ProfileManager};
use snapfox_core::report::CaptureReport;
use snapfox_core::target::Target;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Grace period between the protocol-level close and a forced kill.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(5);

#[allow(clippy::too_many_arguments)]
pub fn execute(
    url: &str,
    output: &Path,
    browser: BrowserKind,
    browser_path: Option<PathBuf>,
    profile: Option<String>,
    headless: bool,
    timeout_secs: u64,
    json: bool,
) -> Result<()> {
    // Create tokio runtime for async operations
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    let started = Instant::now();

    let result = runtime.block_on(async {
        // Step 1: Validate the target URL
        let target = Target::parse(url)?;

        // Step 2: Find the browser binary
        println!("🔍 Locating {}...", browser);
        let finder = BrowserFinder::new(browser, browser_path);
        let binary = finder.find()?;
        println!("✅ Found {} at: {}", browser, binary.display());

        // Step 3: Setup profile
        let profile_manager = if let Some(profile_name) = profile {
            let profile_path = dirs::home_dir()
                .ok_or_else(|| anyhow::anyhow!("Could not determine home directory"))?
                .join(".snapfox")
                .join("profiles")
                .join(profile_name);

            println!("📁 Using profile: {}", profile_path.display());
            ProfileManager::persistent(browser, profile_path)?
        } else {
            println!("📁 Using temporary profile");
            ProfileManager::temporary(browser)?
        };

        // Step 4: Launch the browser
        let launcher = BrowserLauncher::new(
            browser,
            binary,
            profile_manager.path().to_path_buf(),
            headless,
        );
        let debugging_port = launcher.debugging_port();

        println!("🚀 Launching {}...", browser);
        let mut process = launcher.launch()?;
        tracing::debug!("browser started with pid {}", process.id());

        // Step 5: Connect to the debugging port
        let session = DebugSession::connect(debugging_port).await?;

        // Step 6: Open a page and navigate
        let page = session.open_page().await?;
        println!("🌐 Navigating to {}...", style(target.as_str()).cyan());
        session
            .navigate(&page, target.as_str(), Duration::from_secs(timeout_secs))
            .await?;

        // Step 7: Capture the screenshot
        let info = session.page_info(&page, target.as_str()).await;
        let bytes = session.screenshot(&page).await?;
        std::fs::write(output, &bytes).map_err(|e| {
            anyhow::anyhow!("Failed to write screenshot to {}: {}", output.display(), e)
        })?;
        println!(
            "📸 Screenshot written to: {} ({} bytes)",
            output.display(),
            bytes.len()
        );

        // Step 8: Close the browser (best-effort - the useful work is done)
        if let Err(e) = session.close().await {
            tracing::warn!("browser close failed (non-fatal): {}", e);
        }
        if let Err(e) = process.wait_for_exit(SHUTDOWN_GRACE).await {
            tracing::warn!("browser shutdown incomplete: {}", e);
        }

        // Step 9: Report
        let report = CaptureReport {
            requested_url: target.as_str().to_string(),
            final_url: info.final_url,
            page_title: info.page_title,
            output_path: output.to_path_buf(),
            bytes_written: bytes.len(),
            browser: browser.to_string(),
            captured_at: CaptureReport::now(),
            duration_ms: started.elapsed().as_millis() as u64,
        };

        if json {
            println!("{}", report.to_json_pretty()?);
        } else if !report.page_title.is_empty() {
            println!("   Page title: {}", report.page_title);
        }

        println!("{}", style("✅ Done").green());

        Ok(())
    });

    // Explicitly shutdown runtime with timeout to prevent hanging on blocking tasks
    runtime.shutdown_timeout(Duration::from_millis(100));

    result
}
