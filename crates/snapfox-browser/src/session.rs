use crate::{Error, Result};
use chromiumoxide::browser::Browser;
use chromiumoxide::cdp::browser_protocol::page::CaptureScreenshotFormat;
use chromiumoxide::page::{Page, ScreenshotParams};
use futures::StreamExt;
use std::time::Duration;
use tokio::task::JoinHandle;

const CONNECT_RETRIES: u32 = 5;
const CONNECT_RETRY_DELAY: Duration = Duration::from_millis(500);

/// A connected remote-debugging session.
///
/// Owns the protocol connection and its event handler task. Pages opened
/// through the session become invalid once [`DebugSession::close`] consumes it.
pub struct DebugSession {
    browser: Browser,
    handler_task: JoinHandle<()>,
}

/// What a navigated page reported about itself at capture time.
#[derive(Debug, Clone)]
pub struct PageCapture {
    pub final_url: String,
    pub page_title: String,
}

impl DebugSession {
    /// Connect to a freshly launched browser on the given debugging port.
    ///
    /// The browser may still be booting, so the connection is retried a few
    /// times before giving up.
    pub async fn connect(debugging_port: u16) -> Result<Self> {
        let ws_url = format!("http://localhost:{}", debugging_port);

        let (browser, mut handler) = {
            let mut retries = CONNECT_RETRIES;
            loop {
                tracing::debug!("attempting debugger connection to {}", ws_url);
                match Browser::connect(&ws_url).await {
                    Ok(result) => {
                        tracing::info!("debugger connection established");
                        break result;
                    }
                    Err(e) => {
                        retries -= 1;
                        if retries == 0 {
                            return Err(Error::Launch(format!(
                                "Failed to connect to browser after {} attempts: {}",
                                CONNECT_RETRIES, e
                            )));
                        }
                        tracing::debug!("connection attempt failed, retrying ({} left)", retries);
                        tokio::time::sleep(CONNECT_RETRY_DELAY).await;
                    }
                }
            }
        };

        // The handler must be polled for any browser command to make progress.
        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    tracing::debug!("protocol handler event error (continuing): {}", e);
                }
            }
        });

        Ok(Self {
            browser,
            handler_task,
        })
    }

    /// Open a new blank page.
    pub async fn open_page(&self) -> Result<Page> {
        self.browser
            .new_page("about:blank")
            .await
            .map_err(|e| Error::Page(format!("Failed to open page: {}", e)))
    }

    /// Navigate the page and wait for the load event, bounded by `timeout`.
    pub async fn navigate(&self, page: &Page, url: &str, timeout: Duration) -> Result<()> {
        let nav = async {
            page.goto(url)
                .await
                .map_err(|e| Error::Navigation(format!("goto {} failed: {}", url, e)))?;
            page.wait_for_navigation()
                .await
                .map_err(|e| Error::Navigation(format!("load of {} did not settle: {}", url, e)))?;
            Ok(())
        };

        match tokio::time::timeout(timeout, nav).await {
            Ok(result) => result,
            Err(_) => Err(Error::Navigation(format!(
                "navigation to {} timed out after {:?}",
                url, timeout
            ))),
        }
    }

    /// Final URL and title of the page. Best-effort: a page that cannot
    /// report either still gets captured.
    pub async fn page_info(&self, page: &Page, requested_url: &str) -> PageCapture {
        let final_url = page
            .url()
            .await
            .ok()
            .flatten()
            .unwrap_or_else(|| requested_url.to_string());

        let page_title = page.get_title().await.ok().flatten().unwrap_or_default();

        PageCapture {
            final_url,
            page_title,
        }
    }

    /// Capture a PNG screenshot of the current viewport.
    pub async fn screenshot(&self, page: &Page) -> Result<Vec<u8>> {
        let params = ScreenshotParams::builder()
            .format(CaptureScreenshotFormat::Png)
            .build();

        page.screenshot(params)
            .await
            .map_err(|e| Error::Cdp(format!("screenshot capture failed: {}", e)))
    }

    /// Ask the browser to shut down and stop the handler task.
    ///
    /// Consumes the session so no page handle can be used afterwards.
    pub async fn close(mut self) -> Result<()> {
        let result = self
            .browser
            .close()
            .await
            .map(|_| ())
            .map_err(|e| Error::Close(e.to_string()));

        self.handler_task.abort();
        result
    }
}

impl Drop for DebugSession {
    fn drop(&mut self) {
        self.handler_task.abort();
    }
}
