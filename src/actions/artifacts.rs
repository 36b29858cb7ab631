//! Screenshots and page source files.

use std::path::{Path, PathBuf};

use base64::Engine;
use base64::engine::general_purpose::STANDARD as Base64Standard;
use tracing::{debug, warn};
use url::Url;

use crate::browser::Locator;
use crate::error::{Error, Result};

use super::PageActions;

// ============================================================================
// PageActions - Artifacts
// ============================================================================

impl PageActions {
    /// Saves a PNG screenshot and returns its path.
    ///
    /// `.png` is appended to `name` if missing. Without a folder the file
    /// lands in the working directory; a given folder is created if needed.
    /// With a selector only that element is captured, falling back to the
    /// whole viewport if it cannot be found or captured.
    ///
    /// # Errors
    ///
    /// - the driver error if the viewport capture fails
    /// - [`Error::Driver`] if the capture is not valid base64
    /// - [`Error::Io`] if the folder or file cannot be written
    pub async fn save_screenshot(
        &self,
        name: &str,
        folder: Option<&Path>,
        selector: Option<Locator>,
    ) -> Result<PathBuf> {
        self.reconnect_if_disconnected().await;
        let path = artifact_path(name, "png", folder).await?;
        debug!(path = %path.display(), "Saving screenshot");

        let data = match selector {
            Some(locator) => match self.element_screenshot(&locator).await {
                Ok(data) => data,
                Err(e) => {
                    warn!(selector = %locator, error = %e, "Element screenshot failed, capturing page");
                    self.driver.screenshot().await?
                }
            },
            None => self.driver.screenshot().await?,
        };

        let bytes = Base64Standard
            .decode(data.as_bytes())
            .map_err(|e| Error::driver(format!("Failed to decode screenshot: {e}")))?;
        tokio::fs::write(&path, bytes).await?;
        Ok(path)
    }

    /// Saves the page HTML and returns its path.
    ///
    /// `.html` is appended to `name` if missing. A `<base href>` for the
    /// current origin is prepended so relative links resolve when the file
    /// is opened locally, and `xmlns` attributes are renamed so browsers
    /// render the file as HTML.
    ///
    /// # Errors
    ///
    /// - the driver error if the source cannot be read
    /// - [`Error::Io`] if the folder or file cannot be written
    pub async fn save_page_source(&self, name: &str, folder: Option<&Path>) -> Result<PathBuf> {
        let cdp = self.cdp_swap().await;
        if cdp.is_none() {
            self.reconnect_if_disconnected().await;
        }
        let path = artifact_path(name, "html", folder).await?;
        debug!(path = %path.display(), "Saving page source");

        let source = match cdp {
            Some(cdp) => cdp.page_source().await?,
            None => self.driver.page_source().await?,
        };
        let base_href = match self.driver.current_url().await {
            Ok(current) => base_href(&current),
            Err(e) => {
                warn!(error = %e, "Could not read current URL for base href");
                None
            }
        };

        tokio::fs::write(&path, render_source(&source, base_href.as_deref())).await?;
        Ok(path)
    }

    async fn element_screenshot(&self, locator: &Locator) -> Result<String> {
        let element = self.driver.find_element(locator.by()).await?;
        element.screenshot().await
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Builds the output path, creating `folder` if it does not exist.
async fn artifact_path(name: &str, extension: &str, folder: Option<&Path>) -> Result<PathBuf> {
    let suffix = format!(".{extension}");
    let file_name = if name.ends_with(&suffix) {
        name.to_string()
    } else {
        format!("{name}{suffix}")
    };
    match folder {
        Some(folder) => {
            tokio::fs::create_dir_all(folder).await?;
            Ok(folder.join(file_name))
        }
        None => Ok(PathBuf::from(file_name)),
    }
}

/// Returns `scheme://host[:port]/` for page URLs, `None` for anything else.
fn base_href(current_url: &str) -> Option<String> {
    if !current_url.contains("://") {
        return None;
    }
    let url = Url::parse(current_url).ok()?;
    let host = url.host_str()?;
    Some(match url.port() {
        Some(port) => format!("{}://{host}:{port}/", url.scheme()),
        None => format!("{}://{host}/", url.scheme()),
    })
}

fn render_source(source: &str, base_href: Option<&str>) -> String {
    let Some(base_href) = base_href else {
        return source.to_string();
    };
    let source = source.replace(" xmlns=\"", " data-xmlns=\"");
    format!("<base href=\"{base_href}\">\n{source}")
}

// ============================================================================
// Tests
// ============================================================================
