//! JavaScript dialog seam.

use async_trait::async_trait;

use crate::error::Result;

/// An open `alert`, `confirm` or `prompt` dialog.
///
/// Every method fails with [`Error::NoAlertPresent`](crate::Error::NoAlertPresent)
/// once the dialog has closed.
#[async_trait]
pub trait Alert: Send + Sync {
    /// Gets the dialog message.
    async fn text(&self) -> Result<String>;

    /// Presses OK.
    async fn accept(&self) -> Result<()>;

    /// Presses Cancel (or closes an `alert`).
    async fn dismiss(&self) -> Result<()>;
}

impl std::fmt::Debug for dyn Alert {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Alert")
    }
}
