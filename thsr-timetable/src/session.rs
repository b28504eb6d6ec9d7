//! Scoped ownership of the browser session.

use std::panic::AssertUnwindSafe;

use futures::FutureExt;
use tracing::{debug, warn};

use crate::page::PagePort;

/// Run `body` with the page, then close the page on every exit path.
///
/// The page is closed after `body` returns, whatever it returns, and also
/// when it panics; the panic is resumed once the session is torn down.
/// A failure to close is logged and otherwise ignored.
pub async fn scoped<P, T, F>(port: P, body: F) -> T
where
    P: PagePort,
    F: AsyncFnOnce(&P) -> T,
{
    let outcome = AssertUnwindSafe(body(&port)).catch_unwind().await;

    match port.close().await {
        Ok(()) => debug!("browser session closed"),
        Err(e) => warn!(error = %e, "failed to close browser session"),
    }

    match outcome {
        Ok(value) => value,
        Err(panic) => std::panic::resume_unwind(panic),
    }
}
