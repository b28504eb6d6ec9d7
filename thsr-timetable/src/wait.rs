//! Bounded polling waits over the page.
//!
//! Both suspension points of a search (results loaded, page re-rendered)
//! are polling waits with an explicit timeout. Probes that fail with an
//! [`AutomationError`] are retried until the deadline, since the element
//! being probed is often mid-render.

use std::future::Future;
use std::time::Duration;

use tokio::time::{Instant, sleep};
use tracing::trace;

use crate::page::AutomationError;

/// A wait that ran out of time.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("condition not met within {waited:?}")]
pub struct WaitTimeout {
    /// The timeout that elapsed.
    pub waited: Duration,
    /// The last probe error, if the final probes were failing.
    pub last_error: Option<AutomationError>,
}

/// Poll `probe` until it yields a value, or fail after `timeout`.
///
/// The probe runs at least once, then every `interval` until the deadline.
pub async fn poll_until<T, F, Fut>(
    timeout: Duration,
    interval: Duration,
    mut probe: F,
) -> Result<T, WaitTimeout>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<Option<T>, AutomationError>>,
{
    let deadline = Instant::now() + timeout;

    loop {
        let last_error = match probe().await {
            Ok(Some(value)) => return Ok(value),
            Ok(None) => None,
            Err(e) => {
                trace!(error = %e, "probe failed, retrying");
                Some(e)
            }
        };

        let now = Instant::now();
        if now >= deadline {
            return Err(WaitTimeout {
                waited: timeout,
                last_error,
            });
        }
        sleep(interval.min(deadline - now)).await;
    }
}

/// Wait until `snapshot` returns something different from `previous`.
///
/// Returns the new snapshot. Used to detect client-side re-renders, where
/// the old elements are replaced rather than appended to: comparing element
/// identity catches a new page even when it has as many rows as the last.
pub async fn wait_until_changed<E, F, Fut>(
    timeout: Duration,
    interval: Duration,
    previous: &[E],
    mut snapshot: F,
) -> Result<Vec<E>, WaitTimeout>
where
    E: PartialEq,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<Vec<E>, AutomationError>>,
{
    poll_until(timeout, interval, move || {
        let current = snapshot();
        async move {
            let current = current.await?;
            Ok((current.as_slice() != previous).then_some(current))
        }
    })
    .await
}
