//! Interrupt handling for the command-line run.

use std::future::Future;

use tokio_util::sync::CancellationToken;

/// Watch for interrupts until a second one arrives.
///
/// The first interrupt cancels `cancel` and calls `on_first`; the run then winds
/// down on its own. Returns `true` once a second interrupt arrives, in which case
/// the caller should exit without waiting. Returns `false` if the signal source
/// fails.
pub async fn watch_interrupts<S, Fut>(
    mut next_signal: S,
    cancel: CancellationToken,
    on_first: impl FnOnce(),
) -> bool
where
    S: FnMut() -> Fut,
    Fut: Future<Output = std::io::Result<()>>,
{
    if next_signal().await.is_err() {
        return false;
    }
    on_first();
    cancel.cancel();

    next_signal().await.is_ok()
}
