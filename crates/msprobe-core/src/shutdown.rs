//! Cancellation token for the poll loop.

use tokio::sync::watch;

/// Create a linked trigger and token
///
/// ```rust
/// let (trigger, shutdown) = msprobe_core::shutdown::channel();
/// assert!(!shutdown.is_triggered());
/// trigger.trigger();
/// assert!(shutdown.is_triggered());
/// ```
pub fn channel() -> (ShutdownTrigger, Shutdown)
{
    let (tx, rx) = watch::channel(false);
    (ShutdownTrigger { tx }, Shutdown { rx })
}

/// Requests shutdown; held by whoever decides when to stop (e.g. a Ctrl-C
/// handler)
#[derive(Debug)]
pub struct ShutdownTrigger
{
    tx: watch::Sender<bool>,
}

impl ShutdownTrigger
{
    /// Ask every linked [`Shutdown`] to stop. Idempotent.
    pub fn trigger(&self)
    {
        self.tx.send_replace(true);
    }
}

/// Observed by the poller at every sleep boundary
#[derive(Debug, Clone)]
pub struct Shutdown
{
    rx: watch::Receiver<bool>,
}

impl Shutdown
{
    /// A token that never fires
    pub fn never() -> Self
    {
        let (_tx, rx) = watch::channel(false);
        Shutdown { rx }
    }

    /// Whether shutdown has been requested
    pub fn is_triggered(&self) -> bool
    {
        *self.rx.borrow()
    }

    /// Resolve once shutdown is requested
    ///
    /// If the trigger is dropped without firing this never resolves.
    pub async fn triggered(&mut self)
    {
        if self.rx.wait_for(|&stop| stop).await.is_err() {
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(test)]
mod tests
{
    use std::time::Duration;

    use super::*;

    #[tokio::test]
    async fn test_triggered_resolves_after_trigger()
    {
        let (trigger, mut shutdown) = channel();
        trigger.trigger();
        shutdown.triggered().await;
        assert!(shutdown.is_triggered());
    }

    #[tokio::test(start_paused = true)]
    async fn test_never_does_not_resolve()
    {
        let mut shutdown = Shutdown::never();
        let result = tokio::time::timeout(Duration::from_secs(60), shutdown.triggered()).await;
        assert!(result.is_err());
        assert!(!shutdown.is_triggered());
    }

    #[test]
    fn test_trigger_reaches_clones()
    {
        let (trigger, shutdown) = channel();
        let other = shutdown.clone();
        trigger.trigger();
        trigger.trigger();
        assert!(shutdown.is_triggered());
        assert!(other.is_triggered());
    }
}
