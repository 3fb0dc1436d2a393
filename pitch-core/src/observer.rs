//! Notifications around long-running operations.

/// Receives start/finish notifications for a transcode.
///
/// Both methods default to no-ops. `processing_finished` is called after
/// every started run, including failed ones.
pub trait ProcessingObserver: Send + Sync {
    fn processing_started(&self) {}

    fn processing_finished(&self) {}
}

/// Adapter turning a pair of closures into an observer.
pub struct CallbackObserver<S, F>
where
    S: Fn() + Send + Sync,
    F: Fn() + Send + Sync,
{
    on_started: S,
    on_finished: F,
}

impl<S, F> CallbackObserver<S, F>
where
    S: Fn() + Send + Sync,
    F: Fn() + Send + Sync,
{
    pub fn new(on_started: S, on_finished: F) -> Self {
        Self {
            on_started,
            on_finished,
        }
    }
}

impl<S, F> ProcessingObserver for CallbackObserver<S, F>
where
    S: Fn() + Send + Sync,
    F: Fn() + Send + Sync,
{
    fn processing_started(&self) {
        (self.on_started)();
    }

    fn processing_finished(&self) {
        (self.on_finished)();
    }
}
