//! Spinner driven by the session's busy signal

use indicatif::{ProgressBar, ProgressStyle};
use std::future::Future;
use std::time::Duration;
use tokio::sync::watch;

/// Shows a spinner whenever the observed busy flag is raised.
///
/// The spinner lives only while [`track`](Self::track) drives a future, so
/// it is always cleared before that future's output is printed.
pub struct BusyIndicator {
    busy: watch::Receiver<bool>,
    message: String,
    enabled: bool,
}

impl BusyIndicator {
    pub fn new(busy: watch::Receiver<bool>, message: impl Into<String>) -> Self {
        Self {
            busy,
            message: message.into(),
            enabled: true,
        }
    }

    /// Disable drawing; `track` then just awaits the future
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Drive `fut` to completion, drawing the spinner while busy is set
    pub async fn track<F: Future>(&self, fut: F) -> F::Output {
        if !self.enabled {
            return fut.await;
        }

        let mut busy = self.busy.clone();
        let mut spinner: Option<ProgressBar> = None;
        tokio::pin!(fut);

        loop {
            tokio::select! {
                biased;
                output = &mut fut => {
                    if let Some(pb) = spinner.take() {
                        pb.finish_and_clear();
                    }
                    return output;
                }
                changed = busy.changed() => {
                    if changed.is_err() {
                        // Sender gone; nothing more to observe
                        if let Some(pb) = spinner.take() {
                            pb.finish_and_clear();
                        }
                        return fut.await;
                    }
                    if *busy.borrow_and_update() {
                        if spinner.is_none() {
                            spinner = Some(self.start_spinner());
                        }
                    } else if let Some(pb) = spinner.take() {
                        pb.finish_and_clear();
                    }
                }
            }
        }
    }

    fn start_spinner(&self) -> ProgressBar {
        let pb = ProgressBar::new_spinner();
        pb.set_style(Self::spinner_style());
        pb.set_message(self.message.clone());
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg} {elapsed:.dim}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_track_returns_future_output() {
        let (tx, rx) = watch::channel(false);
        let indicator = BusyIndicator::new(rx, "Waiting...");

        let output = indicator
            .track(async {
                tx.send_replace(true);
                tokio::task::yield_now().await;
                tx.send_replace(false);
                42
            })
            .await;

        assert_eq!(output, 42);
    }

    #[tokio::test]
    async fn test_disabled_indicator_just_awaits() {
        let (_tx, rx) = watch::channel(true);
        let indicator = BusyIndicator::new(rx, "Waiting...").with_enabled(false);

        assert_eq!(indicator.track(async { "done" }).await, "done");
    }

    #[tokio::test]
    async fn test_closed_channel_still_completes() {
        let (tx, rx) = watch::channel(false);
        drop(tx);
        let indicator = BusyIndicator::new(rx, "Waiting...");

        let output = indicator
            .track(async {
                tokio::task::yield_now().await;
                "finished"
            })
            .await;

        assert_eq!(output, "finished");
    }
}
