use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, watch};
use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};

use crate::modules::client::BotApi;
use crate::modules::panel::StatusPanel;

pub struct PollHandle {
    shutdown: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl PollHandle {
    pub async fn stop(self) {
        let _ = self.shutdown.send(true);
        let _ = self.task.await;
    }
}

// First tick fires immediately, then every `period` until stopped.
pub fn spawn_status_poll<C>(panel: Arc<Mutex<StatusPanel<C>>>, period: Duration) -> PollHandle
where
    C: BotApi + Send + 'static,
{
    let (shutdown, mut stopped) = watch::channel(false);

    let task = tokio::spawn(async move {
        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    panel.lock().await.refresh_status().await;
                }
                changed = stopped.changed() => {
                    if changed.is_err() || *stopped.borrow() {
                        break;
                    }
                }
            }
        }
    });

    PollHandle { shutdown, task }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::client::ApiError;
    use crate::modules::types::{BotStatus, ControlAck, SettingsDraft, StatusReport};
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Clone, Default)]
    struct CountingApi {
        status_calls: Arc<AtomicUsize>,
    }

    impl BotApi for CountingApi {
        async fn start(&self) -> Result<ControlAck, ApiError> {
            Ok(ControlAck { success: true })
        }

        async fn stop(&self) -> Result<ControlAck, ApiError> {
            Ok(ControlAck { success: true })
        }

        async fn status(&self) -> Result<StatusReport, ApiError> {
            self.status_calls.fetch_add(1, Ordering::SeqCst);
            Ok(StatusReport {
                status: BotStatus::Running,
                stats: None,
            })
        }
    }

    #[tokio::test]
    async fn polls_immediately_and_then_periodically() {
        let api = CountingApi::default();
        let calls = api.status_calls.clone();
        let panel = Arc::new(Mutex::new(StatusPanel::new(api, SettingsDraft::default())));

        let handle = spawn_status_poll(panel.clone(), Duration::from_millis(10));
        tokio::time::sleep(Duration::from_millis(55)).await;
        handle.stop().await;

        assert!(calls.load(Ordering::SeqCst) >= 2);
        assert_eq!(panel.lock().await.badge.label, "Started");
    }

    #[tokio::test]
    async fn stopping_the_handle_cancels_the_poll() {
        let api = CountingApi::default();
        let calls = api.status_calls.clone();
        let panel = Arc::new(Mutex::new(StatusPanel::new(api, SettingsDraft::default())));

        let handle = spawn_status_poll(panel, Duration::from_millis(5));
        tokio::time::sleep(Duration::from_millis(20)).await;
        handle.stop().await;

        let after_stop = calls.load(Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(30)).await;
        assert_eq!(calls.load(Ordering::SeqCst), after_stop);
    }
}
