//! Background removal of expired records.

use super::record::Record;
use crate::base::neterror::NetError;
use dashmap::DashMap;
use std::sync::{Mutex, PoisonError, Weak};
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

/// Remove every record expired at `now`. Returns how many were removed.
pub(crate) fn purge_expired(entries: &DashMap<String, Record>, now: Instant) -> usize {
    let mut removed = 0;
    entries.retain(|_, record| {
        let keep = !record.is_expired_at(now);
        if !keep {
            removed += 1;
        }
        keep
    });
    removed
}

/// Periodic task deleting expired records from the storage map.
///
/// The task only holds a weak reference to the map, so it never keeps a
/// dropped storage alive. It exits when stopped, when its [`Sweeper`] is
/// dropped, or when the map is gone.
pub(crate) struct Sweeper {
    shutdown: Mutex<Option<oneshot::Sender<()>>>,
    handle: JoinHandle<()>,
    interval: Duration,
}

impl Sweeper {
    /// Spawn the sweeper on the current tokio runtime.
    ///
    /// The first sweep runs one `interval` after spawning. An interval whose
    /// first deadline does not fit in an `Instant` fails with
    /// `InvalidCheckInterval` instead of spawning.
    pub(crate) fn spawn(
        entries: Weak<DashMap<String, Record>>,
        interval: Duration,
    ) -> Result<Self, NetError> {
        let runtime = tokio::runtime::Handle::try_current().map_err(|_| NetError::NoRuntime)?;
        let start = Instant::now()
            .checked_add(interval)
            .ok_or(NetError::InvalidCheckInterval)?;
        let (tx, mut rx) = oneshot::channel::<()>();

        let handle = runtime.spawn(async move {
            let mut ticker = tokio::time::interval_at(start, interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    // Fires on stop() and when the sender is dropped
                    _ = &mut rx => break,
                    _ = ticker.tick() => {
                        let Some(entries) = entries.upgrade() else {
                            break;
                        };
                        let removed = purge_expired(&entries, Instant::now());
                        if removed > 0 {
                            tracing::debug!(
                                removed,
                                remaining = entries.len(),
                                "swept expired DNS cache records"
                            );
                        }
                    }
                }
            }

            tracing::debug!("DNS cache sweeper stopped");
        });

        tracing::debug!(interval = ?interval, "DNS cache sweeper started");
        Ok(Self {
            shutdown: Mutex::new(Some(tx)),
            handle,
            interval,
        })
    }

    /// Signal the task to exit. Safe to call more than once.
    pub(crate) fn stop(&self) {
        let sender = self
            .shutdown
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(sender) = sender {
            // The task may already be gone; nothing to do then.
            let _ = sender.send(());
        }
    }

    pub(crate) fn is_running(&self) -> bool {
        !self.handle.is_finished()
    }

    pub(crate) fn interval(&self) -> Duration {
        self.interval
    }
}

impl Drop for Sweeper {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn record(ttl: Duration) -> Record {
        Record::new(vec!["127.0.0.1".to_string()], ttl).unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn test_purge_expired_keeps_live_records() {
        let entries = DashMap::new();
        entries.insert("short.com".to_string(), record(Duration::from_secs(1)));
        entries.insert("long.com".to_string(), record(Duration::from_secs(10)));

        tokio::time::advance(Duration::from_secs(1)).await;

        assert_eq!(purge_expired(&entries, Instant::now()), 1);
        assert!(entries.contains_key("long.com"));
        assert!(!entries.contains_key("short.com"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_sweeper_removes_after_tick() {
        let entries = Arc::new(DashMap::new());
        entries.insert("a.com".to_string(), record(Duration::from_secs(2)));

        let sweeper = Sweeper::spawn(Arc::downgrade(&entries), Duration::from_secs(3)).unwrap();
        assert_eq!(sweeper.interval(), Duration::from_secs(3));

        // Expired but not yet swept
        tokio::time::sleep(Duration::from_millis(2500)).await;
        assert_eq!(entries.len(), 1);

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert!(entries.is_empty());

        sweeper.stop();
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_is_idempotent() {
        let entries = Arc::new(DashMap::new());
        let sweeper = Sweeper::spawn(Arc::downgrade(&entries), Duration::from_secs(1)).unwrap();

        sweeper.stop();
        sweeper.stop();
        tokio::time::sleep(Duration::from_millis(10)).await;

        assert!(!sweeper.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn test_sweeper_exits_when_map_dropped() {
        let entries = Arc::new(DashMap::<String, Record>::new());
        let sweeper = Sweeper::spawn(Arc::downgrade(&entries), Duration::from_secs(1)).unwrap();

        drop(entries);
        tokio::time::sleep(Duration::from_millis(1500)).await;

        assert!(!sweeper.is_running());
    }

    #[tokio::test]
    async fn test_spawn_rejects_unschedulable_interval() {
        let entries = Arc::new(DashMap::<String, Record>::new());
        let result = Sweeper::spawn(Arc::downgrade(&entries), Duration::MAX);
        assert!(matches!(result, Err(NetError::InvalidCheckInterval)));
    }

    #[test]
    fn test_spawn_without_runtime() {
        let entries = Arc::new(DashMap::<String, Record>::new());
        let result = Sweeper::spawn(Arc::downgrade(&entries), Duration::from_secs(1));
        assert!(matches!(result, Err(NetError::NoRuntime)));
    }
}
