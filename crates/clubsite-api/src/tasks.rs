//! Tokio-backed [`TaskQueue`]: each task runs on its own spawned future after
//! a fixed delay.

use std::{sync::Arc, time::Duration};

use clubsite_core::{
  record::{RecordValue, StoredRecord},
  store::RecordStore,
  task::{Task, TaskQueue},
};

pub struct TokioTaskQueue<S> {
  store: Arc<S>,
  delay: Duration,
}

impl<S> TokioTaskQueue<S> {
  pub fn new(store: Arc<S>, delay: Duration) -> Self { Self { store, delay } }
}

impl<S> TaskQueue for TokioTaskQueue<S>
where
  S: RecordStore + 'static,
{
  fn send(&self, task: Task) {
    let store = self.store.clone();
    let delay = self.delay;
    tokio::spawn(async move {
      tokio::time::sleep(delay).await;
      // Failures end here; the caller has already responded.
      let _ = run_task(store.as_ref(), task).await;
    });
  }
}

/// Clean and store the announcement for `task`. Returns the stored record,
/// or `None` after logging why it was not stored.
pub async fn run_task<S: RecordStore>(store: &S, task: Task) -> Option<StoredRecord> {
  let announcement = match task.announcement().clean() {
    Ok(a) => a,
    Err(e) => {
      tracing::warn!(?task, error = %e, "announcement rejected");
      return None;
    }
  };
  match store.create(RecordValue::Announcement(announcement)).await {
    Ok(record) => {
      tracing::info!(id = %record.record_id, "announcement posted");
      Some(record)
    }
    Err(e) => {
      tracing::error!(?task, error = %e, "failed to store announcement");
      None
    }
  }
}
