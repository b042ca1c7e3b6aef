//! Debounced saving of rapidly changing values.
//!
//! Each [`Debouncer::schedule`] replaces the pending value and restarts the
//! quiet window; the save callback runs once the window elapses with no new
//! value. Only the trailing value of a burst is written. [`Debouncer::flush`]
//! writes whatever is pending immediately.

use std::{future::Future, time::Duration};

use anyhow::anyhow;
use tokio::{
  sync::{mpsc, oneshot},
  task::JoinHandle,
};

pub const DEFAULT_DELAY: Duration = Duration::from_millis(500);

enum Command<T> {
  Schedule(T),
  Flush(oneshot::Sender<anyhow::Result<()>>),
}

pub struct Debouncer<T> {
  tx:   mpsc::UnboundedSender<Command<T>>,
  task: JoinHandle<()>,
}

impl<T: Send + 'static> Debouncer<T> {
  /// Spawn the debounce task. `save` is called with each value that survives
  /// its window.
  pub fn new<F, Fut>(delay: Duration, save: F) -> Self
  where
    F: FnMut(T) -> Fut + Send + 'static,
    Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
  {
    let (tx, rx) = mpsc::unbounded_channel();
    let task = tokio::spawn(run(rx, delay, save));
    Self { tx, task }
  }

  /// Replace the pending value and restart the window.
  pub fn schedule(&self, value: T) -> anyhow::Result<()> {
    self
      .tx
      .send(Command::Schedule(value))
      .map_err(|_| anyhow!("autosave task has stopped"))
  }

  /// Save the pending value now, if there is one.
  pub async fn flush(&self) -> anyhow::Result<()> {
    let (ack, done) = oneshot::channel();
    self
      .tx
      .send(Command::Flush(ack))
      .map_err(|_| anyhow!("autosave task has stopped"))?;
    done.await.map_err(|_| anyhow!("autosave task has stopped"))?
  }

  /// Flush and stop the task.
  pub async fn finish(self) -> anyhow::Result<()> {
    let result = self.flush().await;
    drop(self.tx);
    self.task.await?;
    result
  }
}

async fn run<T, F, Fut>(mut rx: mpsc::UnboundedReceiver<Command<T>>, delay: Duration, mut save: F)
where
  F: FnMut(T) -> Fut,
  Fut: Future<Output = anyhow::Result<()>>,
{
  let mut pending: Option<T> = None;

  loop {
    let command = if pending.is_some() {
      tokio::select! {
        command = rx.recv() => command,
        () = tokio::time::sleep(delay) => {
          if let Some(value) = pending.take()
            && let Err(e) = save(value).await
          {
            tracing::warn!(error = %e, "autosave failed");
          }
          continue;
        }
      }
    } else {
      rx.recv().await
    };

    match command {
      Some(Command::Schedule(value)) => pending = Some(value),
      Some(Command::Flush(ack)) => {
        let result = match pending.take() {
          Some(value) => save(value).await,
          None => Ok(()),
        };
        let _ = ack.send(result);
      }
      None => {
        if let Some(value) = pending.take()
          && let Err(e) = save(value).await
        {
          tracing::warn!(error = %e, "autosave failed");
        }
        return;
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use std::sync::{Arc, Mutex};

  use super::*;

  fn recorder() -> (Arc<Mutex<Vec<String>>>, impl FnMut(String) -> std::future::Ready<anyhow::Result<()>>) {
    let saved = Arc::new(Mutex::new(Vec::new()));
    let sink = saved.clone();
    let save = move |value: String| {
      sink.lock().unwrap().push(value);
      std::future::ready(Ok(()))
    };
    (saved, save)
  }

  #[tokio::test]
  async fn burst_saves_only_trailing_value() {
    let (saved, save) = recorder();
    let debouncer = Debouncer::new(Duration::from_millis(50), save);

    for text in ["a", "ab", "abc"] {
      debouncer.schedule(text.to_string()).unwrap();
      tokio::time::sleep(Duration::from_millis(10)).await;
    }
    tokio::time::sleep(Duration::from_millis(200)).await;

    assert_eq!(*saved.lock().unwrap(), vec!["abc".to_string()]);
  }

  #[tokio::test]
  async fn separate_bursts_save_separately() {
    let (saved, save) = recorder();
    let debouncer = Debouncer::new(Duration::from_millis(30), save);

    debouncer.schedule("first".to_string()).unwrap();
    tokio::time::sleep(Duration::from_millis(150)).await;
    debouncer.schedule("second".to_string()).unwrap();
    tokio::time::sleep(Duration::from_millis(150)).await;

    assert_eq!(*saved.lock().unwrap(), vec!["first".to_string(), "second".to_string()]);
  }

  #[tokio::test]
  async fn flush_writes_pending_value_immediately() {
    let (saved, save) = recorder();
    let debouncer = Debouncer::new(Duration::from_secs(60), save);

    debouncer.schedule("draft".to_string()).unwrap();
    debouncer.flush().await.unwrap();
    assert_eq!(*saved.lock().unwrap(), vec!["draft".to_string()]);

    // Nothing pending: no second write.
    debouncer.finish().await.unwrap();
    assert_eq!(saved.lock().unwrap().len(), 1);
  }

  #[tokio::test]
  async fn flush_reports_save_failure() {
    let debouncer = Debouncer::new(Duration::from_secs(60), |_: String| {
      std::future::ready(Err(anyhow!("disk full")))
    });
    debouncer.schedule("x".to_string()).unwrap();
    let err = debouncer.flush().await.unwrap_err();
    assert!(err.to_string().contains("disk full"));
  }

  #[tokio::test]
  async fn async_store_write_is_flushed() {
    use annals_core::{store::RecordStore as _, topic::TopicContent};
    use annals_store_sqlite::SqliteStore;

    let store = SqliteStore::open_in_memory().await.unwrap();
    let writer = store.clone();
    let debouncer = Debouncer::new(Duration::from_secs(60), move |content: String| {
      let store = writer.clone();
      async move {
        store.put_topic_content(TopicContent::new("1", content)).await?;
        Ok::<_, anyhow::Error>(())
      }
    });

    debouncer.schedule("line one".to_string()).unwrap();
    debouncer.schedule("line one\nline two".to_string()).unwrap();
    debouncer.finish().await.unwrap();

    let saved = store.get_topic_content("1").await.unwrap().unwrap();
    assert_eq!(saved.content, "line one\nline two");
  }
}
