//! Delayed background work owned by a workflow stage.

use std::future::Future;
use std::sync::{Arc, Mutex};

use futures::future::join_all;
use tokio::task::{JoinError, JoinHandle};

use crate::lock;

/// Handles of tasks spawned by one evidence board or debate room.
#[derive(Debug, Clone, Default)]
pub(crate) struct TaskSet(Arc<Mutex<Vec<JoinHandle<()>>>>);

impl TaskSet {
    /// Spawn onto the current tokio runtime.
    pub(crate) fn spawn<F>(&self, fut: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let handle = tokio::spawn(fut);
        let mut handles = lock(&self.0);
        handles.retain(|h| !h.is_finished());
        handles.push(handle);
    }

    pub(crate) fn outstanding(&self) -> usize {
        lock(&self.0).iter().filter(|h| !h.is_finished()).count()
    }

    /// Wait until every task, including ones spawned while waiting, has finished.
    pub(crate) async fn settle(&self) -> Result<(), JoinError> {
        loop {
            let handles = std::mem::take(&mut *lock(&self.0));
            if handles.is_empty() {
                return Ok(());
            }
            for result in join_all(handles).await {
                result?;
            }
        }
    }
}
