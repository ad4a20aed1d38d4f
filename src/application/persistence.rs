//! Background writer that persists committed profiles to the durable store.
//!
//! Commits enqueue snapshots without waiting. A single task drains the queue
//! in order, so the store always ends up with the latest committed profile.
//! Snapshots queued before the store has been enabled are dropped.

use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::sync::{mpsc, oneshot};

use crate::domain::tracking::UserProfile;
use crate::ports::{ProfileStore, StoreError};

enum WriteCommand {
    /// Start writing snapshots queued after this point.
    Enable,
    /// Enable, write this first snapshot and report how the write went.
    Seed(Box<UserProfile>, oneshot::Sender<Result<(), StoreError>>),
    Persist(Box<UserProfile>),
    Flush(oneshot::Sender<()>),
}

/// Handle to the persistence task. Dropping it stops the task once the
/// queue is drained.
pub(crate) struct PersistenceWriter {
    tx: mpsc::UnboundedSender<WriteCommand>,
}

impl PersistenceWriter {
    pub(crate) fn spawn(store: Arc<dyn ProfileStore>, runtime: &Handle) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        runtime.spawn(run(store, rx));
        Self { tx }
    }

    pub(crate) fn enable(&self) {
        self.send(WriteCommand::Enable);
    }

    /// Queues the seed snapshot and returns a receiver for its write result.
    ///
    /// Call with the same ordering guarantees as [`enqueue`](Self::enqueue)
    /// so later commits are written after the seed.
    pub(crate) fn seed(&self, profile: UserProfile) -> oneshot::Receiver<Result<(), StoreError>> {
        let (ack, result) = oneshot::channel();
        self.send(WriteCommand::Seed(Box::new(profile), ack));
        result
    }

    pub(crate) fn enqueue(&self, profile: UserProfile) {
        self.send(WriteCommand::Persist(Box::new(profile)));
    }

    /// Waits until everything queued before this call has been handled.
    pub(crate) async fn flush(&self) {
        let (ack, done) = oneshot::channel();
        self.send(WriteCommand::Flush(ack));
        let _ = done.await;
    }

    fn send(&self, command: WriteCommand) {
        if self.tx.send(command).is_err() {
            tracing::warn!("persistence writer has stopped; command dropped");
        }
    }
}

async fn run(store: Arc<dyn ProfileStore>, mut rx: mpsc::UnboundedReceiver<WriteCommand>) {
    let mut enabled = false;
    while let Some(command) = rx.recv().await {
        match command {
            WriteCommand::Enable => enabled = true,
            WriteCommand::Seed(profile, ack) => {
                enabled = true;
                let result = store.write_profile(&profile).await;
                match &result {
                    Ok(()) => tracing::debug!("durable store seeded"),
                    Err(e) => tracing::warn!(error = %e, "failed to seed durable store"),
                }
                let _ = ack.send(result);
            }
            WriteCommand::Persist(_) if !enabled => {
                tracing::debug!("durable store not enabled; skipping write");
            }
            WriteCommand::Persist(profile) => match store.write_profile(&profile).await {
                Ok(()) => tracing::debug!(cycles = profile.cycle_history().len(), "profile persisted"),
                Err(e) => tracing::warn!(error = %e, "failed to persist profile"),
            },
            WriteCommand::Flush(ack) => {
                let _ = ack.send(());
            }
        }
    }
    tracing::debug!("persistence writer stopped");
}
