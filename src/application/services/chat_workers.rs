//! Per-chat event workers
//!
//! Events of one chat are handled in arrival order by a dedicated task,
//! while different chats make progress concurrently. A worker exits once
//! its queue has been idle for a while and is restarted on the next event.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::domain::entities::Message;

use super::MessageService;

/// How long a worker waits for its next event before exiting
pub const DEFAULT_IDLE: Duration = Duration::from_secs(60);

struct Worker {
    generation: u64,
    queue: mpsc::UnboundedSender<Message>,
    task: JoinHandle<()>,
}

type WorkerMap = Mutex<HashMap<String, Worker>>;

fn lock(workers: &WorkerMap) -> MutexGuard<'_, HashMap<String, Worker>> {
    workers.lock().unwrap_or_else(|e| e.into_inner())
}

/// Fans incoming events out to one worker per chat
pub struct ChatWorkers {
    service: Arc<MessageService>,
    idle: Duration,
    workers: Arc<WorkerMap>,
    generations: AtomicU64,
}

impl ChatWorkers {
    pub fn new(service: Arc<MessageService>) -> Self {
        Self::with_idle(service, DEFAULT_IDLE)
    }

    pub fn with_idle(service: Arc<MessageService>, idle: Duration) -> Self {
        Self {
            service,
            idle,
            workers: Arc::new(Mutex::new(HashMap::new())),
            generations: AtomicU64::new(0),
        }
    }

    pub fn service(&self) -> &Arc<MessageService> {
        &self.service
    }

    /// Number of chats with a live worker
    pub fn active_chats(&self) -> usize {
        lock(&self.workers).len()
    }

    /// Queue an event behind earlier events of the same chat.
    ///
    /// Must be called from within a tokio runtime.
    pub fn submit(&self, message: Message) {
        let chat = message.chat_id.clone();
        let mut workers = lock(&self.workers);

        let message = match workers.get(&chat) {
            Some(worker) => match worker.queue.send(message) {
                Ok(()) => return,
                // Worker died without deregistering
                Err(mpsc::error::SendError(message)) => message,
            },
            None => message,
        };

        let generation = self.generations.fetch_add(1, Ordering::Relaxed);
        let (queue, rx) = mpsc::unbounded_channel();
        if queue.send(message).is_err() {
            return;
        }
        let task = tokio::spawn(run_worker(
            chat.clone(),
            generation,
            rx,
            Arc::clone(&self.service),
            Arc::clone(&self.workers),
            self.idle,
        ));
        tracing::debug!("[{}] Worker started", chat);
        workers.insert(chat, Worker { generation, queue, task });
    }

    /// Close every queue and wait for the queued events to finish
    pub async fn shutdown(&self) {
        let drained: Vec<(String, Worker)> = lock(&self.workers).drain().collect();
        for (chat, Worker { queue, task, .. }) in drained {
            drop(queue);
            if let Err(e) = task.await {
                tracing::error!("[{}] Worker failed: {}", chat, e);
            }
        }
    }
}

async fn run_worker(
    chat: String,
    generation: u64,
    mut rx: mpsc::UnboundedReceiver<Message>,
    service: Arc<MessageService>,
    workers: Arc<WorkerMap>,
    idle: Duration,
) {
    loop {
        let message = match tokio::time::timeout(idle, rx.recv()).await {
            Ok(Some(message)) => message,
            Ok(None) => break,
            Err(_) => {
                // Senders only push while holding the lock, so an empty queue
                // seen under it stays empty once the entry is gone.
                let mut map = lock(&workers);
                match rx.try_recv() {
                    Ok(message) => message,
                    Err(_) => {
                        if map.get(&chat).is_some_and(|w| w.generation == generation) {
                            map.remove(&chat);
                        }
                        break;
                    }
                }
            }
        };
        service.process(message).await;
    }
    tracing::debug!("[{}] Worker stopped", chat);
}
