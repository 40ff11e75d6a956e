use tokio::sync::mpsc;
use tracing::{debug, instrument};

use crate::messages::NotificationRequest;

/// Client for the notification broadcaster.
#[derive(Clone)]
pub struct NotificationClient {
    sender: mpsc::Sender<NotificationRequest>,
}

impl NotificationClient {
    pub(crate) fn new(sender: mpsc::Sender<NotificationRequest>) -> Self {
        Self { sender }
    }

    /// Fire-and-forget broadcast. A closed channel drops the message;
    /// callers never wait on delivery.
    #[instrument(skip(self))]
    pub async fn broadcast(&self, message: String) {
        debug!("Sending broadcast");
        let _ = self
            .sender
            .send(NotificationRequest::Broadcast { message })
            .await;
    }

    #[instrument(skip(self))]
    pub async fn shutdown(&self) {
        debug!("Sending shutdown request");
        let _ = self.sender.send(NotificationRequest::Shutdown).await;
    }

    #[cfg(test)]
    pub(crate) async fn sent(&self) -> Vec<String> {
        let (respond_to, response) = tokio::sync::oneshot::channel();
        let _ = self
            .sender
            .send(NotificationRequest::Sent { respond_to })
            .await;
        response.await.unwrap_or_default()
    }
}
