use tokio::sync::mpsc;
use tracing::{info, instrument};

use crate::clients::NotificationClient;
use crate::messages::NotificationRequest;

/// Broadcast collaborator. Delivery is fire-and-forget; the core never waits
/// on it and never fails because of it.
pub struct NotificationService {
    receiver: mpsc::Receiver<NotificationRequest>,
    sent: Vec<String>,
}

impl NotificationService {
    pub fn new(buffer_size: usize) -> (Self, NotificationClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let service = Self {
            receiver,
            sent: Vec::new(),
        };
        let client = NotificationClient::new(sender);
        (service, client)
    }

    #[instrument(name = "notification_service", skip(self))]
    pub async fn run(mut self) {
        info!("NotificationService starting");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                NotificationRequest::Broadcast { message } => {
                    info!(%message, "Broadcasting notification");
                    self.sent.push(message);
                }
                NotificationRequest::Shutdown => {
                    info!("NotificationService shutting down");
                    break;
                }
                #[cfg(test)]
                NotificationRequest::Sent { respond_to } => {
                    let _ = respond_to.send(self.sent.clone());
                }
            }
        }

        info!("NotificationService stopped");
    }
}
