use crate::domain::AdmittedOrder;
use crate::ports::{MatchingError, MatchingGateway};
use tokio::sync::mpsc;

/// Forwards admitted orders to a channel drained by the matching process.
pub struct ChannelMatchingGateway {
    sender: mpsc::Sender<AdmittedOrder>,
}

impl ChannelMatchingGateway {
    /// Gateway plus the receiving end for the matcher.
    pub fn new(capacity: usize) -> (Self, mpsc::Receiver<AdmittedOrder>) {
        let (sender, receiver) = mpsc::channel(capacity);
        (Self { sender }, receiver)
    }
}

#[async_trait::async_trait]
impl MatchingGateway for ChannelMatchingGateway {
    async fn submit_admitted(&self, order: AdmittedOrder) -> Result<(), MatchingError> {
        self.sender
            .send(order)
            .await
            .map_err(|_| MatchingError::Closed)
    }
}
