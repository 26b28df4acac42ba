use anyhow::Result;
use coach_realtime_types::ClientEvent;
#[cfg(test)]
use mockall::automock;

/// The controller's only way out to the realtime transport.
///
/// Sending is fire-and-forget: an implementation hands the event over and returns
/// immediately, it never waits for the round trip. An `Err` means the event was
/// not accepted at all.
#[cfg_attr(test, automock)]
pub trait RequestSink {
    fn send_request(&self, event: ClientEvent) -> Result<()>;
}

impl RequestSink for tokio::sync::mpsc::Sender<ClientEvent> {
    fn send_request(&self, event: ClientEvent) -> Result<()> {
        self.try_send(event)
            .map_err(|e| anyhow::anyhow!("failed to queue client event: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::SummaryRequestBuilder;

    #[tokio::test]
    async fn test_channel_sink_queues_without_waiting() {
        let (tx, mut rx) = tokio::sync::mpsc::channel(1);
        let event = SummaryRequestBuilder::new().build(&[]);

        tx.send_request(event.clone()).unwrap();

        assert_eq!(rx.recv().await, Some(event));
    }

    #[tokio::test]
    async fn test_full_or_closed_channel_is_an_error() {
        let (tx, rx) = tokio::sync::mpsc::channel(1);
        let event = SummaryRequestBuilder::new().build(&[]);

        tx.send_request(event.clone()).unwrap();
        assert!(tx.send_request(event.clone()).is_err(), "channel is full");

        drop(rx);
        assert!(tx.send_request(event).is_err(), "channel is closed");
    }
}
