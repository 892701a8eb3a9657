//! 主循环
//!
//! Poll → handle each event in order → poll again, until `shutdown` resolves.

use std::future::Future;
use std::time::Duration;

use crate::controller::MenuController;
use crate::transport::{ChatSink, EventSource};

/// Pause after a failed poll before trying again.
pub const POLL_RETRY_DELAY: Duration = Duration::from_secs(5);

/// Run the console until `shutdown` completes.
///
/// An event being handled when shutdown fires is finished first.
pub async fn run<T>(
    transport: &T,
    controller: &MenuController,
    shutdown: impl Future<Output = ()>,
) where
    T: EventSource + ChatSink,
{
    tokio::pin!(shutdown);
    let mut cursor = 0;

    loop {
        let batch = tokio::select! {
            () = &mut shutdown => break,
            batch = transport.next_events(cursor) => batch,
        };

        match batch {
            Ok((next, events)) => {
                cursor = next;
                for event in events {
                    let chat_id = event.chat_id;
                    if let Err(e) = controller.handle(event, transport).await {
                        tracing::warn!("Failed to update chat {chat_id}: {e}");
                    }
                }
            }
            Err(e) => {
                tracing::error!("Polling for updates failed: {e}");
                tokio::select! {
                    () = &mut shutdown => break,
                    () = tokio::time::sleep(POLL_RETRY_DELAY) => {}
                }
            }
        }
    }

    tracing::info!(
        "Stopped polling with {} chat session(s) in memory",
        controller.sessions().chat_count().await
    );
}
