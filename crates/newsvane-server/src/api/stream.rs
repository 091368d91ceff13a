use std::convert::Infallible;

use axum::{
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
};
use futures::stream::Stream;
use tokio_stream::wrappers::errors::BroadcastStreamRecvError;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt;

use super::AppState;

/// Long-lived server-push stream of ingestion events.
///
/// Each registered browser connection is one bus subscriber for the
/// lifetime of its connection; the subscription is dropped when the client
/// disconnects. Events published before a connection opened are not
/// replayed.
pub(super) async fn ingestion_stream(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let receiver = state.bus.subscribe();

    let stream = BroadcastStream::new(receiver).filter_map(|result| match result {
        Ok(event) => match event.payload_json() {
            Ok(json) => Some(Ok(Event::default().event(event.name()).data(json))),
            Err(e) => {
                tracing::warn!(error = %e, "dropping unserializable ingest event");
                None
            }
        },
        Err(BroadcastStreamRecvError::Lagged(skipped)) => {
            // A slow consumer misses events rather than applying backpressure.
            tracing::warn!(skipped, "stream subscriber lagged; events dropped");
            None
        }
    });

    Sse::new(stream).keep_alive(KeepAlive::default())
}
