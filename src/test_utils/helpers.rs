use std::time::Duration;

use actix_web::web::Bytes;
use tokio::sync::mpsc;

use crate::errors::GatewayError;
use crate::upstream::ByteStream;

pub fn byte_stream(reads: Vec<Result<Bytes, GatewayError>>) -> ByteStream {
    Box::pin(tokio_stream::iter(reads))
}

/// One upstream read per entry.
pub fn text_stream(reads: &[&str]) -> ByteStream {
    byte_stream(
        reads
            .iter()
            .map(|r| Ok(Bytes::copy_from_slice(r.as_bytes())))
            .collect(),
    )
}

/// Drains the SSE channel into one string per event.
pub async fn collect_sse(
    receiver: &mut mpsc::Receiver<Result<Bytes, GatewayError>>,
) -> Vec<String> {
    let mut events = vec![];
    while let Ok(Some(result)) =
        tokio::time::timeout(Duration::from_secs(5), receiver.recv()).await
    {
        let bytes = result.expect("sink never sends Err items");
        events.push(String::from_utf8_lossy(&bytes).to_string());
    }
    events
}
