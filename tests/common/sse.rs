use aigc_gateway::models::response_stream::ChatCompletionChunk;

/// Splits an SSE body into the payloads of its `data:` events.
pub fn sse_payloads(body: &str) -> Vec<String> {
    body.split_terminator("\n\n")
        .map(|event| {
            event
                .strip_prefix("data: ")
                .unwrap_or_else(|| panic!("not an SSE data event: {event:?}"))
                .to_string()
        })
        .collect()
}

/// Parses every payload except the trailing `[DONE]` as a chunk.
pub fn parse_chunks(payloads: &[String]) -> Vec<ChatCompletionChunk> {
    assert_eq!(payloads.last().map(String::as_str), Some("[DONE]"));
    payloads[..payloads.len() - 1]
        .iter()
        .map(|p| serde_json::from_str(p).expect("chunk json"))
        .collect()
}

pub fn joined_content(chunks: &[ChatCompletionChunk]) -> String {
    chunks
        .iter()
        .filter_map(|c| c.choices[0].delta.content.clone())
        .collect()
}
