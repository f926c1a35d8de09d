use crate::models::FinishReason;
use crate::models::Role;
use crate::models::response_direct::ChatCompletion;
use crate::models::response_stream::ChatCompletionChunk;

pub fn assert_chat_completion(
    response: &ChatCompletion,
    expected_model: &str,
    expected_content: &str,
) {
    assert_eq!(&response.model, expected_model);
    assert_eq!(response.object, "chat.completion");
    assert_eq!(response.choices.len(), 1);

    let choice = &response.choices[0];
    assert_eq!(choice.index, 0);
    assert_eq!(choice.finish_reason, FinishReason::Stop);
    assert_eq!(choice.message.role, Role::Assistant);
    assert_eq!(choice.message.content, expected_content);
}

pub fn assert_content_chunk(
    chunk: &ChatCompletionChunk,
    expected_model: &str,
    expected_content: &str,
    expected_finish: Option<FinishReason>,
) {
    assert_eq!(&chunk.model, expected_model);
    assert_eq!(chunk.object, "chat.completion.chunk");
    assert_eq!(chunk.choices.len(), 1);

    let choice = &chunk.choices[0];
    assert_eq!(choice.index, 0);
    assert_eq!(choice.delta.content.as_deref(), Some(expected_content));
    assert_eq!(choice.finish_reason, expected_finish);
}
