use quickcall_core::{ChatClient, ChatError, Conversation};

/// System prompt of the translator.
pub const TRANSLATOR_PROMPT: &str = "You are a helpful assistant for \
english to hindi translator. Don't reply to any question other than \
translation. Reply calmly.";

/// Builds the two-message conversation asking for a translation of `text`.
#[inline]
pub fn translation_request(text: &str) -> Conversation {
    Conversation::new()
        .with_system(TRANSLATOR_PROMPT)
        .with_user(format!(
            "Translate the following English text to Hindi: '{text}'"
        ))
}

/// Translates English `text` to Hindi with one chat completion.
pub async fn translate(
    client: &ChatClient,
    text: &str,
) -> Result<String, ChatError> {
    client.ask(translation_request(text)).await
}

#[cfg(test)]
mod tests {
    use quickcall_model::ModelMessage;
    use quickcall_test_model::{PresetReply, TestModelProvider};
    use serde_json::json;

    use super::*;

    #[tokio::test]
    async fn test_translate() {
        let provider = TestModelProvider::default();
        provider.add_reply(PresetReply::content("नमस्ते, आप कैसे हैं?"));
        let client = ChatClient::new(provider.clone());

        let reply = translate(&client, "Hello, how are you?").await.unwrap();
        assert_eq!(reply, "नमस्ते, आप कैसे हैं?");

        let requests = provider.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(
            requests[0].messages,
            [
                ModelMessage::System(TRANSLATOR_PROMPT.to_owned()),
                ModelMessage::User(
                    "Translate the following English text to Hindi: \
                     'Hello, how are you?'"
                        .to_owned()
                ),
            ]
        );
    }

    #[tokio::test]
    async fn test_translate_failure() {
        let provider = TestModelProvider::default();
        provider.add_reply(PresetReply::api_failure(
            "401 Unauthorized",
            json!({ "error": { "message": "Invalid API Key" } }),
        ));
        let client = ChatClient::new(provider.clone());

        let err = translate(&client, "Hello").await.unwrap_err();
        assert!(err.detail().contains("Invalid API Key"));
        assert_eq!(provider.request_count(), 1);
    }
}
