//! HTTP client for the chat backend.
//!
//! The conversation service is an external collaborator reached over
//! HTTP/JSON. This client mirrors its endpoint set: send a message, list,
//! fetch, create and delete conversations, and clear a user's history.
//! Transport failures surface as [`Error::Http`]; error replies from the
//! service surface as [`Error::Backend`] carrying the server's message.

use crate::config::ChatConfig;
use crate::i18n::Language;
use crate::{ChatReply, Conversation, ConversationSummary, Error, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use uuid::Uuid;

/// Blocking client for the conversation service
#[derive(Clone, Debug)]
pub struct ChatClient {
    http: reqwest::blocking::Client,
    base_url: String,
}

#[derive(Deserialize)]
struct ConversationsEnvelope {
    conversations: Vec<ConversationSummary>,
}

#[derive(Deserialize)]
struct CreatedEnvelope {
    conversation_id: String,
}

#[derive(Deserialize)]
struct AckEnvelope {
    message: String,
}

#[derive(Deserialize)]
struct BackendError {
    error: String,
}

#[derive(Serialize)]
struct SendMessageRequest<'a> {
    message: &'a str,
    user_id: String,
    conversation_id: Option<&'a str>,
    language: &'a str,
}

#[derive(Serialize)]
struct UserIdRequest {
    user_id: String,
}

/// Decode a reply, mapping error statuses to the server's message
fn decode<T: DeserializeOwned>(response: reqwest::blocking::Response) -> Result<T> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json()?);
    }
    let message = response
        .json::<BackendError>()
        .map(|e| e.error)
        .unwrap_or_else(|_| format!("status {}", status));
    Err(Error::Backend(message))
}

/// The most recent conversation that is still effectively empty
///
/// A conversation holding at most the opening greeting (one message) can be
/// resumed instead of piling up blank threads. The input arrives most
/// recent first.
fn resumable_conversation(conversations: &[ConversationSummary]) -> Option<&ConversationSummary> {
    conversations.iter().find(|c| c.message_count <= 1)
}

impl ChatClient {
    /// Build a client from chat configuration
    pub fn new(config: &ChatConfig) -> Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Send a message, letting the service route or create the conversation
    ///
    /// With `conversation_id` of `None` the service opens a new conversation
    /// and returns its id in the reply.
    pub fn send_message(
        &self,
        user_id: &Uuid,
        conversation_id: Option<&str>,
        message: &str,
        language: Language,
    ) -> Result<ChatReply> {
        let url = format!("{}/chat", self.base_url);
        let request = SendMessageRequest {
            message,
            user_id: user_id.to_string(),
            conversation_id,
            language: language.as_str(),
        };

        tracing::debug!("Sending chat message to {}", url);
        let response = self.http.post(&url).json(&request).send()?;
        decode(response)
    }

    /// All conversations for a user, most recently updated first
    pub fn list_conversations(&self, user_id: &Uuid) -> Result<Vec<ConversationSummary>> {
        let url = format!("{}/chat/conversations", self.base_url);
        let response = self
            .http
            .get(&url)
            .query(&[("user_id", user_id.to_string())])
            .send()?;
        let envelope: ConversationsEnvelope = decode(response)?;
        Ok(envelope.conversations)
    }

    /// One conversation with its messages
    pub fn get_conversation(&self, user_id: &Uuid, conversation_id: &str) -> Result<Conversation> {
        let url = format!("{}/chat/conversations/{}", self.base_url, conversation_id);
        let response = self
            .http
            .get(&url)
            .query(&[("user_id", user_id.to_string())])
            .send()?;
        decode(response)
    }

    /// Open a new conversation, returning its id
    pub fn create_conversation(&self, user_id: &Uuid) -> Result<String> {
        let url = format!("{}/chat/conversations", self.base_url);
        let request = UserIdRequest {
            user_id: user_id.to_string(),
        };
        let response = self.http.post(&url).json(&request).send()?;
        let envelope: CreatedEnvelope = decode(response)?;
        tracing::info!("Created conversation {}", envelope.conversation_id);
        Ok(envelope.conversation_id)
    }

    /// Delete one conversation
    pub fn delete_conversation(&self, user_id: &Uuid, conversation_id: &str) -> Result<()> {
        let url = format!("{}/chat/conversations/{}", self.base_url, conversation_id);
        let response = self
            .http
            .delete(&url)
            .query(&[("user_id", user_id.to_string())])
            .send()?;
        let ack: AckEnvelope = decode(response)?;
        tracing::debug!("Delete acknowledged: {}", ack.message);
        Ok(())
    }

    /// Clear the user's entire chat history
    pub fn clear_history(&self, user_id: &Uuid) -> Result<()> {
        let url = format!("{}/chat/clear", self.base_url);
        let request = UserIdRequest {
            user_id: user_id.to_string(),
        };
        let response = self.http.post(&url).json(&request).send()?;
        let ack: AckEnvelope = decode(response)?;
        tracing::debug!("Clear acknowledged: {}", ack.message);
        Ok(())
    }

    /// A conversation id ready to receive messages
    ///
    /// Resumes the most recent still-empty conversation when one exists,
    /// otherwise creates a new one.
    pub fn ensure_conversation(&self, user_id: &Uuid) -> Result<String> {
        let conversations = self.list_conversations(user_id)?;
        if let Some(resumable) = resumable_conversation(&conversations) {
            tracing::debug!("Resuming conversation {}", resumable.conversation_id);
            return Ok(resumable.conversation_id.clone());
        }
        self.create_conversation(user_id)
    }
}
