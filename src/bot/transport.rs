use std::fmt;
use std::path::Path;

use async_trait::async_trait;

use crate::error::Result;

/// Identity of one conversation, as tagged on every inbound event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChatId(pub i64);

impl fmt::Display for ChatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One labeled choice button; `data` comes back verbatim as the callback
/// payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    pub label: String,
    pub data: String,
}

impl Button {
    pub fn new(label: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            data: data.into(),
        }
    }
}

pub type Keyboard = Vec<Vec<Button>>;

/// Outbound side of the chat collaborator. The conversation core only ever
/// speaks this trait; delivery, rendering, and command routing live outside.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    async fn send_text(&self, chat: ChatId, text: &str) -> Result<()>;

    /// Text message with a set of labeled choice buttons attached.
    async fn send_menu(&self, chat: ChatId, text: &str, keyboard: Keyboard) -> Result<()>;

    /// Image from a local file with a caption and optional action buttons.
    async fn send_image(
        &self,
        chat: ChatId,
        image: &Path,
        caption: &str,
        actions: Option<Keyboard>,
    ) -> Result<()>;

    /// Short acknowledgment of a callback selection.
    async fn ack(&self, chat: ChatId, text: &str) -> Result<()>;
}
