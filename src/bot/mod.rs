pub mod menus;
pub mod transport;

use std::path::PathBuf;
use std::sync::Arc;

use uuid::Uuid;

use crate::{
    error::{FusionError, Result},
    fusion::GenerationClient,
    models::settings::{validate_dimensions, UserSettings},
    store::{PromptRegistry, UserSettingsStore},
};

pub use transport::{Button, ChatId, ChatTransport, Keyboard};

/// Slash commands routed in by the transport layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Help,
    Style,
    Size,
    Example,
}

/// Turns inbound chat events into generation work and reports every outcome
/// back through the transport. All faults are converted to user-visible
/// messages here; nothing propagates to the caller.
pub struct ConversationController {
    generator: GenerationClient,
    settings: UserSettingsStore,
    prompts: PromptRegistry,
    transport: Arc<dyn ChatTransport>,
}

impl ConversationController {
    pub fn new(generator: GenerationClient, transport: Arc<dyn ChatTransport>) -> Self {
        Self {
            generator,
            settings: UserSettingsStore::new(),
            prompts: PromptRegistry::new(),
            transport,
        }
    }

    /// Current configuration for a user, for help/menu rendering.
    pub fn settings(&self, chat: ChatId) -> UserSettings {
        self.settings.get_or_init(chat)
    }

    pub async fn handle_command(&self, chat: ChatId, command: Command) {
        let outcome = match command {
            Command::Start => {
                self.settings.get_or_init(chat);
                self.transport.send_text(chat, &menus::start_text()).await
            }
            Command::Help => {
                let text = menus::help_text(&self.settings(chat));
                self.transport.send_text(chat, &text).await
            }
            Command::Style => {
                self.transport
                    .send_menu(chat, "Choose an image style:", menus::style_keyboard())
                    .await
            }
            Command::Size => {
                self.transport
                    .send_menu(chat, "Choose an image size:", menus::size_keyboard())
                    .await
            }
            Command::Example => self.transport.send_text(chat, &menus::example_text()).await,
        };

        if let Err(e) = outcome {
            log::error!("Failed to answer {:?} for chat {}: {}", command, chat, e);
        }
    }

    /// Free-text message: a two-integer custom-size update if it parses as
    /// one, a generation prompt otherwise. The size check runs first because
    /// a two-number string would otherwise be a valid prompt.
    pub async fn handle_message(&self, chat: ChatId, text: &str) {
        match parse_size_input(text) {
            Some(Ok((width, height))) => {
                self.settings.set_size(chat, width, height);
                self.reply(chat, &format!("✅ Size set to: {}x{}", width, height))
                    .await;
            }
            Some(Err(e)) => {
                log::debug!("Rejected size input from chat {}: {}", chat, e);
                self.reply(
                    chat,
                    "❌ Invalid format. Send two numbers between 256 and 2048 separated \
                     by a space (for example: 800 600)",
                )
                .await;
            }
            None => self.run_generation(chat, text).await,
        }
    }

    /// Style selection callback; `style` is the raw payload, e.g. "ANIME".
    pub async fn handle_style_callback(&self, chat: ChatId, style: &str) {
        match style.parse() {
            Ok(style) => {
                self.settings.set_style(chat, style);
                self.ack(chat, &format!("✅ Style changed to: {}", style)).await;
            }
            Err(e) => {
                log::warn!("Bad style payload from chat {}: {}", chat, e);
                self.ack(chat, "Unknown style").await;
            }
        }
    }

    /// Size selection callback; `selection` is "WxH" or "custom".
    pub async fn handle_size_callback(&self, chat: ChatId, selection: &str) {
        if selection == "custom" {
            self.reply(
                chat,
                "Enter the size as WIDTH HEIGHT (for example: 800 600)",
            )
            .await;
            return;
        }

        let parsed = selection
            .split_once('x')
            .and_then(|(w, h)| Some((w.parse::<u32>().ok()?, h.parse::<u32>().ok()?)));

        match parsed {
            Some((width, height)) if validate_dimensions(width, height).is_ok() => {
                self.settings.set_size(chat, width, height);
                self.ack(chat, &format!("✅ Size changed to: {}x{}", width, height))
                    .await;
            }
            _ => {
                log::warn!("Bad size payload from chat {}: {}", chat, selection);
                self.ack(chat, "Unknown size").await;
            }
        }
    }

    /// Regenerate callback; `key` is the short prompt key minted at delivery.
    pub async fn handle_regenerate(&self, chat: ChatId, key: &str) {
        match self.prompts.resolve(key) {
            Some(prompt) => self.run_generation(chat, &prompt).await,
            None => self.ack(chat, "Original prompt not found").await,
        }
    }

    async fn run_generation(&self, chat: ChatId, prompt: &str) {
        let settings = self.settings.get_or_init(chat);

        self.reply(
            chat,
            &format!(
                "🖌️ Generating image...\nStyle: {}\nSize: {}\n\nPlease wait ⏳",
                settings.style,
                settings.size_label()
            ),
        )
        .await;

        log::info!("Generation started for chat {}: '{}'", chat, prompt);

        match self.generator.generate(prompt, &settings).await {
            Ok(Some(bytes)) => {
                if let Err(e) = self.deliver(chat, prompt, &settings, &bytes).await {
                    log::error!("Delivery failed for chat {}: {}", chat, e);
                    self.reply(chat, &format!("⚠️ Error: {}", e)).await;
                }
            }
            Ok(None) => {
                self.reply(chat, "❌ Couldn't generate the image. Try again later.")
                    .await;
            }
            Err(e) => {
                log::error!("Generation failed for chat {}: {}", chat, e);
                self.reply(chat, &format!("⚠️ Error: {}", e)).await;
            }
        }
    }

    /// Writes the image to a transient file, sends it with a regenerate
    /// button, and removes the file in the same pass.
    async fn deliver(
        &self,
        chat: ChatId,
        prompt: &str,
        settings: &UserSettings,
        bytes: &[u8],
    ) -> Result<()> {
        let path: PathBuf = std::env::temp_dir().join(format!("fusegen-{}.png", Uuid::new_v4()));

        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| FusionError::IoError(format!("{}: {}", path.display(), e)))?;

        let key = self.prompts.register(prompt);
        let caption = format!(
            "🎨 Result: '{}'\nStyle: {} | Size: {}",
            prompt,
            settings.style,
            settings.size_label()
        );

        let sent = self
            .transport
            .send_image(chat, &path, &caption, Some(menus::regenerate_keyboard(&key)))
            .await;

        if let Err(e) = tokio::fs::remove_file(&path).await {
            log::warn!("Failed to remove artifact {}: {}", path.display(), e);
        }

        sent
    }

    async fn reply(&self, chat: ChatId, text: &str) {
        if let Err(e) = self.transport.send_text(chat, text).await {
            log::error!("Failed to message chat {}: {}", chat, e);
        }
    }

    async fn ack(&self, chat: ChatId, text: &str) {
        if let Err(e) = self.transport.ack(chat, text).await {
            log::error!("Failed to ack chat {}: {}", chat, e);
        }
    }
}

/// `Some(Ok)` for a valid custom-size pair, `Some(Err)` for text that looks
/// like a size but is malformed or out of range, `None` for anything that
/// should be treated as a prompt.
fn parse_size_input(text: &str) -> Option<Result<(u32, u32)>> {
    let parts: Vec<&str> = text.split_whitespace().collect();
    if parts.len() != 2 {
        return None;
    }

    match (parts[0].parse::<u32>(), parts[1].parse::<u32>()) {
        (Ok(width), Ok(height)) => match validate_dimensions(width, height) {
            Ok(()) => Some(Ok((width, height))),
            Err(e) => Some(Err(e)),
        },
        (Ok(_), Err(_)) | (Err(_), Ok(_)) => Some(Err(FusionError::InputError(format!(
            "Not a number pair: '{}'",
            text
        )))),
        (Err(_), Err(_)) => None,
    }
}
