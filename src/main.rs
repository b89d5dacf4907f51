use std::path::Path;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, BufReader};

use fusegen::{
    ChatId, ChatTransport, Command, Config, ConversationController, FusionApi, FusionError,
    GenerationClient, Keyboard, Result,
};

/// Minimal local chat collaborator: prints outbound traffic and copies
/// delivered images into the working directory so they survive artifact
/// cleanup.
struct ConsoleTransport {
    delivered: AtomicU32,
}

impl ConsoleTransport {
    fn new() -> Self {
        Self {
            delivered: AtomicU32::new(0),
        }
    }
}

#[async_trait]
impl ChatTransport for ConsoleTransport {
    async fn send_text(&self, _chat: ChatId, text: &str) -> Result<()> {
        println!("{}", text);
        Ok(())
    }

    async fn send_menu(&self, _chat: ChatId, text: &str, keyboard: Keyboard) -> Result<()> {
        println!("{}", text);
        for row in keyboard {
            for button in row {
                println!("  [{}] -> {}", button.label, button.data);
            }
        }
        Ok(())
    }

    async fn send_image(
        &self,
        _chat: ChatId,
        image: &Path,
        caption: &str,
        actions: Option<Keyboard>,
    ) -> Result<()> {
        let n = self.delivered.fetch_add(1, Ordering::Relaxed) + 1;
        let target = format!("fusegen-output-{}.png", n);
        std::fs::copy(image, &target).map_err(|e| FusionError::IoError(e.to_string()))?;

        println!("{}", caption);
        println!("📁 Saved to {}", target);
        if let Some(keyboard) = actions {
            for row in keyboard {
                for button in row {
                    println!("  [{}] -> {}", button.label, button.data);
                }
            }
        }
        Ok(())
    }

    async fn ack(&self, _chat: ChatId, text: &str) -> Result<()> {
        println!("» {}", text);
        Ok(())
    }
}

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    match dotenv::dotenv() {
        Ok(_) => log::info!("✅ .env file loaded successfully"),
        Err(_) => log::warn!("⚠️  No .env file found, using system environment variables"),
    }

    fusegen::logger::init_with_config(fusegen::logger::LoggerConfig::development())?;

    log::info!("🔍 Checking FusionBrain environment...");

    let config = Config::from_env();
    let fusion = config
        .fusion
        .clone()
        .ok_or("FusionBrain configuration missing")?;

    match (&fusion.api_key, &fusion.secret_key) {
        (Some(api_key), Some(_)) => {
            log::info!("✅ FusionBrain credentials found in environment");
            log::debug!(
                "API key starts with: {}...",
                &api_key[..5.min(api_key.len())]
            );
        }
        _ => {
            log::error!(
                "❌ FUSIONBRAIN_API_KEY / FUSIONBRAIN_SECRET_KEY not set, requests will fail"
            );
        }
    }

    if config.bot_token.is_none() {
        log::warn!("⚠️  TELEGRAM_BOT_TOKEN not set; running with the console transport only");
    }

    log::info!("🔄 Creating FusionBrain client...");
    let api = match FusionApi::new(fusion) {
        Ok(api) => {
            log::info!("✅ FusionBrain client initialized successfully");
            api
        }
        Err(e) => {
            log::error!("❌ Failed to initialize FusionBrain client: {}", e);
            return Err(e.into());
        }
    };

    let generator = GenerationClient::new(Arc::new(api));
    let controller = Arc::new(ConversationController::new(
        generator,
        Arc::new(ConsoleTransport::new()),
    ));

    let chat = ChatId(0);
    controller.handle_command(chat, Command::Start).await;
    log::info!("💬 Type a prompt, a /command, or a callback payload (e.g. style_ANIME)");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim().to_string();
        if line.is_empty() {
            continue;
        }
        if line == "/quit" {
            break;
        }

        // one task per inbound event so a poll loop never blocks the REPL
        let controller = Arc::clone(&controller);
        tokio::spawn(async move {
            match line.as_str() {
                "/start" => controller.handle_command(chat, Command::Start).await,
                "/help" => controller.handle_command(chat, Command::Help).await,
                "/style" => controller.handle_command(chat, Command::Style).await,
                "/size" => controller.handle_command(chat, Command::Size).await,
                "/example" => controller.handle_command(chat, Command::Example).await,
                text => {
                    if let Some(style) = text.strip_prefix("style_") {
                        controller.handle_style_callback(chat, style).await;
                    } else if let Some(size) = text.strip_prefix("size_") {
                        controller.handle_size_callback(chat, size).await;
                    } else if let Some(key) = text.strip_prefix("regenerate_") {
                        controller.handle_regenerate(chat, key).await;
                    } else {
                        controller.handle_message(chat, text).await;
                    }
                }
            }
        });
    }

    log::info!("👋 Shutting down");
    Ok(())
}
