pub mod bot;
pub mod config;
pub mod error;
pub mod fusion;
pub mod logger;
pub mod models;
pub mod store;

pub use bot::{Button, ChatId, ChatTransport, Command, ConversationController, Keyboard};
pub use config::{Config, FusionConfig};
pub use error::{FusionError, Result};
pub use fusion::{FusionApi, GenerationClient, GenerationService};
pub use models::*;
pub use store::{PromptRegistry, UserSettingsStore};
