use crate::bot::transport::{Button, Keyboard};
use crate::models::settings::{ImageStyle, UserSettings};

pub const SIZE_PRESETS: &[(&str, &str)] = &[
    ("512x512", "512×512 (mini)"),
    ("768x768", "768×768 (medium)"),
    ("1024x1024", "1024×1024 (standard)"),
    ("custom", "Custom size..."),
];

pub const EXAMPLE_PROMPTS: &[&str] = &[
    "A space cat in a suit",
    "A castle on a cloud, anime style",
    "A robot artist painting a picture",
    "A fantasy forest with glowing plants",
    "A cyberpunk city in the rain at night",
];

pub fn start_text() -> String {
    "🎨 *Image generation bot* 🎨\n\n\
     Send me a picture description and I'll create it!\n\n\
     Available commands:\n\
     /help - usage guide\n\
     /style - choose an image style\n\
     /size - change the image size\n\
     /example - sample prompts\n\n\
     Example: *\"A space cat in a suit\"*"
        .to_string()
}

pub fn help_text(settings: &UserSettings) -> String {
    format!(
        "🖼️ *Bot help* 🖼️\n\n\
         Main commands:\n\
         /start - get started\n\
         /help - this guide\n\
         /style - choose a style (anime, realism and more)\n\
         /size - change the image size\n\
         /example - sample prompts\n\n\
         Just send a text description and I'll generate the picture!\n\n\
         Current settings:\n\
         Style: {}\n\
         Size: {}",
        settings.style,
        settings.size_label()
    )
}

pub fn example_text() -> String {
    let mut text = String::from("🎭 *Sample prompts:* 🎭\n\n");
    for prompt in EXAMPLE_PROMPTS {
        text.push_str(&format!("• `{}`\n", prompt));
    }
    text.push_str("\nTweak these or come up with your own!");
    text
}

pub fn style_keyboard() -> Keyboard {
    ImageStyle::all()
        .iter()
        .map(|style| vec![Button::new(style.label(), format!("style_{}", style))])
        .collect()
}

pub fn size_keyboard() -> Keyboard {
    SIZE_PRESETS
        .iter()
        .map(|(data, label)| vec![Button::new(*label, format!("size_{}", data))])
        .collect()
}

/// Regenerate affordance attached below a delivered image.
pub fn regenerate_keyboard(prompt_key: &str) -> Keyboard {
    vec![vec![Button::new(
        "🔄 Regenerate",
        format!("regenerate_{}", prompt_key),
    )]]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_keyboard_covers_all_styles() {
        let keyboard = style_keyboard();
        assert_eq!(keyboard.len(), ImageStyle::all().len());
        assert_eq!(keyboard[0][0].data, "style_ANIME");
    }

    #[test]
    fn test_size_keyboard_has_custom_row() {
        let keyboard = size_keyboard();
        assert!(keyboard.iter().any(|row| row[0].data == "size_custom"));
    }

    #[test]
    fn test_help_text_renders_settings() {
        let text = help_text(&UserSettings::default());
        assert!(text.contains("ANIME"));
        assert!(text.contains("1024x1024"));
    }
}
