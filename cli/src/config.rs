use serde::{Deserialize, Serialize};

use vanishing_ttt::GameMode;

pub const DEFAULT_BOT_DELAY_MS: u64 = 500;
const MAX_BOT_DELAY_MS: u64 = 10_000;

/// Client configuration, loaded from a YAML file. A missing file yields the
/// defaults; a malformed or invalid file is an error.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Pause before the bot's move is computed and applied, purely so the
    /// "thinking" state is visible. Canceled by any command arriving first.
    pub bot_delay_ms: u64,
    /// Optional mode to start in, skipping the selection prompt:
    /// "single" or "two-player".
    pub default_mode: Option<String>,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            bot_delay_ms: DEFAULT_BOT_DELAY_MS,
            default_mode: None,
        }
    }
}

impl CliConfig {
    pub fn load(path: &str) -> Result<Self, String> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Self::default());
            }
            Err(e) => return Err(format!("Failed to read config {}: {}", path, e)),
        };

        let config: Self = serde_yaml_ng::from_str(&content)
            .map_err(|e| format!("Failed to parse config {}: {}", path, e))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.bot_delay_ms > MAX_BOT_DELAY_MS {
            return Err(format!(
                "bot_delay_ms must be at most {}, got {}",
                MAX_BOT_DELAY_MS, self.bot_delay_ms
            ));
        }
        if let Some(ref mode) = self.default_mode {
            if parse_mode(mode).is_none() {
                return Err(format!(
                    "default_mode must be \"single\" or \"two-player\", got \"{}\"",
                    mode
                ));
            }
        }
        Ok(())
    }
}

pub fn parse_mode(value: &str) -> Option<GameMode> {
    match value {
        "single" => Some(GameMode::SingleBot),
        "two-player" => Some(GameMode::TwoHuman),
        _ => None,
    }
}
