//! Configuration structures for the help-plus bot.
//!
//! The configuration is loaded once at startup from a YAML file, then
//! overridden by environment variables. Two families of variables are read:
//!
//! - `HELP_PLUS_*` variables override any key, nested with `__`
//!   (e.g. `HELP_PLUS_BOT__NAME=marvin`)
//! - `HUBOT_HELP_*` variables override the `help` section, so existing
//!   deployments keep working unchanged
//!
//! # Configuration File Format
//!
//! ```yaml
//! bot:
//!   # Robot name, used in the web path and on the help page
//!   name: "hubot"
//!   # Optional display name used to address the bot in chat
//!   alias: "!"
//!
//! http:
//!   # Address the web help page listens on
//!   address: "0.0.0.0:8080"
//!
//! help:
//!   # Any non-empty value sends help replies in private
//!   reply_in_private: "yes"
//!   # Any value disables the web help page
//!   disable_http: ~
//!   # Comma-separated patterns of commands to hide
//!   hidden_commands: "ping,adapter"
//!
//! # Help strings registered by the other bot modules
//! commands:
//!   - "hubot ping - Reply with pong"
//!   - "hubot adapter - Reply with the adapter"
//! ```

use figment::{
    Figment,
    providers::{Env, Format, Yaml},
};
use serde::{Deserialize, Deserializer};

/// Default address of the web help page.
const DEFAULT_HTTP_ADDRESS: &str = "0.0.0.0:8080";

/// Root configuration structure for the help-plus bot.
#[derive(Debug, Deserialize)]
pub struct Config {
    /// Identity of the bot
    pub bot: BotIdentity,
    /// Web server configuration
    #[serde(default)]
    pub http: Http,
    /// Help listing settings
    #[serde(default)]
    pub help: HelpSettings,
    /// Help strings registered by the other bot modules.
    ///
    /// Each entry has the form `hubot <args> - <description>`.
    #[serde(default)]
    pub commands: Vec<String>,
}

impl Config {
    /// Loads the configuration from a YAML file and the process environment.
    ///
    /// Environment variables take precedence over the file, and `HUBOT_HELP_*`
    /// variables take precedence over `HELP_PLUS_HELP__*` ones.
    ///
    /// # Errors
    ///
    /// Returns an error if the merged configuration is missing a required key
    /// (such as `bot.name`) or has a value of the wrong type.
    pub fn load(path: &str) -> Result<Self, anyhow::Error> {
        let config = Figment::new()
            .merge(Yaml::file(path))
            .merge(Env::prefixed("HELP_PLUS_").split("__"))
            .merge(Env::prefixed("HUBOT_HELP_").map(|key| format!("help.{}", key).into()))
            .extract()?;

        Ok(config)
    }
}

/// Names under which the bot is known.
#[derive(Debug, Clone, Deserialize)]
pub struct BotIdentity {
    /// Robot name.
    ///
    /// Used for the web page path (`/<name>/help`), the page title, the
    /// bolding of the name in the page, and the continuation notice of
    /// truncated chat help.
    pub name: String,
    /// Optional alias used to address the bot in chat (e.g. `!`).
    #[serde(default)]
    pub alias: Option<String>,
}

impl BotIdentity {
    /// Checks the robot name can be used in the web path and for bolding.
    ///
    /// The name must be non-blank and fit in one literal path segment: no
    /// `/`, `{` or `}`, and no leading `:` or `*`.
    ///
    /// # Errors
    ///
    /// Returns an error describing the first problem found.
    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.name.trim().is_empty() {
            return Err(anyhow::anyhow!("bot name must not be empty"));
        }

        if self.name.contains(['/', '{', '}']) || self.name.starts_with([':', '*']) {
            return Err(anyhow::anyhow!(
                "bot name {:?} cannot be used in the help page path",
                self.name
            ));
        }

        Ok(())
    }

    /// Name the help entries are rewritten to: the alias when set, the robot
    /// name otherwise.
    pub fn display_name(&self) -> &str {
        match self.alias.as_deref() {
            Some(alias) if !alias.is_empty() => alias,
            _ => &self.name,
        }
    }
}

/// Web server configuration.
#[derive(Debug, Deserialize)]
pub struct Http {
    /// Socket address the web help page listens on
    pub address: String,
}

impl Default for Http {
    fn default() -> Self {
        Http {
            address: DEFAULT_HTTP_ADDRESS.to_owned(),
        }
    }
}

/// Help listing settings.
///
/// Values are kept as the raw configured text: the presence of a setting is
/// what matters, as with plain environment flags.
#[derive(Debug, Default, Deserialize)]
pub struct HelpSettings {
    /// Sends help replies in private when set to a non-empty value
    #[serde(default, deserialize_with = "deserialize_setting")]
    pub reply_in_private: Option<String>,
    /// Disables the web help page when set, whatever the value
    #[serde(default, deserialize_with = "deserialize_setting")]
    pub disable_http: Option<String>,
    /// Comma-separated patterns of commands excluded from the help
    #[serde(default, deserialize_with = "deserialize_setting")]
    pub hidden_commands: Option<String>,
}

impl HelpSettings {
    /// Whether help replies should be sent in private.
    pub fn replies_in_private(&self) -> bool {
        self.reply_in_private
            .as_deref()
            .is_some_and(|value| !value.is_empty())
    }

    /// Whether the web help page is disabled.
    pub fn http_disabled(&self) -> bool {
        self.disable_http.is_some()
    }

    /// Returns the hidden command patterns.
    ///
    /// Patterns are trimmed and empty items are dropped, so an unset or blank
    /// setting yields no pattern at all.
    pub fn hidden_patterns(&self) -> Vec<String> {
        self.hidden_commands
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|pattern| !pattern.is_empty())
            .map(str::to_owned)
            .collect()
    }
}

/// Raw shapes a setting can take once YAML or the environment parsed it.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawSetting {
    Flag(bool),
    Integer(i64),
    Float(f64),
    Text(String),
    List(Vec<String>),
}

/// Deserializes a setting into its textual form.
///
/// Environment values such as `1` or `true` reach serde as numbers or
/// booleans; they are turned back into text, so `false` still sets the
/// setting. A list is joined with commas.
fn deserialize_setting<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawSetting>::deserialize(deserializer)?;

    Ok(raw.and_then(|raw| match raw {
        RawSetting::Flag(value) => Some(value.to_string()),
        RawSetting::Integer(value) => Some(value.to_string()),
        RawSetting::Float(value) => Some(value.to_string()),
        RawSetting::Text(value) => Some(value),
        RawSetting::List(values) => Some(values.join(",")),
    }))
}
