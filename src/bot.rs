//! Bot module wiring the help service to a chat adapter and a web server.
//!
//! This module provides the main [`Bot`] implementation. It owns the chat
//! [`Adapter`], the shared [`HelpService`], and serves the web help page.
//!
//! # Architecture
//!
//! The bot runs two concurrent parts:
//!
//! 1. **Web Task**: Serves `GET /<robot name>/help` in the background, unless
//!    the web page is disabled in the configuration.
//!
//! 2. **Chat Loop**: Receives messages from the adapter one at a time and
//!    answers `help` requests addressed to the bot.
//!
//! # Message Processing Flow
//!
//! ```text
//! Adapter Message → Parse Help Request → Render → Deliver (room or private)
//! ```
//!
//! # Example
//!
//! ```no_run
//! # use help_plus::bot::Bot;
//! # use help_plus::config::Config;
//! # use help_plus::adapter::ShellAdapter;
//! # async fn run() -> Result<(), anyhow::Error> {
//! let config = Config::load("config.yaml")?;
//!
//! let bot = Bot::new(config, ShellAdapter::new())?;
//! bot.start().await?; // Runs until the adapter closes
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use log::{error, info};
use tokio::net::TcpListener;

use crate::{
    adapter::{Adapter, Message},
    config::Config,
    help::{HelpService, web},
};

/// Main bot structure answering help requests in chat and on the web.
///
/// The [`HelpService`] is wrapped in `Arc` to be shared between the chat loop
/// and the web server task. It is immutable, so no lock is needed.
pub struct Bot<A: Adapter> {
    /// Chat platform adapter
    adapter: A,
    /// Help listing shared by the chat loop and the web server
    help: Arc<HelpService>,
    /// Address the web help page listens on, `None` when disabled
    http_address: Option<String>,
}

impl<A: Adapter> Bot<A> {
    /// Creates a new Bot from the configuration and a chat adapter.
    ///
    /// # Arguments
    ///
    /// * `config` - Loaded configuration (identity, help settings, commands)
    /// * `adapter` - Chat platform adapter
    ///
    /// # Errors
    ///
    /// Returns an error if the help service cannot be built, e.g. when a
    /// hidden command pattern is invalid.
    pub fn new(config: Config, adapter: A) -> Result<Self, anyhow::Error> {
        let http_address = match config.help.http_disabled() {
            true => None,
            false => Some(config.http.address),
        };

        let help = Arc::new(HelpService::new(config.bot, &config.help, config.commands)?);

        Ok(Bot {
            adapter,
            help,
            http_address,
        })
    }

    /// Starts the bot.
    ///
    /// The web help page is bound first, so an unavailable address fails
    /// immediately. Messages are then processed until the adapter closes.
    ///
    /// # Errors
    ///
    /// Returns an error if the web help page address cannot be bound.
    pub async fn start(self) -> Result<(), anyhow::Error> {
        match &self.http_address {
            Some(address) => self.start_web_task(address).await?,
            None => info!("web help page disabled"),
        }

        info!("listening for help requests on the {} adapter", self.adapter.name());

        while let Some(message) = self.adapter.receive().await {
            self.handle_message(message).await;
        }

        info!("{} adapter closed", self.adapter.name());
        Ok(())
    }

    /// Binds the web help page and serves it in a background task.
    async fn start_web_task(&self, address: &str) -> Result<(), anyhow::Error> {
        let listener = TcpListener::bind(address).await?;
        let router = web::router(Arc::clone(&self.help));

        info!(
            "serving help page on http://{}{}",
            listener.local_addr()?,
            web::help_path(self.help.robot_name())
        );

        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, router).await {
                error!("web help page stopped: {}", e);
            }
        });

        Ok(())
    }

    /// Answers a message if it is a help request addressed to the bot.
    async fn handle_message(&self, message: Message) {
        if let Some(request) = self.help.parse_request(&message.text) {
            self.help
                .respond(&self.adapter, &message.envelope, &request)
                .await;
        }
    }
}

#[cfg(test)]
mod tests {
    use mockall::predicate::eq;

    use super::*;
    use crate::{
        adapter::{Envelope, MockAdapter, User},
        config::{BotIdentity, HelpSettings, Http},
    };

    fn create_config(disable_http: bool, address: &str) -> Config {
        Config {
            bot: BotIdentity {
                name: "marvin".to_owned(),
                alias: None,
            },
            http: Http {
                address: address.to_owned(),
            },
            help: HelpSettings {
                disable_http: disable_http.then(|| "1".to_owned()),
                hidden_commands: Some("adapter".to_owned()),
                ..Default::default()
            },
            commands: vec![
                "hubot ping - Reply with pong".to_owned(),
                "hubot adapter - Reply with the adapter".to_owned(),
                "hubot echo <text> - Reply back with <text>".to_owned(),
            ],
        }
    }

    fn create_message(text: &str) -> Message {
        Message {
            envelope: Envelope {
                room: "general".to_owned(),
                user: User {
                    id: Some("1".to_owned()),
                    name: Some("arthur".to_owned()),
                },
            },
            text: text.to_owned(),
        }
    }

    fn create_adapter(messages: Vec<Message>) -> MockAdapter {
        let mut inbox = messages;
        inbox.reverse();

        let mut adapter = MockAdapter::new();
        adapter.expect_name().return_const("shell".to_owned());
        adapter.expect_receive().returning(move || inbox.pop());
        adapter
    }

    #[test]
    fn test_new_rejects_invalid_hidden_pattern() {
        let mut config = create_config(true, "127.0.0.1:0");
        config.help.hidden_commands = Some("(".to_owned());

        assert!(Bot::new(config, MockAdapter::new()).is_err());
    }

    #[test]
    fn test_new_rejects_name_unusable_in_path() {
        let mut config = create_config(false, "127.0.0.1:0");
        config.bot.name = "{marvin}".to_owned();

        assert!(Bot::new(config, MockAdapter::new()).is_err());
    }

    #[tokio::test]
    async fn test_start_answers_help_requests() {
        let mut adapter = create_adapter(vec![
            create_message("marvin help"),
            create_message("hello everyone"),
            create_message("marvin help ping"),
            create_message("marvin help adapter"),
        ]);

        adapter
            .expect_send()
            .with(
                eq("general"),
                eq("marvin echo <text> - Reply back with <text>\nmarvin ping - Reply with pong"),
            )
            .times(1)
            .returning(|_, _| ());
        adapter
            .expect_send()
            .with(eq("general"), eq("marvin ping - Reply with pong"))
            .times(1)
            .returning(|_, _| ());
        adapter
            .expect_send()
            .with(eq("general"), eq("No available commands match: adapter"))
            .times(1)
            .returning(|_, _| ());
        adapter.expect_reply().never();

        let bot = Bot::new(create_config(true, "127.0.0.1:0"), adapter).unwrap();
        bot.start().await.unwrap();
    }

    #[tokio::test]
    async fn test_start_fails_on_invalid_address() {
        let adapter = create_adapter(vec![]);
        let bot = Bot::new(create_config(false, "not an address"), adapter).unwrap();

        assert!(bot.start().await.is_err());
    }

    #[tokio::test]
    async fn test_web_help_page_is_served() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();
        let bot = Bot::new(create_config(false, "127.0.0.1:0"), create_adapter(vec![])).unwrap();

        let router = web::router(Arc::clone(&bot.help));
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        let response = reqwest::get(format!("http://{}/marvin/help?q=ping", address))
            .await
            .unwrap();
        assert!(response.status().is_success());
        assert!(
            response
                .headers()
                .get("content-type")
                .unwrap()
                .to_str()
                .unwrap()
                .starts_with("text/html")
        );

        let body = response.text().await.unwrap();
        assert!(body.contains("<title>marvin help</title>"));
        assert!(body.contains("<p><b>marvin</b> ping - Reply with pong</p>"));
        assert!(!body.contains("echo"));
        assert!(!body.contains("adapter"));

        let response = reqwest::get(format!("http://{}/other/help", address))
            .await
            .unwrap();
        assert_eq!(response.status().as_u16(), 404);
    }
}
