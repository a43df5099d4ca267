//! Help listing for the bot.
//!
//! This module provides the [`HelpService`], which lists the help strings
//! registered by the other bot modules, in chat and on a web page.
//!
//! # Overview
//!
//! Both surfaces share the same command list:
//!
//! ```text
//! registry → hide → rename → sort ─┬─ query | page | truncate → chat reply
//!                                  └─ escape → query → bold → HTML page
//! ```
//!
//! # Chat Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `<bot> help` | Every command, truncated past 2000 characters |
//! | `<bot> help <query>` | Commands matching `<query>` |
//! | `<bot> help <page>` | Ten commands at a time |
//!
//! # Web Page
//!
//! `GET /<robot name>/help[?q=<query>]`, unless disabled in the configuration.
//!
//! # Module Organization
//!
//! - [`builder`] - Command list building: hide, rename, sort
//! - [`chat`] - Chat request parsing and answer assembly
//! - [`web`] - HTML rendering and HTTP route
//! - [`responses`] - Response formatters

pub mod builder;
pub mod chat;
pub mod responses;
pub mod web;

use log::debug;
use regex::Regex;

use crate::{
    adapter::{Adapter, Envelope, PrivateMessagingPlatform},
    config::{BotIdentity, HelpSettings},
    help::{
        builder::{build_command_list, hidden_commands_pattern},
        chat::{ChatResponse, HelpRequest, help_listener, parse_request, render_chat},
        responses::format_private_ack,
        web::render_help_page,
    },
    utils::case_insensitive,
};

/// Source of the help strings registered by the bot modules.
pub trait CommandRegistry: Send + Sync {
    /// Returns every registered help string, in any order.
    fn help_commands(&self) -> Vec<String>;
}

impl CommandRegistry for Vec<String> {
    fn help_commands(&self) -> Vec<String> {
        self.clone()
    }
}

/// Help listing service shared by the chat and web surfaces.
///
/// The service is immutable once built: patterns are compiled and settings
/// read at construction, and the command list is rebuilt from the registry on
/// every request.
pub struct HelpService {
    /// Names of the bot
    identity: BotIdentity,
    /// Registered help strings
    registry: Box<dyn CommandRegistry>,
    /// Matcher of hidden commands, `None` when nothing is hidden
    hidden_commands: Option<Regex>,
    /// Matcher of chat help requests
    listener: Regex,
    /// Case-insensitive matcher of the robot name, for bolding on the web page
    robot_name_pattern: Regex,
    /// Whether help is delivered in private when possible
    reply_in_private: bool,
}

impl HelpService {
    /// Creates a new [`HelpService`].
    ///
    /// # Arguments
    ///
    /// * `identity` - Name and alias of the bot
    /// * `settings` - Help settings (hidden commands, private replies)
    /// * `registry` - Source of the registered help strings
    ///
    /// # Errors
    ///
    /// Returns an error if the robot name cannot be served (see
    /// [`BotIdentity::validate`]) or if a hidden command pattern is not a
    /// valid regular expression.
    pub fn new(
        identity: BotIdentity,
        settings: &HelpSettings,
        registry: impl CommandRegistry + 'static,
    ) -> Result<Self, anyhow::Error> {
        identity.validate()?;

        let hidden_patterns = settings.hidden_patterns();
        debug!(
            "hidden commands = {} | {}",
            hidden_patterns.len(),
            hidden_patterns.join(",")
        );

        let hidden_commands = hidden_commands_pattern(&hidden_patterns)
            .map_err(|e| anyhow::anyhow!("invalid hidden commands: {}", e))?;
        let listener = help_listener(&identity)?;
        let robot_name_pattern = case_insensitive(&regex::escape(&identity.name))?;

        Ok(HelpService {
            identity,
            registry: Box::new(registry),
            hidden_commands,
            listener,
            robot_name_pattern,
            reply_in_private: settings.replies_in_private(),
        })
    }

    /// Name of the robot.
    pub fn robot_name(&self) -> &str {
        &self.identity.name
    }

    /// Builds the sorted list of visible commands, renamed for the bot.
    pub fn build_command_list(&self) -> Vec<String> {
        build_command_list(
            &self.registry.help_commands(),
            self.identity.display_name(),
            self.hidden_commands.as_ref(),
        )
    }

    /// Parses a chat message into a help request, if it is one.
    pub fn parse_request(&self, text: &str) -> Option<HelpRequest> {
        parse_request(&self.listener, text)
    }

    /// Assembles the answer to a chat help request.
    pub fn render_chat(&self, request: &HelpRequest) -> ChatResponse {
        render_chat(self.build_command_list(), request, &self.identity.name)
    }

    /// Renders the web help page, filtered with `query` when given.
    pub fn render_page(&self, query: Option<&str>) -> String {
        render_help_page(
            self.build_command_list(),
            query,
            &self.identity.name,
            &self.robot_name_pattern,
        )
    }

    /// Answers a chat help request through `adapter`.
    ///
    /// A query matching nothing is answered in the originating room. Help is
    /// delivered in private when enabled and a private room can be resolved
    /// (see [`HelpService::private_room`]); the user is then told so in the
    /// originating room.
    pub async fn respond<A: Adapter>(&self, adapter: &A, envelope: &Envelope, request: &HelpRequest) {
        let help = match self.render_chat(request) {
            ChatResponse::NoMatch(message) => {
                adapter.send(&envelope.room, &message).await;
                return;
            }
            ChatResponse::Help(help) => help,
        };

        match self.private_room(&adapter.name(), envelope) {
            Some(room) => {
                debug!("sending help in private to {}", room);
                adapter.reply(envelope, &format_private_ack()).await;
                adapter.send(&room, &help).await;
            }
            None => adapter.send(&envelope.room, &help).await,
        }
    }

    /// Resolves the room a private help is sent to.
    ///
    /// Platforms able to message a user identifier use the user id; otherwise
    /// the user name is used. Returns `None` when private replies are disabled
    /// or the user cannot be resolved.
    fn private_room(&self, adapter_name: &str, envelope: &Envelope) -> Option<String> {
        if !self.reply_in_private {
            return None;
        }

        let user_id = envelope.user.id.as_deref().filter(|id| !id.is_empty());
        if let (Some(_), Some(id)) = (PrivateMessagingPlatform::from_adapter_name(adapter_name), user_id) {
            return Some(id.to_owned());
        }

        envelope
            .user
            .name
            .as_deref()
            .filter(|name| !name.is_empty())
            .map(str::to_owned)
    }
}
