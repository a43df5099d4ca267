//! Chat platform integration for the bot.
//!
//! An [`Adapter`] connects the bot to one chat platform: it yields inbound
//! messages with their [`Envelope`] metadata and delivers outbound text either
//! to a room or as a reply to the sender.
//!
//! The only built-in adapter is [`ShellAdapter`], which reads messages from
//! standard input and writes replies to standard output. Other platforms plug
//! in by implementing [`Adapter`].
//!
//! # Examples
//!
//! ```no_run
//! use help_plus::adapter::{Adapter, ShellAdapter};
//!
//! # async fn example() {
//! let adapter = ShellAdapter::new();
//! while let Some(message) = adapter.receive().await {
//!     adapter.reply(&message.envelope, &message.text).await;
//! }
//! # }
//! ```

mod shell;

pub use crate::adapter::shell::ShellAdapter;

/// Author of an inbound message.
///
/// Platforms do not always resolve both identifiers, so each is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct User {
    /// Platform specific user identifier
    pub id: Option<String>,
    /// Display name of the user
    pub name: Option<String>,
}

/// Where an inbound message came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    /// Room, channel or conversation the message was posted in
    pub room: String,
    /// Author of the message
    pub user: User,
}

/// Inbound chat message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// Origin of the message
    pub envelope: Envelope,
    /// Raw message text
    pub text: String,
}

/// Trait implemented by every chat platform adapter.
///
/// This trait abstracts the platform for easier testing with mocks.
#[cfg_attr(test, mockall::automock)]
pub trait Adapter {
    /// Name of the adapter, e.g. `shell` or `slack`.
    fn name(&self) -> String;
    /// Waits for the next inbound message, `None` once the platform is closed.
    async fn receive(&self) -> Option<Message>;
    /// Sends `text` to `room`.
    ///
    /// When `room` is a user identifier or user name, platforms supporting it
    /// deliver the text as a private message.
    async fn send(&self, room: &str, text: &str);
    /// Replies to the author of a message, in the room the message came from.
    async fn reply(&self, envelope: &Envelope, text: &str);
}

/// Platforms able to deliver a message privately to a user identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrivateMessagingPlatform {
    Slack,
    Discord,
    Discobot,
}

impl PrivateMessagingPlatform {
    /// Recognizes a platform from its adapter name.
    ///
    /// Names are compared exactly: `Slack` is not `slack`.
    pub fn from_adapter_name(name: &str) -> Option<Self> {
        match name {
            "slack" => Some(PrivateMessagingPlatform::Slack),
            "discord" => Some(PrivateMessagingPlatform::Discord),
            "discobot" => Some(PrivateMessagingPlatform::Discobot),
            _ => None,
        }
    }
}
