//! Chat help handling.
//!
//! Parses `help` requests addressed to the bot and assembles the text of the
//! answer. Delivery is left to [`HelpService`](crate::help::HelpService).
//!
//! # Requests
//!
//! | Message | Request |
//! |---------|---------|
//! | `marvin help` | [`HelpRequest::Full`] |
//! | `marvin help <query>` | [`HelpRequest::Query`] |
//! | `marvin help <page>` | [`HelpRequest::Page`] |

use log::debug;
use regex::Regex;

use crate::{
    config::BotIdentity,
    help::responses::{format_more_help, format_no_help, format_no_match},
    utils::{case_insensitive, filter_commands},
};

/// Number of commands per help page.
pub const PAGE_SIZE: usize = 10;
/// Length from which a full help listing is truncated.
pub const MAX_HELP_LENGTH: usize = 2000;
/// Length a truncated help listing is cut back to, before the notice.
pub const TRUNCATED_HELP_LENGTH: usize = 1900;

/// Parsed `help` request.
#[derive(Debug, Clone, PartialEq)]
pub enum HelpRequest {
    /// Every command, truncated when too long
    Full,
    /// Commands matching a query, truncated when too long
    Query(String),
    /// One page of commands, 1-indexed; fractional pages shift the window
    Page(f64),
}

impl HelpRequest {
    /// Interprets the text following `help`.
    ///
    /// A missing or empty argument asks for the full list. A positive number,
    /// infinity included, asks for a page; zero or a negative number asks for
    /// the full list. Anything else, `NaN` included, is a query.
    pub fn from_argument(argument: Option<&str>) -> Self {
        let argument = match argument {
            Some(argument) if !argument.is_empty() => argument,
            _ => return HelpRequest::Full,
        };

        match argument.trim().parse::<f64>() {
            Ok(number) if number > 0.0 => HelpRequest::Page(number),
            Ok(number) if !number.is_nan() => HelpRequest::Full,
            _ => HelpRequest::Query(argument.to_owned()),
        }
    }
}

/// Answer to a chat `help` request.
#[derive(Debug, Clone, PartialEq)]
pub enum ChatResponse {
    /// The query matched nothing; always sent in the originating room
    NoMatch(String),
    /// Help text to deliver
    Help(String),
}

/// Builds the pattern recognizing `help` requests addressed to the bot.
///
/// The bot is addressed by its name or alias, optionally preceded by `@` and
/// followed by `:` or `,`. The first capture group holds the argument.
///
/// # Errors
///
/// Returns an error if the resulting pattern exceeds the regex size limit.
pub fn help_listener(identity: &BotIdentity) -> Result<Regex, regex::Error> {
    let name = regex::escape(&identity.name);
    let addressee = match identity.alias.as_deref() {
        Some(alias) if !alias.is_empty() => {
            format!("(?:{}[:,]?|{}[:,]?)", regex::escape(alias), name)
        }
        _ => format!("{}[:,]?", name),
    };

    case_insensitive(&format!(r"^\s*[@]?{}\s*(?:help(?:\s+(.*))?$)", addressee))
}

/// Parses `text` into a help request if it is one.
pub fn parse_request(listener: &Regex, text: &str) -> Option<HelpRequest> {
    let captures = listener.captures(text)?;
    let request = HelpRequest::from_argument(captures.get(1).map(|argument| argument.as_str()));

    debug!("parsed help request: {:?}", request);

    Some(request)
}

/// Assembles the answer to a help request over the built command list.
///
/// # Arguments
///
/// * `commands` - Sorted, visible, renamed commands
/// * `request` - The parsed request
/// * `robot_name` - Robot name used in the truncation notice
pub fn render_chat(commands: Vec<String>, request: &HelpRequest, robot_name: &str) -> ChatResponse {
    let help = match request {
        HelpRequest::Full => truncate_help(commands.join("\n"), robot_name),
        HelpRequest::Query(query) => {
            let matching_commands = filter_commands(commands, query);
            if matching_commands.is_empty() {
                return ChatResponse::NoMatch(format_no_match(query));
            }
            truncate_help(matching_commands.join("\n"), robot_name)
        }
        HelpRequest::Page(page) => page_of(&commands, *page).join("\n"),
    };

    if help.is_empty() {
        return ChatResponse::Help(format_no_help());
    }

    ChatResponse::Help(help)
}

/// Returns the commands of a 1-indexed page: `[(page - 1) * 10, page * 10)`.
///
/// Bounds are truncated toward zero and clamped to the list, so pages past
/// the end of the list are empty.
pub fn page_of(commands: &[String], page: f64) -> &[String] {
    let page_size = PAGE_SIZE as f64;
    // Float to integer casts saturate: negative bounds become 0, infinity usize::MAX
    let start = ((page - 1.0) * page_size) as usize;
    let end = (page * page_size) as usize;

    let start = start.min(commands.len());
    let end = end.min(commands.len());
    &commands[start..end]
}

/// Truncates a help listing of [`MAX_HELP_LENGTH`] characters or more.
///
/// The listing is cut to its first [`TRUNCATED_HELP_LENGTH`] characters, then
/// back to the last complete line, and the notice inviting to ask for a page
/// is appended. Lengths are counted in characters.
pub fn truncate_help(help: String, robot_name: &str) -> String {
    if help.chars().count() < MAX_HELP_LENGTH {
        return help;
    }

    let head = match help.char_indices().nth(TRUNCATED_HELP_LENGTH) {
        Some((index, _)) => &help[..index],
        None => help.as_str(),
    };
    // No complete line at all leaves only the notice
    let complete_lines = head.rfind('\n').map_or("", |index| &head[..index]);

    format!("{}\n{}", complete_lines, format_more_help(robot_name))
}
