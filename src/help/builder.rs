//! Command list builder.
//!
//! Turns the raw help strings registered by the bot modules into the list
//! shown to users:
//!
//! ```text
//! raw commands → hide → rename → sort
//! ```
//!
//! Help strings are written against the generic `hubot` invocation prefix,
//! which is rewritten to the name the bot actually answers to.

use log::debug;
use regex::Regex;

use crate::utils::case_insensitive;

/// Generic invocation prefix the help strings are written with.
pub const INVOCATION_PREFIX: &str = "hubot";

/// Compiles the hidden command patterns into one matcher.
///
/// A command is hidden when one of the patterns matches right after the
/// `hubot ` prefix or at the very start of the command. Matching is
/// case-insensitive.
///
/// # Returns
///
/// * `Ok(None)` - No pattern, nothing is hidden
/// * `Ok(Some(Regex))` - The alternation of every pattern
///
/// # Errors
///
/// Returns an error if one of the patterns is not a valid regular expression.
pub fn hidden_commands_pattern(patterns: &[String]) -> Result<Option<Regex>, regex::Error> {
    if patterns.is_empty() {
        return Ok(None);
    }

    let alternation = patterns.join("|");
    let pattern = format!("^{INVOCATION_PREFIX} (?:{alternation})|^(?:{alternation})");

    case_insensitive(&pattern).map(Some)
}

/// Rewrites the leading invocation prefix of `command` to `display_name`.
///
/// The prefix is matched case-insensitively. With a one character display
/// name such as `!`, the whitespace after the prefix collapses to a single
/// space so that `hubot   help` becomes `! help`.
///
/// Commands already addressed with `display_name` are left untouched.
pub fn rename_command(command: &str, display_name: &str) -> String {
    // Display names starting with the prefix would otherwise be renamed twice
    if strip_prefix_ignore_case(display_name, INVOCATION_PREFIX).is_some()
        && strip_prefix_ignore_case(command, display_name).is_some()
    {
        return command.to_owned();
    }

    let single_character = display_name.chars().count() == 1;

    match strip_prefix_ignore_case(command, INVOCATION_PREFIX) {
        Some(rest) if single_character && rest.starts_with(char::is_whitespace) => {
            format!("{} {}", display_name, rest.trim_start())
        }
        Some(rest) => format!("{}{}", display_name, rest),
        None => command.to_owned(),
    }
}

/// Builds the sorted list of visible, renamed help commands.
///
/// Hidden commands are matched against the raw help strings, before renaming.
/// The result is sorted in byte order and never contains a hidden command.
///
/// # Examples
///
/// ```
/// # use help_plus::help::builder::build_command_list;
/// let commands = vec!["hubot ping - ping".to_owned(), "hubot help - help".to_owned()];
/// assert_eq!(
///     build_command_list(&commands, "x", None),
///     vec!["x help - help", "x ping - ping"]
/// );
/// ```
pub fn build_command_list(
    commands: &[String],
    display_name: &str,
    hidden_commands: Option<&Regex>,
) -> Vec<String> {
    let visible_commands = match hidden_commands {
        Some(hidden_commands) => {
            debug!("filtering hidden commands with {}", hidden_commands);
            commands
                .iter()
                .filter(|command| !hidden_commands.is_match(command))
                .collect::<Vec<&String>>()
        }
        None => {
            debug!("no hidden commands");
            commands.iter().collect()
        }
    };

    let mut renamed_commands = visible_commands
        .into_iter()
        .map(|command| rename_command(command, display_name))
        .collect::<Vec<String>>();

    renamed_commands.sort();
    renamed_commands
}

/// Strips `prefix` from the start of `text`, ignoring ASCII case.
fn strip_prefix_ignore_case<'a>(text: &'a str, prefix: &str) -> Option<&'a str> {
    let head = text.get(..prefix.len())?;
    if head.eq_ignore_ascii_case(prefix) {
        Some(&text[prefix.len()..])
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn to_strings(commands: &[&str]) -> Vec<String> {
        commands.iter().map(|command| command.to_string()).collect()
    }

    fn hidden(patterns: &[&str]) -> Option<Regex> {
        hidden_commands_pattern(&to_strings(patterns)).unwrap()
    }

    #[test]
    fn test_build_renames_and_sorts() {
        let commands = to_strings(&["hubot ping - ping", "hubot help - help"]);
        assert_eq!(
            build_command_list(&commands, "x", None),
            vec!["x help - help", "x ping - ping"]
        );
    }

    #[test]
    fn test_build_empty_input() {
        assert!(build_command_list(&[], "marvin", None).is_empty());
    }

    #[test]
    fn test_build_without_hidden_commands_keeps_everything() {
        let commands = to_strings(&[
            "hubot echo <text> - Reply back with <text>",
            "hubot adapter - Reply with the adapter",
            "hubot ping - Reply with pong",
        ]);
        assert_eq!(
            build_command_list(&commands, "marvin", None),
            vec![
                "marvin adapter - Reply with the adapter",
                "marvin echo <text> - Reply back with <text>",
                "marvin ping - Reply with pong",
            ]
        );
    }

    #[test]
    fn test_build_removes_hidden_commands() {
        let commands = to_strings(&[
            "hubot adapter - Reply with the adapter",
            "hubot echo <text> - Reply back with <text>",
            "hubot ping - Reply with pong",
        ]);
        let hidden_commands = hidden(&["ping", "adapter"]);

        assert_eq!(
            build_command_list(&commands, "marvin", hidden_commands.as_ref()),
            vec!["marvin echo <text> - Reply back with <text>"]
        );
    }

    #[test]
    fn test_hidden_commands_match_without_prefix() {
        let commands = to_strings(&["ship it - Display a squirrel", "hubot ping - pong"]);
        let hidden_commands = hidden(&["ship it"]);

        assert_eq!(
            build_command_list(&commands, "marvin", hidden_commands.as_ref()),
            vec!["marvin ping - pong"]
        );
    }

    #[test]
    fn test_hidden_commands_are_case_insensitive() {
        let commands = to_strings(&["HUBOT PING - pong", "hubot echo - echo"]);
        let hidden_commands = hidden(&["ping"]);

        assert_eq!(
            build_command_list(&commands, "marvin", hidden_commands.as_ref()),
            vec!["marvin echo - echo"]
        );
    }

    #[test]
    fn test_hidden_commands_only_match_the_invocation() {
        let commands = to_strings(&["hubot echo <text> - not a ping"]);
        let hidden_commands = hidden(&["ping"]);

        assert_eq!(
            build_command_list(&commands, "marvin", hidden_commands.as_ref()),
            vec!["marvin echo <text> - not a ping"]
        );
    }

    #[test]
    fn test_hidden_commands_pattern_empty() {
        assert!(hidden_commands_pattern(&[]).unwrap().is_none());
    }

    #[test]
    fn test_hidden_commands_pattern_invalid() {
        assert!(hidden_commands_pattern(&to_strings(&["(ping"])).is_err());
    }

    #[test]
    fn test_rename_is_case_insensitive() {
        assert_eq!(rename_command("HuBoT ping - pong", "marvin"), "marvin ping - pong");
    }

    #[test]
    fn test_rename_single_character_name_keeps_one_space() {
        assert_eq!(rename_command("hubot help - help", "!"), "! help - help");
        assert_eq!(rename_command("hubot   help - help", "x"), "x help - help");
        assert_eq!(rename_command("hubot\thelp - help", "x"), "x help - help");
        assert_eq!(rename_command("hubot-help - help", "x"), "x-help - help");
    }

    #[test]
    fn test_rename_leaves_other_commands() {
        assert_eq!(rename_command("ship it - squirrel", "marvin"), "ship it - squirrel");
        assert_eq!(rename_command("hub", "marvin"), "hub");
    }

    #[test]
    fn test_rename_is_idempotent() {
        for name in ["marvin", "x", "hubot", "hubot-dev", "Hubot2"] {
            let renamed = rename_command("hubot ping - pong", name);
            assert_eq!(rename_command(&renamed, name), renamed, "name {}", name);
        }
    }

    #[test]
    fn test_rename_with_prefix_like_name() {
        assert_eq!(rename_command("hubot ping - pong", "hubot-dev"), "hubot-dev ping - pong");
        assert_eq!(rename_command("hubot-dev ping - pong", "hubot-dev"), "hubot-dev ping - pong");
    }

    #[test]
    fn test_rename_handles_multibyte_text() {
        assert_eq!(rename_command("hé", "marvin"), "hé");
        assert_eq!(rename_command("hubot café - coffee", "☕"), "☕ café - coffee");
    }

    #[test]
    fn test_build_output_is_sorted() {
        let commands = to_strings(&[
            "hubot zzz - last",
            "hubot aaa - first",
            "hubot mmm - middle",
            "hubot AAA - upper",
        ]);
        let built = build_command_list(&commands, "marvin", None);

        let mut sorted = built.clone();
        sorted.sort();
        assert_eq!(built, sorted);
    }
}
