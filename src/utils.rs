//! Pattern helpers shared by the chat and web help surfaces.
//!
//! Users may search the help with full regular expression syntax. A query that
//! does not compile is matched as literal text instead, so a stray `(` or `*`
//! still finds something.

use log::warn;
use regex::{Regex, RegexBuilder};

/// Builds a case-insensitive regular expression.
///
/// # Errors
///
/// Returns an error if `pattern` is not a valid regular expression.
pub fn case_insensitive(pattern: &str) -> Result<Regex, regex::Error> {
    RegexBuilder::new(pattern).case_insensitive(true).build()
}

/// Keeps the commands matching `query`, case-insensitively.
///
/// The query is first compiled as a regular expression, then as escaped
/// literal text if that fails. Order is preserved.
///
/// # Examples
///
/// ```
/// # use help_plus::utils::filter_commands;
/// let commands = vec!["x ping - Reply with pong".to_owned(), "x echo - Echo".to_owned()];
/// assert_eq!(filter_commands(commands, "PING"), vec!["x ping - Reply with pong"]);
/// ```
pub fn filter_commands(commands: Vec<String>, query: &str) -> Vec<String> {
    let matcher = case_insensitive(query).or_else(|e| {
        warn!("query '{}' is not a valid pattern, matching it literally: {}", query, e);
        case_insensitive(&regex::escape(query))
    });

    match matcher {
        Ok(matcher) => commands
            .into_iter()
            .filter(|command| matcher.is_match(command))
            .collect(),
        // Only reachable when the escaped query exceeds the regex size limit
        Err(e) => {
            warn!("query '{}' cannot be compiled: {}", query, e);
            let needle = query.to_lowercase();
            commands
                .into_iter()
                .filter(|command| command.to_lowercase().contains(&needle))
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn commands() -> Vec<String> {
        vec![
            "x adapter - Reply with the adapter".to_owned(),
            "x echo <text> - Reply back with <text>".to_owned(),
            "x ping - Reply with pong".to_owned(),
        ]
    }

    #[test]
    fn test_case_insensitive_matches_any_case() {
        let regex = case_insensitive("ping").unwrap();
        assert!(regex.is_match("x PING - pong"));
        assert!(regex.is_match("x Ping - pong"));
    }

    #[test]
    fn test_case_insensitive_rejects_invalid_pattern() {
        assert!(case_insensitive("(unclosed").is_err());
    }

    #[test]
    fn test_filter_single_match() {
        assert_eq!(
            filter_commands(commands(), "echo"),
            vec!["x echo <text> - Reply back with <text>"]
        );
    }

    #[test]
    fn test_filter_is_case_insensitive() {
        assert_eq!(filter_commands(commands(), "PONG").len(), 1);
    }

    #[test]
    fn test_filter_with_regex_syntax() {
        assert_eq!(
            filter_commands(commands(), "^x (ping|echo)"),
            vec![
                "x echo <text> - Reply back with <text>",
                "x ping - Reply with pong"
            ]
        );
    }

    #[test]
    fn test_filter_invalid_regex_matches_literally() {
        let commands = vec!["x calc (1+2) - Compute".to_owned(), "x ping - pong".to_owned()];
        assert_eq!(filter_commands(commands, "(1+"), vec!["x calc (1+2) - Compute"]);
    }

    #[test]
    fn test_filter_no_match_returns_empty() {
        assert!(filter_commands(commands(), "nothing").is_empty());
    }

    #[test]
    fn test_filter_empty_query_keeps_everything() {
        assert_eq!(filter_commands(commands(), ""), commands());
    }
}
