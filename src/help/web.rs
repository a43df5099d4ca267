//! Web help page.
//!
//! Serves the command list as an HTML page at `GET /<robot name>/help`. The
//! optional `q` query parameter filters the list like a chat query does; an
//! empty result simply renders an empty list.

use std::sync::Arc;

use axum::{
    Router,
    extract::{Query, State},
    response::Html,
    routing::get,
};
use log::debug;
use regex::{NoExpand, Regex};
use serde::Deserialize;

use crate::{
    help::{HelpService, responses::format_help_page},
    utils::filter_commands,
};

/// Query string of the help page: `?q=<pattern>`.
#[derive(Debug, Default, Deserialize)]
pub struct HelpPageQuery {
    /// Pattern the commands must match
    pub q: Option<String>,
}

/// Returns the path of the help page for a robot.
pub fn help_path(robot_name: &str) -> String {
    format!("/{}/help", robot_name)
}

/// Escapes the HTML special characters `&`, `<` and `>`.
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Renders the help page.
///
/// Commands are escaped first, then filtered with `query`, wrapped in
/// paragraphs, and every occurrence of the robot name is put in bold.
///
/// # Arguments
///
/// * `commands` - Sorted, visible, renamed commands
/// * `query` - Optional filter pattern
/// * `robot_name` - Name shown on the page
/// * `robot_name_pattern` - Case-insensitive matcher of the robot name
pub fn render_help_page(
    commands: Vec<String>,
    query: Option<&str>,
    robot_name: &str,
    robot_name_pattern: &Regex,
) -> String {
    let escaped_commands = commands
        .iter()
        .map(|command| escape_html(command))
        .collect::<Vec<String>>();

    let visible_commands = match query {
        Some(query) => filter_commands(escaped_commands, query),
        None => escaped_commands,
    };

    let paragraphs = visible_commands
        .iter()
        .map(|command| format!("<p>{}</p>", command))
        .collect::<String>();

    let bold_name = format!("<b>{}</b>", robot_name);
    let highlighted = robot_name_pattern.replace_all(&paragraphs, NoExpand(&bold_name));

    format_help_page(robot_name, &highlighted)
}

/// Builds the router serving the help page of `service`.
pub fn router(service: Arc<HelpService>) -> Router {
    Router::new()
        .route(&help_path(service.robot_name()), get(help_page))
        .with_state(service)
}

async fn help_page(
    State(service): State<Arc<HelpService>>,
    Query(query): Query<HelpPageQuery>,
) -> Html<String> {
    debug!("help page requested with query {:?}", query.q);

    Html(service.render_page(query.q.as_deref()))
}
