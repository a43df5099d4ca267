//! Response formatters for the help surfaces.
//!
//! Chat responses are plain text lines. The web response is a small static
//! HTML document wrapping the command list.

/// Formats the reply sent when a help query matches no command.
///
/// # Examples
///
/// ```
/// # use help_plus::help::responses::format_no_match;
/// assert_eq!(format_no_match("deploy"), "No available commands match: deploy");
/// ```
pub fn format_no_match(query: &str) -> String {
    format!("No available commands match: {}", query)
}

/// Formats the reply sent when there is no help to show at all.
pub fn format_no_help() -> String {
    "No help found...".to_owned()
}

/// Formats the notice appended to a truncated help listing.
///
/// # Arguments
///
/// * `robot_name` - Name of the robot, used to show how to ask for a page
pub fn format_more_help(robot_name: &str) -> String {
    format!("... more help available, try {} help <page number>", robot_name)
}

/// Formats the public acknowledgement of a help sent in private.
pub fn format_private_ack() -> String {
    "replied to you in private!".to_owned()
}

/// Formats the web help page.
///
/// # Arguments
///
/// * `robot_name` - Name of the robot, shown in the title and heading
/// * `commands` - Already escaped HTML of the command list
pub fn format_help_page(robot_name: &str, commands: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
  <head>
  <meta charset="utf-8">
  <title>{robot_name} help</title>
  <style type="text/css">
    body {{
      background: #ddd;
      color: #000;
      text-shadow: 0 1px 1px rgba(255, 255, 255, .5);
    }}
    h1 {{
      margin: 8px 0;
      padding: 0;
    }}
    .commands {{
      font-size: 14px;
    }}
    p {{
      border-bottom: 1px solid #eee;
      margin: 6px 0 0 0;
      padding-bottom: 5px;
    }}
    p:last-child {{
      border: 0;
    }}
  </style>
  </head>
  <body>
    <h1>{robot_name} help</h1>
    <div class="commands">
      {commands}
    </div>
  </body>
</html>"#
    )
}
