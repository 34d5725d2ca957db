use ash_types::{AshError, AshResult};

/// Marker that sends a command to the background
pub const BACKGROUND_MARKER: char = '&';

/// One input line split into its parts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    pub command: String,
    /// Everything after the first whitespace run, unparsed
    pub arguments: String,
    pub background: bool,
}

/// Parse a raw input line.
///
/// Returns `Ok(None)` for a blank line. A trailing `&` is stripped and marks
/// the line for background execution; a bare `&` is a syntax error.
pub fn parse_line(input: &str) -> AshResult<Option<CommandLine>> {
    let line = input.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (line, background) = match line.strip_suffix(BACKGROUND_MARKER) {
        Some(rest) => (rest.trim(), true),
        None => (line, false),
    };
    if line.is_empty() {
        return Err(AshError::Parse(format!(
            "syntax error near '{BACKGROUND_MARKER}'"
        )));
    }

    let (command, arguments) = split_first_word(line);
    Ok(Some(CommandLine {
        command: command.to_string(),
        arguments: arguments.to_string(),
        background,
    }))
}

/// Split on the first whitespace run
fn split_first_word(line: &str) -> (&str, &str) {
    match line.find(char::is_whitespace) {
        Some(pos) => (&line[..pos], line[pos..].trim_start()),
        None => (line, ""),
    }
}

/// Split the argument string into words with shell quoting rules
pub fn split_arguments(arguments: &str) -> AshResult<Vec<String>> {
    shell_words::split(arguments).map_err(|e| AshError::Parse(format!("{e}: {arguments}")))
}
