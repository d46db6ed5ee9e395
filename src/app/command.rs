use crate::foundation::error::{AvatarError, AvatarResult};

/// One line of the interactive session protocol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    /// `emoji <glyph>`
    Emoji(String),
    /// `color <swatch>`
    Color(usize),
    /// `download`
    Download,
    /// `show`
    Show,
    /// `quit` / `exit`
    Quit,
}

impl SessionCommand {
    /// Parse a session line; blank lines and `#` comments yield `None`.
    pub fn parse(line: &str) -> AvatarResult<Option<Self>> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }
        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };

        let cmd = match verb.to_ascii_lowercase().as_str() {
            "emoji" if !rest.is_empty() => Self::Emoji(rest.to_owned()),
            "emoji" => return Err(AvatarError::validation("emoji needs a glyph")),
            "color" => {
                let idx = rest.parse::<usize>().map_err(|_| {
                    AvatarError::validation(format!("color needs a swatch number, got '{rest}'"))
                })?;
                Self::Color(idx)
            }
            "download" if rest.is_empty() => Self::Download,
            "show" if rest.is_empty() => Self::Show,
            "quit" | "exit" if rest.is_empty() => Self::Quit,
            _ => {
                return Err(AvatarError::validation(format!(
                    "unknown command '{line}' (expected emoji, color, download, show, quit)"
                )));
            }
        };
        Ok(Some(cmd))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/app/command.rs"]
mod tests;
