//! Command-line grammar of the wizard shell.

/// A parsed shell command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Start,
    Show,
    Set { field: String, value: String },
    Blur { field: String },
    Focus { field: String },
    Toggle { field: String, value: String },
    Next,
    Back,
    /// 1-based step number, as shown in the indicator.
    Goto(usize),
    Close,
    Reset,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("Comando desconocido: {0}. Escribe 'help' para ver los comandos.")]
    Unknown(String),

    #[error("Uso: {0}")]
    Usage(&'static str),

    #[error("Número de paso inválido: {0}")]
    InvalidStep(String),
}

impl Command {
    /// Parse one input line. Returns `Ok(None)` for a blank line.
    pub fn parse(line: &str) -> Result<Option<Command>, ParseError> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }

        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };

        let command = match verb.to_ascii_lowercase().as_str() {
            "start" => Command::Start,
            "show" => Command::Show,
            "next" => Command::Next,
            "back" => Command::Back,
            "close" => Command::Close,
            "reset" => Command::Reset,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            "set" => {
                let (field, value) = field_and_value(rest).ok_or(ParseError::Usage("set <campo> <valor>"))?;
                Command::Set { field, value }
            }
            "toggle" => {
                let (field, value) =
                    field_and_value(rest).ok_or(ParseError::Usage("toggle <campo> <valor>"))?;
                if value.is_empty() {
                    return Err(ParseError::Usage("toggle <campo> <valor>"));
                }
                Command::Toggle { field, value }
            }
            "blur" => Command::Blur {
                field: single_field(rest).ok_or(ParseError::Usage("blur <campo>"))?,
            },
            "focus" => Command::Focus {
                field: single_field(rest).ok_or(ParseError::Usage("focus <campo>"))?,
            },
            "goto" => {
                if rest.is_empty() {
                    return Err(ParseError::Usage("goto <n>"));
                }
                let n: usize = rest
                    .parse()
                    .map_err(|_| ParseError::InvalidStep(rest.to_string()))?;
                if n == 0 {
                    return Err(ParseError::InvalidStep(rest.to_string()));
                }
                Command::Goto(n)
            }
            other => return Err(ParseError::Unknown(other.to_string())),
        };
        Ok(Some(command))
    }
}

/// `<field> <value...>`; the value may be empty to clear a field.
fn field_and_value(rest: &str) -> Option<(String, String)> {
    if rest.is_empty() {
        return None;
    }
    let (field, value) = match rest.split_once(char::is_whitespace) {
        Some((field, value)) => (field, value.trim()),
        None => (rest, ""),
    };
    Some((field.to_string(), value.to_string()))
}

fn single_field(rest: &str) -> Option<String> {
    let mut parts = rest.split_whitespace();
    let field = parts.next()?;
    parts.next().is_none().then(|| field.to_string())
}
