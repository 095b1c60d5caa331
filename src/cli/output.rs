//! Printing and prompting shared by the command handlers

use std::io::{self, BufRead, IsTerminal, Write};

use dialoguer::Password;
use log::LevelFilter;
use serde::Serialize;

use crate::error::{CliError, Result};
use crate::json::to_json_string;

/// Start the logger. `RUST_LOG` overrides the configured level.
pub fn init_logging(level: &str) {
    let filter = level.parse::<LevelFilter>().unwrap_or(LevelFilter::Info);
    // A second init (tests, embedders) is not an error worth reporting
    let _ = env_logger::builder()
        .filter_level(filter)
        .parse_default_env()
        .try_init();
}

/// One-space indented JSON on stdout
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", to_json_string(value)?);
    Ok(())
}

/// `[a, b, c]` enumeration used by the account listing
pub fn bracket_list<I, S>(items: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let joined: Vec<String> = items.into_iter().map(|s| s.as_ref().to_string()).collect();
    format!("[{}]", joined.join(", "))
}

/// The single line shown for a handled failure
pub fn failure_line(err: &CliError) -> String {
    format!("Failed: {err}")
}

/// Read a password line, asking twice when `confirm` is set
pub fn read_password<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    confirm: bool,
) -> Result<String> {
    write!(output, "Enter Password: ")?;
    output.flush()?;
    let password = read_line(input)?;
    writeln!(output)?;
    if confirm {
        write!(output, "Repeat Password: ")?;
        output.flush()?;
        let repeat = read_line(input)?;
        writeln!(output)?;
        if password != repeat {
            return Err(CliError::Input("Password not matched".to_string()));
        }
    }
    Ok(password)
}

fn read_line<R: BufRead>(input: &mut R) -> Result<String> {
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

/// Where a password comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordSource {
    /// Given on the command line
    Flag,
    /// Typed on a terminal without echo
    Terminal,
    /// Read line by line from piped stdin
    Piped,
}

impl PasswordSource {
    pub fn select(given: Option<&str>, stdin_is_terminal: bool) -> Self {
        match (given, stdin_is_terminal) {
            (Some(_), _) => PasswordSource::Flag,
            (None, true) => PasswordSource::Terminal,
            (None, false) => PasswordSource::Piped,
        }
    }
}

/// Hidden prompt with the same wording as the piped one
fn terminal_password(confirm: bool) -> Result<String> {
    let mut prompt = Password::new()
        .with_prompt("Enter Password")
        .allow_empty_password(true);
    if confirm {
        prompt = prompt.with_confirmation("Repeat Password", "Password not matched");
    }
    Ok(prompt.interact()?)
}

/// The flag value when given, otherwise a prompt on stdin. A terminal gets
/// a hidden prompt; piped input is read a line at a time.
pub fn password_or_prompt(given: Option<&str>, confirm: bool) -> Result<String> {
    let stdin = io::stdin();
    match PasswordSource::select(given, stdin.is_terminal()) {
        PasswordSource::Flag => Ok(given.unwrap_or_default().to_string()),
        PasswordSource::Terminal => terminal_password(confirm),
        PasswordSource::Piped => {
            let mut input = stdin.lock();
            let mut output = io::stdout();
            read_password(&mut input, &mut output, confirm)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_bracket_list() {
        assert_eq!(bracket_list(Vec::<String>::new()), "[]");
        assert_eq!(bracket_list(["a", "b"]), "[a, b]");
    }

    #[test]
    fn test_read_password_confirm() {
        let mut input = Cursor::new("secret\nsecret\n");
        let mut output = Vec::new();
        let pw = read_password(&mut input, &mut output, true).unwrap();
        assert_eq!(pw, "secret");
        let shown = String::from_utf8(output).unwrap();
        assert!(shown.contains("Enter Password: "));
        assert!(shown.contains("Repeat Password: "));
    }

    #[test]
    fn test_read_password_mismatch() {
        let mut input = Cursor::new("one\ntwo\n");
        let mut output = Vec::new();
        let err = read_password(&mut input, &mut output, true).unwrap_err();
        assert_eq!(err.to_string(), "Password not matched");
    }

    #[test]
    fn test_password_source() {
        assert_eq!(PasswordSource::select(Some("pw"), true), PasswordSource::Flag);
        assert_eq!(PasswordSource::select(Some(""), false), PasswordSource::Flag);
        // an interactive stdin never goes through the echoing line reader
        assert_eq!(PasswordSource::select(None, true), PasswordSource::Terminal);
        assert_eq!(PasswordSource::select(None, false), PasswordSource::Piped);
    }

    #[test]
    fn test_prompt_error_is_io() {
        let err: CliError = dialoguer::Error::IO(io::Error::new(io::ErrorKind::Other, "closed")).into();
        assert!(matches!(err, CliError::Io(_)));
    }

    #[test]
    fn test_failure_line() {
        let err = CliError::Input("invalid tx hash".to_string());
        assert_eq!(failure_line(&err), "Failed: invalid tx hash");
    }
}
