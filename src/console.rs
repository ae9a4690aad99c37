use std::io::{self, BufRead, IsTerminal, Write};

use dialoguer::{Input, Password};

use crate::error::Result;

/// Line-oriented terminal used by the menus and handlers
pub trait Console {
    /// Prompt for one line of input. Empty answers are allowed.
    fn read(&mut self, prompt: &str) -> Result<String>;
    /// Prompt for a password without echoing it.
    fn read_secret(&mut self, prompt: &str) -> Result<String>;
    fn say(&mut self, text: &str);
}

/// Interactive console backed by `dialoguer`. When stdin is a pipe or a file
/// the prompts are plain lines instead.
#[derive(Debug, Default)]
pub struct Terminal;

impl Terminal {
    fn piped() -> bool {
        !io::stdin().is_terminal()
    }
}

/// Print the prompt and take one line from `input`, without its line ending.
/// End of input is an error so the menu loops stop.
pub fn read_line<R: BufRead, W: Write>(input: &mut R, output: &mut W, prompt: &str) -> Result<String> {
    write!(output, "{}: ", prompt).map_err(dialoguer::Error::IO)?;
    output.flush().map_err(dialoguer::Error::IO)?;

    let mut line = String::new();
    if input.read_line(&mut line).map_err(dialoguer::Error::IO)? == 0 {
        let eof = io::Error::new(io::ErrorKind::UnexpectedEof, "end of input");
        return Err(dialoguer::Error::IO(eof).into());
    }
    let trimmed = line.trim_end_matches(['\n', '\r']).len();
    line.truncate(trimmed);
    Ok(line)
}

impl Console for Terminal {
    fn read(&mut self, prompt: &str) -> Result<String> {
        if Self::piped() {
            return read_line(&mut io::stdin().lock(), &mut io::stdout(), prompt);
        }
        let line: String = Input::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()?;
        Ok(line)
    }

    fn read_secret(&mut self, prompt: &str) -> Result<String> {
        if Self::piped() {
            return read_line(&mut io::stdin().lock(), &mut io::stdout(), prompt);
        }
        let secret = Password::new()
            .with_prompt(prompt)
            .allow_empty_password(true)
            .interact()?;
        Ok(secret)
    }

    fn say(&mut self, text: &str) {
        println!("{}", text);
    }
}
