use crate::error::{Error, Result};
use std::io::{self, BufRead, Write};

/// Source of interactive answers.
pub trait Prompter {
    /// Shows `message` and returns one trimmed line of input.
    fn input(&self, message: &str) -> Result<String>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Prompts {
    /// Plain stdin prompts for old and unsupported terminals.
    pub raw: bool,
}

impl Prompter for Prompts {
    fn input(&self, message: &str) -> Result<String> {
        if self.raw {
            print!("{}", message);
            io::stdout().flush().map_err(|e| Error::Prompt(e.to_string()))?;
            let mut line = String::new();
            io::stdin()
                .lock()
                .read_line(&mut line)
                .map_err(|e| Error::Prompt(e.to_string()))?;
            return Ok(line.trim().to_owned());
        }

        let answer = requestty::prompt_one(
            requestty::Question::input("input")
                .message(message.trim_end_matches([':', ' ']).to_owned())
                .build(),
        )
        .map_err(|e| Error::Prompt(e.to_string()))?;

        Ok(answer.as_string().unwrap_or_default().trim().to_owned())
    }
}

impl Prompts {
    /// Blocks until the user presses enter.
    pub fn pause(&self) {
        print!("Press ENTER to continue...");
        let _ = io::stdout().flush();
        let _ = io::stdin().lock().read_line(&mut String::new());
    }
}
