//! Interactive dialogs on top of the console
//!
//! Warnings, error reports, confirmations, free text input and numbered
//! selection menus. All of them are plain `tell` calls plus
//! [`Console::read_line`], which waits for the foreground.

use std::error::Error as StdError;

use crate::color::{Color, ColorSpec};
use crate::core::console::{Console, TellOptions};
use crate::error::{Error, Result};

const RULE_WIDTH: usize = 80;

/// Answer to a yes/no question
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Answer {
    Yes,
    No,
}

impl Answer {
    fn parse(input: &str) -> Option<Self> {
        match input {
            "yes" => Some(Answer::Yes),
            "no" => Some(Answer::No),
            _ => None,
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            Answer::Yes => "yes",
            Answer::No => "no",
        }
    }
}

impl From<bool> for Answer {
    fn from(yes: bool) -> Self {
        if yes {
            Answer::Yes
        } else {
            Answer::No
        }
    }
}

/// Options for [`Console::ask`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AskOptions {
    /// Taken on empty input
    pub default: Option<Answer>,
    /// The answer for which `ask` returns true
    pub expected: Answer,
}

impl Default for AskOptions {
    fn default() -> Self {
        Self {
            default: None,
            expected: Answer::Yes,
        }
    }
}

fn highlight() -> ColorSpec {
    ColorSpec::new().color(Color::Cyan).bright(true)
}

fn no_newline() -> TellOptions {
    TellOptions::new().newline(false)
}

impl Console {
    fn rule(&self) {
        self.tell("-".repeat(RULE_WIDTH));
    }

    /// Tell in bright yellow
    pub fn warn<I, S>(&self, texts: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.tell_with(texts, &TellOptions::new().color(ColorSpec::new().color(Color::Yellow).bright(true)));
    }

    /// Tell an error in bright red, followed by its causes in red
    pub fn tell_error(&self, error: &(dyn StdError + 'static), options: &TellOptions) {
        let red = ColorSpec::from(Color::Red);
        self.tell_with([error.to_string()], &options.color(red.bright(true)));

        let causes: Vec<String> = std::iter::successors(error.source(), |&e| e.source())
            .map(|cause| format!("caused by: {}", cause))
            .collect();
        if !causes.is_empty() {
            self.tell_with(causes, &options.color(red));
        }
    }

    /// Present a message and wait for ENTER
    pub fn acknowledge<I, S>(&self, texts: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.rule();
        self.tell_with(texts, &TellOptions::new().color(highlight()));
        self.rule();
        self.tell("Please press ENTER to continue.");
        self.read_line()?;
        Ok(())
    }

    /// Ask a yes/no question; true if the answer is `options.expected`.
    ///
    /// Empty input takes the default. Without a default it counts as not
    /// the expected answer.
    pub fn ask<I, S>(&self, texts: I, options: &AskOptions) -> Result<bool>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.rule();
        self.tell_with(texts, &TellOptions::new().color(highlight()));
        self.rule();

        let default_hint = options
            .default
            .map(|answer| format!("[{}] ", answer.as_str()))
            .unwrap_or_default();
        self.tell_with([format!("(yes/no) {}> ", default_hint)], &no_newline());

        let error_color = ColorSpec::new().color(Color::Red).bright(true);
        loop {
            let input = self.read_line()?.trim().to_lowercase();
            if let Some(answer) = Answer::parse(&input) {
                return Ok(answer == options.expected);
            }
            if input.is_empty() {
                return Ok(options.default == Some(options.expected));
            }
            self.tell_with(
                [format!("I couldn't understand “{}”.", input)],
                &no_newline().color(error_color),
            );
            self.tell_with([" > "], &no_newline());
        }
    }

    /// Like [`Console::ask`] with defaults, but a negative answer aborts
    pub fn confirm<I, S>(&self, texts: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if self.ask(texts, &AskOptions::default())? {
            Ok(())
        } else {
            Err(Error::Aborted)
        }
    }

    /// Prompt for free text; returns the trimmed input
    pub fn listen(&self, prompt: Option<&str>, options: &TellOptions) -> Result<String> {
        let prompt = match prompt {
            Some(prompt) => format!("{} > ", prompt),
            None => "> ".to_string(),
        };
        self.tell_with([prompt], &options.newline(false));
        Ok(self.read_line()?.trim().to_string())
    }

    /// Let the user pick one of `items` from a numbered menu.
    ///
    /// Items are listed sorted by their description. A single item is
    /// selected without asking; no items yield `None`. Empty input picks
    /// `default`, even one that is not among `items`; without a default the
    /// question is repeated.
    pub fn select<T, F>(
        &self,
        description: &str,
        mut items: Vec<T>,
        describer: F,
        default: Option<T>,
    ) -> Result<Option<T>>
    where
        T: PartialEq,
        F: Fn(&T) -> String,
    {
        if items.is_empty() {
            return Ok(None);
        }
        if items.len() == 1 {
            let choice = items.remove(0);
            self.tell_with(
                [format!("Selected {}.", describer(&choice))],
                &TellOptions::new().color(Color::Yellow),
            );
            return Ok(Some(choice));
        }

        items.sort_by_cached_key(|item| describer(item));

        self.rule();
        self.tell_with(
            [format!("Please select {}:", description)],
            &TellOptions::new().color(highlight()),
        );
        for (i, item) in items.iter().enumerate() {
            self.tell_with(
                [format!("{}: {}", i + 1, describer(item))],
                &TellOptions::new().color(highlight()),
            );
        }
        self.rule();

        let default_index = default
            .as_ref()
            .and_then(|d| items.iter().position(|item| item == d));
        let default_hint = default_index
            .map(|i| format!("[{}] ", i + 1))
            .unwrap_or_default();

        loop {
            self.tell_with([format!("Your choice {}> ", default_hint)], &no_newline());
            let answer = self.read_line()?.trim().to_string();
            if answer.is_empty() {
                if default.is_some() {
                    return Ok(default);
                }
                continue;
            }
            match answer.parse::<usize>() {
                Ok(n) if n.to_string() != answer => self.tell("Please enter a valid integer."),
                Ok(n) if (1..=items.len()).contains(&n) => {
                    return Ok(Some(items.swap_remove(n - 1)));
                }
                Ok(_) => self.tell(format!(
                    "Please enter a number from 1 through {}.",
                    items.len()
                )),
                Err(_) => self.tell("Please enter a valid integer."),
            }
        }
    }
}
