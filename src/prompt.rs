//! Line-oriented console prompts and the interactive filter selector.

use std::io::{self, BufRead, Stdout, StdinLock, Write};
use tracing::debug;

use crate::filters::{Choice, Choices, Filter, lookup};
use crate::output::SEPARATOR;

const CITY_PROMPT: &str = "Please enter Chicago, New York City, or Washington:\n";
const MONTH_PROMPT: &str = "\nPlease enter a month from this list, or \"all\" to get all months.\n \
                            January, February, March, April, May, June, or all:\n";
const DAY_PROMPT: &str = "\nPlease enter a day of the week, or \"all\" to get all days.\n \
                          Sunday, Monday, Tuesday, Wednesday, Thursday, Friday, Saturday, or all:\n";

/// Question/answer console over any reader and writer.
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl Console<StdinLock<'static>, Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Writes `question` and reads one answer, trimmed and lower-cased.
    ///
    /// Returns `None` once the input is exhausted. Bytes that are not valid
    /// UTF-8 are replaced, so such an answer is just one that matches nothing.
    pub fn ask(&mut self, question: &str) -> io::Result<Option<String>> {
        write!(self.output, "{question}")?;
        self.output.flush()?;

        let mut buf = Vec::new();
        if self.input.read_until(b'\n', &mut buf)? == 0 {
            return Ok(None);
        }
        Ok(Some(String::from_utf8_lossy(&buf).trim().to_lowercase()))
    }

    /// Asks a yes/no question. Anything but "yes" or "y", including end of input, is a no.
    pub fn confirm(&mut self, question: &str) -> io::Result<bool> {
        Ok(matches!(self.ask(question)?.as_deref(), Some("yes" | "y")))
    }

    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

/// Re-asks `question` until the answer matches an entry of `table`.
///
/// Rejected answers are not reported back; the question is simply repeated.
/// Returns `None` if the input ends first.
pub fn choose<R, W, T>(
    console: &mut Console<R, W>,
    question: &str,
    table: &[Choice<T>],
) -> io::Result<Option<T>>
where
    R: BufRead,
    W: Write,
    T: Copy,
{
    loop {
        let Some(answer) = console.ask(question)? else {
            return Ok(None);
        };
        if let Some(value) = lookup(table, &answer) {
            return Ok(Some(value));
        }
        debug!(answer = %answer, "Rejected answer");
    }
}

/// Collects a city, month and day from the console.
///
/// Returns `None` if the input ends before all three are chosen.
pub fn select_filter<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    choices: &Choices,
) -> io::Result<Option<Filter>> {
    writeln!(console.output(), "\nHello! Let's explore some US bikeshare data!\n")?;

    let Some(city) = choose(console, CITY_PROMPT, choices.cities)? else {
        return Ok(None);
    };
    let Some(month) = choose(console, MONTH_PROMPT, choices.months)? else {
        return Ok(None);
    };
    let Some(day) = choose(console, DAY_PROMPT, choices.days)? else {
        return Ok(None);
    };

    writeln!(console.output(), "{SEPARATOR}")?;
    Ok(Some(Filter { city, month, day }))
}
