//! Console: where script text goes and where input comes from.
//!
//! Display statements and the printing/input host calls talk to a console:
//! - Native: stdout and stdin (default for `Interpret`)
//! - Tests: a buffer with scripted input lines (default for `TestRun`)
//! - Embedding hosts: any [`Console`] implementation
//!
//! Built-in consoles use enum dispatch; a host console sits behind one boxed
//! variant.

use std::collections::VecDeque;
use std::fmt;
use std::io::{self, BufRead, Write};
use std::sync::Arc;

use parking_lot::Mutex;

/// A host-provided display collaborator.
pub trait Console: Send + Sync {
    /// Show text without a trailing newline.
    fn display(&self, text: &str);

    /// Show text followed by a newline.
    fn display_line(&self, text: &str);

    /// Show `prompt` (when non-empty) and block until a line of input arrives.
    fn wait_for_input(&self, prompt: &str) -> io::Result<String>;
}

/// Console that writes to stdout and reads from stdin.
#[derive(Default)]
pub struct StdoutConsole;

impl StdoutConsole {
    pub fn display(&self, text: &str) {
        print!("{text}");
        // A failed flush only delays output.
        let _ = io::stdout().flush();
    }

    pub fn display_line(&self, text: &str) {
        println!("{text}");
    }

    pub fn wait_for_input(&self, prompt: &str) -> io::Result<String> {
        if !prompt.is_empty() {
            self.display(prompt);
        }
        let mut line = String::new();
        io::stdin().lock().read_line(&mut line)?;
        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(line)
    }
}

/// Console that captures output and replays scripted input.
///
/// Input requests beyond the scripted lines receive an empty line.
#[derive(Default)]
pub struct BufferConsole {
    output: Mutex<String>,
    input: Mutex<VecDeque<String>>,
}

impl BufferConsole {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn display(&self, text: &str) {
        self.output.lock().push_str(text);
    }

    pub fn display_line(&self, text: &str) {
        let mut out = self.output.lock();
        out.push_str(text);
        out.push('\n');
    }

    pub fn wait_for_input(&self, prompt: &str) -> String {
        if !prompt.is_empty() {
            self.display(prompt);
        }
        self.input.lock().pop_front().unwrap_or_default()
    }

    /// Queue a line to be returned by a later input request.
    pub fn push_input(&self, line: impl Into<String>) {
        self.input.lock().push_back(line.into());
    }

    pub fn output(&self) -> String {
        self.output.lock().clone()
    }

    pub fn clear(&self) {
        self.output.lock().clear();
    }
}

/// Console implementation using enum dispatch.
pub enum ConsoleImpl {
    /// stdout/stdin (default for `Interpret`).
    Stdout(StdoutConsole),
    /// Captured output, scripted input (default for `TestRun`).
    Buffer(BufferConsole),
    /// Discards output; input requests receive an empty line.
    Silent,
    /// Supplied by the embedding application.
    Host(Box<dyn Console>),
}

impl ConsoleImpl {
    pub fn display(&self, text: &str) {
        match self {
            Self::Stdout(c) => c.display(text),
            Self::Buffer(c) => c.display(text),
            Self::Silent => {}
            Self::Host(c) => c.display(text),
        }
    }

    pub fn display_line(&self, text: &str) {
        match self {
            Self::Stdout(c) => c.display_line(text),
            Self::Buffer(c) => c.display_line(text),
            Self::Silent => {}
            Self::Host(c) => c.display_line(text),
        }
    }

    pub fn wait_for_input(&self, prompt: &str) -> io::Result<String> {
        match self {
            Self::Stdout(c) => c.wait_for_input(prompt),
            Self::Buffer(c) => Ok(c.wait_for_input(prompt)),
            Self::Silent => Ok(String::new()),
            Self::Host(c) => c.wait_for_input(prompt),
        }
    }

    /// Queue scripted input. Only buffered consoles accept input this way.
    pub fn push_input(&self, line: impl Into<String>) -> bool {
        match self {
            Self::Buffer(c) => {
                c.push_input(line);
                true
            }
            _ => false,
        }
    }

    /// Captured output; empty for consoles that do not capture.
    pub fn output(&self) -> String {
        match self {
            Self::Buffer(c) => c.output(),
            _ => String::new(),
        }
    }

    pub fn clear(&self) {
        if let Self::Buffer(c) = self {
            c.clear();
        }
    }
}

impl fmt::Debug for ConsoleImpl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self {
            Self::Stdout(_) => "Stdout",
            Self::Buffer(_) => "Buffer",
            Self::Silent => "Silent",
            Self::Host(_) => "Host",
        };
        write!(f, "ConsoleImpl::{kind}")
    }
}

/// Shared console handle.
pub type SharedConsole = Arc<ConsoleImpl>;

pub fn stdout_console() -> SharedConsole {
    Arc::new(ConsoleImpl::Stdout(StdoutConsole))
}

pub fn buffer_console() -> SharedConsole {
    Arc::new(ConsoleImpl::Buffer(BufferConsole::new()))
}

pub fn silent_console() -> SharedConsole {
    Arc::new(ConsoleImpl::Silent)
}

pub fn host_console(console: impl Console + 'static) -> SharedConsole {
    Arc::new(ConsoleImpl::Host(Box::new(console)))
}

#[cfg(test)]
mod tests;
