//! Line-based console
//!
//! Wraps any reader/writer pair so the game can run against a terminal or
//! a scripted buffer. Text can be "typed out" one character at a time.

use std::io::{self, BufRead, Write};
use std::thread;
use std::time::Duration;

use crossterm::cursor::MoveTo;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{Clear, ClearType};
use crossterm::queue;

use crate::theme::Theme;

pub struct Console<R, W> {
    input: R,
    output: W,
    theme: Theme,
    typewriter: bool,
    delay: Duration,
    /// Clear the screen between menus (real terminals only)
    clear_screen: bool,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W, theme: Theme) -> Self {
        Self {
            input,
            output,
            theme,
            typewriter: false,
            delay: Duration::ZERO,
            clear_screen: false,
        }
    }

    /// Type text out with `delay_ms` between characters
    pub fn with_typewriter(mut self, enabled: bool, delay_ms: u64) -> Self {
        self.typewriter = enabled && delay_ms > 0;
        self.delay = Duration::from_millis(delay_ms);
        self
    }

    pub fn with_clear_screen(mut self, enabled: bool) -> Self {
        self.clear_screen = enabled;
        self
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn output(&self) -> &W {
        &self.output
    }

    pub fn into_output(self) -> W {
        self.output
    }

    fn write_text(&mut self, text: &str) -> io::Result<()> {
        if !self.typewriter {
            return queue!(self.output, Print(text));
        }
        for c in text.chars() {
            queue!(self.output, Print(c))?;
            self.output.flush()?;
            thread::sleep(self.delay);
        }
        Ok(())
    }

    /// Print a line in the given color (`None` for the default)
    pub fn say_in(&mut self, color: Option<Color>, text: &str) -> io::Result<()> {
        if let Some(color) = color {
            queue!(self.output, SetForegroundColor(color))?;
        }
        self.write_text(text)?;
        if color.is_some() {
            queue!(self.output, ResetColor)?;
        }
        queue!(self.output, Print('\n'))?;
        self.output.flush()
    }

    pub fn say(&mut self, text: &str) -> io::Result<()> {
        self.say_in(None, text)
    }

    pub fn title(&mut self, text: &str) -> io::Result<()> {
        self.say_in(self.theme.accent, text)
    }

    pub fn good(&mut self, text: &str) -> io::Result<()> {
        self.say_in(self.theme.good, text)
    }

    pub fn bad(&mut self, text: &str) -> io::Result<()> {
        self.say_in(self.theme.bad, text)
    }

    pub fn hint(&mut self, text: &str) -> io::Result<()> {
        self.say_in(self.theme.dim, text)
    }

    pub fn blank(&mut self) -> io::Result<()> {
        queue!(self.output, Print('\n'))?;
        self.output.flush()
    }

    pub fn clear(&mut self) -> io::Result<()> {
        if self.clear_screen {
            queue!(self.output, Clear(ClearType::All), MoveTo(0, 0))?;
            self.output.flush()?;
        }
        Ok(())
    }

    /// Show `question` (if any) and read one line.
    ///
    /// Returns `None` once input is exhausted.
    pub fn prompt(&mut self, question: &str) -> io::Result<Option<String>> {
        if !question.is_empty() {
            self.say(question)?;
        }
        queue!(self.output, Print("> "))?;
        self.output.flush()?;

        // Bytes that are not UTF-8 become U+FFFD and fail to parse downstream
        let mut buf = Vec::new();
        if self.input.read_until(b'\n', &mut buf)? == 0 {
            tracing::debug!("input closed");
            return Ok(None);
        }
        Ok(Some(String::from_utf8_lossy(&buf).trim().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn console(input: &str) -> Console<Cursor<Vec<u8>>, Vec<u8>> {
        Console::new(Cursor::new(input.as_bytes().to_vec()), Vec::new(), Theme::plain())
    }

    fn text(c: Console<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(c.into_output()).unwrap()
    }

    #[test]
    fn test_prompt_reads_lines_then_eof() {
        let mut c = console("  hello \nsecond\n");
        assert_eq!(c.prompt("Name?").unwrap().as_deref(), Some("hello"));
        assert_eq!(c.prompt("").unwrap().as_deref(), Some("second"));
        assert_eq!(c.prompt("").unwrap(), None);
        assert_eq!(text(c), "Name?\n> > > ");
    }

    #[test]
    fn test_prompt_tolerates_invalid_utf8() {
        let mut c = Console::new(
            Cursor::new(vec![0xff, 0xfe, b'\n', b'2', b'\n']),
            Vec::new(),
            Theme::plain(),
        );
        assert_eq!(c.prompt("").unwrap().as_deref(), Some("\u{fffd}\u{fffd}"));
        assert_eq!(c.prompt("").unwrap().as_deref(), Some("2"));
        assert_eq!(c.prompt("").unwrap(), None);
    }

    #[test]
    fn test_plain_theme_writes_no_escapes() {
        let mut c = console("");
        c.title("Title").unwrap();
        c.bad("Ouch").unwrap();
        c.clear().unwrap();
        assert_eq!(text(c), "Title\nOuch\n");
    }

    #[test]
    fn test_colored_output_resets() {
        let mut c = Console::new(Cursor::new(Vec::new()), Vec::new(), Theme::dark());
        c.good("Win").unwrap();
        let out = String::from_utf8(c.into_output()).unwrap();
        assert!(out.contains("Win"));
        assert!(out.starts_with('\u{1b}'));
        assert!(out.ends_with("\u{1b}[0m\n"));
    }

    #[test]
    fn test_typewriter_output_is_identical() {
        let mut c = console("").with_typewriter(true, 1);
        c.say("abc").unwrap();
        assert_eq!(text(c), "abc\n");
    }
}
