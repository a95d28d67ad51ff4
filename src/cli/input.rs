//! Keystroke input handling using crossterm
//!
//! Features:
//! - Non-blocking keystroke capture with a poll timeout
//! - Digit keys for answer choices
//! - Ctrl+C / Esc graceful exit

use std::io::Result as IoResult;
use std::time::Duration;

use crossterm::event::{self, KeyCode, KeyEvent, KeyModifiers};

/// Handles user input from the terminal
pub struct InputHandler {
    /// Timeout for poll operations
    poll_timeout: Duration,
}

impl InputHandler {
    /// Create an input handler with the default 50ms poll timeout
    pub fn new() -> Self {
        InputHandler {
            poll_timeout: Duration::from_millis(50),
        }
    }

    /// Enable raw mode for terminal input
    pub fn enable_raw_mode() -> IoResult<()> {
        crossterm::terminal::enable_raw_mode()
    }

    /// Disable raw mode and restore the terminal
    pub fn disable_raw_mode() -> IoResult<()> {
        crossterm::terminal::disable_raw_mode()
    }

    /// Poll for a keystroke; `None` on timeout
    pub fn read_key(&self) -> IoResult<Option<KeyEvent>> {
        if event::poll(self.poll_timeout)? {
            match event::read()? {
                event::Event::Key(key_event) => Ok(Some(key_event)),
                _ => Ok(None),
            }
        } else {
            Ok(None)
        }
    }

    /// Block until any key is pressed, returning it
    pub fn wait_key(&self) -> IoResult<KeyEvent> {
        loop {
            if let Some(key) = self.read_key()? {
                return Ok(key);
            }
        }
    }

    /// Exit signal: Ctrl+C or Escape
    pub fn is_exit(key: &KeyEvent) -> bool {
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => true,
            KeyCode::Esc => true,
            _ => false,
        }
    }

    /// Retry key on the completion screen
    pub fn is_retry(key: &KeyEvent) -> bool {
        matches!(key.code, KeyCode::Char('r') | KeyCode::Char('R'))
    }

    /// Map a digit key to a choice index, when it is in range.
    /// Key `1` selects choice 0.
    pub fn choice_index(key: &KeyEvent, choice_count: usize) -> Option<usize> {
        match key.code {
            KeyCode::Char(c) => {
                let digit = c.to_digit(10)? as usize;
                if digit >= 1 && digit <= choice_count {
                    Some(digit - 1)
                } else {
                    None
                }
            }
            _ => None,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_choice_index_in_range() {
        assert_eq!(InputHandler::choice_index(&key(KeyCode::Char('1')), 4), Some(0));
        assert_eq!(InputHandler::choice_index(&key(KeyCode::Char('4')), 4), Some(3));
        assert_eq!(InputHandler::choice_index(&key(KeyCode::Char('5')), 4), None);
        assert_eq!(InputHandler::choice_index(&key(KeyCode::Char('0')), 4), None);
        assert_eq!(InputHandler::choice_index(&key(KeyCode::Enter), 4), None);
    }

    #[test]
    fn test_exit_keys() {
        assert!(InputHandler::is_exit(&key(KeyCode::Esc)));
        assert!(InputHandler::is_exit(&KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!InputHandler::is_exit(&key(KeyCode::Char('c'))));
    }

    #[test]
    fn test_retry_key() {
        assert!(InputHandler::is_retry(&key(KeyCode::Char('r'))));
        assert!(InputHandler::is_retry(&key(KeyCode::Char('R'))));
        assert!(!InputHandler::is_retry(&key(KeyCode::Char('x'))));
    }
}
