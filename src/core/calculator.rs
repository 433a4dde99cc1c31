use crate::core::expr::{self, Value};
use crate::utils::error::{AppError, Result};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Digit(u8),
    Plus,
    Equals,
    Clear,
}

impl Key {
    pub fn label(&self) -> String {
        match self {
            Key::Digit(d) => d.to_string(),
            Key::Plus => "+".to_string(),
            Key::Equals => "=".to_string(),
            Key::Clear => "C".to_string(),
        }
    }

    /// Parses a button label back into a key.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "+" => Some(Key::Plus),
            "=" => Some(Key::Equals),
            "C" | "c" => Some(Key::Clear),
            s if s.len() == 1 => s
                .chars()
                .next()
                .and_then(|c| c.to_digit(10))
                .map(|d| Key::Digit(d as u8)),
            _ => None,
        }
    }

    /// Grid position on the keypad, or `None` for a digit outside 0..=9.
    pub fn position(&self) -> Option<KeyPosition> {
        match *self {
            Key::Digit(d) if d > 9 => None,
            Key::Digit(d) => {
                let offset = 9 - d as usize;
                Some(KeyPosition {
                    row: offset / 3,
                    column: offset % 3,
                })
            }
            Key::Plus => Some(KeyPosition { row: 0, column: 3 }),
            Key::Equals => Some(KeyPosition { row: 1, column: 3 }),
            Key::Clear => Some(KeyPosition { row: 2, column: 3 }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPosition {
    pub row: usize,
    pub column: usize,
}

/// Digits 0..=9 followed by `+`, `=` and `C`.
pub fn keypad_layout() -> Vec<(Key, KeyPosition)> {
    (0..10u8)
        .map(Key::Digit)
        .chain([Key::Plus, Key::Equals, Key::Clear])
        .filter_map(|key| key.position().map(|pos| (key, pos)))
        .collect()
}

/// Renders the keypad as a text grid, one row per line.
pub fn render_keypad() -> String {
    let layout = keypad_layout();
    let rows = layout.iter().map(|(_, p)| p.row).max().unwrap_or(0) + 1;
    let mut grid = vec![vec![" ".to_string(); 4]; rows];
    for (key, pos) in &layout {
        grid[pos.row][pos.column] = key.label();
    }
    grid.iter()
        .map(|row| {
            row.iter()
                .map(|cell| format!("[{}]", cell))
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Display state of the keypad calculator.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Calculator {
    display: String,
}

impl Calculator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn display(&self) -> &str {
        &self.display
    }

    /// 模擬直接在輸入框輸入文字
    pub fn set_display(&mut self, text: impl Into<String>) {
        self.display = text.into();
    }

    pub fn number_click(&mut self, digit: u8) -> Result<()> {
        if digit > 9 {
            return Err(AppError::processing(format!("{} is not a keypad digit", digit)));
        }
        self.display.push(char::from(b'0' + digit));
        Ok(())
    }

    pub fn operation_click(&mut self, op: &str) {
        self.display.push(' ');
        self.display.push_str(op);
        self.display.push(' ');
    }

    /// Evaluates the display. On failure the display is left unchanged.
    pub fn calculate(&mut self) -> Result<Value> {
        match expr::evaluate(&self.display) {
            Ok(value) => {
                self.display = value.to_string();
                Ok(value)
            }
            Err(e) => {
                tracing::warn!(display = %self.display, error = %e, "evaluation failed");
                Err(e)
            }
        }
    }

    pub fn clear(&mut self) {
        self.display.clear();
    }

    pub fn press(&mut self, key: Key) -> Result<()> {
        match key {
            Key::Digit(d) => self.number_click(d),
            Key::Plus => {
                self.operation_click("+");
                Ok(())
            }
            Key::Equals => self.calculate().map(|_| ()),
            Key::Clear => {
                self.clear();
                Ok(())
            }
        }
    }
}

impl fmt::Display for Calculator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display)
    }
}
