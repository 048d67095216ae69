//! Calculator keys and their textual spellings.

use std::fmt;
use std::str::FromStr;

use webtop_types::error::{Result, WebtopError};

/// Binary operators, evaluated strictly left to right.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operator {
    /// Glyph shown on the keypad and in history.
    pub fn symbol(self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Subtract => '−',
            Operator::Multiply => '×',
            Operator::Divide => '÷',
        }
    }

    /// Apply to `a` and `b`. Division by zero yields 0.
    pub fn apply(self, a: f64, b: f64) -> f64 {
        match self {
            Operator::Add => a + b,
            Operator::Subtract => a - b,
            Operator::Multiply => a * b,
            Operator::Divide if b == 0.0 => 0.0,
            Operator::Divide => a / b,
        }
    }

    fn from_char(c: char) -> Option<Self> {
        match c {
            '+' => Some(Operator::Add),
            '-' | '−' => Some(Operator::Subtract),
            '*' | '×' | 'x' => Some(Operator::Multiply),
            '/' | '÷' => Some(Operator::Divide),
            _ => None,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// One keypad press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Digit(u8),
    Decimal,
    Op(Operator),
    Equals,
    /// `C`: reset everything.
    Clear,
    /// `CE`: reset the display only.
    ClearEntry,
    Percent,
}

impl Key {
    fn from_char(c: char) -> Option<Self> {
        if let Some(d) = c.to_digit(10) {
            return Some(Key::Digit(d as u8));
        }
        match c {
            '.' | ',' => Some(Key::Decimal),
            '=' => Some(Key::Equals),
            '%' => Some(Key::Percent),
            'c' | 'C' => Some(Key::Clear),
            other => Operator::from_char(other).map(Key::Op),
        }
    }
}

impl FromStr for Key {
    type Err = WebtopError;

    /// Accepts a single key glyph or a keyboard name (`Enter`, `Escape`, `CE`).
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "CE" | "ce" => return Ok(Key::ClearEntry),
            "Enter" | "enter" => return Ok(Key::Equals),
            "Escape" | "escape" | "Esc" | "esc" => return Ok(Key::Clear),
            _ => {},
        }
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Key::from_char(c),
            _ => None,
        }
        .ok_or_else(|| WebtopError::Command(format!("calc: unknown key '{s}'")))
    }
}

/// Parse a line of keypad input.
///
/// Whitespace-separated words that name a key (`CE`, `Enter`, `Escape`)
/// count as one key; every other word is read one character at a time, so
/// `12+3=` and `1 2 + 3 =` are equivalent. Nothing is returned unless the
/// whole line parses.
pub fn parse_keys(input: &str) -> Result<Vec<Key>> {
    let mut keys = Vec::new();
    for word in input.split_whitespace() {
        if let Ok(key) = word.parse::<Key>() {
            keys.push(key);
            continue;
        }
        for c in word.chars() {
            let key = Key::from_char(c)
                .ok_or_else(|| WebtopError::Command(format!("calc: unknown key '{c}'")))?;
            keys.push(key);
        }
    }
    Ok(keys)
}
