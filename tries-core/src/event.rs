use crate::config::Command;

/// Input to the picker's state machine, already resolved from raw keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Command(Command),
    /// A typed character or a pasted string. Rejected whole if any character
    /// is outside [`is_valid_input`].
    Input(String),
}

/// Letters, digits, space and `- _ . : / @`.
pub fn is_valid_input_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | ':' | '/' | '@' | ' ')
}

pub fn is_valid_input(text: &str) -> bool {
    !text.is_empty() && text.chars().all(is_valid_input_char)
}
