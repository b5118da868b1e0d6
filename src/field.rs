//! Editable answer text control
//!
//! One `AnswerField` backs each player's input. Editing happens here before
//! the keystroke reaches the component, the same order a browser input
//! updates its value before firing keyup.

use tui_input::{Input, InputRequest};

use crate::keys::Key;

/// Single-line text control with cursor movement
#[derive(Debug, Default, Clone)]
pub struct AnswerField {
    input: Input,
}

impl AnswerField {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a field pre-filled with `value`, cursor at the end
    pub fn with_value(value: &str) -> Self {
        Self {
            input: Input::new(value.to_string()),
        }
    }

    /// Current text
    pub fn value(&self) -> &str {
        self.input.value()
    }

    /// Cursor position in chars
    pub fn cursor(&self) -> usize {
        self.input.cursor()
    }

    /// Apply an editing key, returns true if the text or cursor changed
    pub fn edit(&mut self, key: Key) -> bool {
        let request = match key {
            Key::Char(c) => InputRequest::InsertChar(c),
            Key::Backspace => InputRequest::DeletePrevChar,
            Key::Delete => InputRequest::DeleteNextChar,
            Key::Left => InputRequest::GoToPrevChar,
            Key::Right => InputRequest::GoToNextChar,
            Key::Home => InputRequest::GoToStart,
            Key::End => InputRequest::GoToEnd,
            _ => return false,
        };
        self.input.handle(request).is_some()
    }

    /// Replace the whole value
    pub fn set_value(&mut self, value: &str) {
        self.input = Input::new(value.to_string());
    }

    pub fn clear(&mut self) {
        self.input.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_str(field: &mut AnswerField, text: &str) {
        for c in text.chars() {
            field.edit(Key::Char(c));
        }
    }

    #[test]
    fn test_basic_typing() {
        let mut field = AnswerField::new();
        type_str(&mut field, "Paris");
        assert_eq!(field.value(), "Paris");
        assert_eq!(field.cursor(), 5);
    }

    #[test]
    fn test_cursor_editing() {
        let mut field = AnswerField::new();
        type_str(&mut field, "Pars");

        field.edit(Key::Left);
        assert_eq!(field.cursor(), 3);
        field.edit(Key::Char('i'));
        assert_eq!(field.value(), "Pairs");

        field.edit(Key::Home);
        field.edit(Key::Delete);
        assert_eq!(field.value(), "airs");

        field.edit(Key::End);
        field.edit(Key::Backspace);
        assert_eq!(field.value(), "air");
    }

    #[test]
    fn test_non_editing_keys_are_noops() {
        let mut field = AnswerField::with_value("Rome");
        assert!(!field.edit(Key::Enter));
        assert!(!field.edit(Key::Tab));
        assert!(!field.edit(Key::Other));
        assert_eq!(field.value(), "Rome");
    }

    #[test]
    fn test_backspace_at_start() {
        let mut field = AnswerField::new();
        assert!(!field.edit(Key::Backspace));
        assert_eq!(field.value(), "");
    }

    #[test]
    fn test_clear_and_set() {
        let mut field = AnswerField::with_value("Oslo");
        field.clear();
        assert_eq!(field.value(), "");
        field.set_value("Bern");
        assert_eq!(field.value(), "Bern");
        assert_eq!(field.cursor(), 4);
    }
}
