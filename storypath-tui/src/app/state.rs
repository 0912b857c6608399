use storypath::{LocationId, ProjectId};

/// A text input with mid-string cursor support.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextInput {
    pub value: String,
    pub cursor: usize,
}

impl TextInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_str(s: &str) -> Self {
        Self {
            value: s.to_string(),
            cursor: s.len(),
        }
    }

    /// Insert a character at the cursor position.
    pub fn insert(&mut self, c: char) {
        self.value.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    /// Delete the character immediately before the cursor (backspace).
    /// Returns whether anything was removed.
    pub fn backspace(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        let new_cursor = self.prev_boundary(self.cursor);
        self.value.drain(new_cursor..self.cursor);
        self.cursor = new_cursor;
        true
    }

    /// Move cursor one char to the left.
    pub fn move_left(&mut self) {
        if self.cursor > 0 {
            self.cursor = self.prev_boundary(self.cursor);
        }
    }

    /// Move cursor one char to the right.
    pub fn move_right(&mut self) {
        if self.cursor < self.value.len() {
            self.cursor = self.next_boundary(self.cursor);
        }
    }

    pub fn home(&mut self) {
        self.cursor = 0;
    }
    pub fn end(&mut self) {
        self.cursor = self.value.len();
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    /// Returns the string split at the cursor: (before, after).
    pub fn split_at_cursor(&self) -> (&str, &str) {
        (&self.value[..self.cursor], &self.value[self.cursor..])
    }

    fn prev_boundary(&self, pos: usize) -> usize {
        debug_assert!(pos > 0, "prev_boundary called with pos == 0");
        let mut p = pos;
        loop {
            p -= 1;
            if self.value.is_char_boundary(p) {
                return p;
            }
        }
    }
    fn next_boundary(&self, pos: usize) -> usize {
        debug_assert!(
            pos < self.value.len(),
            "next_boundary called at end of string"
        );
        let mut p = pos + 1;
        while p <= self.value.len() && !self.value.is_char_boundary(p) {
            p += 1;
        }
        p
    }
}

/// What a confirmed delete removes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteTarget {
    Project(ProjectId),
    Location(LocationId),
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeleteContext {
    pub target: DeleteTarget,
    pub display_label: String,
}

impl DeleteContext {
    pub fn prompt(&self) -> &'static str {
        match self.target {
            DeleteTarget::Project(_) => "Are you sure you want to delete this project?",
            DeleteTarget::Location(_) => "Are you sure you want to delete this location?",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_backspace_multibyte() {
        let mut input = TextInput::from_str("Café");
        assert!(input.backspace());
        assert_eq!(input.value, "Caf");
        input.insert('é');
        input.move_left();
        input.insert('x');
        assert_eq!(input.value, "Cafxé");
    }

    #[test]
    fn test_backspace_at_start_reports_no_change() {
        let mut input = TextInput::from_str("ab");
        input.home();
        assert!(!input.backspace());
        assert_eq!(input.value, "ab");
    }

    #[test]
    fn test_split_at_cursor() {
        let mut input = TextInput::from_str("hello");
        input.move_left();
        input.move_left();
        assert_eq!(input.split_at_cursor(), ("hel", "lo"));
    }
}
