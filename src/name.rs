use core::fmt::Write;

use heapless::String;

use crate::records::Name;

const LETTERS: u8 = 26;

/// Result of pressing the confirm button during name entry
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Confirm {
    /// Letter appended, more can follow
    Appended,
    /// Name was already full, this is the final answer
    Done(Name),
}

/// Three letter initials typed by cycling through A-Z
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NameEntry {
    name: Name,
    letter: u8,
}

impl NameEntry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_full(&self) -> bool {
        self.name.len() == self.name.capacity()
    }

    /// Letter under the cursor
    pub fn letter(&self) -> char {
        (b'A' + self.letter) as char
    }

    pub fn next_letter(&mut self) {
        self.letter = (self.letter + 1) % LETTERS;
    }

    pub fn previous_letter(&mut self) {
        self.letter = (self.letter + LETTERS - 1) % LETTERS;
    }

    pub fn confirm(&mut self) -> Confirm {
        if self.is_full() {
            return Confirm::Done(self.name.clone());
        }
        let _ = self.name.push(self.letter());
        self.letter = 0;
        Confirm::Appended
    }

    /// Drop the last entered letter, putting it back under the cursor
    pub fn backspace(&mut self) {
        if let Some(c) = self.name.pop() {
            self.letter = c as u8 - b'A';
        }
    }

    /// Entered letters followed by the cursor, e.g. `AB[C]`
    pub fn render(&self) -> String<8> {
        let mut out = String::new();
        let _ = out.push_str(&self.name);
        if !self.is_full() {
            let _ = write!(out, "[{}]", self.letter());
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letters_wrap_both_ways() {
        let mut entry = NameEntry::new();
        assert_eq!(entry.letter(), 'A');
        entry.previous_letter();
        assert_eq!(entry.letter(), 'Z');
        entry.next_letter();
        entry.next_letter();
        assert_eq!(entry.letter(), 'B');
    }

    #[test]
    fn fourth_confirm_submits() {
        let mut entry = NameEntry::new();
        entry.next_letter();
        assert_eq!(entry.confirm(), Confirm::Appended);
        assert_eq!(entry.confirm(), Confirm::Appended);
        entry.previous_letter();
        assert_eq!(entry.confirm(), Confirm::Appended);
        assert!(entry.is_full());
        assert_eq!(entry.render().as_str(), "BAZ");

        match entry.confirm() {
            Confirm::Done(name) => assert_eq!(name.as_str(), "BAZ"),
            other => panic!("expected a finished name, got {:?}", other),
        }
    }

    #[test]
    fn backspace_restores_letter() {
        let mut entry = NameEntry::new();
        entry.previous_letter();
        entry.confirm();
        assert_eq!(entry.render().as_str(), "Z[A]");
        entry.backspace();
        assert_eq!(entry.name(), "");
        assert_eq!(entry.letter(), 'Z');
        entry.backspace();
        assert_eq!(entry.render().as_str(), "[Z]");
    }
}
