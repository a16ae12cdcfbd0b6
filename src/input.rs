/// Text typed into the submission field.
///
/// Enforces the character limit and hands out trimmed, non-empty text only.
pub struct SubmissionInput {
    pub buffer: String,
    max_chars: usize,
}

impl SubmissionInput {
    pub fn new(max_chars: usize) -> Self {
        Self {
            buffer: String::new(),
            max_chars,
        }
    }

    pub fn max_chars(&self) -> usize {
        self.max_chars
    }

    pub fn set_max_chars(&mut self, max_chars: usize) {
        self.max_chars = max_chars;
        self.enforce_limit();
    }

    /// Cuts the buffer down to the limit, counting chars rather than bytes
    pub fn enforce_limit(&mut self) {
        if let Some((byte_index, _)) = self.buffer.char_indices().nth(self.max_chars) {
            self.buffer.truncate(byte_index);
        }
    }

    /// Whether the send button should be enabled
    pub fn can_submit(&self) -> bool {
        !self.buffer.trim().is_empty()
    }

    /// Takes the trimmed text and clears the field. Leaves the field alone
    /// and returns `None` when there is nothing to send.
    pub fn take(&mut self) -> Option<String> {
        self.enforce_limit();
        if !self.can_submit() {
            return None;
        }
        let text = self.buffer.trim().to_string();
        self.buffer.clear();
        Some(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_trims_and_clears() {
        let mut input = SubmissionInput::new(50);
        input.buffer = "  Alice  ".to_string();

        assert!(input.can_submit());
        assert_eq!(input.take(), Some("Alice".to_string()));
        assert!(input.buffer.is_empty());
    }

    #[test]
    fn test_whitespace_is_not_submittable() {
        let mut input = SubmissionInput::new(50);
        input.buffer = " \t ".to_string();

        assert!(!input.can_submit());
        assert_eq!(input.take(), None);
        assert_eq!(input.buffer, " \t ");
    }

    #[test]
    fn test_limit_counts_chars() {
        let mut input = SubmissionInput::new(3);
        input.buffer = "héllo".to_string();
        input.enforce_limit();
        assert_eq!(input.buffer, "hél");

        input.buffer = "✨✨✨✨".to_string();
        assert_eq!(input.take(), Some("✨✨✨".to_string()));
    }

    #[test]
    fn test_fifty_char_cap() {
        let mut input = SubmissionInput::new(50);
        input.buffer = "x".repeat(80);
        let text = input.take().unwrap();
        assert_eq!(text.chars().count(), 50);
    }
}
