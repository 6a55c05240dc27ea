//! Description module

use super::{CardChange, CardEdit};

/// Returns None when the text is unchanged
pub fn set_description(current: &str, text: &str) -> Option<CardChange> {
    if current == text {
        return None;
    }
    let summary = if text.trim().is_empty() { "清空了描述" } else { "更新了描述" };
    Some(CardChange::new(CardEdit::Description(text.to_string()), summary))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_description() {
        assert!(set_description("same", "same").is_none());
        let change = set_description("", "## Notes").unwrap();
        assert_eq!(change.edit, CardEdit::Description("## Notes".into()));
        assert_eq!(change.summary, "更新了描述");
        assert_eq!(set_description("x", "").unwrap().summary, "清空了描述");
    }
}
