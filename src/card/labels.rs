//! Labels module

use super::{CardChange, CardEdit};
use crate::models::Label;

/// Preset label colors offered by the picker
pub const LABEL_COLORS: &[(&str, &str)] = &[
    ("#e74c3c", "红"),
    ("#e67e22", "橙"),
    ("#f1c40f", "黄"),
    ("#27ae60", "绿"),
    ("#3498db", "蓝"),
    ("#9b59b6", "紫"),
];

pub fn add_label(labels: &[Label], text: &str, color: &str) -> Option<CardChange> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    let mut next = labels.to_vec();
    next.push(Label { text: text.to_string(), color: color.to_string() });
    Some(CardChange::new(CardEdit::Labels(next), format!("添加了标签「{}」", text)))
}

/// Remove the first label whose text matches; others are kept
pub fn remove_label(labels: &[Label], text: &str) -> Option<CardChange> {
    let pos = labels.iter().position(|l| l.text == text)?;
    let mut next = labels.to_vec();
    next.remove(pos);
    Some(CardChange::new(CardEdit::Labels(next), format!("删除了标签「{}」", text)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn label(text: &str, color: &str) -> Label {
        Label { text: text.into(), color: color.into() }
    }

    #[test]
    fn test_remove_exactly_one_match() {
        let labels = vec![label("bug", "#f00"), label("ui", "#00f"), label("bug", "#0f0")];
        let change = remove_label(&labels, "bug").unwrap();
        assert_eq!(change.edit, CardEdit::Labels(vec![label("ui", "#00f"), label("bug", "#0f0")]));
        assert_eq!(change.summary, "删除了标签「bug」");
    }

    #[test]
    fn test_remove_missing_label() {
        assert!(remove_label(&[label("ui", "#00f")], "bug").is_none());
    }

    #[test]
    fn test_add_label() {
        let change = add_label(&[], "backend", "#3498db").unwrap();
        assert_eq!(change.edit, CardEdit::Labels(vec![label("backend", "#3498db")]));
        assert!(add_label(&[], "", "#fff").is_none());
    }
}
