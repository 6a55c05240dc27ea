//! Card Modules
//!
//! Each module edits one sub-field of a card. Modules never touch the card
//! directly: they return a `CardChange` message that the detail panel
//! applies with `Card::apply` and records in its change log.

pub mod attachments;
pub mod checklist;
pub mod comments;
pub mod description;
pub mod images;
pub mod labels;
pub mod members;

use chrono::NaiveDate;

use crate::models::{Attachment, Card, CardStatus, ChecklistItem, Comment, ImageRef, Label, Priority, UserRef};

/// New value for exactly one card sub-field
#[derive(Debug, Clone, PartialEq)]
pub enum CardEdit {
    Title(String),
    Description(String),
    Status(CardStatus),
    Priority(Priority),
    DueDate(Option<NaiveDate>),
    Assignees(Vec<UserRef>),
    Attachments(Vec<Attachment>),
    Images(Vec<ImageRef>),
    Checklist(Vec<ChecklistItem>),
    Labels(Vec<Label>),
    Comments(Vec<Comment>),
}

/// Message from a module to the panel: the edit plus a human-readable summary
#[derive(Debug, Clone, PartialEq)]
pub struct CardChange {
    pub edit: CardEdit,
    pub summary: String,
}

impl CardChange {
    pub fn new(edit: CardEdit, summary: impl Into<String>) -> Self {
        Self { edit, summary: summary.into() }
    }
}

impl Card {
    /// Replace the sub-field named by `edit`, leaving all others alone
    pub fn apply(&mut self, edit: CardEdit) {
        match edit {
            CardEdit::Title(v) => self.title = v,
            CardEdit::Description(v) => self.description = v,
            CardEdit::Status(v) => self.status = v,
            CardEdit::Priority(v) => self.priority = v,
            CardEdit::DueDate(v) => self.due_date = v,
            CardEdit::Assignees(v) => self.assignees = v,
            CardEdit::Attachments(v) => self.attachments = v,
            CardEdit::Images(v) => self.images = v,
            CardEdit::Checklist(v) => self.checklist = v,
            CardEdit::Labels(v) => self.labels = v,
            CardEdit::Comments(v) => self.comments = v,
        }
    }
}

// Header fields edited directly by the detail panel

pub fn set_title(title: &str) -> CardChange {
    CardChange::new(CardEdit::Title(title.to_string()), format!("修改标题为「{}」", title))
}

pub fn set_status(status: CardStatus) -> CardChange {
    CardChange::new(CardEdit::Status(status), format!("状态改为「{}」", status.label()))
}

pub fn set_priority(priority: Priority) -> CardChange {
    CardChange::new(CardEdit::Priority(priority), format!("优先级改为「{}」", priority.label()))
}

pub fn set_due_date(date: Option<NaiveDate>) -> CardChange {
    let summary = match date {
        Some(d) => format!("截止日期设为 {}", d.format("%Y-%m-%d")),
        None => "清除了截止日期".to_string(),
    };
    CardChange::new(CardEdit::DueDate(date), summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_touches_one_field() {
        let mut card = Card::new("Task");
        card.labels.push(Label { text: "bug".into(), color: "#f00".into() });
        let before = card.clone();

        card.apply(set_status(CardStatus::Done).edit);

        assert_eq!(card.status, CardStatus::Done);
        assert_eq!(card.labels, before.labels);
        assert_eq!(card.title, before.title);
    }

    #[test]
    fn test_due_date_summary() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 1);
        assert_eq!(set_due_date(date).summary, "截止日期设为 2024-05-01");
        assert_eq!(set_due_date(None).summary, "清除了截止日期");
    }
}
