//! Frontend Models
//!
//! Typed records for board entities, matching the server's JSON shapes.
//! Deserializing into these types is the validation boundary: unknown
//! status/priority values are rejected.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

pub type ListId = String;
pub type CardId = String;
pub type UserId = String;

/// Generate a fresh entity identifier
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum CardStatus {
    #[default]
    Pending,
    InProgress,
    Done,
}

impl CardStatus {
    pub const ALL: [CardStatus; 3] = [CardStatus::Pending, CardStatus::InProgress, CardStatus::Done];

    pub fn as_str(&self) -> &'static str {
        match self {
            CardStatus::Pending => "pending",
            CardStatus::InProgress => "in-progress",
            CardStatus::Done => "done",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CardStatus::Pending => "待处理",
            CardStatus::InProgress => "进行中",
            CardStatus::Done => "已完成",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.as_str() == s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Priority::Low => "低",
            Priority::Medium => "中",
            Priority::High => "高",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.as_str() == s)
    }
}

/// Reference to a user (assignee, list member)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRef {
    pub id: UserId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    pub id: String,
    pub name: String,
    /// Size in bytes
    pub size: u64,
    /// Object URL or server blob key
    pub blob_ref: String,
    #[serde(default)]
    pub note: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageRef {
    pub id: String,
    pub url: String,
    #[serde(default)]
    pub note: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChecklistItem {
    pub id: String,
    pub text: String,
    pub checked: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Label {
    pub text: String,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: String,
    pub author: String,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

/// A task card. Belongs to exactly one list at a time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: CardStatus,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub assignees: Vec<UserRef>,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
    #[serde(default)]
    pub images: Vec<ImageRef>,
    #[serde(default)]
    pub checklist: Vec<ChecklistItem>,
    #[serde(default)]
    pub labels: Vec<Label>,
    #[serde(default)]
    pub comments: Vec<Comment>,
}

impl Card {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: new_id(),
            title: title.into(),
            description: String::new(),
            status: CardStatus::default(),
            priority: Priority::default(),
            due_date: None,
            assignees: Vec::new(),
            attachments: Vec::new(),
            images: Vec::new(),
            checklist: Vec::new(),
            labels: Vec::new(),
            comments: Vec::new(),
        }
    }
}

/// An ordered column of cards
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct List {
    pub id: ListId,
    pub name: String,
    pub owner: UserId,
    #[serde(default)]
    pub members: Vec<UserId>,
    #[serde(default)]
    pub cards: Vec<Card>,
}

impl List {
    pub fn new(name: impl Into<String>, owner: impl Into<UserId>) -> Self {
        let owner = owner.into();
        Self {
            id: new_id(),
            name: name.into(),
            members: vec![owner.clone()],
            owner,
            cards: Vec::new(),
        }
    }
}

/// User account as returned by the users/profile endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
}

/// Chat message (REST history and realtime frames)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    pub from: UserId,
    pub to: UserId,
    pub content: String,
    pub sent_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_deserializes_with_defaults() {
        let card: Card = serde_json::from_str(r#"{"id":"c1","title":"Write docs","status":"in-progress"}"#).unwrap();
        assert_eq!(card.status, CardStatus::InProgress);
        assert_eq!(card.priority, Priority::Medium);
        assert!(card.checklist.is_empty());
        assert!(card.due_date.is_none());
    }

    #[test]
    fn test_unknown_status_is_rejected() {
        let result = serde_json::from_str::<Card>(r#"{"id":"c1","title":"x","status":"blocked"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_new_list_owner_is_member() {
        let list = List::new("Backlog", "u1");
        assert_eq!(list.owner, "u1");
        assert_eq!(list.members, vec!["u1".to_string()]);
    }

    #[test]
    fn test_enum_parse() {
        assert_eq!(CardStatus::parse("done"), Some(CardStatus::Done));
        assert_eq!(Priority::parse("high"), Some(Priority::High));
        assert_eq!(Priority::parse("urgent"), None);
    }
}
