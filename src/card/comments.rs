//! Comments module

use chrono::{DateTime, Utc};

use super::{CardChange, CardEdit};
use crate::models::{new_id, Comment};

/// Author label for comments written in this client
pub const SELF_AUTHOR: &str = "我";

/// Append a comment by the current user
pub fn add_comment(comments: &[Comment], text: &str, now: DateTime<Utc>) -> Option<CardChange> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    let mut next = comments.to_vec();
    next.push(Comment {
        id: new_id(),
        author: SELF_AUTHOR.to_string(),
        text: text.to_string(),
        timestamp: now,
    });
    Some(CardChange::new(CardEdit::Comments(next), "添加了评论"))
}

pub fn delete_comment(comments: &[Comment], comment_id: &str) -> Option<CardChange> {
    let pos = comments.iter().position(|c| c.id == comment_id)?;
    let mut next = comments.to_vec();
    next.remove(pos);
    Some(CardChange::new(CardEdit::Comments(next), "删除了评论"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_comment_appends_with_self_author() {
        let now = Utc::now();
        let existing = vec![Comment { id: "c0".into(), author: "Ann".into(), text: "first".into(), timestamp: now }];

        let change = add_comment(&existing, "looks good", now).unwrap();
        let CardEdit::Comments(next) = change.edit else { panic!("wrong edit") };

        assert_eq!(next.len(), 2);
        assert_eq!(next[0], existing[0]);
        let added = &next[1];
        assert_eq!(added.author, "我");
        assert_eq!(added.text, "looks good");
        assert!(!added.id.is_empty());
        assert_ne!(added.id, "c0");
    }

    #[test]
    fn test_blank_comment_ignored() {
        assert!(add_comment(&[], "\n ", Utc::now()).is_none());
    }

    #[test]
    fn test_delete_comment() {
        let now = Utc::now();
        let CardEdit::Comments(list) = add_comment(&[], "a", now).unwrap().edit else { panic!("wrong edit") };
        let id = list[0].id.clone();
        assert_eq!(delete_comment(&list, &id).unwrap().edit, CardEdit::Comments(vec![]));
    }
}
