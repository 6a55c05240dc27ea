//! Members (assignees) module

use super::{CardChange, CardEdit};
use crate::models::UserRef;

/// Assign a user; no-op if already assigned
pub fn add_assignee(assignees: &[UserRef], user: &UserRef) -> Option<CardChange> {
    if assignees.iter().any(|a| a.id == user.id) {
        return None;
    }
    let mut next = assignees.to_vec();
    next.push(user.clone());
    Some(CardChange::new(CardEdit::Assignees(next), format!("指派给 {}", user.name)))
}

pub fn remove_assignee(assignees: &[UserRef], user_id: &str) -> Option<CardChange> {
    let pos = assignees.iter().position(|a| a.id == user_id)?;
    let mut next = assignees.to_vec();
    let removed = next.remove(pos);
    Some(CardChange::new(CardEdit::Assignees(next), format!("移除了成员 {}", removed.name)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: &str) -> UserRef {
        UserRef { id: id.into(), name: format!("user-{}", id) }
    }

    #[test]
    fn test_no_duplicate_assignees() {
        let current = vec![user("1")];
        assert!(add_assignee(&current, &user("1")).is_none());

        let change = add_assignee(&current, &user("2")).unwrap();
        assert_eq!(change.edit, CardEdit::Assignees(vec![user("1"), user("2")]));
        assert_eq!(change.summary, "指派给 user-2");
    }

    #[test]
    fn test_remove_assignee() {
        let change = remove_assignee(&[user("1"), user("2")], "1").unwrap();
        assert_eq!(change.edit, CardEdit::Assignees(vec![user("2")]));
        assert!(remove_assignee(&[user("2")], "1").is_none());
    }
}
