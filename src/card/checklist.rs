//! Checklist module

use super::{CardChange, CardEdit};
use crate::models::{new_id, ChecklistItem};

/// Completion as a whole percentage, 0 when the list is empty
pub fn completion_percent(items: &[ChecklistItem]) -> u8 {
    if items.is_empty() {
        return 0;
    }
    let checked = items.iter().filter(|i| i.checked).count();
    ((checked as f64 / items.len() as f64) * 100.0).round() as u8
}

pub fn add_item(items: &[ChecklistItem], text: &str) -> Option<CardChange> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    let mut next = items.to_vec();
    next.push(ChecklistItem { id: new_id(), text: text.to_string(), checked: false });
    Some(CardChange::new(CardEdit::Checklist(next), format!("添加了检查项「{}」", text)))
}

pub fn toggle_item(items: &[ChecklistItem], item_id: &str) -> Option<CardChange> {
    let mut next = items.to_vec();
    let item = next.iter_mut().find(|i| i.id == item_id)?;
    item.checked = !item.checked;
    let summary = if item.checked {
        format!("完成了检查项「{}」", item.text)
    } else {
        format!("取消完成检查项「{}」", item.text)
    };
    Some(CardChange::new(CardEdit::Checklist(next), summary))
}

pub fn edit_item(items: &[ChecklistItem], item_id: &str, text: &str) -> Option<CardChange> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    let mut next = items.to_vec();
    let item = next.iter_mut().find(|i| i.id == item_id)?;
    item.text = text.to_string();
    Some(CardChange::new(CardEdit::Checklist(next), format!("修改了检查项「{}」", text)))
}

pub fn remove_item(items: &[ChecklistItem], item_id: &str) -> Option<CardChange> {
    let pos = items.iter().position(|i| i.id == item_id)?;
    let mut next = items.to_vec();
    let removed = next.remove(pos);
    Some(CardChange::new(CardEdit::Checklist(next), format!("删除了检查项「{}」", removed.text)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, checked: bool) -> ChecklistItem {
        ChecklistItem { id: id.into(), text: format!("step {}", id), checked }
    }

    #[test]
    fn test_completion_percent() {
        assert_eq!(completion_percent(&[]), 0);
        assert_eq!(completion_percent(&[item("1", true), item("2", false), item("3", true)]), 67);
        assert_eq!(completion_percent(&[item("1", true), item("2", false), item("3", false)]), 33);
        assert_eq!(completion_percent(&[item("1", true)]), 100);
    }

    #[test]
    fn test_toggle_flips_only_target() {
        let items = vec![item("1", false), item("2", false)];
        let change = toggle_item(&items, "2").unwrap();
        match change.edit {
            CardEdit::Checklist(next) => {
                assert!(!next[0].checked);
                assert!(next[1].checked);
            }
            other => panic!("unexpected edit: {:?}", other),
        }
        assert_eq!(change.summary, "完成了检查项「step 2」");
        assert!(toggle_item(&items, "missing").is_none());
    }

    #[test]
    fn test_add_ignores_blank() {
        assert!(add_item(&[], "   ").is_none());
        let change = add_item(&[], " write tests ").unwrap();
        let CardEdit::Checklist(next) = change.edit else { panic!("wrong edit") };
        assert_eq!(next.len(), 1);
        assert_eq!(next[0].text, "write tests");
        assert!(!next[0].checked);
    }

    #[test]
    fn test_remove_item() {
        let items = vec![item("1", false), item("2", true)];
        let CardEdit::Checklist(next) = remove_item(&items, "1").unwrap().edit else { panic!("wrong edit") };
        assert_eq!(next, vec![item("2", true)]);
    }
}
