//! Attachments module
//!
//! Files are picked client-side; only the name, byte size and an object URL
//! are captured. Content is never read.

use super::{CardChange, CardEdit};
use crate::models::{new_id, Attachment};

pub fn add_attachment(attachments: &[Attachment], name: &str, size: u64, blob_ref: &str) -> CardChange {
    let mut next = attachments.to_vec();
    next.push(Attachment {
        id: new_id(),
        name: name.to_string(),
        size,
        blob_ref: blob_ref.to_string(),
        note: String::new(),
    });
    CardChange::new(CardEdit::Attachments(next), format!("上传了附件「{}」", name))
}

pub fn set_note(attachments: &[Attachment], attachment_id: &str, note: &str) -> Option<CardChange> {
    let mut next = attachments.to_vec();
    let attachment = next.iter_mut().find(|a| a.id == attachment_id)?;
    attachment.note = note.to_string();
    let summary = format!("更新了附件「{}」的备注", attachment.name);
    Some(CardChange::new(CardEdit::Attachments(next), summary))
}

pub fn remove_attachment(attachments: &[Attachment], attachment_id: &str) -> Option<CardChange> {
    let pos = attachments.iter().position(|a| a.id == attachment_id)?;
    let mut next = attachments.to_vec();
    let removed = next.remove(pos);
    Some(CardChange::new(CardEdit::Attachments(next), format!("删除了附件「{}」", removed.name)))
}

/// Human-readable byte size
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{} {}", bytes, UNITS[0])
    } else {
        format!("{:.1} {}", value, UNITS[unit])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_then_note_then_remove() {
        let change = add_attachment(&[], "design.pdf", 2048, "blob:abc");
        let CardEdit::Attachments(list) = change.edit else { panic!("wrong edit") };
        assert_eq!(list[0].name, "design.pdf");
        assert_eq!(list[0].size, 2048);
        assert_eq!(list[0].blob_ref, "blob:abc");

        let id = list[0].id.clone();
        let CardEdit::Attachments(list) = set_note(&list, &id, "v2").unwrap().edit else { panic!("wrong edit") };
        assert_eq!(list[0].note, "v2");

        let change = remove_attachment(&list, &id).unwrap();
        assert_eq!(change.edit, CardEdit::Attachments(vec![]));
        assert_eq!(change.summary, "删除了附件「design.pdf」");
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(1536), "1.5 KB");
        assert_eq!(format_size(5 * 1024 * 1024), "5.0 MB");
    }
}
