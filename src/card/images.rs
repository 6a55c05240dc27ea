//! Images module

use super::{CardChange, CardEdit};
use crate::models::{new_id, ImageRef};

pub fn add_image(images: &[ImageRef], url: &str) -> Option<CardChange> {
    let url = url.trim();
    if url.is_empty() {
        return None;
    }
    let mut next = images.to_vec();
    next.push(ImageRef { id: new_id(), url: url.to_string(), note: String::new() });
    Some(CardChange::new(CardEdit::Images(next), "添加了图片"))
}

pub fn set_note(images: &[ImageRef], image_id: &str, note: &str) -> Option<CardChange> {
    let mut next = images.to_vec();
    next.iter_mut().find(|i| i.id == image_id)?.note = note.to_string();
    Some(CardChange::new(CardEdit::Images(next), "更新了图片备注"))
}

pub fn remove_image(images: &[ImageRef], image_id: &str) -> Option<CardChange> {
    let pos = images.iter().position(|i| i.id == image_id)?;
    let mut next = images.to_vec();
    next.remove(pos);
    Some(CardChange::new(CardEdit::Images(next), "删除了图片"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_lifecycle() {
        assert!(add_image(&[], "  ").is_none());

        let CardEdit::Images(images) = add_image(&[], "https://img.example/a.png").unwrap().edit else { panic!("wrong edit") };
        let id = images[0].id.clone();

        let CardEdit::Images(images) = set_note(&images, &id, "cover").unwrap().edit else { panic!("wrong edit") };
        assert_eq!(images[0].note, "cover");

        assert_eq!(remove_image(&images, &id).unwrap().edit, CardEdit::Images(vec![]));
        assert!(remove_image(&images, "other").is_none());
    }
}
