//! Board Operations
//!
//! Pure list/card mutations. Every operation takes the current list
//! collection and returns the fully updated collection, which the store
//! swaps in with a single write.

use std::collections::HashSet;

use thiserror::Error;

use crate::models::{new_id, Card, List, ListId, UserId};

pub type BoardResult<T> = Result<T, BoardError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum BoardError {
    #[error("list not found: {0}")]
    ListNotFound(String),

    #[error("card not found: {0}")]
    CardNotFound(String),

    #[error("duplicate card id: {0}")]
    DuplicateCard(String),

    #[error("card {card} is not in list {list}")]
    CardNotInList { card: String, list: String },

    #[error("the owner cannot be removed from list {0}")]
    OwnerRemoval(String),
}

/// Suffix appended to the title of a duplicated card
pub const DUPLICATE_SUFFIX: &str = " (副本)";

/// Validate lists received from the server (card ids unique board-wide)
pub fn from_lists(lists: Vec<List>) -> BoardResult<Vec<List>> {
    let mut seen = HashSet::new();
    for card in lists.iter().flat_map(|l| l.cards.iter()) {
        if !seen.insert(card.id.as_str()) {
            return Err(BoardError::DuplicateCard(card.id.clone()));
        }
    }
    Ok(lists)
}

fn list_index(lists: &[List], list_id: &str) -> BoardResult<usize> {
    lists
        .iter()
        .position(|l| l.id == list_id)
        .ok_or_else(|| BoardError::ListNotFound(list_id.to_string()))
}

/// Locate a card: (list index, card index)
pub fn find_card(lists: &[List], card_id: &str) -> Option<(usize, usize)> {
    lists.iter().enumerate().find_map(|(li, list)| {
        list.cards.iter().position(|c| c.id == card_id).map(|ci| (li, ci))
    })
}

pub fn get_card<'a>(lists: &'a [List], card_id: &str) -> Option<&'a Card> {
    find_card(lists, card_id).map(|(li, ci)| &lists[li].cards[ci])
}

/// Move a card to `dest_index` of `to_list` (clamped). Same-list moves reorder.
pub fn move_card(lists: &[List], card_id: &str, from_list: &str, to_list: &str, dest_index: usize) -> BoardResult<Vec<List>> {
    let from = list_index(lists, from_list)?;
    let to = list_index(lists, to_list)?;
    let pos = lists[from]
        .cards
        .iter()
        .position(|c| c.id == card_id)
        .ok_or_else(|| BoardError::CardNotInList { card: card_id.to_string(), list: from_list.to_string() })?;

    let mut next = lists.to_vec();
    let card = next[from].cards.remove(pos);
    let target = &mut next[to].cards;
    let index = dest_index.min(target.len());
    target.insert(index, card);
    Ok(next)
}

/// Convert a drop-zone index (a gap in the list as displayed before the drag)
/// into an insertion index for `move_card`. Within one list the dragged card's
/// own slot disappears first, so gaps below it shift up by one.
pub fn zone_to_index(same_list: bool, from_pos: usize, zone: usize) -> usize {
    if same_list && zone > from_pos {
        zone - 1
    } else {
        zone
    }
}

/// A drop resolved into `move_card` arguments
#[derive(Debug, Clone, PartialEq)]
pub struct CardMove {
    pub from: ListId,
    pub to: ListId,
    pub index: usize,
}

/// Resolve a drop of `card_id` onto `to_list`. `zone` is the gap the card was
/// released over; `None` (the list body) appends. `Ok(None)` when the card
/// would land where it already is.
pub fn resolve_drop(lists: &[List], card_id: &str, to_list: &str, zone: Option<usize>) -> BoardResult<Option<CardMove>> {
    let (from, from_pos) = find_card(lists, card_id).ok_or_else(|| BoardError::CardNotFound(card_id.to_string()))?;
    let to = list_index(lists, to_list)?;
    let same_list = from == to;

    // Highest index the card can occupy once removed from its source
    let last = if same_list { lists[to].cards.len() - 1 } else { lists[to].cards.len() };
    let index = match zone {
        Some(zone) => zone_to_index(same_list, from_pos, zone),
        None => last,
    }
    .min(last);

    if same_list && index == from_pos {
        return Ok(None);
    }
    Ok(Some(CardMove { from: lists[from].id.clone(), to: lists[to].id.clone(), index }))
}

/// Owner and members of a list, without its cards
#[derive(Debug, Clone, PartialEq)]
pub struct Membership {
    pub owner: UserId,
    pub members: Vec<UserId>,
}

pub fn membership(lists: &[List], list_id: &str) -> Option<Membership> {
    lists
        .iter()
        .find(|l| l.id == list_id)
        .map(|l| Membership { owner: l.owner.clone(), members: l.members.clone() })
}

/// Append a card to a list
pub fn add_card(lists: &[List], list_id: &str, card: Card) -> BoardResult<Vec<List>> {
    let li = list_index(lists, list_id)?;
    if find_card(lists, &card.id).is_some() {
        return Err(BoardError::DuplicateCard(card.id));
    }
    let mut next = lists.to_vec();
    next[li].cards.push(card);
    Ok(next)
}

/// Replace a card by id, wherever it lives
pub fn update_card(lists: &[List], card: Card) -> BoardResult<Vec<List>> {
    let (li, ci) = find_card(lists, &card.id).ok_or_else(|| BoardError::CardNotFound(card.id.clone()))?;
    let mut next = lists.to_vec();
    next[li].cards[ci] = card;
    Ok(next)
}

pub fn delete_card(lists: &[List], card_id: &str) -> BoardResult<Vec<List>> {
    let (li, ci) = find_card(lists, card_id).ok_or_else(|| BoardError::CardNotFound(card_id.to_string()))?;
    let mut next = lists.to_vec();
    next[li].cards.remove(ci);
    Ok(next)
}

/// Copy a card (fresh ids throughout) and insert it right after the original.
/// Returns the new collection and the copy's id.
pub fn duplicate_card(lists: &[List], card_id: &str) -> BoardResult<(Vec<List>, String)> {
    let (li, ci) = find_card(lists, card_id).ok_or_else(|| BoardError::CardNotFound(card_id.to_string()))?;
    let mut copy = lists[li].cards[ci].clone();
    copy.id = new_id();
    copy.title.push_str(DUPLICATE_SUFFIX);
    copy.checklist.iter_mut().for_each(|i| i.id = new_id());
    copy.attachments.iter_mut().for_each(|a| a.id = new_id());
    copy.images.iter_mut().for_each(|i| i.id = new_id());
    copy.comments.iter_mut().for_each(|c| c.id = new_id());
    let copy_id = copy.id.clone();

    let mut next = lists.to_vec();
    next[li].cards.insert(ci + 1, copy);
    Ok((next, copy_id))
}

// ========================
// List Operations
// ========================

pub fn add_list(lists: &[List], list: List) -> BoardResult<Vec<List>> {
    for card in &list.cards {
        if find_card(lists, &card.id).is_some() {
            return Err(BoardError::DuplicateCard(card.id.clone()));
        }
    }
    let mut next = lists.to_vec();
    next.push(list);
    Ok(next)
}

pub fn rename_list(lists: &[List], list_id: &str, name: &str) -> BoardResult<Vec<List>> {
    let li = list_index(lists, list_id)?;
    let mut next = lists.to_vec();
    next[li].name = name.to_string();
    Ok(next)
}

pub fn delete_list(lists: &[List], list_id: &str) -> BoardResult<Vec<List>> {
    let li = list_index(lists, list_id)?;
    let mut next = lists.to_vec();
    next.remove(li);
    Ok(next)
}

/// Reorder lists
pub fn move_list(lists: &[List], list_id: &str, dest_index: usize) -> BoardResult<Vec<List>> {
    let li = list_index(lists, list_id)?;
    let mut next = lists.to_vec();
    let list = next.remove(li);
    let index = dest_index.min(next.len());
    next.insert(index, list);
    Ok(next)
}

/// Hand a list to another user; the new owner becomes a member if needed
pub fn transfer_owner(lists: &[List], list_id: &str, new_owner: &str) -> BoardResult<Vec<List>> {
    let li = list_index(lists, list_id)?;
    let mut next = lists.to_vec();
    let list = &mut next[li];
    list.owner = new_owner.to_string();
    if !list.members.iter().any(|m| m == new_owner) {
        list.members.push(new_owner.to_string());
    }
    Ok(next)
}

pub fn add_member(lists: &[List], list_id: &str, user: &UserId) -> BoardResult<Vec<List>> {
    let li = list_index(lists, list_id)?;
    let mut next = lists.to_vec();
    if !next[li].members.contains(user) {
        next[li].members.push(user.clone());
    }
    Ok(next)
}

pub fn remove_member(lists: &[List], list_id: &str, user: &str) -> BoardResult<Vec<List>> {
    let li = list_index(lists, list_id)?;
    if lists[li].owner == user {
        return Err(BoardError::OwnerRemoval(list_id.to_string()));
    }
    let mut next = lists.to_vec();
    next[li].members.retain(|m| m != user);
    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_card(id: &str) -> Card {
        let mut card = Card::new(format!("Card {}", id));
        card.id = id.to_string();
        card
    }

    fn make_list(id: &str, card_ids: &[&str]) -> List {
        let mut list = List::new(format!("List {}", id), "owner");
        list.id = id.to_string();
        list.cards = card_ids.iter().map(|c| make_card(c)).collect();
        list
    }

    fn ids(list: &List) -> Vec<&str> {
        list.cards.iter().map(|c| c.id.as_str()).collect()
    }

    fn board() -> Vec<List> {
        vec![make_list("a", &["a1", "a2", "a3"]), make_list("b", &["b1", "b2"])]
    }

    #[test]
    fn test_move_card_across_lists() {
        let lists = board();
        let next = move_card(&lists, "a2", "a", "b", 1).unwrap();

        assert_eq!(next[0].cards.len(), 2);
        assert_eq!(next[1].cards.len(), 3);
        assert_eq!(ids(&next[0]), vec!["a1", "a3"]);
        assert_eq!(ids(&next[1]), vec!["b1", "a2", "b2"]);
        // Input untouched
        assert_eq!(ids(&lists[0]), vec!["a1", "a2", "a3"]);
    }

    #[test]
    fn test_move_card_within_list() {
        let next = move_card(&board(), "a1", "a", "a", 2).unwrap();
        assert_eq!(ids(&next[0]), vec!["a2", "a3", "a1"]);
    }

    #[test]
    fn test_move_card_clamps_index() {
        let next = move_card(&board(), "a1", "a", "b", 99).unwrap();
        assert_eq!(ids(&next[1]), vec!["b1", "b2", "a1"]);
    }

    #[test]
    fn test_zone_to_index() {
        // a1 dropped in the gap after a3 (zone 3) ends up last
        let index = zone_to_index(true, 0, 3);
        let next = move_card(&board(), "a1", "a", "a", index).unwrap();
        assert_eq!(ids(&next[0]), vec!["a2", "a3", "a1"]);

        // Gap directly above or below itself is a no-op
        assert_eq!(zone_to_index(true, 1, 1), 1);
        assert_eq!(zone_to_index(true, 1, 2), 1);
        // Other lists are unaffected
        assert_eq!(zone_to_index(false, 2, 1), 1);
    }

    #[test]
    fn test_resolve_drop_across_lists() {
        let lists = board();
        let mv = resolve_drop(&lists, "a2", "b", Some(1)).unwrap().unwrap();
        assert_eq!(mv, CardMove { from: "a".into(), to: "b".into(), index: 1 });
        let next = move_card(&lists, "a2", &mv.from, &mv.to, mv.index).unwrap();
        assert_eq!(ids(&next[1]), vec!["b1", "a2", "b2"]);

        // Dropping on the list body appends
        let mv = resolve_drop(&lists, "a2", "b", None).unwrap().unwrap();
        assert_eq!(mv.index, 2);
    }

    #[test]
    fn test_resolve_drop_within_list() {
        let lists = board();
        // Gaps on either side of the card leave it in place
        assert_eq!(resolve_drop(&lists, "a2", "a", Some(1)).unwrap(), None);
        assert_eq!(resolve_drop(&lists, "a2", "a", Some(2)).unwrap(), None);
        // The last card dropped on its own list body stays put
        assert_eq!(resolve_drop(&lists, "a3", "a", None).unwrap(), None);

        let mv = resolve_drop(&lists, "a1", "a", None).unwrap().unwrap();
        assert_eq!(mv, CardMove { from: "a".into(), to: "a".into(), index: 2 });
        let mv = resolve_drop(&lists, "a3", "a", Some(0)).unwrap().unwrap();
        let next = move_card(&lists, "a3", &mv.from, &mv.to, mv.index).unwrap();
        assert_eq!(ids(&next[0]), vec!["a3", "a1", "a2"]);
    }

    #[test]
    fn test_resolve_drop_unknown_ids() {
        let lists = board();
        assert!(matches!(resolve_drop(&lists, "zz", "a", None), Err(BoardError::CardNotFound(_))));
        assert!(matches!(resolve_drop(&lists, "a1", "zz", None), Err(BoardError::ListNotFound(_))));
    }

    #[test]
    fn test_membership_ignores_card_edits() {
        let lists = board();
        let before = membership(&lists, "a").unwrap();

        let mut card = make_card("a1");
        card.title = "Edited".into();
        let edited = update_card(&lists, card).unwrap();
        let edited = move_card(&edited, "b1", "b", "a", 0).unwrap();
        assert_eq!(membership(&edited, "a").unwrap(), before);

        let transferred = transfer_owner(&lists, "a", "u2").unwrap();
        assert_ne!(membership(&transferred, "a").unwrap(), before);
        assert_eq!(membership(&lists, "zz"), None);
    }

    #[test]
    fn test_move_card_wrong_source() {
        let err = move_card(&board(), "a1", "b", "a", 0).unwrap_err();
        assert_eq!(err, BoardError::CardNotInList { card: "a1".into(), list: "b".into() });
        assert!(matches!(move_card(&board(), "a1", "a", "zzz", 0), Err(BoardError::ListNotFound(_))));
    }

    #[test]
    fn test_add_card_rejects_duplicate_id() {
        let lists = board();
        let next = add_card(&lists, "b", make_card("b3")).unwrap();
        assert_eq!(ids(&next[1]), vec!["b1", "b2", "b3"]);

        let err = add_card(&lists, "b", make_card("a1")).unwrap_err();
        assert_eq!(err, BoardError::DuplicateCard("a1".into()));
    }

    #[test]
    fn test_update_and_delete_card() {
        let lists = board();
        let mut card = make_card("b2");
        card.title = "Renamed".into();
        let next = update_card(&lists, card).unwrap();
        assert_eq!(next[1].cards[1].title, "Renamed");

        let next = delete_card(&next, "a2").unwrap();
        assert_eq!(ids(&next[0]), vec!["a1", "a3"]);
        assert!(matches!(delete_card(&next, "a2"), Err(BoardError::CardNotFound(_))));
    }

    #[test]
    fn test_duplicate_card_inserts_after_original() {
        let (next, copy_id) = duplicate_card(&board(), "a1").unwrap();
        assert_eq!(next[0].cards.len(), 4);
        assert_eq!(next[0].cards[1].id, copy_id);
        assert_eq!(next[0].cards[1].title, "Card a1 (副本)");
        assert_ne!(copy_id, "a1");
        assert!(from_lists(next).is_ok());
    }

    #[test]
    fn test_from_lists_rejects_duplicates() {
        let lists = vec![make_list("a", &["x"]), make_list("b", &["x"])];
        assert_eq!(from_lists(lists).unwrap_err(), BoardError::DuplicateCard("x".into()));
    }

    #[test]
    fn test_move_list() {
        let lists = vec![make_list("a", &[]), make_list("b", &[]), make_list("c", &[])];
        let next = move_list(&lists, "a", 2).unwrap();
        let order: Vec<_> = next.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(order, vec!["b", "c", "a"]);
    }

    #[test]
    fn test_transfer_owner_and_members() {
        let next = transfer_owner(&board(), "a", "u2").unwrap();
        assert_eq!(next[0].owner, "u2");
        assert!(next[0].members.contains(&"u2".to_string()));

        assert_eq!(remove_member(&next, "a", "u2").unwrap_err(), BoardError::OwnerRemoval("a".into()));
        let next = remove_member(&next, "a", "owner").unwrap();
        assert_eq!(next[0].members, vec!["u2".to_string()]);
    }
}
