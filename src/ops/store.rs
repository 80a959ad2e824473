//! Collection transitions. Every operation takes the current collection by
//! reference and returns the next one; callers swap the value in whole.

use uuid::Uuid;

use crate::model::collection::Collection;
use crate::model::item::{Item, ItemStatus};

/// A fresh item id: 32 lowercase hex characters
pub fn new_id() -> String {
    Uuid::new_v4().simple().to_string()
}

/// Current time in milliseconds since the Unix epoch
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Build an open item with a fresh id stamped now. The title is taken as-is.
pub fn new_item(title: &str) -> Item {
    Item::new(new_id(), title.to_string(), now_millis())
}

/// Prepend a new item built from `title`. Does not validate the title.
pub fn add(collection: &Collection, title: &str) -> Collection {
    add_item(collection, new_item(title))
}

/// Prepend `item`.
pub fn add_item(collection: &Collection, item: Item) -> Collection {
    let mut items = Vec::with_capacity(collection.len() + 1);
    items.push(item);
    items.extend(collection.iter().cloned());
    Collection::from_items(items)
}

/// Set the status of the item with `id`. Unknown ids leave the collection unchanged.
pub fn set_status(collection: &Collection, id: &str, done: bool) -> Collection {
    let status = ItemStatus::from_done(done);
    let items = collection
        .iter()
        .map(|it| {
            if it.id == id {
                Item {
                    status,
                    ..it.clone()
                }
            } else {
                it.clone()
            }
        })
        .collect();
    Collection::from_items(items)
}

/// Drop the item with `id`. Unknown ids leave the collection unchanged.
pub fn remove(collection: &Collection, id: &str) -> Collection {
    let items = collection
        .iter()
        .filter(|it| it.id != id)
        .cloned()
        .collect();
    Collection::from_items(items)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, title: &str, created_at: i64) -> Item {
        Item::new(id.to_string(), title.to_string(), created_at)
    }

    fn sample() -> Collection {
        let mut b = item("b", "Second", 2);
        b.status = ItemStatus::Done;
        Collection::from_items(vec![item("c", "Third", 3), b, item("a", "First", 1)])
    }

    #[test]
    fn add_prepends_open_item() {
        let c = add(&Collection::new(), "Buy milk");
        assert_eq!(c.len(), 1);
        let it = &c.items()[0];
        assert_eq!(it.title, "Buy milk");
        assert_eq!(it.status, ItemStatus::Open);
        assert_eq!(it.id.len(), 32);
        assert!(it.created_at > 0);
    }

    #[test]
    fn add_orders_newest_first() {
        let c = add(&Collection::new(), "A");
        let c = add(&c, "B");
        let titles: Vec<&str> = c.iter().map(|it| it.title.as_str()).collect();
        assert_eq!(titles, vec!["B", "A"]);
    }

    #[test]
    fn add_leaves_input_untouched() {
        let before = sample();
        let after = add(&before, "New");
        assert_eq!(before, sample());
        assert_eq!(after.len(), before.len() + 1);
        assert_eq!(&after.items()[1..], before.items());
    }

    #[test]
    fn fresh_ids_are_distinct() {
        let mut c = Collection::new();
        for i in 0..200 {
            c = add(&c, &format!("item {}", i));
        }
        let mut ids: Vec<&str> = c.iter().map(|it| it.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 200);
    }

    #[test]
    fn set_status_changes_only_target() {
        let c = set_status(&sample(), "a", true);
        assert_eq!(c.get("a").unwrap().status, ItemStatus::Done);
        assert_eq!(c.get("b").unwrap().status, ItemStatus::Done);
        assert_eq!(c.get("c").unwrap().status, ItemStatus::Open);
        assert_eq!(c.get("a").unwrap().title, "First");
        assert_eq!(c.get("a").unwrap().created_at, 1);
    }

    #[test]
    fn set_status_round_trip_restores_collection() {
        let original = sample();
        for it in original.iter() {
            let was_done = it.status.is_done();
            let flipped = set_status(&original, &it.id, !was_done);
            let restored = set_status(&flipped, &it.id, was_done);
            assert_eq!(restored, original);
        }

        // done then open on an open item
        let done = set_status(&original, "a", true);
        assert_eq!(set_status(&done, "a", false), original);
    }

    #[test]
    fn set_status_keeps_order() {
        let c = set_status(&sample(), "c", true);
        let ids: Vec<&str> = c.iter().map(|it| it.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "b", "a"]);
    }

    #[test]
    fn set_status_unknown_id_is_noop() {
        assert_eq!(set_status(&sample(), "zzz", true), sample());
    }

    #[test]
    fn remove_drops_target() {
        let c = remove(&sample(), "b");
        let ids: Vec<&str> = c.iter().map(|it| it.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "a"]);
    }

    #[test]
    fn remove_unknown_id_is_noop() {
        assert_eq!(remove(&sample(), "zzz"), sample());
        assert_eq!(remove(&Collection::new(), "zzz"), Collection::new());
    }
}
