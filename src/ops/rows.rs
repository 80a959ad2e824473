use serde::Serialize;

use crate::model::collection::Collection;

/// One displayed item, as every front-end sees it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Row {
    /// Full id, carried by the toggle and remove triggers
    pub id: String,
    pub short_id: String,
    /// Toggle control state: checked iff done
    pub checked: bool,
    pub label: String,
    /// Label is drawn struck through iff done
    pub struck: bool,
}

/// Project the collection into display rows, in collection order.
///
/// Pure: the same collection always yields the same rows, and nothing from a
/// previous projection carries over.
pub fn project(collection: &Collection) -> Vec<Row> {
    collection
        .iter()
        .map(|item| {
            let done = item.status.is_done();
            Row {
                id: item.id.clone(),
                short_id: item.short_id().to_string(),
                checked: done,
                label: item.title.clone(),
                struck: done,
            }
        })
        .collect()
}
