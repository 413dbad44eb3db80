// src/services/inventory_service.rs

use std::collections::HashMap;

use crate::models::inventory::Inventory;

/// Latest row per resource. `rows` is expected newest first, so on equal
/// timestamps the row listed first wins.
pub fn current_levels(rows: Vec<Inventory>) -> Vec<Inventory> {
    let mut latest: HashMap<String, Inventory> = HashMap::new();

    for row in rows {
        let keep_existing = latest
            .get(&row.resource_id)
            .is_some_and(|existing| existing.updated_at >= row.updated_at);
        if !keep_existing {
            latest.insert(row.resource_id.clone(), row);
        }
    }

    let mut levels: Vec<Inventory> = latest.into_values().collect();
    levels.sort_by(|a, b| {
        b.updated_at
            .cmp(&a.updated_at)
            .then_with(|| a.resource_id.cmp(&b.resource_id))
    });
    levels
}
