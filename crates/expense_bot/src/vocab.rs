//! Category and store suggestions: built-in defaults merged with what
//! the user has already recorded. No dictionary tables.

use std::collections::BTreeSet;

use expense_storage::{LedgerStore, StorageResult};

pub const DEFAULT_CATEGORIES: [&str; 5] = ["Еда", "Транспорт", "Кафе", "Аптека", "Развлечения"];
pub const DEFAULT_STORES: [&str; 5] = ["Пятёрочка", "Магнит", "Дикси", "Лента", "Ozon"];

pub async fn user_categories(
    store: &dyn LedgerStore,
    user_id: i64,
) -> StorageResult<Vec<String>> {
    let used = store.categories(user_id).await?;
    Ok(merge_with_defaults(&DEFAULT_CATEGORIES, used))
}

pub async fn user_stores(store: &dyn LedgerStore, user_id: i64) -> StorageResult<Vec<String>> {
    let used = store.stores(user_id).await?;
    Ok(merge_with_defaults(&DEFAULT_STORES, used))
}

/// Union of defaults and history, trimmed, sorted case-insensitively.
fn merge_with_defaults(defaults: &[&str], used: Vec<String>) -> Vec<String> {
    // Set union first: history rows arrive in whatever order SQLite's
    // NOCASE grouping left ASCII case-variants in, so adjacent-only
    // dedup after the sort is not enough.
    let merged: BTreeSet<String> = defaults
        .iter()
        .map(|name| name.trim().to_string())
        .chain(used.into_iter().map(|name| name.trim().to_string()))
        .collect();
    let mut merged: Vec<String> = merged.into_iter().collect();
    merged.sort_by_key(|name| name.to_lowercase());
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_come_back_sorted_when_history_is_empty() {
        let merged = merge_with_defaults(&DEFAULT_CATEGORIES, vec![]);
        assert_eq!(merged.len(), 5);
        assert_eq!(merged[0], "Аптека");
        assert_eq!(merged.last().unwrap(), "Транспорт");
    }

    #[test]
    fn history_extends_defaults_without_duplicates() {
        let merged = merge_with_defaults(
            &DEFAULT_CATEGORIES,
            vec!["Еда".into(), " Книги ".into()],
        );
        assert_eq!(merged.len(), 6);
        assert!(merged.contains(&"Книги".to_string()));
        assert_eq!(merged.iter().filter(|name| *name == "Еда").count(), 1);
    }

    #[test]
    fn case_variants_are_kept_but_sorted_together() {
        let merged = merge_with_defaults(&["Ozon"], vec!["ozon".into()]);
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn duplicates_split_by_a_case_variant_still_collapse() {
        // History order may interleave case-variants between two copies
        // of the same name; the union must still hold each name once.
        let merged = merge_with_defaults(&["Ozon"], vec!["OZON".into(), "Ozon".into()]);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged.iter().filter(|name| *name == "Ozon").count(), 1);
        assert_eq!(merged.iter().filter(|name| *name == "OZON").count(), 1);
    }
}
