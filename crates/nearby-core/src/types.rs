//! # Domain Types
//!
//! Favorite items and the collection that owns them.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌───────────────────┐   stamp addedAt   ┌───────────────────┐         │
//! │  │ FavoriteItemInput │ ────────────────► │   FavoriteItem    │         │
//! │  │  id, name,        │                   │  ...input fields  │         │
//! │  │  category, ...    │                   │  addedAt (ms)     │         │
//! │  └───────────────────┘                   └─────────┬─────────┘         │
//! │                                                    │ insert            │
//! │                                                    ▼                   │
//! │                                      ┌───────────────────────┐         │
//! │                                      │  FavoriteCollection   │         │
//! │                                      │  ordered, id-unique   │         │
//! │                                      │  oldest first         │         │
//! │                                      └───────────────────────┘         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Format
//! The collection serializes as a bare JSON array of items with camelCase
//! field names (`id`, `name`, `category`, ..., `addedAt`). Absent optional
//! fields are omitted and default to `None` when read back.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use ts_rs::TS;

// =============================================================================
// Favorite Item Input
// =============================================================================

/// What a screen hands over when the user taps the heart on a catalog
/// entry. Everything except `addedAt`, which the store assigns.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteItemInput {
    /// Stable identifier of the catalog entry.
    pub id: String,

    /// Display name (restaurant, clinic, contractor, ...).
    pub name: String,

    /// Category tag used for scoped queries ("Food", "Healthcare", ...).
    pub category: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subcategory: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Display string only ("Rs 1,500"), never used in arithmetic.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,

    /// Catalog rating, 0 to 5.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reviews: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl FavoriteItemInput {
    /// Creates an input with the three required fields.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        FavoriteItemInput {
            id: id.into(),
            name: name.into(),
            category: category.into(),
            ..Default::default()
        }
    }

    /// Sets the subcategory.
    pub fn subcategory(mut self, subcategory: impl Into<String>) -> Self {
        self.subcategory = Some(subcategory.into());
        self
    }

    /// Sets the display price string.
    pub fn price(mut self, price: impl Into<String>) -> Self {
        self.price = Some(price.into());
        self
    }

    /// Sets the rating.
    pub fn rating(mut self, rating: f64) -> Self {
        self.rating = Some(rating);
        self
    }

    /// Sets the location line.
    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Sets the phone number.
    pub fn phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }
}

// =============================================================================
// Favorite Item
// =============================================================================

/// A user's saved reference to a catalog entry.
///
/// Items are never edited in place: the only mutations are removal and
/// clear-all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteItem {
    #[serde(flatten)]
    pub entry: FavoriteItemInput,

    /// Milliseconds since the Unix epoch, set by the store.
    pub added_at: i64,
}

impl FavoriteItem {
    /// Stamps an input with its `addedAt` time.
    pub fn from_input(entry: FavoriteItemInput, added_at: i64) -> Self {
        FavoriteItem { entry, added_at }
    }

    /// Catalog id.
    #[inline]
    pub fn id(&self) -> &str {
        &self.entry.id
    }

    /// Display name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.entry.name
    }

    /// Category tag.
    #[inline]
    pub fn category(&self) -> &str {
        &self.entry.category
    }

    /// `addedAt` as a UTC timestamp. Out-of-range values map to the epoch.
    pub fn added_at_datetime(&self) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(self.added_at).unwrap_or_default()
    }
}

// =============================================================================
// Favorite Collection
// =============================================================================

/// Ordered, id-unique list of favorites, oldest first.
///
/// ## Invariants
/// - At most one item per `id`
/// - Insertion order is preserved; a removed and re-added item goes to
///   the end
///
/// Both hold after deserialization too: a blob with repeated ids loads
/// with the first occurrence kept.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct FavoriteCollection {
    items: Vec<FavoriteItem>,
}

impl<'de> Deserialize<'de> for FavoriteCollection {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Vec::<FavoriteItem>::deserialize(deserializer).map(Self::from_items)
    }
}

impl FavoriteCollection {
    /// Creates an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a collection from raw items, keeping the first occurrence of
    /// each id.
    pub fn from_items(items: impl IntoIterator<Item = FavoriteItem>) -> Self {
        let mut collection = Self::new();
        for item in items {
            collection.insert(item);
        }
        collection
    }

    /// Appends `item` unless an item with the same id is already present.
    ///
    /// ## Returns
    /// `true` if the item was inserted, `false` for a duplicate (the
    /// existing item is left untouched).
    pub fn insert(&mut self, item: FavoriteItem) -> bool {
        if self.contains(item.id()) {
            return false;
        }
        self.items.push(item);
        true
    }

    /// Removes the item with `id`, if any.
    pub fn remove(&mut self, id: &str) -> Option<FavoriteItem> {
        let index = self.items.iter().position(|i| i.id() == id)?;
        Some(self.items.remove(index))
    }

    /// Membership test.
    pub fn contains(&self, id: &str) -> bool {
        self.items.iter().any(|i| i.id() == id)
    }

    pub fn get(&self, id: &str) -> Option<&FavoriteItem> {
        self.items.iter().find(|i| i.id() == id)
    }

    /// All items tagged with `category`, in collection order.
    ///
    /// Matching is exact (case-sensitive), like the tags in catalog data.
    pub fn by_category(&self, category: &str) -> Vec<FavoriteItem> {
        self.items
            .iter()
            .filter(|i| i.category() == category)
            .cloned()
            .collect()
    }

    /// Distinct categories in first-seen order.
    pub fn categories(&self) -> Vec<String> {
        let mut seen: Vec<String> = Vec::new();
        for item in &self.items {
            if !seen.iter().any(|c| c == item.category()) {
                seen.push(item.category().to_string());
            }
        }
        seen
    }

    /// Item count per category, in first-seen order.
    pub fn count_by_category(&self) -> Vec<(String, usize)> {
        self.categories()
            .into_iter()
            .map(|c| {
                let n = self.items.iter().filter(|i| i.category() == c).count();
                (c, n)
            })
            .collect()
    }

    /// Removes every item.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Read-only view of the items.
    pub fn items(&self) -> &[FavoriteItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, category: &str, added_at: i64) -> FavoriteItem {
        FavoriteItem::from_input(
            FavoriteItemInput::new(id, format!("Place {}", id), category),
            added_at,
        )
    }

    fn ids(items: &[FavoriteItem]) -> Vec<&str> {
        items.iter().map(|i| i.id()).collect()
    }

    #[test]
    fn test_insert_rejects_duplicate_id() {
        let mut c = FavoriteCollection::new();
        assert!(c.insert(item("a", "Food", 1)));
        assert!(!c.insert(item("a", "Healthcare", 2)));

        assert_eq!(c.len(), 1);
        // The original is kept, not overwritten
        assert_eq!(c.get("a").unwrap().category(), "Food");
        assert_eq!(c.get("a").unwrap().added_at, 1);
    }

    #[test]
    fn test_order_preserved_and_readd_goes_last() {
        let mut c = FavoriteCollection::new();
        c.insert(item("a", "Food", 1));
        c.insert(item("b", "Food", 2));
        c.insert(item("c", "Food", 3));
        assert_eq!(ids(c.items()), vec!["a", "b", "c"]);

        c.remove("a");
        c.insert(item("a", "Food", 4));
        assert_eq!(ids(c.items()), vec!["b", "c", "a"]);
    }

    #[test]
    fn test_remove_absent() {
        let mut c = FavoriteCollection::new();
        c.insert(item("a", "Food", 1));
        assert!(c.remove("zzz").is_none());
        assert_eq!(c.len(), 1);
    }

    #[test]
    fn test_by_category() {
        let mut c = FavoriteCollection::new();
        c.insert(item("a", "Food", 1));
        c.insert(item("b", "Healthcare", 2));
        c.insert(item("c", "Food", 3));

        assert_eq!(ids(&c.by_category("Food")), vec!["a", "c"]);
        assert_eq!(ids(&c.by_category("Healthcare")), vec!["b"]);
        assert!(c.by_category("food").is_empty());
        assert!(c.by_category("Construction").is_empty());
    }

    #[test]
    fn test_categories_and_counts() {
        let mut c = FavoriteCollection::new();
        c.insert(item("a", "Home Services", 1));
        c.insert(item("b", "Food", 2));
        c.insert(item("c", "Home Services", 3));

        assert_eq!(c.categories(), vec!["Home Services", "Food"]);
        assert_eq!(
            c.count_by_category(),
            vec![("Home Services".to_string(), 2), ("Food".to_string(), 1)]
        );
    }

    #[test]
    fn test_from_items_dedupes() {
        let c = FavoriteCollection::from_items(vec![
            item("a", "Food", 1),
            item("b", "Food", 2),
            item("a", "Food", 3),
        ]);
        assert_eq!(ids(c.items()), vec!["a", "b"]);
        assert_eq!(c.get("a").unwrap().added_at, 1);
    }

    #[test]
    fn test_clear() {
        let mut c = FavoriteCollection::new();
        c.insert(item("a", "Food", 1));
        c.clear();
        assert!(c.is_empty());
        assert!(!c.contains("a"));
    }

    #[test]
    fn test_wire_field_names() {
        let mut input = FavoriteItemInput::new("r7", "Savour Foods", "Food")
            .subcategory("Pulao")
            .price("Rs 450")
            .rating(4.6)
            .location("Blue Area");
        input.reviews = Some(1200);

        let json = serde_json::to_value(FavoriteItem::from_input(input, 1_700_000_000_000)).unwrap();
        let obj = json.as_object().unwrap();

        for key in [
            "id",
            "name",
            "category",
            "subcategory",
            "price",
            "rating",
            "reviews",
            "location",
            "addedAt",
        ] {
            assert!(obj.contains_key(key), "missing {key}");
        }
        assert!(!obj.contains_key("phone"));
        assert!(!obj.contains_key("added_at"));
        assert_eq!(obj["addedAt"], 1_700_000_000_000_i64);
    }

    #[test]
    fn test_collection_round_trip() {
        let mut c = FavoriteCollection::new();
        c.insert(item("a", "Food", 10));
        c.insert(FavoriteItem::from_input(
            FavoriteItemInput::new("b", "Dr. Aslam", "Healthcare").phone("051-1234567"),
            20,
        ));

        let blob = serde_json::to_string(&c).unwrap();
        assert!(blob.starts_with('['));

        let back: FavoriteCollection = serde_json::from_str(&blob).unwrap();
        assert_eq!(back, c);
    }

    #[test]
    fn test_deserialize_drops_repeated_ids() {
        let blob = r#"[
            {"id":"a","name":"A","category":"Food","addedAt":1},
            {"id":"a","name":"A again","category":"Food","addedAt":2}
        ]"#;
        let c: FavoriteCollection = serde_json::from_str(blob).unwrap();
        assert_eq!(c.len(), 1);
        assert_eq!(c.get("a").unwrap().name(), "A");
    }

    #[test]
    fn test_reads_minimal_record() {
        let blob = r#"[{"id":"a","name":"A","category":"Food","addedAt":5}]"#;
        let c: FavoriteCollection = serde_json::from_str(blob).unwrap();
        assert_eq!(c.len(), 1);
        assert!(c.get("a").unwrap().entry.image.is_none());
    }

    #[test]
    fn test_added_at_datetime() {
        let i = item("a", "Food", 1_700_000_000_000);
        assert_eq!(i.added_at_datetime().timestamp(), 1_700_000_000);
    }
}
