//! The cart's line-item list and its invariants.

use mdi_core::{CourseDate, CourseId, LineItem, LineItemError, LineKey, NewLineItem};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize, Serializer};

/// Ordered list of line items.
///
/// Invariants:
/// - no two entries share a `(id, date)` pair
/// - every quantity is at least 1
///
/// Insertion order is kept for display. Deserialized data is normalised to
/// the invariants: duplicates are merged into the first occurrence and
/// quantities below 1 are raised to 1.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "Vec<LineItem>")]
pub struct CartState {
    items: Vec<LineItem>,
}

impl CartState {
    /// Build a state from raw items, enforcing the invariants.
    #[must_use]
    pub fn from_items(raw: Vec<LineItem>) -> Self {
        let mut items: Vec<LineItem> = Vec::with_capacity(raw.len());
        for mut item in raw {
            item.quantity = item.quantity.max(1);
            match items.iter_mut().find(|i| i.matches(&item.id, &item.date)) {
                Some(existing) => {
                    existing.quantity = existing.quantity.saturating_add(item.quantity);
                }
                None => items.push(item),
            }
        }
        Self { items }
    }

    /// Add one seat of a course session.
    ///
    /// An existing `(id, date)` entry has its quantity incremented; otherwise
    /// a new entry with quantity 1 is appended. Returns the entry's quantity
    /// after the change.
    ///
    /// # Errors
    ///
    /// Returns a [`LineItemError`] if the item fails its preconditions or
    /// the cart total would no longer fit in a `Decimal`; the state is left
    /// untouched.
    pub fn add(&mut self, item: NewLineItem) -> Result<u32, LineItemError> {
        item.validate()?;

        if let Some(index) = self.position(&item.id, &item.date) {
            let quantity = self
                .items
                .get(index)
                .map_or(1, |existing| existing.quantity.saturating_add(1));
            return self.try_set_quantity(index, quantity);
        }

        self.items.push(item.into_line_item());
        if self.checked_total().is_none() {
            self.items.pop();
            return Err(LineItemError::TotalOverflow);
        }
        Ok(1)
    }

    /// Drop the entry for `(id, date)`. Returns whether anything was removed.
    pub fn remove(&mut self, id: &CourseId, date: &CourseDate) -> bool {
        let before = self.items.len();
        self.items.retain(|item| !item.matches(id, date));
        self.items.len() != before
    }

    /// Set the quantity of `(id, date)` to `max(1, quantity)`.
    ///
    /// Returns the stored quantity, or `None` when no entry matched.
    ///
    /// # Errors
    ///
    /// Returns [`LineItemError::TotalOverflow`] if the new quantity would
    /// make the cart total unrepresentable; the state is left untouched.
    pub fn set_quantity(
        &mut self,
        id: &CourseId,
        date: &CourseDate,
        quantity: i64,
    ) -> Result<Option<u32>, LineItemError> {
        let Some(index) = self.position(id, date) else {
            return Ok(None);
        };
        let quantity = u32::try_from(quantity.max(1)).unwrap_or(u32::MAX);
        self.try_set_quantity(index, quantity).map(Some)
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Σ price × quantity.
    ///
    /// Carts built through [`add`](Self::add) and
    /// [`set_quantity`](Self::set_quantity) always have a representable
    /// total; a stored cart that does not saturates at the `Decimal` range.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.items
            .iter()
            .fold(Decimal::ZERO, |total, item| {
                total.saturating_add(item.line_total())
            })
    }

    /// Σ price × quantity, or `None` if it does not fit in a `Decimal`.
    #[must_use]
    pub fn checked_total(&self) -> Option<Decimal> {
        self.items.iter().try_fold(Decimal::ZERO, |total, item| {
            total.checked_add(item.checked_line_total()?)
        })
    }

    /// Σ quantity, saturating at `u32::MAX`.
    #[must_use]
    pub fn count(&self) -> u32 {
        self.items
            .iter()
            .fold(0u32, |count, item| count.saturating_add(item.quantity))
    }

    /// Entries in insertion order.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Look up an entry by its identity key.
    #[must_use]
    pub fn get(&self, key: &LineKey) -> Option<&LineItem> {
        self.items
            .iter()
            .find(|item| item.matches(&key.id, &key.date))
    }

    /// Number of distinct entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn position(&self, id: &CourseId, date: &CourseDate) -> Option<usize> {
        self.items.iter().position(|item| item.matches(id, date))
    }

    fn try_set_quantity(&mut self, index: usize, quantity: u32) -> Result<u32, LineItemError> {
        let Some(item) = self.items.get_mut(index) else {
            return Ok(quantity);
        };
        let previous = std::mem::replace(&mut item.quantity, quantity);

        if self.checked_total().is_none() {
            if let Some(item) = self.items.get_mut(index) {
                item.quantity = previous;
            }
            return Err(LineItemError::TotalOverflow);
        }
        Ok(quantity)
    }
}

impl From<Vec<LineItem>> for CartState {
    fn from(items: Vec<LineItem>) -> Self {
        Self::from_items(items)
    }
}

impl Serialize for CartState {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.items.serialize(serializer)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn item(id: &str, price: i64, date: &str) -> NewLineItem {
        NewLineItem::new(id, format!("Course {id}"), Decimal::from(price), date, "Base Camp")
    }

    fn key(id: &str, date: &str) -> LineKey {
        LineKey::new(id, date)
    }

    #[test]
    fn test_add_same_session_twice_merges() {
        let mut state = CartState::default();
        assert_eq!(state.add(item("C1", 99, "2024-01-01")).unwrap(), 1);
        assert_eq!(state.add(item("C1", 99, "2024-01-01")).unwrap(), 2);

        assert_eq!(state.len(), 1);
        assert_eq!(state.get(&key("C1", "2024-01-01")).unwrap().quantity, 2);
    }

    #[test]
    fn test_same_course_different_dates_coexist() {
        let mut state = CartState::default();
        state.add(item("A", 10, "2024-01-01")).unwrap();
        state.add(item("A", 10, "2024-02-01")).unwrap();
        assert_eq!(state.len(), 2);
    }

    #[test]
    fn test_add_keeps_insertion_order() {
        let mut state = CartState::default();
        state.add(item("B", 1, "d")).unwrap();
        state.add(item("A", 1, "d")).unwrap();
        state.add(item("B", 1, "d")).unwrap();

        let ids: Vec<&str> = state.items().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, ["B", "A"]);
    }

    #[test]
    fn test_add_invalid_leaves_state_untouched() {
        let mut state = CartState::default();
        let err = state.add(item("", 10, "2024-01-01")).unwrap_err();
        assert_eq!(err, LineItemError::EmptyId);
        assert!(state.is_empty());
    }

    #[test]
    fn test_remove_is_precise() {
        let mut state = CartState::default();
        state.add(item("A", 10, "2024-01-01")).unwrap();
        state.add(item("A", 20, "2024-02-01")).unwrap();

        assert!(state.remove(&CourseId::new("A"), &CourseDate::new("2024-01-01")));

        assert_eq!(state.len(), 1);
        assert!(state.get(&key("A", "2024-02-01")).is_some());
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let mut state = CartState::default();
        state.add(item("A", 10, "2024-01-01")).unwrap();
        assert!(!state.remove(&CourseId::new("Z"), &CourseDate::new("2024-01-01")));
        assert_eq!(state.len(), 1);
    }

    #[test]
    fn test_set_quantity_clamps_to_one() {
        let mut state = CartState::default();
        state.add(item("A", 10, "d")).unwrap();
        let (id, date) = (CourseId::new("A"), CourseDate::new("d"));

        assert_eq!(state.set_quantity(&id, &date, 0), Ok(Some(1)));
        assert_eq!(state.set_quantity(&id, &date, -5), Ok(Some(1)));
        assert_eq!(state.set_quantity(&id, &date, 4), Ok(Some(4)));
        assert_eq!(state.set_quantity(&id, &date, i64::MAX), Ok(Some(u32::MAX)));
    }

    #[test]
    fn test_set_quantity_missing_entry() {
        let mut state = CartState::default();
        assert_eq!(
            state.set_quantity(&CourseId::new("A"), &CourseDate::new("d"), 3),
            Ok(None)
        );
    }

    #[test]
    fn test_aggregates() {
        let mut state = CartState::default();
        state
            .add(NewLineItem::new("A", "A", Decimal::new(1999, 2), "d", "x"))
            .unwrap();
        state.add(item("B", 100, "d")).unwrap();
        state
            .set_quantity(&CourseId::new("A"), &CourseDate::new("d"), 3)
            .unwrap();

        assert_eq!(state.total(), Decimal::new(15997, 2));
        assert_eq!(state.count(), 4);
    }

    #[test]
    fn test_update_that_overflows_total_is_rejected() {
        let mut state = CartState::default();
        let huge = Decimal::from(10u64.pow(19)) * Decimal::from(10);
        state
            .add(NewLineItem::new("C1", "Expedition", huge, "d", "x"))
            .unwrap();
        let (id, date) = (CourseId::new("C1"), CourseDate::new("d"));

        assert_eq!(
            state.set_quantity(&id, &date, 1_000_000_000),
            Err(LineItemError::TotalOverflow)
        );
        assert_eq!(state.get(&key("C1", "d")).unwrap().quantity, 1);
        assert_eq!(state.total(), huge);
        assert_eq!(state.set_quantity(&id, &date, 2), Ok(Some(2)));
    }

    #[test]
    fn test_add_that_overflows_total_is_rejected() {
        let mut state = CartState::default();
        state
            .add(NewLineItem::new("A", "A", Decimal::MAX, "d", "x"))
            .unwrap();

        let err = state.add(item("B", 1, "d")).unwrap_err();
        assert_eq!(err, LineItemError::TotalOverflow);
        assert_eq!(state.len(), 1);

        let err = state
            .add(NewLineItem::new("A", "A", Decimal::MAX, "d", "x"))
            .unwrap_err();
        assert_eq!(err, LineItemError::TotalOverflow);
        assert_eq!(state.count(), 1);
    }

    #[test]
    fn test_stored_cart_out_of_range_saturates() {
        let raw = r#"[
            {"id":"A","name":"A","price":1e20,"date":"d","location":"x","quantity":1000000000}
        ]"#;
        let state: CartState = serde_json::from_str(raw).unwrap();
        assert_eq!(state.checked_total(), None);
        assert_eq!(state.total(), Decimal::MAX);
    }

    #[test]
    fn test_empty_aggregates() {
        let state = CartState::default();
        assert_eq!(state.total(), Decimal::ZERO);
        assert_eq!(state.count(), 0);
    }

    #[test]
    fn test_deserialize_normalises_invariants() {
        let raw = r#"[
            {"id":"A","name":"A","price":10,"date":"d","location":"x","quantity":0},
            {"id":"B","name":"B","price":5,"date":"d","location":"x","quantity":1},
            {"id":"A","name":"A","price":10,"date":"d","location":"x","quantity":2}
        ]"#;
        let state: CartState = serde_json::from_str(raw).unwrap();

        assert_eq!(state.len(), 2);
        assert_eq!(state.items()[0].id.as_str(), "A");
        assert_eq!(state.items()[0].quantity, 3);
        assert_eq!(state.count(), 4);
    }

    #[test]
    fn test_serializes_as_plain_list() {
        let mut state = CartState::default();
        state.add(item("C1", 99, "2024-01-01")).unwrap();
        let json = serde_json::to_string(&state).unwrap();
        assert!(json.starts_with('['));
        assert!(json.contains("\"quantity\":1"));
    }

    #[derive(Debug, Clone)]
    enum Op {
        Add(u8, u8, u16),
        Remove(u8, u8),
        Update(u8, u8, i64),
        Clear,
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            6 => (0u8..4, 0u8..3, 0u16..500).prop_map(|(i, d, p)| Op::Add(i, d, p)),
            2 => (0u8..4, 0u8..3).prop_map(|(i, d)| Op::Remove(i, d)),
            3 => (0u8..4, 0u8..3, -10i64..10).prop_map(|(i, d, q)| Op::Update(i, d, q)),
            1 => Just(Op::Clear),
        ]
    }

    proptest! {
        #[test]
        fn prop_aggregates_match_entries(ops in proptest::collection::vec(op(), 0..60)) {
            let mut state = CartState::default();
            for op in ops {
                match op {
                    Op::Add(i, d, p) => {
                        state
                            .add(item(&format!("C{i}"), i64::from(p), &format!("2024-0{}-01", d + 1)))
                            .unwrap();
                    }
                    Op::Remove(i, d) => {
                        state.remove(
                            &CourseId::new(format!("C{i}")),
                            &CourseDate::new(format!("2024-0{}-01", d + 1)),
                        );
                    }
                    Op::Update(i, d, q) => {
                        state
                            .set_quantity(
                                &CourseId::new(format!("C{i}")),
                                &CourseDate::new(format!("2024-0{}-01", d + 1)),
                                q,
                            )
                            .unwrap();
                    }
                    Op::Clear => state.clear(),
                }
            }

            let expected_total: Decimal = state
                .items()
                .iter()
                .map(|i| i.price * Decimal::from(i.quantity))
                .sum();
            let expected_count: u32 = state.items().iter().map(|i| i.quantity).sum();
            prop_assert_eq!(state.total(), expected_total);
            prop_assert_eq!(state.count(), expected_count);

            let mut keys: Vec<LineKey> = state.items().iter().map(LineItem::key).collect();
            let len = keys.len();
            keys.sort();
            keys.dedup();
            prop_assert_eq!(keys.len(), len);
            prop_assert!(state.items().iter().all(|i| i.quantity >= 1));
        }
    }
}
