use crate::{
    iter::InOrder,
    node::{remove_recurse, Node, RemoveResult},
    record::CustomerRecord,
    Error, Result,
};

/// A key-ordered index of [`CustomerRecord`] instances.
///
/// Records are keyed by phone number and held in a height-balanced binary
/// search tree, giving O(log n) [`insert()`], [`get()`] and [`remove()`]
/// while [`iter()`] yields records in ascending phone-number order.
///
/// Phone numbers compare lexicographically, not numerically.
///
/// [`insert()`]: Self::insert
/// [`get()`]: Self::get
/// [`remove()`]: Self::remove
/// [`iter()`]: Self::iter
#[derive(Debug, Default, Clone)]
pub struct CustomerIndex(Option<Box<Node>>);

impl CustomerIndex {
    /// Insert `record` into the index.
    ///
    /// A record whose phone number is already present is rejected with
    /// [`Error::DuplicateKey`], leaving the index unchanged.
    pub fn insert(&mut self, record: CustomerRecord) -> Result<()> {
        match self.0 {
            Some(ref mut v) => v
                .insert(record)
                .map_err(|rejected| Error::DuplicateKey(rejected.phone_number().to_string())),
            None => {
                self.0 = Some(Box::new(Node::new(record)));
                Ok(())
            }
        }
    }

    /// Look up the record keyed by `phone_number`, if any.
    pub fn get(&self, phone_number: &str) -> Option<&CustomerRecord> {
        self.0.as_ref().and_then(|v| v.get(phone_number))
    }

    /// Look up the record keyed by `phone_number` for mutation.
    ///
    /// The ordering key is not mutable through a [`CustomerRecord`]
    /// reference, so the returned borrow can never invalidate the index.
    pub fn get_mut(&mut self, phone_number: &str) -> Option<&mut CustomerRecord> {
        self.0.as_mut().and_then(|v| v.get_mut(phone_number))
    }

    /// Returns true if a record keyed by `phone_number` exists.
    pub fn contains(&self, phone_number: &str) -> bool {
        self.get(phone_number).is_some()
    }

    /// Overwrite the non-key fields of the record keyed by `phone_number`,
    /// re-deriving its bill from the new usage values.
    ///
    /// The key never changes, so no rebalancing or repositioning occurs.
    /// Returns [`Error::NotFound`] if no such record exists.
    pub fn update(
        &mut self,
        phone_number: &str,
        name: impl Into<String>,
        address: impl Into<String>,
        call_duration_minutes: f64,
        data_usage_mb: f64,
    ) -> Result<()> {
        self.get_mut(phone_number)
            .ok_or_else(|| Error::NotFound(phone_number.to_string()))?
            .update(name, address, call_duration_minutes, data_usage_mb)
    }

    /// Apply a payment against the bill of the record keyed by
    /// `phone_number`, returning the remaining balance.
    ///
    /// Returns [`Error::NotFound`] if no such record exists, and
    /// [`Error::PaymentExceedsBill`] if `amount` is negative or larger than
    /// the outstanding balance.
    pub fn pay(&mut self, phone_number: &str, amount: f64) -> Result<f64> {
        self.get_mut(phone_number)
            .ok_or_else(|| Error::NotFound(phone_number.to_string()))?
            .pay(amount)
    }

    /// Remove and return the record keyed by `phone_number`.
    ///
    /// Returns [`None`], without mutating the index, if no such record
    /// exists.
    pub fn remove(&mut self, phone_number: &str) -> Option<CustomerRecord> {
        match remove_recurse(&mut self.0, phone_number)? {
            RemoveResult::Removed(v) => Some(v),
            RemoveResult::ParentUnlink => unreachable!(),
        }
    }

    /// Enumerate all records in ascending phone-number order.
    ///
    /// The iterator is lazy and restartable - each call traverses the index
    /// anew.
    pub fn iter(&self) -> impl Iterator<Item = &CustomerRecord> {
        self.0
            .iter()
            .flat_map(|v| InOrder::new(v))
            .map(|v| v.record())
    }

    /// The number of records in the index.
    ///
    /// This is a counted traversal, costing O(n).
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Returns true if the index holds no records.
    pub fn is_empty(&self) -> bool {
        self.0.is_none()
    }

    pub(crate) fn root(&self) -> Option<&Node> {
        self.0.as_deref()
    }
}
