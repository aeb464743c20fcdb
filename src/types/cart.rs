use std::collections::HashSet;

/// Read-only snapshot of the shopper's cart, supplied by the cart source.
///
/// `collection_ids` holds the collections the cart's products belong to;
/// membership is resolved before the snapshot is built.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase", default)
)]
pub struct Cart {
    product_ids: HashSet<String>,
    collection_ids: HashSet<String>,
    total_value: f64,
}

impl Cart {
    /// Create an empty cart with a zero total.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a cart holding the given products.
    #[must_use]
    pub fn from_products<S: Into<String>>(ids: impl IntoIterator<Item = S>) -> Self {
        Self::new().with_products(ids)
    }

    #[must_use]
    pub fn with_product(mut self, id: impl Into<String>) -> Self {
        self.insert_product(id);
        self
    }

    #[must_use]
    pub fn with_products<S: Into<String>>(mut self, ids: impl IntoIterator<Item = S>) -> Self {
        self.product_ids.extend(ids.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn with_collection(mut self, id: impl Into<String>) -> Self {
        self.insert_collection(id);
        self
    }

    #[must_use]
    pub fn with_total(mut self, total_value: f64) -> Self {
        self.total_value = total_value;
        self
    }

    /// Add a product (mutable reference version).
    pub fn insert_product(&mut self, id: impl Into<String>) {
        self.product_ids.insert(id.into());
    }

    /// Add a collection (mutable reference version).
    pub fn insert_collection(&mut self, id: impl Into<String>) {
        self.collection_ids.insert(id.into());
    }

    #[must_use]
    pub fn product_ids(&self) -> &HashSet<String> {
        &self.product_ids
    }

    #[must_use]
    pub fn collection_ids(&self) -> &HashSet<String> {
        &self.collection_ids
    }

    #[must_use]
    pub fn total_value(&self) -> f64 {
        self.total_value
    }

    /// Whether `id` names a product in the cart or a collection one of its
    /// products belongs to.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.product_ids.contains(id) || self.collection_ids.contains(id)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.product_ids.is_empty()
    }
}
