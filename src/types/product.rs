use std::fmt;

/// A catalog product referenced by a rule, as selected in the admin.
///
/// Only `id` takes part in evaluation. `title` and `price` are carried for
/// validation messages and the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "ProductRepr")
)]
pub struct ProductRef {
    pub id: String,
    pub title: String,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub price: Option<String>,
}

impl ProductRef {
    #[must_use]
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            price: None,
        }
    }

    /// Attach a raw price as entered by the merchant; checked by validation.
    #[must_use]
    pub fn with_price(mut self, price: impl Into<String>) -> Self {
        self.price = Some(price.into());
        self
    }

    /// The title, or the id when the title is blank.
    #[must_use]
    pub fn display_name(&self) -> &str {
        if self.title.trim().is_empty() {
            &self.id
        } else {
            &self.title
        }
    }
}

/// A bare id doubles as the title.
impl From<&str> for ProductRef {
    fn from(id: &str) -> Self {
        Self::new(id, id)
    }
}

impl From<String> for ProductRef {
    fn from(id: String) -> Self {
        Self {
            title: id.clone(),
            id,
            price: None,
        }
    }
}

impl fmt::Display for ProductRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.price {
            Some(price) => write!(f, "{} [{}] @ {}", self.display_name(), self.id, price),
            None => write!(f, "{} [{}]", self.display_name(), self.id),
        }
    }
}

/// Stored rules hold either bare product ids or full product objects whose
/// price may be a JSON number or string.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
#[serde(untagged)]
enum ProductRepr {
    Id(String),
    Full {
        #[serde(default)]
        id: String,
        #[serde(default)]
        title: String,
        #[serde(default)]
        price: Option<PriceRepr>,
    },
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
#[serde(untagged)]
enum PriceRepr {
    Number(f64),
    Text(String),
}

#[cfg(feature = "serde")]
impl From<ProductRepr> for ProductRef {
    fn from(repr: ProductRepr) -> Self {
        match repr {
            ProductRepr::Id(id) => ProductRef::from(id),
            ProductRepr::Full { id, title, price } => ProductRef {
                id,
                title,
                price: price.map(|p| match p {
                    PriceRepr::Number(n) => n.to_string(),
                    PriceRepr::Text(s) => s,
                }),
            },
        }
    }
}
