use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Name of the category that marks credit-card payments unless configured otherwise.
pub const DEFAULT_CREDIT_CARD_CATEGORY: &str = "Credit Card";

/// Categorises bills for grouping and reporting.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl Category {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            color: None,
        }
    }
}

/// Whether an obligation pays down a credit card. Fixed when the obligation
/// is built, never re-derived from names afterwards.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum CategoryKind {
    CreditCardPayment,
    #[default]
    Regular,
}

/// Category metadata copied onto obligations and occurrences.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategoryTag {
    pub id: Uuid,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl From<&Category> for CategoryTag {
    fn from(category: &Category) -> Self {
        Self {
            id: category.id,
            name: category.name.clone(),
            color: category.color.clone(),
        }
    }
}

/// Lookup helper over a borrowed category list.
#[derive(Debug, Clone, Copy)]
pub struct CategoryIndex<'a> {
    categories: &'a [Category],
    credit_card_name: &'a str,
}

impl<'a> CategoryIndex<'a> {
    pub fn new(categories: &'a [Category]) -> Self {
        Self::with_credit_card_name(categories, DEFAULT_CREDIT_CARD_CATEGORY)
    }

    pub fn with_credit_card_name(categories: &'a [Category], credit_card_name: &'a str) -> Self {
        Self {
            categories,
            credit_card_name,
        }
    }

    pub fn get(&self, id: Uuid) -> Option<&'a Category> {
        self.categories.iter().find(|category| category.id == id)
    }

    /// The category synthetic card payments are filed under, if the user has one.
    pub fn credit_card(&self) -> Option<&'a Category> {
        self.categories
            .iter()
            .find(|category| category.name == self.credit_card_name)
    }

    pub fn kind_of(&self, category: &Category) -> CategoryKind {
        if category.name == self.credit_card_name {
            CategoryKind::CreditCardPayment
        } else {
            CategoryKind::Regular
        }
    }

    /// Resolves an optional category id; unknown ids resolve to `None`.
    pub fn resolve(&self, id: Option<Uuid>) -> Option<(CategoryTag, CategoryKind)> {
        let category = self.get(id?)?;
        Some((CategoryTag::from(category), self.kind_of(category)))
    }
}
