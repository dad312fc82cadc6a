//! In-memory customer lookup.

use crate::directory::records::{seed_customers, CustomerRecord};

/// Exactly one lookup criterion, already normalized for matching.
///
/// When a request supplies more than one parameter, precedence is
/// phone > email > customerId; the first non-empty one wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupCriteria {
    /// Digits-only phone number.
    Phone(String),
    /// Lower-cased email address.
    Email(String),
    /// Exact, case-sensitive customer ID.
    CustomerId(String),
}

impl LookupCriteria {
    /// The `matchedBy` tag reported to clients.
    pub fn matched_by(&self) -> &'static str {
        match self {
            Self::Phone(_) => "phone",
            Self::Email(_) => "email",
            Self::CustomerId(_) => "customerId",
        }
    }
}

/// Strip all non-digit characters for phone comparison.
pub fn normalize_phone(phone: &str) -> String {
    phone.chars().filter(char::is_ascii_digit).collect()
}

/// The immutable in-memory set of customer records.
pub struct CustomerDirectory {
    records: Vec<CustomerRecord>,
}

impl CustomerDirectory {
    /// Load the fixture data set.
    pub fn seed() -> Self {
        Self {
            records: seed_customers(),
        }
    }

    /// Find the record matching the given criterion, if any. No partial or
    /// fuzzy matching; no side effects.
    pub fn find(&self, criteria: &LookupCriteria) -> Option<&CustomerRecord> {
        match criteria {
            LookupCriteria::Phone(digits) => self
                .records
                .iter()
                .find(|c| normalize_phone(&c.phone) == *digits),
            LookupCriteria::Email(email) => self
                .records
                .iter()
                .find(|c| c.email.to_lowercase() == *email),
            LookupCriteria::CustomerId(id) => {
                self.records.iter().find(|c| c.customer_id == *id)
            }
        }
    }

    /// Filter the full directory by exact `tier` and/or `lineOfBusiness`.
    /// All provided filters are ANDed; results keep insertion order.
    pub fn search(&self, tier: Option<&str>, line_of_business: Option<&str>) -> Vec<&CustomerRecord> {
        self.records
            .iter()
            .filter(|c| tier.map_or(true, |t| c.tier == t))
            .filter(|c| line_of_business.map_or(true, |l| c.line_of_business == l))
            .collect()
    }

    /// All records, in insertion order.
    pub fn all(&self) -> &[CustomerRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
