use std::collections::BTreeSet;

use derive_more::Display;
use serde::{Deserialize, Serialize};

use super::Contact;

const ALL: &str = "all";

/// Tri-state filter over a boolean contact flag.
///
/// Parsed from `"all" | "true" | "false"`; anything else behaves as `all`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FlagFilter {
    #[default]
    #[display(fmt = "all")]
    All,
    #[display(fmt = "true")]
    Yes,
    #[display(fmt = "false")]
    No,
}

impl FlagFilter {
    pub fn matches(self, flag: bool) -> bool {
        match self {
            Self::All => true,
            Self::Yes => flag,
            Self::No => !flag,
        }
    }
}

impl From<String> for FlagFilter {
    fn from(value: String) -> Self {
        match value.as_str() {
            "true" => Self::Yes,
            "false" => Self::No,
            _ => Self::All,
        }
    }
}

impl From<FlagFilter> for String {
    fn from(value: FlagFilter) -> Self {
        value.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CountryFilter {
    #[default]
    All,
    Only(String),
}

impl CountryFilter {
    pub fn matches(&self, country: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(expected) => expected == country,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::All => ALL,
            Self::Only(country) => country,
        }
    }
}

impl From<String> for CountryFilter {
    fn from(value: String) -> Self {
        if value.is_empty() || value == ALL {
            Self::All
        } else {
            Self::Only(value)
        }
    }
}

impl From<CountryFilter> for String {
    fn from(value: CountryFilter) -> Self {
        match value {
            CountryFilter::All => ALL.to_owned(),
            CountryFilter::Only(country) => country,
        }
    }
}

/// The four criteria of the contacts table, combined with AND.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactFilter {
    pub search: String,
    pub country: CountryFilter,
    pub subscribed: FlagFilter,
    pub active: FlagFilter,
}

impl ContactFilter {
    /// Keeps the contacts passing the filter, in their original order.
    pub fn apply<'a>(&self, contacts: &'a [Contact]) -> Vec<&'a Contact> {
        let needle = self.search.to_lowercase();
        contacts
            .iter()
            .filter(|contact| self.matches_lowercased(&needle, contact))
            .collect()
    }

    fn matches_lowercased(&self, needle: &str, contact: &Contact) -> bool {
        let matches_search = contact.first_name.to_lowercase().contains(needle)
            || contact.last_name.to_lowercase().contains(needle)
            || contact.email.to_lowercase().contains(needle);

        matches_search
            && self.country.matches(&contact.country)
            && self.subscribed.matches(contact.subscribed_newsletters)
            && self.active.matches(contact.is_active)
    }
}

/// Distinct countries of the whole contact list, sorted.
pub fn unique_countries(contacts: &[Contact]) -> Vec<String> {
    contacts
        .iter()
        .map(|contact| contact.country.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
