use serde::Deserialize;

/// Fields posted by the composer and the contacts filter bar.
///
/// Absent fields leave the stored value untouched.
#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct ComposerForm {
    pub subject: Option<String>,
    pub message_body: Option<String>,
    pub search: Option<String>,
    pub country: Option<String>,
    pub subscribed: Option<String>,
    pub active: Option<String>,
    pub return_to: Option<String>,
}

impl ComposerForm {
    pub fn has_filter(&self) -> bool {
        self.search.is_some()
            || self.country.is_some()
            || self.subscribed.is_some()
            || self.active.is_some()
    }

    /// Where to go after a filter change. Only dashboard pages are accepted.
    pub fn return_path(&self) -> &'static str {
        match self.return_to.as_deref() {
            Some(super::CONTACTS) => super::CONTACTS,
            _ => super::COMPOSER,
        }
    }
}
