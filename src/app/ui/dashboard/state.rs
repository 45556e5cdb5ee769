use anyhow::Context;
use tower_sessions::Session;

use super::schema::ComposerForm;
use crate::domain::{
    contact::{ContactFilter, Selection},
    newsletter::Draft,
};

const DRAFT: &str = "composer.draft";
const FILTER: &str = "composer.filter";
const SELECTION: &str = "composer.selection";

/// Composer state of one dashboard session.
#[derive(Debug, Default)]
pub struct ComposerState {
    pub draft: Draft,
    pub filter: ContactFilter,
    pub selection: Selection,
}

impl ComposerState {
    pub async fn load(session: &Session) -> anyhow::Result<Self> {
        let draft = session
            .get(DRAFT)
            .await
            .context("Failed to read the draft from the session.")?;
        let filter = session
            .get(FILTER)
            .await
            .context("Failed to read the contact filter from the session.")?;
        let selection = session
            .get(SELECTION)
            .await
            .context("Failed to read the selection from the session.")?;

        Ok(Self {
            draft: draft.unwrap_or_default(),
            filter: filter.unwrap_or_default(),
            selection: selection.unwrap_or_default(),
        })
    }

    pub async fn save(&self, session: &Session) -> anyhow::Result<()> {
        session
            .insert(DRAFT, &self.draft)
            .await
            .context("Failed to store the draft in the session.")?;
        session
            .insert(FILTER, &self.filter)
            .await
            .context("Failed to store the contact filter in the session.")?;
        session
            .insert(SELECTION, &self.selection)
            .await
            .context("Failed to store the selection in the session.")?;
        Ok(())
    }

    /// Merges posted form fields into the stored state.
    pub fn absorb(&mut self, form: ComposerForm) {
        if form.has_filter() {
            self.filter = ContactFilter {
                search: form.search.unwrap_or_default(),
                country: form.country.unwrap_or_default().into(),
                subscribed: form.subscribed.unwrap_or_default().into(),
                active: form.active.unwrap_or_default().into(),
            };
        }
        if let Some(subject) = form.subject {
            self.draft.subject = subject;
        }
        if let Some(message_body) = form.message_body {
            self.draft.message_body = message_body;
        }
    }
}
