use serde::{Deserialize, Serialize};

use super::DispatchRequest;
use crate::domain::contact::Selection;

/// Subject and body typed in the composer, kept until a send succeeds.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Draft {
    pub subject: String,
    pub message_body: String,
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ComposerError {
    #[error("Please enter a subject for your newsletter")]
    SubjectRequired,
    #[error("Please enter a message body for your newsletter")]
    MessageRequired,
    #[error("Please select at least one contact to send the newsletter to")]
    NoRecipients,
}

impl ComposerError {
    pub fn title(&self) -> &'static str {
        match self {
            Self::SubjectRequired => "Subject required",
            Self::MessageRequired => "Message required",
            Self::NoRecipients => "No recipients selected",
        }
    }
}

impl Draft {
    /// Checks the draft the way the form does before anything is sent.
    ///
    /// The draft is submitted untrimmed once it passes.
    pub fn to_request(&self, selection: &Selection) -> Result<DispatchRequest, ComposerError> {
        if self.subject.trim().is_empty() {
            return Err(ComposerError::SubjectRequired);
        }
        if self.message_body.trim().is_empty() {
            return Err(ComposerError::MessageRequired);
        }
        if selection.is_empty() {
            return Err(ComposerError::NoRecipients);
        }

        Ok(DispatchRequest {
            subject: Some(self.subject.clone()),
            message_body: Some(self.message_body.clone()),
            contact_ids: Some(selection.ids().to_vec()),
        })
    }
}
