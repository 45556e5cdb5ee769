use anyhow::Context;
use serde::{Deserialize, Serialize};
use tower_sessions::Session;

const FLASH: &str = "flash";

/// One-shot toast shown on the next rendered page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Flash {
    pub title: String,
    pub description: String,
    pub destructive: bool,
}

impl Flash {
    pub fn success(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            destructive: false,
        }
    }

    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            destructive: true,
        }
    }

    pub async fn push(self, session: &Session) -> anyhow::Result<()> {
        session
            .insert(FLASH, self)
            .await
            .context("Failed to store the flash message.")
    }

    pub async fn take(session: &Session) -> anyhow::Result<Option<Self>> {
        session
            .remove(FLASH)
            .await
            .context("Failed to read the flash message.")
    }
}
