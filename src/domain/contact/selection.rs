use serde::{Deserialize, Serialize};

/// Contact ids picked as recipients, in the order they were picked.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Selection(Vec<i64>);

impl Selection {
    pub fn contains(&self, id: i64) -> bool {
        self.0.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn ids(&self) -> &[i64] {
        &self.0
    }

    pub fn toggle(&mut self, id: i64) {
        if self.contains(id) {
            self.0.retain(|selected| *selected != id);
        } else {
            self.0.push(id);
        }
    }

    /// Clears the selection when its size equals the filtered set's size,
    /// otherwise selects exactly the filtered ids.
    pub fn toggle_all(&mut self, filtered_ids: &[i64]) {
        if self.0.len() == filtered_ids.len() {
            self.0.clear();
        } else {
            self.0 = filtered_ids.to_vec();
        }
    }

    /// State of the "select all" checkbox.
    pub fn all_selected(&self, filtered_len: usize) -> bool {
        filtered_len > 0 && self.0.len() == filtered_len
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }
}

impl From<Vec<i64>> for Selection {
    fn from(ids: Vec<i64>) -> Self {
        Self(ids)
    }
}
