use crate::model::error::{ModelError, ModelResult};
use crate::model::types::{Element, ModelWarning};
use crate::model::ModelSnapshot;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A document exported by the host as JSON.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocumentSnapshot {
    pub title: String,
    #[serde(default)]
    pub elements: Vec<Element>,
    #[serde(default)]
    pub warnings: Vec<ModelWarning>,
    #[serde(skip)]
    closed: bool,
}

impl DocumentSnapshot {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn with_elements(mut self, elements: impl IntoIterator<Item = Element>) -> Self {
        self.elements.extend(elements);
        self
    }

    pub fn with_warnings(mut self, warnings: impl IntoIterator<Item = ModelWarning>) -> Self {
        self.warnings.extend(warnings);
        self
    }

    pub fn from_json(json: &str) -> ModelResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> ModelResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Invalidate the handle, as the host does when the document is closed.
    pub fn close(&mut self) {
        self.closed = true;
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    fn ensure_open(&self) -> ModelResult<()> {
        if self.closed {
            return Err(ModelError::Unavailable(format!(
                "document '{}' is closed",
                self.title
            )));
        }
        Ok(())
    }
}

impl ModelSnapshot for DocumentSnapshot {
    fn title(&self) -> &str {
        &self.title
    }

    fn elements(&self) -> ModelResult<&[Element]> {
        self.ensure_open()?;
        Ok(&self.elements)
    }

    fn warnings(&self) -> ModelResult<&[ModelWarning]> {
        self.ensure_open()?;
        Ok(&self.warnings)
    }
}
