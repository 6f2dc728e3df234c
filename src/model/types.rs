use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(pub u64);

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Instance-vs-type discriminator as reported by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ElementKind {
    /// Type or category metadata, never counted as a model element.
    ElementType,
    /// Placed element that is not an occurrence of a family.
    Instance,
    /// Placed occurrence of a named family.
    FamilyInstance { family: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Element {
    pub id: ElementId,
    #[serde(default)]
    pub category: Option<String>,
    pub kind: ElementKind,
}

impl Element {
    pub fn element_type(id: u64) -> Self {
        Self {
            id: ElementId(id),
            category: None,
            kind: ElementKind::ElementType,
        }
    }

    pub fn instance(id: u64) -> Self {
        Self {
            id: ElementId(id),
            category: None,
            kind: ElementKind::Instance,
        }
    }

    pub fn family_instance(id: u64, family: impl Into<String>) -> Self {
        Self {
            id: ElementId(id),
            category: None,
            kind: ElementKind::FamilyInstance {
                family: family.into(),
            },
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn is_instance(&self) -> bool {
        !matches!(self.kind, ElementKind::ElementType)
    }

    pub fn family_name(&self) -> Option<&str> {
        match &self.kind {
            ElementKind::FamilyInstance { family } => Some(family),
            _ => None,
        }
    }
}

/// A validation or consistency issue recorded by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelWarning {
    pub description: String,
    #[serde(default)]
    pub failing_elements: Vec<ElementId>,
}

impl ModelWarning {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            failing_elements: Vec::new(),
        }
    }

    pub fn with_elements(mut self, ids: impl IntoIterator<Item = u64>) -> Self {
        self.failing_elements = ids.into_iter().map(ElementId).collect();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instance_discriminator() {
        assert!(!Element::element_type(1).is_instance());
        assert!(Element::instance(2).is_instance());
        assert!(Element::family_instance(3, "Door").is_instance());
    }

    #[test]
    fn test_family_name_only_for_family_instances() {
        assert_eq!(Element::family_instance(1, "Door").family_name(), Some("Door"));
        assert_eq!(Element::instance(2).family_name(), None);
        assert_eq!(Element::element_type(3).family_name(), None);
    }

    #[test]
    fn test_element_kind_wire_format() {
        let json = r#"{"id":7,"category":"Doors","kind":{"type":"family_instance","family":"Door"}}"#;
        let element: Element = serde_json::from_str(json).unwrap();

        assert_eq!(element.id, ElementId(7));
        assert_eq!(element.category.as_deref(), Some("Doors"));
        assert_eq!(element.family_name(), Some("Door"));
    }
}
