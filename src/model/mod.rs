//! Host-neutral view of a CAD document.
//!
//! The host owns the document; this crate only reads it through
//! [`ModelSnapshot`]. A host adapter maps its own element classes onto
//! [`ElementKind`].

mod error;
mod snapshot;
mod types;

pub use error::{ModelError, ModelResult};
pub use snapshot::DocumentSnapshot;
pub use types::{Element, ElementId, ElementKind, ModelWarning};

/// Read-only access to the elements and warnings of the current document.
pub trait ModelSnapshot {
    /// Document title, used for logging only.
    fn title(&self) -> &str;

    /// All elements in the document, types and instances alike.
    fn elements(&self) -> ModelResult<&[Element]>;

    /// Warnings the host currently has recorded against the document.
    fn warnings(&self) -> ModelResult<&[ModelWarning]>;
}
