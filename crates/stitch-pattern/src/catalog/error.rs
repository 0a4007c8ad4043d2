//! Error type for catalog construction.

/// The supplied records cannot form a consistent catalog.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    /// Two records share the same identifier
    #[error("duplicate thread id: {0}")]
    DuplicateId(String),
    /// Two records share the same brand and code
    #[error("duplicate thread code {code} for brand {brand}")]
    DuplicateCode {
        /// Brand name
        brand: String,
        /// Brand-specific code
        code: String,
    },
}
