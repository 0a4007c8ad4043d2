//! Matching error types.

/// Errors from nearest-thread search.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MatchError {
    /// The catalog (after brand filtering) holds no threads.
    #[error("{}", no_candidate_message(.brand))]
    NoCandidateThread {
        /// Brand filter in effect, if any
        brand: Option<String>,
    },
}

fn no_candidate_message(brand: &Option<String>) -> String {
    match brand {
        Some(brand) => format!("no threads available for brand {brand}"),
        None => "thread catalog is empty".to_string(),
    }
}
