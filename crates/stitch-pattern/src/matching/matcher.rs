//! Nearest-thread search.

use std::collections::HashSet;

use crate::catalog::{Thread, ThreadCatalog};
use crate::color::{rgb_to_lab, Rgb};

use super::delta_e::{delta_e, MatchQuality};
use super::error::MatchError;

/// Distance multiplier applied to threads found in the caller's inventory.
pub const INVENTORY_DISCOUNT: f64 = 0.8;

/// Identifiers of threads the caller already owns.
pub type Inventory = HashSet<String>;

/// The outcome of a nearest-thread search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchResult<'a> {
    /// The chosen catalog thread
    pub thread: &'a Thread,
    /// Delta E to the target, after the inventory discount
    pub distance: f64,
    /// Quality bucket of `distance`
    pub quality: MatchQuality,
    /// Whether the thread is in the caller's inventory
    pub from_inventory: bool,
}

/// Find the catalog thread perceptually closest to `target`.
///
/// With `brand` set, only that brand's threads are candidates. Threads listed
/// in `inventory` have their distance multiplied by [`INVENTORY_DISCOUNT`].
/// Ties go to the thread that appears first in the catalog.
///
/// # Errors
///
/// [`MatchError::NoCandidateThread`] when no thread survives the brand filter.
///
/// # Example
///
/// ```
/// use stitch_pattern::{find_closest_thread, Rgb, Thread, ThreadCatalog};
///
/// let catalog = ThreadCatalog::new(vec![
///     Thread::new("dmc_310", "DMC", "310", "Black", Rgb::new(0, 0, 0)),
///     Thread::new("dmc_blanc", "DMC", "BLANC", "White", Rgb::new(255, 255, 255)),
/// ])
/// .unwrap();
///
/// let result = find_closest_thread(Rgb::new(240, 240, 240), &catalog, Some("DMC"), None).unwrap();
/// assert_eq!(result.thread.code(), "BLANC");
/// ```
pub fn find_closest_thread<'a>(
    target: Rgb,
    catalog: &'a ThreadCatalog,
    brand: Option<&str>,
    inventory: Option<&Inventory>,
) -> Result<MatchResult<'a>, MatchError> {
    let target_lab = rgb_to_lab(target);

    let mut best: Option<MatchResult<'a>> = None;
    for thread in catalog.threads() {
        if brand.is_some_and(|b| thread.brand() != b) {
            continue;
        }

        let from_inventory = inventory.is_some_and(|inv| inv.contains(thread.id()));
        let mut distance = delta_e(target_lab, thread.lab());
        if from_inventory {
            distance *= INVENTORY_DISCOUNT;
        }

        if best.map_or(true, |b| distance < b.distance) {
            best = Some(MatchResult {
                thread,
                distance,
                quality: MatchQuality::from_distance(distance),
                from_inventory,
            });
        }
    }

    best.ok_or_else(|| MatchError::NoCandidateThread {
        brand: brand.map(str::to_string),
    })
}

/// Find the `to_brand` equivalent of a `from_brand` thread.
///
/// Returns `Ok(None)` when `(from_brand, code)` is not in the catalog.
///
/// # Errors
///
/// [`MatchError::NoCandidateThread`] when `to_brand` has no threads.
pub fn convert_brand<'a>(
    code: &str,
    from_brand: &str,
    to_brand: &str,
    catalog: &'a ThreadCatalog,
) -> Result<Option<&'a Thread>, MatchError> {
    let Some(source) = catalog.find_code(from_brand, code) else {
        tracing::debug!(code, from_brand, "Source thread not in catalog");
        return Ok(None);
    };

    let result = find_closest_thread(source.rgb(), catalog, Some(to_brand), None)?;
    tracing::debug!(
        code,
        from_brand,
        to_brand,
        target = result.thread.code(),
        delta_e = result.distance,
        "Converted thread"
    );
    Ok(Some(result.thread))
}
