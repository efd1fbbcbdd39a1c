//! Symbol localization: finder patterns, candidate grouping, dark-region
//! boxes and grid sampling.

pub mod finder;
pub mod grouping;
pub mod region;
pub mod sampler;

pub use finder::{FinderPattern, FinderTolerance};
pub use grouping::OrderedTriple;
pub use region::BoundingBox;

/// A located symbol candidate with enough geometry to build a sampling
/// transform. Candidates are independent and disposable; a failed sample
/// simply moves on to the next.
#[derive(Debug, Clone)]
pub enum LocatorCandidate {
    /// A QR finder triple
    QrTriple(OrderedTriple),
    /// A dark-region bounding box with estimated pitch, for the bordered
    /// symbologies
    Region {
        bbox: BoundingBox,
        module_size: usize,
        inverted: bool,
    },
}

/// Locate dark-region candidates in a binary bitmap, in both polarities.
/// An empty result means no locator geometry was found; retry policy is
/// the orchestrator's concern.
pub fn locate_regions(binary: &crate::models::BitMatrix) -> Vec<LocatorCandidate> {
    let mut candidates = Vec::with_capacity(2);
    for inverted in [false, true] {
        let view;
        let bitmap = if inverted {
            view = binary.invert();
            &view
        } else {
            binary
        };
        let Some(bbox) = region::find_bounding_box(bitmap) else {
            continue;
        };
        let Some(module_size) = region::estimate_module_size(bitmap, &bbox) else {
            continue;
        };
        candidates.push(LocatorCandidate::Region {
            bbox,
            module_size,
            inverted,
        });
    }
    candidates
}
