use tracing::trace;

use crate::driver::driver::{Driver, ElementId};

/// Separator between attribute values in a fingerprint.
pub const FINGERPRINT_SEPARATOR: &str = " | ";

/// Attributes read for a fingerprint, in priority order. `text` is the
/// element's rendered text rather than a named attribute.
pub const FINGERPRINT_ATTRIBUTES: [&str; 5] = ["name", "label", "value", "placeholder", "text"];

/// Build the textual fingerprint of an element.
///
/// Every attribute that can be read and holds non-blank text contributes its
/// trimmed value; repeats are dropped keeping the first occurrence. A failed
/// read is treated as absence. Returns an empty string when nothing is found.
pub fn fingerprint<D: Driver + ?Sized>(driver: &mut D, element: &ElementId) -> String {
    let values = FINGERPRINT_ATTRIBUTES.iter().map(|attr| {
        let read = if *attr == "text" {
            driver.text(element)
        } else {
            driver.attribute(element, attr)
        };
        match read {
            Ok(value) => value,
            Err(e) => {
                trace!(element = %element, attribute = *attr, error = %e, "attribute unreadable");
                None
            }
        }
    });
    join_unique(values.collect::<Vec<_>>())
}

/// Trim, drop blanks and repeats, and join with the fingerprint separator.
pub fn join_unique<I>(values: I) -> String
where
    I: IntoIterator<Item = Option<String>>,
{
    let mut seen: Vec<String> = Vec::new();
    for value in values.into_iter().flatten() {
        let trimmed = value.trim();
        if trimmed.is_empty() || seen.iter().any(|s| s == trimmed) {
            continue;
        }
        seen.push(trimmed.to_string());
    }
    seen.join(FINGERPRINT_SEPARATOR)
}
