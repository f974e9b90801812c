//! Touch device discovery
//!
//! Devices are picked by name: a dedicated ADS7846 controller is
//! preferred, anything advertising itself as a touch device is the
//! fallback. Matching ignores ASCII case.

use super::TouchError;

/// Preferred controller name fragment
pub const PREFERRED: &str = "ads7846";
/// Fallback name fragment
pub const FALLBACK: &str = "touch";

/// Index of the device to open among `names`
pub fn select_device<S: AsRef<str>>(names: &[S]) -> Result<usize, TouchError> {
    let find = |needle: &str| {
        names
            .iter()
            .position(|name| contains_ignore_case(name.as_ref(), needle))
    };
    find(PREFERRED)
        .or_else(|| find(FALLBACK))
        .ok_or(TouchError::DeviceNotFound)
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    let (hay, needle) = (haystack.as_bytes(), needle.as_bytes());
    if needle.is_empty() {
        return true;
    }
    hay.windows(needle.len())
        .any(|w| w.eq_ignore_ascii_case(needle))
}
