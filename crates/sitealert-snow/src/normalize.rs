//! Site code normalization.
//!
//! Monitoring site codes carry descriptive suffixes (`_DSL_Remote`, `-FGT`,
//! `-CO-RTR`, ...) that Service Now does not know about. This module reduces
//! a raw code to the canonical form stored in `hns_u_site_code`.

/// Substrings removed from the truncated code, applied in this order.
///
/// `_SEC` and `_DOPPLER` can no longer occur after truncation at the first
/// underscore; they are kept so the removal list mirrors the naming
/// convention.
const NOISE_SUFFIXES: [&str; 9] = [
    "-FGT", "-ADS", "-1", "-CO-RTR", "-CO-SWT", "-DO-RTR", "-DO-SWT", "_SEC", "_DOPPLER",
];

/// Marks the device family whose codes carry a stray `D`.
const SHPL_FAMILY: &str = "SHPL";

/// Reduces a raw site code to the canonical Service Now site code.
///
/// 1. Keep only the part before the first `_`.
/// 2. For `SHPL` codes, drop every `D` character. This is deliberately
///    blunt: a `D` that is part of the real code is removed too.
/// 3. Remove each of [`NOISE_SUFFIXES`] wherever it appears.
///
/// No case folding or validation is done; an empty result is returned as-is.
#[must_use]
pub fn normalize_site_code(code: &str) -> String {
    let truncated = code.split('_').next().unwrap_or_default();

    let mut canonical = if truncated.contains(SHPL_FAMILY) {
        truncated.replace('D', "")
    } else {
        truncated.to_owned()
    };

    for noise in NOISE_SUFFIXES {
        canonical = canonical.replace(noise, "");
    }

    canonical
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
