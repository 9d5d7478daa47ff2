//! Constant-time byte comparison.

use subtle::ConstantTimeEq;

/// Compares two byte slices in constant time.
///
/// Returns `false` immediately when the lengths differ; digest lengths
/// are fixed by the protocol and not secret. For equal lengths the
/// comparison cost is independent of where the first mismatch occurs,
/// so verification leaks nothing about the stored value.
///
/// # Examples
///
/// ```rust
/// use jukestack_auth::compare::timing_safe_compare;
///
/// assert!(timing_safe_compare(b"digest", b"digest"));
/// assert!(!timing_safe_compare(b"digest", b"digesu"));
/// assert!(!timing_safe_compare(b"digest", b"short"));
/// ```
pub fn timing_safe_compare(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}
