//! Unique ids so tests sharing a database never collide.

use ulid::Ulid;

/// `{prefix}-{ulid}`
///
/// ```
/// use backend_test_support::unique_helpers::unique_str;
///
/// let a = unique_str("member");
/// let b = unique_str("member");
/// assert_ne!(a, b);
/// assert!(a.starts_with("member-"));
/// ```
pub fn unique_str(prefix: &str) -> String {
    format!("{}-{}", prefix, Ulid::new())
}

/// Member id plus a display name that sorts after `name_prefix`.
pub fn unique_member(name_prefix: &str) -> (String, String) {
    let id = unique_str("member");
    let name = format!("{name_prefix} {}", &id[id.len() - 6..]);
    (id, name)
}
