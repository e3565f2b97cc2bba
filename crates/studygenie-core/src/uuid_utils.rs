//! UUID helpers.
//!
//! Records use UUIDv7 identifiers, which embed a millisecond timestamp and
//! therefore sort in creation order. Clients address records by the string
//! form of the id.

use uuid::Uuid;

/// Generate a new UUIDv7 identifier.
///
/// # Example
///
/// ```
/// use studygenie_core::uuid_utils::new_v7;
///
/// let a = new_v7();
/// let b = new_v7();
/// assert!(b >= a);
/// ```
#[inline]
pub fn new_v7() -> Uuid {
    Uuid::now_v7()
}

/// Parse a client-supplied identifier.
///
/// Returns `None` for anything that is not a UUID, so callers can treat a
/// malformed id the same as an unknown one.
pub fn parse_id(raw: &str) -> Option<Uuid> {
    Uuid::parse_str(raw.trim()).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_v7_is_version_7() {
        assert_eq!(new_v7().get_version_num(), 7);
    }

    #[test]
    fn test_new_v7_is_monotonic() {
        let ids: Vec<Uuid> = (0..50).map(|_| new_v7()).collect();
        let mut sorted = ids.clone();
        sorted.sort();
        assert_eq!(ids, sorted);
    }

    #[test]
    fn test_parse_id_accepts_uuid() {
        let id = new_v7();
        assert_eq!(parse_id(&id.to_string()), Some(id));
        assert_eq!(parse_id(&format!("  {}  ", id)), Some(id));
    }

    #[test]
    fn test_parse_id_rejects_garbage() {
        assert_eq!(parse_id("does-not-exist"), None);
        assert_eq!(parse_id(""), None);
        assert_eq!(parse_id("invalid-id"), None);
    }
}
