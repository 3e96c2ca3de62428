use yatube_store::RecordId;

use crate::error::{ApiError, ApiResult};

/// Parse a record ID taken from the path
///
/// Path IDs that are not positive integers never match a route target, so
/// they answer 404 rather than 400.
pub fn parse_id(kind: &str, raw: &str) -> ApiResult<RecordId> {
    raw.parse::<RecordId>()
        .map_err(|_| ApiError::NotFound(format!("{} '{}' not found", kind, raw)))
}

/// Path of a profile page
pub fn profile_path(username: &str) -> String {
    format!("/{}/", username)
}

/// Path of a post page
pub fn post_path(username: &str, post_id: RecordId) -> String {
    format!("/{}/{}/", username, post_id)
}

/// Path of a mailbox page
pub fn messages_path(username: &str) -> String {
    format!("/{}/messages/", username)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("Post", "42").unwrap(), RecordId::from_raw(42));
        assert!(matches!(parse_id("Post", "0"), Err(ApiError::NotFound(_))));
        assert!(matches!(parse_id("Post", "abc"), Err(ApiError::NotFound(_))));
    }

    #[test]
    fn test_paths() {
        assert_eq!(profile_path("leo"), "/leo/");
        assert_eq!(post_path("leo", RecordId::from_raw(7)), "/leo/7/");
        assert_eq!(messages_path("leo"), "/leo/messages/");
    }
}
