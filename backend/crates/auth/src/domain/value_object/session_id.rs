use kernel::id::Id;

pub struct SessionMarker;
pub type SessionId = Id<SessionMarker>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_id_new() {
        let session_id = SessionId::new();
        assert_eq!(session_id.as_uuid().get_version_num(), 4); // UUIDv4
    }

    #[test]
    fn test_parse_roundtrip() {
        let session_id = SessionId::new();
        let parsed = SessionId::parse_str(&session_id.to_string()).unwrap();
        assert_eq!(parsed, session_id);
    }
}
