pub mod stdin;
pub mod ws;

use yomu_types::PointerEvent;

/// Parses one pointer event message. Malformed messages are logged and
/// skipped.
pub fn parse_pointer_event(text: &str) -> Option<PointerEvent> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    match serde_json::from_str(text) {
        Ok(event) => Some(event),
        Err(e) => {
            tracing::warn!("Ignoring malformed pointer event: {}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pointer_event() {
        let event = parse_pointer_event(r#" {"sentence":"食べられない","offset":2,"x":10.5} "#).unwrap();

        assert_eq!(event.sentence, "食べられない");
        assert_eq!(event.offset, 2);
        assert_eq!(event.x, Some(10.5));
        assert_eq!(event.y, None);
    }

    #[test]
    fn test_malformed_events_are_skipped() {
        assert_eq!(parse_pointer_event(""), None);
        assert_eq!(parse_pointer_event("食べる"), None);
        assert_eq!(parse_pointer_event(r#"{"sentence":"a"}"#), None);
    }

    #[test]
    fn test_negative_offset_parses() {
        let event = parse_pointer_event(r#"{"sentence":"a","offset":-1}"#).unwrap();

        assert_eq!(event.offset, -1);
    }
}
