//! Mapping between the opaque `data` token and the action labels shown to users.

/// Labels offered by action pickers, in display order.
pub const AVAILABLE_ACTIONS: [&str; 2] = ["Turn On", "Turn Off"];

/// Human label for an event's data token. Unknown tokens are shown verbatim.
pub fn action_text(data: &str) -> String {
    match data.to_ascii_lowercase().as_str() {
        "true" => "Turn On".to_string(),
        "false" => "Turn Off".to_string(),
        _ => data.to_string(),
    }
}

/// Data token for an action label. Unknown labels pass through as custom tokens.
pub fn data_for_action(text: &str) -> String {
    match text {
        "Turn On" => "true".to_string(),
        "Turn Off" => "false".to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boolean_tokens_map_to_labels() {
        assert_eq!(action_text("true"), "Turn On");
        assert_eq!(action_text("FALSE"), "Turn Off");
        assert_eq!(action_text("zone-2"), "zone-2");
    }

    #[test]
    fn labels_map_back_to_tokens() {
        for label in AVAILABLE_ACTIONS {
            assert_eq!(action_text(&data_for_action(label)), label);
        }
        assert_eq!(data_for_action("dim:40"), "dim:40");
    }
}
