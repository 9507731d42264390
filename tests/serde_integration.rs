//! Serialization of matchers and router settings (`serde` feature)
#![cfg(feature = "serde")]

use mqtt_topic_trie::{RouterSettings, TopicMatcher};
use serde_json::json;

#[test]
fn test_matcher_serializes_as_map() {
	let matcher: TopicMatcher<u32> =
		[("sport/#", 1), ("sport/+/player1", 2), ("", 3)]
			.into_iter()
			.collect();

	let value = serde_json::to_value(&matcher).unwrap();
	assert_eq!(
		value,
		json!({ "sport/#": 1, "sport/+/player1": 2, "": 3 })
	);
}

#[test]
fn test_matcher_deserializes_from_map() {
	let matcher: TopicMatcher<String> = serde_json::from_str(
		r#"{ "data/#": "all", "data/+/engine": "engines" }"#,
	)
	.unwrap();

	assert_eq!(matcher.len(), 2);
	assert_eq!(matcher.find("data/#").map(String::as_str), Some("all"));
	assert_eq!(matcher.matches("data/oil/engine").count(), 2);
}

#[test]
fn test_router_settings_defaults_missing_fields() {
	let settings: RouterSettings =
		serde_json::from_str(r#"{ "validate_filters": false }"#).unwrap();

	assert!(!settings.validate_filters);
	assert!(settings.prune_on_unsubscribe);
}
