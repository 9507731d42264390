//! # MQTT Topic Trie
//!
//! A prefix tree over `/`-delimited MQTT topic segments that maps topic
//! filters to values and finds every filter matching a concrete topic.
//!
//! ## Features
//!
//! - **Wildcard Matching**: `+` matches one level, `#` matches the rest of the
//!   topic, including zero levels
//! - **`$` Topics**: wildcards never match the first level of `$SYS/...` style
//!   topics
//! - **Lazy Search**: matches are produced one at a time from an explicit
//!   stack, so [`TopicMatcher::has_match`] stops at the first hit
//! - **Subscription Routing**: [`TopicRouter`] keeps many subscriptions per
//!   filter and resolves the subscribers of a topic
//! - **Optional Validation**: the trie accepts any string; [`validation`]
//!   checks MQTT topic and filter rules for callers that want them
//!
//! ## Quick Start
//!
//! ```rust
//! use mqtt_topic_trie::TopicMatcher;
//!
//! let mut matcher = TopicMatcher::new();
//! matcher.insert("sport/tennis/player1", "exact");
//! matcher.insert("sport/#", "everything sport");
//! matcher.insert("sport/+/player1", "player1 anywhere");
//!
//! assert_eq!(matcher.matches("sport/tennis/player1").count(), 3);
//!
//! let football: Vec<_> = matcher.matches("sport/football").collect();
//! assert_eq!(football, [("sport/#", &"everything sport")]);
//!
//! // Wildcards skip the reserved `$` space
//! matcher.insert("#", "all");
//! assert!(!matcher.has_match("$SYS/stats"));
//! ```
//!
//! ## Routing
//!
//! ```rust
//! use mqtt_topic_trie::TopicRouter;
//!
//! let mut router = TopicRouter::new();
//! let (first, id) = router.add_subscription("sensors/+/temperature", "logger")?;
//! assert!(first);
//!
//! let subscribers = router.subscribers("sensors/kitchen/temperature");
//! assert_eq!(subscribers, [(id, &"logger")]);
//!
//! let (filter_empty, filter, _) = router.unsubscribe(&id)?;
//! assert!(filter_empty);
//! assert_eq!(filter.as_str(), "sensors/+/temperature");
//! # Ok::<(), mqtt_topic_trie::TopicRouterError>(())
//! ```
//!
//! ## Concurrency
//!
//! Neither type locks internally. Share them behind a `RwLock`, with
//! `find`/`matches` as readers and `insert`/`remove`/`prune` as writers.

#![warn(missing_docs)]

pub mod topic;

// === Core Public API ===
pub use topic::{FilterLookup, Matches, TopicMatcher, TopicPath};
// Routing
pub use topic::{RouterSettings, SubscriptionId, TopicRouter};
// Errors
pub use topic::{TopicError, TopicRouterError, TopicValidationError};
pub use topic::validation;

/// Prelude module for convenient imports
///
/// ```rust
/// use mqtt_topic_trie::prelude::*;
/// ```
pub mod prelude {
	pub use crate::{
		FilterLookup, RouterSettings, SubscriptionId, TopicError,
		TopicMatcher, TopicPath, TopicRouter,
	};
}

/// Error types used throughout the library
///
/// ```rust
/// use mqtt_topic_trie::errors::*;
/// ```
pub mod errors {
	pub use crate::topic::{
		RouterResult, TopicError, TopicResult, TopicRouterError,
		TopicValidationError, ValidationResult,
	};
}
