//! Topic handling module
//!
//! This module provides components for working with MQTT topics and topic
//! filters: segmentation, the filter trie with wildcard-aware matching, and a
//! subscription router built on top of it.

// Submodules
pub mod error;
pub mod filter_segment;
pub mod topic_matcher;
pub mod topic_matcher_iter;
#[cfg(feature = "serde")]
mod topic_matcher_serde;
pub mod topic_path;
pub mod topic_router;


// Re-export commonly used types for convenience
pub use error::{
	RouterResult, TopicError, TopicResult, TopicValidationError,
	ValidationResult,
};
// Re-export constants and validation utilities
pub use error::{limits, validation};
pub use filter_segment::{
	FilterSegment, MULTI_LEVEL_WILDCARD, SINGLE_LEVEL_WILDCARD,
};
pub use topic_matcher::{FilterLookup, TopicMatcher};
pub use topic_matcher_iter::{IntoIter, Iter, IterMut, Matches};
pub use topic_path::{TopicPath, split_segments};
pub use topic_router::{
	RouterSettings, SubscriptionId, TopicRouter, TopicRouterError,
};
