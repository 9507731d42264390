//! Error types and utilities for the topic module
//!
//! The matcher itself never fails: every string is a legal filter and every
//! lookup ends in a value or a plain "not found". The errors here belong to the
//! optional validation helpers and to the subscription router, and are
//! aggregated into [`TopicError`] for callers that want a single type.

use thiserror::Error;

use super::topic_router::TopicRouterError;

/// Reasons a topic or topic filter is not valid MQTT
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TopicValidationError {
	/// Topics and filters must be at least one character long
	#[error("Topic cannot be empty")]
	EmptyTopic,

	/// Encoded length exceeds what an MQTT packet can carry
	#[error("Topic is too long: {length} > {max} bytes")]
	TooLong { length: usize, max: usize },

	/// U+0000 is forbidden anywhere in a topic
	#[error("Topic contains a null character")]
	NullCharacter,

	/// Concrete topics (as published) cannot contain wildcards
	#[error("Topic '{topic}' contains wildcard characters")]
	WildcardInTopic { topic: String },

	/// `+` or `#` used inside a segment instead of occupying all of it
	#[error("Invalid wildcard usage in segment '{segment}'")]
	InvalidWildcard { segment: String },

	/// `#` anywhere except the final segment
	#[error("Invalid topic filter '{filter}': # wildcard can only be the last segment")]
	HashNotLast { filter: String },
}

impl TopicValidationError {
	/// Creates a new TooLong error
	pub fn too_long(length: usize) -> Self {
		Self::TooLong {
			length,
			max: limits::MAX_TOPIC_LENGTH,
		}
	}

	/// Creates a new WildcardInTopic error
	pub fn wildcard_in_topic(topic: impl Into<String>) -> Self {
		Self::WildcardInTopic {
			topic: topic.into(),
		}
	}

	/// Creates a new InvalidWildcard error
	pub fn invalid_wildcard(segment: impl Into<String>) -> Self {
		Self::InvalidWildcard {
			segment: segment.into(),
		}
	}

	/// Creates a new HashNotLast error
	pub fn hash_not_last(filter: impl Into<String>) -> Self {
		Self::HashNotLast {
			filter: filter.into(),
		}
	}
}

/// Comprehensive error type for all topic-related operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TopicError {
	/// Topic or filter validation error
	#[error("Topic validation error: {0}")]
	Validation(#[from] TopicValidationError),

	/// Topic routing operation error
	#[error("Topic router error: {0}")]
	Router(#[from] TopicRouterError),
}

/// Convenient Result type for topic operations
pub type TopicResult<T> = Result<T, TopicError>;

/// Convenient Result type for validation operations
pub type ValidationResult<T> = Result<T, TopicValidationError>;

/// Convenient Result type for router operations
pub type RouterResult<T> = Result<T, TopicRouterError>;

/// Topic processing limits and constants
pub mod limits {
	/// Maximum encoded topic length, bounded by the two-byte MQTT string
	/// length prefix
	pub const MAX_TOPIC_LENGTH: usize = 65_535;
}

/// Validation utilities for topics and topic filters
///
/// [`TopicMatcher`](crate::topic::TopicMatcher) accepts any string. Callers
/// that only want to store and match well-formed MQTT run these checks first.
pub mod validation {
	use super::super::filter_segment::FilterSegment;
	use super::super::topic_path::split_segments;
	use super::TopicValidationError;
	use super::limits::MAX_TOPIC_LENGTH;

	fn validate_common(path: &str) -> Result<(), TopicValidationError> {
		if path.is_empty() {
			return Err(TopicValidationError::EmptyTopic);
		}
		if path.len() > MAX_TOPIC_LENGTH {
			return Err(TopicValidationError::too_long(path.len()));
		}
		if path.contains('\0') {
			return Err(TopicValidationError::NullCharacter);
		}
		Ok(())
	}

	/// Validates a concrete topic, as used for publishing and matching.
	pub fn validate_topic(topic: &str) -> Result<(), TopicValidationError> {
		validate_common(topic)?;
		if topic.contains(['+', '#']) {
			return Err(TopicValidationError::wildcard_in_topic(topic));
		}
		Ok(())
	}

	/// Validates a topic filter, as used for subscribing.
	pub fn validate_filter(filter: &str) -> Result<(), TopicValidationError> {
		validate_common(filter)?;

		let mut segments = split_segments(filter).peekable();
		while let Some(segment) = segments.next() {
			let item = FilterSegment::try_from(segment)?;
			if item == FilterSegment::MultiLevel && segments.peek().is_some() {
				return Err(TopicValidationError::hash_not_last(filter));
			}
		}
		Ok(())
	}

	/// True if any segment of the filter is `+` or `#`.
	pub fn is_wildcard_filter(filter: &str) -> bool {
		split_segments(filter).any(|s| FilterSegment::classify(s).is_wildcard())
	}
}
