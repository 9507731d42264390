//! Topic filter segment classification

use std::fmt;

use super::error::TopicValidationError;

/// Segment text of the single-level wildcard.
pub const SINGLE_LEVEL_WILDCARD: &str = "+";

/// Segment text of the multi-level wildcard.
pub const MULTI_LEVEL_WILDCARD: &str = "#";

/// One segment of a topic filter: a literal or one of the two wildcards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterSegment<'a> {
	/// Literal segment, matched by exact string equality
	Literal(&'a str),
	/// `+`, matches exactly one topic segment
	SingleLevel,
	/// `#`, matches the rest of the topic including zero segments
	MultiLevel,
}

impl<'a> FilterSegment<'a> {
	/// Classifies a segment the way the matcher does: only a segment that is
	/// exactly `+` or `#` is a wildcard, anything else is a literal.
	pub fn classify(segment: &'a str) -> Self {
		match segment {
			| SINGLE_LEVEL_WILDCARD => FilterSegment::SingleLevel,
			| MULTI_LEVEL_WILDCARD => FilterSegment::MultiLevel,
			| _ => FilterSegment::Literal(segment),
		}
	}

	pub fn as_str(&self) -> &'a str {
		match self {
			| FilterSegment::Literal(s) => s,
			| FilterSegment::SingleLevel => SINGLE_LEVEL_WILDCARD,
			| FilterSegment::MultiLevel => MULTI_LEVEL_WILDCARD,
		}
	}

	pub fn is_wildcard(&self) -> bool {
		!matches!(self, FilterSegment::Literal(_))
	}
}

impl<'a> TryFrom<&'a str> for FilterSegment<'a> {
	type Error = TopicValidationError;

	/// Strict variant of [`FilterSegment::classify`]: rejects literals that
	/// embed a wildcard character, such as `sport+` or `a#b`.
	fn try_from(segment: &'a str) -> Result<Self, Self::Error> {
		match FilterSegment::classify(segment) {
			| FilterSegment::Literal(s) if s.contains(['+', '#']) => {
				Err(TopicValidationError::invalid_wildcard(s))
			}
			| item => Ok(item),
		}
	}
}

impl fmt::Display for FilterSegment<'_> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.as_str())
	}
}
