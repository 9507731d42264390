#![allow(missing_docs)]
//! Topic segmentation
//!
//! Topics and topic filters are both split on `/`. Every delimiter produces a
//! segment, so leading, trailing and doubled slashes yield empty segments.
//! The empty string is the one exception: it has no segments at all.

use std::fmt;

use arcstr::{ArcStr, Substr};

/// Splits a topic or filter into its `/`-delimited segments.
///
/// ```
/// use mqtt_topic_trie::topic::split_segments;
///
/// assert_eq!(split_segments("a//b").collect::<Vec<_>>(), ["a", "", "b"]);
/// assert_eq!(split_segments("").count(), 0);
/// ```
pub fn split_segments(path: &str) -> impl Iterator<Item = &str> + Clone {
	// `"".split('/')` would yield a single empty segment
	let mut segments = path.split('/');
	if path.is_empty() {
		segments.next();
	}
	segments
}

/// A topic string together with its pre-split segments.
///
/// Segments are [`Substr`] slices of the shared path, so cloning a
/// `TopicPath` or handing out segments never copies string data.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TopicPath {
	path: ArcStr,
	segments: Vec<Substr>,
}

impl TopicPath {
	pub fn new(path: impl Into<ArcStr>) -> Self {
		let path = path.into();
		let segments = split_segments(&path)
			.map(|s| path.substr_from(s))
			.collect();
		Self { path, segments }
	}

	pub fn path(&self) -> ArcStr {
		self.path.clone()
	}

	pub fn as_str(&self) -> &str {
		&self.path
	}

	pub fn segments(&self) -> &[Substr] {
		&self.segments
	}

	/// Number of segments, zero for the empty topic.
	pub fn len(&self) -> usize {
		self.segments.len()
	}

	pub fn is_empty(&self) -> bool {
		self.segments.is_empty()
	}

	/// True for topics in the reserved `$` space, e.g. `$SYS/broker/load`.
	/// Wildcards never match the first segment of such topics.
	pub fn is_system(&self) -> bool {
		self.segments.first().is_some_and(|s| is_system_segment(s))
	}
}

impl From<&str> for TopicPath {
	fn from(path: &str) -> Self {
		Self::new(path)
	}
}

impl From<ArcStr> for TopicPath {
	fn from(path: ArcStr) -> Self {
		Self::new(path)
	}
}

impl AsRef<str> for TopicPath {
	fn as_ref(&self) -> &str {
		&self.path
	}
}

impl fmt::Display for TopicPath {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.path)
	}
}

pub(crate) fn is_system_segment(segment: &str) -> bool {
	segment.starts_with('$')
}
