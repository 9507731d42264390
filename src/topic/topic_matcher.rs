#![allow(missing_docs)]
//! Topic filter trie
//!
//! [`TopicMatcher`] maps topic filters to values and answers the question
//! "which filters match this topic?". Filters are stored along the path of
//! their `/`-delimited segments, so wildcard segments (`+`, `#`) are ordinary
//! children keyed by their own text. Wildcards only take on meaning during
//! [`TopicMatcher::matches`].

use std::collections::HashMap;
use std::fmt;
use std::mem;

use arcstr::{ArcStr, Substr};
use tracing::trace;

use super::filter_segment::{MULTI_LEVEL_WILDCARD, SINGLE_LEVEL_WILDCARD};
use super::topic_matcher_iter::{IntoIter, Iter, IterMut, Matches};
use super::topic_path::split_segments;

/// A stored filter and its value, kept together so iteration can report both.
#[derive(Debug, Clone)]
pub(crate) struct MatcherEntry<V> {
	pub(crate) filter: ArcStr,
	pub(crate) value: V,
}

impl<V> MatcherEntry<V> {
	pub(crate) fn as_item(&self) -> (&str, &V) {
		(self.filter.as_str(), &self.value)
	}
}

/// Node in the topic matching tree that represents a part of the topic path.
/// Used internally by the `TopicMatcher`.
#[derive(Debug, Clone)]
pub(crate) struct TopicMatcherNode<V> {
	/// Filter terminating exactly at this node, if any
	pub(crate) content: Option<MatcherEntry<V>>,

	/// Children keyed by the next segment, wildcards included
	pub(crate) children: HashMap<Substr, TopicMatcherNode<V>>,
}

impl<V> Default for TopicMatcherNode<V> {
	fn default() -> Self {
		Self::new()
	}
}

impl<V> TopicMatcherNode<V> {
	pub(crate) fn new() -> Self {
		Self {
			content: None,
			children: HashMap::new(),
		}
	}

	/// A node with neither content nor children can be pruned.
	pub(crate) fn is_empty(&self) -> bool {
		self.content.is_none() && self.children.is_empty()
	}

	pub(crate) fn single_level_child(&self) -> Option<&Self> {
		self.children.get(SINGLE_LEVEL_WILDCARD)
	}

	pub(crate) fn multi_level_entry(&self) -> Option<&MatcherEntry<V>> {
		self.children
			.get(MULTI_LEVEL_WILDCARD)
			.and_then(|child| child.content.as_ref())
	}

	/// Walks the exact path of `filter`, creating missing nodes.
	fn descend_or_create(&mut self, filter: &ArcStr) -> &mut Self {
		let mut current_node = self;
		for segment in split_segments(filter) {
			current_node = current_node
				.children
				.entry(filter.substr_from(segment))
				.or_default();
		}
		current_node
	}

	fn descend(&self, filter: &str) -> Option<&Self> {
		let mut current_node = self;
		for segment in split_segments(filter) {
			current_node = current_node.children.get(segment)?;
		}
		Some(current_node)
	}

	fn descend_mut(&mut self, filter: &str) -> Option<&mut Self> {
		let mut current_node = self;
		for segment in split_segments(filter) {
			current_node = current_node.children.get_mut(segment)?;
		}
		Some(current_node)
	}

	/// Depth-first removal of empty subtrees. Returns the number of nodes
	/// dropped.
	fn prune(&mut self) -> usize {
		let mut removed = 0;
		self.children.retain(|_, child| {
			removed += child.prune();
			if child.is_empty() {
				removed += 1;
				false
			} else {
				true
			}
		});
		removed
	}

	/// Removes empty nodes along `segments` only, deepest first. Stops at the
	/// first node that still holds content or other children.
	fn prune_path<'s>(
		&mut self,
		mut segments: impl Iterator<Item = &'s str>,
	) -> usize {
		let Some(segment) = segments.next() else {
			return 0;
		};
		let Some(child) = self.children.get_mut(segment) else {
			return 0;
		};
		let mut removed = child.prune_path(segments);
		if child.is_empty() {
			self.children.remove(segment);
			removed += 1;
		}
		removed
	}
}

/// Result of an exact filter lookup with [`TopicMatcher::lookup`].
///
/// Distinguishes a filter whose path was never created from one whose path
/// exists only as a branch towards longer filters (or was emptied by
/// [`TopicMatcher::remove`] and not yet pruned).
#[derive(Debug, PartialEq, Eq)]
pub enum FilterLookup<'a, V> {
	/// No node exists for the filter
	NotFound,
	/// A node exists but holds no value
	Branch,
	/// The filter is stored with this value
	Value(&'a V),
}

// Only a reference is held, so no `V: Clone` bound
impl<V> Clone for FilterLookup<'_, V> {
	fn clone(&self) -> Self {
		*self
	}
}

impl<V> Copy for FilterLookup<'_, V> {}

impl<'a, V> FilterLookup<'a, V> {
	pub fn value(self) -> Option<&'a V> {
		match self {
			| FilterLookup::Value(value) => Some(value),
			| FilterLookup::NotFound | FilterLookup::Branch => None,
		}
	}

	/// True if a node exists for the filter, with or without a value.
	pub fn node_exists(&self) -> bool {
		!matches!(self, FilterLookup::NotFound)
	}
}

/// A collection of MQTT topic filters, each mapped to a value, that can be
/// searched for the filters matching a concrete topic.
///
/// Any string is accepted as a filter; no MQTT validation takes place (see
/// [`validation`](crate::topic::validation) for that). Inserting the same
/// filter twice replaces the earlier value.
///
/// ```
/// use mqtt_topic_trie::TopicMatcher;
///
/// let mut matcher = TopicMatcher::new();
/// matcher.insert("data/temperature/engine", 42);
/// matcher.insert("data/#", 99);
/// matcher.insert("data/+/engine", 33);
///
/// let mut values: Vec<_> = matcher
/// 	.matches("data/temperature/engine")
/// 	.map(|(_filter, value)| *value)
/// 	.collect();
/// values.sort();
/// assert_eq!(values, [33, 42, 99]);
///
/// assert!(matcher.has_match("data/pressure"));
/// assert!(!matcher.has_match("other/topic"));
/// ```
///
/// The matcher has no internal locking. Share it between threads behind a
/// lock, treating `find`/`matches` as readers and `insert`/`remove`/`prune`
/// as writers.
#[derive(Clone)]
pub struct TopicMatcher<V> {
	root: TopicMatcherNode<V>,
	len: usize,
}

impl<V> Default for TopicMatcher<V> {
	fn default() -> Self {
		Self::new()
	}
}

impl<V> TopicMatcher<V> {
	/// Creates an empty matcher.
	pub fn new() -> Self {
		Self {
			root: TopicMatcherNode::new(),
			len: 0,
		}
	}

	/// Number of stored filters.
	pub fn len(&self) -> usize {
		self.len
	}

	pub fn is_empty(&self) -> bool {
		self.len == 0
	}

	/// Number of nodes below the root, including branch nodes that hold no
	/// value. Useful to observe the effect of [`prune`](Self::prune).
	pub fn node_count(&self) -> usize {
		let mut count = 0;
		let mut stack = vec![&self.root];
		while let Some(node) = stack.pop() {
			count += node.children.len();
			stack.extend(node.children.values());
		}
		count
	}

	/// Associates `value` with `filter`, returning the value it replaced.
	///
	/// Missing intermediate nodes are created. The empty filter is stored on
	/// the root.
	pub fn insert(&mut self, filter: &str, value: V) -> Option<V> {
		let filter = ArcStr::from(filter);
		let node = self.root.descend_or_create(&filter);
		if let Some(entry) = node.content.as_mut() {
			return Some(mem::replace(&mut entry.value, value));
		}
		node.content = Some(MatcherEntry { filter, value });
		self.len += 1;
		None
	}

	/// Returns the value stored for `filter`, inserting the result of
	/// `default` first if there is none.
	pub fn get_or_insert_with<F>(&mut self, filter: &str, default: F) -> &mut V
	where
		F: FnOnce() -> V,
	{
		let filter = ArcStr::from(filter);
		let node = self.root.descend_or_create(&filter);
		if node.content.is_none() {
			self.len += 1;
		}
		&mut node
			.content
			.get_or_insert_with(|| MatcherEntry {
				filter,
				value: default(),
			})
			.value
	}

	/// Detaches and returns the value stored for `filter`.
	///
	/// Nodes along the path are left in place, even if they are now empty;
	/// call [`prune`](Self::prune) to reclaim them.
	pub fn remove(&mut self, filter: &str) -> Option<V> {
		let entry = self.root.descend_mut(filter)?.content.take()?;
		self.len -= 1;
		Some(entry.value)
	}

	/// Removes every subtree that holds no values. The root is never removed.
	pub fn prune(&mut self) {
		let removed = self.root.prune();
		trace!(removed, remaining = self.node_count(), "Pruned topic matcher");
	}

	/// Like [`prune`](Self::prune), but only visits the nodes on the path of
	/// `filter`. Empty nodes elsewhere in the trie are left alone.
	pub fn prune_path(&mut self, filter: &str) {
		let removed = self.root.prune_path(split_segments(filter));
		trace!(filter, removed, "Pruned topic filter path");
	}

	/// Exact lookup of `filter`; wildcards in either the argument or the
	/// stored filters are compared as plain text.
	pub fn find(&self, filter: &str) -> Option<&V> {
		self.lookup(filter).value()
	}

	pub fn find_mut(&mut self, filter: &str) -> Option<&mut V> {
		self.root
			.descend_mut(filter)?
			.content
			.as_mut()
			.map(|entry| &mut entry.value)
	}

	/// Exact lookup of `filter` that also tells a missing path apart from a
	/// path that exists without a value.
	pub fn lookup(&self, filter: &str) -> FilterLookup<'_, V> {
		match self.root.descend(filter) {
			| None => FilterLookup::NotFound,
			| Some(node) => match &node.content {
				| Some(entry) => FilterLookup::Value(&entry.value),
				| None => FilterLookup::Branch,
			},
		}
	}

	pub fn contains_filter(&self, filter: &str) -> bool {
		self.find(filter).is_some()
	}

	/// Lazily yields every stored `(filter, value)` whose filter matches
	/// `topic`.
	///
	/// `+` matches exactly one segment and `#` matches the rest of the topic,
	/// including nothing at all. Neither matches the first segment of a topic
	/// starting with `$`. The order of the results is unspecified.
	pub fn matches(&self, topic: &str) -> Matches<'_, V> {
		Matches::new(&self.root, topic)
	}

	/// True if at least one stored filter matches `topic`. Stops at the
	/// first match.
	pub fn has_match(&self, topic: &str) -> bool {
		self.matches(topic).next().is_some()
	}

	/// Visits every stored `(filter, value)` in unspecified order.
	pub fn iter(&self) -> Iter<'_, V> {
		Iter::new(&self.root, self.len)
	}

	pub fn iter_mut(&mut self) -> IterMut<'_, V> {
		IterMut::new(&mut self.root, self.len)
	}

	pub fn filters(&self) -> impl Iterator<Item = &str> {
		self.iter().map(|(filter, _)| filter)
	}

	pub fn values(&self) -> impl Iterator<Item = &V> {
		self.iter().map(|(_, value)| value)
	}

	pub fn values_mut(&mut self) -> impl Iterator<Item = &mut V> {
		self.iter_mut().map(|(_, value)| value)
	}

	/// Removes all filters and nodes.
	pub fn clear(&mut self) {
		self.root = TopicMatcherNode::new();
		self.len = 0;
	}
}

impl<V: fmt::Debug> fmt::Debug for TopicMatcher<V> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_map().entries(self.iter()).finish()
	}
}

impl<S: AsRef<str>, V> FromIterator<(S, V)> for TopicMatcher<V> {
	fn from_iter<I: IntoIterator<Item = (S, V)>>(iter: I) -> Self {
		let mut matcher = TopicMatcher::new();
		matcher.extend(iter);
		matcher
	}
}

impl<S: AsRef<str>, V> Extend<(S, V)> for TopicMatcher<V> {
	fn extend<I: IntoIterator<Item = (S, V)>>(&mut self, iter: I) {
		for (filter, value) in iter {
			self.insert(filter.as_ref(), value);
		}
	}
}

impl<'a, V> IntoIterator for &'a TopicMatcher<V> {
	type IntoIter = Iter<'a, V>;
	type Item = (&'a str, &'a V);

	fn into_iter(self) -> Self::IntoIter {
		self.iter()
	}
}

impl<'a, V> IntoIterator for &'a mut TopicMatcher<V> {
	type IntoIter = IterMut<'a, V>;
	type Item = (&'a str, &'a mut V);

	fn into_iter(self) -> Self::IntoIter {
		self.iter_mut()
	}
}

impl<V> IntoIterator for TopicMatcher<V> {
	type IntoIter = IntoIter<V>;
	type Item = (ArcStr, V);

	fn into_iter(self) -> Self::IntoIter {
		IntoIter::new(self.root, self.len)
	}
}
