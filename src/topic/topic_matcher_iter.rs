//! Iterators over a [`TopicMatcher`](super::TopicMatcher)
//!
//! All traversals keep an explicit stack of pending nodes instead of
//! recursing, so they can suspend between calls to `next` and their depth is
//! not bounded by the call stack.

use std::iter::FusedIterator;

use arcstr::ArcStr;

use super::filter_segment::FilterSegment;
use super::topic_matcher::{MatcherEntry, TopicMatcherNode};
use super::topic_path::{TopicPath, is_system_segment};

/// Pending work for [`Matches`]: a node reached after consuming `depth`
/// topic segments.
struct MatchFrame<'a, V> {
	node: &'a TopicMatcherNode<V>,
	depth: usize,
}

/// Lazy search for the filters matching one topic, created by
/// [`TopicMatcher::matches`](super::TopicMatcher::matches).
///
/// Single pass: once exhausted, call `matches` again for a fresh search. The
/// topic is copied in, so the iterator only borrows the matcher.
pub struct Matches<'a, V> {
	topic: TopicPath,
	stack: Vec<MatchFrame<'a, V>>,
	/// Match found alongside another one, emitted on the next call
	pending: Option<&'a MatcherEntry<V>>,
	#[cfg(test)]
	visited: usize,
}

impl<'a, V> Matches<'a, V> {
	pub(crate) fn new(root: &'a TopicMatcherNode<V>, topic: &str) -> Self {
		Self {
			topic: TopicPath::from(topic),
			stack: vec![MatchFrame {
				node: root,
				depth: 0,
			}],
			pending: None,
			#[cfg(test)]
			visited: 0,
		}
	}

	/// Number of nodes popped from the stack so far.
	#[cfg(test)]
	pub(crate) fn visited(&self) -> usize {
		self.visited
	}

	fn push(&mut self, node: &'a TopicMatcherNode<V>, depth: usize) {
		self.stack.push(MatchFrame { node, depth });
	}
}

impl<'a, V> Iterator for Matches<'a, V> {
	type Item = (&'a str, &'a V);

	fn next(&mut self) -> Option<Self::Item> {
		if let Some(entry) = self.pending.take() {
			return Some(entry.as_item());
		}

		while let Some(MatchFrame { node, depth }) = self.stack.pop() {
			#[cfg(test)]
			{
				self.visited += 1;
			}

			let Some(segment) = self.topic.segments().get(depth).cloned() else {
				// Topic exhausted. `#` also matches zero remaining segments.
				match (node.content.as_ref(), node.multi_level_entry()) {
					| (Some(own), hash) => {
						self.pending = hash;
						return Some(own.as_item());
					}
					| (None, Some(hash)) => return Some(hash.as_item()),
					| (None, None) => continue,
				}
			};

			// A wildcard character in the topic itself is only reached through
			// the wildcard children, so no filter is reported twice.
			if !FilterSegment::classify(&segment).is_wildcard() {
				if let Some(child) = node.children.get(segment.as_str()) {
					self.push(child, depth + 1);
				}
			}

			if depth == 0 && is_system_segment(&segment) {
				continue;
			}

			if let Some(child) = node.single_level_child() {
				self.push(child, depth + 1);
			}
			if let Some(hash) = node.multi_level_entry() {
				return Some(hash.as_item());
			}
		}
		None
	}
}

impl<V> FusedIterator for Matches<'_, V> {}

/// Pre-order walk over every stored filter, created by
/// [`TopicMatcher::iter`](super::TopicMatcher::iter).
pub struct Iter<'a, V> {
	stack: Vec<&'a TopicMatcherNode<V>>,
	remaining: usize,
}

impl<'a, V> Iter<'a, V> {
	pub(crate) fn new(root: &'a TopicMatcherNode<V>, len: usize) -> Self {
		Self {
			stack: vec![root],
			remaining: len,
		}
	}
}

impl<'a, V> Iterator for Iter<'a, V> {
	type Item = (&'a str, &'a V);

	fn next(&mut self) -> Option<Self::Item> {
		while let Some(node) = self.stack.pop() {
			self.stack.extend(node.children.values());
			if let Some(entry) = &node.content {
				self.remaining -= 1;
				return Some(entry.as_item());
			}
		}
		None
	}

	fn size_hint(&self) -> (usize, Option<usize>) {
		(self.remaining, Some(self.remaining))
	}
}

impl<V> ExactSizeIterator for Iter<'_, V> {}
impl<V> FusedIterator for Iter<'_, V> {}

/// Mutable pre-order walk, created by
/// [`TopicMatcher::iter_mut`](super::TopicMatcher::iter_mut).
pub struct IterMut<'a, V> {
	stack: Vec<&'a mut TopicMatcherNode<V>>,
	remaining: usize,
}

impl<'a, V> IterMut<'a, V> {
	pub(crate) fn new(root: &'a mut TopicMatcherNode<V>, len: usize) -> Self {
		Self {
			stack: vec![root],
			remaining: len,
		}
	}
}

impl<'a, V> Iterator for IterMut<'a, V> {
	type Item = (&'a str, &'a mut V);

	fn next(&mut self) -> Option<Self::Item> {
		while let Some(node) = self.stack.pop() {
			let TopicMatcherNode { content, children } = node;
			self.stack.extend(children.values_mut());
			if let Some(entry) = content {
				self.remaining -= 1;
				return Some((entry.filter.as_str(), &mut entry.value));
			}
		}
		None
	}

	fn size_hint(&self) -> (usize, Option<usize>) {
		(self.remaining, Some(self.remaining))
	}
}

impl<V> ExactSizeIterator for IterMut<'_, V> {}
impl<V> FusedIterator for IterMut<'_, V> {}

/// Owning walk over every stored filter, created by
/// `TopicMatcher::into_iter`.
pub struct IntoIter<V> {
	stack: Vec<TopicMatcherNode<V>>,
	remaining: usize,
}

impl<V> IntoIter<V> {
	pub(crate) fn new(root: TopicMatcherNode<V>, len: usize) -> Self {
		Self {
			stack: vec![root],
			remaining: len,
		}
	}
}

impl<V> Iterator for IntoIter<V> {
	type Item = (ArcStr, V);

	fn next(&mut self) -> Option<Self::Item> {
		while let Some(node) = self.stack.pop() {
			self.stack.extend(node.children.into_values());
			if let Some(entry) = node.content {
				self.remaining -= 1;
				return Some((entry.filter, entry.value));
			}
		}
		None
	}

	fn size_hint(&self) -> (usize, Option<usize>) {
		(self.remaining, Some(self.remaining))
	}
}

impl<V> ExactSizeIterator for IntoIter<V> {}
impl<V> FusedIterator for IntoIter<V> {}
