#![allow(clippy::missing_docs_in_private_items)]
#![allow(missing_docs)]
use std::collections::HashMap;
use std::fmt::Display;

use arcstr::ArcStr;
use thiserror::Error;
use tracing::{debug, trace};

use super::error::{TopicValidationError, validation};
use super::topic_matcher::TopicMatcher;

/// Errors that can occur during topic routing operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TopicRouterError {
	/// Topic filter validation failed
	#[error("Invalid topic filter: {0}")]
	InvalidFilter(#[from] TopicValidationError),

	/// Subscription with given ID was not found
	#[error("Subscription {id:?} not found")]
	SubscriptionNotFound { id: SubscriptionId },
}

impl TopicRouterError {
	/// Creates a new SubscriptionNotFound error
	pub fn subscription_not_found(id: SubscriptionId) -> Self {
		Self::SubscriptionNotFound { id }
	}
}

/// A subscription identifier.
///
/// Handed out by [`TopicRouter::add_subscription`] and used to cancel the
/// subscription later.
#[derive(Debug, Eq, PartialEq, Hash, Copy, Clone)]
pub struct SubscriptionId(usize);

impl Display for SubscriptionId {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "SubscriptionId({})", self.0)
	}
}

/// Router behavior settings
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RouterSettings {
	/// Reject filters that are not valid MQTT before storing them
	pub validate_filters: bool,
	/// Prune the trie whenever a filter loses its last subscriber
	pub prune_on_unsubscribe: bool,
}

impl Default for RouterSettings {
	fn default() -> Self {
		Self {
			validate_filters: true,
			prune_on_unsubscribe: true,
		}
	}
}

type SubscriptionTable<T> = HashMap<SubscriptionId, T>;

/// Routes concrete topics to the subscriptions whose filters match them.
///
/// Several subscriptions may share a filter; the trie stores one table per
/// filter. Like [`TopicMatcher`], the router does no locking of its own.
pub struct TopicRouter<T> {
	topic_matcher: TopicMatcher<SubscriptionTable<T>>,
	subscriptions: HashMap<SubscriptionId, ArcStr>,
	next_id: usize,
	settings: RouterSettings,
}

impl<T> Default for TopicRouter<T> {
	fn default() -> Self {
		Self::new()
	}
}

impl<T> TopicRouter<T> {
	pub fn new() -> Self {
		Self::with_settings(RouterSettings::default())
	}

	pub fn with_settings(settings: RouterSettings) -> Self {
		Self {
			topic_matcher: TopicMatcher::new(),
			subscriptions: HashMap::new(),
			next_id: 0,
			settings,
		}
	}

	pub fn settings(&self) -> &RouterSettings {
		&self.settings
	}

	/// Registers `subscription` under `filter`.
	///
	/// The returned flag is true when no other subscription used this filter
	/// yet, i.e. when the caller has to subscribe to it upstream.
	pub fn add_subscription(
		&mut self,
		filter: &str,
		subscription: T,
	) -> Result<(bool, SubscriptionId), TopicRouterError> {
		if self.settings.validate_filters {
			validation::validate_filter(filter)?;
		}

		let subscription_table = self
			.topic_matcher
			.get_or_insert_with(filter, SubscriptionTable::new);
		let needs_subscribe = subscription_table.is_empty();

		let id = SubscriptionId(self.next_id);
		self.next_id = self.next_id.wrapping_add(1);

		subscription_table.insert(id, subscription);
		self.subscriptions.insert(id, ArcStr::from(filter));

		debug!(subscription_id = %id, filter, needs_subscribe, "Subscription added");
		Ok((needs_subscribe, id))
	}

	/// Cancels a subscription, returning its filter and value.
	///
	/// The returned flag is true when the filter has no subscriptions left,
	/// i.e. when the caller can unsubscribe from it upstream.
	pub fn unsubscribe(
		&mut self,
		id: &SubscriptionId,
	) -> Result<(bool, ArcStr, T), TopicRouterError> {
		let filter = self
			.subscriptions
			.remove(id)
			.ok_or(TopicRouterError::subscription_not_found(*id))?;

		let (subscription, filter_now_empty) =
			match self.topic_matcher.find_mut(&filter) {
				| Some(table) => match table.remove(id) {
					| Some(subscription) => (subscription, table.is_empty()),
					| None => {
						return Err(TopicRouterError::subscription_not_found(*id));
					}
				},
				| None => return Err(TopicRouterError::subscription_not_found(*id)),
			};

		if filter_now_empty {
			self.topic_matcher.remove(&filter);
			if self.settings.prune_on_unsubscribe {
				self.topic_matcher.prune_path(&filter);
			}
			debug!(filter = %filter, "Topic filter now empty");
		}

		debug!(subscription_id = %id, filter = %filter, "Subscription removed");
		Ok((filter_now_empty, filter, subscription))
	}

	/// All subscriptions whose filter matches `topic`.
	pub fn subscribers(&self, topic: &str) -> Vec<(SubscriptionId, &T)> {
		let subscribers: Vec<_> = self
			.topic_matcher
			.matches(topic)
			.flat_map(|(_filter, table)| table.iter())
			.map(|(id, subscription)| (*id, subscription))
			.collect();
		trace!(topic, count = subscribers.len(), "Resolved subscribers");
		subscribers
	}

	/// True if any subscription matches `topic`.
	pub fn has_subscribers(&self, topic: &str) -> bool {
		self.topic_matcher
			.matches(topic)
			.any(|(_filter, table)| !table.is_empty())
	}

	pub fn filter_for(
		&self,
		id: &SubscriptionId,
	) -> Result<&ArcStr, TopicRouterError> {
		self.subscriptions
			.get(id)
			.ok_or(TopicRouterError::subscription_not_found(*id))
	}

	/// Distinct filters with at least one subscription.
	pub fn active_filters(&self) -> impl Iterator<Item = &str> {
		self.topic_matcher.filters()
	}

	/// Number of live subscriptions.
	pub fn len(&self) -> usize {
		self.subscriptions.len()
	}

	pub fn is_empty(&self) -> bool {
		self.subscriptions.is_empty()
	}

	#[cfg(test)]
	pub(crate) fn matcher(&self) -> &TopicMatcher<SubscriptionTable<T>> {
		&self.topic_matcher
	}

	/// Drops every subscription. Subscription values are dropped with the trie.
	///
	/// Ids keep counting from where they were, so ids handed out before the
	/// cleanup stay invalid.
	pub fn cleanup(&mut self) {
		self.topic_matcher = TopicMatcher::new();
		self.subscriptions.clear();
	}
}
