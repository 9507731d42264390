//! `serde` support for [`TopicMatcher`], enabled by the `serde` feature.
//!
//! A matcher serializes as a map from filter to value.

use std::fmt;
use std::marker::PhantomData;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::topic_matcher::TopicMatcher;

impl<V: Serialize> Serialize for TopicMatcher<V> {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		serializer.collect_map(self.iter())
	}
}

struct TopicMatcherVisitor<V>(PhantomData<V>);

impl<'de, V: Deserialize<'de>> Visitor<'de> for TopicMatcherVisitor<V> {
	type Value = TopicMatcher<V>;

	fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("a map of topic filters to values")
	}

	fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
	where
		A: MapAccess<'de>,
	{
		let mut matcher = TopicMatcher::new();
		while let Some((filter, value)) = map.next_entry::<String, V>()? {
			matcher.insert(&filter, value);
		}
		Ok(matcher)
	}
}

impl<'de, V: Deserialize<'de>> Deserialize<'de> for TopicMatcher<V> {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		deserializer.deserialize_map(TopicMatcherVisitor(PhantomData))
	}
}
