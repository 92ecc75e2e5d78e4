//! Serde helpers for config document deserialization

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use std::fmt;
use std::marker::PhantomData;

/// JSON object kept as an ordered list of `(key, value)` pairs.
///
/// Unlike a map, repeated keys survive deserialization, which lets the
/// duplicate-key rules see them.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyedEntries<T>(Vec<(String, T)>);

impl<T> KeyedEntries<T> {
	/// Keys in source order, repeats included.
	pub fn keys(&self) -> Vec<&str> {
		self.0.iter().map(|(key, _)| key.as_str()).collect()
	}

	pub fn values(&self) -> impl Iterator<Item = &T> {
		self.0.iter().map(|(_, value)| value)
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
		self.0.iter().map(|(key, value)| (key.as_str(), value))
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}

impl<T> Default for KeyedEntries<T> {
	fn default() -> Self {
		Self(Vec::new())
	}
}

impl<'de, T> Deserialize<'de> for KeyedEntries<T>
where
	T: Deserialize<'de>,
{
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		struct EntriesVisitor<T>(PhantomData<T>);

		impl<'de, T> Visitor<'de> for EntriesVisitor<T>
		where
			T: Deserialize<'de>,
		{
			type Value = KeyedEntries<T>;

			fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
				formatter.write_str("an object")
			}

			fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
			where
				A: MapAccess<'de>,
			{
				let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
				while let Some((key, value)) = map.next_entry::<String, T>()? {
					entries.push((key, value));
				}
				Ok(KeyedEntries(entries))
			}
		}

		deserializer.deserialize_map(EntriesVisitor(PhantomData))
	}
}

/// Reads JSON `null` as the type's default, like an absent field.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
	D: Deserializer<'de>,
	T: Default + Deserialize<'de>,
{
	Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Deserializes an identifier given either as a JSON string or a number.
pub fn deserialize_id_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
	D: Deserializer<'de>,
{
	#[derive(Deserialize)]
	#[serde(untagged)]
	enum IdRepr {
		Text(String),
		Unsigned(u64),
		Signed(i64),
	}

	Ok(match IdRepr::deserialize(deserializer)? {
		IdRepr::Text(text) => text,
		IdRepr::Unsigned(n) => n.to_string(),
		IdRepr::Signed(n) => n.to_string(),
	})
}
