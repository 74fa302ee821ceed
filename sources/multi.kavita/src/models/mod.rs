pub mod common;
pub mod constants;
pub mod responses;
pub mod search;
pub mod series;
pub mod volume;

use aidoku::alloc::string::{String, ToString};
use serde::{Deserialize, Deserializer};

/// Older servers send chapter numbers as JSON numbers, newer ones as strings.
pub(crate) fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
	D: Deserializer<'de>,
{
	#[derive(Deserialize)]
	#[serde(untagged)]
	enum Raw {
		Text(String),
		Int(i64),
		Float(f64),
		Null,
	}

	Ok(match Raw::deserialize(deserializer)? {
		Raw::Text(text) => text,
		Raw::Int(number) => number.to_string(),
		Raw::Float(number) => number.to_string(),
		Raw::Null => String::new(),
	})
}

/// Kavita sends `null` for unset text fields, read it as the field's default.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
	D: Deserializer<'de>,
	T: Deserialize<'de> + Default,
{
	Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
