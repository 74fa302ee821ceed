use aidoku::alloc::String;
use serde::Deserialize;

use super::{constants::LibraryType, null_as_default};

#[derive(Default, Deserialize, Debug, Clone)]
#[serde(default, rename_all = "camelCase")]
pub struct KavitaLibrary {
	pub id: i32,
	#[serde(deserialize_with = "null_as_default")]
	pub name: String,
	#[serde(rename = "type")]
	pub library_type: i32,
}

impl KavitaLibrary {
	pub fn is_supported(&self) -> bool {
		LibraryType::from(self.library_type) != LibraryType::Book
	}
}

/// Genre or tag, both share the `{ id, title }` shape.
#[derive(Default, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct KavitaTag {
	pub id: i32,
	#[serde(deserialize_with = "null_as_default")]
	pub title: String,
}

#[derive(Default, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct KavitaPerson {
	pub id: i32,
	#[serde(deserialize_with = "null_as_default")]
	pub name: String,
	pub role: i32,
}
