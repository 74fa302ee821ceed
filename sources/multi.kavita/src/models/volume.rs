use aidoku::alloc::{String, Vec};
use serde::Deserialize;

use super::{null_as_default, string_or_number};

#[derive(Default, Deserialize, Debug, Clone)]
#[serde(default, rename_all = "camelCase")]
pub struct KavitaVolume {
	pub id: i32,
	#[serde(deserialize_with = "null_as_default")]
	pub name: String,
	#[serde(deserialize_with = "null_as_default")]
	pub chapters: Vec<KavitaChapter>,
}

#[derive(Default, Deserialize, Debug, Clone)]
#[serde(default, rename_all = "camelCase")]
pub struct KavitaChapter {
	pub id: i32,
	#[serde(deserialize_with = "null_as_default")]
	pub range: String,
	#[serde(deserialize_with = "string_or_number")]
	pub number: String,
	pub pages: i32,
	pub pages_read: i32,
	pub is_special: bool,
	pub title_name: Option<String>,
	#[serde(deserialize_with = "null_as_default")]
	pub release_date: String,
	#[serde(deserialize_with = "null_as_default")]
	pub created: String,
	pub language: Option<String>,
	pub volume_id: i32,
}

impl KavitaChapter {
	pub fn is_read(&self) -> bool {
		self.pages > 0 && self.pages_read >= self.pages
	}
}
