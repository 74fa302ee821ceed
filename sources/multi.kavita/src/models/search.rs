use aidoku::{
	Manga,
	alloc::{String, Vec, string::ToString},
};
use serde::Deserialize;

use super::{
	common::{KavitaPerson, KavitaTag},
	null_as_default,
};
use crate::{context::Context, endpoints::Url};

#[derive(Default, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct KavitaSearchResponse {
	#[serde(deserialize_with = "null_as_default")]
	pub series: Vec<KavitaSearchSeries>,
	#[serde(deserialize_with = "null_as_default")]
	pub persons: Vec<KavitaPerson>,
	#[serde(deserialize_with = "null_as_default")]
	pub genres: Vec<KavitaTag>,
	#[serde(deserialize_with = "null_as_default")]
	pub tags: Vec<KavitaTag>,
}

#[derive(Default, Deserialize, Debug, Clone)]
#[serde(default, rename_all = "camelCase")]
pub struct KavitaSearchSeries {
	pub series_id: i32,
	#[serde(deserialize_with = "null_as_default")]
	pub name: String,
	pub library_id: i32,
}

impl KavitaSearchSeries {
	pub fn into_manga(self, ctx: &Context) -> Manga {
		Manga {
			key: self.series_id.to_string(),
			cover: Some(ctx.cover_url(self.series_id)),
			url: Some(Url::series_page(
				&ctx.base_url,
				self.library_id,
				&self.series_id.to_string(),
			)),
			title: self.name,
			..Default::default()
		}
	}
}
