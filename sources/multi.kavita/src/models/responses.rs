use aidoku::{
	Chapter, Manga, MangaWithChapter,
	alloc::{String, string::ToString},
};
use serde::Deserialize;

use super::null_as_default;
use crate::{context::Context, endpoints::Url, helpers::parse_date};

#[derive(Default, Deserialize, Debug, Clone)]
#[serde(default, rename_all = "camelCase")]
pub struct KavitaRecentlyUpdated {
	pub series_id: i32,
	#[serde(deserialize_with = "null_as_default")]
	pub series_name: String,
	pub library_id: i32,
	#[serde(deserialize_with = "null_as_default")]
	pub title: String,
	#[serde(deserialize_with = "null_as_default")]
	pub created: String,
	pub chapter_id: i32,
}

impl KavitaRecentlyUpdated {
	pub fn into_manga_with_chapter(self, ctx: &Context) -> MangaWithChapter {
		let series_id = self.series_id.to_string();
		MangaWithChapter {
			manga: Manga {
				key: series_id.clone(),
				title: self.series_name,
				cover: Some(ctx.cover_url(self.series_id)),
				url: Some(Url::series_page(&ctx.base_url, self.library_id, &series_id)),
				..Default::default()
			},
			chapter: Chapter {
				key: self.chapter_id.to_string(),
				title: (!self.title.is_empty()).then_some(self.title),
				date_uploaded: parse_date(&self.created),
				..Default::default()
			},
		}
	}
}

/// Answer of the API key exchange.
#[derive(Default, Deserialize, Debug, Clone)]
#[serde(default, rename_all = "camelCase")]
pub struct KavitaUser {
	#[serde(deserialize_with = "null_as_default")]
	pub username: String,
	#[serde(deserialize_with = "null_as_default")]
	pub token: String,
}
