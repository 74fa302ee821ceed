use aidoku::{
	Link, Manga, UpdateStrategy, Viewer,
	alloc::{
		String, Vec,
		string::ToString,
	},
	prelude::*,
};
use serde::Deserialize;

use super::{
	common::{KavitaPerson, KavitaTag},
	constants::{content_rating, publication_status},
	null_as_default,
};
use crate::{context::Context, endpoints::Url, helpers::strip_html};

const WEBTOON_MARKERS: [&str; 3] = ["webtoon", "manhwa", "manhua"];

#[derive(Default, Deserialize, Debug, Clone)]
#[serde(default, rename_all = "camelCase")]
pub struct KavitaSeries {
	pub id: i32,
	#[serde(deserialize_with = "null_as_default")]
	pub name: String,
	#[serde(deserialize_with = "null_as_default")]
	pub original_name: String,
	#[serde(deserialize_with = "null_as_default")]
	pub localized_name: String,
	#[serde(deserialize_with = "null_as_default")]
	pub sort_name: String,
	pub library_id: i32,
	#[serde(deserialize_with = "null_as_default")]
	pub last_chapter_added: String,
}

#[derive(Default, Deserialize, Debug, Clone)]
#[serde(default, rename_all = "camelCase")]
pub struct KavitaSeriesMetadata {
	pub summary: Option<String>,
	#[serde(deserialize_with = "null_as_default")]
	pub genres: Vec<KavitaTag>,
	#[serde(deserialize_with = "null_as_default")]
	pub tags: Vec<KavitaTag>,
	#[serde(deserialize_with = "null_as_default")]
	pub writers: Vec<KavitaPerson>,
	#[serde(deserialize_with = "null_as_default")]
	pub pencillers: Vec<KavitaPerson>,
	pub publication_status: i32,
	pub age_rating: i32,
}

/// `Series/metadata` answers with the bare metadata on current servers and
/// wraps it in `seriesMetadata` on older ones.
#[derive(Deserialize, Debug, Clone)]
#[serde(untagged)]
pub enum KavitaMetadataResponse {
	Wrapped {
		#[serde(rename = "seriesMetadata")]
		series_metadata: KavitaSeriesMetadata,
	},
	Bare(KavitaSeriesMetadata),
}

impl From<KavitaMetadataResponse> for KavitaSeriesMetadata {
	fn from(response: KavitaMetadataResponse) -> Self {
		match response {
			KavitaMetadataResponse::Wrapped { series_metadata } => series_metadata,
			KavitaMetadataResponse::Bare(metadata) => metadata,
		}
	}
}

impl KavitaSeries {
	/// Entry of a series list, without metadata.
	pub fn into_manga(self, ctx: &Context) -> Manga {
		Manga {
			key: self.id.to_string(),
			cover: Some(ctx.cover_url(self.id)),
			url: Some(Url::series_page(
				&ctx.base_url,
				self.library_id,
				&self.id.to_string(),
			)),
			title: self.name,
			..Default::default()
		}
	}

	pub fn into_link(self, ctx: &Context) -> Link {
		Link::from(self.into_manga(ctx))
	}

	pub fn into_manga_details(self, metadata: KavitaSeriesMetadata, ctx: &Context) -> Manga {
		let description = self.description(metadata.summary.as_deref());
		let viewer = metadata.viewer();

		let tags = metadata
			.genres
			.iter()
			.chain(metadata.tags.iter())
			.map(|tag| tag.title.clone())
			.filter(|title| !title.is_empty())
			.collect::<Vec<_>>();

		let authors = names(&metadata.writers);
		let artists = names(&metadata.pencillers);

		let mut manga = self.into_manga(ctx);
		manga.description = description;
		manga.authors = (!authors.is_empty()).then_some(authors);
		manga.artists = (!artists.is_empty()).then_some(artists);
		manga.tags = (!tags.is_empty()).then_some(tags);
		manga.status = publication_status(metadata.publication_status);
		manga.content_rating = content_rating(metadata.age_rating);
		manga.viewer = viewer;
		manga.update_strategy = UpdateStrategy::Always;
		manga
	}

	/// Titles other than the display name, in server order and without repeats.
	pub fn alternative_titles(&self) -> Vec<String> {
		let mut titles: Vec<String> = Vec::new();
		for title in [&self.original_name, &self.localized_name, &self.sort_name] {
			let title = title.trim();
			if title.is_empty()
				|| title.eq_ignore_ascii_case(&self.name)
				|| titles.iter().any(|seen| seen.eq_ignore_ascii_case(title))
			{
				continue;
			}
			titles.push(title.into());
		}
		titles
	}

	fn description(&self, summary: Option<&str>) -> Option<String> {
		let mut description = summary.map(strip_html).unwrap_or_default();

		let alternative_titles = self.alternative_titles();
		if !alternative_titles.is_empty() {
			if !description.is_empty() {
				description.push_str("\n\n");
			}
			description.push_str(&format!(
				"Alternative titles: {}",
				alternative_titles.join(", ")
			));
		}

		(!description.is_empty()).then_some(description)
	}
}

impl KavitaSeriesMetadata {
	pub fn viewer(&self) -> Viewer {
		let is_webtoon = self.genres.iter().chain(self.tags.iter()).any(|tag| {
			let title = tag.title.to_lowercase();
			WEBTOON_MARKERS.iter().any(|marker| title.contains(marker))
		});
		if is_webtoon {
			Viewer::Webtoon
		} else {
			Viewer::Unknown
		}
	}
}

fn names(people: &[KavitaPerson]) -> Vec<String> {
	people
		.iter()
		.map(|person| person.name.clone())
		.filter(|name| !name.is_empty())
		.collect()
}
