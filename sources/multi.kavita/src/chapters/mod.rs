use aidoku::{
	Chapter, Page, PageContent,
	alloc::{String, Vec, string::ToString, vec},
	prelude::*,
};
use core::cmp::Ordering;

use crate::{
	endpoints::Url,
	helpers::{is_unset_date, parse_date, strip_extension},
	models::{
		constants::{LOOSE_VOLUME, VOLUME_ONLY_CHAPTER},
		volume::{KavitaChapter, KavitaVolume},
	},
};

const DEFAULT_LANGUAGE: &str = "en";

/// Flattens the volumes of a series into the chapter list shown to the reader.
///
/// Regular chapters come first, highest number first, followed by the
/// specials in the order the server lists them. Specials are numbered from
/// one in that same order.
pub fn flatten_volumes(volumes: Vec<KavitaVolume>) -> Vec<Chapter> {
	let mut chapters = Vec::new();
	let mut specials = Vec::new();
	let mut special_number = 1;

	for volume in volumes {
		let volume_number = parse_volume_number(&volume.name);

		for chapter in volume.chapters {
			let chapter_number = if chapter.number == VOLUME_ONLY_CHAPTER {
				Some(1.0)
			} else if chapter.is_special {
				let number = special_number as f32;
				special_number += 1;
				Some(number)
			} else {
				chapter.number.trim().parse::<f32>().ok()
			};

			if chapter.is_special {
				specials.push(chapter.into_chapter(chapter_number, None));
			} else {
				chapters.push(chapter.into_chapter(chapter_number, volume_number));
			}
		}
	}

	chapters.sort_by(|a, b| compare_numbers(b, a));
	chapters.extend(specials);
	chapters
}

fn parse_volume_number(name: &str) -> Option<f32> {
	if name == LOOSE_VOLUME {
		return None;
	}
	name.trim().parse::<f32>().ok()
}

fn compare_numbers(a: &Chapter, b: &Chapter) -> Ordering {
	let key = |number: Option<f32>| number.unwrap_or(f32::MIN);
	key(a.chapter_number)
		.total_cmp(&key(b.chapter_number))
		.then_with(|| key(a.volume_number).total_cmp(&key(b.volume_number)))
}

impl KavitaChapter {
	fn into_chapter(self, chapter_number: Option<f32>, volume_number: Option<f32>) -> Chapter {
		let title = if self.is_special {
			Some(strip_extension(&self.range))
		} else {
			self.display_name()
		}
		.filter(|title| !title.is_empty());

		let date = if is_unset_date(&self.release_date) {
			&self.created
		} else {
			&self.release_date
		};

		Chapter {
			key: self.id.to_string(),
			title,
			chapter_number,
			volume_number,
			date_uploaded: parse_date(date),
			scanlators: Some(vec![self.version_label()]),
			language: Some(
				self.language
					.clone()
					.filter(|language| !language.is_empty())
					.unwrap_or_else(|| DEFAULT_LANGUAGE.into()),
			),
			..Default::default()
		}
	}

	/// Name of a regular chapter: its title when the range is just the number,
	/// otherwise the range without the leading number.
	pub fn display_name(&self) -> Option<String> {
		let title_name = self
			.title_name
			.as_deref()
			.map(str::trim)
			.filter(|title| !title.is_empty());

		if self.number == self.range {
			return title_name.map(Into::into);
		}

		let range = self.range.replacen(&format!("{}-", self.number), "", 1);
		Some(match title_name {
			Some(title_name) => format!("{range} - {title_name}"),
			None => range,
		})
	}

	pub fn progress_label(&self) -> String {
		if self.pages_read == 0 {
			String::new()
		} else if self.pages_read == self.pages {
			"· Read".into()
		} else {
			format!("· Reading {} page", self.pages_read)
		}
	}

	/// Shown on the scanlator line, e.g. `Specials · 24 pages · Read`.
	pub fn version_label(&self) -> String {
		let prefix = if self.is_special { "Specials · " } else { "" };
		format!("{prefix}{} pages {}", self.pages, self.progress_label())
			.trim()
			.to_string()
	}
}

/// One reader image per page, numbered from zero.
pub fn page_urls(api_url: &str, chapter_id: &str, pages: usize, api_key: &str) -> Vec<String> {
	(0..pages)
		.map(|page| Url::reader_image(api_url, chapter_id, page, api_key))
		.collect()
}

pub fn into_pages(urls: Vec<String>) -> Vec<Page> {
	urls.into_iter()
		.map(|url| Page {
			content: PageContent::url(url),
			..Default::default()
		})
		.collect()
}

/// Whether a title's chapters have to be fetched again.
///
/// A refresh is needed when the server reports a latest change that differs
/// from the stored one, unless the reader still has unread chapters. The
/// unread count only matters when a chapter count is known.
pub fn needs_update(
	latest: Option<&str>,
	stored: Option<&str>,
	unread: Option<i32>,
	chapter_count: Option<i32>,
) -> bool {
	let Some(latest) = latest.filter(|latest| !latest.is_empty()) else {
		return false;
	};

	let has_unread = match (unread, chapter_count) {
		(Some(unread), Some(count)) if count > 0 => unread > 0,
		_ => false,
	};

	Some(latest) != stored && !has_unread
}

#[cfg(test)]
mod test;
