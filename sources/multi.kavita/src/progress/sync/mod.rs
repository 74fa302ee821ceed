use aidoku::{
	AidokuError, Chapter, Result,
	alloc::{String, Vec},
	imports::std::current_date,
	prelude::*,
};
use serde::Serialize;

use super::read_chapter_ids;
use crate::{
	chapters::flatten_volumes,
	context::Context,
	endpoints::Url,
	helpers::format_date,
	models::{series::KavitaSeries, volume::KavitaVolume},
	net,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadingStatus {
	Reading,
	NotRead,
	Read,
}

impl ReadingStatus {
	pub fn parse(value: &str) -> Option<Self> {
		match value.trim() {
			"reading" => Some(Self::Reading),
			"not readed" | "not_read" => Some(Self::NotRead),
			"readed" | "read" => Some(Self::Read),
			_ => None,
		}
	}
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SeriesBody {
	series_id: i32,
}

#[derive(Serialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProgressBody {
	pub volume_id: i32,
	pub chapter_id: i32,
	pub page_num: i32,
	pub series_id: i32,
	pub library_id: i32,
	pub last_modified_utc: String,
}

#[derive(Serialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MarkMultipleBody {
	pub series_id: i32,
	pub chapter_ids: Vec<i32>,
}

/// One "chapter was read" event queued by the reader.
#[derive(Debug, Clone, Default)]
pub struct ChapterReadAction {
	pub series_id: String,
	pub chapter_id: Option<String>,
}

#[derive(Debug, Default, PartialEq)]
pub struct ReadActionResult {
	pub successful: Vec<String>,
	pub failed: Vec<String>,
}

/// Pushes a reading status for a whole series to the server. `read` holds
/// the ids of the chapters the reader finished in the app.
pub fn submit_reading_status(
	ctx: &Context,
	series: &KavitaSeries,
	status: ReadingStatus,
	volumes: &[KavitaVolume],
	read: &[String],
) -> Result<()> {
	let body = SeriesBody {
		series_id: series.id,
	};
	let result = match status {
		ReadingStatus::NotRead => net::post(&Url::mark_unread(&ctx.api_url), &body),
		ReadingStatus::Read => net::post(&Url::mark_read(&ctx.api_url), &body),
		ReadingStatus::Reading => progress_bodies(series, volumes, read, &format_date(current_date()))
			.iter()
			.try_for_each(|body| net::post(&Url::progress(&ctx.api_url), body)),
	};

	result.map_err(|err| {
		println!("[kavita] Error updating manga progress: {err:?}");
		AidokuError::message(format!("Failed to update manga progress: {err:?}"))
	})
}

/// Progress entries for every chapter in `read`, whatever the server
/// currently reports for them.
pub fn progress_bodies(
	series: &KavitaSeries,
	volumes: &[KavitaVolume],
	read: &[String],
	now: &str,
) -> Vec<ProgressBody> {
	volumes
		.iter()
		.flat_map(|volume| {
			volume
				.chapters
				.iter()
				.filter(|chapter| read.contains(&chapter.id.to_string()))
				.map(move |chapter| ProgressBody {
					volume_id: if chapter.volume_id > 0 {
						chapter.volume_id
					} else {
						volume.id
					},
					chapter_id: chapter.id,
					page_num: chapter.pages,
					series_id: series.id,
					library_id: series.library_id,
					last_modified_utc: now.into(),
				})
		})
		.collect()
}

/// The newest chapter the reader has fully read, `None` when nothing is read
/// or the server can't be reached.
pub fn get_manga_progress(ctx: &Context, series_id: &str) -> Option<Chapter> {
	match net::get_json::<Vec<KavitaVolume>>(&Url::series_volumes(&ctx.api_url, series_id)) {
		Ok(volumes) => last_read_chapter(volumes),
		Err(err) => {
			println!("[kavita] Error fetching manga progress: {err:?}");
			None
		}
	}
}

pub fn last_read_chapter(volumes: Vec<KavitaVolume>) -> Option<Chapter> {
	let read = read_chapter_ids(&volumes);
	flatten_volumes(volumes)
		.into_iter()
		.find(|chapter| read.contains(&chapter.key))
}

/// Groups chapter ids by series, keeping the order series first appear in.
/// Actions without a chapter id are dropped.
pub fn group_read_actions(actions: Vec<ChapterReadAction>) -> Vec<(String, Vec<String>)> {
	let mut groups: Vec<(String, Vec<String>)> = Vec::new();
	for action in actions {
		let Some(chapter_id) = action.chapter_id.filter(|id| !id.is_empty()) else {
			println!(
				"[kavita] Skipping chapter read action without a chapter id for series {}",
				action.series_id
			);
			continue;
		};
		match groups.iter_mut().find(|(series_id, _)| *series_id == action.series_id) {
			Some((_, chapter_ids)) => chapter_ids.push(chapter_id),
			None => groups.push((action.series_id, Vec::from([chapter_id]))),
		}
	}
	groups
}

fn mark_multiple_body(series_id: &str, chapter_ids: &[String]) -> Option<MarkMultipleBody> {
	Some(MarkMultipleBody {
		series_id: series_id.parse().ok()?,
		chapter_ids: chapter_ids
			.iter()
			.map(|id| id.parse().ok())
			.collect::<Option<Vec<i32>>>()?,
	})
}

/// Marks queued chapters as read, one request per series.
pub fn process_chapter_read_actions(
	ctx: &Context,
	actions: Vec<ChapterReadAction>,
) -> ReadActionResult {
	let mut result = ReadActionResult::default();
	for (series_id, chapter_ids) in group_read_actions(actions) {
		let sent = match mark_multiple_body(&series_id, &chapter_ids) {
			Some(body) => net::post(&Url::mark_multiple_read(&ctx.api_url), &body),
			None => Err(AidokuError::message("Invalid series or chapter id")),
		};
		match sent {
			Ok(()) => result.successful.extend(chapter_ids),
			Err(err) => {
				println!("[kavita] Failed to mark chapters of series {series_id} as read: {err:?}");
				result.failed.extend(chapter_ids);
			}
		}
	}
	result
}

/// Short row label, e.g. `✓ Vol 2 Ch 14: The Hawk`.
pub fn chapter_label(chapter: &Chapter, read: bool) -> String {
	let mut label = String::new();
	if read {
		label.push_str("✓ ");
	}
	if let Some(volume) = chapter.volume_number {
		label.push_str(&format!("Vol {volume} "));
	}
	match chapter.chapter_number {
		Some(number) => label.push_str(&format!("Ch {number}")),
		None => label.push_str(&format!("Ch {}", chapter.key)),
	}
	if let Some(title) = chapter.title.as_deref().filter(|title| !title.is_empty()) {
		label.push_str(&format!(": {title}"));
	}
	label
}
