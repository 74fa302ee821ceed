use aidoku::{
	Chapter,
	alloc::{String, Vec, string::ToString},
};

use crate::models::volume::KavitaVolume;

// The host has no tracker hooks yet, nothing outside the tests calls into it.
#[allow(dead_code)]
pub mod sync;

/// Ids of the chapters the server reports as fully read.
pub fn read_chapter_ids(volumes: &[KavitaVolume]) -> Vec<String> {
	volumes
		.iter()
		.flat_map(|volume| volume.chapters.iter())
		.filter(|chapter| chapter.is_read())
		.map(|chapter| chapter.id.to_string())
		.collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChapterStats {
	pub total: usize,
	pub unread: usize,
	pub new: usize,
}

impl ChapterStats {
	/// Counts reported by the host win when positive, otherwise they are
	/// derived from the chapter list and the read ids.
	pub fn new(
		chapters: &[Chapter],
		read: &[String],
		known_total: Option<usize>,
		known_unread: Option<usize>,
		known_new: Option<usize>,
	) -> Self {
		let unread_in_list = chapters
			.iter()
			.filter(|chapter| !read.contains(&chapter.key))
			.count();
		Self {
			total: known_total.filter(|n| *n > 0).unwrap_or(chapters.len()),
			unread: known_unread.filter(|n| *n > 0).unwrap_or(unread_in_list),
			new: known_new.filter(|n| *n > 0).unwrap_or(unread_in_list),
		}
	}
}
