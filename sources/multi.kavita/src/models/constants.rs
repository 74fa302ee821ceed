use aidoku::{ContentRating, MangaStatus};

/// Volume name of chapters that aren't part of a volume.
pub const LOOSE_VOLUME: &str = "-100000";
/// Chapter number of a file that only carries a volume.
pub const VOLUME_ONLY_CHAPTER: &str = "-100000";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LibraryType {
	Manga,
	Comic,
	Book,
	Image,
	LightNovel,
	Unknown,
}

impl From<i32> for LibraryType {
	fn from(value: i32) -> Self {
		match value {
			0 => Self::Manga,
			1 => Self::Comic,
			2 => Self::Book,
			3 => Self::Image,
			4 => Self::LightNovel,
			_ => Self::Unknown,
		}
	}
}

pub fn publication_status(status: i32) -> MangaStatus {
	match status {
		0 => MangaStatus::Ongoing,
		1 => MangaStatus::Hiatus,
		// 4 is "Ended", the series is complete but the count is unknown
		2 | 4 => MangaStatus::Completed,
		3 => MangaStatus::Cancelled,
		_ => MangaStatus::Unknown,
	}
}

pub fn content_rating(age_rating: i32) -> ContentRating {
	match age_rating {
		12..=14 => ContentRating::NSFW,
		9..=11 => ContentRating::Suggestive,
		2..=8 => ContentRating::Safe,
		_ => ContentRating::Unknown,
	}
}

/// Field of the `Series/all` filter body for a person role.
///
/// Writers and translators use the plural form there.
pub fn person_role_key(role: i32) -> Option<&'static str> {
	Some(match role {
		1 => "other",
		2 => "artist",
		3 => "writers",
		4 => "penciller",
		5 => "inker",
		6 => "colorist",
		7 => "letterer",
		8 => "coverArtist",
		9 => "editor",
		10 => "publisher",
		11 => "character",
		12 => "translators",
		_ => return None,
	})
}
