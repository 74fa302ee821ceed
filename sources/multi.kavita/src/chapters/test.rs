use super::*;
use aidoku::alloc::vec;
use aidoku_test::aidoku_test;

fn chapter(id: i32, number: &str, range: &str) -> KavitaChapter {
	KavitaChapter {
		id,
		number: number.into(),
		range: range.into(),
		pages: 20,
		release_date: "0001-01-01T00:00:00".into(),
		created: "2024-01-02T03:04:05".into(),
		..Default::default()
	}
}

fn special(id: i32, range: &str) -> KavitaChapter {
	KavitaChapter {
		is_special: true,
		..chapter(id, "0", range)
	}
}

fn volume(name: &str, chapters: Vec<KavitaChapter>) -> KavitaVolume {
	KavitaVolume {
		name: name.into(),
		chapters,
		..Default::default()
	}
}

fn keys(chapters: &[Chapter]) -> Vec<&str> {
	chapters.iter().map(|chapter| chapter.key.as_str()).collect()
}

#[aidoku_test]
fn regular_chapters_newest_first_then_specials() {
	let chapters = flatten_volumes(vec![
		volume(
			"1",
			vec![chapter(1, "1", "1"), special(2, "Omake.cbz"), chapter(3, "2", "2")],
		),
		volume(LOOSE_VOLUME, vec![chapter(4, "3", "3"), special(5, "Artbook.epub")]),
	]);

	assert_eq!(keys(&chapters), ["4", "3", "1", "2", "5"]);

	assert_eq!(chapters[0].volume_number, None);
	assert_eq!(chapters[1].volume_number, Some(1.0));
	assert_eq!(chapters[1].chapter_number, Some(2.0));

	assert_eq!(chapters[3].title.as_deref(), Some("Omake"));
	assert_eq!(chapters[3].chapter_number, Some(1.0));
	assert_eq!(chapters[3].volume_number, None);
	assert_eq!(chapters[4].title.as_deref(), Some("Artbook"));
	assert_eq!(chapters[4].chapter_number, Some(2.0));
}

#[aidoku_test]
fn volume_only_files_count_as_chapter_one() {
	let chapters = flatten_volumes(vec![
		volume("1", vec![chapter(1, VOLUME_ONLY_CHAPTER, "Vol 1")]),
		volume("2", vec![chapter(2, VOLUME_ONLY_CHAPTER, "Vol 2")]),
	]);

	assert_eq!(keys(&chapters), ["2", "1"]);
	assert!(chapters.iter().all(|chapter| chapter.chapter_number == Some(1.0)));
	assert_eq!(chapters[0].volume_number, Some(2.0));
}

#[aidoku_test]
fn chapter_names() {
	let mut plain = chapter(1, "5", "5");
	assert_eq!(plain.display_name(), None);
	plain.title_name = Some("The Hawk".into());
	assert_eq!(plain.display_name().as_deref(), Some("The Hawk"));

	let mut ranged = chapter(2, "5", "5-6");
	assert_eq!(ranged.display_name().as_deref(), Some("6"));
	ranged.title_name = Some("Double".into());
	assert_eq!(ranged.display_name().as_deref(), Some("6 - Double"));
}

#[aidoku_test]
fn version_labels() {
	let mut unread = chapter(1, "1", "1");
	assert_eq!(unread.version_label(), "20 pages");

	unread.pages_read = 7;
	assert_eq!(unread.version_label(), "20 pages · Reading 7 page");

	unread.pages_read = 20;
	assert_eq!(unread.version_label(), "20 pages · Read");

	assert_eq!(special(2, "Extra.cbz").version_label(), "Specials · 20 pages");
}

#[aidoku_test]
fn chapter_metadata() {
	let mut released = chapter(1, "1", "1");
	released.release_date = "2023-06-01T00:00:00".into();
	released.language = Some("ja".into());

	let chapters = flatten_volumes(vec![volume("1", vec![released, chapter(2, "2", "2")])]);

	// unset release date falls back to the creation date
	assert_eq!(chapters[0].date_uploaded, Some(1704164645));
	assert_eq!(chapters[0].language.as_deref(), Some("en"));
	assert_eq!(chapters[1].date_uploaded, Some(1685577600));
	assert_eq!(chapters[1].language.as_deref(), Some("ja"));
	assert_eq!(chapters[1].scanlators, Some(vec!["20 pages".into()]));
}

#[aidoku_test]
fn reader_page_urls() {
	let urls = page_urls("https://demo.kavitareader.com/api", "301", 3, "key");
	assert_eq!(
		urls,
		[
			"https://demo.kavitareader.com/api/Reader/image?chapterId=301&page=0&apiKey=key&extractPdf=true",
			"https://demo.kavitareader.com/api/Reader/image?chapterId=301&page=1&apiKey=key&extractPdf=true",
			"https://demo.kavitareader.com/api/Reader/image?chapterId=301&page=2&apiKey=key&extractPdf=true",
		]
	);
	assert_eq!(into_pages(urls).len(), 3);
	assert!(page_urls("https://demo.kavitareader.com/api", "301", 0, "key").is_empty());
}

#[aidoku_test]
fn update_check() {
	let latest = Some("2024-05-01T10:00:00");

	assert!(needs_update(latest, None, None, None));
	assert!(needs_update(latest, Some("2024-04-01T10:00:00"), None, None));
	assert!(!needs_update(latest, latest, None, None));
	assert!(!needs_update(None, None, None, None));
	assert!(!needs_update(Some(""), None, None, None));

	// unread chapters hold the refresh back, but only with a known chapter count
	assert!(!needs_update(latest, None, Some(2), Some(10)));
	assert!(needs_update(latest, None, Some(2), None));
	assert!(needs_update(latest, None, Some(0), Some(10)));
}
