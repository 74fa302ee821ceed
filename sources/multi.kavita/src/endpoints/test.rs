use super::*;
use aidoku_test::aidoku_test;

const TEST_API_URL: &str = "https://demo.kavitareader.com/api";

#[aidoku_test]
fn basic_urls() {
	assert_eq!(
		Url::libraries(TEST_API_URL),
		"https://demo.kavitareader.com/api/Library/libraries"
	);

	assert_eq!(
		Url::series(TEST_API_URL, "12"),
		"https://demo.kavitareader.com/api/Series/12"
	);

	assert_eq!(
		Url::series_metadata(TEST_API_URL, "12"),
		"https://demo.kavitareader.com/api/Series/metadata?seriesId=12"
	);

	assert_eq!(
		Url::series_volumes(TEST_API_URL, "12"),
		"https://demo.kavitareader.com/api/Series/volumes?seriesId=12"
	);

	assert_eq!(
		Url::chapter(TEST_API_URL, "301"),
		"https://demo.kavitareader.com/api/Series/chapter?chapterId=301"
	);

	assert_eq!(
		Url::series_all(TEST_API_URL),
		"https://demo.kavitareader.com/api/Series/all"
	);

	assert_eq!(
		Url::recently_updated_series(TEST_API_URL),
		"https://demo.kavitareader.com/api/Series/recently-updated-series"
	);
}

#[aidoku_test]
fn reader_urls() {
	assert_eq!(
		Url::mark_read(TEST_API_URL),
		"https://demo.kavitareader.com/api/Reader/mark-read"
	);
	assert_eq!(
		Url::mark_unread(TEST_API_URL),
		"https://demo.kavitareader.com/api/Reader/mark-unread"
	);
	assert_eq!(
		Url::mark_multiple_read(TEST_API_URL),
		"https://demo.kavitareader.com/api/Reader/mark-multiple-read"
	);
	assert_eq!(
		Url::progress(TEST_API_URL),
		"https://demo.kavitareader.com/api/Reader/progress"
	);
}

#[aidoku_test]
fn trailing_slash_is_normalized() {
	assert_eq!(
		Url::libraries("https://demo.kavitareader.com/api/"),
		"https://demo.kavitareader.com/api/Library/libraries"
	);
	assert_eq!(
		Url::series_page("https://demo.kavitareader.com/", 2, "12"),
		"https://demo.kavitareader.com/library/2/series/12"
	);
}

#[aidoku_test]
fn metadata_library_filter() {
	assert_eq!(
		Url::metadata(TEST_API_URL, "genres", &[]),
		"https://demo.kavitareader.com/api/Metadata/genres"
	);
	assert_eq!(
		Url::metadata(TEST_API_URL, "people", &[1, 3, 4]),
		"https://demo.kavitareader.com/api/Metadata/people?libraryIds=1,3,4"
	);
}

#[aidoku_test]
fn paged_urls() {
	assert_eq!(
		Url::on_deck(TEST_API_URL, 1, 20),
		"https://demo.kavitareader.com/api/Series/on-deck?PageNumber=1&PageSize=20"
	);
	assert_eq!(
		Url::recently_added(TEST_API_URL, 3, 40),
		"https://demo.kavitareader.com/api/Series/recently-added-v2?PageNumber=3&PageSize=40"
	);
	assert_eq!(
		Url::series_all_v2(TEST_API_URL, None, 2, 20),
		"https://demo.kavitareader.com/api/Series/all-v2?PageNumber=2&PageSize=20"
	);
	assert_eq!(
		Url::series_all_v2(TEST_API_URL, Some("5"), 1, 20),
		"https://demo.kavitareader.com/api/Series/all-v2?libraryId=5&PageNumber=1&PageSize=20"
	);
}

#[aidoku_test]
fn image_urls() {
	assert_eq!(
		Url::series_cover(TEST_API_URL, "12", "key"),
		"https://demo.kavitareader.com/api/image/series-cover?seriesId=12&apiKey=key"
	);
	assert_eq!(
		Url::reader_image(TEST_API_URL, "301", 4, "key"),
		"https://demo.kavitareader.com/api/Reader/image?chapterId=301&page=4&apiKey=key&extractPdf=true"
	);
}

#[aidoku_test]
fn user_input_is_encoded() {
	assert_eq!(
		Url::search(TEST_API_URL, "one piece"),
		"https://demo.kavitareader.com/api/Search/search?queryString=one%20piece"
	);
	assert_eq!(
		Url::authenticate(TEST_API_URL, "abc-123"),
		"https://demo.kavitareader.com/api/Plugin/authenticate?apiKey=abc-123&pluginName=Aidoku"
	);
}
