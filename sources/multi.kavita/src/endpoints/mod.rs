use aidoku::{
	alloc::{String, Vec},
	helpers::uri::encode_uri_component,
	prelude::*,
};

/// Name reported to the server when exchanging the API key for a token.
pub const PLUGIN_NAME: &str = "Aidoku";

/// URL builder for Kavita endpoints.
///
/// Every function takes the API root (`{server}/api`) except the web page
/// builders, which take the server address.
pub struct Url;

impl Url {
	pub fn libraries(api_url: &str) -> String {
		format!("{}/Library/libraries", Self::normalize_base(api_url))
	}

	/// `kind` is one of `genres`, `people` or `tags`.
	pub fn metadata(api_url: &str, kind: &str, library_ids: &[i32]) -> String {
		let base = format!("{}/Metadata/{kind}", Self::normalize_base(api_url));
		if library_ids.is_empty() {
			return base;
		}
		let ids = library_ids
			.iter()
			.map(|id| format!("{id}"))
			.collect::<Vec<_>>()
			.join(",");
		Self::append_query_params(base, &[("libraryIds", ids.as_str())])
	}

	/// Legacy filter endpoint, accepts a body of `{ field: [ids] }`.
	pub fn series_all(api_url: &str) -> String {
		format!("{}/Series/all", Self::normalize_base(api_url))
	}

	pub fn series_all_v2(
		api_url: &str,
		library_id: Option<&str>,
		page: i32,
		page_size: usize,
	) -> String {
		let base = format!("{}/Series/all-v2", Self::normalize_base(api_url));
		let page = format!("{page}");
		let page_size = format!("{page_size}");
		let mut params = Vec::new();
		if let Some(library_id) = library_id {
			params.push(("libraryId", library_id));
		}
		params.push(("PageNumber", page.as_str()));
		params.push(("PageSize", page_size.as_str()));
		Self::append_query_params(base, &params)
	}

	pub fn on_deck(api_url: &str, page: i32, page_size: usize) -> String {
		Self::paged(api_url, "Series/on-deck", page, page_size)
	}

	pub fn recently_updated_series(api_url: &str) -> String {
		format!(
			"{}/Series/recently-updated-series",
			Self::normalize_base(api_url)
		)
	}

	pub fn recently_added(api_url: &str, page: i32, page_size: usize) -> String {
		Self::paged(api_url, "Series/recently-added-v2", page, page_size)
	}

	pub fn series(api_url: &str, series_id: &str) -> String {
		format!("{}/Series/{series_id}", Self::normalize_base(api_url))
	}

	pub fn series_metadata(api_url: &str, series_id: &str) -> String {
		let base = format!("{}/Series/metadata", Self::normalize_base(api_url));
		Self::append_query_params(base, &[("seriesId", series_id)])
	}

	pub fn series_volumes(api_url: &str, series_id: &str) -> String {
		let base = format!("{}/Series/volumes", Self::normalize_base(api_url));
		Self::append_query_params(base, &[("seriesId", series_id)])
	}

	pub fn chapter(api_url: &str, chapter_id: &str) -> String {
		let base = format!("{}/Series/chapter", Self::normalize_base(api_url));
		Self::append_query_params(base, &[("chapterId", chapter_id)])
	}

	pub fn search(api_url: &str, query: &str) -> String {
		let base = format!("{}/Search/search", Self::normalize_base(api_url));
		let query = encode_uri_component(query);
		Self::append_query_params(base, &[("queryString", query.as_str())])
	}

	pub fn series_cover(api_url: &str, series_id: &str, api_key: &str) -> String {
		let base = format!("{}/image/series-cover", Self::normalize_base(api_url));
		Self::append_query_params(base, &[("seriesId", series_id), ("apiKey", api_key)])
	}

	pub fn reader_image(api_url: &str, chapter_id: &str, page: usize, api_key: &str) -> String {
		let base = format!("{}/Reader/image", Self::normalize_base(api_url));
		let page = format!("{page}");
		Self::append_query_params(
			base,
			&[
				("chapterId", chapter_id),
				("page", page.as_str()),
				("apiKey", api_key),
				("extractPdf", "true"),
			],
		)
	}

	pub fn mark_read(api_url: &str) -> String {
		format!("{}/Reader/mark-read", Self::normalize_base(api_url))
	}

	pub fn mark_unread(api_url: &str) -> String {
		format!("{}/Reader/mark-unread", Self::normalize_base(api_url))
	}

	pub fn mark_multiple_read(api_url: &str) -> String {
		format!("{}/Reader/mark-multiple-read", Self::normalize_base(api_url))
	}

	pub fn progress(api_url: &str) -> String {
		format!("{}/Reader/progress", Self::normalize_base(api_url))
	}

	pub fn authenticate(api_url: &str, api_key: &str) -> String {
		let base = format!("{}/Plugin/authenticate", Self::normalize_base(api_url));
		let api_key = encode_uri_component(api_key);
		Self::append_query_params(base, &[("apiKey", api_key.as_str()), ("pluginName", PLUGIN_NAME)])
	}

	/// Web page of a series.
	pub fn series_page(base_url: &str, library_id: i32, series_id: &str) -> String {
		format!(
			"{}/library/{library_id}/series/{series_id}",
			Self::normalize_base(base_url)
		)
	}

	fn paged(api_url: &str, path: &str, page: i32, page_size: usize) -> String {
		let base = format!("{}/{path}", Self::normalize_base(api_url));
		let page = format!("{page}");
		let page_size = format!("{page_size}");
		Self::append_query_params(
			base,
			&[("PageNumber", page.as_str()), ("PageSize", page_size.as_str())],
		)
	}

	fn normalize_base(base_url: &str) -> &str {
		base_url.trim_end_matches('/')
	}

	fn append_query_params(base_url: String, params: &[(&str, &str)]) -> String {
		if params.is_empty() {
			return base_url;
		}

		let query_string = params
			.iter()
			.map(|(key, value)| format!("{key}={value}"))
			.collect::<Vec<_>>()
			.join("&");

		format!("{base_url}?{query_string}")
	}
}

#[cfg(test)]
mod test;
