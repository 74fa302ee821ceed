use aidoku::{
	AidokuError,
	alloc::string::{String, ToString},
	imports::defaults::{DefaultValue, defaults_get, defaults_set},
	prelude::{bail, format},
};

const BASE_URL_KEY: &str = "baseUrl";
const API_KEY_KEY: &str = "apiKey";
const PAGE_SIZE_KEY: &str = "pageSize";
const RECURSIVE_SEARCH_KEY: &str = "enableRecursiveSearch";
const SHOW_ON_DECK_KEY: &str = "showOnDeck";
const SHOW_RECENTLY_UPDATED_KEY: &str = "showRecentlyUpdated";
const SHOW_NEWLY_ADDED_KEY: &str = "showNewlyAdded";
const TOKEN_KEY: &str = "kavita.token";
const UPDATE_MARKER_PREFIX: &str = "kavita.latest.";

pub const DEFAULT_PAGE_SIZE: usize = 20;

fn set_defaults_string(key: &str, value: &str) {
	defaults_set(
		key,
		if value.is_empty() {
			DefaultValue::Null
		} else {
			DefaultValue::String(value.into())
		},
	);
}

/// Server address without a trailing slash.
pub fn get_base_url() -> Result<String, AidokuError> {
	match defaults_get::<String>(BASE_URL_KEY) {
		Some(url) if !url.trim().is_empty() => Ok(url.trim().trim_end_matches('/').to_string()),
		_ => bail!("Missing server URL: configure in settings"),
	}
}

/// Root of the REST API.
pub fn get_api_url() -> Result<String, AidokuError> {
	Ok(get_base_url()? + "/api")
}

#[cfg(test)]
pub fn set_base_url(url: &str) {
	set_defaults_string(BASE_URL_KEY, url);
}

pub fn get_api_key() -> String {
	defaults_get::<String>(API_KEY_KEY)
		.map(|key| key.trim().to_string())
		.unwrap_or_default()
}

#[cfg(test)]
pub fn set_api_key(key: &str) {
	set_defaults_string(API_KEY_KEY, key);
}

/// The page size is a free text field, anything that isn't a positive number falls back to the default.
pub fn get_page_size() -> usize {
	defaults_get::<String>(PAGE_SIZE_KEY)
		.and_then(|size| size.trim().parse::<usize>().ok())
		.filter(|size| *size > 0)
		.unwrap_or(DEFAULT_PAGE_SIZE)
}

#[cfg(test)]
pub fn set_page_size(size: &str) {
	set_defaults_string(PAGE_SIZE_KEY, size);
}

pub fn get_enable_recursive_search() -> bool {
	defaults_get::<bool>(RECURSIVE_SEARCH_KEY).unwrap_or(false)
}

pub fn get_show_on_deck() -> bool {
	defaults_get::<bool>(SHOW_ON_DECK_KEY).unwrap_or(true)
}

pub fn get_show_recently_updated() -> bool {
	defaults_get::<bool>(SHOW_RECENTLY_UPDATED_KEY).unwrap_or(true)
}

pub fn get_show_newly_added() -> bool {
	defaults_get::<bool>(SHOW_NEWLY_ADDED_KEY).unwrap_or(true)
}

pub fn get_token() -> Option<String> {
	defaults_get::<String>(TOKEN_KEY).filter(|token| !token.is_empty())
}

pub fn set_token(token: &str) {
	set_defaults_string(TOKEN_KEY, token);
}

pub fn clear_token() {
	defaults_set(TOKEN_KEY, DefaultValue::Null);
}

/// Latest change seen for a series, compared against the server to skip
/// unchanged chapter lists.
pub fn get_update_marker(series_id: &str) -> Option<String> {
	defaults_get::<String>(&format!("{UPDATE_MARKER_PREFIX}{series_id}"))
		.filter(|marker| !marker.is_empty())
}

pub fn set_update_marker(series_id: &str, marker: &str) {
	set_defaults_string(&format!("{UPDATE_MARKER_PREFIX}{series_id}"), marker);
}
