use aidoku::alloc::string::{String, ToString};
use chrono::{DateTime, NaiveDateTime, SecondsFormat};
use regex::Regex;
use spin::Lazy;

static TAG_RE: Lazy<Regex> = Lazy::new(|| {
	#[expect(clippy::unwrap_used)]
	Regex::new(r"<[^>]+>").unwrap()
});

static LINE_BREAK_RE: Lazy<Regex> = Lazy::new(|| {
	#[expect(clippy::unwrap_used)]
	Regex::new(r"(?i)<br\s*/?>|</p>").unwrap()
});

static EXTENSION_RE: Lazy<Regex> = Lazy::new(|| {
	#[expect(clippy::unwrap_used)]
	Regex::new(r"\.[A-Za-z0-9]{3,4}$").unwrap()
});

/// Kavita stores "no date" as the first day of year one.
const UNSET_DATE_PREFIX: &str = "0001-01-01";

/// Plain text of an HTML summary. Line breaks survive, every other tag is dropped.
pub fn strip_html(html: &str) -> String {
	let text = LINE_BREAK_RE.replace_all(html, "\n");
	let text = TAG_RE.replace_all(&text, "");
	text.replace("&nbsp;", " ")
		.replace("&quot;", "\"")
		.replace("&#39;", "'")
		.replace("&lt;", "<")
		.replace("&gt;", ">")
		.replace("&amp;", "&")
		.trim()
		.to_string()
}

/// File name without its extension, used for specials whose range is a file name.
pub fn strip_extension(name: &str) -> String {
	EXTENSION_RE.replace(name, "").to_string()
}

pub fn is_unset_date(date: &str) -> bool {
	date.trim().is_empty() || date.starts_with(UNSET_DATE_PREFIX)
}

/// Seconds since the epoch. Kavita answers with RFC 3339 for `*Utc` fields
/// and without an offset for local ones; both are read as UTC.
pub fn parse_date(date: &str) -> Option<i64> {
	if is_unset_date(date) {
		return None;
	}
	DateTime::parse_from_rfc3339(date)
		.map(|d| d.timestamp())
		.ok()
		.or_else(|| {
			NaiveDateTime::parse_from_str(date, "%Y-%m-%dT%H:%M:%S%.f")
				.ok()
				.map(|d| d.and_utc().timestamp())
		})
}

/// RFC 3339 timestamp in UTC with millisecond precision, as Kavita writes them.
pub fn format_date(timestamp: i64) -> String {
	DateTime::from_timestamp(timestamp, 0)
		.unwrap_or_default()
		.to_rfc3339_opts(SecondsFormat::Millis, true)
}
