#![no_std]
extern crate alloc;

use aidoku::{
	BaseUrlProvider, Chapter, DeepLinkHandler, DeepLinkResult, DynamicFilters, DynamicListings,
	DynamicSettings, Filter, FilterValue, GroupSetting, Home, HomeLayout, ImageRequestProvider,
	Listing, ListingProvider, Manga, MangaPageResult, NotificationHandler, Page, PageContext,
	Result, Setting, Source,
	alloc::{String, Vec},
	imports::{net::Request, std::send_partial_result},
	prelude::*,
};

mod chapters;
mod context;
mod endpoints;
mod helpers;
mod home;
mod models;
mod net;
mod progress;
mod search;
mod settings;

use context::Context;
use endpoints::Url;
use models::{
	series::{KavitaMetadataResponse, KavitaSeries},
	volume::{KavitaChapter, KavitaVolume},
};

const SERVER_CHANGED: &str = "kavita.serverChanged";

struct Kavita;

impl Source for Kavita {
	fn new() -> Self {
		Self
	}

	fn get_search_manga_list(
		&self,
		query: Option<String>,
		page: i32,
		filters: Vec<FilterValue>,
	) -> Result<MangaPageResult> {
		let ctx = Context::new()?;
		search::get_search_results(&ctx, query, page, filters)
	}

	fn get_manga_update(
		&self,
		mut manga: Manga,
		needs_details: bool,
		needs_chapters: bool,
	) -> Result<Manga> {
		let ctx = Context::new()?;
		let series: KavitaSeries = net::get_json(&Url::series(&ctx.api_url, &manga.key))?;
		let latest = series.last_chapter_added.clone();

		if needs_details {
			let metadata: KavitaMetadataResponse =
				net::get_json(&Url::series_metadata(&ctx.api_url, &manga.key))?;
			manga.copy_from(series.into_manga_details(metadata.into(), &ctx));

			if needs_chapters {
				send_partial_result(&manga);
			}
		}

		if needs_chapters {
			let stored = settings::get_update_marker(&manga.key);
			let has_chapters = manga.chapters.as_ref().is_some_and(|c| !c.is_empty());
			let unchanged =
				!chapters::needs_update(Some(&latest), stored.as_deref(), None, None);

			if has_chapters && !needs_details && unchanged {
				println!("[kavita] Series {} unchanged, keeping chapters", manga.key);
			} else {
				let volumes: Vec<KavitaVolume> =
					net::get_json(&Url::series_volumes(&ctx.api_url, &manga.key))?;
				let read = progress::read_chapter_ids(&volumes);
				let chapters = chapters::flatten_volumes(volumes);

				let stats = progress::ChapterStats::new(&chapters, &read, None, None, None);
				println!(
					"[kavita] Series {}: {} chapters, {} unread, {} new",
					manga.key, stats.total, stats.unread, stats.new
				);

				if !latest.is_empty() {
					settings::set_update_marker(&manga.key, &latest);
				}
				manga.chapters = Some(chapters);
			}
		}

		Ok(manga)
	}

	fn get_page_list(&self, _manga: Manga, chapter: Chapter) -> Result<Vec<Page>> {
		let ctx = Context::new()?;
		let details: KavitaChapter = net::get_json(&Url::chapter(&ctx.api_url, &chapter.key))?;
		let pages = usize::try_from(details.pages).unwrap_or_default();
		Ok(chapters::into_pages(chapters::page_urls(
			&ctx.api_url,
			&chapter.key,
			pages,
			&ctx.api_key,
		)))
	}
}

impl Home for Kavita {
	fn get_home(&self) -> Result<HomeLayout> {
		home::get_home(&Context::new()?)
	}
}

impl ListingProvider for Kavita {
	fn get_manga_list(&self, listing: Listing, page: i32) -> Result<MangaPageResult> {
		home::get_manga_list(&Context::new()?, &listing, page)
	}
}

impl DynamicListings for Kavita {
	fn get_dynamic_listings(&self) -> Result<Vec<Listing>> {
		home::get_dynamic_listings(&Context::new()?)
	}
}

impl DynamicFilters for Kavita {
	fn get_dynamic_filters(&self) -> Result<Vec<Filter>> {
		search::get_search_filters(&Context::new()?)
	}
}

impl DynamicSettings for Kavita {
	fn get_dynamic_settings(&self) -> Result<Vec<Setting>> {
		let base_url = settings::get_base_url().ok();
		let signed_in = base_url.is_some() && net::is_server_available();
		let footer = status_footer(base_url.as_deref(), signed_in);

		Ok(Vec::from([GroupSetting {
			key: "status".into(),
			title: "Status".into(),
			items: Vec::new(),
			footer: Some(footer.into()),
			..Default::default()
		}
		.into()]))
	}
}

impl ImageRequestProvider for Kavita {
	fn get_image_request(&self, url: String, _context: Option<PageContext>) -> Result<Request> {
		net::image_request(&url)
	}
}

impl BaseUrlProvider for Kavita {
	fn get_base_url(&self) -> Result<String> {
		settings::get_base_url()
	}
}

impl DeepLinkHandler for Kavita {
	fn handle_deep_link(&self, url: String) -> Result<Option<DeepLinkResult>> {
		Ok(parse_deep_link(&url))
	}
}

impl NotificationHandler for Kavita {
	fn handle_notification(&self, notification: String) {
		if notification == SERVER_CHANGED {
			net::clear_authorization();
		}
	}
}

/// A cached token counts as signed in, the server itself isn't contacted.
fn status_footer(base_url: Option<&str>, signed_in: bool) -> String {
	match base_url {
		None => String::from("Not configured"),
		Some(url) if signed_in => format!("Signed in to {url}"),
		Some(url) => format!("Not signed in to {url}: check the server URL and API key"),
	}
}

/// Reads `/library/{l}/series/{s}` and `/library/{l}/series/{s}/manga/{c}` web links.
fn parse_deep_link(url: &str) -> Option<DeepLinkResult> {
	let path = url.split(['?', '#']).next()?;
	let mut segments = path.split('/').skip_while(|segment| *segment != "library");

	segments.next()?;
	segments.next()?.parse::<i32>().ok()?;
	if segments.next()? != "series" {
		return None;
	}
	let manga_key = segments.next()?;
	manga_key.parse::<i32>().ok()?;

	match (segments.next(), segments.next()) {
		(Some("manga"), Some(key)) if key.parse::<i32>().is_ok() => Some(DeepLinkResult::Chapter {
			manga_key: manga_key.into(),
			key: key.into(),
		}),
		(None, _) | (Some(""), _) => Some(DeepLinkResult::Manga {
			key: manga_key.into(),
		}),
		_ => None,
	}
}

register_source!(
	Kavita,
	Home,
	ListingProvider,
	DynamicListings,
	DynamicFilters,
	DynamicSettings,
	ImageRequestProvider,
	BaseUrlProvider,
	DeepLinkHandler,
	NotificationHandler
);
