use aidoku::{
	AidokuError, FilterItem, HomeComponent, HomeComponentValue, HomeLayout, HomePartialResult,
	Link, Listing, ListingKind, Manga, MangaPageResult, MangaWithChapter, Result,
	alloc::{String, Vec, string::ToString},
	imports::std::send_partial_result,
};

use crate::{
	context::Context,
	endpoints::Url,
	models::{common::KavitaLibrary, responses::KavitaRecentlyUpdated, series::KavitaSeries},
	net,
	search::{self, all_series_filter},
	settings,
};

pub const ON_DECK_ID: &str = "on_deck";
pub const RECENTLY_ADDED_ID: &str = "recently_added";

const ON_DECK_TITLE: &str = "On Deck";
const LATEST_TITLE: &str = "Latest Updates";
const RECENTLY_ADDED_TITLE: &str = "Recently Added";
const GENRES_TITLE: &str = "Genres";
const TAGS_TITLE: &str = "Tags";

/// Which optional sections the user turned on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sections {
	pub on_deck: bool,
	pub recently_updated: bool,
	pub newly_added: bool,
}

impl Sections {
	pub fn from_settings() -> Self {
		Self {
			on_deck: settings::get_show_on_deck(),
			recently_updated: settings::get_show_recently_updated(),
			newly_added: settings::get_show_newly_added(),
		}
	}
}

pub fn get_home(ctx: &Context) -> Result<HomeLayout> {
	let sections = Sections::from_settings();
	let libraries = search::get_libraries(ctx)?;

	send_partial_result(&HomePartialResult::Layout(initial_layout(
		sections, &libraries,
	)));

	if sections.on_deck {
		let entries = on_deck(ctx, 1)?
			.into_iter()
			.map(|series| series.into_manga(ctx))
			.collect::<Vec<Manga>>();
		send_component(
			ON_DECK_TITLE,
			HomeComponentValue::BigScroller {
				entries,
				auto_scroll_interval: Some(5.0),
			},
		);
	}

	if sections.recently_updated {
		let entries = recently_updated(ctx)?;
		send_component(
			LATEST_TITLE,
			HomeComponentValue::MangaChapterList {
				page_size: None,
				entries,
				listing: None,
			},
		);
	}

	if sections.newly_added {
		let entries = recently_added(ctx, 1)?
			.into_iter()
			.map(|series| series.into_link(ctx))
			.collect::<Vec<Link>>();
		send_component(
			RECENTLY_ADDED_TITLE,
			HomeComponentValue::Scroller {
				entries,
				listing: Some(listing(RECENTLY_ADDED_ID, RECENTLY_ADDED_TITLE)),
			},
		);
	}

	let (genres, tags) = tag_chips(ctx, &libraries)?;
	send_component(GENRES_TITLE, HomeComponentValue::Filters(genres));
	send_component(TAGS_TITLE, HomeComponentValue::Filters(tags));

	for library in libraries {
		let library_id = library.id.to_string();
		let entries = library_series(ctx, &library_id, 1)?
			.into_iter()
			.map(|series| series.into_link(ctx))
			.collect::<Vec<Link>>();
		send_component(
			&library.name,
			HomeComponentValue::Scroller {
				entries,
				listing: Some(listing(&library_id, &library.name)),
			},
		);
	}

	Ok(HomeLayout::default())
}

/// Placeholder components, in the order the sections are filled in.
pub fn initial_layout(sections: Sections, libraries: &[KavitaLibrary]) -> HomeLayout {
	let mut components = Vec::new();

	if sections.on_deck {
		components.push(component(
			ON_DECK_TITLE,
			HomeComponentValue::empty_big_scroller(),
		));
	}
	if sections.recently_updated {
		components.push(component(
			LATEST_TITLE,
			HomeComponentValue::empty_manga_chapter_list(),
		));
	}
	if sections.newly_added {
		components.push(component(
			RECENTLY_ADDED_TITLE,
			HomeComponentValue::empty_scroller(),
		));
	}
	components.push(component(
		GENRES_TITLE,
		HomeComponentValue::Filters(Vec::new()),
	));
	components.push(component(TAGS_TITLE, HomeComponentValue::Filters(Vec::new())));
	for library in libraries {
		components.push(component(
			&library.name,
			HomeComponentValue::empty_scroller(),
		));
	}

	HomeLayout { components }
}

pub fn get_manga_list(ctx: &Context, listing: &Listing, page: i32) -> Result<MangaPageResult> {
	let series = match listing.id.as_str() {
		ON_DECK_ID => on_deck(ctx, page)?,
		RECENTLY_ADDED_ID => recently_added(ctx, page)?,
		id if id.parse::<i32>().is_ok() => library_series(ctx, id, page)?,
		_ => return Err(AidokuError::message("Unknown listing")),
	};

	let has_next_page = series.len() >= ctx.page_size;
	Ok(MangaPageResult {
		entries: series
			.into_iter()
			.map(|series| series.into_manga(ctx))
			.collect(),
		has_next_page,
	})
}

pub fn get_dynamic_listings(ctx: &Context) -> Result<Vec<Listing>> {
	Ok(search::get_libraries(ctx)?
		.into_iter()
		.map(|library| listing(&library.id.to_string(), &library.name))
		.collect())
}

fn on_deck(ctx: &Context, page: i32) -> Result<Vec<KavitaSeries>> {
	let url = Url::on_deck(&ctx.api_url, page.max(1), ctx.page_size);
	net::post_json(&url, &all_series_filter())
}

fn recently_added(ctx: &Context, page: i32) -> Result<Vec<KavitaSeries>> {
	let url = Url::recently_added(&ctx.api_url, page.max(1), ctx.page_size);
	net::post_json(&url, &all_series_filter())
}

fn library_series(ctx: &Context, library_id: &str, page: i32) -> Result<Vec<KavitaSeries>> {
	let url = Url::series_all_v2(&ctx.api_url, Some(library_id), page.max(1), ctx.page_size);
	net::post_json(&url, &all_series_filter())
}

fn recently_updated(ctx: &Context) -> Result<Vec<MangaWithChapter>> {
	let items: Vec<KavitaRecentlyUpdated> =
		net::post_json(&Url::recently_updated_series(&ctx.api_url), &all_series_filter())?;
	Ok(items
		.into_iter()
		.map(|item| item.into_manga_with_chapter(ctx))
		.collect())
}

fn tag_chips(
	ctx: &Context,
	libraries: &[KavitaLibrary],
) -> Result<(Vec<FilterItem>, Vec<FilterItem>)> {
	let mut genres = Vec::new();
	let mut tags = Vec::new();
	for section in search::get_search_tags(ctx, libraries)? {
		match section.id {
			search::GENRES => genres = section.into_filter_items(),
			search::TAGS => tags = section.into_filter_items(),
			_ => {}
		}
	}
	Ok((genres, tags))
}

fn listing(id: &str, name: &str) -> Listing {
	Listing {
		id: id.to_string(),
		name: name.to_string(),
		kind: ListingKind::Default,
	}
}

fn component(title: &str, value: HomeComponentValue) -> HomeComponent {
	HomeComponent {
		title: Some(String::from(title)),
		subtitle: None,
		value,
	}
}

fn send_component(title: &str, value: HomeComponentValue) {
	send_partial_result(&HomePartialResult::Component(component(title, value)));
}

#[cfg(test)]
mod test {
	use super::*;
	use aidoku::alloc::vec;
	use aidoku_test::aidoku_test;

	fn library(id: i32, name: &str) -> KavitaLibrary {
		KavitaLibrary {
			id,
			name: name.into(),
			library_type: 0,
		}
	}

	fn titles(layout: &HomeLayout) -> Vec<&str> {
		layout
			.components
			.iter()
			.filter_map(|component| component.title.as_deref())
			.collect()
	}

	#[aidoku_test]
	fn layout_follows_toggles() {
		let libraries = vec![library(1, "Manga"), library(3, "Comics")];
		let all = Sections {
			on_deck: true,
			recently_updated: true,
			newly_added: true,
		};
		assert_eq!(
			titles(&initial_layout(all, &libraries)),
			[
				"On Deck",
				"Latest Updates",
				"Recently Added",
				"Genres",
				"Tags",
				"Manga",
				"Comics"
			]
		);

		let none = Sections {
			on_deck: false,
			recently_updated: false,
			newly_added: false,
		};
		assert_eq!(
			titles(&initial_layout(none, &libraries)),
			["Genres", "Tags", "Manga", "Comics"]
		);
	}

	#[aidoku_test]
	fn listings_point_at_libraries() {
		let listing = listing("3", "Comics");
		assert_eq!(listing.id, "3");
		assert_eq!(listing.name, "Comics");
		assert!(matches!(listing.kind, ListingKind::Default));
	}

	#[aidoku_test]
	fn unknown_listing_is_an_error() {
		let result = get_manga_list(&Context::demo(), &listing("popular", "Popular"), 1);
		assert!(result.is_err());
	}
}
