use aidoku::{
	Filter, FilterItem, FilterValue, Manga, MangaPageResult, MultiSelectFilter, Result,
	SelectFilter,
	alloc::{String, Vec, string::ToString, vec},
	prelude::*,
};
use core::fmt;
use serde_json::{Value, json};

use crate::{
	context::Context,
	endpoints::Url,
	models::{
		common::{KavitaLibrary, KavitaPerson, KavitaTag},
		constants::person_role_key,
		search::KavitaSearchResponse,
		series::KavitaSeries,
	},
	net, settings,
};

pub const INCLUDE_OPERATOR_ID: &str = "includeOperator";
pub const EXCLUDE_OPERATOR_ID: &str = "excludeOperator";

pub const GENRES: &str = "genres";
pub const PEOPLE: &str = "people";
pub const TAGS: &str = "tags";

/// Option id of a tag filter: `genres-{id}`, `tags-{id}` or `people-{role}.{id}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagId {
	Genre(i32),
	Tag(i32),
	Person { role: i32, id: i32 },
}

impl TagId {
	pub fn parse(value: &str) -> Option<Self> {
		let (kind, rest) = value.split_once('-')?;
		match kind {
			GENRES => rest.parse().ok().map(Self::Genre),
			TAGS => rest.parse().ok().map(Self::Tag),
			PEOPLE => {
				let (role, id) = rest.split_once('.')?;
				Some(Self::Person {
					role: role.parse().ok()?,
					id: id.parse().ok()?,
				})
			}
			_ => None,
		}
	}

	/// `Series/all` bodies matching this tag. A person matches under every
	/// role a person of the same name holds.
	pub fn filter_bodies(&self, people: &[KavitaPerson]) -> Vec<Value> {
		match *self {
			Self::Genre(id) => vec![json!({ GENRES: [id] })],
			Self::Tag(id) => vec![json!({ TAGS: [id] })],
			Self::Person { role, id } => {
				let name = people
					.iter()
					.find(|person| person.id == id && person.role == role)
					.map(|person| person.name.as_str());

				let mut bodies: Vec<Value> = people
					.iter()
					.filter(|person| Some(person.name.as_str()) == name)
					.filter_map(|person| {
						person_role_key(person.role).map(|key| json!({ key: [person.id] }))
					})
					.collect();
				if bodies.is_empty()
					&& let Some(key) = person_role_key(role)
				{
					bodies.push(json!({ key: [id] }));
				}
				bodies
			}
		}
	}
}

impl fmt::Display for TagId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Genre(id) => write!(f, "{GENRES}-{id}"),
			Self::Tag(id) => write!(f, "{TAGS}-{id}"),
			Self::Person { role, id } => write!(f, "{PEOPLE}-{role}.{id}"),
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Operator {
	#[default]
	And,
	Or,
}

impl Operator {
	fn parse(value: &str) -> Self {
		if value.eq_ignore_ascii_case("OR") {
			Self::Or
		} else {
			Self::And
		}
	}
}

#[derive(Debug, Clone, PartialEq)]
pub struct TagSection {
	pub id: &'static str,
	pub title: &'static str,
	pub tags: Vec<(String, TagId)>,
}

impl TagSection {
	pub fn from_tags(id: &'static str, tags: Vec<KavitaTag>) -> Self {
		let make_id = if id == GENRES { TagId::Genre } else { TagId::Tag };
		Self {
			id,
			title: section_title(id),
			tags: tags
				.into_iter()
				.map(|tag| (tag.title, make_id(tag.id)))
				.collect(),
		}
	}

	/// People repeat once per role, only the first role of a name is kept.
	pub fn from_people(people: Vec<KavitaPerson>) -> Self {
		let mut tags: Vec<(String, TagId)> = Vec::new();
		for person in people {
			if tags.iter().any(|(name, _)| *name == person.name) {
				continue;
			}
			let id = TagId::Person {
				role: person.role,
				id: person.id,
			};
			tags.push((person.name, id));
		}
		Self {
			id: PEOPLE,
			title: section_title(PEOPLE),
			tags,
		}
	}

	pub fn into_filter(self) -> Filter {
		let (options, ids): (Vec<_>, Vec<_>) = self
			.tags
			.into_iter()
			.map(|(label, id)| (label.into(), id.to_string().into()))
			.unzip();

		MultiSelectFilter {
			id: self.id.into(),
			title: Some(self.title.into()),
			is_genre: self.id == GENRES,
			can_exclude: true,
			options,
			ids: Some(ids),
			..Default::default()
		}
		.into()
	}

	/// Chips that open a search with one tag included.
	pub fn into_filter_items(self) -> Vec<FilterItem> {
		let section_id = self.id;
		self.tags
			.into_iter()
			.map(|(label, id)| FilterItem {
				title: label,
				values: Some(vec![FilterValue::MultiSelect {
					id: section_id.into(),
					included: vec![id.to_string()],
					excluded: Vec::new(),
				}]),
			})
			.collect()
	}
}

fn section_title(id: &str) -> &'static str {
	match id {
		GENRES => "Genres",
		PEOPLE => "People",
		_ => "Tags",
	}
}

/// Libraries that can be browsed, book libraries are left out.
pub fn get_libraries(ctx: &Context) -> Result<Vec<KavitaLibrary>> {
	let libraries: Vec<KavitaLibrary> = net::get_json(&Url::libraries(&ctx.api_url))?;
	Ok(libraries
		.into_iter()
		.filter(KavitaLibrary::is_supported)
		.collect())
}

pub fn library_ids(libraries: &[KavitaLibrary]) -> Vec<i32> {
	libraries.iter().map(|library| library.id).collect()
}

/// Genre, people and tag sections of the given libraries.
pub fn get_search_tags(ctx: &Context, libraries: &[KavitaLibrary]) -> Result<Vec<TagSection>> {
	let library_ids = library_ids(libraries);

	let genres: Vec<KavitaTag> = net::get_json(&Url::metadata(&ctx.api_url, GENRES, &library_ids))?;
	let people: Vec<KavitaPerson> =
		net::get_json(&Url::metadata(&ctx.api_url, PEOPLE, &library_ids))?;
	let tags: Vec<KavitaTag> = net::get_json(&Url::metadata(&ctx.api_url, TAGS, &library_ids))?;

	Ok(vec![
		TagSection::from_tags(GENRES, genres),
		TagSection::from_people(people),
		TagSection::from_tags(TAGS, tags),
	])
}

pub fn get_search_filters(ctx: &Context) -> Result<Vec<Filter>> {
	let mut filters: Vec<Filter> = vec![
		SelectFilter {
			id: INCLUDE_OPERATOR_ID.into(),
			title: Some("Include Operator".into()),
			options: vec!["AND".into(), "OR".into()],
			..Default::default()
		}
		.into(),
		SelectFilter {
			id: EXCLUDE_OPERATOR_ID.into(),
			title: Some("Exclude Operator".into()),
			options: vec!["OR".into(), "AND".into()],
			..Default::default()
		}
		.into(),
	];

	let libraries = get_libraries(ctx)?;
	filters.extend(
		get_search_tags(ctx, &libraries)?
			.into_iter()
			.map(TagSection::into_filter),
	);

	Ok(filters)
}

/// Search input after reading the host's filter values.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchQuery {
	pub query: Option<String>,
	pub included: Vec<TagId>,
	pub excluded: Vec<TagId>,
	pub include_operator: Operator,
	pub exclude_operator: Operator,
}

impl SearchQuery {
	pub fn new(query: Option<String>, filters: Vec<FilterValue>) -> Self {
		let mut search = Self {
			query: query
				.map(|query| query.trim().to_string())
				.filter(|query| !query.is_empty()),
			included: Vec::new(),
			excluded: Vec::new(),
			include_operator: Operator::And,
			exclude_operator: Operator::Or,
		};

		for filter in filters {
			match filter {
				FilterValue::Select { id, value } => match id.as_str() {
					INCLUDE_OPERATOR_ID => search.include_operator = Operator::parse(&value),
					EXCLUDE_OPERATOR_ID => search.exclude_operator = Operator::parse(&value),
					_ => {}
				},
				FilterValue::MultiSelect {
					included, excluded, ..
				} => {
					search
						.included
						.extend(included.iter().filter_map(|id| TagId::parse(id)));
					search
						.excluded
						.extend(excluded.iter().filter_map(|id| TagId::parse(id)));
				}
				_ => {}
			}
		}

		search
	}

	fn has_person_tag(&self) -> bool {
		self.included
			.iter()
			.chain(self.excluded.iter())
			.any(|tag| matches!(tag, TagId::Person { .. }))
	}
}

/// Adds the entries of `other` whose key hasn't been seen yet.
fn append_unique(entries: &mut Vec<Manga>, other: Vec<Manga>) {
	for manga in other {
		if !entries.iter().any(|entry| entry.key == manga.key) {
			entries.push(manga);
		}
	}
}

/// Intersection (AND) or union (OR) of the series matched by each tag, in
/// the order of the first set.
pub fn combine(sets: Vec<Vec<Manga>>, operator: Operator) -> Vec<Manga> {
	let mut sets = sets.into_iter();
	let Some(first) = sets.next() else {
		return Vec::new();
	};

	let mut combined = Vec::new();
	append_unique(&mut combined, first);

	for set in sets {
		match operator {
			Operator::And => combined.retain(|manga| set.iter().any(|other| other.key == manga.key)),
			Operator::Or => append_unique(&mut combined, set),
		}
	}
	combined
}

/// Tag hits restricted to the title hits when both searches ran, otherwise
/// whichever found something.
pub fn merge_hits(title_hits: Vec<Manga>, tag_hits: Vec<Manga>) -> Vec<Manga> {
	if !title_hits.is_empty() && !tag_hits.is_empty() {
		return tag_hits
			.into_iter()
			.filter(|manga| title_hits.iter().any(|title| title.key == manga.key))
			.collect();
	}
	let mut entries = title_hits;
	entries.extend(tag_hits);
	entries
}

pub fn remove_excluded(entries: &mut Vec<Manga>, excluded: &[Manga]) {
	entries.retain(|manga| !excluded.iter().any(|other| other.key == manga.key));
}

/// One page of an already complete result list. Pages start at one.
pub fn paginate(entries: Vec<Manga>, page: i32, page_size: usize) -> MangaPageResult {
	let page = page.max(1) as usize;
	let start = (page - 1).saturating_mul(page_size);
	let end = start.saturating_add(page_size);
	let has_next_page = entries.len() > end;

	MangaPageResult {
		entries: entries.into_iter().skip(start).take(page_size).collect(),
		has_next_page,
	}
}

/// Filter of the v2 listing endpoints matching every series.
pub fn all_series_filter() -> Value {
	json!({
		"id": 0,
		"name": "all",
		"statements": [],
		"combination": 0,
		"sortOptions": {
			"sortField": 1,
			"isAscending": true,
		},
		"limitTo": 0,
	})
}

fn series_matching(ctx: &Context, body: &Value) -> Result<Vec<Manga>> {
	let series: Vec<KavitaSeries> = net::post_json(&Url::series_all(&ctx.api_url), body)?;
	Ok(series
		.into_iter()
		.map(|series| series.into_manga(ctx))
		.collect())
}

fn tag_sets(ctx: &Context, tags: &[TagId], people: &[KavitaPerson]) -> Result<Vec<Vec<Manga>>> {
	let mut sets = Vec::new();
	for tag in tags {
		let mut set = Vec::new();
		for body in tag.filter_bodies(people) {
			append_unique(&mut set, series_matching(ctx, &body)?);
		}
		sets.push(set);
	}
	Ok(sets)
}

fn title_hits(ctx: &Context, query: &str) -> Result<Vec<Manga>> {
	let response: KavitaSearchResponse = net::get_json(&Url::search(&ctx.api_url, query))?;

	let mut hits = Vec::new();
	append_unique(
		&mut hits,
		response
			.series
			.into_iter()
			.map(|series| series.into_manga(ctx))
			.collect(),
	);

	if settings::get_enable_recursive_search() {
		let mut bodies: Vec<Value> = response
			.persons
			.iter()
			.filter_map(|person| {
				person_role_key(person.role).map(|key| json!({ key: [person.id] }))
			})
			.collect();
		bodies.extend(response.genres.iter().map(|genre| json!({ GENRES: [genre.id] })));
		bodies.extend(response.tags.iter().map(|tag| json!({ TAGS: [tag.id] })));

		for body in bodies {
			append_unique(&mut hits, series_matching(ctx, &body)?);
		}
	}

	Ok(hits)
}

fn browse_all(ctx: &Context, page: i32) -> Result<(Vec<Manga>, bool)> {
	let url = Url::series_all_v2(&ctx.api_url, None, page.max(1), ctx.page_size);
	let series: Vec<KavitaSeries> = net::post_json(&url, &all_series_filter())?;
	let has_next_page = series.len() >= ctx.page_size;
	Ok((
		series
			.into_iter()
			.map(|series| series.into_manga(ctx))
			.collect(),
		has_next_page,
	))
}

pub fn get_search_results(
	ctx: &Context,
	query: Option<String>,
	page: i32,
	filters: Vec<FilterValue>,
) -> Result<MangaPageResult> {
	let search = SearchQuery::new(query, filters);

	let people: Vec<KavitaPerson> = if search.has_person_tag() {
		net::get_json(&Url::metadata(&ctx.api_url, PEOPLE, &[]))?
	} else {
		Vec::new()
	};

	let excluded = combine(
		tag_sets(ctx, &search.excluded, &people)?,
		search.exclude_operator,
	);

	if search.query.is_none() && search.included.is_empty() {
		let (mut entries, has_next_page) = browse_all(ctx, page)?;
		remove_excluded(&mut entries, &excluded);
		return Ok(MangaPageResult {
			entries,
			has_next_page,
		});
	}

	let mut title_hits = match &search.query {
		Some(query) => title_hits(ctx, query)?,
		None => Vec::new(),
	};
	let mut tag_hits = combine(
		tag_sets(ctx, &search.included, &people)?,
		search.include_operator,
	);

	remove_excluded(&mut title_hits, &excluded);
	remove_excluded(&mut tag_hits, &excluded);

	Ok(paginate(merge_hits(title_hits, tag_hits), page, ctx.page_size))
}

#[cfg(test)]
mod test;
