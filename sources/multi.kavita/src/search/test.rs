use super::*;
use aidoku_test::aidoku_test;

fn manga(key: &str) -> Manga {
	Manga {
		key: key.into(),
		title: key.into(),
		..Default::default()
	}
}

fn entries(keys: &[&str]) -> Vec<Manga> {
	keys.iter().map(|key| manga(key)).collect()
}

fn keys(entries: &[Manga]) -> Vec<&str> {
	entries.iter().map(|manga| manga.key.as_str()).collect()
}

fn person(id: i32, name: &str, role: i32) -> KavitaPerson {
	KavitaPerson {
		id,
		name: name.into(),
		role,
	}
}

#[aidoku_test]
fn tag_ids() {
	assert_eq!(TagId::parse("genres-5"), Some(TagId::Genre(5)));
	assert_eq!(TagId::parse("tags-12"), Some(TagId::Tag(12)));
	assert_eq!(
		TagId::parse("people-3.44"),
		Some(TagId::Person { role: 3, id: 44 })
	);
	assert_eq!(TagId::parse("people-44"), None);
	assert_eq!(TagId::parse("collections-1"), None);
	assert_eq!(TagId::parse("genres-abc"), None);

	assert_eq!(TagId::Genre(5).to_string(), "genres-5");
	assert_eq!(TagId::Person { role: 3, id: 44 }.to_string(), "people-3.44");
}

#[aidoku_test]
fn people_are_deduplicated_by_name() {
	let section = TagSection::from_people(vec![
		person(1, "Kentaro Miura", 3),
		person(2, "Kentaro Miura", 4),
		person(3, "Kouji Mori", 3),
	]);

	assert_eq!(section.title, "People");
	assert_eq!(
		section.tags,
		vec![
			("Kentaro Miura".into(), TagId::Person { role: 3, id: 1 }),
			("Kouji Mori".into(), TagId::Person { role: 3, id: 3 }),
		]
	);
}

#[aidoku_test]
fn genre_and_tag_sections() {
	let genres = TagSection::from_tags(
		GENRES,
		vec![KavitaTag {
			id: 1,
			title: "Action".into(),
		}],
	);
	assert_eq!(genres.title, "Genres");
	assert_eq!(genres.tags, vec![("Action".into(), TagId::Genre(1))]);

	let tags = TagSection::from_tags(
		TAGS,
		vec![KavitaTag {
			id: 9,
			title: "Revenge".into(),
		}],
	);
	assert_eq!(tags.tags, vec![("Revenge".into(), TagId::Tag(9))]);

	let items = genres.into_filter_items();
	assert_eq!(items.len(), 1);
	assert_eq!(items[0].title, "Action");
	match items[0].values.as_deref() {
		Some(
			[
				FilterValue::MultiSelect {
					id,
					included,
					excluded,
				},
			],
		) => {
			assert_eq!(id, "genres");
			assert_eq!(included, &["genres-1"]);
			assert!(excluded.is_empty());
		}
		_ => panic!("expected a single genre value"),
	}
}

#[aidoku_test]
fn person_tag_matches_every_role_of_the_name() {
	let people = [
		person(1, "Kentaro Miura", 3),
		person(2, "Kentaro Miura", 4),
		person(3, "Kouji Mori", 3),
	];

	let bodies = TagId::Person { role: 3, id: 1 }.filter_bodies(&people);
	assert_eq!(
		bodies,
		vec![json!({ "writers": [1] }), json!({ "penciller": [2] })]
	);

	// unknown people still resolve through their own role
	let bodies = TagId::Person { role: 12, id: 7 }.filter_bodies(&people);
	assert_eq!(bodies, vec![json!({ "translators": [7] })]);

	assert_eq!(
		TagId::Genre(5).filter_bodies(&people),
		vec![json!({ "genres": [5] })]
	);
}

#[aidoku_test]
fn filter_values_are_read() {
	let search = SearchQuery::new(
		Some("  berserk ".into()),
		vec![
			FilterValue::Select {
				id: INCLUDE_OPERATOR_ID.into(),
				value: "OR".into(),
			},
			FilterValue::Select {
				id: EXCLUDE_OPERATOR_ID.into(),
				value: "AND".into(),
			},
			FilterValue::MultiSelect {
				id: "genres".into(),
				included: vec!["genres-1".into(), "bogus".into()],
				excluded: vec!["genres-2".into()],
			},
			FilterValue::MultiSelect {
				id: "people".into(),
				included: vec!["people-3.44".into()],
				excluded: Vec::new(),
			},
		],
	);

	assert_eq!(search.query.as_deref(), Some("berserk"));
	assert_eq!(search.include_operator, Operator::Or);
	assert_eq!(search.exclude_operator, Operator::And);
	assert_eq!(
		search.included,
		vec![TagId::Genre(1), TagId::Person { role: 3, id: 44 }]
	);
	assert_eq!(search.excluded, vec![TagId::Genre(2)]);
	assert!(search.has_person_tag());

	let empty = SearchQuery::new(Some("   ".into()), Vec::new());
	assert_eq!(empty.query, None);
	assert_eq!(empty.include_operator, Operator::And);
	assert_eq!(empty.exclude_operator, Operator::Or);
	assert!(!empty.has_person_tag());
}

#[aidoku_test]
fn include_operators() {
	let sets = || {
		vec![
			entries(&["1", "2", "3"]),
			entries(&["2", "3", "4"]),
			entries(&["3", "2", "5"]),
		]
	};

	assert_eq!(keys(&combine(sets(), Operator::And)), ["2", "3"]);
	assert_eq!(
		keys(&combine(sets(), Operator::Or)),
		["1", "2", "3", "4", "5"]
	);
	assert!(combine(Vec::new(), Operator::And).is_empty());
}

#[aidoku_test]
fn exclude_operators() {
	let excluded_sets = || vec![entries(&["1", "2"]), entries(&["2", "3"])];

	let mut hits = entries(&["1", "2", "3", "4"]);
	remove_excluded(&mut hits, &combine(excluded_sets(), Operator::Or));
	assert_eq!(keys(&hits), ["4"]);

	let mut hits = entries(&["1", "2", "3", "4"]);
	remove_excluded(&mut hits, &combine(excluded_sets(), Operator::And));
	assert_eq!(keys(&hits), ["1", "3", "4"]);
}

#[aidoku_test]
fn title_and_tag_hits_merge() {
	// both searches ran: only tag hits that the title search also found
	let merged = merge_hits(entries(&["1", "2", "3"]), entries(&["3", "4", "1"]));
	assert_eq!(keys(&merged), ["3", "1"]);

	// one side empty: concatenation
	let merged = merge_hits(entries(&["1", "2"]), Vec::new());
	assert_eq!(keys(&merged), ["1", "2"]);
	let merged = merge_hits(Vec::new(), entries(&["4"]));
	assert_eq!(keys(&merged), ["4"]);
}

#[aidoku_test]
fn pages_are_sliced() {
	let all = entries(&["1", "2", "3", "4", "5"]);

	let first = paginate(all.clone(), 1, 2);
	assert_eq!(keys(&first.entries), ["1", "2"]);
	assert!(first.has_next_page);

	let last = paginate(all.clone(), 3, 2);
	assert_eq!(keys(&last.entries), ["5"]);
	assert!(!last.has_next_page);

	let exact = paginate(entries(&["1", "2"]), 1, 2);
	assert!(!exact.has_next_page);

	let beyond = paginate(all.clone(), 9, 2);
	assert!(beyond.entries.is_empty());
	assert!(!beyond.has_next_page);

	// pages before the first clamp to it
	assert_eq!(keys(&paginate(all, 0, 2).entries), ["1", "2"]);
}

#[aidoku_test]
fn tag_lookup_uses_given_libraries() {
	let libraries = vec![
		KavitaLibrary {
			id: 1,
			name: "Manga".into(),
			library_type: 0,
		},
		KavitaLibrary {
			id: 4,
			name: "Comics".into(),
			library_type: 1,
		},
	];
	let ids = library_ids(&libraries);
	assert_eq!(ids, [1, 4]);
	assert_eq!(
		Url::metadata("https://demo.kavitareader.com/api", GENRES, &ids),
		"https://demo.kavitareader.com/api/Metadata/genres?libraryIds=1,4"
	);
	assert!(library_ids(&[]).is_empty());
}
