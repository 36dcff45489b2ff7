//! Filter engine tests against a fully synthesized dataset.

mod common;

use common::{initialized_db, UNIFIED_GEN};
use draftdex::storage::{
    DexDatabase, PageRequest, SortDirection, SortField, SortSpec, SpeciesFilter,
};
use draftdex::types::{Generation, PokemonType};

fn unified_filter() -> SpeciesFilter {
    SpeciesFilter {
        generation_ids: vec![UNIFIED_GEN],
        ..Default::default()
    }
}

fn names(db: &DexDatabase, filter: &SpeciesFilter) -> Vec<String> {
    let page = db
        .search(
            filter,
            PageRequest { page: 1, page_size: 100 },
            Some(SortSpec {
                field: SortField::Name,
                direction: SortDirection::Ascending,
            }),
        )
        .unwrap();
    page.data.into_iter().map(|row| row.name).collect()
}

#[test]
fn test_type_membership_requires_every_listed_type() {
    let (db, _) = initialized_db();

    let mut filter = unified_filter();
    filter.pokemon_type_ids = vec![
        PokemonType::Grass.type_id(),
        PokemonType::Bug.type_id(),
    ];
    assert_eq!(names(&db, &filter), vec!["Venubug"]);

    filter.pokemon_type_ids = vec![
        PokemonType::Dragon.type_id(),
        PokemonType::Flying.type_id(),
    ];
    assert_eq!(names(&db, &filter), vec!["Skydrake", "Skydrake-Mega"]);

    // A single listed type matches dual-typed species too
    filter.pokemon_type_ids = vec![PokemonType::Ground.type_id()];
    assert_eq!(names(&db, &filter), vec!["Quagmire"]);
}

#[test]
fn test_stat_range_and_weakness_conjunction() {
    let (db, _) = initialized_db();

    // Quagmire has hp 110 but its stored Ice multiplier is exactly 1,
    // which is not a weakness; Venubug is weak to Ice but under 100 hp.
    let mut filter = unified_filter();
    filter.min_hp = Some(100);
    filter.weak_pokemon_type_ids = vec![PokemonType::Ice.type_id()];
    assert_eq!(names(&db, &filter), vec!["Skydrake", "Skydrake-Mega"]);
}

#[test]
fn test_effectiveness_classes() {
    let (db, _) = initialized_db();

    let mut filter = unified_filter();
    filter.immune_pokemon_type_ids = vec![PokemonType::Electric.type_id()];
    assert_eq!(names(&db, &filter), vec!["Quagmire"]);

    let mut filter = unified_filter();
    filter.immune_pokemon_type_ids = vec![PokemonType::Ground.type_id()];
    assert_eq!(
        names(&db, &filter),
        vec!["Gearmite", "Skydrake", "Skydrake-Mega"]
    );

    // Resistance is strict (< 1) and includes immunity
    let mut filter = unified_filter();
    filter.resist_pokemon_type_ids = vec![PokemonType::Fire.type_id()];
    assert_eq!(
        names(&db, &filter),
        vec!["Pyroline", "Quagmire", "Skydrake", "Skydrake-Mega"]
    );

    // Not-weak admits exactly-neutral multipliers
    let mut filter = unified_filter();
    filter.not_weak_pokemon_type_ids = vec![PokemonType::Ice.type_id()];
    assert_eq!(names(&db, &filter), vec!["Gearmite", "Pyroline", "Quagmire"]);
}

#[test]
fn test_ability_filter() {
    let (db, _) = initialized_db();
    let unified = Generation::new(UNIFIED_GEN);

    let mut filter = unified_filter();
    filter.ability_ids = vec![db.ability_id("Flash Fire", unified).unwrap().unwrap()];
    assert_eq!(names(&db, &filter), vec!["Pyroline"]);
}

#[test]
fn test_move_membership_requires_every_listed_move() {
    let (db, _) = initialized_db();
    let unified = Generation::new(UNIFIED_GEN);

    let stealth_rock = db.move_id("Stealth Rock", unified).unwrap().unwrap();
    let recover = db.move_id("Recover", unified).unwrap().unwrap();
    let uturn = db.move_id("U-turn", unified).unwrap().unwrap();

    let mut filter = unified_filter();
    filter.move_ids = vec![stealth_rock, recover];
    assert_eq!(names(&db, &filter), vec!["Gearmite", "Quagmire"]);

    filter.move_ids = vec![stealth_rock, uturn];
    assert_eq!(names(&db, &filter), vec!["Gearmite"]);
}

#[test]
fn test_special_move_category_membership() {
    let (db, _) = initialized_db();

    let hazard = db.category_id("Hazard").unwrap().unwrap();
    let momentum = db.category_id("Momentum").unwrap().unwrap();

    // Quagmire lays hazards but carries no pivot move; only Gearmite
    // has a move in both categories.
    let mut filter = unified_filter();
    filter.special_move_category_ids = vec![hazard, momentum];
    assert_eq!(names(&db, &filter), vec!["Gearmite"]);

    let mut filter = unified_filter();
    filter.special_move_category_ids = vec![hazard];
    assert_eq!(names(&db, &filter), vec!["Gearmite", "Quagmire"]);
}

#[test]
fn test_name_substring_is_case_insensitive() {
    let (db, _) = initialized_db();

    let mut filter = unified_filter();
    filter.name = Some("DRAKE".to_string());
    assert_eq!(names(&db, &filter), vec!["Skydrake", "Skydrake-Mega"]);
}

#[test]
fn test_generation_filter_requires_every_listed_generation() {
    let (db, _) = initialized_db();

    let filter = SpeciesFilter {
        generation_ids: vec![1],
        ..Default::default()
    };
    assert_eq!(
        names(&db, &filter),
        vec!["Quagmire", "Skydrake", "Skydrake-Mega", "Venubug"]
    );

    // Duplicated ids collapse to the same requirement
    let filter = SpeciesFilter {
        generation_ids: vec![1, 1],
        ..Default::default()
    };
    let page = db.search(&filter, PageRequest { page: 1, page_size: 100 }, None).unwrap();
    assert_eq!(page.total, 4);

    // A species belongs to exactly one generation, so requiring two
    // distinct generations matches nothing.
    let filter = SpeciesFilter {
        generation_ids: vec![1, 2],
        ..Default::default()
    };
    let page = db.search(&filter, PageRequest { page: 1, page_size: 100 }, None).unwrap();
    assert_eq!(page.total, 0);
}

#[test]
fn test_name_wildcards_match_literally() {
    let (db, _) = initialized_db();

    // No species name contains a literal percent sign
    let mut filter = unified_filter();
    filter.name = Some("%".to_string());
    assert!(names(&db, &filter).is_empty());

    // An underscore is not a single-character wildcard: "drake_mega"
    // must not match "Skydrake-Mega"
    let mut filter = unified_filter();
    filter.name = Some("drake_mega".to_string());
    assert!(names(&db, &filter).is_empty());

    let mut filter = unified_filter();
    filter.name = Some("drake-mega".to_string());
    assert_eq!(names(&db, &filter), vec!["Skydrake-Mega"]);
}

#[test]
fn test_derived_bulk_ranges() {
    let (db, _) = initialized_db();

    // physical bulk = hp + defense
    let mut filter = unified_filter();
    filter.min_physical_bulk = Some(200);
    assert_eq!(names(&db, &filter), vec!["Skydrake", "Skydrake-Mega"]);

    // special bulk = hp + special defense
    let mut filter = unified_filter();
    filter.min_special_bulk = Some(215);
    assert_eq!(names(&db, &filter), vec!["Skydrake-Mega"]);
}

#[test]
fn test_pagination_totals_and_pages() {
    let (db, _) = initialized_db();

    let sort = Some(SortSpec {
        field: SortField::Name,
        direction: SortDirection::Ascending,
    });

    let page = db
        .search(&unified_filter(), PageRequest { page: 2, page_size: 2 }, sort)
        .unwrap();
    assert_eq!(page.total, 6);
    assert_eq!(page.total_pages, 3);
    assert_eq!(page.page, 2);
    let names: Vec<&str> = page.data.iter().map(|row| row.name.as_str()).collect();
    assert_eq!(names, vec!["Quagmire", "Skydrake"]);

    // Past-the-end pages are empty but keep totals
    let page = db
        .search(&unified_filter(), PageRequest { page: 9, page_size: 2 }, None)
        .unwrap();
    assert!(page.data.is_empty());
    assert_eq!(page.total, 6);
}

#[test]
fn test_sort_descending() {
    let (db, _) = initialized_db();

    let page = db
        .search(
            &unified_filter(),
            PageRequest { page: 1, page_size: 1 },
            Some(SortSpec {
                field: SortField::Total,
                direction: SortDirection::Descending,
            }),
        )
        .unwrap();
    assert_eq!(page.data[0].name, "Skydrake-Mega");
    assert_eq!(page.data[0].total, 700);

    let page = db
        .search(
            &unified_filter(),
            PageRequest { page: 1, page_size: 1 },
            Some(SortSpec {
                field: SortField::Hp,
                direction: SortDirection::Descending,
            }),
        )
        .unwrap();
    assert_eq!(page.data[0].hp, 110);
}
