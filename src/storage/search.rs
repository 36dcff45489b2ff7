//! Multi-criteria filter engine over the persisted dataset.
//!
//! Every filter dimension is optional and conjunctive. The filter grammar
//! is a closed set of predicate kinds (range, membership-ALL,
//! effectiveness-class, name substring), each translated to SQL
//! independently, so dimensions compose without ad hoc string surgery.
//! Queries are read-only and safe to run concurrently.

use super::queries::{row_to_pokemon, POKEMON_COLUMNS};
use super::{models::PokemonRow, schema::DexDatabase};
use crate::error::{DexError, Result};
use crate::types::{normalize_name, AbilityId, CategoryId, MoveId, TypeId};
use rusqlite::{params_from_iter, ToSql};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// All filter dimensions. Present dimensions narrow the result set;
/// list dimensions require the species to possess *every* listed id.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpeciesFilter {
    /// Case-insensitive substring match on name.
    pub name: Option<String>,

    pub min_hp: Option<u16>,
    pub max_hp: Option<u16>,
    pub min_attack: Option<u16>,
    pub max_attack: Option<u16>,
    pub min_defense: Option<u16>,
    pub max_defense: Option<u16>,
    pub min_special_attack: Option<u16>,
    pub max_special_attack: Option<u16>,
    pub min_special_defense: Option<u16>,
    pub max_special_defense: Option<u16>,
    pub min_speed: Option<u16>,
    pub max_speed: Option<u16>,
    /// Physical bulk = hp + defense.
    pub min_physical_bulk: Option<u16>,
    pub max_physical_bulk: Option<u16>,
    /// Special bulk = hp + special defense.
    pub min_special_bulk: Option<u16>,
    pub max_special_bulk: Option<u16>,

    /// Species must have every listed defending type.
    pub pokemon_type_ids: Vec<TypeId>,
    /// Species must have every listed ability.
    pub ability_ids: Vec<AbilityId>,
    /// Species must learn every listed move.
    pub move_ids: Vec<MoveId>,
    /// Species must learn a move in every listed category.
    pub special_move_category_ids: Vec<CategoryId>,
    /// Species must belong to every listed generation. A species belongs
    /// to exactly one, so two or more distinct ids match nothing.
    pub generation_ids: Vec<u8>,

    /// Stored effectiveness > 1 for every listed attacking type.
    pub weak_pokemon_type_ids: Vec<TypeId>,
    /// Stored effectiveness < 1 for every listed attacking type.
    pub resist_pokemon_type_ids: Vec<TypeId>,
    /// Stored effectiveness = 0 for every listed attacking type.
    pub immune_pokemon_type_ids: Vec<TypeId>,
    /// Stored effectiveness <= 1 for every listed attacking type.
    pub not_weak_pokemon_type_ids: Vec<TypeId>,
}

/// Sortable columns. The allow-list is the enum itself: an unrecognized
/// field fails `FromStr` before any query is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
pub enum SortField {
    Name,
    DexNumber,
    Hp,
    Attack,
    Defense,
    SpecialAttack,
    SpecialDefense,
    Speed,
    Total,
    Height,
    Weight,
    Generation,
}

impl SortField {
    fn column(&self) -> &'static str {
        match self {
            SortField::Name => "p.name",
            SortField::DexNumber => "p.dex_number",
            SortField::Hp => "p.hp",
            SortField::Attack => "p.attack",
            SortField::Defense => "p.defense",
            SortField::SpecialAttack => "p.special_attack",
            SortField::SpecialDefense => "p.special_defense",
            SortField::Speed => "p.speed",
            SortField::Total => "p.total",
            SortField::Height => "p.height",
            SortField::Weight => "p.weight",
            SortField::Generation => "p.generation_id",
        }
    }

    fn field_name(&self) -> &'static str {
        match self {
            SortField::Name => "name",
            SortField::DexNumber => "dexNumber",
            SortField::Hp => "hp",
            SortField::Attack => "attack",
            SortField::Defense => "defense",
            SortField::SpecialAttack => "specialAttack",
            SortField::SpecialDefense => "specialDefense",
            SortField::Speed => "speed",
            SortField::Total => "total",
            SortField::Height => "height",
            SortField::Weight => "weight",
            SortField::Generation => "generation",
        }
    }

    const ALL: [SortField; 12] = [
        SortField::Name,
        SortField::DexNumber,
        SortField::Hp,
        SortField::Attack,
        SortField::Defense,
        SortField::SpecialAttack,
        SortField::SpecialDefense,
        SortField::Speed,
        SortField::Total,
        SortField::Height,
        SortField::Weight,
        SortField::Generation,
    ];
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.field_name())
    }
}

impl FromStr for SortField {
    type Err = DexError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = normalize_name(s);
        Self::ALL
            .iter()
            .copied()
            .find(|f| normalize_name(f.field_name()) == wanted)
            .ok_or_else(|| DexError::UnknownSortField {
                field: s.to_string(),
            })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub field: SortField,
    pub direction: SortDirection,
}

/// 1-based pagination request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub page: u32,
    pub page_size: u32,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: 20,
        }
    }
}

/// One page of search results with total counts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchPage {
    pub data: Vec<PokemonRow>,
    pub total: u64,
    pub page: u32,
    pub page_size: u32,
    pub total_pages: u32,
}

/// Derived stat expressions usable in range predicates.
#[derive(Debug, Clone, Copy)]
enum StatColumn {
    Hp,
    Attack,
    Defense,
    SpecialAttack,
    SpecialDefense,
    Speed,
    PhysicalBulk,
    SpecialBulk,
}

impl StatColumn {
    fn sql_expr(&self) -> &'static str {
        match self {
            StatColumn::Hp => "p.hp",
            StatColumn::Attack => "p.attack",
            StatColumn::Defense => "p.defense",
            StatColumn::SpecialAttack => "p.special_attack",
            StatColumn::SpecialDefense => "p.special_defense",
            StatColumn::Speed => "p.speed",
            StatColumn::PhysicalBulk => "(p.hp + p.defense)",
            StatColumn::SpecialBulk => "(p.hp + p.special_defense)",
        }
    }
}

/// Effectiveness-class comparison against the stored multiplier.
#[derive(Debug, Clone, Copy)]
enum EffectClass {
    WeakToAll,
    ResistsAll,
    ImmuneToAll,
    NotWeakToAny,
}

impl EffectClass {
    fn sql_comparison(&self) -> &'static str {
        match self {
            EffectClass::WeakToAll => "> 1.0",
            EffectClass::ResistsAll => "< 1.0",
            EffectClass::ImmuneToAll => "= 0.0",
            EffectClass::NotWeakToAny => "<= 1.0",
        }
    }
}

/// The closed set of predicate kinds the filter grammar reduces to.
enum Predicate {
    NameContains(String),
    StatMin(StatColumn, u16),
    StatMax(StatColumn, u16),
    /// Membership-ALL over a join table: the species must be linked to
    /// every listed id.
    HasAll {
        join_sql: &'static str,
        id_column: &'static str,
        ids: Vec<i64>,
    },
    GenerationsAll(Vec<u8>),
    Effectiveness(EffectClass, Vec<TypeId>),
}

impl Predicate {
    /// Render this predicate as one SQL condition, pushing its bound
    /// parameters in order.
    fn to_sql(&self, params: &mut Vec<Box<dyn ToSql>>) -> String {
        match self {
            Predicate::NameContains(name) => {
                // LIKE wildcards in the user substring match literally
                let escaped = normalize_name(name)
                    .replace('\\', "\\\\")
                    .replace('%', "\\%")
                    .replace('_', "\\_");
                params.push(Box::new(format!("%{escaped}%")));
                "LOWER(p.name) LIKE ? ESCAPE '\\'".to_string()
            }
            Predicate::StatMin(column, value) => {
                params.push(Box::new(*value));
                format!("{} >= ?", column.sql_expr())
            }
            Predicate::StatMax(column, value) => {
                params.push(Box::new(*value));
                format!("{} <= ?", column.sql_expr())
            }
            Predicate::HasAll {
                join_sql,
                id_column,
                ids,
            } => {
                let placeholders = placeholder_list(ids.len());
                for id in ids {
                    params.push(Box::new(*id));
                }
                params.push(Box::new(ids.len() as i64));
                format!(
                    "(SELECT COUNT(DISTINCT {id_column}) FROM {join_sql} AND {id_column} IN ({placeholders})) = ?"
                )
            }
            Predicate::GenerationsAll(gens) => {
                let conditions = vec!["p.generation_id = ?"; gens.len()].join(" AND ");
                for gen in gens {
                    params.push(Box::new(*gen));
                }
                format!("({conditions})")
            }
            Predicate::Effectiveness(class, type_ids) => {
                let placeholders = placeholder_list(type_ids.len());
                for id in type_ids {
                    params.push(Box::new(id.as_i64()));
                }
                params.push(Box::new(type_ids.len() as i64));
                format!(
                    "(SELECT COUNT(*) FROM type_effective te WHERE te.pokemon_id = p.id \
                     AND te.pokemon_type_id IN ({placeholders}) AND te.value {}) = ?",
                    class.sql_comparison()
                )
            }
        }
    }
}

fn placeholder_list(n: usize) -> String {
    vec!["?"; n].join(", ")
}

impl SpeciesFilter {
    fn predicates(&self) -> Vec<Predicate> {
        let mut predicates = Vec::new();

        if let Some(name) = &self.name {
            predicates.push(Predicate::NameContains(name.clone()));
        }

        let ranges = [
            (StatColumn::Hp, self.min_hp, self.max_hp),
            (StatColumn::Attack, self.min_attack, self.max_attack),
            (StatColumn::Defense, self.min_defense, self.max_defense),
            (StatColumn::SpecialAttack, self.min_special_attack, self.max_special_attack),
            (StatColumn::SpecialDefense, self.min_special_defense, self.max_special_defense),
            (StatColumn::Speed, self.min_speed, self.max_speed),
            (StatColumn::PhysicalBulk, self.min_physical_bulk, self.max_physical_bulk),
            (StatColumn::SpecialBulk, self.min_special_bulk, self.max_special_bulk),
        ];
        for (column, min, max) in ranges {
            if let Some(min) = min {
                predicates.push(Predicate::StatMin(column, min));
            }
            if let Some(max) = max {
                predicates.push(Predicate::StatMax(column, max));
            }
        }

        if !self.pokemon_type_ids.is_empty() {
            predicates.push(Predicate::HasAll {
                join_sql: "pokemon_pokemon_types j WHERE j.pokemon_id = p.id",
                id_column: "j.pokemon_type_id",
                ids: self.pokemon_type_ids.iter().map(|id| id.as_i64()).collect(),
            });
        }
        if !self.ability_ids.is_empty() {
            predicates.push(Predicate::HasAll {
                join_sql: "pokemon_abilities j WHERE j.pokemon_id = p.id",
                id_column: "j.ability_id",
                ids: self.ability_ids.iter().map(|id| id.as_i64()).collect(),
            });
        }
        if !self.move_ids.is_empty() {
            predicates.push(Predicate::HasAll {
                join_sql: "pokemon_moves j WHERE j.pokemon_id = p.id",
                id_column: "j.move_id",
                ids: self.move_ids.iter().map(|id| id.as_i64()).collect(),
            });
        }
        if !self.special_move_category_ids.is_empty() {
            predicates.push(Predicate::HasAll {
                join_sql: "pokemon_moves pm JOIN move_special_move_categories j \
                           ON j.move_id = pm.move_id WHERE pm.pokemon_id = p.id",
                id_column: "j.special_move_category_id",
                ids: self
                    .special_move_category_ids
                    .iter()
                    .map(|id| id.as_i64())
                    .collect(),
            });
        }
        if !self.generation_ids.is_empty() {
            predicates.push(Predicate::GenerationsAll(self.generation_ids.clone()));
        }

        let effect_classes = [
            (EffectClass::WeakToAll, &self.weak_pokemon_type_ids),
            (EffectClass::ResistsAll, &self.resist_pokemon_type_ids),
            (EffectClass::ImmuneToAll, &self.immune_pokemon_type_ids),
            (EffectClass::NotWeakToAny, &self.not_weak_pokemon_type_ids),
        ];
        for (class, type_ids) in effect_classes {
            if !type_ids.is_empty() {
                predicates.push(Predicate::Effectiveness(class, type_ids.clone()));
            }
        }

        predicates
    }
}

impl DexDatabase {
    /// Paginated, sortable, multi-predicate search over the persisted
    /// dataset.
    ///
    /// Validation (pagination bounds) happens before any SQL is built;
    /// an invalid sort field cannot reach this function at all since
    /// [`SortField`] is a closed enum.
    pub fn search(
        &self,
        filter: &SpeciesFilter,
        page: PageRequest,
        sort: Option<SortSpec>,
    ) -> Result<SearchPage> {
        if page.page == 0 || page.page_size == 0 {
            return Err(DexError::InvalidPagination);
        }

        let mut params: Vec<Box<dyn ToSql>> = Vec::new();
        let mut where_sql = String::from("WHERE 1 = 1");
        for predicate in filter.predicates() {
            where_sql.push_str(" AND ");
            where_sql.push_str(&predicate.to_sql(&mut params));
        }

        let count_sql = format!("SELECT COUNT(*) FROM pokemon p {where_sql}");
        let total: i64 = self.conn.query_row(
            &count_sql,
            params_from_iter(params.iter().map(|p| p.as_ref())),
            |row| row.get(0),
        )?;
        let total = total as u64;

        let sort = sort.unwrap_or(SortSpec {
            field: SortField::DexNumber,
            direction: SortDirection::Ascending,
        });
        let direction = match sort.direction {
            SortDirection::Ascending => "ASC",
            SortDirection::Descending => "DESC",
        };

        let data_sql = format!(
            "SELECT {POKEMON_COLUMNS} FROM pokemon p {where_sql} \
             ORDER BY {} {direction}, p.id ASC LIMIT ? OFFSET ?",
            sort.field.column()
        );
        params.push(Box::new(page.page_size as i64));
        params.push(Box::new((page.page as i64 - 1) * page.page_size as i64));

        let mut stmt = self.conn.prepare(&data_sql)?;
        let rows = stmt.query_map(
            params_from_iter(params.iter().map(|p| p.as_ref())),
            row_to_pokemon,
        )?;

        let mut data = Vec::new();
        for row in rows {
            data.push(row?);
        }

        let total_pages = total.div_ceil(page.page_size as u64) as u32;

        Ok(SearchPage {
            data,
            total,
            page: page.page,
            page_size: page.page_size,
            total_pages,
        })
    }
}
