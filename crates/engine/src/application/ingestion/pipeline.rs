//! Full-ingestion orchestration.

use std::sync::Arc;

use chrono::Utc;
use lorevault_domain::IngestionRun;
use uuid::Uuid;

use super::error::IngestError;
use super::loaders;
use crate::infrastructure::persistence::Store;
use crate::infrastructure::source::SourcePort;

/// Rows loaded per entity type during one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunCounts {
    pub races: u64,
    pub subraces: u64,
    pub spells: u64,
    pub classes: u64,
    pub subclasses: u64,
    pub traits: u64,
    pub equipment: u64,
    pub features: u64,
    pub conditions: u64,
    pub damage_types: u64,
    pub proficiencies: u64,
    pub monsters: u64,
}

/// Outcome of a committed ingestion run.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub run_id: Uuid,
    /// Total rows written, including facets, links, and sub-collections.
    pub records_written: i64,
    pub counts: RunCounts,
}

/// Orchestrates one full ingestion: every entity type, in dependency order,
/// inside a single transaction.
pub struct IngestionPipeline {
    source: Arc<dyn SourcePort>,
    store: Store,
}

impl IngestionPipeline {
    pub fn new(source: Arc<dyn SourcePort>, store: Store) -> Self {
        Self { source, store }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Run full ingestion. All writes land in one transaction: a fatal error
    /// anywhere rolls back the entire run, a successful run commits
    /// atomically at the end.
    pub async fn run(&self) -> Result<RunSummary, IngestError> {
        let run_id = Uuid::new_v4();
        let started_at = Utc::now();
        tracing::info!(%run_id, "starting full ingestion run");

        let source = self.source.as_ref();
        let mut writer = self.store.begin_run().await?;

        // Races, subraces, classes, and subclasses mirror the exact current
        // source set; everything else merges in place.
        writer.clear_replaced().await?;

        // The order satisfies parent resolution (races before subraces,
        // classes before subclasses, monsters last) and must stay fixed.
        let counts = RunCounts {
            races: loaders::load_races(source, &mut writer).await?,
            subraces: loaders::load_subraces(source, &mut writer).await?,
            spells: loaders::load_spells(source, &mut writer).await?,
            classes: loaders::load_classes(source, &mut writer).await?,
            subclasses: loaders::load_subclasses(source, &mut writer).await?,
            traits: loaders::load_traits(source, &mut writer).await?,
            equipment: loaders::load_equipment(source, &mut writer).await?,
            features: loaders::load_features(source, &mut writer).await?,
            conditions: loaders::load_conditions(source, &mut writer).await?,
            damage_types: loaders::load_damage_types(source, &mut writer).await?,
            proficiencies: loaders::load_proficiencies(source, &mut writer).await?,
            monsters: loaders::load_monsters(source, &mut writer).await?,
        };

        writer
            .record_run(&IngestionRun {
                id: run_id,
                started_at,
                finished_at: Utc::now(),
                records_written: writer.records_written(),
            })
            .await?;

        let records_written = writer.commit().await?;
        tracing::info!(%run_id, records_written, "ingestion run committed");

        Ok(RunSummary {
            run_id,
            records_written,
            counts,
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Value};

    use super::*;
    use crate::infrastructure::source::{MockSourcePort, Resource, ResourceRef, SourceError};

    fn refs(indexes: &[&str]) -> Vec<ResourceRef> {
        indexes
            .iter()
            .map(|index| ResourceRef {
                index: index.to_string(),
                name: index.to_string(),
                url: format!("/api/{index}"),
            })
            .collect()
    }

    fn fixture_collection(resource: Resource) -> Vec<ResourceRef> {
        match resource {
            Resource::Races => refs(&["elf"]),
            Resource::Subraces => refs(&["high-elf"]),
            Resource::Spells => refs(&["fire-bolt"]),
            Resource::Classes => refs(&["wizard"]),
            Resource::Subclasses => refs(&["evocation"]),
            Resource::Traits => refs(&["darkvision"]),
            Resource::Equipment => refs(&["chain-mail", "longsword", "smiths-tools"]),
            Resource::Features => refs(&["arcane-recovery"]),
            Resource::Conditions => refs(&["blinded"]),
            Resource::DamageTypes => refs(&["fire"]),
            Resource::Proficiencies => refs(&["skill-arcana"]),
            Resource::Monsters => refs(&["adult-red-dragon"]),
        }
    }

    fn fixture_detail(resource: Resource, index: &str) -> Option<Value> {
        let payload = match (resource, index) {
            (Resource::Races, "elf") => json!({
                "index": "elf",
                "name": "Elf",
                "speed": 30,
                "ability_bonuses": [
                    {"ability_score": {"index": "dex", "name": "DEX"}, "bonus": 2}
                ],
                "traits": [{"index": "darkvision", "name": "Darkvision"}]
            }),
            (Resource::Subraces, "high-elf") => json!({
                "index": "high-elf",
                "name": "High Elf",
                "race": {"index": "elf", "name": "Elf"},
                "desc": "Heirs of the old elven courts.",
                "ability_bonuses": [
                    {"ability_score": {"index": "int", "name": "INT"}, "bonus": 1}
                ]
            }),
            (Resource::Spells, "fire-bolt") => json!({
                "index": "fire-bolt",
                "name": "Fire Bolt",
                "level": 0,
                "damage": {
                    "damage_type": {"index": "fire", "name": "Fire"},
                    "damage_at_character_level": {"1": "1d10"}
                }
            }),
            (Resource::Classes, "wizard") => json!({
                "index": "wizard",
                "name": "Wizard",
                "hit_die": 6,
                "saving_throws": [{"index": "int", "name": "INT"}]
            }),
            (Resource::Subclasses, "evocation") => json!({
                "index": "evocation",
                "name": "Evocation",
                "class": {"index": "wizard", "name": "Wizard"}
            }),
            (Resource::Traits, "darkvision") => json!({
                "index": "darkvision",
                "name": "Darkvision",
                "desc": ["You can see in dim light within 60 feet."],
                "races": [{"index": "elf", "name": "Elf"}]
            }),
            (Resource::Equipment, "chain-mail") => json!({
                "index": "chain-mail",
                "name": "Chain Mail",
                "equipment_category": {"index": "armor", "name": "Armor"},
                "armor_category": "Heavy",
                "armor_class": {"base": 16, "dex_bonus": false},
                "str_minimum": 13,
                "stealth_disadvantage": true,
                "cost": {"quantity": 75, "unit": "gp"},
                "weight": 55.0
            }),
            (Resource::Equipment, "longsword") => json!({
                "index": "longsword",
                "name": "Longsword",
                "equipment_category": {"index": "weapon", "name": "Weapon"},
                "weapon_category": "Martial",
                "weapon_range": "Melee",
                "category_range": "Martial Melee",
                "damage": {
                    "damage_dice": "1d8",
                    "damage_type": {"index": "slashing", "name": "Slashing"}
                },
                "properties": [{"index": "versatile", "name": "Versatile"}]
            }),
            (Resource::Equipment, "smiths-tools") => json!({
                "index": "smiths-tools",
                "name": "Smith's Tools",
                "equipment_category": {"index": "tools", "name": "Tools"},
                "tool_category": "Artisan's Tools"
            }),
            (Resource::Features, "arcane-recovery") => json!({
                "index": "arcane-recovery",
                "name": "Arcane Recovery",
                "class": {"index": "wizard", "name": "Wizard"},
                "level": 1,
                "desc": ["You can regain some of your magical energy."]
            }),
            (Resource::Conditions, "blinded") => json!({
                "index": "blinded",
                "name": "Blinded",
                "desc": ["A blinded creature can't see."]
            }),
            (Resource::DamageTypes, "fire") => json!({
                "index": "fire",
                "name": "Fire",
                "desc": ["Red dragons breathe fire."]
            }),
            (Resource::Proficiencies, "skill-arcana") => json!({
                "index": "skill-arcana",
                "name": "Skill: Arcana",
                "type": "Skills"
            }),
            (Resource::Monsters, "adult-red-dragon") => json!({
                "index": "adult-red-dragon",
                "name": "Adult Red Dragon",
                "size": "Huge",
                "type": "dragon",
                "alignment": "chaotic evil",
                "armor_class": [{"type": "natural", "value": 19}],
                "hit_points": 256,
                "hit_dice": "19d12",
                "speed": {"walk": "40 ft.", "fly": "80 ft."},
                "strength": 27,
                "dexterity": 10,
                "constitution": 25,
                "intelligence": 16,
                "wisdom": 13,
                "charisma": 21,
                "damage_immunities": ["fire"],
                "senses": {"blindsight": "60 ft.", "passive_perception": 23},
                "languages": "Common, Draconic",
                "challenge_rating": 17.0,
                "proficiency_bonus": 6,
                "xp": 18000,
                "proficiencies": [
                    {"value": 13, "proficiency": {"index": "saving-throw-dex", "name": "Saving Throw: DEX"}},
                    {"value": 13, "proficiency": {"index": "skill-perception", "name": "Skill: Perception"}}
                ],
                "actions": [
                    {
                        "name": "Multiattack",
                        "desc": "The dragon makes three attacks.",
                        "multiattack_type": "actions",
                        "actions": [
                            {"action_name": "Bite", "count": 1, "type": "melee"},
                            {"action_name": "Claw", "count": 2, "type": "melee"}
                        ]
                    },
                    {
                        "name": "Bite",
                        "desc": "Melee weapon attack.",
                        "attack_bonus": 14,
                        "damage": [
                            {"damage_type": {"index": "piercing", "name": "Piercing"}, "damage_dice": "2d10+8"}
                        ]
                    }
                ],
                "legendary_actions": [
                    {"name": "Tail Attack", "desc": "The dragon makes a tail attack."}
                ],
                "special_abilities": [
                    {
                        "name": "Legendary Resistance",
                        "desc": "If the dragon fails a saving throw, it can choose to succeed instead.",
                        "usage": {"type": "per day", "times": 3}
                    }
                ]
            }),
            _ => return None,
        };
        Some(payload)
    }

    /// A source double serving the full fixture data set, any number of times.
    fn fixture_source() -> MockSourcePort {
        let mut mock = MockSourcePort::new();
        mock.expect_fetch_collection()
            .returning(|resource| Ok(fixture_collection(resource)));
        mock.expect_fetch_detail().returning(|resource, index| {
            fixture_detail(resource, index).ok_or(SourceError::Unavailable {
                resource: resource.path(),
                attempts: 5,
                message: format!("no fixture for {index}"),
            })
        });
        mock
    }

    async fn count(store: &Store, table: &str) -> i64 {
        let (count,): (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(store.pool())
            .await
            .expect("count rows");
        count
    }

    async fn pipeline_with(mock: MockSourcePort) -> IngestionPipeline {
        let store = Store::in_memory().await.expect("in-memory store");
        IngestionPipeline::new(Arc::new(mock), store)
    }

    #[tokio::test]
    async fn full_run_ingests_every_entity_type() {
        let pipeline = pipeline_with(fixture_source()).await;
        let summary = pipeline.run().await.expect("run succeeds");

        assert_eq!(
            summary.counts,
            RunCounts {
                races: 1,
                subraces: 1,
                spells: 1,
                classes: 1,
                subclasses: 1,
                traits: 1,
                equipment: 3,
                features: 1,
                conditions: 1,
                damage_types: 1,
                proficiencies: 1,
                monsters: 1,
            }
        );

        let store = pipeline.store();
        let (speed,): (i32,) = sqlx::query_as("SELECT speed FROM races WHERE idx = 'elf'")
            .fetch_one(store.pool())
            .await
            .expect("elf row");
        assert_eq!(speed, 30);

        let (race_index,): (String,) =
            sqlx::query_as("SELECT race_index FROM subraces WHERE idx = 'high-elf'")
                .fetch_one(store.pool())
                .await
                .expect("high-elf row");
        assert_eq!(race_index, "elf");

        assert_eq!(count(store, "ingestion_runs").await, 1);
    }

    #[tokio::test]
    async fn each_equipment_item_gets_exactly_one_facet() {
        let pipeline = pipeline_with(fixture_source()).await;
        pipeline.run().await.expect("run succeeds");
        let store = pipeline.store();

        for (table, expected_index) in [
            ("armor", "chain-mail"),
            ("weapons", "longsword"),
            ("tools", "smiths-tools"),
        ] {
            let rows: Vec<(String,)> =
                sqlx::query_as(&format!("SELECT equipment_index FROM {table}"))
                    .fetch_all(store.pool())
                    .await
                    .expect("facet rows");
            assert_eq!(rows.len(), 1, "{table} should have exactly one row");
            assert_eq!(rows[0].0, expected_index);
        }

        let (tool_type,): (String,) =
            sqlx::query_as("SELECT tool_type FROM tools WHERE equipment_index = 'smiths-tools'")
                .fetch_one(store.pool())
                .await
                .expect("tool row");
        assert_eq!(tool_type, "Artisan's Tools");
    }

    #[tokio::test]
    async fn monster_sub_collections_match_source_cardinality() {
        let pipeline = pipeline_with(fixture_source()).await;
        pipeline.run().await.expect("run succeeds");
        let store = pipeline.store();

        assert_eq!(count(store, "monster_proficiencies").await, 2);
        assert_eq!(count(store, "monster_actions").await, 2);
        assert_eq!(count(store, "monster_legendary_actions").await, 1);
        assert_eq!(count(store, "monster_special_abilities").await, 1);

        let owners: Vec<(String,)> =
            sqlx::query_as("SELECT DISTINCT monster_index FROM monster_actions")
                .fetch_all(store.pool())
                .await
                .expect("action owners");
        assert_eq!(owners, vec![("adult-red-dragon".to_string(),)]);

        let (subactions,): (String,) = sqlx::query_as(
            "SELECT subactions FROM monster_actions WHERE name = 'Multiattack'",
        )
        .fetch_one(store.pool())
        .await
        .expect("multiattack row");
        let subactions: Vec<Value> =
            serde_json::from_str(&subactions).expect("opaque subactions round-trip");
        assert_eq!(subactions.len(), 2);
    }

    #[tokio::test]
    async fn rerunning_against_an_unchanged_source_is_idempotent() {
        let pipeline = pipeline_with(fixture_source()).await;
        pipeline.run().await.expect("first run");
        let store = pipeline.store();

        let tables = [
            "races",
            "subraces",
            "spells",
            "classes",
            "subclasses",
            "traits",
            "equipment",
            "armor",
            "weapons",
            "tools",
            "equipment_properties",
            "equipment_property_links",
            "features",
            "conditions",
            "damage_types",
            "proficiencies",
            "monsters",
            "monster_proficiencies",
            "monster_actions",
            "monster_legendary_actions",
            "monster_special_abilities",
        ];
        let mut first = Vec::new();
        for table in tables {
            first.push(count(store, table).await);
        }

        pipeline.run().await.expect("second run");
        for (table, expected) in tables.iter().zip(first) {
            assert_eq!(
                count(store, table).await,
                expected,
                "{table} changed between identical runs"
            );
        }

        // Two committed runs, two bookkeeping rows.
        assert_eq!(count(store, "ingestion_runs").await, 2);
    }

    #[tokio::test]
    async fn missing_parent_race_fails_and_rolls_back_the_run() {
        let mut mock = MockSourcePort::new();
        mock.expect_fetch_collection().returning(|resource| {
            Ok(match resource {
                // No races at all, but a subrace that references one.
                Resource::Races => vec![],
                Resource::Subraces => refs(&["high-elf"]),
                _ => vec![],
            })
        });
        mock.expect_fetch_detail().returning(|resource, index| {
            fixture_detail(resource, index).ok_or(SourceError::EmptyIndex {
                resource: resource.path(),
            })
        });

        let pipeline = pipeline_with(mock).await;
        let error = pipeline.run().await.expect_err("run must fail");
        match error {
            IngestError::DanglingReference {
                entity,
                parent_index,
                ..
            } => {
                assert_eq!(entity, "subrace");
                assert_eq!(parent_index, "elf");
            }
            other => panic!("expected DanglingReference, got {other:?}"),
        }

        let store = pipeline.store();
        assert_eq!(count(store, "subraces").await, 0);
        assert_eq!(count(store, "ingestion_runs").await, 0);
    }

    #[tokio::test]
    async fn missing_parent_class_skips_the_subclass_but_commits_the_run() {
        let mut mock = MockSourcePort::new();
        mock.expect_fetch_collection().returning(|resource| {
            Ok(match resource {
                Resource::Classes => vec![],
                other => fixture_collection(other),
            })
        });
        mock.expect_fetch_detail().returning(|resource, index| {
            fixture_detail(resource, index).ok_or(SourceError::EmptyIndex {
                resource: resource.path(),
            })
        });

        let pipeline = pipeline_with(mock).await;
        let summary = pipeline.run().await.expect("run succeeds");

        assert_eq!(summary.counts.classes, 0);
        assert_eq!(summary.counts.subclasses, 0);
        assert_eq!(summary.counts.races, 1);

        let store = pipeline.store();
        assert_eq!(count(store, "subclasses").await, 0);
        assert_eq!(count(store, "ingestion_runs").await, 1);
    }

    #[tokio::test]
    async fn source_outage_discards_entity_types_already_loaded() {
        let mut mock = MockSourcePort::new();
        mock.expect_fetch_collection().returning(|resource| {
            match resource {
                Resource::Races => Ok(refs(&["elf"])),
                // Spells load after races; the outage must undo them too.
                Resource::Spells => Err(SourceError::Unavailable {
                    resource: resource.path(),
                    attempts: 5,
                    message: "connection refused".to_string(),
                }),
                _ => Ok(vec![]),
            }
        });
        mock.expect_fetch_detail().returning(|resource, index| {
            fixture_detail(resource, index).ok_or(SourceError::EmptyIndex {
                resource: resource.path(),
            })
        });

        let pipeline = pipeline_with(mock).await;
        let error = pipeline.run().await.expect_err("run must fail");
        assert!(matches!(
            error,
            IngestError::Source(SourceError::Unavailable { attempts: 5, .. })
        ));

        let store = pipeline.store();
        assert_eq!(count(store, "races").await, 0);
        assert_eq!(count(store, "ingestion_runs").await, 0);
    }
}
