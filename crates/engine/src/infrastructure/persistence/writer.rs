//! Run-scoped write handle for the ingestion pipeline.

use lorevault_domain::{
    Armor, Class, Condition, DamageType, Equipment, EquipmentProperty, EquipmentPropertyLink,
    Feature, IngestionRun, Monster, MonsterAction, MonsterLegendaryAction, MonsterProficiency,
    MonsterSpecialAbility, Proficiency, Race, RaceTrait, Spell, Subclass, Subrace, Tool, Weapon,
};
use serde::Serialize;
use sqlx::{Sqlite, Transaction};

use super::store::StoreError;

fn json<T: Serialize>(value: &T) -> Result<String, StoreError> {
    serde_json::to_string(value).map_err(StoreError::serialization)
}

fn json_opt<T: Serialize>(value: &Option<T>) -> Result<Option<String>, StoreError> {
    value
        .as_ref()
        .map(|v| serde_json::to_string(v).map_err(StoreError::serialization))
        .transpose()
}

/// Unit-of-work for one ingestion run.
///
/// Wraps a single transaction; every mapping operation receives this handle
/// explicitly instead of sharing ambient connection state. Dropping the
/// writer without [`RunWriter::commit`] rolls the whole run back.
pub struct RunWriter<'t> {
    tx: Transaction<'t, Sqlite>,
    records_written: i64,
}

impl<'t> RunWriter<'t> {
    pub(crate) fn new(tx: Transaction<'t, Sqlite>) -> Self {
        Self {
            tx,
            records_written: 0,
        }
    }

    /// Rows written so far in this run.
    pub fn records_written(&self) -> i64 {
        self.records_written
    }

    /// Commit the run. Returns the total rows written.
    pub async fn commit(self) -> Result<i64, StoreError> {
        self.tx
            .commit()
            .await
            .map_err(|e| StoreError::database("commit", e))?;
        Ok(self.records_written)
    }

    /// Clear the full-refresh entity types (races, subraces, classes,
    /// subclasses) so the run reflects the exact current source set.
    /// Children are deleted before their parents to keep foreign keys happy.
    pub async fn clear_replaced(&mut self) -> Result<(), StoreError> {
        for table in ["subraces", "races", "subclasses", "classes"] {
            sqlx::query(&format!("DELETE FROM {table}"))
                .execute(&mut *self.tx)
                .await
                .map_err(|e| StoreError::database("clear_replaced", e))?;
        }
        Ok(())
    }

    // =========================================================================
    // Existence probes (reference resolution)
    // =========================================================================

    async fn exists(&mut self, query: &'static str, index: &str) -> Result<bool, StoreError> {
        let row = sqlx::query(query)
            .bind(index)
            .fetch_optional(&mut *self.tx)
            .await
            .map_err(|e| StoreError::database("exists", e))?;
        Ok(row.is_some())
    }

    pub async fn race_exists(&mut self, index: &str) -> Result<bool, StoreError> {
        self.exists("SELECT 1 FROM races WHERE idx = ?", index).await
    }

    pub async fn class_exists(&mut self, index: &str) -> Result<bool, StoreError> {
        self.exists("SELECT 1 FROM classes WHERE idx = ?", index).await
    }

    // =========================================================================
    // Races
    // =========================================================================

    pub async fn upsert_race(&mut self, race: &Race) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO races (idx, name, speed, ability_bonuses, alignment, age, size,
                               size_description, starting_proficiencies, languages,
                               language_desc, traits, url)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(idx) DO UPDATE SET
                name = excluded.name,
                speed = excluded.speed,
                ability_bonuses = excluded.ability_bonuses,
                alignment = excluded.alignment,
                age = excluded.age,
                size = excluded.size,
                size_description = excluded.size_description,
                starting_proficiencies = excluded.starting_proficiencies,
                languages = excluded.languages,
                language_desc = excluded.language_desc,
                traits = excluded.traits,
                url = excluded.url
            "#,
        )
        .bind(&race.index)
        .bind(&race.name)
        .bind(race.speed)
        .bind(json(&race.ability_bonuses)?)
        .bind(&race.alignment)
        .bind(&race.age)
        .bind(&race.size)
        .bind(&race.size_description)
        .bind(json(&race.starting_proficiencies)?)
        .bind(json(&race.languages)?)
        .bind(&race.language_desc)
        .bind(json(&race.traits)?)
        .bind(&race.url)
        .execute(&mut *self.tx)
        .await
        .map_err(|e| StoreError::database("upsert_race", e))?;

        self.records_written += 1;
        Ok(())
    }

    pub async fn upsert_subrace(&mut self, subrace: &Subrace) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO subraces (idx, name, race_index, description, ability_bonuses,
                                  racial_traits, languages, starting_proficiencies, url)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(idx) DO UPDATE SET
                name = excluded.name,
                race_index = excluded.race_index,
                description = excluded.description,
                ability_bonuses = excluded.ability_bonuses,
                racial_traits = excluded.racial_traits,
                languages = excluded.languages,
                starting_proficiencies = excluded.starting_proficiencies,
                url = excluded.url
            "#,
        )
        .bind(&subrace.index)
        .bind(&subrace.name)
        .bind(&subrace.race_index)
        .bind(&subrace.desc)
        .bind(json(&subrace.ability_bonuses)?)
        .bind(json(&subrace.racial_traits)?)
        .bind(json(&subrace.languages)?)
        .bind(json(&subrace.starting_proficiencies)?)
        .bind(&subrace.url)
        .execute(&mut *self.tx)
        .await
        .map_err(|e| StoreError::database("upsert_subrace", e))?;

        self.records_written += 1;
        Ok(())
    }

    // =========================================================================
    // Spells
    // =========================================================================

    pub async fn upsert_spell(&mut self, spell: &Spell) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO spells (idx, name, description, higher_level, casting_range,
                                components, material, duration, concentration, casting_time,
                                level, attack_type, damage, school, classes, subclasses, url)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(idx) DO UPDATE SET
                name = excluded.name,
                description = excluded.description,
                higher_level = excluded.higher_level,
                casting_range = excluded.casting_range,
                components = excluded.components,
                material = excluded.material,
                duration = excluded.duration,
                concentration = excluded.concentration,
                casting_time = excluded.casting_time,
                level = excluded.level,
                attack_type = excluded.attack_type,
                damage = excluded.damage,
                school = excluded.school,
                classes = excluded.classes,
                subclasses = excluded.subclasses,
                url = excluded.url
            "#,
        )
        .bind(&spell.index)
        .bind(&spell.name)
        .bind(json(&spell.desc)?)
        .bind(json(&spell.higher_level)?)
        .bind(&spell.range)
        .bind(json(&spell.components)?)
        .bind(&spell.material)
        .bind(&spell.duration)
        .bind(spell.concentration)
        .bind(&spell.casting_time)
        .bind(spell.level)
        .bind(&spell.attack_type)
        .bind(json(&spell.damage)?)
        .bind(json_opt(&spell.school)?)
        .bind(json(&spell.classes)?)
        .bind(json(&spell.subclasses)?)
        .bind(&spell.url)
        .execute(&mut *self.tx)
        .await
        .map_err(|e| StoreError::database("upsert_spell", e))?;

        self.records_written += 1;
        Ok(())
    }

    // =========================================================================
    // Classes
    // =========================================================================

    pub async fn upsert_class(&mut self, class: &Class) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO classes (idx, name, hit_die, proficiency_choices, proficiencies,
                                 saving_throws, starting_equipment, starting_equipment_options,
                                 multi_classing, spellcasting, url)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(idx) DO UPDATE SET
                name = excluded.name,
                hit_die = excluded.hit_die,
                proficiency_choices = excluded.proficiency_choices,
                proficiencies = excluded.proficiencies,
                saving_throws = excluded.saving_throws,
                starting_equipment = excluded.starting_equipment,
                starting_equipment_options = excluded.starting_equipment_options,
                multi_classing = excluded.multi_classing,
                spellcasting = excluded.spellcasting,
                url = excluded.url
            "#,
        )
        .bind(&class.index)
        .bind(&class.name)
        .bind(class.hit_die)
        .bind(json(&class.proficiency_choices)?)
        .bind(json(&class.proficiencies)?)
        .bind(json(&class.saving_throws)?)
        .bind(json(&class.starting_equipment)?)
        .bind(json(&class.starting_equipment_options)?)
        .bind(json(&class.multi_classing)?)
        .bind(json(&class.spellcasting)?)
        .bind(&class.url)
        .execute(&mut *self.tx)
        .await
        .map_err(|e| StoreError::database("upsert_class", e))?;

        self.records_written += 1;
        Ok(())
    }

    pub async fn upsert_subclass(&mut self, subclass: &Subclass) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO subclasses (idx, name, class_index, url)
            VALUES (?, ?, ?, ?)
            ON CONFLICT(idx) DO UPDATE SET
                name = excluded.name,
                class_index = excluded.class_index,
                url = excluded.url
            "#,
        )
        .bind(&subclass.index)
        .bind(&subclass.name)
        .bind(&subclass.class_index)
        .bind(&subclass.url)
        .execute(&mut *self.tx)
        .await
        .map_err(|e| StoreError::database("upsert_subclass", e))?;

        self.records_written += 1;
        Ok(())
    }

    // =========================================================================
    // Traits and other flat reference entities
    // =========================================================================

    pub async fn upsert_trait(&mut self, race_trait: &RaceTrait) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO traits (idx, name, description, races, subraces, url)
            VALUES (?, ?, ?, ?, ?, ?)
            ON CONFLICT(idx) DO UPDATE SET
                name = excluded.name,
                description = excluded.description,
                races = excluded.races,
                subraces = excluded.subraces,
                url = excluded.url
            "#,
        )
        .bind(&race_trait.index)
        .bind(&race_trait.name)
        .bind(&race_trait.desc)
        .bind(json(&race_trait.races)?)
        .bind(json(&race_trait.subraces)?)
        .bind(&race_trait.url)
        .execute(&mut *self.tx)
        .await
        .map_err(|e| StoreError::database("upsert_trait", e))?;

        self.records_written += 1;
        Ok(())
    }

    pub async fn upsert_feature(&mut self, feature: &Feature) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO features (idx, name, class_index, subclass_index, level, optional,
                                  description, url)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(idx) DO UPDATE SET
                name = excluded.name,
                class_index = excluded.class_index,
                subclass_index = excluded.subclass_index,
                level = excluded.level,
                optional = excluded.optional,
                description = excluded.description,
                url = excluded.url
            "#,
        )
        .bind(&feature.index)
        .bind(&feature.name)
        .bind(&feature.class_index)
        .bind(&feature.subclass_index)
        .bind(feature.level)
        .bind(feature.optional)
        .bind(&feature.desc)
        .bind(&feature.url)
        .execute(&mut *self.tx)
        .await
        .map_err(|e| StoreError::database("upsert_feature", e))?;

        self.records_written += 1;
        Ok(())
    }

    pub async fn upsert_condition(&mut self, condition: &Condition) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO conditions (idx, name, description, url)
            VALUES (?, ?, ?, ?)
            ON CONFLICT(idx) DO UPDATE SET
                name = excluded.name,
                description = excluded.description,
                url = excluded.url
            "#,
        )
        .bind(&condition.index)
        .bind(&condition.name)
        .bind(&condition.desc)
        .bind(&condition.url)
        .execute(&mut *self.tx)
        .await
        .map_err(|e| StoreError::database("upsert_condition", e))?;

        self.records_written += 1;
        Ok(())
    }

    pub async fn upsert_damage_type(&mut self, damage_type: &DamageType) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO damage_types (idx, name, description, url)
            VALUES (?, ?, ?, ?)
            ON CONFLICT(idx) DO UPDATE SET
                name = excluded.name,
                description = excluded.description,
                url = excluded.url
            "#,
        )
        .bind(&damage_type.index)
        .bind(&damage_type.name)
        .bind(&damage_type.desc)
        .bind(&damage_type.url)
        .execute(&mut *self.tx)
        .await
        .map_err(|e| StoreError::database("upsert_damage_type", e))?;

        self.records_written += 1;
        Ok(())
    }

    pub async fn upsert_proficiency(&mut self, proficiency: &Proficiency) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO proficiencies (idx, name, kind, url)
            VALUES (?, ?, ?, ?)
            ON CONFLICT(idx) DO UPDATE SET
                name = excluded.name,
                kind = excluded.kind,
                url = excluded.url
            "#,
        )
        .bind(&proficiency.index)
        .bind(&proficiency.name)
        .bind(&proficiency.kind)
        .bind(&proficiency.url)
        .execute(&mut *self.tx)
        .await
        .map_err(|e| StoreError::database("upsert_proficiency", e))?;

        self.records_written += 1;
        Ok(())
    }

    // =========================================================================
    // Equipment and facets
    // =========================================================================

    pub async fn upsert_equipment(&mut self, equipment: &Equipment) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO equipment (idx, name, equipment_category, cost_quantity, cost_unit,
                                   weight, description, special, url)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(idx) DO UPDATE SET
                name = excluded.name,
                equipment_category = excluded.equipment_category,
                cost_quantity = excluded.cost_quantity,
                cost_unit = excluded.cost_unit,
                weight = excluded.weight,
                description = excluded.description,
                special = excluded.special,
                url = excluded.url
            "#,
        )
        .bind(&equipment.index)
        .bind(&equipment.name)
        .bind(&equipment.equipment_category)
        .bind(equipment.cost.quantity)
        .bind(&equipment.cost.unit)
        .bind(equipment.weight)
        .bind(json(&equipment.desc)?)
        .bind(json(&equipment.special)?)
        .bind(&equipment.url)
        .execute(&mut *self.tx)
        .await
        .map_err(|e| StoreError::database("upsert_equipment", e))?;

        self.records_written += 1;
        Ok(())
    }

    pub async fn upsert_armor(&mut self, armor: &Armor) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO armor (equipment_index, armor_category, base_ac, dex_bonus,
                               max_dex_bonus, str_minimum, stealth_disadvantage)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(equipment_index) DO UPDATE SET
                armor_category = excluded.armor_category,
                base_ac = excluded.base_ac,
                dex_bonus = excluded.dex_bonus,
                max_dex_bonus = excluded.max_dex_bonus,
                str_minimum = excluded.str_minimum,
                stealth_disadvantage = excluded.stealth_disadvantage
            "#,
        )
        .bind(&armor.equipment_index)
        .bind(&armor.armor_category)
        .bind(armor.armor_class.base)
        .bind(armor.armor_class.dex_bonus)
        .bind(armor.armor_class.max_bonus)
        .bind(armor.str_minimum)
        .bind(armor.stealth_disadvantage)
        .execute(&mut *self.tx)
        .await
        .map_err(|e| StoreError::database("upsert_armor", e))?;

        self.records_written += 1;
        Ok(())
    }

    pub async fn upsert_weapon(&mut self, weapon: &Weapon) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO weapons (equipment_index, weapon_category, weapon_range, category_range,
                                 damage_dice, damage_type, range_normal, range_long,
                                 throw_range_normal, throw_range_long)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(equipment_index) DO UPDATE SET
                weapon_category = excluded.weapon_category,
                weapon_range = excluded.weapon_range,
                category_range = excluded.category_range,
                damage_dice = excluded.damage_dice,
                damage_type = excluded.damage_type,
                range_normal = excluded.range_normal,
                range_long = excluded.range_long,
                throw_range_normal = excluded.throw_range_normal,
                throw_range_long = excluded.throw_range_long
            "#,
        )
        .bind(&weapon.equipment_index)
        .bind(&weapon.weapon_category)
        .bind(&weapon.weapon_range)
        .bind(&weapon.category_range)
        .bind(&weapon.damage.damage_dice)
        .bind(&weapon.damage.damage_type.name)
        .bind(weapon.range.normal)
        .bind(weapon.range.long)
        .bind(weapon.throw_range.normal)
        .bind(weapon.throw_range.long)
        .execute(&mut *self.tx)
        .await
        .map_err(|e| StoreError::database("upsert_weapon", e))?;

        self.records_written += 1;
        Ok(())
    }

    pub async fn upsert_tool(&mut self, tool: &Tool) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO tools (equipment_index, tool_type)
            VALUES (?, ?)
            ON CONFLICT(equipment_index) DO UPDATE SET
                tool_type = excluded.tool_type
            "#,
        )
        .bind(&tool.equipment_index)
        .bind(&tool.tool_type)
        .execute(&mut *self.tx)
        .await
        .map_err(|e| StoreError::database("upsert_tool", e))?;

        self.records_written += 1;
        Ok(())
    }

    /// Create a shared property row if its index is not yet known.
    pub async fn insert_property_if_unknown(
        &mut self,
        property: &EquipmentProperty,
    ) -> Result<(), StoreError> {
        let result = sqlx::query(
            r#"
            INSERT INTO equipment_properties (idx, name, url)
            VALUES (?, ?, ?)
            ON CONFLICT(idx) DO NOTHING
            "#,
        )
        .bind(&property.index)
        .bind(&property.name)
        .bind(&property.url)
        .execute(&mut *self.tx)
        .await
        .map_err(|e| StoreError::database("insert_property_if_unknown", e))?;

        self.records_written += result.rows_affected() as i64;
        Ok(())
    }

    /// Drop all property links of one equipment item; the current set is
    /// re-inserted afterwards so repeated runs never accumulate links.
    pub async fn clear_property_links(&mut self, equipment_index: &str) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM equipment_property_links WHERE equipment_index = ?")
            .bind(equipment_index)
            .execute(&mut *self.tx)
            .await
            .map_err(|e| StoreError::database("clear_property_links", e))?;
        Ok(())
    }

    pub async fn insert_property_link(
        &mut self,
        link: &EquipmentPropertyLink,
    ) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO equipment_property_links (equipment_index, property_index) VALUES (?, ?)",
        )
        .bind(&link.equipment_index)
        .bind(&link.property_index)
        .execute(&mut *self.tx)
        .await
        .map_err(|e| StoreError::database("insert_property_link", e))?;

        self.records_written += 1;
        Ok(())
    }

    // =========================================================================
    // Monsters
    // =========================================================================

    /// Upsert a monster's stat block and clear its owned collections; the
    /// caller re-inserts the current set right after.
    pub async fn upsert_monster(&mut self, monster: &Monster) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO monsters (idx, name, size, kind, alignment, armor_class, hit_points,
                                  hit_dice, hit_points_roll, speed, strength, dexterity,
                                  constitution, intelligence, wisdom, charisma,
                                  damage_vulnerabilities, damage_resistances, damage_immunities,
                                  condition_immunities, senses, languages, challenge_rating,
                                  proficiency_bonus, xp, image, url)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(idx) DO UPDATE SET
                name = excluded.name,
                size = excluded.size,
                kind = excluded.kind,
                alignment = excluded.alignment,
                armor_class = excluded.armor_class,
                hit_points = excluded.hit_points,
                hit_dice = excluded.hit_dice,
                hit_points_roll = excluded.hit_points_roll,
                speed = excluded.speed,
                strength = excluded.strength,
                dexterity = excluded.dexterity,
                constitution = excluded.constitution,
                intelligence = excluded.intelligence,
                wisdom = excluded.wisdom,
                charisma = excluded.charisma,
                damage_vulnerabilities = excluded.damage_vulnerabilities,
                damage_resistances = excluded.damage_resistances,
                damage_immunities = excluded.damage_immunities,
                condition_immunities = excluded.condition_immunities,
                senses = excluded.senses,
                languages = excluded.languages,
                challenge_rating = excluded.challenge_rating,
                proficiency_bonus = excluded.proficiency_bonus,
                xp = excluded.xp,
                image = excluded.image,
                url = excluded.url
            "#,
        )
        .bind(&monster.index)
        .bind(&monster.name)
        .bind(&monster.size)
        .bind(&monster.kind)
        .bind(&monster.alignment)
        .bind(json(&monster.armor_class)?)
        .bind(monster.hit_points)
        .bind(&monster.hit_dice)
        .bind(&monster.hit_points_roll)
        .bind(json(&monster.speed)?)
        .bind(monster.strength)
        .bind(monster.dexterity)
        .bind(monster.constitution)
        .bind(monster.intelligence)
        .bind(monster.wisdom)
        .bind(monster.charisma)
        .bind(json(&monster.damage_vulnerabilities)?)
        .bind(json(&monster.damage_resistances)?)
        .bind(json(&monster.damage_immunities)?)
        .bind(json(&monster.condition_immunities)?)
        .bind(json(&monster.senses)?)
        .bind(&monster.languages)
        .bind(monster.challenge_rating)
        .bind(monster.proficiency_bonus)
        .bind(monster.xp)
        .bind(&monster.image)
        .bind(&monster.url)
        .execute(&mut *self.tx)
        .await
        .map_err(|e| StoreError::database("upsert_monster", e))?;

        for table in [
            "monster_proficiencies",
            "monster_actions",
            "monster_legendary_actions",
            "monster_special_abilities",
        ] {
            sqlx::query(&format!("DELETE FROM {table} WHERE monster_index = ?"))
                .bind(&monster.index)
                .execute(&mut *self.tx)
                .await
                .map_err(|e| StoreError::database("upsert_monster", e))?;
        }

        self.records_written += 1;
        Ok(())
    }

    pub async fn insert_monster_proficiency(
        &mut self,
        proficiency: &MonsterProficiency,
    ) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO monster_proficiencies (monster_index, proficiency_index,
                                               proficiency_name, value, url)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&proficiency.monster_index)
        .bind(&proficiency.proficiency.index)
        .bind(&proficiency.proficiency.name)
        .bind(proficiency.value)
        .bind(&proficiency.proficiency.url)
        .execute(&mut *self.tx)
        .await
        .map_err(|e| StoreError::database("insert_monster_proficiency", e))?;

        self.records_written += 1;
        Ok(())
    }

    pub async fn insert_monster_action(&mut self, action: &MonsterAction) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO monster_actions (monster_index, name, description, attack_bonus,
                                         damage, dc, usage, multiattack_type, subactions)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&action.monster_index)
        .bind(&action.name)
        .bind(&action.desc)
        .bind(action.attack_bonus)
        .bind(json(&action.damage)?)
        .bind(json_opt(&action.dc)?)
        .bind(json_opt(&action.usage)?)
        .bind(&action.multiattack_type)
        .bind(json(&action.subactions)?)
        .execute(&mut *self.tx)
        .await
        .map_err(|e| StoreError::database("insert_monster_action", e))?;

        self.records_written += 1;
        Ok(())
    }

    pub async fn insert_monster_legendary_action(
        &mut self,
        action: &MonsterLegendaryAction,
    ) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO monster_legendary_actions (monster_index, name, description, damage, dc)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&action.monster_index)
        .bind(&action.name)
        .bind(&action.desc)
        .bind(json(&action.damage)?)
        .bind(json_opt(&action.dc)?)
        .execute(&mut *self.tx)
        .await
        .map_err(|e| StoreError::database("insert_monster_legendary_action", e))?;

        self.records_written += 1;
        Ok(())
    }

    pub async fn insert_monster_special_ability(
        &mut self,
        ability: &MonsterSpecialAbility,
    ) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO monster_special_abilities (monster_index, name, description, usage, damage)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&ability.monster_index)
        .bind(&ability.name)
        .bind(&ability.desc)
        .bind(json_opt(&ability.usage)?)
        .bind(json(&ability.damage)?)
        .execute(&mut *self.tx)
        .await
        .map_err(|e| StoreError::database("insert_monster_special_ability", e))?;

        self.records_written += 1;
        Ok(())
    }

    // =========================================================================
    // Run bookkeeping
    // =========================================================================

    /// Record the run row inside the same transaction as the data it covers.
    pub async fn record_run(&mut self, run: &IngestionRun) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO ingestion_runs (id, started_at, finished_at, records_written)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(run.id.to_string())
        .bind(run.started_at.to_rfc3339())
        .bind(run.finished_at.to_rfc3339())
        .bind(run.records_written)
        .execute(&mut *self.tx)
        .await
        .map_err(|e| StoreError::database("record_run", e))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use lorevault_domain::Race;

    use crate::infrastructure::persistence::Store;

    fn race(index: &str, name: &str, speed: i32) -> Race {
        Race {
            index: index.to_string(),
            name: name.to_string(),
            speed,
            ..Race::default()
        }
    }

    #[tokio::test]
    async fn upsert_by_index_overwrites_instead_of_duplicating() {
        let store = Store::in_memory().await.expect("in-memory store");
        let mut writer = store.begin_run().await.expect("begin run");

        writer.upsert_race(&race("elf", "Elf", 30)).await.expect("first write");
        writer.upsert_race(&race("elf", "Elf", 35)).await.expect("second write");
        writer.commit().await.expect("commit");

        let row = sqlx::query_as::<_, (i64, i32)>("SELECT COUNT(*), MAX(speed) FROM races")
            .fetch_one(store.pool())
            .await
            .expect("count races");
        assert_eq!(row, (1, 35));
    }

    #[tokio::test]
    async fn dropped_writer_rolls_the_run_back() {
        let store = Store::in_memory().await.expect("in-memory store");
        {
            let mut writer = store.begin_run().await.expect("begin run");
            writer.upsert_race(&race("orc", "Orc", 30)).await.expect("write");
            // No commit: the transaction dies with the writer.
        }

        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM races")
            .fetch_one(store.pool())
            .await
            .expect("count races");
        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn property_links_are_replaced_per_item() {
        let store = Store::in_memory().await.expect("in-memory store");
        let mut writer = store.begin_run().await.expect("begin run");

        let equipment = lorevault_domain::Equipment {
            index: "longsword".to_string(),
            name: "Longsword".to_string(),
            ..Default::default()
        };
        writer.upsert_equipment(&equipment).await.expect("equipment");

        let property = lorevault_domain::EquipmentProperty {
            index: "versatile".to_string(),
            name: "Versatile".to_string(),
            url: String::new(),
        };
        for _ in 0..2 {
            writer
                .insert_property_if_unknown(&property)
                .await
                .expect("property");
            writer
                .clear_property_links("longsword")
                .await
                .expect("clear links");
            writer
                .insert_property_link(&lorevault_domain::EquipmentPropertyLink {
                    equipment_index: "longsword".to_string(),
                    property_index: "versatile".to_string(),
                })
                .await
                .expect("link");
        }
        writer.commit().await.expect("commit");

        let (properties,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM equipment_properties")
            .fetch_one(store.pool())
            .await
            .expect("count properties");
        let (links,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM equipment_property_links")
            .fetch_one(store.pool())
            .await
            .expect("count links");
        assert_eq!(properties, 1);
        assert_eq!(links, 1);
    }

    #[tokio::test]
    async fn parent_probes_see_writes_from_the_same_run() {
        let store = Store::in_memory().await.expect("in-memory store");
        let mut writer = store.begin_run().await.expect("begin run");

        assert!(!writer.race_exists("elf").await.expect("probe"));
        writer.upsert_race(&race("elf", "Elf", 30)).await.expect("write");
        assert!(writer.race_exists("elf").await.expect("probe"));
    }
}
