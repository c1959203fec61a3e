//! Reference store schema.
//!
//! Entity tables key on `idx`, the source-assigned index (`index` itself is
//! an SQL keyword). Nested structures are stored as JSON text columns.
//! Monster sub-collections and equipment-property links have no natural key
//! upstream and use rowids; they are replaced per owner on every run.

pub(crate) const TABLES: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS races (
        idx TEXT PRIMARY KEY,
        name TEXT NOT NULL,
        speed INTEGER NOT NULL DEFAULT 0,
        ability_bonuses TEXT NOT NULL DEFAULT '[]',
        alignment TEXT NOT NULL DEFAULT '',
        age TEXT NOT NULL DEFAULT '',
        size TEXT NOT NULL DEFAULT '',
        size_description TEXT NOT NULL DEFAULT '',
        starting_proficiencies TEXT NOT NULL DEFAULT '[]',
        languages TEXT NOT NULL DEFAULT '[]',
        language_desc TEXT NOT NULL DEFAULT '',
        traits TEXT NOT NULL DEFAULT '[]',
        url TEXT NOT NULL DEFAULT ''
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS subraces (
        idx TEXT PRIMARY KEY,
        name TEXT NOT NULL,
        race_index TEXT NOT NULL REFERENCES races(idx),
        description TEXT NOT NULL DEFAULT '',
        ability_bonuses TEXT NOT NULL DEFAULT '[]',
        racial_traits TEXT NOT NULL DEFAULT '[]',
        languages TEXT NOT NULL DEFAULT '[]',
        starting_proficiencies TEXT NOT NULL DEFAULT '[]',
        url TEXT NOT NULL DEFAULT ''
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS spells (
        idx TEXT PRIMARY KEY,
        name TEXT NOT NULL,
        description TEXT NOT NULL DEFAULT '[]',
        higher_level TEXT NOT NULL DEFAULT '[]',
        casting_range TEXT NOT NULL DEFAULT '',
        components TEXT NOT NULL DEFAULT '[]',
        material TEXT NOT NULL DEFAULT '',
        duration TEXT NOT NULL DEFAULT '',
        concentration INTEGER NOT NULL DEFAULT 0,
        casting_time TEXT NOT NULL DEFAULT '',
        level INTEGER NOT NULL DEFAULT 0,
        attack_type TEXT NOT NULL DEFAULT '',
        damage TEXT NOT NULL DEFAULT '{}',
        school TEXT,
        classes TEXT NOT NULL DEFAULT '[]',
        subclasses TEXT NOT NULL DEFAULT '[]',
        url TEXT NOT NULL DEFAULT ''
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS classes (
        idx TEXT PRIMARY KEY,
        name TEXT NOT NULL,
        hit_die INTEGER NOT NULL DEFAULT 0,
        proficiency_choices TEXT NOT NULL DEFAULT '[]',
        proficiencies TEXT NOT NULL DEFAULT '[]',
        saving_throws TEXT NOT NULL DEFAULT '[]',
        starting_equipment TEXT NOT NULL DEFAULT '[]',
        starting_equipment_options TEXT NOT NULL DEFAULT '[]',
        multi_classing TEXT NOT NULL DEFAULT '{}',
        spellcasting TEXT NOT NULL DEFAULT '{}',
        url TEXT NOT NULL DEFAULT ''
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS subclasses (
        idx TEXT PRIMARY KEY,
        name TEXT NOT NULL,
        class_index TEXT NOT NULL REFERENCES classes(idx),
        url TEXT NOT NULL DEFAULT ''
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS traits (
        idx TEXT PRIMARY KEY,
        name TEXT NOT NULL,
        description TEXT NOT NULL DEFAULT '',
        races TEXT NOT NULL DEFAULT '[]',
        subraces TEXT NOT NULL DEFAULT '[]',
        url TEXT NOT NULL DEFAULT ''
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS equipment (
        idx TEXT PRIMARY KEY,
        name TEXT NOT NULL,
        equipment_category TEXT NOT NULL DEFAULT '',
        cost_quantity INTEGER NOT NULL DEFAULT 0,
        cost_unit TEXT NOT NULL DEFAULT '',
        weight REAL NOT NULL DEFAULT 0,
        description TEXT NOT NULL DEFAULT '[]',
        special TEXT NOT NULL DEFAULT '[]',
        url TEXT NOT NULL DEFAULT ''
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS armor (
        equipment_index TEXT PRIMARY KEY REFERENCES equipment(idx),
        armor_category TEXT NOT NULL DEFAULT '',
        base_ac INTEGER NOT NULL DEFAULT 0,
        dex_bonus INTEGER NOT NULL DEFAULT 0,
        max_dex_bonus INTEGER,
        str_minimum INTEGER NOT NULL DEFAULT 0,
        stealth_disadvantage INTEGER NOT NULL DEFAULT 0
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS weapons (
        equipment_index TEXT PRIMARY KEY REFERENCES equipment(idx),
        weapon_category TEXT NOT NULL DEFAULT '',
        weapon_range TEXT NOT NULL DEFAULT '',
        category_range TEXT NOT NULL DEFAULT '',
        damage_dice TEXT NOT NULL DEFAULT '',
        damage_type TEXT NOT NULL DEFAULT '',
        range_normal INTEGER NOT NULL DEFAULT 0,
        range_long INTEGER NOT NULL DEFAULT 0,
        throw_range_normal INTEGER NOT NULL DEFAULT 0,
        throw_range_long INTEGER NOT NULL DEFAULT 0
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS tools (
        equipment_index TEXT PRIMARY KEY REFERENCES equipment(idx),
        tool_type TEXT NOT NULL DEFAULT ''
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS equipment_properties (
        idx TEXT PRIMARY KEY,
        name TEXT NOT NULL DEFAULT '',
        url TEXT NOT NULL DEFAULT ''
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS equipment_property_links (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        equipment_index TEXT NOT NULL REFERENCES equipment(idx),
        property_index TEXT NOT NULL REFERENCES equipment_properties(idx)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS features (
        idx TEXT PRIMARY KEY,
        name TEXT NOT NULL,
        class_index TEXT NOT NULL DEFAULT '',
        subclass_index TEXT NOT NULL DEFAULT '',
        level INTEGER NOT NULL DEFAULT 0,
        optional INTEGER NOT NULL DEFAULT 0,
        description TEXT NOT NULL DEFAULT '',
        url TEXT NOT NULL DEFAULT ''
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS conditions (
        idx TEXT PRIMARY KEY,
        name TEXT NOT NULL,
        description TEXT NOT NULL DEFAULT '',
        url TEXT NOT NULL DEFAULT ''
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS damage_types (
        idx TEXT PRIMARY KEY,
        name TEXT NOT NULL,
        description TEXT NOT NULL DEFAULT '',
        url TEXT NOT NULL DEFAULT ''
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS proficiencies (
        idx TEXT PRIMARY KEY,
        name TEXT NOT NULL,
        kind TEXT NOT NULL DEFAULT '',
        url TEXT NOT NULL DEFAULT ''
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS monsters (
        idx TEXT PRIMARY KEY,
        name TEXT NOT NULL,
        size TEXT NOT NULL DEFAULT '',
        kind TEXT NOT NULL DEFAULT '',
        alignment TEXT NOT NULL DEFAULT '',
        armor_class TEXT NOT NULL DEFAULT '[]',
        hit_points INTEGER NOT NULL DEFAULT 0,
        hit_dice TEXT NOT NULL DEFAULT '',
        hit_points_roll TEXT NOT NULL DEFAULT '',
        speed TEXT NOT NULL DEFAULT '{}',
        strength INTEGER NOT NULL DEFAULT 0,
        dexterity INTEGER NOT NULL DEFAULT 0,
        constitution INTEGER NOT NULL DEFAULT 0,
        intelligence INTEGER NOT NULL DEFAULT 0,
        wisdom INTEGER NOT NULL DEFAULT 0,
        charisma INTEGER NOT NULL DEFAULT 0,
        damage_vulnerabilities TEXT NOT NULL DEFAULT '[]',
        damage_resistances TEXT NOT NULL DEFAULT '[]',
        damage_immunities TEXT NOT NULL DEFAULT '[]',
        condition_immunities TEXT NOT NULL DEFAULT '[]',
        senses TEXT NOT NULL DEFAULT '{}',
        languages TEXT NOT NULL DEFAULT '',
        challenge_rating REAL NOT NULL DEFAULT 0,
        proficiency_bonus INTEGER NOT NULL DEFAULT 0,
        xp INTEGER NOT NULL DEFAULT 0,
        image TEXT NOT NULL DEFAULT '',
        url TEXT NOT NULL DEFAULT ''
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS monster_proficiencies (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        monster_index TEXT NOT NULL REFERENCES monsters(idx),
        proficiency_index TEXT NOT NULL DEFAULT '',
        proficiency_name TEXT NOT NULL DEFAULT '',
        value INTEGER NOT NULL DEFAULT 0,
        url TEXT NOT NULL DEFAULT ''
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS monster_actions (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        monster_index TEXT NOT NULL REFERENCES monsters(idx),
        name TEXT NOT NULL DEFAULT '',
        description TEXT NOT NULL DEFAULT '',
        attack_bonus INTEGER,
        damage TEXT NOT NULL DEFAULT '[]',
        dc TEXT,
        usage TEXT,
        multiattack_type TEXT NOT NULL DEFAULT '',
        subactions TEXT NOT NULL DEFAULT '[]'
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS monster_legendary_actions (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        monster_index TEXT NOT NULL REFERENCES monsters(idx),
        name TEXT NOT NULL DEFAULT '',
        description TEXT NOT NULL DEFAULT '',
        damage TEXT NOT NULL DEFAULT '[]',
        dc TEXT
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS monster_special_abilities (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        monster_index TEXT NOT NULL REFERENCES monsters(idx),
        name TEXT NOT NULL DEFAULT '',
        description TEXT NOT NULL DEFAULT '',
        usage TEXT,
        damage TEXT NOT NULL DEFAULT '[]'
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS ingestion_runs (
        id TEXT PRIMARY KEY,
        started_at TEXT NOT NULL,
        finished_at TEXT NOT NULL,
        records_written INTEGER NOT NULL
    )
    "#,
];

pub(crate) const INDEXES: &[&str] = &[
    "CREATE INDEX IF NOT EXISTS idx_subraces_race ON subraces(race_index)",
    "CREATE INDEX IF NOT EXISTS idx_subclasses_class ON subclasses(class_index)",
    "CREATE INDEX IF NOT EXISTS idx_property_links_equipment ON equipment_property_links(equipment_index)",
    "CREATE INDEX IF NOT EXISTS idx_monster_proficiencies_monster ON monster_proficiencies(monster_index)",
    "CREATE INDEX IF NOT EXISTS idx_monster_actions_monster ON monster_actions(monster_index)",
    "CREATE INDEX IF NOT EXISTS idx_monster_legendary_monster ON monster_legendary_actions(monster_index)",
    "CREATE INDEX IF NOT EXISTS idx_monster_abilities_monster ON monster_special_abilities(monster_index)",
];
