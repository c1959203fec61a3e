//! Equipment loader: base records, category facets, shared properties.

use lorevault_domain::{Armor, Equipment, EquipmentProperty, EquipmentPropertyLink, Tool, Weapon};

use super::decode_detail;
use crate::application::ingestion::error::IngestError;
use crate::infrastructure::persistence::RunWriter;
use crate::infrastructure::source::types::EquipmentDetail;
use crate::infrastructure::source::{Resource, SourcePort};

/// Which facet an equipment detail payload carries, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Facet {
    Armor,
    Weapon,
    Tool,
}

/// At most one facet per item: `armor_category` wins over `weapon_category`,
/// and the "tools" category only counts when neither key is present.
fn facet_of(detail: &EquipmentDetail) -> Option<Facet> {
    if detail.armor_category.is_some() {
        Some(Facet::Armor)
    } else if detail.weapon_category.is_some() {
        Some(Facet::Weapon)
    } else if detail.equipment_category.name.eq_ignore_ascii_case("tools") {
        Some(Facet::Tool)
    } else {
        None
    }
}

pub(crate) async fn load_equipment(
    source: &dyn SourcePort,
    writer: &mut RunWriter<'_>,
) -> Result<u64, IngestError> {
    let listing = source.fetch_collection(Resource::Equipment).await?;
    tracing::info!(count = listing.len(), "loading equipment");

    let mut loaded = 0u64;
    for item in listing {
        let payload = source.fetch_detail(Resource::Equipment, &item.index).await?;
        let detail: EquipmentDetail = decode_detail(Resource::Equipment, &item.index, payload)?;

        writer.upsert_equipment(&map_equipment(&detail)).await?;

        match facet_of(&detail) {
            Some(Facet::Armor) => writer.upsert_armor(&map_armor(&detail)).await?,
            Some(Facet::Weapon) => writer.upsert_weapon(&map_weapon(&detail)).await?,
            Some(Facet::Tool) => writer.upsert_tool(&map_tool(&detail)).await?,
            None => {}
        }

        // Shared property rows are created once; the per-item links are
        // replaced wholesale so re-runs never accumulate duplicates.
        writer.clear_property_links(&detail.index).await?;
        for property in &detail.properties {
            writer
                .insert_property_if_unknown(&EquipmentProperty {
                    index: property.index.clone(),
                    name: property.name.clone(),
                    url: property.url.clone(),
                })
                .await?;
            writer
                .insert_property_link(&EquipmentPropertyLink {
                    equipment_index: detail.index.clone(),
                    property_index: property.index.clone(),
                })
                .await?;
        }

        loaded += 1;
    }
    Ok(loaded)
}

fn map_equipment(detail: &EquipmentDetail) -> Equipment {
    Equipment {
        index: detail.index.clone(),
        name: detail.name.clone(),
        equipment_category: detail.equipment_category.name.clone(),
        cost: detail.cost.clone(),
        weight: detail.weight,
        desc: detail.desc.clone(),
        special: detail.special.clone(),
        url: detail.url.clone(),
    }
}

fn map_armor(detail: &EquipmentDetail) -> Armor {
    Armor {
        equipment_index: detail.index.clone(),
        armor_category: detail.armor_category.clone().unwrap_or_default(),
        armor_class: detail.armor_class.clone(),
        str_minimum: detail.str_minimum,
        stealth_disadvantage: detail.stealth_disadvantage,
    }
}

fn map_weapon(detail: &EquipmentDetail) -> Weapon {
    Weapon {
        equipment_index: detail.index.clone(),
        weapon_category: detail.weapon_category.clone().unwrap_or_default(),
        weapon_range: detail.weapon_range.clone(),
        category_range: detail.category_range.clone(),
        damage: detail.damage.clone(),
        range: detail.range,
        throw_range: detail.throw_range,
    }
}

fn map_tool(detail: &EquipmentDetail) -> Tool {
    Tool {
        equipment_index: detail.index.clone(),
        tool_type: detail.tool_category.clone(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn detail(payload: serde_json::Value) -> EquipmentDetail {
        decode_detail(Resource::Equipment, "test", payload).expect("equipment decodes")
    }

    #[test]
    fn armor_category_selects_the_armor_facet() {
        let detail = detail(json!({
            "index": "chain-mail",
            "name": "Chain Mail",
            "equipment_category": {"index": "armor", "name": "Armor"},
            "armor_category": "Heavy",
            "armor_class": {"base": 16, "dex_bonus": false}
        }));
        assert_eq!(facet_of(&detail), Some(Facet::Armor));
    }

    #[test]
    fn weapon_category_selects_the_weapon_facet() {
        let detail = detail(json!({
            "index": "longsword",
            "name": "Longsword",
            "equipment_category": {"index": "weapon", "name": "Weapon"},
            "weapon_category": "Martial"
        }));
        assert_eq!(facet_of(&detail), Some(Facet::Weapon));
    }

    #[test]
    fn tools_category_is_matched_case_insensitively() {
        let detail = detail(json!({
            "index": "smiths-tools",
            "name": "Smith's Tools",
            "equipment_category": {"index": "tools", "name": "TOOLS"}
        }));
        assert_eq!(facet_of(&detail), Some(Facet::Tool));
    }

    #[test]
    fn plain_gear_has_no_facet() {
        let detail = detail(json!({
            "index": "rope-hempen",
            "name": "Rope, Hempen",
            "equipment_category": {"index": "adventuring-gear", "name": "Adventuring Gear"}
        }));
        assert_eq!(facet_of(&detail), None);
    }
}
