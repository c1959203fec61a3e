//! Monster loader: stat block plus the four owned collections.

use lorevault_domain::{
    Monster, MonsterAction, MonsterLegendaryAction, MonsterProficiency, MonsterSpecialAbility,
};

use super::decode_detail;
use crate::application::ingestion::error::IngestError;
use crate::infrastructure::persistence::RunWriter;
use crate::infrastructure::source::types::MonsterDetail;
use crate::infrastructure::source::{Resource, SourcePort};

pub(crate) async fn load_monsters(
    source: &dyn SourcePort,
    writer: &mut RunWriter<'_>,
) -> Result<u64, IngestError> {
    let listing = source.fetch_collection(Resource::Monsters).await?;
    tracing::info!(count = listing.len(), "loading monsters");

    let mut loaded = 0u64;
    for item in listing {
        let payload = source.fetch_detail(Resource::Monsters, &item.index).await?;
        let detail: MonsterDetail = decode_detail(Resource::Monsters, &item.index, payload)?;
        let index = detail.index.clone();

        // Upserting the stat block clears the owned collections, so the
        // inserts below always write the current source set exactly.
        writer.upsert_monster(&map_monster(&detail)).await?;

        for entry in &detail.proficiencies {
            writer
                .insert_monster_proficiency(&MonsterProficiency {
                    monster_index: index.clone(),
                    proficiency: entry.proficiency.clone(),
                    value: entry.value,
                })
                .await?;
        }

        for entry in detail.actions {
            writer
                .insert_monster_action(&MonsterAction {
                    monster_index: index.clone(),
                    name: entry.name,
                    desc: entry.desc,
                    attack_bonus: entry.attack_bonus,
                    damage: entry.damage,
                    dc: entry.dc,
                    usage: entry.usage,
                    multiattack_type: entry.multiattack_type,
                    subactions: entry.subactions,
                })
                .await?;
        }

        for entry in detail.legendary_actions {
            writer
                .insert_monster_legendary_action(&MonsterLegendaryAction {
                    monster_index: index.clone(),
                    name: entry.name,
                    desc: entry.desc,
                    damage: entry.damage,
                    dc: entry.dc,
                })
                .await?;
        }

        for entry in detail.special_abilities {
            writer
                .insert_monster_special_ability(&MonsterSpecialAbility {
                    monster_index: index.clone(),
                    name: entry.name,
                    desc: entry.desc,
                    usage: entry.usage,
                    damage: entry.damage,
                })
                .await?;
        }

        loaded += 1;
    }
    Ok(loaded)
}

fn map_monster(detail: &MonsterDetail) -> Monster {
    Monster {
        index: detail.index.clone(),
        name: detail.name.clone(),
        size: detail.size.clone(),
        kind: detail.kind.clone(),
        alignment: detail.alignment.clone(),
        armor_class: detail.armor_class.clone(),
        hit_points: detail.hit_points,
        hit_dice: detail.hit_dice.clone(),
        hit_points_roll: detail.hit_points_roll.clone(),
        speed: detail.speed.clone(),
        strength: detail.strength,
        dexterity: detail.dexterity,
        constitution: detail.constitution,
        intelligence: detail.intelligence,
        wisdom: detail.wisdom,
        charisma: detail.charisma,
        damage_vulnerabilities: detail.damage_vulnerabilities.clone(),
        damage_resistances: detail.damage_resistances.clone(),
        damage_immunities: detail.damage_immunities.clone(),
        condition_immunities: detail.condition_immunities.clone(),
        senses: detail.senses.clone(),
        languages: detail.languages.clone(),
        challenge_rating: detail.challenge_rating,
        proficiency_bonus: detail.proficiency_bonus,
        xp: detail.xp,
        image: detail.image.clone(),
        url: detail.url.clone(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn multiattack_subactions_stay_opaque() {
        let detail: MonsterDetail = decode_detail(
            Resource::Monsters,
            "dragon",
            json!({
                "index": "dragon",
                "name": "Dragon",
                "actions": [{
                    "name": "Multiattack",
                    "desc": "Three attacks.",
                    "multiattack_type": "actions",
                    "actions": [
                        {"action_name": "Bite", "count": 1, "type": "melee"},
                        {"action_name": "Claw", "count": 2, "type": "melee"}
                    ]
                }]
            }),
        )
        .expect("monster decodes");

        assert_eq!(detail.actions.len(), 1);
        let multiattack = &detail.actions[0];
        assert_eq!(multiattack.multiattack_type, "actions");
        assert_eq!(multiattack.subactions.len(), 2);
        assert_eq!(multiattack.subactions[0]["action_name"], json!("Bite"));
    }
}
