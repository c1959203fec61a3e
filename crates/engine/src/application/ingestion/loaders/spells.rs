//! Spell loader.

use lorevault_domain::Spell;

use super::decode_detail;
use crate::application::ingestion::error::IngestError;
use crate::infrastructure::persistence::RunWriter;
use crate::infrastructure::source::types::SpellDetail;
use crate::infrastructure::source::{Resource, SourcePort};

pub(crate) async fn load_spells(
    source: &dyn SourcePort,
    writer: &mut RunWriter<'_>,
) -> Result<u64, IngestError> {
    let listing = source.fetch_collection(Resource::Spells).await?;
    tracing::info!(count = listing.len(), "loading spells");

    let mut loaded = 0u64;
    for item in listing {
        let payload = source.fetch_detail(Resource::Spells, &item.index).await?;
        let detail: SpellDetail = decode_detail(Resource::Spells, &item.index, payload)?;
        writer.upsert_spell(&map_spell(detail)).await?;
        loaded += 1;
    }
    Ok(loaded)
}

fn map_spell(detail: SpellDetail) -> Spell {
    Spell {
        index: detail.index,
        name: detail.name,
        desc: detail.desc,
        higher_level: detail.higher_level,
        range: detail.range,
        components: detail.components,
        material: detail.material,
        duration: detail.duration,
        concentration: detail.concentration,
        casting_time: detail.casting_time,
        level: detail.level,
        attack_type: detail.attack_type,
        damage: detail.damage,
        school: detail.school,
        classes: detail.classes,
        subclasses: detail.subclasses,
        url: detail.url,
    }
}
