//! Class and Subclass loaders.

use lorevault_domain::{Class, Subclass};

use super::decode_detail;
use crate::application::ingestion::error::IngestError;
use crate::infrastructure::persistence::RunWriter;
use crate::infrastructure::source::types::{ClassDetail, SubclassDetail};
use crate::infrastructure::source::{Resource, SourcePort};

pub(crate) async fn load_classes(
    source: &dyn SourcePort,
    writer: &mut RunWriter<'_>,
) -> Result<u64, IngestError> {
    let listing = source.fetch_collection(Resource::Classes).await?;
    tracing::info!(count = listing.len(), "loading classes");

    let mut loaded = 0u64;
    for item in listing {
        let payload = source.fetch_detail(Resource::Classes, &item.index).await?;
        let detail: ClassDetail = decode_detail(Resource::Classes, &item.index, payload)?;
        writer.upsert_class(&map_class(detail)).await?;
        loaded += 1;
    }
    Ok(loaded)
}

/// Unlike subraces, a subclass whose parent class is absent is skipped with
/// a warning and the run continues.
pub(crate) async fn load_subclasses(
    source: &dyn SourcePort,
    writer: &mut RunWriter<'_>,
) -> Result<u64, IngestError> {
    let listing = source.fetch_collection(Resource::Subclasses).await?;
    tracing::info!(count = listing.len(), "loading subclasses");

    let mut loaded = 0u64;
    for item in listing {
        let payload = source.fetch_detail(Resource::Subclasses, &item.index).await?;
        let detail: SubclassDetail = decode_detail(Resource::Subclasses, &item.index, payload)?;

        if !writer.class_exists(&detail.class.index).await? {
            tracing::warn!(
                subclass = %detail.index,
                class = %detail.class.index,
                "parent class not in store, skipping subclass"
            );
            continue;
        }

        writer.upsert_subclass(&map_subclass(detail)).await?;
        loaded += 1;
    }
    Ok(loaded)
}

fn map_class(detail: ClassDetail) -> Class {
    Class {
        index: detail.index,
        name: detail.name,
        hit_die: detail.hit_die,
        proficiency_choices: detail.proficiency_choices,
        proficiencies: detail.proficiencies,
        saving_throws: detail.saving_throws,
        starting_equipment: detail.starting_equipment,
        starting_equipment_options: detail.starting_equipment_options,
        multi_classing: detail.multi_classing,
        spellcasting: detail.spellcasting,
        url: detail.url,
    }
}

fn map_subclass(detail: SubclassDetail) -> Subclass {
    Subclass {
        index: detail.index,
        name: detail.name,
        class_index: detail.class.index,
        url: detail.url,
    }
}
