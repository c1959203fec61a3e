//! Loaders for the flat reference entities: traits, features, conditions,
//! damage types, proficiencies.

use lorevault_domain::{Condition, DamageType, Feature, Proficiency, RaceTrait};

use super::decode_detail;
use crate::application::ingestion::error::IngestError;
use crate::infrastructure::persistence::RunWriter;
use crate::infrastructure::source::types::{
    ConditionDetail, DamageTypeDetail, FeatureDetail, ProficiencyDetail, TraitDetail,
};
use crate::infrastructure::source::{Resource, SourcePort};

pub(crate) async fn load_traits(
    source: &dyn SourcePort,
    writer: &mut RunWriter<'_>,
) -> Result<u64, IngestError> {
    let listing = source.fetch_collection(Resource::Traits).await?;
    tracing::info!(count = listing.len(), "loading traits");

    let mut loaded = 0u64;
    for item in listing {
        let payload = source.fetch_detail(Resource::Traits, &item.index).await?;
        let detail: TraitDetail = decode_detail(Resource::Traits, &item.index, payload)?;
        writer
            .upsert_trait(&RaceTrait {
                index: detail.index,
                name: detail.name,
                desc: detail.desc.join("\n"),
                races: detail.races,
                subraces: detail.subraces,
                url: detail.url,
            })
            .await?;
        loaded += 1;
    }
    Ok(loaded)
}

pub(crate) async fn load_features(
    source: &dyn SourcePort,
    writer: &mut RunWriter<'_>,
) -> Result<u64, IngestError> {
    let listing = source.fetch_collection(Resource::Features).await?;
    tracing::info!(count = listing.len(), "loading features");

    let mut loaded = 0u64;
    for item in listing {
        let payload = source.fetch_detail(Resource::Features, &item.index).await?;
        let detail: FeatureDetail = decode_detail(Resource::Features, &item.index, payload)?;
        writer
            .upsert_feature(&Feature {
                index: detail.index,
                name: detail.name,
                class_index: detail.class.index,
                subclass_index: detail.subclass.index,
                level: detail.level,
                optional: detail.optional,
                desc: detail.desc.join("\n"),
                url: detail.url,
            })
            .await?;
        loaded += 1;
    }
    Ok(loaded)
}

pub(crate) async fn load_conditions(
    source: &dyn SourcePort,
    writer: &mut RunWriter<'_>,
) -> Result<u64, IngestError> {
    let listing = source.fetch_collection(Resource::Conditions).await?;
    tracing::info!(count = listing.len(), "loading conditions");

    let mut loaded = 0u64;
    for item in listing {
        let payload = source.fetch_detail(Resource::Conditions, &item.index).await?;
        let detail: ConditionDetail = decode_detail(Resource::Conditions, &item.index, payload)?;
        writer
            .upsert_condition(&Condition {
                index: detail.index,
                name: detail.name,
                desc: detail.desc.join("\n"),
                url: detail.url,
            })
            .await?;
        loaded += 1;
    }
    Ok(loaded)
}

pub(crate) async fn load_damage_types(
    source: &dyn SourcePort,
    writer: &mut RunWriter<'_>,
) -> Result<u64, IngestError> {
    let listing = source.fetch_collection(Resource::DamageTypes).await?;
    tracing::info!(count = listing.len(), "loading damage types");

    let mut loaded = 0u64;
    for item in listing {
        let payload = source.fetch_detail(Resource::DamageTypes, &item.index).await?;
        let detail: DamageTypeDetail = decode_detail(Resource::DamageTypes, &item.index, payload)?;
        writer
            .upsert_damage_type(&DamageType {
                index: detail.index,
                name: detail.name,
                desc: detail.desc.join("\n"),
                url: detail.url,
            })
            .await?;
        loaded += 1;
    }
    Ok(loaded)
}

pub(crate) async fn load_proficiencies(
    source: &dyn SourcePort,
    writer: &mut RunWriter<'_>,
) -> Result<u64, IngestError> {
    let listing = source.fetch_collection(Resource::Proficiencies).await?;
    tracing::info!(count = listing.len(), "loading proficiencies");

    let mut loaded = 0u64;
    for item in listing {
        let payload = source
            .fetch_detail(Resource::Proficiencies, &item.index)
            .await?;
        let detail: ProficiencyDetail =
            decode_detail(Resource::Proficiencies, &item.index, payload)?;
        writer
            .upsert_proficiency(&Proficiency {
                index: detail.index,
                name: detail.name,
                kind: detail.kind,
                url: detail.url,
            })
            .await?;
        loaded += 1;
    }
    Ok(loaded)
}
