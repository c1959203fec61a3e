//! Race and Subrace loaders.

use lorevault_domain::{Race, Subrace};

use super::decode_detail;
use crate::application::ingestion::error::IngestError;
use crate::infrastructure::persistence::RunWriter;
use crate::infrastructure::source::types::{RaceDetail, SubraceDetail};
use crate::infrastructure::source::{Resource, SourcePort};

pub(crate) async fn load_races(
    source: &dyn SourcePort,
    writer: &mut RunWriter<'_>,
) -> Result<u64, IngestError> {
    let listing = source.fetch_collection(Resource::Races).await?;
    tracing::info!(count = listing.len(), "loading races");

    let mut loaded = 0u64;
    for item in listing {
        let payload = source.fetch_detail(Resource::Races, &item.index).await?;
        let detail: RaceDetail = decode_detail(Resource::Races, &item.index, payload)?;
        writer.upsert_race(&map_race(detail)).await?;
        loaded += 1;
    }
    Ok(loaded)
}

pub(crate) async fn load_subraces(
    source: &dyn SourcePort,
    writer: &mut RunWriter<'_>,
) -> Result<u64, IngestError> {
    let listing = source.fetch_collection(Resource::Subraces).await?;
    tracing::info!(count = listing.len(), "loading subraces");

    let mut loaded = 0u64;
    for item in listing {
        let payload = source.fetch_detail(Resource::Subraces, &item.index).await?;
        let detail: SubraceDetail = decode_detail(Resource::Subraces, &item.index, payload)?;

        // Races load before subraces, so a missing parent means the source
        // itself is inconsistent. Fatal for the run.
        if !writer.race_exists(&detail.race.index).await? {
            return Err(IngestError::dangling(
                "subrace",
                &detail.index,
                "race",
                &detail.race.index,
            ));
        }

        writer.upsert_subrace(&map_subrace(detail)).await?;
        loaded += 1;
    }
    Ok(loaded)
}

fn map_race(detail: RaceDetail) -> Race {
    Race {
        index: detail.index,
        name: detail.name,
        speed: detail.speed,
        ability_bonuses: detail.ability_bonuses,
        alignment: detail.alignment,
        age: detail.age,
        size: detail.size,
        size_description: detail.size_description,
        starting_proficiencies: detail.starting_proficiencies,
        languages: detail.languages,
        language_desc: detail.language_desc,
        traits: detail.traits.into_iter().map(|t| t.name).collect(),
        url: detail.url,
    }
}

fn map_subrace(detail: SubraceDetail) -> Subrace {
    Subrace {
        index: detail.index,
        name: detail.name,
        race_index: detail.race.index,
        desc: detail.desc,
        ability_bonuses: detail.ability_bonuses,
        racial_traits: detail.racial_traits,
        languages: detail.languages,
        starting_proficiencies: detail.starting_proficiencies,
        url: detail.url,
    }
}
