use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use crate::models::{MappedSeason, RaidInfo, RaidKind, SeasonEntry, SeasonMapping};

/// Name used when a raid id has no roster entry.
pub const UNKNOWN_RAID_NAME: &str = "unknown";

fn season_list(raid_info: &RaidInfo, region: usize, kind: RaidKind) -> Option<&[SeasonEntry]> {
    let block = raid_info.raid_seasons.get(region)?;
    Some(match kind {
        RaidKind::Raid => &block.seasons,
        RaidKind::Eliminate => &block.eliminate_seasons,
    })
}

/// Entries carrying both a label and a raid id; the rest are skipped.
fn usable_seasons(seasons: &[SeasonEntry], region: usize, kind: RaidKind) -> Vec<&SeasonEntry> {
    let usable: Vec<&SeasonEntry> = seasons
        .iter()
        .filter(|season| season.season_display.is_some() && season.raid_id.is_some())
        .collect();

    let skipped = seasons.len() - usable.len();
    if skipped > 0 {
        warn!("Skipping {} malformed {} season(s) in region {}", skipped, kind, region);
    }
    usable
}

/// Latest concluded season of a region: the last entry, or the one before it
/// while the last is still running.
fn concluded_season<'a>(seasons: &[&'a SeasonEntry], now: DateTime<Utc>) -> Option<&'a SeasonEntry> {
    let (last, earlier) = seasons.split_last()?;
    if last.has_ended(now.timestamp() as f64) {
        Some(*last)
    } else {
        earlier.last().copied()
    }
}

/// Name of `raid_id` by its 1-based position in the roster.
fn roster_name(raid_info: &RaidInfo, raid_id: i64) -> Option<&str> {
    let index = usize::try_from(raid_id.checked_sub(1)?).ok()?;
    raid_info.raid.get(index).map(|raid| raid.name.as_str())
}

/// Lists the reference region's seasons that the source region has not run
/// yet.
///
/// Walks the reference calendar backwards from its newest season and stops
/// at the first season matching the source region's latest concluded one.
/// That match is already synchronized and is left out of the mapping.
///
/// Missing regions or season lists yield an empty mapping; so does a source
/// calendar with fewer than two usable seasons. Seasons without a label or
/// raid id are skipped.
pub fn reconcile(
    raid_info: &RaidInfo,
    reference_region: usize,
    source_region: usize,
    kind: RaidKind,
    now: DateTime<Utc>,
) -> SeasonMapping {
    let mut mapping = SeasonMapping::new();

    let Some(source) = season_list(raid_info, source_region, kind) else {
        warn!("No {} seasons for source region {}", kind, source_region);
        return mapping;
    };
    let Some(reference) = season_list(raid_info, reference_region, kind) else {
        warn!("No {} seasons for reference region {}", kind, reference_region);
        return mapping;
    };

    let source = usable_seasons(source, source_region, kind);
    let reference = usable_seasons(reference, reference_region, kind);

    if source.len() < 2 {
        warn!(
            "Source region {} has {} {} season(s), need at least 2",
            source_region,
            source.len(),
            kind
        );
        return mapping;
    }

    let Some(current) = concluded_season(&source, now) else {
        warn!("No concluded {} season in source region {}", kind, source_region);
        return mapping;
    };

    for season in reference.iter().rev() {
        if season.is_same_raid(current) {
            break;
        }

        let (Some(label), Some(raid_id)) = (&season.season_display, season.raid_id) else {
            continue;
        };

        let name = match roster_name(raid_info, raid_id) {
            Some(name) => name.to_string(),
            None => {
                warn!("Raid id {} not found in roster", raid_id);
                UNKNOWN_RAID_NAME.to_string()
            }
        };

        mapping.insert(
            label.clone(),
            MappedSeason {
                raid_id,
                name,
                terrain: season.terrain.clone(),
            },
        );
    }

    debug!("Reconciled {} mapping: {:?}", kind, mapping);
    mapping
}
