use tracing::debug;

use crate::models::{RaidInfo, RaidKind, SeasonEntry};

/// Finds a season by its display label in one region's calendar, falling
/// back to the newest season with a raid id when nothing matches.
pub fn find_season<'a>(
    raid_info: &'a RaidInfo,
    region: usize,
    kind: RaidKind,
    query: &str,
) -> Option<&'a SeasonEntry> {
    let block = raid_info.raid_seasons.get(region)?;
    let seasons = match kind {
        RaidKind::Raid => &block.seasons,
        RaidKind::Eliminate => &block.eliminate_seasons,
    };

    let found = seasons
        .iter()
        .find(|season| {
            season
                .season_display
                .as_ref()
                .map_or(false, |label| label.matches(query))
        })
        .or_else(|| seasons.iter().rev().find(|season| season.raid_id.is_some()));

    debug!("Season lookup {} {} -> {:?}", kind, query, found);
    found
}

/// Boss name of `raid_id`, matched on the roster's `Id` field.
pub fn raid_name(raid_info: &RaidInfo, raid_id: i64) -> Option<&str> {
    raid_info
        .raid
        .iter()
        .find(|raid| raid.id == raid_id)
        .map(|raid| raid.name.as_str())
}
