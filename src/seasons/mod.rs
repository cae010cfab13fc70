pub mod reconciler;
pub mod lookup;

pub use reconciler::{reconcile, UNKNOWN_RAID_NAME};
pub use lookup::{find_season, raid_name};
