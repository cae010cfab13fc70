pub mod extractor;
pub mod bands;
pub mod watch;

pub use extractor::{extract, DEFAULT_WATCHED_RANKS};
pub use bands::RankBand;
pub use watch::{RankWatch, WatchRejection, WATCH_MARGIN};
