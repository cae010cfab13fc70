pub mod tier;
pub mod raid;
pub mod leaderboard;
pub mod line;
pub mod error;

pub use tier::*;
pub use raid::*;
pub use leaderboard::*;
pub use line::*;
pub use error::*;
