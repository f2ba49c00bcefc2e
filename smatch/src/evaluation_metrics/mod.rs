pub mod amr_matching;
pub mod scores;
pub mod transforms;
pub mod subscores;
pub mod batch;

pub use self::scores::{ MatchCounts, Score, MeanScore, ScoreTable, accumulate };
pub use self::batch::{ BatchDriver, best_of_n };
