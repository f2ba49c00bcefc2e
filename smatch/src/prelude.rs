pub use amr::{ AmrInstance, Triple, EntryReader, parse_amr_line, text_cell };
pub use settings::*;
pub use evaluation_metrics::{ MatchCounts, Score, MeanScore, ScoreTable, BatchDriver, accumulate, best_of_n };
pub use evaluation_metrics::batch::{ ItemScore, BatchReport };
pub use evaluation_metrics::amr_matching::{ AlignmentStrategy, align_and_score, get_strategy };
