pub mod alignment;
pub mod internal_structure;
pub mod match_pool;
pub mod find_best_map;

pub use self::alignment::{ align, align_and_score, get_strategy };
pub use self::internal_structure::{ Bijection, AlignmentResult };
pub use self::match_pool::MatchPool;
pub use self::find_best_map::{ AlignmentStrategy, SearchBudget, ExhaustiveSearch, HillClimbing, AutoSearch };
