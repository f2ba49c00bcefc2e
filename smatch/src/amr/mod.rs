pub mod instance;
pub mod parser;
pub mod entries;

pub use self::instance::{ AmrInstance, Triple, INSTANCE_RELATION, TOP_RELATION };
pub use self::parser::{ parse_amr_line, is_inverse_role };
pub use self::entries::{ EntryReader, text_cell };
