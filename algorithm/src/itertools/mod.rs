mod misc;

pub use self::misc::*;
