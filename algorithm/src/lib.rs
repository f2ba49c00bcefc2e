extern crate regex;

pub mod string;
pub mod itertools;
