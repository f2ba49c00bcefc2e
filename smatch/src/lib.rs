extern crate serde;
#[macro_use]
extern crate serde_derive;
extern crate serde_yaml;
extern crate algorithm;
extern crate fnv;
extern crate itertools;
#[macro_use]
extern crate log;
#[macro_use]
extern crate error_chain;
extern crate rand;
extern crate rayon;
extern crate regex;

pub mod errors;
pub mod amr;
pub mod settings;
pub mod evaluation_metrics;
pub mod prelude;
