// `error_chain!` can recurse deeply
#![recursion_limit = "1024"]

extern crate smatch;

#[macro_use]
extern crate error_chain;
#[macro_use]
extern crate serde_derive;
#[macro_use]
extern crate log;
extern crate serde_yaml;
extern crate csv;
extern crate env_logger;
#[macro_use]
extern crate clap;
#[macro_use]
extern crate prettytable;
extern crate itertools;
extern crate time;

use std::path::Path;
use smatch::prelude::*;

use errors::*;
use timer::Timer;

mod errors;
mod input;
mod tabular;
mod timer;

fn main() {
    env_logger::init();
    let mut timer = Timer::start();

    if let Err(ref e) = run() {
        println!("error: {}", e);
        for e in e.iter().skip(1) {
            println!("caused by: {}", e);
        }

        // The backtrace is not always generated. Try to run this example
        // with `RUST_BACKTRACE=1`.
        if let Some(backtrace) = e.backtrace() {
            println!("{:?}", backtrace);
        }

        ::std::process::exit(1);
    }

    timer.lap_and_report("!! Finish the program !!");
}

fn run() -> Result<()> {
    let app_m = clap_app!(smatch =>
        (about: "Smatch scores of AMR graphs")
        (@arg settings: -c +takes_value "settings file")
        (@arg n_threads: -n --n_threads +takes_value "number of threads, 0 uses every core")
        (@subcommand score =>
            (about: "Score a file of test graphs against a file of gold graphs and report every sub-score")
            (@arg test_file: -t +required +takes_value "test AMR file")
            (@arg gold_file: -g +required +takes_value "gold AMR file")
        )
        (@subcommand table =>
            (about: "Score every row of a csv table")
            (@arg input: -i +required +takes_value "input table")
            (@arg output: -o +required +takes_value "output table")
            (@arg sentences: -s --sentences "cells hold several graphs separated by blank lines")
            (@arg per_item: -p --per_item "average the scores of the rows instead of summing their counts")
        )
        (@subcommand dir =>
            (about: "Score every csv table of a directory")
            (@arg input: -i +required +takes_value "input directory")
            (@arg output: -o +required +takes_value "output directory")
            (@arg sentences: -s --sentences "cells hold several graphs separated by blank lines")
            (@arg per_item: -p --per_item "average the scores of the rows instead of summing their counts")
        )
    ).get_matches();

    let mut settings = match app_m.value_of("settings") {
        Some(fsettings) => input::Configuration::from_file(Path::new(fsettings))?.settings,
        None => Settings::default()
    };
    if let Some(n_threads) = app_m.value_of("n_threads") {
        settings.batch.n_threads = n_threads.parse::<usize>().chain_err(|| format!("Invalid number of threads: {}", n_threads))?;
    }

    match app_m.subcommand() {
        ("score", Some(sub_m)) => {
            let driver = BatchDriver::new(&settings)?;
            debug!("Current settings: {:?}", driver.settings());

            let reader = EntryReader::new();
            let tests = reader.read_entries(Path::new(sub_m.value_of("test_file").unwrap()))?;
            let golds = reader.read_entries(Path::new(sub_m.value_of("gold_file").unwrap()))?;
            print!("{}", driver.compute_scores(&tests, &golds)?);
        },
        (cmd @ "table", Some(sub_m)) | (cmd @ "dir", Some(sub_m)) => {
            if sub_m.is_present("sentences") {
                settings.batch.segmentation = Segmentation::Sentences;
            }
            if sub_m.is_present("per_item") {
                settings.batch.aggregation = Aggregation::PerItem;
            }
            let driver = BatchDriver::new(&settings)?;
            debug!("Current settings: {:?}", driver.settings());

            let finput = Path::new(sub_m.value_of("input").unwrap());
            let foutput = Path::new(sub_m.value_of("output").unwrap());
            let reports = if cmd == "table" {
                vec![(finput.to_path_buf(), tabular::score_table(&driver, finput, foutput)?)]
            } else {
                tabular::score_dir(&driver, finput, foutput)?
            };
            tabular::print_summary(&reports);
        },
        _ => bail!("No subcommand provided")
    }

    Ok(())
}
