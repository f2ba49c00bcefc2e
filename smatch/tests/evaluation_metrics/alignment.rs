use serde_json;
use std::path::PathBuf;
use std::fs::File;
use std::ffi::OsStr;
use smatch::prelude::*;

#[derive(Deserialize)]
struct TestCase {
    comment: String,
    test: String,
    gold: String,
    // (n_match, n_test, n_gold)
    smatch: (usize, usize, usize),
}

#[test]
fn run_test_from_data() {
    let mut dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    dir.push("tests/evaluation_metrics/data");

    let strategies = [SearchMethod::Exhaustive, SearchMethod::HillClimbing, SearchMethod::Auto].iter()
        .map(|&search_method| {
            let conf = AlignmentConf { search_method, ..AlignmentConf::default() };
            get_strategy(&conf, 120)
        })
        .collect::<Vec<_>>();

    let mut n_cases = 0;
    for entry in dir.read_dir().unwrap() {
        if let Ok(entry) = entry {
            if entry.path().extension().unwrap_or(OsStr::new("")) == "json" {
                let cases: Vec<TestCase> = serde_json::from_reader(File::open(entry.path()).unwrap()).unwrap();
                for case in cases {
                    let test = parse_amr_line(&case.test).unwrap();
                    let gold = parse_amr_line(&case.gold).unwrap();
                    let (n_match, n_test, n_gold) = case.smatch;

                    for strategy in &strategies {
                        let counts = align_and_score(&test, &gold, strategy.as_ref(), None).unwrap();
                        assert_eq!(counts, MatchCounts::new(n_match, n_test, n_gold), "{}", case.comment);
                    }
                    n_cases += 1;
                }
            }
        }
    }

    assert!(n_cases > 0);
}
