use smatch::prelude::*;
use smatch::evaluation_metrics::subscores::*;

fn entries(texts: &[&str]) -> Vec<String> {
    texts.iter().map(|s| s.to_string()).collect()
}

fn get_driver() -> BatchDriver {
    BatchDriver::new(&Settings::default()).unwrap()
}

#[test]
fn test_one_node_graph_against_itself() {
    let amrs = entries(&["(x1 / dog)"]);
    let table = get_driver().compute_scores(&amrs, &amrs).unwrap();

    assert_eq!(table.names(), SCORE_NAMES.to_vec());
    for name in &[SMATCH, UNLABELED, NO_WSD, CONCEPTS] {
        assert_eq!(*table.get(name).unwrap(), Score::new(1.0, 1.0, 1.0), "{}", name);
    }
    // nothing to compare
    assert_eq!(*table.get(WIKIFICATION).unwrap(), Score::new(0.0, 0.0, 0.0));
}

#[test]
fn test_full_report_of_identical_corpora() {
    let amrs = entries(&[
        r#"(w / want-01 :ARG0 (p / person :wiki "Barack_Obama" :name (n / name :op1 "Barack" :op2 "Obama")) :ARG1 (g / go-02 :ARG0 p :polarity -))"#,
        "(a / and :op1 (d / dog) :op2 (c / cat))",
    ]);
    let table = get_driver().compute_scores(&amrs, &amrs).unwrap();

    for &(ref name, ref score) in table.iter() {
        assert_eq!(score.f1, 1.0, "{}", name);
    }
    assert_eq!(format!("{}", table).lines().count(), 12);
    assert_eq!(format!("{}", table).lines().next().unwrap(), "Smatch           -> P: 1.000,  R: 1.000,  F: 1.000");
}

#[test]
fn test_empty_candidate_degrades_recall() {
    let tests = entries(&["", "(d / dog)"]);
    let golds = entries(&["(c / cat :mod (b / black))", "(d / dog)"]);
    let driver = get_driver();

    let score = driver.compute_smatch(&tests, &golds).unwrap();
    assert_eq!(score.precision, 1.0);
    assert_eq!(score.recall, 2.0 / 6.0);

    let table = driver.compute_scores(&tests, &golds).unwrap();
    assert_eq!(*table.get(SMATCH).unwrap(), score);
    assert_eq!(table.get(CONCEPTS).unwrap().recall, 1.0 / 3.0);
}

#[test]
fn test_unlabeled_is_never_below_smatch() {
    let pairs = [
        ("(w / want-01 :ARG0 (b / boy) :ARG1 (g / go-02 :ARG0 b))", "(w / want-01 :ARG1 (b / boy) :ARG0 (g / go-02 :ARG1 b))"),
        ("(r / run-01 :ARG0 (b / boy))", "(b / boy :ARG1-of (r / run-01))"),
        ("(a / and :op1 (d / dog :mod (b / big)) :op2 (c / cat))", "(a / and :op2 (d / dog) :op1 (c / cat :poss (b / big)))"),
        ("(c / contain-01 :consist-of (w / water))", "(c / contain-01 :ARG1 (w / water))"),
        ("(b / bowl :consist-of (s / soup))", "(s / soup :consist-of-of (b / bowl))"),
        ("(d / dog)", "(c / cat)"),
    ];
    let driver = get_driver();

    for &(test, gold) in &pairs {
        let table = driver.compute_scores(&entries(&[test]), &entries(&[gold])).unwrap();
        let smatch = table.get(SMATCH).unwrap().f1;
        let unlabeled = table.get(UNLABELED).unwrap().f1;
        assert!(unlabeled >= smatch, "{} vs {}: {} < {}", test, gold, unlabeled, smatch);
    }

    let table = driver.compute_scores(&entries(&[pairs[0].0]), &entries(&[pairs[0].1])).unwrap();
    assert_eq!(table.get(UNLABELED).unwrap().f1, 1.0);
    assert!(table.get(SMATCH).unwrap().f1 < 1.0);

    // the same edge written forward and inverted
    let table = driver.compute_scores(&entries(&[pairs[4].0]), &entries(&[pairs[4].1])).unwrap();
    assert_eq!(table.get(SMATCH).unwrap().f1, table.get(UNLABELED).unwrap().f1);
}

#[test]
fn test_no_wsd_ignores_senses() {
    let table = get_driver().compute_scores(
        &entries(&["(w / want-01 :ARG1 (g / go-01))"]),
        &entries(&["(w / want-01 :ARG1 (g / go-02))"])).unwrap();

    assert!(table.get(SMATCH).unwrap().f1 < 1.0);
    assert_eq!(table.get(NO_WSD).unwrap().f1, 1.0);
    assert_eq!(table.get(NON_SENSE_FRAMES).unwrap().f1, 1.0);
    assert_eq!(table.get(FRAMES).unwrap().f1, 0.5);
}

#[test]
fn test_ignore_vars_without_alignment() {
    // same graphs, different variable names and declaration order
    let tests = entries(&["(a / and :op1 (d / dog :mod (b / big)) :op2 (c / cat))"]);
    let golds = entries(&["(x / and :op2 (y / cat) :op1 (z / dog :mod (w / big)))"]);
    let table = get_driver().compute_scores(&tests, &golds).unwrap();

    assert_eq!(table.get(SMATCH).unwrap().f1, 1.0);
    assert_eq!(table.get(IGNORE_VARS).unwrap().f1, 1.0);

    // a changed concept only breaks the triples it appears in
    let golds = entries(&["(x / and :op2 (y / cat) :op1 (z / dog :mod (w / small)))"]);
    let table = get_driver().compute_scores(&tests, &golds).unwrap();
    let ignore_vars = table.get(IGNORE_VARS).unwrap();
    assert_eq!(ignore_vars.precision, 3.0 / 4.0);
    assert!(table.get(SMATCH).unwrap().f1 < 1.0);
}

#[test]
fn test_reentrancies_and_srl() {
    let tests = entries(&["(w / want-01 :ARG0 (b / boy) :ARG1 (g / go-02 :ARG0 b) :time (n / now))"]);
    let golds = entries(&["(w / want-01 :ARG0 (b / boy) :ARG1 (g / go-02 :ARG0 b))"]);
    let table = get_driver().compute_scores(&tests, &golds).unwrap();

    assert_eq!(table.get(REENTRANCIES).unwrap().f1, 1.0);
    assert_eq!(table.get(SRL).unwrap().f1, 1.0);
    assert!(table.get(SMATCH).unwrap().precision < 1.0);

    let golds = entries(&["(w / want-01 :ARG0 (b / boy) :ARG1 (g / go-02))"]);
    let table = get_driver().compute_scores(&tests, &golds).unwrap();
    assert_eq!(*table.get(REENTRANCIES).unwrap(), Score::new(0.0, 0.0, 0.0));
}

#[test]
fn test_scores_do_not_depend_on_the_number_of_threads() {
    let tests = entries(&[
        "(w / want-01 :ARG0 (b / boy) :ARG1 (g / go-02 :ARG0 b))",
        "(a / and :op1 (d / dog :mod (b / big)) :op2 (c / cat))",
        "(r / run-01 :ARG0 (b / boy))",
        "",
    ]);
    let golds = entries(&[
        "(w / want-01 :ARG0 (g / girl) :ARG1 (b / believe-01 :ARG0 g :ARG1 (b2 / boy)))",
        "(a / and :op2 (d / dog) :op1 (c / cat :poss (b / big)))",
        "(b / boy :ARG0-of (r / run-01))",
        "(x / thing)",
    ]);

    let mut settings = Settings::default();
    settings.batch.n_threads = 1;
    let sequential = BatchDriver::new(&settings).unwrap().compute_scores(&tests, &golds).unwrap();
    settings.batch.n_threads = 4;
    let parallel = BatchDriver::new(&settings).unwrap().compute_scores(&tests, &golds).unwrap();

    assert_eq!(sequential.entries, parallel.entries);
}
