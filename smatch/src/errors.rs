// Create the Error, ErrorKind, ResultExt, and Result types
error_chain! {
    foreign_links {
        Io(::std::io::Error);
        Yaml(::serde_yaml::Error);
        Regex(::regex::Error);
        ThreadPool(::rayon::ThreadPoolBuildError);
    }

    errors {
        LengthMismatch(n_test: usize, n_gold: usize) {
            description("number of test entries and gold entries are different")
            display("number of test entries and gold entries are different: {} != {}", n_test, n_gold)
        }

        MalformedAmr(reason: String) {
            description("malformed AMR entry")
            display("malformed AMR entry: {}", reason)
        }

        AlignmentTimeout(budget_ms: u64) {
            description("alignment search exceeded its time budget")
            display("alignment search exceeded its time budget of {}ms", budget_ms)
        }

        MissingColumn(name: String) {
            description("required column is missing")
            display("required column `{}` is missing", name)
        }
    }
}
