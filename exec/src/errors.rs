// Create the Error, ErrorKind, ResultExt, and Result types
error_chain! {
    links {
        Smatch(::smatch::errors::Error, ::smatch::errors::ErrorKind);
    }

    foreign_links {
        Io(::std::io::Error);
        Csv(::csv::Error);
        Yaml(::serde_yaml::Error);
    }
}
