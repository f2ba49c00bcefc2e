use regex::Regex;

/// Pad a string on the right so it occupies at least `w` characters. Longer strings are kept
/// as they are.
pub fn left(s: &str, w: usize) -> String {
    let n_chars = s.chars().count();
    if n_chars >= w {
        return s.to_owned();
    }

    s.to_owned() + &(0..w - n_chars).map(|_| " ").collect::<String>()
}

/// Squeeze runs of whitespace into a single space, tabs included
pub struct WhitespaceSqueezer {
    spaces: Regex
}

impl WhitespaceSqueezer {
    pub fn new() -> WhitespaceSqueezer {
        WhitespaceSqueezer { spaces: Regex::new(r"[ \t]+").unwrap() }
    }

    pub fn squeeze(&self, s: &str) -> String {
        self.spaces.replace_all(s, " ").into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    pub fn test_left() {
        assert_eq!(left("Smatch", 8), "Smatch  ");
        assert_eq!(left("Non_sense_frames", 16), "Non_sense_frames");
        assert_eq!(left("Non_sense_frames_2", 16), "Non_sense_frames_2");
    }

    #[test]
    pub fn test_squeeze() {
        let squeezer = WhitespaceSqueezer::new();
        assert_eq!(squeezer.squeeze("(a  /\tdog\t\t:ARG0   b)"), "(a / dog :ARG0 b)");
    }
}
