use regex::{ Captures, Regex };

use amr::{ AmrInstance, Triple, is_inverse_role };

/// Rewrites of the AMR text, applied before the text is parsed. Quoted strings are never touched.
pub struct TextRewriter {
    roles: Regex,
    senses: Regex,
}

impl TextRewriter {
    pub fn new() -> TextRewriter {
        TextRewriter {
            roles: Regex::new(r#""(?:[^"\\]|\\.)*"|:([^\s()"/:]+)"#).unwrap(),
            senses: Regex::new(r#""(?:[^"\\]|\\.)*"|(/\s*[a-zA-Z0-9\-][a-zA-Z0-9\-]*)-[0-9]+"#).unwrap(),
        }
    }

    /// Replace every role by `:label`, inverse roles by `:label-of`. A role is inverse under the
    /// same rule the parser uses, so `:consist-of` stays a forward `:label`.
    pub fn unlabel(&self, text: &str) -> String {
        self.roles.replace_all(text, |caps: &Captures| {
            match caps.get(1) {
                None => caps[0].to_owned(),
                Some(role) => if is_inverse_role(role.as_str()) {
                    ":label-of".to_owned()
                } else {
                    ":label".to_owned()
                }
            }
        }).into_owned()
    }

    /// Force the sense of every concept to `-01`
    pub fn remove_wsd(&self, text: &str) -> String {
        self.senses.replace_all(text, |caps: &Captures| {
            match caps.get(1) {
                None => caps[0].to_owned(),
                Some(concept) => format!("{}-01", concept.as_str())
            }
        }).into_owned()
    }
}

/// Sub-graph made of the relations pointing to a reentrant variable
pub fn reentrancy_graph(amr: &AmrInstance) -> AmrInstance {
    let reentrant_vars = amr.reentrant_variables();
    let relations: Vec<Triple> = amr.relations.iter()
        .filter(|t| reentrant_vars.contains(t.target.as_str()))
        .cloned()
        .collect();

    amr.sub_graph(relations)
}

/// Sub-graph made of the relations whose role is a semantic role (e.g. `^ARG\d`)
pub fn srl_graph(amr: &AmrInstance, role_pattern: &Regex) -> AmrInstance {
    let relations: Vec<Triple> = amr.relations.iter()
        .filter(|t| role_pattern.is_match(&t.relation))
        .cloned()
        .collect();

    amr.sub_graph(relations)
}
