use fnv::FnvHashMap;
use fnv::FnvHashSet;
use std::fmt;

pub const INSTANCE_RELATION: &str = "instance";
pub const TOP_RELATION: &str = "TOP";

/// A (relation, source, target) triple. The source is always a variable, the target is either a
/// variable (relation triple) or a constant (instance/attribute triple).
#[derive(Debug, PartialEq, Eq, Hash, Clone, Serialize, Deserialize)]
pub struct Triple {
    pub relation: String,
    pub source: String,
    pub target: String,
}

impl Triple {
    pub fn new<R: Into<String>, S: Into<String>, T: Into<String>>(relation: R, source: S, target: T) -> Triple {
        Triple { relation: relation.into(), source: source.into(), target: target.into() }
    }
}

impl fmt::Display for Triple {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({} {} {})", self.relation, self.source, self.target)
    }
}

/// One AMR graph: its variables, the concept bound to each variable (index-aligned), its
/// constant-valued triples and its variable-valued triples.
///
/// Graphs may be cyclic through reentrancy: a variable can be the target of several relations.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AmrInstance {
    pub variables: Vec<String>,
    pub concepts: Vec<String>,
    pub attributes: Vec<Triple>,
    pub relations: Vec<Triple>,
}

impl AmrInstance {
    pub fn new(variables: Vec<String>, concepts: Vec<String>, attributes: Vec<Triple>, relations: Vec<Triple>) -> AmrInstance {
        debug_assert_eq!(variables.len(), concepts.len());
        AmrInstance { variables, concepts, attributes, relations }
    }

    #[inline]
    pub fn n_variables(&self) -> usize {
        self.variables.len()
    }

    pub fn instance_triples(&self) -> Vec<Triple> {
        self.variables.iter().zip(self.concepts.iter())
            .map(|(v, c)| Triple::new(INSTANCE_RELATION, v.as_str(), c.as_str()))
            .collect()
    }

    /// Number of triples the instance contributes to a smatch count
    pub fn n_triples(&self) -> usize {
        self.variables.len() + self.attributes.len() + self.relations.len()
    }

    pub fn var2concept(&self) -> FnvHashMap<&str, &str> {
        self.variables.iter().zip(self.concepts.iter())
            .map(|(v, c)| (v.as_str(), c.as_str()))
            .collect()
    }

    pub fn var2index(&self) -> FnvHashMap<&str, usize> {
        self.variables.iter().enumerate()
            .map(|(i, v)| (v.as_str(), i))
            .collect()
    }

    /// Attribute triples followed by relation triples, the instance triples are not included
    pub fn iter_non_instance_triples<'a>(&'a self) -> impl Iterator<Item=&'a Triple> + 'a {
        self.attributes.iter().chain(self.relations.iter())
    }

    /// Variables that are the target of at least two relation triples
    pub fn reentrant_variables(&self) -> FnvHashSet<&str> {
        let mut n_incoming: FnvHashMap<&str, usize> = Default::default();
        for triple in &self.relations {
            *n_incoming.entry(triple.target.as_str()).or_insert(0) += 1;
        }

        n_incoming.into_iter()
            .filter(|&(_, n)| n > 1)
            .map(|(v, _)| v)
            .collect()
    }

    /// Build the sub-graph made of the given relation triples and the variables they touch.
    /// Attribute triples are dropped.
    pub fn sub_graph(&self, relations: Vec<Triple>) -> AmrInstance {
        let mut used_vars: FnvHashSet<&str> = Default::default();
        for triple in &relations {
            used_vars.insert(&triple.source);
            used_vars.insert(&triple.target);
        }

        let mut variables = Vec::new();
        let mut concepts = Vec::new();
        for (v, c) in self.variables.iter().zip(self.concepts.iter()) {
            if used_vars.contains(v.as_str()) {
                variables.push(v.clone());
                concepts.push(c.clone());
            }
        }

        AmrInstance::new(variables, concepts, Vec::new(), relations)
    }
}
