use fnv::FnvHashSet;
use std::iter::Peekable;
use std::str::Chars;

use errors::*;
use super::instance::*;

/// Roles ending with `-of` that are role names on their own, not inversions of another role
const LEXICAL_OF_ROLES: [&str; 3] = ["consist-of", "prep-out-of", "prep-on-behalf-of"];

#[derive(Debug, PartialEq, Eq, Clone)]
enum Token {
    LParen,
    RParen,
    Slash,
    Role(String),
    Quoted(String),
    Symbol(String),
}

fn malformed<T>(reason: String) -> Result<T> {
    Err(ErrorKind::MalformedAmr(reason).into())
}

struct Tokenizer<'a> {
    chars: Peekable<Chars<'a>>
}

impl<'a> Tokenizer<'a> {
    fn new(text: &'a str) -> Tokenizer<'a> {
        Tokenizer { chars: text.chars().peekable() }
    }

    fn read_while<F>(&mut self, buffer: &mut String, func: F)
        where F: Fn(char) -> bool {
        while let Some(&c) = self.chars.peek() {
            if !func(c) {
                break;
            }
            buffer.push(c);
            self.chars.next();
        }
    }

    fn tokenize(mut self) -> Result<Vec<Token>> {
        let is_symbol_char = |c: char| !c.is_whitespace() && c != '(' && c != ')' && c != '"' && c != '/';
        let mut tokens = Vec::new();

        while let Some(c) = self.chars.next() {
            match c {
                c if c.is_whitespace() => continue,
                '(' => tokens.push(Token::LParen),
                ')' => tokens.push(Token::RParen),
                '/' => tokens.push(Token::Slash),
                '"' => {
                    let mut value = String::new();
                    let mut closed = false;
                    while let Some(c) = self.chars.next() {
                        match c {
                            '\\' => {
                                if let Some(escaped) = self.chars.next() {
                                    value.push(escaped);
                                }
                            },
                            '"' => {
                                closed = true;
                                break;
                            },
                            c => value.push(c)
                        }
                    }

                    if !closed {
                        return malformed(format!("unterminated string literal \"{}", value));
                    }
                    tokens.push(Token::Quoted(value));
                },
                ':' => {
                    let mut role = String::new();
                    self.read_while(&mut role, |c| is_symbol_char(c) || c == '/');
                    if role.is_empty() {
                        return malformed("role without a name".to_owned());
                    }
                    tokens.push(Token::Role(role));
                },
                c => {
                    let mut symbol = c.to_string();
                    self.read_while(&mut symbol, is_symbol_char);
                    tokens.push(Token::Symbol(symbol));
                }
            }
        }

        Ok(tokens)
    }
}

/// An edge whose target is only known to be a variable once the whole graph has been read
struct PendingEdge {
    role: String,
    source: String,
    target: String,
    target_is_node: bool,
}

struct Parser {
    tokens: Vec<Token>,
    position: usize,
    variables: Vec<String>,
    concepts: Vec<String>,
    declared: FnvHashSet<String>,
    attributes: Vec<Triple>,
    edges: Vec<PendingEdge>,
}

impl Parser {
    fn new(tokens: Vec<Token>) -> Parser {
        Parser {
            tokens,
            position: 0,
            variables: Vec::new(),
            concepts: Vec::new(),
            declared: Default::default(),
            attributes: Vec::new(),
            edges: Vec::new(),
        }
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.position).cloned();
        self.position += 1;
        token
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.position)
    }

    /// Read `( var / concept :role value ... )` and return the variable
    fn parse_node(&mut self) -> Result<String> {
        match self.next() {
            Some(Token::LParen) => {},
            other => return malformed(format!("expect `(` but get {:?}", other))
        }

        let var = match self.next() {
            Some(Token::Symbol(var)) => var,
            other => return malformed(format!("expect a variable but get {:?}", other))
        };

        match self.next() {
            Some(Token::Slash) => {},
            other => return malformed(format!("expect `/` after variable {} but get {:?}", var, other))
        }

        let concept = match self.next() {
            Some(Token::Symbol(concept)) | Some(Token::Quoted(concept)) => concept,
            other => return malformed(format!("expect a concept for variable {} but get {:?}", var, other))
        };

        if !self.declared.insert(var.clone()) {
            return malformed(format!("variable {} is declared twice", var));
        }
        self.variables.push(var.clone());
        self.concepts.push(concept);

        loop {
            match self.next() {
                Some(Token::RParen) => break,
                Some(Token::Role(role)) => {
                    match self.peek().cloned() {
                        Some(Token::LParen) => {
                            let child = self.parse_node()?;
                            self.edges.push(PendingEdge { role, source: var.clone(), target: child, target_is_node: true });
                        },
                        Some(Token::Symbol(value)) => {
                            self.position += 1;
                            self.edges.push(PendingEdge { role, source: var.clone(), target: value, target_is_node: false });
                        },
                        Some(Token::Quoted(value)) => {
                            self.position += 1;
                            self.attributes.push(Triple::new(role, var.as_str(), value));
                        },
                        other => return malformed(format!("role :{} of {} has no value, get {:?}", role, var, other))
                    }
                },
                None => return malformed(format!("missing `)` for variable {}", var)),
                Some(other) => return malformed(format!("unexpected token {:?} in node {}", other, var))
            }
        }

        Ok(var)
    }

    fn finish(mut self) -> Result<AmrInstance> {
        if let Some(token) = self.peek() {
            return malformed(format!("trailing input starting at {:?}", token));
        }

        let mut relations = Vec::new();
        for edge in self.edges.drain(..) {
            if edge.target_is_node || self.declared.contains(&edge.target) {
                relations.push(normalize_relation(edge.role, edge.source, edge.target));
            } else {
                self.attributes.push(Triple::new(edge.role, edge.source, edge.target));
            }
        }

        let mut attributes = Vec::with_capacity(self.attributes.len() + 1);
        attributes.push(Triple::new(TOP_RELATION, self.variables[0].as_str(), self.concepts[0].as_str()));
        attributes.extend(self.attributes);

        Ok(AmrInstance::new(self.variables, self.concepts, attributes, relations))
    }
}

/// Whether `role` (written without the leading colon) inverts another role, e.g. `ARG0-of`.
/// Roles such as `consist-of` end with `-of` but are not inversions.
pub fn is_inverse_role(role: &str) -> bool {
    let role = role.to_lowercase();
    role.ends_with("-of") && role.len() > 3 && !LEXICAL_OF_ROLES.contains(&role.as_str())
}

/// `(a :rel-of b)` is the same edge as `(b :rel a)`
fn normalize_relation(role: String, source: String, target: String) -> Triple {
    if is_inverse_role(&role) {
        let base = role[..role.len() - 3].to_owned();
        Triple { relation: base, source: target, target: source }
    } else {
        Triple { relation: role, source, target }
    }
}

/// Read one AMR graph written on a single line in PENMAN notation
pub fn parse_amr_line(text: &str) -> Result<AmrInstance> {
    let tokens = Tokenizer::new(text.trim()).tokenize()?;
    if tokens.is_empty() {
        return malformed("empty entry".to_owned());
    }

    let mut parser = Parser::new(tokens);
    parser.parse_node()?;
    parser.finish()
}
