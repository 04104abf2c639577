//! Route parameter names.

use crate::errors::{error_codes, RouterError};
use crate::routing::parser::Token;
use regex::Regex;
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Key {
    Named(String),
    Placeholder(usize),
    MatchAny(usize),
}

/// Parameter names of one route, in declaration order.
///
/// Anonymous wildcards get synthesized names: `$0`, `$1`, … for `*` and
/// `$$0`, `$$1`, … for `**`. A route with exactly one of a kind renders it
/// as plain `$` or `$$`.
#[derive(Debug, Clone, Default)]
pub struct Parameters {
    keys: Vec<Key>,
    placeholders: usize,
    match_anys: usize,
    pattern: Option<Regex>,
}

impl Parameters {
    /// Empty key list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Collects the keys of a tokenized template, rejecting repeated names.
    pub fn from_tokens(tokens: &[Token]) -> Result<Self, RouterError> {
        let mut parameters = Self::new();
        for token in tokens {
            match token {
                Token::Param(name) => parameters.add(name),
                Token::Placeholder => parameters.add_placeholder(),
                Token::MatchAny => parameters.add_match_any(),
                Token::Literal(_) => {}
            }
        }

        let mut seen = HashSet::new();
        for key in parameters.keys() {
            if !seen.insert(key.clone()) {
                return Err(RouterError::validation(
                    error_codes::DUPLICATE_PARAM_NAME,
                    format!("Parameter '{}' declared more than once", key),
                ));
            }
        }
        Ok(parameters)
    }

    /// Appends a named `:name` key.
    pub fn add(&mut self, name: &str) {
        self.keys.push(Key::Named(name.to_string()));
    }

    /// Appends the next `*` key.
    pub fn add_placeholder(&mut self) {
        self.keys.push(Key::Placeholder(self.placeholders));
        self.placeholders += 1;
    }

    /// Appends the next `**` key.
    pub fn add_match_any(&mut self) {
        self.keys.push(Key::MatchAny(self.match_anys));
        self.match_anys += 1;
    }

    /// Number of keys.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// True when the route captures nothing.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Display names, in declaration order.
    pub fn keys(&self) -> Vec<String> {
        self.keys.iter().map(|key| self.render(key)).collect()
    }

    /// Matcher for the path suffix owned by a `**` node.
    pub fn pattern(&self) -> Option<&Regex> {
        self.pattern.as_ref()
    }

    pub(crate) fn set_pattern(&mut self, pattern: Regex) {
        self.pattern = Some(pattern);
    }

    /// Zips keys with captured values positionally.
    pub fn get_object(&self, values: &[String]) -> HashMap<String, String> {
        self.keys
            .iter()
            .zip(values)
            .map(|(key, value)| (self.render(key), value.clone()))
            .collect()
    }

    fn render(&self, key: &Key) -> String {
        match key {
            Key::Named(name) => name.clone(),
            Key::Placeholder(_) if self.placeholders == 1 => "$".to_string(),
            Key::Placeholder(i) => format!("${}", i),
            Key::MatchAny(_) if self.match_anys == 1 => "$$".to_string(),
            Key::MatchAny(i) => format!("$${}", i),
        }
    }
}
