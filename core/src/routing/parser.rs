//! Path template tokenizer.

use crate::errors::{error_codes, RouterError};
use crate::routing::parameters::Parameters;
use regex::Regex;

/// One run of a path template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Text matched as-is
    Literal(String),
    /// `:name`, one segment
    Param(String),
    /// `*`, one segment
    Placeholder,
    /// `**`, rest of the path
    MatchAny,
}

/// A validated template, ready to be inserted into a tree.
#[derive(Debug, Clone)]
pub(crate) struct RouteTemplate {
    pub tokens: Vec<Token>,
    pub parameters: Parameters,
    /// Index into `tokens` of the first `**`.
    pub match_any: Option<usize>,
    /// Template text from the first `**` onward.
    pub suffix: String,
}

impl RouteTemplate {
    pub fn parse(template: &str) -> Result<Self, RouterError> {
        let tokens = tokenize(template)?;
        let mut parameters = Parameters::from_tokens(&tokens)?;
        let match_any = tokens.iter().position(|t| *t == Token::MatchAny);
        let mut suffix = String::new();

        if let Some(index) = match_any {
            parameters.set_pattern(compile_pattern(&tokens[index..])?);
            if let Some(offset) = template.find("**") {
                suffix = template[offset..].to_string();
            }
        }

        Ok(Self {
            tokens,
            parameters,
            match_any,
            suffix,
        })
    }
}

/// Splits a path template into literal, parameter and wildcard runs.
pub fn tokenize(template: &str) -> Result<Vec<Token>, RouterError> {
    let bytes = template.as_bytes();
    let mut tokens = Vec::new();
    let mut literal_start = 0;
    let mut pos = 0;

    while pos < bytes.len() {
        match bytes[pos] {
            b':' => {
                push_literal(&mut tokens, &template[literal_start..pos]);
                let start = pos + 1;
                let end = template[start..]
                    .find('/')
                    .map_or(template.len(), |i| start + i);
                let name = &template[start..end];

                if name.is_empty() {
                    return Err(RouterError::validation(
                        error_codes::EMPTY_PARAM_NAME,
                        format!("Empty parameter name at offset {} in '{}'", pos, template),
                    ));
                }
                if name.contains([':', '*']) {
                    return Err(RouterError::validation(
                        error_codes::INVALID_PARAM_NAME,
                        format!("Invalid parameter name '{}' in '{}'", name, template),
                    ));
                }

                tokens.push(Token::Param(name.to_string()));
                pos = end;
                literal_start = end;
            }
            b'*' => {
                push_literal(&mut tokens, &template[literal_start..pos]);
                let run = bytes[pos..].iter().take_while(|&&b| b == b'*').count();
                let next = bytes.get(pos + run).copied();

                if run > 2 {
                    return Err(RouterError::validation(
                        error_codes::INVALID_WILDCARD,
                        format!("Wildcard '{}' in '{}'", "*".repeat(run), template),
                    ));
                }
                if run == 1 && next.is_some_and(|b| b != b'/') {
                    return Err(RouterError::validation(
                        error_codes::INVALID_WILDCARD,
                        format!("'*' must span a whole segment in '{}'", template),
                    ));
                }

                tokens.push(if run == 2 {
                    Token::MatchAny
                } else {
                    Token::Placeholder
                });
                pos += run;
                literal_start = pos;
            }
            _ => pos += 1,
        }
    }

    push_literal(&mut tokens, &template[literal_start..]);
    Ok(tokens)
}

fn push_literal(tokens: &mut Vec<Token>, text: &str) {
    if !text.is_empty() {
        tokens.push(Token::Literal(text.to_string()));
    }
}

/// Compiles the tokens from a `**` onward into one anchored regex with a
/// capture group per parameter or wildcard, in template order.
pub fn compile_pattern(tokens: &[Token]) -> Result<Regex, RouterError> {
    let mut source = String::from("^");

    for token in tokens {
        match token {
            Token::Literal(text) => source.push_str(&regex::escape(text)),
            Token::Param(_) | Token::Placeholder => source.push_str("([^/]+)"),
            Token::MatchAny => source.push_str("(.*?)"),
        }
    }
    source.push('$');

    Regex::new(&source).map_err(|e| {
        RouterError::validation(
            error_codes::INVALID_ROUTE_PATTERN,
            format!("Invalid route pattern: {}", e),
        )
    })
}
