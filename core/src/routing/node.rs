//! Radix tree of path prefixes for a single HTTP method.
//!
//! Nodes live in an arena and refer to their children by index. Parameter
//! positions are stored under a `:` marker prefix, so `:id` and `*` at the
//! same position share one node; `**` nodes are terminal and carry a regex
//! over the rest of the path instead of a prefix.

use crate::routing::parameters::Parameters;
use crate::routing::parser::{RouteTemplate, Token};
use crate::routing::types::HandlerName;
use regex::Regex;
use std::collections::HashMap;
use std::fmt::Write;
use std::mem;

const ROOT: usize = 0;
const PARAM_MARKER: char = ':';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Static,
    Param,
    Placeholder,
    MatchAny,
}

impl NodeKind {
    fn is_param(self) -> bool {
        matches!(self, NodeKind::Param | NodeKind::Placeholder)
    }
}

#[derive(Debug)]
struct Endpoint<T> {
    handler: T,
    parameters: Parameters,
}

#[derive(Debug)]
struct Node<T> {
    kind: NodeKind,
    prefix: String,
    label: Option<char>,
    children: Vec<usize>,
    endpoint: Option<Endpoint<T>>,
    param_key: Option<String>,
    has_match_any: bool,
}

impl<T> Node<T> {
    fn new(kind: NodeKind, prefix: &str, param_key: Option<&str>) -> Self {
        Self {
            kind,
            prefix: prefix.to_string(),
            label: prefix.chars().next(),
            children: Vec::new(),
            endpoint: None,
            param_key: param_key.map(str::to_string),
            has_match_any: false,
        }
    }
}

/// Route tree owned by the router for one method.
#[derive(Debug)]
pub(crate) struct Tree<T> {
    nodes: Vec<Node<T>>,
    routes: usize,
}

impl<T> Tree<T> {
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::new(NodeKind::Static, "", None)],
            routes: 0,
        }
    }

    /// Number of distinct routes registered.
    pub fn len(&self) -> usize {
        self.routes
    }

    /// Inserts a parsed template. Returns the handler it replaced, if any.
    pub fn add(&mut self, template: RouteTemplate, handler: T) -> Option<T> {
        let RouteTemplate {
            tokens,
            parameters,
            match_any,
            suffix,
        } = template;
        let end = match_any.unwrap_or(tokens.len());
        let mut path = String::new();
        let mut trailing_param = None;

        for token in &tokens[..end] {
            trailing_param = None;
            match token {
                Token::Literal(text) => path.push_str(text),
                Token::Param(name) => {
                    self.insert(NodeKind::Static, &path, None);
                    path.push(PARAM_MARKER);
                    self.insert(NodeKind::Param, &path, Some(name.as_str()));
                    trailing_param = Some(name.as_str());
                }
                Token::Placeholder => {
                    self.insert(NodeKind::Static, &path, None);
                    path.push(PARAM_MARKER);
                    self.insert(NodeKind::Placeholder, &path, None);
                }
                Token::MatchAny => break,
            }
        }

        let index = self.insert(NodeKind::Static, &path, None);
        let endpoint = Endpoint {
            handler,
            parameters,
        };
        let replaced = if match_any.is_some() {
            self.attach_match_any(index, &suffix, endpoint)
        } else {
            // The route ending here names the parameter it displays.
            let node = &mut self.nodes[index];
            if let (NodeKind::Param, Some(name)) = (node.kind, trailing_param) {
                node.param_key = Some(name.to_string());
            }
            node.endpoint.replace(endpoint)
        };

        if replaced.is_none() {
            self.routes += 1;
        }
        replaced.map(|endpoint| endpoint.handler)
    }

    /// Walks `path` from the root, splitting nodes where it diverges, and
    /// returns the index of the node whose full path equals `path`.
    fn insert(&mut self, kind: NodeKind, path: &str, param_key: Option<&str>) -> usize {
        let mut current = ROOT;
        let mut search = path;

        loop {
            let prefix_len = self.nodes[current].prefix.len();
            let offset = common_prefix_len(&self.nodes[current].prefix, search);

            if offset < prefix_len {
                let node = &mut self.nodes[current];
                let mut child = Node::new(node.kind, &node.prefix[offset..], None);
                child.children = mem::take(&mut node.children);
                child.endpoint = node.endpoint.take();
                child.param_key = node.param_key.take();
                child.has_match_any = node.has_match_any;

                node.prefix.truncate(offset);
                node.kind = NodeKind::Static;
                node.has_match_any = false;

                let child = self.push(child);
                self.nodes[current].children.push(child);

                if offset == search.len() {
                    self.mark(current, kind, param_key);
                    return current;
                }
                let next = self.push(Node::new(kind, &search[offset..], param_key));
                self.nodes[current].children.push(next);
                return next;
            }

            if offset < search.len() {
                search = &search[offset..];
                let label = search.chars().next();
                let existing = self.nodes[current].children.iter().copied().find(|&c| {
                    self.nodes[c].kind != NodeKind::MatchAny && self.nodes[c].label == label
                });
                if let Some(child) = existing {
                    current = child;
                    continue;
                }

                let next = self.push(Node::new(kind, search, param_key));
                self.nodes[current].children.push(next);
                return next;
            }

            self.mark(current, kind, param_key);
            return current;
        }
    }

    fn mark(&mut self, index: usize, kind: NodeKind, param_key: Option<&str>) {
        let node = &mut self.nodes[index];
        if kind.is_param() && !node.kind.is_param() {
            node.kind = kind;
        }
        if node.param_key.is_none() {
            node.param_key = param_key.map(str::to_string);
        }
    }

    /// Attaches a `**` endpoint under `parent`. Suffixes that only differ in
    /// parameter names compile to the same pattern and share one node.
    fn attach_match_any(
        &mut self,
        parent: usize,
        suffix: &str,
        endpoint: Endpoint<T>,
    ) -> Option<Endpoint<T>> {
        let pattern = endpoint.parameters.pattern().map(Regex::as_str);
        let existing = self.nodes[parent].children.iter().copied().find(|&c| {
            let node = &self.nodes[c];
            node.kind == NodeKind::MatchAny
                && node
                    .endpoint
                    .as_ref()
                    .and_then(|e| e.parameters.pattern())
                    .map(Regex::as_str)
                    == pattern
        });
        if let Some(child) = existing {
            let node = &mut self.nodes[child];
            node.prefix = suffix.to_string();
            node.label = suffix.chars().next();
            return node.endpoint.replace(endpoint);
        }

        let mut node = Node::new(NodeKind::MatchAny, suffix, None);
        node.endpoint = Some(endpoint);
        let child = self.push(node);
        let parent = &mut self.nodes[parent];
        parent.children.push(child);
        parent.has_match_any = true;
        None
    }

    fn push(&mut self, node: Node<T>) -> usize {
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    /// Looks `path` up, returning the handler and its parameters.
    pub fn find(&self, path: &str) -> Option<(&T, HashMap<String, String>)> {
        let mut values = Vec::new();
        let index = self.find_node(ROOT, path, &mut values)?;
        let endpoint = self.nodes[index].endpoint.as_ref()?;
        Some((&endpoint.handler, endpoint.parameters.get_object(&values)))
    }

    /// True when a handler is registered for exactly this path.
    pub fn contains(&self, path: &str) -> bool {
        let mut values = Vec::new();
        self.find_node(ROOT, path, &mut values).is_some()
    }

    /// Depth-first search in static > param > match-any order. Every value
    /// pushed for a branch that fails is popped before trying the next one.
    fn find_node(&self, index: usize, path: &str, values: &mut Vec<String>) -> Option<usize> {
        let node = &self.nodes[index];

        if path.is_empty() || path == node.prefix {
            return node.endpoint.is_some().then_some(index);
        }

        let offset = common_prefix_len(&node.prefix, path);
        let full_match = offset == node.prefix.len();
        let search = if full_match {
            &path[offset..]
        } else if node.kind.is_param() {
            path
        } else {
            return None;
        };
        let first = search.chars().next();

        let static_child = node.children.iter().copied().find(|&c| {
            self.nodes[c].kind == NodeKind::Static && self.nodes[c].label == first
        });
        if let Some(child) = static_child {
            if let Some(found) = self.find_node(child, search, values) {
                return Some(found);
            }
        }

        if !full_match {
            return None;
        }

        let param_child = node
            .children
            .iter()
            .copied()
            .find(|&c| self.nodes[c].kind.is_param());
        // A parameter never captures an empty segment.
        let end = search.find('/').unwrap_or(search.len());
        if let Some(child) = param_child.filter(|_| end > 0) {
            values.push(search[..end].to_string());
            if let Some(found) = self.find_node(child, &search[end..], values) {
                return Some(found);
            }
            values.pop();
        }

        if node.has_match_any {
            for &child in &node.children {
                let candidate = &self.nodes[child];
                if candidate.kind != NodeKind::MatchAny {
                    continue;
                }
                let Some(pattern) = candidate
                    .endpoint
                    .as_ref()
                    .and_then(|e| e.parameters.pattern())
                else {
                    continue;
                };
                let Some(captures) = pattern.captures(search) else {
                    continue;
                };

                let depth = values.len();
                values.extend(
                    captures
                        .iter()
                        .skip(1)
                        .map(|group| group.map_or_else(String::new, |m| m.as_str().to_string())),
                );
                if let Some(found) = self.find_node(child, "", values) {
                    return Some(found);
                }
                values.truncate(depth);
            }
        }

        None
    }
}

impl<T: HandlerName> Tree<T> {
    /// Renders the tree with box-drawing connectors, one node per line.
    pub fn render(&self) -> String {
        let mut out = String::new();
        let children = &self.nodes[ROOT].children;
        for (i, &child) in children.iter().enumerate() {
            self.render_node(child, "", i + 1 == children.len(), &mut out);
        }
        out
    }

    fn render_node(&self, index: usize, indent: &str, tail: bool, out: &mut String) {
        let node = &self.nodes[index];
        let label = match node.kind {
            NodeKind::Static | NodeKind::MatchAny => node.prefix.clone(),
            NodeKind::Param => format!(":{}", node.param_key.as_deref().unwrap_or_default()),
            NodeKind::Placeholder => "*".to_string(),
        };
        let handler = node
            .endpoint
            .as_ref()
            .map(|e| format!(" {}()", e.handler.handler_name().unwrap_or("ƒ")))
            .unwrap_or_default();
        let connector = if tail { "└── " } else { "├── " };

        let _ = writeln!(
            out,
            "{}{}{}{} children={}",
            indent,
            connector,
            label,
            handler,
            node.children.len()
        );

        let indent = format!("{}{}", indent, if tail { "    " } else { "│   " });
        for (i, &child) in node.children.iter().enumerate() {
            self.render_node(child, &indent, i + 1 == node.children.len(), out);
        }
    }
}

/// Byte length of the longest common prefix, on a char boundary.
fn common_prefix_len(a: &str, b: &str) -> usize {
    a.char_indices()
        .zip(b.chars())
        .find(|((_, x), y)| x != y)
        .map_or_else(|| a.len().min(b.len()), |((i, _), _)| i)
}
