//! Element Query
//!
//! querySelector / querySelectorAll over a small selector grammar:
//! compound selectors of `tag`, `*`, `#id`, `.class`, `[attr]` and
//! `[attr="value"]`, joined into comma separated lists.

use crate::{DomError, DomResult, DomTree, NodeId};

/// Simple selector component
#[derive(Debug, Clone, PartialEq, Eq)]
enum SimpleSelector {
    Universal,
    Tag(String),
    Id(String),
    Class(String),
    Attribute { name: String, value: Option<String> },
}

/// Compound selector: every component must match the same element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    parts: Vec<SimpleSelector>,
}

/// Comma separated selector list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorList {
    selectors: Vec<Selector>,
}

impl SelectorList {
    /// Parse a selector list such as `h1,h2` or `[role="tab"]`
    pub fn parse(input: &str) -> DomResult<Self> {
        let selectors = input
            .split(',')
            .map(Selector::parse)
            .collect::<DomResult<Vec<_>>>()?;
        Ok(Self { selectors })
    }

    pub fn matches(&self, tree: &DomTree, id: NodeId) -> bool {
        self.selectors.iter().any(|s| s.matches(tree, id))
    }
}

impl Selector {
    fn parse(input: &str) -> DomResult<Self> {
        let s = input.trim();
        let invalid = || DomError::InvalidSelector(input.trim().to_string());
        if s.is_empty() || (s.contains(char::is_whitespace) && !s.contains('[')) {
            return Err(invalid());
        }

        let mut parts = Vec::new();
        let mut rest = s;

        // Leading type selector
        let tag_end = rest.find(['#', '.', '[']).unwrap_or(rest.len());
        let tag = &rest[..tag_end];
        if tag == "*" {
            parts.push(SimpleSelector::Universal);
        } else if !tag.is_empty() {
            if !tag.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
                return Err(invalid());
            }
            parts.push(SimpleSelector::Tag(tag.to_ascii_lowercase()));
        }
        rest = &rest[tag_end..];

        while let Some(first) = rest.chars().next() {
            match first {
                '#' | '.' => {
                    let body = &rest[1..];
                    let end = body.find(['#', '.', '[']).unwrap_or(body.len());
                    let name = &body[..end];
                    if name.is_empty() {
                        return Err(invalid());
                    }
                    parts.push(if first == '#' {
                        SimpleSelector::Id(name.to_string())
                    } else {
                        SimpleSelector::Class(name.to_string())
                    });
                    rest = &body[end..];
                }
                '[' => {
                    let close = rest.find(']').ok_or_else(invalid)?;
                    let inner = rest[1..close].trim();
                    let (name, value) = match inner.split_once('=') {
                        Some((n, v)) => {
                            let v = v.trim();
                            let v = v
                                .strip_prefix('"')
                                .and_then(|v| v.strip_suffix('"'))
                                .or_else(|| v.strip_prefix('\'').and_then(|v| v.strip_suffix('\'')))
                                .unwrap_or(v);
                            (n.trim(), Some(v.to_string()))
                        }
                        None => (inner, None),
                    };
                    if name.is_empty() {
                        return Err(invalid());
                    }
                    parts.push(SimpleSelector::Attribute {
                        name: name.to_ascii_lowercase(),
                        value,
                    });
                    rest = &rest[close + 1..];
                }
                _ => return Err(invalid()),
            }
        }

        Ok(Self { parts })
    }

    fn matches(&self, tree: &DomTree, id: NodeId) -> bool {
        let Some(element) = tree.get(id).and_then(|n| n.as_element()) else {
            return false;
        };
        self.parts.iter().all(|part| match part {
            SimpleSelector::Universal => true,
            SimpleSelector::Tag(tag) => element.tag == *tag,
            SimpleSelector::Id(v) => element.attrs.get("id") == Some(v.as_str()),
            SimpleSelector::Class(class) => element
                .attrs
                .get("class")
                .is_some_and(|c| c.split_whitespace().any(|c| c == class)),
            SimpleSelector::Attribute { name, value } => match (element.attrs.get(name), value) {
                (Some(_), None) => true,
                (Some(actual), Some(expected)) => actual == expected,
                (None, _) => false,
            },
        })
    }
}

impl DomTree {
    /// First descendant of `root` (document order) matching `selector`
    pub fn query_selector(&self, root: NodeId, selector: &str) -> DomResult<Option<NodeId>> {
        let list = SelectorList::parse(selector)?;
        Ok(self.query_first(root, &list))
    }

    /// All descendants of `root` matching `selector`
    pub fn query_selector_all(&self, root: NodeId, selector: &str) -> DomResult<Vec<NodeId>> {
        let list = SelectorList::parse(selector)?;
        Ok(self.query_all(root, &list))
    }

    pub fn query_first(&self, root: NodeId, list: &SelectorList) -> Option<NodeId> {
        self.descendants(root).into_iter().find(|&d| list.matches(self, d))
    }

    pub fn query_all(&self, root: NodeId, list: &SelectorList) -> Vec<NodeId> {
        self.descendants(root)
            .into_iter()
            .filter(|&d| list.matches(self, d))
            .collect()
    }

    /// Check if an element matches `selector`
    pub fn matches(&self, id: NodeId, selector: &str) -> DomResult<bool> {
        Ok(SelectorList::parse(selector)?.matches(self, id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> (DomTree, Vec<NodeId>) {
        let mut tree = DomTree::new();
        let root = tree.root();
        let div = tree.create_element("div");
        let h3 = tree.create_element("h3");
        let panel = tree.create_element("div");
        let h2 = tree.create_element("h2");
        tree.append_child(root, div).unwrap();
        tree.append_child(div, h3).unwrap();
        tree.append_child(div, panel).unwrap();
        tree.append_child(panel, h2).unwrap();
        tree.set_attribute(h3, "role", "tab").unwrap();
        tree.set_attribute(panel, "role", "tabpanel").unwrap();
        tree.set_attribute(panel, "class", "panel open").unwrap();
        tree.set_attribute(h2, "id", "title").unwrap();
        tree.set_attribute(h2, "autofocus", "").unwrap();
        (tree, vec![div, h3, panel, h2])
    }

    #[test]
    fn test_attribute_selectors() {
        let (tree, n) = fixture();
        let root = tree.root();
        assert_eq!(tree.query_selector(root, r#"[role="tab"]"#).unwrap(), Some(n[1]));
        assert_eq!(tree.query_selector(root, "[role=tabpanel]").unwrap(), Some(n[2]));
        assert_eq!(tree.query_selector(root, "[autofocus]").unwrap(), Some(n[3]));
        assert_eq!(tree.query_selector(root, "[role='dialog']").unwrap(), None);
    }

    #[test]
    fn test_selector_list_document_order() {
        let (tree, n) = fixture();
        let found = tree.query_selector_all(tree.root(), "h1,h2,h3,h4,h5,h6").unwrap();
        assert_eq!(found, vec![n[1], n[3]]);
    }

    #[test]
    fn test_compound_and_class() {
        let (tree, n) = fixture();
        assert!(tree.matches(n[2], "div.panel[role=tabpanel]").unwrap());
        assert!(!tree.matches(n[2], "div.closed").unwrap());
        assert!(tree.matches(n[3], "#title").unwrap());
        assert!(tree.matches(n[3], "*").unwrap());
    }

    #[test]
    fn test_root_is_excluded() {
        let (tree, n) = fixture();
        assert_eq!(tree.query_selector(n[1], "h3").unwrap(), None);
    }

    #[test]
    fn test_invalid_selectors() {
        assert!(SelectorList::parse("").is_err());
        assert!(SelectorList::parse("[role").is_err());
        assert!(SelectorList::parse("div p").is_err());
        assert!(SelectorList::parse("h1,").is_err());
    }
}
