//! Retained element tree

use crate::commands::Handler;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Write;

/// DOM event kinds the dashboard binds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Click,
    Change,
}

impl EventKind {
    pub fn as_str(self) -> &'static str {
        match self {
            EventKind::Click => "click",
            EventKind::Change => "change",
        }
    }
}

/// An event handler bound to an element
#[derive(Debug, Clone, PartialEq)]
pub struct Listener {
    pub event: EventKind,
    pub handler: Handler,
}

/// Element node
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Element {
    tag: String,
    id: Option<String>,
    classes: BTreeSet<String>,
    attrs: BTreeMap<String, String>,
    text: Option<String>,
    hidden: bool,
    children: Vec<Element>,
    listeners: Vec<Listener>,
}

impl Element {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            ..Default::default()
        }
    }

    // ========================================================================
    // Builders
    // ========================================================================

    pub fn with_id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    /// Add one or more space-separated classes
    pub fn with_class(mut self, classes: &str) -> Self {
        for class in classes.split_whitespace() {
            self.classes.insert(class.to_string());
        }
        self
    }

    pub fn with_attr(mut self, name: &str, value: &str) -> Self {
        self.attrs.insert(name.to_string(), value.to_string());
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = Element>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    pub fn on(mut self, event: EventKind, handler: Handler) -> Self {
        self.add_listener(event, handler);
        self
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = Some(text.into());
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    pub fn set_attr(&mut self, name: &str, value: &str) {
        self.attrs.insert(name.to_string(), value.to_string());
    }

    pub fn remove_attr(&mut self, name: &str) {
        self.attrs.remove(name);
    }

    /// Boolean attribute such as `checked` or `selected`
    pub fn set_flag(&mut self, name: &str, on: bool) {
        if on {
            self.set_attr(name, "");
        } else {
            self.remove_attr(name);
        }
    }

    pub fn has_flag(&self, name: &str) -> bool {
        self.attrs.contains_key(name)
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn set_hidden(&mut self, hidden: bool) {
        self.hidden = hidden;
    }

    pub fn classes(&self) -> &BTreeSet<String> {
        &self.classes
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    pub fn add_class(&mut self, class: &str) {
        self.classes.insert(class.to_string());
    }

    pub fn remove_class(&mut self, class: &str) {
        self.classes.remove(class);
    }

    /// Flip a class, returning whether it is now present
    pub fn toggle_class(&mut self, class: &str) -> bool {
        if self.classes.remove(class) {
            false
        } else {
            self.classes.insert(class.to_string());
            true
        }
    }

    pub fn children(&self) -> &[Element] {
        &self.children
    }

    pub fn append_child(&mut self, child: Element) {
        self.children.push(child);
    }

    /// Drop every child (and its listeners) and insert the new ones
    pub fn replace_children(&mut self, children: Vec<Element>) {
        self.children = children;
    }

    pub fn listeners(&self) -> &[Listener] {
        &self.listeners
    }

    /// Bind a handler; binding an identical listener twice is a no-op
    pub fn add_listener(&mut self, event: EventKind, handler: Handler) {
        let listener = Listener { event, handler };
        if !self.listeners.contains(&listener) {
            self.listeners.push(listener);
        }
    }

    // ========================================================================
    // Traversal
    // ========================================================================

    pub fn find_by_id(&self, id: &str) -> Option<&Element> {
        if self.id.as_deref() == Some(id) {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find_by_id(id))
    }

    pub fn find_by_id_mut(&mut self, id: &str) -> Option<&mut Element> {
        if self.id.as_deref() == Some(id) {
            return Some(self);
        }
        self.children.iter_mut().find_map(|c| c.find_by_id_mut(id))
    }

    /// Depth-first, parent before children
    pub fn visit(&self, f: &mut impl FnMut(&Element)) {
        f(self);
        for child in &self.children {
            child.visit(f);
        }
    }

    pub fn visit_mut(&mut self, f: &mut impl FnMut(&mut Element)) {
        f(self);
        for child in &mut self.children {
            child.visit_mut(f);
        }
    }

    /// Number of nodes in this subtree, including self
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(Element::node_count).sum::<usize>()
    }

    /// Number of listeners in this subtree
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
            + self
                .children
                .iter()
                .map(Element::listener_count)
                .sum::<usize>()
    }

    /// Concatenated text of this subtree
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.visit(&mut |e| {
            if let Some(text) = e.text() {
                if !out.is_empty() {
                    out.push(' ');
                }
                out.push_str(text);
            }
        });
        out
    }

    // ========================================================================
    // Serialization
    // ========================================================================

    /// Serialize as HTML
    pub fn write_html(&self, out: &mut String, depth: usize) {
        let indent = "  ".repeat(depth);
        let _ = write!(out, "{}<{}", indent, self.tag);

        if let Some(id) = &self.id {
            let _ = write!(out, " id=\"{}\"", escape(id));
        }
        if !self.classes.is_empty() {
            let classes: Vec<&str> = self.classes.iter().map(String::as_str).collect();
            let _ = write!(out, " class=\"{}\"", escape(&classes.join(" ")));
        }
        for (name, value) in &self.attrs {
            if value.is_empty() {
                let _ = write!(out, " {}", name);
            } else {
                let _ = write!(out, " {}=\"{}\"", name, escape(value));
            }
        }
        if self.hidden {
            out.push_str(" hidden");
        }
        out.push('>');

        if is_void(&self.tag) {
            out.push('\n');
            return;
        }

        if self.children.is_empty() {
            if let Some(text) = &self.text {
                out.push_str(&escape(text));
            }
            let _ = writeln!(out, "</{}>", self.tag);
            return;
        }

        out.push('\n');
        if let Some(text) = &self.text {
            let _ = writeln!(out, "{}  {}", indent, escape(text));
        }
        for child in &self.children {
            child.write_html(out, depth + 1);
        }
        let _ = writeln!(out, "{}</{}>", indent, self.tag);
    }

    /// Indented plain-text outline for the console
    pub fn write_outline(&self, out: &mut String, depth: usize) {
        if self.hidden {
            return;
        }

        let text = self.text.as_deref().unwrap_or("").trim();
        let label = match (&self.id, self.tag.as_str()) {
            (_, "input") if self.attr("type") == Some("checkbox") => {
                let mark = if self.has_flag("checked") { "[x]" } else { "[ ]" };
                Some(format!("{} {}", mark, self.id.as_deref().unwrap_or("")))
            }
            (_, "option") => {
                let mark = if self.has_flag("selected") { "*" } else { " " };
                Some(format!("{}{}", mark, text))
            }
            (_, "button") => Some(format!("[{}]", text)),
            _ if !text.is_empty() => Some(text.to_string()),
            _ => None,
        };

        let next = match label {
            Some(label) => {
                let _ = writeln!(out, "{}{}", "  ".repeat(depth), label);
                depth + 1
            }
            None => depth,
        };

        for child in &self.children {
            child.write_outline(out, next);
        }
    }
}

fn is_void(tag: &str) -> bool {
    matches!(tag, "input" | "br" | "hr" | "img" | "meta")
}

/// Escape text for HTML content and attribute values
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_class() {
        let mut card = Element::new("div").with_class("card green");
        assert!(card.toggle_class("bg-dark"));
        assert!(card.has_class("bg-dark"));
        assert!(!card.toggle_class("bg-dark"));
        assert!(!card.has_class("bg-dark"));
        assert!(card.has_class("card") && card.has_class("green"));
    }

    #[test]
    fn test_find_by_id_nested() {
        let mut root = Element::new("body").with_child(
            Element::new("section")
                .with_id("outer")
                .with_child(Element::new("span").with_id("inner").with_text("hi")),
        );

        assert_eq!(root.find_by_id("inner").and_then(Element::text), Some("hi"));
        root.find_by_id_mut("inner").unwrap().set_text("bye");
        assert_eq!(root.find_by_id("inner").and_then(Element::text), Some("bye"));
        assert!(root.find_by_id("missing").is_none());
    }

    #[test]
    fn test_identical_listener_bound_once() {
        let mut button = Element::new("button").on(EventKind::Click, Handler::ToggleSortMode);
        button.add_listener(EventKind::Click, Handler::ToggleSortMode);
        button.add_listener(EventKind::Click, Handler::ToggleDarkMode);
        assert_eq!(button.listeners().len(), 2);
    }

    #[test]
    fn test_replace_children_drops_listeners() {
        let mut list = Element::new("div").with_child(
            Element::new("button").on(EventKind::Click, Handler::ToggleAddForm),
        );
        assert_eq!(list.listener_count(), 1);

        list.replace_children(vec![Element::new("p")]);
        assert_eq!(list.listener_count(), 0);
        assert_eq!(list.node_count(), 2);
    }

    #[test]
    fn test_html_escaping() {
        let mut html = String::new();
        Element::new("td")
            .with_attr("title", "M&M \"quote\"")
            .with_text("<b>M&M</b>")
            .write_html(&mut html, 0);
        assert_eq!(
            html,
            "<td title=\"M&amp;M &quot;quote&quot;\">&lt;b&gt;M&amp;M&lt;/b&gt;</td>\n"
        );
    }

    #[test]
    fn test_outline_skips_hidden() {
        let root = Element::new("div")
            .with_child(Element::new("p").with_text("shown"))
            .with_child(Element::new("p").with_text("secret").hidden(true));
        let mut out = String::new();
        root.write_outline(&mut out, 0);
        assert!(out.contains("shown"));
        assert!(!out.contains("secret"));
    }
}
