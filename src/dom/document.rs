//! Document root, element lookup and event dispatch

use super::element::{Element, EventKind};
use crate::commands::Action;
use crate::error::{AppError, Result};
use tracing::{debug, warn};

/// A user event aimed at one element
#[derive(Debug, Clone, PartialEq)]
pub struct DomEvent {
    pub kind: EventKind,
    /// New value for `change` events (checkbox: on/off/true/false)
    pub value: Option<String>,
}

impl DomEvent {
    pub fn click() -> Self {
        Self {
            kind: EventKind::Click,
            value: None,
        }
    }

    pub fn change(value: impl Into<String>) -> Self {
        Self {
            kind: EventKind::Change,
            value: Some(value.into()),
        }
    }

    /// Interpret the value as a checkbox state
    pub fn checked(&self) -> Option<bool> {
        match self.value.as_deref()?.trim().to_ascii_lowercase().as_str() {
            "on" | "true" | "1" | "yes" | "checked" => Some(true),
            "off" | "false" | "0" | "no" | "unchecked" => Some(false),
            _ => None,
        }
    }
}

/// The dashboard document
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    root: Element,
}

impl Document {
    pub fn new(root: Element) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut Element {
        &mut self.root
    }

    pub fn get_element_by_id(&self, id: &str) -> Option<&Element> {
        self.root.find_by_id(id)
    }

    pub fn get_element_by_id_mut(&mut self, id: &str) -> Option<&mut Element> {
        self.root.find_by_id_mut(id)
    }

    /// Swap the children of the container `id`; false when the container is missing
    pub fn replace_children(&mut self, id: &str, children: Vec<Element>) -> bool {
        match self.root.find_by_id_mut(id) {
            Some(container) => {
                container.replace_children(children);
                true
            }
            None => {
                warn!("Render target '{}' not found", id);
                false
            }
        }
    }

    /// Set the text of element `id` if it exists
    pub fn set_text(&mut self, id: &str, text: impl Into<String>) {
        if let Some(el) = self.root.find_by_id_mut(id) {
            el.set_text(text);
        }
    }

    /// Current `value` of an input/select
    pub fn value_of(&self, id: &str) -> String {
        self.get_element_by_id(id)
            .and_then(|e| e.attr("value"))
            .map(|v| v.trim().to_string())
            .unwrap_or_default()
    }

    pub fn node_count(&self) -> usize {
        self.root.node_count()
    }

    pub fn listener_count(&self) -> usize {
        self.root.listener_count()
    }

    /// Deliver an event to element `id` and resolve its listeners into actions
    ///
    /// `change` events first update the element's own value, the way a browser
    /// updates an input before firing its handlers.
    pub fn dispatch(&mut self, id: &str, event: &DomEvent) -> Result<Vec<Action>> {
        let element = self
            .root
            .find_by_id_mut(id)
            .ok_or_else(|| AppError::Validation(format!("No element with id '{}'", id)))?;

        if event.kind == EventKind::Change {
            if let Some(value) = &event.value {
                if element.attr("type") == Some("checkbox") {
                    let checked = event.checked().ok_or_else(|| {
                        AppError::Validation(format!("'{}' is not a checkbox state", value))
                    })?;
                    element.set_flag("checked", checked);
                } else {
                    element.set_attr("value", value);
                }
            }
        }

        let handlers: Vec<_> = element
            .listeners()
            .iter()
            .filter(|l| l.event == event.kind)
            .map(|l| l.handler.clone())
            .collect();

        if handlers.is_empty() {
            debug!("No {} listener on '{}'", event.kind.as_str(), id);
        }

        handlers
            .iter()
            .map(|handler| handler.resolve(event, self))
            .collect()
    }

    /// Full HTML page
    pub fn to_html(&self, title: &str) -> String {
        let mut body = String::new();
        self.root.write_html(&mut body, 1);
        format!(
            "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n  <meta charset=\"UTF-8\">\n  <title>{}</title>\n</head>\n{}</html>\n",
            super::element::escape(title),
            body
        )
    }

    /// Plain-text outline of element `id` (or the whole document)
    pub fn outline(&self, id: Option<&str>) -> Option<String> {
        let start = match id {
            Some(id) => self.get_element_by_id(id)?,
            None => &self.root,
        };
        let mut out = String::new();
        start.write_outline(&mut out, 0);
        Some(out)
    }
}
