//! Dark mode classes
//!
//! Dark mode touches four kinds of element: the page body, cards, buttons and
//! tables. [`toggle`] flips their classes in place, so toggling twice restores
//! every class set. [`decorate`] brings freshly rendered subtrees in line with
//! the current theme.

use crate::dom::{Document, Element};

const DARK_SURFACE: [&str; 2] = ["bg-dark", "text-white"];
const BUTTON_LIGHT: &str = "btn-light";
const BUTTON_DARK: &str = "btn-dark";
const TABLE_DARK: &str = "table-dark";

fn is_card(el: &Element) -> bool {
    el.has_class("card")
}

/// Flip the theme classes of the whole document
pub fn toggle(doc: &mut Document) {
    doc.root_mut().visit_mut(&mut |el| {
        if el.tag() == "body" || is_card(el) {
            for class in DARK_SURFACE {
                el.toggle_class(class);
            }
        }
        if el.tag() == "button" {
            el.toggle_class(BUTTON_LIGHT);
            el.toggle_class(BUTTON_DARK);
        }
        if el.tag() == "table" {
            el.toggle_class(TABLE_DARK);
        }
    });
}

/// Set the theme classes of a subtree to match `dark`
pub fn decorate(el: &mut Element, dark: bool) {
    el.visit_mut(&mut |el| {
        if el.tag() == "body" || is_card(el) {
            for class in DARK_SURFACE {
                set_class(el, class, dark);
            }
        }
        if el.tag() == "button" {
            set_class(el, BUTTON_DARK, dark);
            set_class(el, BUTTON_LIGHT, !dark);
        }
        if el.tag() == "table" {
            set_class(el, TABLE_DARK, dark);
        }
    });
}

/// Decorate a list of new children
pub fn decorate_all(children: &mut [Element], dark: bool) {
    for child in children {
        decorate(child, dark);
    }
}

fn set_class(el: &mut Element, class: &str, on: bool) {
    if on {
        el.add_class(class);
    } else {
        el.remove_class(class);
    }
}
