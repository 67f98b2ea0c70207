//! Serialize element trees to indented HTML for snapshot assertions.

use std::fmt::Write as _;

use crate::dom::{Dom, NodeId};

/// Render the subtree at `node` as indented HTML.
///
/// Attributes come out as `id`, `class`, then the element's attributes in
/// insertion order, then `style` as inline CSS text. Elements with neither
/// children nor text are written as `<tag></tag>` on one line. A missing node
/// renders as an empty string.
///
/// ```
/// use mantle::dom::{Dom, ElementData};
/// use mantle::testing::to_html;
///
/// let mut dom = Dom::new();
/// let root = dom.create_element(ElementData::new("div").with_class("card"));
/// dom.append_child(root, ElementData::new("span").with_text("hi"));
/// assert_eq!(to_html(&dom, root), "<div class=\"card\">\n  <span>hi</span>\n</div>\n");
/// ```
pub fn to_html(dom: &Dom, node: NodeId) -> String {
    let mut out = String::new();
    write_node(dom, node, 0, &mut out);
    out
}

fn write_node(dom: &Dom, node: NodeId, depth: usize, out: &mut String) {
    let Some(data) = dom.get(node) else {
        return;
    };
    let indent = "  ".repeat(depth);
    let _ = write!(out, "{indent}<{}", data.tag);
    if let Some(id) = &data.id {
        let _ = write!(out, " id=\"{}\"", escape(id));
    }
    if !data.class_list.is_empty() {
        let _ = write!(out, " class=\"{}\"", escape(&data.class_list.to_string()));
    }
    for (name, value) in &data.attributes {
        if value.is_empty() {
            let _ = write!(out, " {name}");
        } else {
            let _ = write!(out, " {name}=\"{}\"", escape(value));
        }
    }
    if !data.style.is_empty() {
        let _ = write!(out, " style=\"{}\"", escape(&data.style.css_text()));
    }
    out.push('>');

    let children = dom.children(node);
    if children.is_empty() {
        if let Some(text) = &data.text {
            out.push_str(&escape(text));
        }
        let _ = writeln!(out, "</{}>", data.tag);
        return;
    }

    out.push('\n');
    if let Some(text) = &data.text {
        let _ = writeln!(out, "{indent}  {}", escape(text));
    }
    for &child in children {
        write_node(dom, child, depth + 1, out);
    }
    let _ = writeln!(out, "{indent}</{}>", data.tag);
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
