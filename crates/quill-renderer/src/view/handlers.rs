//! Per-tag rendering for the inline view.

use crate::error::ViewError;
use crate::html::SVG_CHEVRON_RIGHT;
use crate::util::escape_html;

use super::Node;

type Handler = fn(Node<'_>) -> Result<String, ViewError>;

/// Tags that always render as a fixed string.
const SUBSTITUTIONS: &[(&str, &str)] = &[
    ("ellipses", "\u{2026}"),
    ("left_single_quote", "\u{2018}"),
    ("right_single_quote", "\u{2019}"),
    ("left_double_quote", "\u{201C}"),
    ("right_double_quote", "\u{201D}"),
    ("en_dash", "\u{2013}"),
    ("em_dash", "\u{2014}"),
    ("soft_break", "\n"),
];

const HANDLERS: &[(&str, Handler)] = &[
    ("doc", doc),
    ("str", text),
    ("image", image),
    ("reference_definition", reference_definition),
    ("span", span),
];

/// Render `node` by substitution, then by handler.
pub(super) fn dispatch(node: Node<'_>) -> Result<String, ViewError> {
    let tag = node.tag();
    if let Some((_, glyph)) = SUBSTITUTIONS.iter().find(|(t, _)| *t == tag) {
        return Ok((*glyph).to_owned());
    }
    match HANDLERS.iter().find(|(t, _)| *t == tag) {
        Some((_, handler)) => handler(node),
        None => Err(ViewError::UnhandledTag(tag.to_owned())),
    }
}

fn doc(node: Node<'_>) -> Result<String, ViewError> {
    Ok(node.content())
}

fn text(node: Node<'_>) -> Result<String, ViewError> {
    Ok(escape_html(node.text()).into_owned())
}

/// `<video>` for the `video` class, else `<img>` with the remaining attributes.
fn image(node: Node<'_>) -> Result<String, ViewError> {
    let src = match (node.reference_id(), node.destination()) {
        (Some(id), _) => node
            .lookup_reference(id)
            .map(|r| r.destination.as_str())
            .ok_or_else(|| ViewError::UnknownReference(id.to_owned()))?,
        (None, Some(destination)) => destination,
        (None, None) => return Err(ViewError::MissingSource),
    };
    let src = escape_html(src);

    if node.has_class("video") {
        return Ok(format!(r#"<video src="{src}" controls></video>"#));
    }

    let mut html = format!(r#"<img src="{src}" alt="{}""#, escape_html(node.text()));
    for (key, value) in node.attributes().iter() {
        if key != "src" && key != "alt" {
            html.push_str(&format!(r#" {key}="{}""#, escape_html(value)));
        }
    }
    html.push('>');
    Ok(html)
}

fn reference_definition(_node: Node<'_>) -> Result<String, ViewError> {
    Ok(String::new())
}

/// Keyboard shortcuts and menu paths.
fn span(node: Node<'_>) -> Result<String, ViewError> {
    if node.has_class("kbd") {
        let keys: Vec<String> = node
            .text()
            .split('+')
            .map(|key| format!("<kbd>{}</kbd>", escape_html(key)))
            .collect();
        return Ok(keys.join("+"));
    }
    if node.has_class("menu") {
        // Separators live in text leaves only; other children render as-is.
        let content: String = node
            .children()
            .map(|child| match child.tag() {
                "str" => escape_html(child.text()).replace("&gt;", SVG_CHEVRON_RIGHT),
                _ => child.render().into_string(),
            })
            .collect();
        return Ok(format!(r#"<span class="menu">{content}</span>"#));
    }
    Err(ViewError::UnknownSpanClass(node.cls().to_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::RenderContext;
    use crate::view::Tree;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn render(value: serde_json::Value) -> String {
        let tree = Tree::from_json(&value.to_string()).unwrap();
        let ctx = RenderContext::default();
        tree.root(&ctx).render().into_string()
    }

    #[test]
    fn test_kbd_splits_on_plus() {
        let html = render(json!({
            "tag": "span",
            "attributes": {"class": "kbd"},
            "children": [{"tag": "str", "text": "Ctrl+Alt+Del"}]
        }));
        assert_eq!(html, "<kbd>Ctrl</kbd>+<kbd>Alt</kbd>+<kbd>Del</kbd>");
    }

    #[test]
    fn test_menu_replaces_separators() {
        let html = render(json!({
            "tag": "span",
            "attributes": {"class": "menu"},
            "children": [{"tag": "str", "text": "File > Save"}]
        }));
        assert_eq!(
            html,
            format!("<span class=\"menu\">File {SVG_CHEVRON_RIGHT} Save</span>")
        );
    }

    #[test]
    fn test_span_with_unknown_class_is_an_error() {
        let html = render(json!({
            "tag": "span",
            "attributes": {"class": "shout"},
            "children": [{"tag": "str", "text": "hey"}]
        }));
        assert!(html.starts_with("<strong>error: unknown span class `shout`</strong>"));
    }

    #[test]
    fn test_image_reference_wins_over_destination() {
        let html = render(json!({
            "tag": "doc",
            "children": [{
                "tag": "image",
                "reference": "fig1",
                "destination": "local.png",
                "attributes": {"width": "300"},
                "children": [{"tag": "str", "text": "Figure one"}]
            }],
            "references": {"fig1": {"destination": "figs/one.png"}}
        }));
        assert_eq!(html, r#"<img src="figs/one.png" alt="Figure one" width="300">"#);
    }

    #[test]
    fn test_image_destination() {
        let html = render(json!({"tag": "image", "destination": "a.png", "text": "A & B"}));
        assert_eq!(html, r#"<img src="a.png" alt="A &amp; B">"#);
    }

    #[test]
    fn test_video_class() {
        let html = render(json!({
            "tag": "image",
            "destination": "clip.mp4",
            "attributes": {"class": "wide video"}
        }));
        assert_eq!(html, r#"<video src="clip.mp4" controls></video>"#);
    }

    #[test]
    fn test_image_unknown_reference() {
        let html = render(json!({"tag": "doc", "children": [{"tag": "image", "reference": "nope"}]}));
        assert!(html.starts_with("<strong>error: unknown reference `nope`</strong>"));
    }

    #[test]
    fn test_image_without_source() {
        let html = render(json!({"tag": "image"}));
        assert!(html.starts_with("<strong>error: image has no source</strong>"));
    }

    #[test]
    fn test_reference_definition_renders_nothing() {
        let html = render(json!({
            "tag": "doc",
            "children": [
                {"tag": "reference_definition", "text": "fig1"},
                {"tag": "str", "text": "x"}
            ]
        }));
        assert_eq!(html, "x");
    }

    #[test]
    fn test_substitutions() {
        let html = render(json!({
            "tag": "doc",
            "children": [
                {"tag": "left_double_quote"},
                {"tag": "str", "text": "Wait"},
                {"tag": "ellipses"},
                {"tag": "right_double_quote"},
                {"tag": "soft_break"},
                {"tag": "str", "text": "1"},
                {"tag": "en_dash"},
                {"tag": "str", "text": "2"},
                {"tag": "em_dash"},
                {"tag": "left_single_quote"},
                {"tag": "right_single_quote"}
            ]
        }));
        assert_eq!(html, "\u{201C}Wait\u{2026}\u{201D}\n1\u{2013}2\u{2014}\u{2018}\u{2019}");
    }

    #[test]
    fn test_unhandled_tag_does_not_stop_siblings() {
        let html = render(json!({
            "tag": "doc",
            "children": [
                {"tag": "str", "text": "before "},
                {"tag": "emph", "children": [{"tag": "str", "text": "lost"}]},
                {"tag": "str", "text": " after"}
            ]
        }));
        assert!(html.starts_with("before <strong>error: unhandled node `emph`</strong><pre>"));
        assert!(html.contains("&quot;tag&quot;: &quot;emph&quot;"));
        assert!(html.contains("<pre>doc &gt; emph</pre>"));
        assert!(html.ends_with(" after"));
    }

    #[test]
    fn test_failure_inside_menu_stays_local() {
        let html = render(json!({
            "tag": "span",
            "attributes": {"class": "menu"},
            "children": [
                {"tag": "str", "text": "Edit"},
                {"tag": "strong"}
            ]
        }));
        assert!(html.starts_with("<span class=\"menu\">Edit<strong>error: unhandled node `strong`</strong>"));
        assert!(html.contains("<pre>span &gt; strong</pre>"));
        assert!(!html.contains("span <svg"));
        assert!(html.ends_with("</span>"));
    }

    #[test]
    fn test_menu_leaves_image_alt_alone() {
        let html = render(json!({
            "tag": "span",
            "attributes": {"class": "menu"},
            "children": [
                {"tag": "str", "text": "View > "},
                {"tag": "image", "destination": "a.png", "text": "a > b"}
            ]
        }));
        assert_eq!(
            html,
            format!(
                "<span class=\"menu\">View {SVG_CHEVRON_RIGHT} <img src=\"a.png\" alt=\"a &gt; b\"></span>"
            )
        );
    }
}
