//! Plain SVG for a [`SceneHost`] scene: entity boxes, property rows when expanded, and straight
//! connectors between the rows they attach to.

use std::fmt::Write as _;

use ermine_layout::Rect;

use crate::scene::{SceneConnector, SceneHost};

pub fn render_scene(scene: &SceneHost) -> String {
    let opts = scene.options();
    let mut out = String::new();

    let _ = write!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}""#,
        w = fmt(opts.width),
        h = fmt(opts.height),
    );
    if let Some(kind) = scene.kind() {
        let _ = write!(out, r#" class="ermine {kind}""#);
    }
    out.push('>');
    out.push_str(STYLE);
    out.push_str(ARROW_MARKER);

    out.push_str(r#"<g class="connectors">"#);
    for connector in scene.connectors() {
        render_connector(&mut out, scene, connector);
    }
    out.push_str("</g>");

    out.push_str(r#"<g class="entities">"#);
    for &element in scene.scene_elements() {
        let rect = scene.rect(element);
        let row = scene.row_height();
        let pad = opts.padding;

        out.push_str(r#"<g class="entity""#);
        if scene.is_draggable(element) {
            out.push_str(r#" data-draggable="true""#);
        }
        let _ = write!(
            out,
            r#" transform="translate({x},{y})"><rect class="body" width="{w}" height="{h}"/>"#,
            x = fmt(rect.x),
            y = fmt(rect.y),
            w = fmt(rect.width),
            h = fmt(rect.height),
        );
        let _ = write!(
            out,
            r#"<rect class="header" width="{w}" height="{h}"/>"#,
            w = fmt(rect.width),
            h = fmt(row),
        );
        text(&mut out, "name", pad, row / 2.0, scene.name(element));

        if !scene.is_collapsed(element) {
            for (i, p) in scene.properties(element).iter().enumerate() {
                let y = row * (i as f64 + 1.5);
                let _ = write!(
                    out,
                    r#"<text class="property" x="{x}" y="{y}" dominant-baseline="central" data-property="{name}"><tspan class="property-name">"#,
                    x = fmt(pad),
                    y = fmt(y),
                    name = escape_xml(&p.name),
                );
                escape_xml_into(&mut out, &p.name);
                out.push_str(r#"</tspan>: <tspan class="property-type">"#);
                escape_xml_into(&mut out, &p.ty);
                out.push_str("</tspan></text>");
            }
        }
        out.push_str("</g>");
    }
    out.push_str("</g></svg>");
    out
}

const STYLE: &str = "<style>\
.entity .body{fill:#fff;stroke:#333;stroke-width:1}\
.entity .header{fill:#e8eef7;stroke:#333;stroke-width:1}\
.entity text{font-family:sans-serif;font-size:14px}\
.entity .name{font-weight:bold}\
.connector{stroke:#555;stroke-width:1.5;fill:none}\
.arrowhead{fill:#555}\
</style>";

/// Arrowhead at the target end of every connector.
const ARROW_MARKER: &str = "<defs>\
<marker id=\"ermine-arrow\" viewBox=\"0 0 10 10\" refX=\"10\" refY=\"5\" markerWidth=\"8\" markerHeight=\"8\" orient=\"auto\">\
<path class=\"arrowhead\" d=\"M0,0L10,5L0,10z\"/>\
</marker>\
</defs>";

fn render_connector(out: &mut String, scene: &SceneHost, connector: &SceneConnector) {
    let from = scene.anchor_row(connector.source, &connector.source_property);
    let to = scene.anchor_row(connector.target, &connector.target_property);
    let ((x1, y1), (x2, y2)) = attach(&from, &to);
    let _ = write!(
        out,
        r#"<line class="connector" x1="{}" y1="{}" x2="{}" y2="{}" marker-end="url(#ermine-arrow)"/>"#,
        fmt(x1),
        fmt(y1),
        fmt(x2),
        fmt(y2),
    );
}

/// Leaves from the side of `from` that faces `to`. Rows that overlap horizontally (including a
/// self-loop) connect their right edges.
fn attach(from: &Rect, to: &Rect) -> ((f64, f64), (f64, f64)) {
    let y1 = from.y + from.height / 2.0;
    let y2 = to.y + to.height / 2.0;
    if from.right() <= to.x {
        ((from.right(), y1), (to.x, y2))
    } else if to.right() <= from.x {
        ((from.x, y1), (to.right(), y2))
    } else {
        ((from.right(), y1), (to.right(), y2))
    }
}

fn text(out: &mut String, class: &str, x: f64, y: f64, content: &str) {
    let _ = write!(
        out,
        r#"<text class="{class}" x="{}" y="{}" dominant-baseline="central">"#,
        fmt(x),
        fmt(y),
    );
    escape_xml_into(out, content);
    out.push_str("</text>");
}

fn fmt(v: f64) -> String {
    if !v.is_finite() {
        return "0".to_string();
    }
    let mut v = if v.abs() < 1e-9 { 0.0 } else { v };
    let nearest = v.round();
    if (v - nearest).abs() < 1e-6 {
        v = nearest;
    }
    if v == -0.0 {
        v = 0.0;
    }
    let s = format!("{v:.3}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    s.to_string()
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    escape_xml_into(&mut out, text);
    out
}

fn escape_xml_into(out: &mut String, text: &str) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
}
