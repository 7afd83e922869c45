use std::fmt::Write as _;

use crate::render::transition::Scene;

const FONT_FAMILY: &str = "sans-serif";
const LABEL_FONT_SIZE: f64 = 12.0;

/// Serialize one frame as a standalone SVG document.
pub fn render_scene(scene: &Scene) -> String {
    let mut svg = String::with_capacity(4096);
    let (w, h) = (scene.width, scene.height);

    // `write!` into a String cannot fail.
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#
    );
    let _ = writeln!(svg, r#"<rect width="{w}" height="{h}" fill="white"/>"#);

    let _ = writeln!(svg, r#"<g fill-opacity="0.6">"#);
    for bar in &scene.bars {
        let _ = writeln!(
            svg,
            r#"<rect fill="{}" x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}"/>"#,
            bar.colour, bar.x, bar.y, bar.width, bar.height
        );
    }
    let _ = writeln!(svg, "</g>");

    let _ = writeln!(
        svg,
        r#"<g transform="translate(0,{})" font-family="{FONT_FAMILY}" font-size="10" text-anchor="middle">"#,
        scene.axis_y
    );
    for (i, tick) in scene.ticks.iter().enumerate() {
        let stroke = if i == 0 { "currentColor" } else { "white" };
        let _ = writeln!(
            svg,
            r#"<line x1="{x:.2}" x2="{x:.2}" y1="0" y2="{:.2}" stroke="{stroke}"/>"#,
            scene.tick_height,
            x = tick.x
        );
        if let Some(label) = &tick.label {
            let _ = writeln!(
                svg,
                r#"<text x="{:.2}" y="-3">{}</text>"#,
                tick.x,
                escape_text(label)
            );
        }
    }
    let _ = writeln!(svg, "</g>");

    let _ = writeln!(
        svg,
        r#"<g font-family="{FONT_FAMILY}" font-size="{LABEL_FONT_SIZE}" font-weight="bold" text-anchor="end">"#
    );
    for bar in &scene.bars {
        let label_x = bar.x + bar.width - 6.0;
        let _ = writeln!(
            svg,
            r#"<text x="{label_x:.2}" y="{:.2}">{}<tspan x="{label_x:.2}" dy="1.15em" font-weight="normal" fill-opacity="0.7">{}</tspan></text>"#,
            bar.y + bar.height / 2.0 - 3.0,
            escape_text(&bar.name),
            escape_text(&bar.value_label)
        );
    }
    let _ = writeln!(svg, "</g>");

    let _ = writeln!(
        svg,
        r#"<text x="{:.2}" y="{:.2}" dy="0.32em" font-family="{FONT_FAMILY}" font-size="{}" font-weight="bold" text-anchor="end">{}</text>"#,
        w - 6.0,
        scene.ticker_y,
        scene.ticker_size,
        escape_text(&scene.ticker)
    );

    svg.push_str("</svg>\n");
    svg
}

fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}
