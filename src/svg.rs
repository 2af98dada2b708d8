//! Scene export to standalone SVG.
//!
//! World coordinates have their origin bottom-left; SVG's is top-left, so every
//! `y` is flipped against the scene height. Font sizes and stroke widths are in
//! points and are converted assuming the scene spans a 6 inch tall figure.

use crate::scene::{Primitive, Scene};
use std::fmt::Write as _;

pub const DEFAULT_WIDTH_PX: u32 = 1400;
pub const DEFAULT_HEIGHT_PX: u32 = 600;

const FIGURE_HEIGHT_PT: f64 = 6.0 * 72.0;

pub fn scene_to_svg(scene: &Scene, width_px: u32, height_px: u32) -> String {
    let h = scene.height;
    let pt = h / FIGURE_HEIGHT_PT;

    let mut out = String::with_capacity(256 + scene.shapes.len() * 96);
    // Writing into a String cannot fail.
    let _ = writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}" preserveAspectRatio="none">"#,
        width_px,
        height_px,
        num(scene.width),
        num(h)
    );
    let _ = writeln!(
        out,
        r#"  <rect x="0" y="0" width="{}" height="{}" fill="{}"/>"#,
        num(scene.width),
        num(h),
        scene.background.to_hex()
    );

    for shape in &scene.shapes {
        match &shape.primitive {
            Primitive::Rect { x, y, w, h: rh, fill } => {
                let _ = writeln!(
                    out,
                    r#"  <rect x="{}" y="{}" width="{}" height="{}" fill="{}"/>"#,
                    num(*x),
                    num(h - (y + rh)),
                    num(*w),
                    num(*rh),
                    fill.to_hex()
                );
            }
            Primitive::Circle { cx, cy, r, fill } => {
                let _ = writeln!(
                    out,
                    r#"  <circle cx="{}" cy="{}" r="{}" fill="{}"/>"#,
                    num(*cx),
                    num(h - cy),
                    num(*r),
                    fill.to_hex()
                );
            }
            Primitive::Line {
                x1,
                y1,
                x2,
                y2,
                width,
                stroke,
            } => {
                let _ = writeln!(
                    out,
                    r#"  <line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}" stroke-width="{}"/>"#,
                    num(*x1),
                    num(h - y1),
                    num(*x2),
                    num(h - y2),
                    stroke.to_hex(),
                    num(width * pt)
                );
            }
            Primitive::Text {
                x,
                y,
                text,
                size,
                fill,
            } => {
                let _ = writeln!(
                    out,
                    r#"  <text x="{}" y="{}" font-size="{}" fill="{}" text-anchor="middle" dominant-baseline="central">{}</text>"#,
                    num(*x),
                    num(h - y),
                    num(size * pt),
                    fill.to_hex(),
                    escape(text)
                );
            }
        }
    }

    out.push_str("</svg>\n");
    out
}

fn num(v: f64) -> String {
    let s = format!("{:.3}", v);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
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
