//! Summary proportion chart.
//!
//! Emits a self-contained SVG donut, one slice per charge category sized by
//! shipment count, with a legend carrying label, count and percentage. No
//! external renderer; the markup is assembled directly.

use std::f64::consts::PI;
use std::fmt::Write as FmtWrite;

use shipaudit_recon::SummaryRow;

const WIDTH: u32 = 700;
const HEIGHT: u32 = 380;
const CX: f64 = 190.0;
const CY: f64 = 190.0;
const OUTER_R: f64 = 140.0;
// Hole ratio 0.4, same proportion the reports have always used.
const INNER_R: f64 = 56.0;

// correct / overcharged / undercharged
const COLORS: [&str; 3] = ["#43a047", "#e53935", "#fb8c00"];

/// Render the three-row summary as an SVG pie (donut) chart string.
pub fn render_pie_svg(summary: &[SummaryRow]) -> String {
    let total: usize = summary.iter().map(|r| r.count).sum();

    let mut svg = String::new();
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{WIDTH}" height="{HEIGHT}" viewBox="0 0 {WIDTH} {HEIGHT}">"#
    );
    let _ = writeln!(
        svg,
        r#"  <text x="{CX}" y="28" text-anchor="middle" font-family="sans-serif" font-size="18">Proportion</text>"#
    );

    if total == 0 {
        let _ = writeln!(
            svg,
            r##"  <text x="{CX}" y="{CY}" text-anchor="middle" font-family="sans-serif" font-size="14" fill="#777777">no shipments</text>"##
        );
    } else {
        // Start at 12 o'clock, sweep clockwise.
        let mut angle = -PI / 2.0;
        for (i, row) in summary.iter().enumerate() {
            if row.count == 0 {
                continue;
            }
            let color = COLORS[i % COLORS.len()];
            let sweep = row.count as f64 / total as f64 * 2.0 * PI;

            if row.count == total {
                // A full-circle arc degenerates; draw the whole ring.
                let _ = writeln!(
                    svg,
                    r#"  <circle cx="{CX}" cy="{CY}" r="{OUTER_R}" fill="{color}"/>"#
                );
                let _ = writeln!(
                    svg,
                    r##"  <circle cx="{CX}" cy="{CY}" r="{INNER_R}" fill="#ffffff"/>"##
                );
            } else {
                let _ = writeln!(
                    svg,
                    r#"  <path d="{}" fill="{color}"/>"#,
                    donut_slice(angle, angle + sweep)
                );
            }
            angle += sweep;
        }
    }

    // Legend: all three rows, zero-count buckets included.
    for (i, row) in summary.iter().enumerate() {
        let color = COLORS[i % COLORS.len()];
        let y = 120 + (i as u32) * 30;
        let pct = if total == 0 {
            0.0
        } else {
            row.count as f64 / total as f64 * 100.0
        };
        let _ = writeln!(
            svg,
            r#"  <rect x="370" y="{}" width="14" height="14" fill="{color}"/>"#,
            y - 11
        );
        let _ = writeln!(
            svg,
            r#"  <text x="392" y="{y}" font-family="sans-serif" font-size="13">{}: {} ({pct:.1}%)</text>"#,
            row.description, row.count
        );
    }

    svg.push_str("</svg>\n");
    svg
}

fn point(r: f64, angle: f64) -> (f64, f64) {
    (CX + r * angle.cos(), CY + r * angle.sin())
}

/// Donut slice path from `start` to `end` (radians, clockwise).
fn donut_slice(start: f64, end: f64) -> String {
    let large_arc = if end - start > PI { 1 } else { 0 };
    let (x0, y0) = point(OUTER_R, start);
    let (x1, y1) = point(OUTER_R, end);
    let (x2, y2) = point(INNER_R, end);
    let (x3, y3) = point(INNER_R, start);
    format!(
        "M {x0:.2} {y0:.2} A {OUTER_R} {OUTER_R} 0 {large_arc} 1 {x1:.2} {y1:.2} \
         L {x2:.2} {y2:.2} A {INNER_R} {INNER_R} 0 {large_arc} 0 {x3:.2} {y3:.2} Z"
    )
}
