// crates/fleet_report/src/render_html.rs
//
// Deterministic, offline HTML renderer. No external assets; every content
// field is HTML-escaped.

use std::fmt::Write as _;

use crate::structure::ReportModel;

fn esc(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
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

pub fn render_html(m: &ReportModel) -> String {
    let mut h = String::new();
    let s = &m.summary;

    let _ = write!(
        h,
        "<!doctype html>\n<html lang=\"en\"><head><meta charset=\"utf-8\"><title>Allocation report</title></head><body>\n"
    );
    let _ = writeln!(h, "<h1>Allocation report</h1>");
    if let Some(route) = &s.route {
        let _ = writeln!(h, "<p class=\"route\">Route {}</p>", esc(route));
    }
    let _ = writeln!(
        h,
        "<table class=\"summary\"><tr><th>Vehicles</th><td>{}</td></tr><tr><th>Allocated</th><td>{}</td></tr><tr><th>Unallocated</th><td>{}</td></tr><tr><th>Full</th><td>{}</td></tr></table>",
        s.vehicles_processed, s.total_allocated, s.unallocated_passengers, s.full_vehicles
    );

    for v in &m.vehicles {
        let _ = writeln!(
            h,
            "<section class=\"vehicle{}\"><h2>{}. {} <small>{}</small></h2>",
            if v.full { " full" } else { "" },
            v.ordinal,
            esc(&v.plate),
            esc(&v.vehicle_id)
        );
        let _ = writeln!(
            h,
            "<p>Allocated {} · remaining {}</p>",
            v.allocated, v.remaining_seats
        );
        let _ = writeln!(h, "<ol class=\"logs\">");
        for l in &v.logs {
            let _ = writeln!(
                h,
                "<li class=\"{}\"><b>{}</b> {}</li>",
                l.kind.as_str(),
                esc(&l.step),
                esc(&l.details)
            );
        }
        let _ = writeln!(h, "</ol></section>");
    }

    if let Some(i) = &m.integrity {
        let _ = writeln!(
            h,
            "<footer><code>{}</code> <code>{}</code> <code>{}</code></footer>",
            esc(&i.result_id),
            esc(&i.run_id),
            esc(&i.inputs_sha256)
        );
    }
    let _ = writeln!(h, "</body></html>");
    h
}
