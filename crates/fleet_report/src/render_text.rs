//! Plain-text renderer: summary, then one block per vehicle with one
//! `[step] details` line per log entry.

use std::fmt::Write as _;

use fleet_core::LogKind;

use crate::structure::ReportModel;

fn marker(kind: LogKind) -> &'static str {
    match kind {
        LogKind::Info => " ",
        LogKind::Allocation => "+",
        LogKind::Skip => "~",
        LogKind::Full => "#",
        LogKind::Redundancy => "!",
    }
}

pub fn render_text(m: &ReportModel) -> String {
    let mut out = String::new();
    let s = &m.summary;

    // `write!` into a String cannot fail.
    let _ = writeln!(out, "Allocation report");
    if let Some(route) = &s.route {
        let _ = writeln!(out, "route: {route}");
    }
    let _ = writeln!(
        out,
        "vehicles: {}  allocated: {}  unallocated: {}  full: {}",
        s.vehicles_processed, s.total_allocated, s.unallocated_passengers, s.full_vehicles
    );

    for v in &m.vehicles {
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "#{} {} ({})  allocated {}  remaining {}{}",
            v.ordinal,
            v.plate,
            v.vehicle_id,
            v.allocated,
            v.remaining_seats,
            if v.full { "  FULL" } else { "" }
        );
        for l in &v.logs {
            let _ = writeln!(out, "  {} [{}] {}", marker(l.kind), l.step, l.details);
        }
    }

    if let Some(i) = &m.integrity {
        let _ = writeln!(out);
        let _ = writeln!(out, "result: {}", i.result_id);
        let _ = writeln!(out, "run:    {}", i.run_id);
        let _ = writeln!(out, "inputs: {}", i.inputs_sha256);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structure::{build_model, fixtures, IntegrityBlock};

    #[test]
    fn renders_headers_and_log_lines() {
        let text = render_text(&build_model(&fixtures::result()).with_route("r1"));
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Allocation report");
        assert_eq!(lines[1], "route: r1");
        assert_eq!(lines[2], "vehicles: 2  allocated: 5  unallocated: 3  full: 1");
        assert!(text.contains("#1 京A-1<2> (VH-1)  allocated 4  remaining 0  FULL\n"));
        assert!(text.contains("  + [allocation] accepted 4 passenger(s) [a->b]; remaining seats 0\n"));
        assert!(text.contains("  # [status] vehicle fully loaded\n"));
        assert!(text.contains("#2 P-2 (VH-2)  allocated 1  remaining 9\n"));
    }

    #[test]
    fn footer_only_with_integrity() {
        let m = build_model(&fixtures::result());
        assert!(!render_text(&m).contains("result:"));
        let m = m.with_integrity(IntegrityBlock {
            result_id: "RES:ab".into(),
            run_id: "RUN:x".into(),
            inputs_sha256: "cd".into(),
        });
        assert!(render_text(&m).ends_with("inputs: cd\n"));
    }
}
