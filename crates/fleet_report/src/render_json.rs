//! Report JSON renderer: summary → vehicles → integrity.
//!
//! Built through `serde_json::Map` with the `preserve_order` feature, so the
//! output keeps insertion order rather than sorting keys.

use serde_json::{Map as JsonMap, Value};

use crate::structure::{IntegrityBlock, ReportModel, Summary, VehicleSection};
use crate::ReportError;

pub fn render_report_json(m: &ReportModel) -> Value {
    let mut root = JsonMap::new();
    root.insert("summary".into(), summary_json(&m.summary));
    root.insert("vehicles".into(), Value::Array(m.vehicles.iter().map(vehicle_json).collect()));
    if let Some(i) = &m.integrity {
        root.insert("integrity".into(), integrity_json(i));
    }
    Value::Object(root)
}

/// Pretty-printed JSON text of the report.
pub fn render_json(m: &ReportModel) -> Result<String, ReportError> {
    serde_json::to_string_pretty(&render_report_json(m)).map_err(|e| ReportError::Serialize(e.to_string()))
}

fn summary_json(s: &Summary) -> Value {
    let mut o = JsonMap::new();
    if let Some(route) = &s.route {
        o.insert("route".into(), Value::String(route.clone()));
    }
    o.insert("vehicles_processed".into(), s.vehicles_processed.into());
    o.insert("total_allocated".into(), s.total_allocated.into());
    o.insert("unallocated_passengers".into(), s.unallocated_passengers.into());
    o.insert("full_vehicles".into(), s.full_vehicles.into());
    Value::Object(o)
}

fn vehicle_json(v: &VehicleSection) -> Value {
    let mut o = JsonMap::new();
    o.insert("ordinal".into(), v.ordinal.into());
    o.insert("vehicle_id".into(), Value::String(v.vehicle_id.clone()));
    o.insert("plate".into(), Value::String(v.plate.clone()));
    o.insert("allocated".into(), v.allocated.into());
    o.insert("remaining_seats".into(), v.remaining_seats.into());
    o.insert("full".into(), v.full.into());
    let logs = v
        .logs
        .iter()
        .map(|l| {
            let mut e = JsonMap::new();
            e.insert("step".into(), Value::String(l.step.clone()));
            e.insert("type".into(), Value::String(l.kind.as_str().to_string()));
            e.insert("details".into(), Value::String(l.details.clone()));
            Value::Object(e)
        })
        .collect();
    o.insert("logs".into(), Value::Array(logs));
    Value::Object(o)
}

fn integrity_json(i: &IntegrityBlock) -> Value {
    let mut o = JsonMap::new();
    o.insert("result_id".into(), Value::String(i.result_id.clone()));
    o.insert("run_id".into(), Value::String(i.run_id.clone()));
    o.insert("inputs_sha256".into(), Value::String(i.inputs_sha256.clone()));
    Value::Object(o)
}
