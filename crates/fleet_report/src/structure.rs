//! crates/fleet_report/src/structure.rs
//! Report data model + mapper from a simulation result.
//! One section per vehicle, in processing order; numbers are copied, never derived
//! beyond sums.

use fleet_core::{LogKind, SimulationResult};

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "render_json", derive(serde::Serialize))]
pub struct ReportModel {
    pub summary: Summary,
    pub vehicles: Vec<VehicleSection>,
    pub integrity: Option<IntegrityBlock>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "render_json", derive(serde::Serialize))]
pub struct Summary {
    pub route: Option<String>,
    pub vehicles_processed: usize,
    pub total_allocated: u64,
    pub unallocated_passengers: u64,
    pub full_vehicles: usize,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "render_json", derive(serde::Serialize))]
pub struct VehicleSection {
    pub ordinal: usize,                 // 1-based processing position
    pub vehicle_id: String,
    pub plate: String,
    pub allocated: u32,
    pub remaining_seats: u32,
    pub full: bool,
    pub logs: Vec<LogLine>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "render_json", derive(serde::Serialize))]
pub struct LogLine {
    pub step: String,
    pub kind: LogKind,
    pub details: String,
}

/// Artifact ids shown in the footer when the run produced them.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "render_json", derive(serde::Serialize))]
pub struct IntegrityBlock {
    pub result_id: String,
    pub run_id: String,
    pub inputs_sha256: String,
}

/// Map a result into the report model.
pub fn build_model(result: &SimulationResult) -> ReportModel {
    let vehicles: Vec<VehicleSection> = result
        .vehicle_results
        .iter()
        .enumerate()
        .map(|(i, v)| VehicleSection {
            ordinal: i + 1,
            vehicle_id: v.vehicle_id.to_string(),
            plate: v.plate_number.clone(),
            allocated: v.allocated_passengers,
            remaining_seats: v.remaining_seats,
            full: v.is_full(),
            logs: v
                .logs
                .iter()
                .map(|l| LogLine { step: l.step.clone(), kind: l.kind, details: l.details.clone() })
                .collect(),
        })
        .collect();

    ReportModel {
        summary: Summary {
            route: None,
            vehicles_processed: vehicles.len(),
            total_allocated: result.total_allocated(),
            unallocated_passengers: result.unallocated_passengers,
            full_vehicles: vehicles.iter().filter(|v| v.full).count(),
        },
        vehicles,
        integrity: None,
    }
}

impl ReportModel {
    pub fn with_route(mut self, route: impl Into<String>) -> Self {
        self.summary.route = Some(route.into());
        self
    }

    pub fn with_integrity(mut self, integrity: IntegrityBlock) -> Self {
        self.integrity = Some(integrity);
        self
    }
}
