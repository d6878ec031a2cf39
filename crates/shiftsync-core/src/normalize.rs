//! ERP row normalization: raw schedule rows to canonical candidates.
//!
//! The ERP feed is duck-typed and inconsistent, so rows come in through a
//! narrow adapter struct with explicit optional fields, then pass an ordered
//! list of acceptance rules. A row failing any rule is dropped with a
//! recorded reason and the pass continues; a bad row never aborts the batch.
//!
//! # Acceptance rules, in order
//!
//! 1. The row's workday code must equal the requested date exactly.
//! 2. The row's shift code must match the requested shift. General is the
//!    exception: the feed tags General rows inconsistently, so a mismatch
//!    there is a warning and the row is still accepted.
//! 3. The work order (route card number) must be non-empty.
//! 4. The work-center code must resolve to a device in the directory.
//! 5. Remaining fields are coerced: numbers default to 0, strings to empty.

use serde::Deserialize;
use serde_json::Value;
use std::fmt;
use tracing::{debug, warn};

use crate::model::assignment::CanonicalAssignment;
use crate::model::device::DeviceIndex;
use crate::shift::Shift;

/// One raw row from the ERP schedule feed.
///
/// Field names mirror the feed. Everything is optional; the defaulting rules
/// live in the accessors, not in downstream code. The three operator-name
/// spellings are kept as separate fields because the feed uses all of them;
/// the first one present wins.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawScheduleRow {
    #[serde(rename = "WorkdayCode", default)]
    pub workday_code: Option<String>,
    #[serde(rename = "ShiftCode", default)]
    pub shift_code: Option<String>,
    #[serde(rename = "RouteCardNbr", default)]
    pub route_card_nbr: Option<String>,
    #[serde(rename = "ProcessID", default)]
    pub process_id: Option<Value>,
    #[serde(rename = "OperatorCode", default)]
    pub operator_code: Option<Value>,
    #[serde(rename = "OperatorName", default)]
    pub operator_name: Option<String>,
    #[serde(rename = "Operator", default)]
    pub operator: Option<String>,
    #[serde(rename = "Name", default)]
    pub name: Option<String>,
    #[serde(rename = "ItemCode", default)]
    pub item_code: Option<String>,
    #[serde(rename = "QtyPlanned", default)]
    pub qty_planned: Option<Value>,
    #[serde(rename = "WorkCenterCode", default)]
    pub work_center_code: Option<String>,
}

impl RawScheduleRow {
    /// First present of `OperatorName`, `Operator`, `Name`; empty otherwise.
    #[must_use]
    pub fn resolved_operator_name(&self) -> String {
        self.operator_name
            .as_deref()
            .or(self.operator.as_deref())
            .or(self.name.as_deref())
            .unwrap_or_default()
            .to_string()
    }
}

/// Why a schedule row was rejected.
///
/// Not an error: rejection drops the row and normalization continues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RejectReason {
    /// Workday code differs from the requested date.
    WrongWorkday,
    /// Shift code differs from the requested shift (non-General only).
    WrongShift,
    /// Route card number is missing or empty.
    MissingWorkOrder,
    /// Work-center code matches no device in the directory.
    UnknownWorkCenter,
}

impl RejectReason {
    /// Short machine-readable label for diagnostics.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::WrongWorkday => "wrong-workday",
            Self::WrongShift => "wrong-shift",
            Self::MissingWorkOrder => "missing-work-order",
            Self::UnknownWorkCenter => "unknown-work-center",
        }
    }
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl serde::Serialize for RejectReason {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// One rejected row, for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RejectedRow {
    /// Zero-based index of the row in the fetched batch.
    pub index: usize,
    pub reason: RejectReason,
    /// Route card number if the row had one, for operator-readable logs.
    pub work_order: String,
}

/// Outcome of a normalization pass over one fetched schedule.
#[derive(Debug, Clone, Default)]
pub struct NormalizeReport {
    /// Accepted candidates, in feed order.
    pub accepted: Vec<CanonicalAssignment>,
    /// Rejected rows with reasons, in feed order.
    pub rejected: Vec<RejectedRow>,
}

/// Normalize one raw row against the requested date and shift.
pub fn normalize_row(
    row: &RawScheduleRow,
    requested_date: &str,
    requested_shift: Shift,
    devices: &DeviceIndex,
) -> Result<CanonicalAssignment, RejectReason> {
    let workday = row.workday_code.as_deref().unwrap_or_default();
    if workday != requested_date {
        return Err(RejectReason::WrongWorkday);
    }

    let shift_code = row.shift_code.as_deref().unwrap_or_default();
    if shift_code != requested_shift.code() {
        if requested_shift == Shift::General {
            // The feed tags General inconsistently; accept with a warning.
            warn!(
                shift_code,
                work_order = row.route_card_nbr.as_deref().unwrap_or_default(),
                "general-shift row with mismatched shift code accepted"
            );
        } else {
            return Err(RejectReason::WrongShift);
        }
    }

    let work_order = row
        .route_card_nbr
        .as_deref()
        .map(str::trim)
        .unwrap_or_default();
    if work_order.is_empty() {
        return Err(RejectReason::MissingWorkOrder);
    }

    let work_center_code = row.work_center_code.as_deref().unwrap_or_default();
    let Some(device) = devices.resolve(work_center_code) else {
        return Err(RejectReason::UnknownWorkCenter);
    };

    Ok(CanonicalAssignment {
        work_order: work_order.to_string(),
        process_id: coerce_string(row.process_id.as_ref()),
        operator_code: coerce_string(row.operator_code.as_ref()),
        operator_name: row.resolved_operator_name(),
        part_number: row.item_code.clone().unwrap_or_default(),
        planned_quantity: coerce_number(row.qty_planned.as_ref()),
        work_center_code: work_center_code.to_string(),
        device_id: device.id.clone(),
        shift: requested_shift,
        workday_code: workday.to_string(),
    })
}

/// Normalize a fetched batch, collecting accepted candidates and rejection
/// diagnostics. Rejections are logged and never abort the pass.
#[must_use]
pub fn normalize_rows(
    rows: &[RawScheduleRow],
    requested_date: &str,
    requested_shift: Shift,
    devices: &DeviceIndex,
) -> NormalizeReport {
    let mut report = NormalizeReport::default();

    for (index, row) in rows.iter().enumerate() {
        match normalize_row(row, requested_date, requested_shift, devices) {
            Ok(candidate) => report.accepted.push(candidate),
            Err(reason) => {
                let work_order = row
                    .route_card_nbr
                    .as_deref()
                    .unwrap_or_default()
                    .to_string();
                debug!(index, %reason, work_order, "schedule row rejected");
                report.rejected.push(RejectedRow {
                    index,
                    reason,
                    work_order,
                });
            }
        }
    }

    report
}

/// Coerce a duck-typed feed value to a string; missing or odd shapes become
/// empty.
fn coerce_string(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

/// Coerce a duck-typed feed value to a number; unparseable values become 0.
fn coerce_number(value: Option<&Value>) -> f64 {
    match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::{RawScheduleRow, RejectReason, normalize_row, normalize_rows};
    use crate::model::device::{Device, DeviceIndex};
    use crate::shift::Shift;
    use serde_json::json;

    fn directory() -> DeviceIndex {
        DeviceIndex::new(&[Device {
            id: "dev-1".to_string(),
            device_name: "Press 1".to_string(),
            foreign_id: "WC-9".to_string(),
        }])
    }

    fn row() -> RawScheduleRow {
        serde_json::from_value(json!({
            "WorkdayCode": "2026-01-17",
            "ShiftCode": "D",
            "RouteCardNbr": "WO-55",
            "ProcessID": 20,
            "OperatorCode": "OP-7",
            "OperatorName": "A. Kumar",
            "ItemCode": "P-100",
            "QtyPlanned": 150,
            "WorkCenterCode": "WC-9"
        }))
        .expect("row parses")
    }

    #[test]
    fn accepted_row_builds_the_full_candidate() {
        let candidate =
            normalize_row(&row(), "2026-01-17", Shift::Day, &directory()).expect("accepted");
        assert_eq!(candidate.work_order, "WO-55");
        assert_eq!(candidate.process_id, "20");
        assert_eq!(candidate.operator_code, "OP-7");
        assert_eq!(candidate.operator_name, "A. Kumar");
        assert_eq!(candidate.part_number, "P-100");
        assert_eq!(candidate.planned_quantity, 150.0);
        assert_eq!(candidate.device_id, "dev-1");
        assert_eq!(candidate.identity_key(), "WC-9-P-100-WO-55");
    }

    #[test]
    fn wrong_workday_is_rejected_first() {
        let mut r = row();
        r.workday_code = Some("2026-01-18".to_string());
        // Also break a later rule to prove ordering.
        r.route_card_nbr = None;
        assert_eq!(
            normalize_row(&r, "2026-01-17", Shift::Day, &directory()),
            Err(RejectReason::WrongWorkday)
        );
    }

    #[test]
    fn shift_mismatch_rejects_day_and_night() {
        let mut r = row();
        r.shift_code = Some("E".to_string());
        assert_eq!(
            normalize_row(&r, "2026-01-17", Shift::Day, &directory()),
            Err(RejectReason::WrongShift)
        );
        r.shift_code = Some("D".to_string());
        assert_eq!(
            normalize_row(&r, "2026-01-17", Shift::Night, &directory()),
            Err(RejectReason::WrongShift)
        );
    }

    #[test]
    fn general_shift_accepts_mismatched_codes() {
        let mut r = row();
        r.shift_code = Some("D".to_string());
        let candidate =
            normalize_row(&r, "2026-01-17", Shift::General, &directory()).expect("leniency");
        assert_eq!(candidate.shift, Shift::General);
    }

    #[test]
    fn empty_work_order_is_rejected() {
        let mut r = row();
        r.route_card_nbr = Some("   ".to_string());
        assert_eq!(
            normalize_row(&r, "2026-01-17", Shift::Day, &directory()),
            Err(RejectReason::MissingWorkOrder)
        );
    }

    #[test]
    fn unresolvable_work_center_is_rejected() {
        let mut r = row();
        r.work_center_code = Some("WC-404".to_string());
        assert_eq!(
            normalize_row(&r, "2026-01-17", Shift::Day, &directory()),
            Err(RejectReason::UnknownWorkCenter)
        );
    }

    #[test]
    fn operator_name_first_present_wins() {
        let r: RawScheduleRow = serde_json::from_value(json!({
            "Operator": "Second",
            "Name": "Third"
        }))
        .expect("row parses");
        assert_eq!(r.resolved_operator_name(), "Second");

        let r: RawScheduleRow =
            serde_json::from_value(json!({ "Name": "Third" })).expect("row parses");
        assert_eq!(r.resolved_operator_name(), "Third");

        let r = RawScheduleRow::default();
        assert_eq!(r.resolved_operator_name(), "");
    }

    #[test]
    fn quantity_coercion_tolerates_strings_and_garbage() {
        let mut r = row();
        r.qty_planned = Some(json!("175"));
        let candidate = normalize_row(&r, "2026-01-17", Shift::Day, &directory()).expect("ok");
        assert_eq!(candidate.planned_quantity, 175.0);

        r.qty_planned = Some(json!("not a number"));
        let candidate = normalize_row(&r, "2026-01-17", Shift::Day, &directory()).expect("ok");
        assert_eq!(candidate.planned_quantity, 0.0);

        r.qty_planned = None;
        let candidate = normalize_row(&r, "2026-01-17", Shift::Day, &directory()).expect("ok");
        assert_eq!(candidate.planned_quantity, 0.0);
    }

    #[test]
    fn numeric_process_and_operator_ids_become_strings() {
        let r: RawScheduleRow = serde_json::from_value(json!({
            "WorkdayCode": "2026-01-17",
            "ShiftCode": "D",
            "RouteCardNbr": "WO-1",
            "ProcessID": 30,
            "OperatorCode": 812,
            "ItemCode": "P-1",
            "WorkCenterCode": "WC-9"
        }))
        .expect("row parses");
        let candidate = normalize_row(&r, "2026-01-17", Shift::Day, &directory()).expect("ok");
        assert_eq!(candidate.process_id, "30");
        assert_eq!(candidate.operator_code, "812");
    }

    #[test]
    fn batch_pass_collects_rejections_without_aborting() {
        let mut bad_day = row();
        bad_day.workday_code = Some("2026-01-01".to_string());
        let mut bad_center = row();
        bad_center.work_center_code = Some("WC-404".to_string());

        let report = normalize_rows(
            &[row(), bad_day, bad_center, row()],
            "2026-01-17",
            Shift::Day,
            &directory(),
        );
        assert_eq!(report.accepted.len(), 2);
        assert_eq!(report.rejected.len(), 2);
        assert_eq!(report.rejected[0].index, 1);
        assert_eq!(report.rejected[0].reason, RejectReason::WrongWorkday);
        assert_eq!(report.rejected[1].index, 2);
        assert_eq!(report.rejected[1].reason, RejectReason::UnknownWorkCenter);
    }
}
