//! Reshaping of raw sites-view rows into [`ParsedRecord`]s.
//!
//! Extraction is a fixed vendor-field → key mapping with empty-string
//! defaults. Derived fields depend on the [`RecordCategory`], which is
//! decided from the raw site code (same naming tokens as the class ladder in
//! [`crate::query`]) and the row's connection type.

use std::sync::LazyLock;

use regex::Regex;
use sitealert_core::{ParsedRecord, RawRecord};

use crate::query::{is_fixed_line_code, is_mobile_code};

static CUSTOMER_GRADE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Customer\sSupplied|BP\sEE").expect("valid grade regex"));
static CUSTOMER_SIM_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Customer\sSupplied|BP\sEE|^EE$").expect("valid sim provider regex")
});

/// DT wholesale sub-grades and the service number the DTAG portal expects.
const WHOLESALE_SERVICE_NUMBERS: [(&str, &str); 4] = [
    ("adsl sa", "000303801"),
    ("adsl sh", "000303802"),
    ("sdsl sa", "000303803"),
    ("vdsl sa", "000303804"),
];

const MISSING_DATA: &str = "Missing Data";
const SUPPLIED_BY_CUSTOMER: &str = "Customer";
const SUPPLIED_BY_HNS: &str = "HNS";

/// Which derivation rules apply to a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordCategory {
    /// Fixed-line site code on a non-GPRS connection.
    FixedLine,
    /// Mobile site code (or a fixed-line code whose connection is GPRS and
    /// whose code also carries a mobile token).
    Mobile,
    /// Neither naming matched; descriptions become `Missing Data`.
    Unknown,
}

impl RecordCategory {
    /// Categorizes a row from its raw site code and `con_u_connection_type`.
    #[must_use]
    pub fn of(raw_code: &str, conn_type: &str) -> Self {
        if is_fixed_line_code(raw_code) && !conn_type.starts_with("GPRS") {
            RecordCategory::FixedLine
        } else if is_mobile_code(raw_code) {
            RecordCategory::Mobile
        } else {
            RecordCategory::Unknown
        }
    }
}

/// Parses one sites-view row for the site queried as `raw_code`.
///
/// Never fails: absent or `null` fields become `""`, non-string JSON values
/// are rendered as JSON text, and rows that fit no category get
/// `"Missing Data"` descriptions.
#[must_use]
pub fn parse_record(raw_code: &str, row: &RawRecord) -> ParsedRecord {
    let mut record = extract_fields(row);

    let category = RecordCategory::of(raw_code, &record.conn_type);
    tracing::debug!(site_code = raw_code, ?category, "categorized site record");

    match category {
        RecordCategory::FixedLine => derive_fixed_line(raw_code, &mut record),
        RecordCategory::Mobile => derive_mobile(raw_code, &mut record),
        RecordCategory::Unknown => {
            record.service_desc = MISSING_DATA.to_owned();
            record.supplied_by = MISSING_DATA.to_owned();
        }
    }

    record.contact = format!(
        "Name: {}\nNumber: {}",
        record.contact_name, record.contact_number
    );

    record
}

fn extract_fields(row: &RawRecord) -> ParsedRecord {
    let field = |name: &str| -> String {
        match row.get(name) {
            None | Some(serde_json::Value::Null) => String::new(),
            Some(serde_json::Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        }
    };

    ParsedRecord {
        areacode: field("prem_u_area"),
        postcode: field("prem_u_postcode"),
        imei: field("hns_u_sim_imei_number"),
        sim_provider: field("hns_u_sim_provider"),
        grade: field("hns_u_grade_of_service"),
        contract: field("hns_u_contract_number"),
        contact_name: field("prem_u_contact_name"),
        contact_number: field("prem_u_contact_number"),
        circuit_id: field("hns_u_circuit_id"),
        line_number: field("hns_u_line_number"),
        conn_type: field("con_u_connection_type"),
        conn_status: field("hns_u_state"),
        snow_sitecode: field("hns_u_site_code"),
        provider: field("hns_u_service_provider"),
        ..ParsedRecord::default()
    }
}

fn derive_fixed_line(raw_code: &str, record: &mut ParsedRecord) {
    let upper_code = raw_code.to_uppercase();
    let circuit_label = if upper_code.contains("UK") || upper_code.contains("CMD") {
        "BBEU"
    } else {
        "Circuit ID"
    };

    let mut desc = format!(
        "Line No: {}\n{circuit_label}: {}\nContract No: {}\nGrade of Service: {}",
        record.line_number, record.circuit_id, record.contract, record.grade
    );

    // DTAG wholesale lines are only ordered for non-UK estates.
    if circuit_label == "Circuit ID" {
        if let Some(number) = wholesale_service_number(&record.grade) {
            desc.push_str("\nLeistungsnummer: ");
            desc.push_str(number);
        }
    }

    record.service_desc = desc;
    strip_decimal_artifact(&mut record.postcode);
    record.supplied_by = supplied_by(CUSTOMER_GRADE_RE.is_match(&record.grade));
}

fn derive_mobile(raw_code: &str, record: &mut ParsedRecord) {
    // Only German sites get the postcode cleanup on this path.
    if raw_code.to_uppercase().contains("DE") {
        strip_decimal_artifact(&mut record.postcode);
    }

    record.service_desc = format!(
        "SIM Provider: {}\nIMEI: {}",
        record.sim_provider, record.imei
    );
    record.supplied_by = supplied_by(CUSTOMER_SIM_RE.is_match(&record.sim_provider));
}

/// Service number for a `DT - Wholesale` grade, matched case-insensitively.
fn wholesale_service_number(grade: &str) -> Option<&'static str> {
    let lower = grade.to_lowercase();
    if !lower.contains("dt - wholesale") {
        return None;
    }
    WHOLESALE_SERVICE_NUMBERS
        .iter()
        .find(|(token, _)| lower.contains(token))
        .map(|(_, number)| *number)
}

/// Postcodes that passed through a spreadsheet come back as `"12345.0"`.
fn strip_decimal_artifact(postcode: &mut String) {
    if postcode.ends_with(".0") {
        postcode.truncate(postcode.len() - 2);
    }
}

fn supplied_by(customer: bool) -> String {
    if customer {
        SUPPLIED_BY_CUSTOMER.to_owned()
    } else {
        SUPPLIED_BY_HNS.to_owned()
    }
}

#[cfg(test)]
#[path = "parse_test.rs"]
mod tests;
