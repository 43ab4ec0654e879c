//! Site record shapes shared by the fetch, parse and delivery stages.

use serde::{Deserialize, Serialize};

/// One row exactly as returned by the Service Now table API: vendor field
/// name to display value.
pub type RawRecord = serde_json::Map<String, serde_json::Value>;

/// A site record reshaped into business fields.
///
/// Every field is always present; fields absent from the vendor row, or
/// derivations whose rule did not fire, hold an empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedRecord {
    pub areacode: String,
    pub postcode: String,
    pub imei: String,
    pub sim_provider: String,
    pub grade: String,
    pub contract: String,
    pub contact_name: String,
    pub contact_number: String,
    pub circuit_id: String,
    pub line_number: String,
    pub conn_type: String,
    pub conn_status: String,
    pub snow_sitecode: String,
    pub provider: String,
    pub service_desc: String,
    pub supplied_by: String,
    pub contact: String,
}

impl ParsedRecord {
    /// Column keys in table order: the 14 extracted fields followed by the
    /// three derived ones.
    pub const KEYS: [&'static str; 17] = [
        "areacode",
        "postcode",
        "imei",
        "sim_provider",
        "grade",
        "contract",
        "contact_name",
        "contact_number",
        "circuit_id",
        "line_number",
        "conn_type",
        "conn_status",
        "snow_sitecode",
        "provider",
        "service_desc",
        "supplied_by",
        "contact",
    ];

    /// Field values in [`Self::KEYS`] order.
    #[must_use]
    pub fn values(&self) -> [&str; 17] {
        [
            &self.areacode,
            &self.postcode,
            &self.imei,
            &self.sim_provider,
            &self.grade,
            &self.contract,
            &self.contact_name,
            &self.contact_number,
            &self.circuit_id,
            &self.line_number,
            &self.conn_type,
            &self.conn_status,
            &self.snow_sitecode,
            &self.provider,
            &self.service_desc,
            &self.supplied_by,
            &self.contact,
        ]
    }

    /// Looks up a field by its column key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        Self::KEYS
            .iter()
            .position(|k| *k == key)
            .map(|idx| self.values()[idx])
    }
}
