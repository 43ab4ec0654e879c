//! Service Now table API request and response shapes.
//!
//! ## Response envelope
//!
//! `GET /api/now/table/{table}` returns `{"result": [ {...}, ... ]}`. With
//! `sysparm_display_value=true` every projected field is a display string;
//! fields the row has no value for come back as `""` or are omitted.
//!
//! ## Paging
//!
//! When `sysparm_suppress_pagination_header=false` the response carries an
//! `X-Total-Count` header with the number of rows matching the filter across
//! all pages.

use serde::Deserialize;
use sitealert_core::RawRecord;

/// Fields projected via `sysparm_fields`, in request order.
pub const REQUEST_FIELDS: [&str; 18] = [
    "prem_u_area",
    "prem_u_postcode",
    "hns_u_sim_imei_number",
    "hns_u_sim_provider",
    "hns_u_grade_of_service",
    "hns_u_contract_number",
    "prem_u_contact_name",
    "prem_u_contact_number",
    "hns_u_line_number",
    "hnsd_u_circuit_id",
    "hnsd_u_state",
    "hns_u_state",
    "con_u_connection_type",
    "hns_sys_class_name",
    "hns_u_circuit_id",
    "hns_u_site_code",
    "hns_u_service_provider",
    "hns_sys_id",
];

/// Response header carrying the total row count across all pages.
pub const TOTAL_COUNT_HEADER: &str = "X-Total-Count";

/// One page request against the sites view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnowQuery {
    /// Full `sysparm_query` filter.
    pub filter: String,
    pub offset: u32,
    pub limit: u32,
    /// Ask the server for `X-Total-Count`.
    pub paginate: bool,
}

impl SnowQuery {
    /// Query-string pairs for this request, in a stable order.
    #[must_use]
    pub fn params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("sysparm_query", self.filter.clone()),
            ("sysparm_display_value", "true".to_owned()),
            ("sysparm_exclude_reference_link", "true".to_owned()),
            (
                "sysparm_suppress_pagination_header",
                (!self.paginate).to_string(),
            ),
            ("sysparm_fields", REQUEST_FIELDS.join(",")),
            ("sysparm_offset", self.offset.to_string()),
            ("sysparm_limit", self.limit.to_string()),
        ]
    }
}

/// Top-level body of a table API response.
#[derive(Debug, Deserialize)]
pub struct SnowResponse {
    #[serde(default)]
    pub result: Vec<RawRecord>,
}

/// One page of rows plus the server-reported total, if it sent one.
#[derive(Debug, Clone, Default)]
pub struct SnowPage {
    pub rows: Vec<RawRecord>,
    pub total_count: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(paginate: bool) -> SnowQuery {
        SnowQuery {
            filter: "hns_u_sitecode=FR1^hns_sys_class_nameLIKEVSAT".to_owned(),
            offset: 20,
            limit: 10,
            paginate,
        }
    }

    fn param<'a>(params: &'a [(&'static str, String)], key: &str) -> &'a str {
        params
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
            .unwrap_or_else(|| panic!("missing param {key}"))
    }

    #[test]
    fn params_carry_filter_and_window() {
        let params = query(false).params();
        assert_eq!(
            param(&params, "sysparm_query"),
            "hns_u_sitecode=FR1^hns_sys_class_nameLIKEVSAT"
        );
        assert_eq!(param(&params, "sysparm_offset"), "20");
        assert_eq!(param(&params, "sysparm_limit"), "10");
        assert_eq!(param(&params, "sysparm_display_value"), "true");
        assert_eq!(param(&params, "sysparm_exclude_reference_link"), "true");
    }

    #[test]
    fn pagination_header_suppressed_unless_paginating() {
        assert_eq!(
            param(&query(false).params(), "sysparm_suppress_pagination_header"),
            "true"
        );
        assert_eq!(
            param(&query(true).params(), "sysparm_suppress_pagination_header"),
            "false"
        );
    }

    #[test]
    fn fields_param_lists_all_projected_fields() {
        let params = query(false).params();
        let fields: Vec<&str> = param(&params, "sysparm_fields").split(',').collect();
        assert_eq!(fields.len(), 18);
        assert_eq!(fields[0], "prem_u_area");
        assert_eq!(fields[17], "hns_sys_id");
    }

    #[test]
    fn response_without_result_is_empty() {
        let response: SnowResponse = serde_json::from_str("{}").unwrap();
        assert!(response.result.is_empty());
    }
}
