//! `sysparm_query` construction for the sites view.
//!
//! A filter is two clauses joined by `^` (Service Now's AND):
//!
//! - the **identity** clause selects the site(s), using the canonical code
//!   from [`normalize_site_code`];
//! - the **class** clause selects which device/service classes to include.
//!
//! Each clause comes from its own ordered rule ladder evaluated against the
//! *raw* site code. The ladders are independent: a code can hit the `wruk`
//! identity rule and still fall through to the satellite class rule.
//! New naming conventions are added by inserting a rule, not by adding
//! branches.

use std::sync::LazyLock;

use regex::Regex;

use crate::normalize::normalize_site_code;

/// Service Now's AND operator between filter clauses.
pub const CLAUSE_SEPARATOR: &str = "^";

static FORTIGATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"bpuk.*FGT").expect("valid fortigate regex"));
static REGIONAL_DSL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:SLCZ|SHPL|SLHU|SLSK).*DSL").expect("valid regional dsl regex")
});
static FIXED_LINE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"DSL|RTR|WAN|CMD|SWT|btavs").expect("valid fixed-line regex"));
static MOBILE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"MGMT|\dG|CMG|LTE").expect("valid mobile regex"));

// ---------------------------------------------------------------------------
// Identity ladder
// ---------------------------------------------------------------------------

/// One rung of the identity ladder: a predicate on the raw code and the
/// clause it produces for the canonical code.
struct IdentityRule {
    name: &'static str,
    applies: fn(&str) -> bool,
    clause: fn(&str) -> String,
}

static IDENTITY_RULES: [IdentityRule; 5] = [
    IdentityRule {
        name: "fortigate",
        applies: is_fortigate_code,
        clause: fortigate_clause,
    },
    IdentityRule {
        name: "regional-dsl",
        applies: is_regional_dsl_code,
        clause: regional_dsl_clause,
    },
    IdentityRule {
        name: "management",
        applies: is_management_code,
        clause: management_clause,
    },
    IdentityRule {
        name: "wruk",
        applies: is_wruk_code,
        clause: wruk_clause,
    },
    IdentityRule {
        name: "exact",
        applies: always,
        clause: exact_clause,
    },
];

fn is_fortigate_code(raw: &str) -> bool {
    FORTIGATE_RE.is_match(raw)
}

fn is_regional_dsl_code(raw: &str) -> bool {
    REGIONAL_DSL_RE.is_match(raw)
}

fn is_management_code(raw: &str) -> bool {
    raw.contains("MGMT")
}

fn is_wruk_code(raw: &str) -> bool {
    raw.contains("wruk")
}

fn always(_raw: &str) -> bool {
    true
}

fn fortigate_clause(code: &str) -> String {
    format!(
        "hns_u_sitecodeLIKE{code}\
         ^hns_u_grade_of_serviceLIKEBT\
         ^ORhns_u_grade_of_serviceLIKECustomer\
         ^ORhns_u_grade_of_serviceLIKEFTTC\
         ^ORhns_u_grade_of_serviceLIKEADS"
    )
}

fn regional_dsl_clause(code: &str) -> String {
    format!(
        "hns_u_sitecodeLIKE{code}\
         ^hns_sys_class_nameLIKEDSL\
         ^ORhns_sys_class_nameLIKEMWAVE\
         ^hns_u_stateLIKELive\
         ^hns_u_circuit_idISNOTEMPTY"
    )
}

fn management_clause(code: &str) -> String {
    format!("hns_u_sitecodeLIKE{code}^hns_u_stateLIKELive^hns_u_sim_imei_numberISNOTEMPTY")
}

fn wruk_clause(code: &str) -> String {
    format!("hns_u_sitecodeLIKE{code}^hns_sys_class_nameLIKEDSL^ORhns_sys_class_nameLIKEVPN")
}

fn exact_clause(code: &str) -> String {
    format!("hns_u_sitecode={code}")
}

/// Builds the identity clause for `raw`, substituting its canonical code.
#[must_use]
pub fn identity_clause(raw: &str) -> String {
    let canonical = normalize_site_code(raw);
    // The last rule always applies, so the fallback is never reached.
    let rule = IDENTITY_RULES
        .iter()
        .find(|rule| (rule.applies)(raw))
        .unwrap_or(&IDENTITY_RULES[IDENTITY_RULES.len() - 1]);
    tracing::debug!(
        site_code = raw,
        canonical = %canonical,
        rule = rule.name,
        "identity rule selected"
    );
    (rule.clause)(&canonical)
}

// ---------------------------------------------------------------------------
// Class ladder
// ---------------------------------------------------------------------------

/// Device/service class family implied by a raw site code's naming.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SiteClass {
    /// DSL, microwave, PSTN or customer-supplied lines.
    FixedLine,
    /// GPRS / cellular management links.
    Mobile,
    /// Everything else is treated as a VSAT terminal.
    Satellite,
}

static CLASS_RULES: [(fn(&str) -> bool, SiteClass); 3] = [
    (is_fixed_line_code, SiteClass::FixedLine),
    (is_mobile_code, SiteClass::Mobile),
    (always, SiteClass::Satellite),
];

impl SiteClass {
    /// Walks the class ladder for a raw site code.
    #[must_use]
    pub fn of(raw: &str) -> Self {
        CLASS_RULES
            .iter()
            .find(|(applies, _)| applies(raw))
            .map_or(SiteClass::Satellite, |(_, class)| *class)
    }

    /// The class clause for this family, without a leading separator.
    #[must_use]
    pub fn clause(self) -> &'static str {
        match self {
            SiteClass::FixedLine => {
                "hns_sys_class_nameLIKEDSL\
                 ^ORhns_sys_class_nameLIKEMWAVE\
                 ^ORhns_sys_class_nameLIKEPSTN\
                 ^ORhns_sys_class_nameLIKECustomer"
            }
            SiteClass::Mobile => {
                "hns_sys_class_nameLIKEGPRS\
                 ^ORhnsd_u_hybrid_technologyLIKEGPRS\
                 ^hns_u_sim_imei_numberISNOTEMPTY\
                 ^hns_u_stateLIKELive"
            }
            SiteClass::Satellite => "hns_sys_class_nameLIKEVSAT",
        }
    }
}

/// Fixed-line naming: contains `DSL`, `RTR`, `WAN`, `CMD`, `SWT` or `btavs`,
/// or starts with `EL`.
#[must_use]
pub fn is_fixed_line_code(raw: &str) -> bool {
    FIXED_LINE_RE.is_match(raw) || raw.starts_with("EL")
}

/// Mobile naming: contains `MGMT`, a digit followed by `G` (`3G`, `4G`),
/// `CMG` or `LTE`.
#[must_use]
pub fn is_mobile_code(raw: &str) -> bool {
    MOBILE_RE.is_match(raw)
}

// ---------------------------------------------------------------------------
// Full filter
// ---------------------------------------------------------------------------

/// Builds the complete `sysparm_query` filter for a raw site code.
///
/// Pure and deterministic; every input yields a filter because both ladders
/// end in a catch-all rule.
#[must_use]
pub fn build_query(raw: &str) -> String {
    let identity = identity_clause(raw);
    let class = SiteClass::of(raw);
    tracing::debug!(site_code = raw, ?class, "class rule selected");
    format!("{identity}{CLAUSE_SEPARATOR}{}", class.clause())
}

#[cfg(test)]
#[path = "query_test.rs"]
mod tests;
