use super::*;

#[test]
fn truncates_at_first_underscore() {
    assert_eq!(normalize_site_code("ABC123_DSL_Remote"), "ABC123");
}

#[test]
fn code_without_underscore_is_kept_whole() {
    assert_eq!(normalize_site_code("ABC123"), "ABC123");
}

#[test]
fn shpl_codes_lose_every_d() {
    assert_eq!(normalize_site_code("SHPLD01_EXT"), "SHPL01");
}

#[test]
fn shpl_d_removal_is_not_limited_to_a_suffix() {
    // Known over-broad behaviour: interior D characters go too.
    assert_eq!(normalize_site_code("SHPLDDE0D4"), "SHPLE04");
}

#[test]
fn shpl_rule_only_sees_the_truncated_code() {
    // SHPL after the underscore does not trigger D removal.
    assert_eq!(normalize_site_code("DE01_SHPL"), "DE01");
}

#[test]
fn non_shpl_codes_keep_d() {
    assert_eq!(normalize_site_code("DEBER01"), "DEBER01");
}

#[test]
fn strips_fortigate_suffix() {
    assert_eq!(normalize_site_code("bpuk12924-FGT_DSL_Remote"), "bpuk12924");
}

#[test]
fn strips_ads_suffix() {
    assert_eq!(normalize_site_code("bpuk100-ADS"), "bpuk100");
}

#[test]
fn strips_router_and_switch_suffixes() {
    assert_eq!(normalize_site_code("SITE9-CO-RTR"), "SITE9");
    assert_eq!(normalize_site_code("SITE9-CO-SWT"), "SITE9");
    assert_eq!(normalize_site_code("SITE9-DO-RTR"), "SITE9");
    assert_eq!(normalize_site_code("SITE9-DO-SWT"), "SITE9");
}

#[test]
fn strips_dash_one_anywhere() {
    assert_eq!(normalize_site_code("wruk001-1_SEC"), "wruk001");
    assert_eq!(normalize_site_code("SITE-12"), "SITE2");
}

#[test]
fn removes_every_occurrence() {
    assert_eq!(normalize_site_code("A-FGTB-FGT"), "AB");
}

#[test]
fn removals_apply_in_order() {
    // "-ADS" is removed before "-1", so "-A-1DS" only loses "-1" and the
    // re-joined "-ADS" survives.
    assert_eq!(normalize_site_code("X-A-1DS"), "X-ADS");
}

#[test]
fn empty_input_passes_through() {
    assert_eq!(normalize_site_code(""), "");
}

#[test]
fn leading_underscore_yields_empty_code() {
    assert_eq!(normalize_site_code("_DSL"), "");
}

#[test]
fn case_is_preserved() {
    assert_eq!(normalize_site_code("shpld01-fgt"), "shpld01-fgt");
}
