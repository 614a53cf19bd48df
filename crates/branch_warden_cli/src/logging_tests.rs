use super::*;
use serial_test::serial;

#[test]
fn test_default_filter_quiet() {
    assert_eq!(default_filter(false), "info");
}

#[test]
fn test_default_filter_verbose_enables_debug_for_workspace_crates() {
    let filter = default_filter(true);

    assert!(filter.starts_with("info,"));
    assert!(filter.contains("branch_warden_core=debug"));
    assert!(filter.contains("github_client=debug"));
}

#[test]
#[serial]
fn test_build_filter_prefers_environment() {
    std::env::set_var(LOG_ENV_VAR, "warn");

    let filter = build_filter(true);

    std::env::remove_var(LOG_ENV_VAR);
    assert_eq!(filter.to_string(), "warn");
}

#[test]
#[serial]
fn test_build_filter_without_environment() {
    std::env::remove_var(LOG_ENV_VAR);

    let filter = build_filter(false);

    assert_eq!(filter.to_string(), "info");
}
