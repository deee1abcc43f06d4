use std::collections::BTreeMap;

use super::*;

#[rstest]
fn test_flag_defaults() {
    let ff = FeatureFlags::new(None);
    assert!(!ff.ignore_proxy());
    assert!(ff.activegate_updates());
    assert_eq!(ff.initial_connect_retry(), -1);
    assert_eq!(ff.max_unavailable(), 1);
    assert!(!ff.init_seccomp());
    assert_eq!(ff.no_proxy(), "");
    assert_eq!(ff.injection_failure_policy(), FailurePolicy::Silent);
    assert!(!ff.read_only_csi_volume());
    assert!(ff.automatic_k8s_api_monitoring());
    assert!(ff.automatic_injection());
    assert!(!ff.label_version_detection());
}

#[rstest]
#[case::new_key_only(Some("true"), None, true)]
#[case::deprecated_only(None, Some("true"), true)]
#[case::new_wins(Some("false"), Some("true"), false)]
#[case::empty_new_key(Some(""), Some("true"), true)]
#[case::neither(None, None, false)]
fn test_flag_precedence(#[case] new: Option<&str>, #[case] deprecated: Option<&str>, #[case] expected: bool) {
    let mut annotations = BTreeMap::new();
    if let Some(v) = new {
        annotations.insert("feature.dynatrace.com/oneagent-ignore-proxy".to_string(), v.to_string());
    }
    if let Some(v) = deprecated {
        annotations.insert("feature.dynatrace.com/oa-proxy-ignored".to_string(), v.to_string());
    }

    let ff = FeatureFlags::new(Some(&annotations));
    assert_eq!(ff.ignore_proxy(), expected);
}

#[rstest]
fn test_flag_invalid_value_uses_default() {
    let annotations = klabel!(
        "feature.dynatrace.com/oneagent-initial-connect-retry" => "soon",
        "feature.dynatrace.com/automatic-injection" => "nope",
    )
    .unwrap();

    let ff = FeatureFlags::new(Some(&annotations));
    assert_eq!(ff.initial_connect_retry(), -1);
    assert!(ff.automatic_injection());
}

#[rstest]
#[case::fail("fail", FailurePolicy::Fail)]
#[case::silent("silent", FailurePolicy::Silent)]
#[case::garbage("sometimes", FailurePolicy::Silent)]
fn test_failure_policy(#[case] value: &str, #[case] expected: FailurePolicy) {
    let annotations = klabel!("feature.dynatrace.com/injection-failure-policy" => value).unwrap();
    let ff = FeatureFlags::new(Some(&annotations));
    assert_eq!(ff.injection_failure_policy(), expected);
}

#[rstest]
fn test_deprecated_in_use() {
    let annotations = klabel!(
        "feature.dynatrace.com/oa-proxy-ignored" => "true",
        "feature.dynatrace.com/ag-updates" => "",
        "feature.dynatrace.com/init-seccomp" => "true",
    )
    .unwrap();

    let ff = FeatureFlags::new(Some(&annotations));
    assert_eq!(ff.deprecated_in_use(), vec!["feature.dynatrace.com/oa-proxy-ignored".to_string()]);
}
