use std::collections::BTreeMap;

use kube::api::ObjectMeta;
use serde_json::json;

use super::*;

const TEST_API_URL: &str = "https://abc12345.live.dynatrace.com/api";

fn meta() -> ObjectMeta {
    ObjectMeta {
        name: Some("dynakube".into()),
        namespace: Some("dynatrace".into()),
        annotations: Some(BTreeMap::from([("feature.dynatrace.com/init-seccomp".into(), "true".into())])),
        ..Default::default()
    }
}

#[fixture]
fn classic_v1beta3(#[default(Some(false))] auto_update: Option<bool>) -> v1beta3::DynaKube {
    v1beta3::DynaKube {
        metadata: meta(),
        spec: v1beta3::DynaKubeSpec {
            api_url: TEST_API_URL.into(),
            one_agent: v1beta3::OneAgentSpec {
                classic_full_stack: Some(v1beta3::HostInjectSpec {
                    base: common::HostInjectSpec {
                        args: Some(vec!["--set-host-group=foo".into()]),
                        ..Default::default()
                    },
                    auto_update,
                }),
                ..Default::default()
            },
            ..Default::default()
        },
        status: None,
    }
}

#[fixture]
fn app_monitoring_v1beta4() -> v1beta4::DynaKube {
    v1beta4::DynaKube {
        metadata: meta(),
        spec: v1beta4::DynaKubeSpec {
            api_url: TEST_API_URL.into(),
            one_agent: v1beta4::OneAgentSpec {
                application_monitoring: Some(v1beta4::ApplicationMonitoringSpec {
                    version: Some("1.300.0.20240101-000000".into()),
                    use_csi_driver: Some(true),
                    ..Default::default()
                }),
                ..Default::default()
            },
            kspm: Some(Default::default()),
            ..Default::default()
        },
        status: None,
    }
}

#[rstest]
fn test_auto_update_parked_in_annotation(classic_v1beta3: v1beta3::DynaKube) {
    let next = classic_v1beta3.to_next().unwrap();

    let annotations = next.metadata.annotations.as_ref().unwrap();
    assert_eq!(annotations.get(REMOVED_AUTO_UPDATE_ANNOTATION_KEY), Some(&"false".to_string()));
    assert_eq!(next.spec.one_agent.classic_full_stack.unwrap().args, Some(vec!["--set-host-group=foo".into()]));
}

#[rstest]
fn test_v1beta3_round_trip(classic_v1beta3: v1beta3::DynaKube) {
    let next = classic_v1beta3.to_next().unwrap();
    let prev = v1beta3::DynaKube::from_next(&next).unwrap();
    assert_eq!(prev, classic_v1beta3);
}

#[rstest]
fn test_v1beta3_round_trip_no_removed_field(#[with(None)] classic_v1beta3: v1beta3::DynaKube) {
    let next = classic_v1beta3.to_next().unwrap();
    assert!(!next.metadata.annotations.as_ref().unwrap().contains_key(REMOVED_AUTO_UPDATE_ANNOTATION_KEY));

    let prev = v1beta3::DynaKube::from_next(&next).unwrap();
    assert_eq!(prev, classic_v1beta3);
}

#[rstest]
fn test_v1beta4_round_trip(app_monitoring_v1beta4: v1beta4::DynaKube) {
    let next = app_monitoring_v1beta4.to_next().unwrap();
    assert_eq!(
        next.metadata.annotations.as_ref().unwrap().get(REMOVED_USE_CSI_DRIVER_ANNOTATION_KEY),
        Some(&"true".to_string())
    );

    let prev = v1beta4::DynaKube::from_next(&next).unwrap();
    assert_eq!(prev, app_monitoring_v1beta4);
}

#[rstest]
fn test_added_field_dropped_when_converting_down(app_monitoring_v1beta4: v1beta4::DynaKube) {
    let prev = v1beta3::DynaKube::from_next(&app_monitoring_v1beta4).unwrap();
    let next = prev.to_next().unwrap();
    assert_eq!(next.spec.kspm, None);
}

#[rstest]
fn test_versioned_conversion_through_hub(classic_v1beta3: v1beta3::DynaKube) {
    let versioned = VersionedDynaKube::V1beta3(classic_v1beta3.clone());

    let hub = versioned.convert(v1beta5::API_VERSION).unwrap();
    assert_eq!(hub.api_version(), v1beta5::API_VERSION);

    let back = hub.convert(v1beta3::API_VERSION).unwrap();
    assert_eq!(back, VersionedDynaKube::V1beta3(classic_v1beta3));
}

#[rstest]
fn test_versioned_from_value(classic_v1beta3: v1beta3::DynaKube) {
    let value = VersionedDynaKube::V1beta3(classic_v1beta3.clone()).into_value().unwrap();
    assert_eq!(value["apiVersion"], json!(v1beta3::API_VERSION));
    assert_eq!(value["spec"]["oneAgent"]["classicFullStack"]["autoUpdate"], json!(false));

    let parsed = VersionedDynaKube::from_value(value).unwrap();
    assert_eq!(parsed, VersionedDynaKube::V1beta3(classic_v1beta3));
}

#[rstest]
fn test_versioned_unsupported_version() {
    let value = json!({"apiVersion": "dynatrace.com/v1alpha1", "kind": "DynaKube", "spec": {}});
    let res = VersionedDynaKube::from_value(value);
    assert!(matches!(res, Err(ConversionError::UnsupportedVersion(v)) if v == "dynatrace.com/v1alpha1"));
}
