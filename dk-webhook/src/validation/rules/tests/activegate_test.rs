use std::collections::BTreeMap;

use k8s_openapi::apimachinery::pkg::api::resource::Quantity;

use super::activegate::*;
use super::*;

fn with_capabilities(mut dk: DynaKube, caps: &[&str]) -> DynaKube {
    dk.spec.active_gate.capabilities = caps.iter().map(|c| c.to_string()).collect();
    dk
}

#[rstest]
#[tokio::test]
async fn test_known_capabilities(test_dynakube: DynaKube) {
    let dk = with_capabilities(test_dynakube, &KNOWN_CAPABILITIES);
    assert_is_empty!(check(invalid_capabilities_validator(), &dk).await);
    assert_is_empty!(check(duplicate_capabilities_validator(), &dk).await);
}

#[rstest]
#[tokio::test]
async fn test_invalid_capability(test_dynakube: DynaKube) {
    let dk = with_capabilities(test_dynakube, &[ROUTING_CAPABILITY, "kubemon"]);
    assert_eq!(check(invalid_capabilities_validator(), &dk).await, "invalid ActiveGate capability: kubemon");
}

#[rstest]
#[tokio::test]
async fn test_duplicate_capability(test_dynakube: DynaKube) {
    let dk = with_capabilities(test_dynakube, &[ROUTING_CAPABILITY, ROUTING_CAPABILITY]);
    assert_eq!(check(duplicate_capabilities_validator(), &dk).await, "duplicate ActiveGate capability: routing");
}

#[rstest]
#[tokio::test]
async fn test_memory_limit(test_dynakube: DynaKube) {
    let mut dk = with_capabilities(test_dynakube, &[ROUTING_CAPABILITY]);
    assert_contains!(check(memory_limit_validator(), &dk).await, "memory limit");

    dk.spec.active_gate.resources = Some(corev1::ResourceRequirements {
        limits: Some(BTreeMap::from([("memory".into(), Quantity("1Gi".into()))])),
        ..Default::default()
    });
    assert_is_empty!(check(memory_limit_validator(), &dk).await);
}

#[rstest]
#[tokio::test]
async fn test_memory_limit_activegate_disabled(test_dynakube: DynaKube) {
    assert_is_empty!(check(memory_limit_validator(), &test_dynakube).await);
}
