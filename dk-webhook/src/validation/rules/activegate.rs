use std::collections::BTreeSet;

use dk_core::prelude::*;

use crate::validation::ValidationContext;
use crate::validation::validator::{
    Check,
    Validator,
    error,
    warning,
};

pub const ROUTING_CAPABILITY: &str = "routing";
pub const KUBERNETES_MONITORING_CAPABILITY: &str = "kubernetes-monitoring";
pub const METRICS_INGEST_CAPABILITY: &str = "metrics-ingest";
pub const DYNATRACE_API_CAPABILITY: &str = "dynatrace-api";
pub const DEBUGGING_CAPABILITY: &str = "debugging";

pub const KNOWN_CAPABILITIES: [&str; 5] = [
    ROUTING_CAPABILITY,
    KUBERNETES_MONITORING_CAPABILITY,
    METRICS_INGEST_CAPABILITY,
    DYNATRACE_API_CAPABILITY,
    DEBUGGING_CAPABILITY,
];

const MEMORY_RESOURCE: &str = "memory";

fn invalid_capabilities(_: &ValidationContext, dk: &DynaKube) -> String {
    let invalid: Vec<_> = dk
        .spec
        .active_gate
        .capabilities
        .iter()
        .filter(|c| !KNOWN_CAPABILITIES.contains(&c.as_str()))
        .map(String::as_str)
        .collect();

    if invalid.is_empty() {
        return String::new();
    }
    format!("invalid ActiveGate capability: {}", invalid.join(", "))
}

pub fn invalid_capabilities_validator() -> Validator {
    error("invalid_activegate_capabilities", Check::Sync(invalid_capabilities))
}

fn duplicate_capabilities(_: &ValidationContext, dk: &DynaKube) -> String {
    let mut seen = BTreeSet::new();
    let mut duplicates = BTreeSet::new();
    for c in &dk.spec.active_gate.capabilities {
        if !seen.insert(c.as_str()) {
            duplicates.insert(c.as_str());
        }
    }

    if duplicates.is_empty() {
        return String::new();
    }
    format!("duplicate ActiveGate capability: {}", duplicates.into_iter().collect::<Vec<_>>().join(", "))
}

pub fn duplicate_capabilities_validator() -> Validator {
    error("duplicate_activegate_capabilities", Check::Sync(duplicate_capabilities))
}

fn memory_limit(_: &ValidationContext, dk: &DynaKube) -> String {
    if !dk.active_gate_enabled() {
        return String::new();
    }

    let has_limit = dk
        .spec
        .active_gate
        .resources
        .as_ref()
        .and_then(|r| r.limits.as_ref())
        .is_some_and(|l| l.contains_key(MEMORY_RESOURCE));
    if has_limit {
        return String::new();
    }
    "the ActiveGate has no memory limit set in activeGate.resources.limits.memory".into()
}

pub fn memory_limit_validator() -> Validator {
    warning("activegate_memory_limit", Check::Sync(memory_limit))
}
