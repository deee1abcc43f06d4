use dk_core::dynakube::OneAgentMode;
use dk_core::prelude::*;

use super::activegate::KUBERNETES_MONITORING_CAPABILITY;
use super::has_repository_and_tag;
use crate::validation::ValidationContext;
use crate::validation::validator::{
    Check,
    Validator,
    error,
    warning,
};

fn extension_image(_: &ValidationContext, dk: &DynaKube) -> String {
    let eec = &dk.spec.templates.extension_execution_controller;
    if dk.extensions_enabled() && !has_repository_and_tag(eec.image_ref.as_ref()) {
        return "extensions are enabled, but templates.extensionExecutionController.imageRef is missing a repository \
                or tag"
            .into();
    }
    String::new()
}

pub fn extension_image_validator() -> Validator {
    error("extension_image", Check::Sync(extension_image))
}

fn extension_volume(_: &ValidationContext, dk: &DynaKube) -> String {
    let eec = &dk.spec.templates.extension_execution_controller;
    if eec.use_ephemeral_volume && eec.persistent_volume_claim.is_some() {
        return "useEphemeralVolume and persistentVolumeClaim are mutually exclusive for the extension execution \
                controller"
            .into();
    }
    String::new()
}

pub fn extension_volume_validator() -> Validator {
    error("extension_volume", Check::Sync(extension_volume))
}

fn kspm_image(_: &ValidationContext, dk: &DynaKube) -> String {
    let collector = &dk.spec.templates.kspm_node_configuration_collector;
    if dk.kspm_enabled() && !has_repository_and_tag(collector.image_ref.as_ref()) {
        return "kspm is enabled, but templates.kspmNodeConfigurationCollector.imageRef is missing a repository or tag"
            .into();
    }
    String::new()
}

pub fn kspm_image_validator() -> Validator {
    error("kspm_image", Check::Sync(kspm_image))
}

fn kspm_capability(_: &ValidationContext, dk: &DynaKube) -> String {
    if dk.kspm_enabled() && !dk.has_capability(KUBERNETES_MONITORING_CAPABILITY) {
        return format!("kspm requires the {KUBERNETES_MONITORING_CAPABILITY} ActiveGate capability");
    }
    String::new()
}

pub fn kspm_capability_validator() -> Validator {
    error("kspm_capability", Check::Sync(kspm_capability))
}

fn log_monitoring_template(_: &ValidationContext, dk: &DynaKube) -> String {
    if dk.spec.templates.log_monitoring.is_some() && dk.is_daemonset_required() {
        return format!(
            "templates.logMonitoring is ignored in {} mode, the OneAgent daemonset collects the logs",
            dk.mode()
        );
    }
    String::new()
}

pub fn log_monitoring_template_validator() -> Validator {
    warning("log_monitoring_template", Check::Sync(log_monitoring_template))
}

fn enrichment_without_injection(_: &ValidationContext, dk: &DynaKube) -> String {
    if dk.metadata_enrichment_enabled() && dk.mode() == OneAgentMode::HostMonitoring {
        return format!(
            "metadata enrichment has no effect without OneAgent app injection, which {} mode does not provide",
            OneAgentMode::HostMonitoring
        );
    }
    String::new()
}

pub fn enrichment_without_injection_validator() -> Validator {
    warning("enrichment_without_injection", Check::Sync(enrichment_without_injection))
}
