use std::collections::BTreeMap; // BTreeMap sorts by key, HashMap doesn't

use dk_core::prelude::*;
use lazy_static::lazy_static;
use tracing::*;

use super::ValidationContext;
use super::rules::*;
use super::validator::{
    Validator,
    ValidatorCode,
    ValidatorType,
};

#[derive(Debug, Default, Eq, PartialEq)]
pub struct ValidationResult {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

pub struct ValidationStore {
    pub(super) validators: BTreeMap<ValidatorCode, Validator>,
}

impl ValidationStore {
    // Every rule runs, even after an earlier one has failed
    pub async fn validate(&self, ctx: &ValidationContext, dk: &DynaKube) -> ValidationResult {
        let mut result = ValidationResult::default();
        for (code, v) in self.validators.iter() {
            for msg in v.run(ctx, dk).await {
                debug!("rule {code} ({}) fired for {}: {msg}", v.name, dk.namespaced_name());
                match v.type_ {
                    ValidatorType::Error => result.errors.push(msg),
                    ValidatorType::Warning => result.warnings.push(msg),
                }
            }
        }
        result
    }

    fn new() -> ValidationStore {
        let mut store = ValidationStore { validators: BTreeMap::new() };

        store.register(general::name_validator());
        store.register(general::api_url_validator());
        store.register(general::api_url_immutable_validator());
        store.register(general::istio_validator());
        store.register(general::deprecated_feature_flags_validator());

        store.register(oneagent::conflicting_modes_validator());
        store.register(oneagent::version_validator());
        store.register(oneagent::public_image_validator());
        store.register(oneagent::csi_required_validator());
        store.register(oneagent::duplicate_args_validator());
        store.register(oneagent::duplicate_host_tags_validator());
        store.register(oneagent::host_id_source_validator());
        store.register(oneagent::installer_env_validator());
        store.register(oneagent::host_group_validator());

        store.register(activegate::invalid_capabilities_validator());
        store.register(activegate::duplicate_capabilities_validator());
        store.register(activegate::memory_limit_validator());

        store.register(selectors::namespace_selector_conflict_validator());
        store.register(selectors::namespace_selector_labels_validator());
        store.register(selectors::node_selector_conflict_validator());

        store.register(proxy::validator());

        store.register(modules::extension_image_validator());
        store.register(modules::extension_volume_validator());
        store.register(modules::kspm_image_validator());
        store.register(modules::kspm_capability_validator());
        store.register(modules::log_monitoring_template_validator());
        store.register(modules::enrichment_without_injection_validator());

        store
    }

    fn register(&mut self, v: Validator) {
        let index = self.validators.keys().filter(|code| code.0 == v.type_).count();
        self.validators.insert(ValidatorCode(v.type_, index), v);
    }
}

lazy_static! {
    pub static ref VALIDATORS: ValidationStore = ValidationStore::new();
}
