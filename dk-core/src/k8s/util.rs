use std::collections::BTreeMap;

use kube::Resource;
use lazy_static::lazy_static;

use super::*;
use crate::errors::*;
use crate::prelude::*;

const MAX_LABEL_VALUE_LENGTH: usize = 63;

lazy_static! {
    static ref LABEL_VALUE_REGEX: Regex = Regex::new(r"^(([A-Za-z0-9][-A-Za-z0-9_.]*)?[A-Za-z0-9])?$").unwrap();
}

// Labels that mark every object created on behalf of a DynaKube
pub fn core_labels(dk_name: &str, component: &str) -> BTreeMap<String, String> {
    BTreeMap::from([
        (APP_KUBERNETES_IO_NAME_KEY.into(), OPERATOR_NAME.into()),
        (APP_KUBERNETES_IO_CREATED_BY_KEY.into(), dk_name.into()),
        (APP_KUBERNETES_IO_MANAGED_BY_KEY.into(), OPERATOR_NAME.into()),
        (APP_KUBERNETES_IO_COMPONENT_KEY.into(), component.into()),
    ])
}

// Objects the webhook creates outside the operator namespace are tied to their DynaKube through
// labels only; owner references can't cross namespaces
pub fn build_object_meta(namespace: &str, name: &str, owner: &impl Resource) -> metav1::ObjectMeta {
    metav1::ObjectMeta {
        namespace: Some(namespace.into()),
        name: Some(name.into()),
        labels: Some(core_labels(&owner.name_any(), WEBHOOK_COMPONENT)),
        ..Default::default()
    }
}

pub fn is_valid_label_value(value: &str) -> bool {
    value.len() <= MAX_LABEL_VALUE_LENGTH && LABEL_VALUE_REGEX.is_match(value)
}

impl<T: Resource> KubeResourceExt for T {
    fn namespaced_name(&self) -> String {
        match self.namespace() {
            Some(ns) => format!("{}/{}", ns, self.name_any()),
            None => self.name_any().clone(),
        }
    }

    fn matches(&self, sel: &metav1::LabelSelector) -> anyhow::Result<bool> {
        if let Some(exprs) = &sel.match_expressions {
            for expr in exprs {
                if !label_expr_match(self.labels(), expr)? {
                    return Ok(false);
                }
            }
        }

        if let Some(labels) = &sel.match_labels {
            for (k, v) in labels {
                if self.labels().get(k) != Some(v) {
                    return Ok(false);
                }
            }
        }
        Ok(true)
    }
}

// https://kubernetes.io/docs/concepts/overview/working-with-objects/labels/#set-based-requirement
pub(super) const OPERATOR_IN: &str = "In";
pub(super) const OPERATOR_NOT_IN: &str = "NotIn";
pub(super) const OPERATOR_EXISTS: &str = "Exists";
pub(super) const OPERATOR_DOES_NOT_EXIST: &str = "DoesNotExist";

fn label_expr_match(
    obj_labels: &BTreeMap<String, String>,
    expr: &metav1::LabelSelectorRequirement,
) -> anyhow::Result<bool> {
    let values = expr.values.as_deref().unwrap_or_default();
    let needs_values = matches!(expr.operator.as_str(), OPERATOR_IN | OPERATOR_NOT_IN);
    if needs_values == values.is_empty() {
        bail!(KubernetesError::malformed_label_selector(expr));
    }

    let label = obj_labels.get(&expr.key);
    match expr.operator.as_str() {
        OPERATOR_IN => Ok(label.is_some_and(|v| values.contains(v))),
        OPERATOR_NOT_IN => Ok(!label.is_some_and(|v| values.contains(v))),
        OPERATOR_EXISTS => Ok(label.is_some()),
        OPERATOR_DOES_NOT_EXIST => Ok(label.is_none()),
        _ => bail!(KubernetesError::malformed_label_selector(expr)),
    }
}
