pub mod attributes;
pub mod enrichment;
pub mod init_container;
pub mod oneagent;
pub mod replicator;
pub mod request;
pub mod volumes;

use std::time::Duration;

use async_trait::async_trait;
use dk_core::dynakube::FailurePolicy;
use dk_core::errors::*;
use dk_core::namespace_mapper::{
    find_dynakube_for_namespace,
    is_namespace_ignored,
};
use dk_core::prelude::*;
use kube::api::{
    Api,
    ListParams,
};
use kube::core::admission::{
    AdmissionRequest,
    AdmissionResponse,
    AdmissionReview,
    Operation,
};
use kube::runtime::events::EventType;
use rocket::serde::json::Json;
use tracing::*;

use self::attributes::{
    add_container_attributes,
    pod_attribute_args,
};
use self::enrichment::EnrichmentMutator;
use self::init_container::build_install_container;
use self::oneagent::OneAgentMutator;
use self::replicator::{
    ensure_replicated,
    is_source_missing,
};
use self::request::{
    MutationRequest,
    failure_policy_for,
    is_injected,
};
use self::volumes::add_pod_volumes;
use crate::context::WebhookContext;
use crate::events::{
    INJECTED_REASON,
    SKIPPED_REASON,
    UPDATED_REASON,
};

pub const NO_BOOTSTRAPPER_CONFIG_REASON: &str = "NoBootstrapperConfig";
pub const NO_MUTATION_NEEDED_REASON: &str = "NoMutationNeeded";

const TRUE: &str = "true";
const FALSE: &str = "false";

err_impl! {MutationError,
    #[error("mutation did not finish within {0:?}")]
    Timeout(Duration),
}

// One capability's contribution to a pod.  `mutate` runs once on a pod that has never been
// injected; `reinvoke` runs on a pod that already carries the install container and reports
// whether it changed anything.
#[async_trait]
pub trait PodMutator: Send + Sync {
    fn enabled(&self, req: &MutationRequest) -> bool;

    async fn mutate(
        &self,
        ctx: &WebhookContext,
        req: &mut MutationRequest,
        install: &mut corev1::Container,
        new_containers: &[String],
    ) -> EmptyResult;

    fn reinvoke(&self, req: &mut MutationRequest, new_containers: &[String]) -> anyhow::Result<bool>;
}

fn sub_mutators() -> Vec<Box<dyn PodMutator>> {
    vec![Box::new(OneAgentMutator), Box::new(EnrichmentMutator)]
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Outcome {
    Injected,
    Updated,
    Unchanged,
    Skipped(&'static str),
}

#[rocket::post("/mutate-dynatrace-com-v1-pod", data = "<body>")]
#[instrument(parent=None, skip_all)]
pub async fn handler(
    ctx: &rocket::State<WebhookContext>,
    body: Json<AdmissionReview<corev1::Pod>>,
) -> Json<AdmissionReview<corev1::Pod>> {
    let req: AdmissionRequest<_> = match body.into_inner().try_into() {
        Ok(r) => r,
        Err(err) => {
            error!("could not parse request: {err:?}");
            let resp = AdmissionResponse::invalid(err);
            return Json(into_pod_review(resp));
        },
    };

    let mut resp = AdmissionResponse::from(&req);
    if req.operation != Operation::Create {
        return Json(into_pod_review(resp));
    }

    if let Some(pod) = &req.object {
        let ns = req.namespace.clone().or_else(|| pod.namespace()).unwrap_or_default();
        resp = admit_pod(ctx, resp, pod, &ns).await;
    }

    Json(into_pod_review(resp))
}

// Runs the pipeline under the request deadline and turns the result into an admission response.
// Errors go through the failure-policy gate: `fail` denies the pod, `silent` admits it untouched.
#[instrument(skip_all, fields(pod.namespaced_name = format!("{ns}/{}", pod_name(pod))))]
pub async fn admit_pod(
    ctx: &WebhookContext,
    resp: AdmissionResponse,
    pod: &corev1::Pod,
    ns: &str,
) -> AdmissionResponse {
    let mut resolved_dk = None;
    let res = match tokio::time::timeout(ctx.request_timeout, mutate_pod(ctx, pod, ns, &mut resolved_dk)).await {
        Ok(res) => res,
        Err(_) => Err(MutationError::timeout(&ctx.request_timeout)),
    };

    let (mutated, outcome) = match res {
        Ok(Some(result)) => result,
        Ok(None) => return resp,
        Err(err) => {
            return match failure_policy_for(pod, resolved_dk.as_ref()) {
                FailurePolicy::Fail => {
                    error!("mutation failed, denying pod: {err:?}");
                    resp.deny(err)
                },
                FailurePolicy::Silent => {
                    warn!("mutation failed, admitting pod without changes: {err:?}");
                    resp
                },
            };
        },
    };

    publish_outcome(ctx, pod, ns, &outcome).await;
    match build_patch(pod, &mutated) {
        Ok(patch) if patch.0.is_empty() => resp,
        Ok(patch) => match resp.clone().with_patch(patch) {
            Ok(r) => r,
            Err(err) => {
                error!("could not serialize patch: {err}");
                resp
            },
        },
        Err(err) => {
            error!("could not compute patch: {err}");
            resp
        },
    }
}

fn build_patch(original: &corev1::Pod, mutated: &corev1::Pod) -> anyhow::Result<json_patch::Patch> {
    Ok(json_patch::diff(&serde_json::to_value(original)?, &serde_json::to_value(mutated)?))
}

// Pods created by a controller don't have their final name yet at admission time
fn pod_name(pod: &corev1::Pod) -> String {
    pod.metadata
        .name
        .clone()
        .or_else(|| pod.metadata.generate_name.clone())
        .unwrap_or_default()
}

fn pod_object_ref(pod: &corev1::Pod, ns: &str) -> corev1::ObjectReference {
    corev1::ObjectReference {
        api_version: Some("v1".into()),
        kind: Some("Pod".into()),
        name: Some(pod_name(pod)),
        namespace: Some(ns.into()),
        uid: pod.metadata.uid.clone(),
        ..Default::default()
    }
}

async fn publish_outcome(ctx: &WebhookContext, pod: &corev1::Pod, ns: &str, outcome: &Outcome) {
    let obj_ref = pod_object_ref(pod, ns);
    let (type_, reason, note) = match outcome {
        Outcome::Injected => (EventType::Normal, INJECTED_REASON, "injected the Dynatrace init container".to_string()),
        Outcome::Updated => (EventType::Normal, UPDATED_REASON, "injected newly added containers".to_string()),
        Outcome::Skipped(reason) => (EventType::Warning, SKIPPED_REASON, format!("injection skipped: {reason}")),
        Outcome::Unchanged => return,
    };
    ctx.events.publish(&obj_ref, type_, reason, note).await;
}

// Returns the mutated pod and what happened to it, or None when the pod isn't ours to touch.  The
// DynaKube is handed back through `resolved_dk` as soon as it's known so the failure-policy gate can
// use it even when a later step fails.
pub async fn mutate_pod(
    ctx: &WebhookContext,
    pod: &corev1::Pod,
    ns_name: &str,
    resolved_dk: &mut Option<DynaKube>,
) -> anyhow::Result<Option<(corev1::Pod, Outcome)>> {
    if is_namespace_ignored(ns_name, &ctx.operator_namespace) {
        debug!("namespace {ns_name} is never injected");
        return Ok(None);
    }

    let ns_api: Api<corev1::Namespace> = Api::all(ctx.client.clone());
    let namespace = ns_api.get(ns_name).await?;
    let Some(dk) = resolve_dynakube(ctx, &namespace).await? else {
        info!("no DynaKube selects namespace {ns_name}, no mutation performed");
        return Ok(None);
    };
    *resolved_dk = Some(dk.clone());

    let mut req = MutationRequest::new(pod.clone(), namespace, dk)?;
    if !req.capabilities.any() {
        return Ok(Some(skip(req.pod, NO_MUTATION_NEEDED_REASON)));
    }

    if let Err(err) = replicate_inputs(ctx, &req).await {
        if is_source_missing(&err) {
            warn!("{err}, skipping injection");
            return Ok(Some(skip(req.pod, NO_BOOTSTRAPPER_CONFIG_REASON)));
        }
        return Err(err);
    }

    let outcome = if is_injected(&req.pod) {
        match reinvoke(&mut req)? {
            true => Outcome::Updated,
            false => Outcome::Unchanged,
        }
    } else {
        let new_containers = req.new_container_names()?;
        if new_containers.is_empty() {
            return Ok(Some(skip(req.pod, NO_MUTATION_NEEDED_REASON)));
        }
        inject(ctx, &mut req, &new_containers).await?;
        Outcome::Injected
    };

    req.pod.set_annotation(INJECTED_ANNOTATION_KEY, TRUE);
    req.pod.remove_annotation(REASON_ANNOTATION_KEY);
    Ok(Some((req.pod, outcome)))
}

fn skip(mut pod: corev1::Pod, reason: &'static str) -> (corev1::Pod, Outcome) {
    info!("not injecting pod: {reason}");
    pod.set_annotation(INJECTED_ANNOTATION_KEY, FALSE);
    pod.set_annotation(REASON_ANNOTATION_KEY, reason);
    (pod, Outcome::Skipped(reason))
}

// The namespace mapper labels every namespace it assigns; unlabelled namespaces (e.g. ones created
// since the last reconcile) are matched against all DynaKube selectors directly
async fn resolve_dynakube(ctx: &WebhookContext, ns: &corev1::Namespace) -> anyhow::Result<Option<DynaKube>> {
    let dk_api: Api<DynaKube> = Api::namespaced(ctx.client.clone(), &ctx.operator_namespace);
    if let Some(dk_name) = ns.labels().get(INJECTION_INSTANCE_LABEL_KEY) {
        return Ok(dk_api.get_opt(dk_name).await?);
    }

    let dks = dk_api.list(&ListParams::default()).await?.items;
    Ok(find_dynakube_for_namespace(ns, &dks)?.cloned())
}

async fn replicate_inputs(ctx: &WebhookContext, req: &MutationRequest) -> EmptyResult {
    let target_ns = req.namespace_name();
    ensure_replicated(
        ctx.client.clone(),
        &req.dk,
        &ctx.operator_namespace,
        &req.dk.bootstrapper_config_source_name(),
        &target_ns,
        BOOTSTRAPPER_CONFIG_SECRET_NAME,
    )
    .await?;

    if req.dk.needs_bootstrapper_certs() {
        ensure_replicated(
            ctx.client.clone(),
            &req.dk,
            &ctx.operator_namespace,
            &req.dk.bootstrapper_certs_source_name(),
            &target_ns,
            BOOTSTRAPPER_CERTS_SECRET_NAME,
        )
        .await?;
    }
    Ok(())
}

async fn inject(ctx: &WebhookContext, req: &mut MutationRequest, new_containers: &[String]) -> EmptyResult {
    let mut install = build_install_container(ctx, req)?;
    install.args.get_or_insert_default().extend(pod_attribute_args(req));

    for mutator in sub_mutators() {
        if mutator.enabled(req) {
            mutator.mutate(ctx, req, &mut install, new_containers).await?;
        }
    }

    let container_args = add_container_attributes(req, new_containers)?;
    install.args.get_or_insert_default().extend(container_args);

    add_pod_volumes(&mut req.pod)?;
    req.pod.spec_mut()?.init_containers.get_or_insert_default().push(install);
    info!("injected containers {new_containers:?}");
    Ok(())
}

// Only containers that are missing their config mounts are touched, so running this on a pod that
// hasn't changed since the last admission is a no-op
fn reinvoke(req: &mut MutationRequest) -> anyhow::Result<bool> {
    let new_containers = req.new_container_names()?;
    let args = add_container_attributes(req, &new_containers)?;

    let mut changed = false;
    for mutator in sub_mutators() {
        if mutator.enabled(req) {
            changed |= mutator.reinvoke(req, &new_containers)?;
        }
    }

    if let Some(install) = req.install_container_mut()? {
        let existing = install.args.get_or_insert_default();
        for arg in args {
            if !existing.contains(&arg) {
                existing.push(arg);
                changed = true;
            }
        }
    }

    if !new_containers.is_empty() {
        info!("re-invoked for new containers {new_containers:?}");
        changed = true;
    }
    Ok(changed)
}

// Have to duplicate this fn because AdmissionResponse::into_review uses the dynamic API
fn into_pod_review(resp: AdmissionResponse) -> AdmissionReview<corev1::Pod> {
    AdmissionReview {
        types: resp.types.clone(),
        request: None,
        response: Some(resp),
    }
}

#[cfg(test)]
mod tests;
