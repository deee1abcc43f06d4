mod attributes_test;
mod replicator_test;

use std::sync::Arc;
use std::time::Duration;

use assertables::*;
use dk_testutils::*;
use rstest::*;

use super::request::*;
use super::*;
use crate::events::NoopEventPublisher;

fn test_ctx(client: kube::Client) -> WebhookContext {
    WebhookContext {
        client,
        operator_namespace: TEST_OPERATOR_NAMESPACE.into(),
        bootstrapper_image: TEST_BOOTSTRAPPER_IMAGE.into(),
        csi_driver_enabled: false,
        openshift: false,
        request_timeout: Duration::from_secs(5),
        events: Arc::new(NoopEventPublisher),
    }
}

fn test_request(pod: corev1::Pod, dk: DynaKube) -> MutationRequest {
    MutationRequest::new(pod, test_namespace(TEST_NAMESPACE), dk).unwrap()
}

fn install_args(pod: &corev1::Pod) -> Vec<String> {
    pod.spec()
        .unwrap()
        .init_containers
        .iter()
        .flatten()
        .find(|c| c.name == INSTALL_CONTAINER_NAME)
        .and_then(|c| c.args.clone())
        .unwrap_or_default()
}

fn container<'a>(pod: &'a corev1::Pod, name: &str) -> &'a corev1::Container {
    pod.spec().unwrap().containers.iter().find(|c| c.name == name).unwrap()
}
