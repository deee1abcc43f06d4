
use std::sync::Arc;
use std::time::Duration;

use assertables::*;
use dk_testutils::*;
use rstest::*;

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

fn dynakubes_path() -> String {
    format!("/apis/dynatrace.com/v1beta5/namespaces/{TEST_OPERATOR_NAMESPACE}/dynakubes")
}

// An apiserver with the given DynaKubes and the test namespace; every rule that lists siblings
// or namespaces is served from here
fn fake_cluster(dks: &[&DynaKube]) -> (MockServerBuilder, kube::Client) {
    let (mut fake_apiserver, client) = make_fake_apiserver();
    let items = dks.iter().map(|dk| serde_json::to_value(dk).unwrap()).collect();
    let ns = serde_json::to_value(test_namespace(TEST_NAMESPACE)).unwrap();
    fake_apiserver
        .handle_get(dynakubes_path(), list_of(items))
        .handle_get("/api/v1/namespaces".into(), list_of(vec![ns]));
    fake_apiserver.build();
    (fake_apiserver, client)
}
