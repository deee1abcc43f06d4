use std::sync::Arc;
use std::time::Duration;

use crate::events::EventPublisher;

// Process-wide configuration, fixed at startup and shared by every admission request
#[derive(Clone)]
pub struct WebhookContext {
    pub client: kube::Client,
    pub operator_namespace: String,
    pub bootstrapper_image: String,
    pub csi_driver_enabled: bool,
    pub openshift: bool,
    pub request_timeout: Duration,
    pub events: Arc<dyn EventPublisher>,
}
