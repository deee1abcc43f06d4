use async_trait::async_trait;
use dk_core::prelude::*;
use kube::runtime::events::{
    Event,
    EventType,
    Recorder,
    Reporter,
};
use tracing::*;

pub const INJECTED_REASON: &str = "Injected";
pub const UPDATED_REASON: &str = "Updated";
pub const SKIPPED_REASON: &str = "SkippedInjection";

const MUTATE_ACTION: &str = "Mutate";

// Events are best-effort: a failed publish is logged and never fails the admission
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EventPublisher: Send + Sync {
    async fn publish(&self, obj_ref: &corev1::ObjectReference, type_: EventType, reason: &str, note: String);
}

pub struct KubeEventPublisher {
    recorder: Recorder,
}

impl KubeEventPublisher {
    pub fn new(client: kube::Client) -> KubeEventPublisher {
        let reporter = Reporter { controller: format!("{OPERATOR_NAME}-{WEBHOOK_COMPONENT}"), instance: None };
        KubeEventPublisher { recorder: Recorder::new(client, reporter) }
    }
}

#[async_trait]
impl EventPublisher for KubeEventPublisher {
    async fn publish(&self, obj_ref: &corev1::ObjectReference, type_: EventType, reason: &str, note: String) {
        let event = Event {
            type_,
            reason: reason.into(),
            note: Some(note),
            action: MUTATE_ACTION.into(),
            secondary: None,
        };
        if let Err(err) = self.recorder.publish(&event, obj_ref).await {
            warn!("could not publish {reason} event: {err}");
        }
    }
}

#[cfg(test)]
pub struct NoopEventPublisher;

#[cfg(test)]
#[async_trait]
impl EventPublisher for NoopEventPublisher {
    async fn publish(&self, _: &corev1::ObjectReference, _: EventType, _: &str, _: String) {}
}
