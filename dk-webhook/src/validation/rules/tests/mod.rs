mod activegate_test;

use assertables::*;
use dk_api::latest::*;
use dk_core::dynakube::OneAgentMode;
use dk_core::prelude::*;
use dk_testutils::*;
use rstest::*;

use super::*;
use crate::validation::ValidationContext;
use crate::validation::validator::Validator;

fn test_vctx(client: kube::Client) -> ValidationContext {
    ValidationContext { client, csi_driver_enabled: false, old_dynakube: None }
}

// For rules that never talk to the apiserver
async fn check(v: Validator, dk: &DynaKube) -> String {
    let (_, client) = make_fake_apiserver();
    v.run(&test_vctx(client), dk).await.join("; ")
}

fn with_mode(mut dk: DynaKube, mode: OneAgentMode) -> DynaKube {
    dk.spec.one_agent = OneAgentSpec::default();
    match mode {
        OneAgentMode::ClassicFullStack => dk.spec.one_agent.classic_full_stack = Some(Default::default()),
        OneAgentMode::CloudNativeFullStack => dk.spec.one_agent.cloud_native_full_stack = Some(Default::default()),
        OneAgentMode::ApplicationMonitoring => dk.spec.one_agent.application_monitoring = Some(Default::default()),
        OneAgentMode::HostMonitoring => dk.spec.one_agent.host_monitoring = Some(Default::default()),
        OneAgentMode::None => (),
    }
    dk
}

fn host_inject_mut(dk: &mut DynaKube) -> &mut HostInjectSpec {
    let oa = &mut dk.spec.one_agent;
    if let Some(cnfs) = oa.cloud_native_full_stack.as_mut() {
        return &mut cnfs.host_inject;
    }
    oa.classic_full_stack
        .as_mut()
        .or(oa.host_monitoring.as_mut())
        .expect("test DynaKube has no host-agent mode")
}
