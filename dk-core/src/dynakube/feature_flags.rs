use std::collections::BTreeMap;
use std::str::FromStr;

use tracing::*;

use crate::prelude::*;

const FAILURE_POLICY_FAIL: &str = "fail";
const FAILURE_POLICY_SILENT: &str = "silent";

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FeatureFlag {
    OneAgentIgnoreProxy,
    ActiveGateUpdates,
    OneAgentInitialConnectRetry,
    OneAgentMaxUnavailable,
    InitSeccomp,
    NoProxy,
    InjectionFailurePolicy,
    ReadOnlyCsiVolume,
    AutomaticK8sApiMonitoring,
    AutomaticInjection,
    LabelVersionDetection,
}

impl FeatureFlag {
    pub const ALL: [FeatureFlag; 11] = [
        FeatureFlag::OneAgentIgnoreProxy,
        FeatureFlag::ActiveGateUpdates,
        FeatureFlag::OneAgentInitialConnectRetry,
        FeatureFlag::OneAgentMaxUnavailable,
        FeatureFlag::InitSeccomp,
        FeatureFlag::NoProxy,
        FeatureFlag::InjectionFailurePolicy,
        FeatureFlag::ReadOnlyCsiVolume,
        FeatureFlag::AutomaticK8sApiMonitoring,
        FeatureFlag::AutomaticInjection,
        FeatureFlag::LabelVersionDetection,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            FeatureFlag::OneAgentIgnoreProxy => "oneagent-ignore-proxy",
            FeatureFlag::ActiveGateUpdates => "activegate-updates",
            FeatureFlag::OneAgentInitialConnectRetry => "oneagent-initial-connect-retry",
            FeatureFlag::OneAgentMaxUnavailable => "oneagent-max-unavailable",
            FeatureFlag::InitSeccomp => "init-seccomp",
            FeatureFlag::NoProxy => "no-proxy",
            FeatureFlag::InjectionFailurePolicy => "injection-failure-policy",
            FeatureFlag::ReadOnlyCsiVolume => "read-only-csi-volume",
            FeatureFlag::AutomaticK8sApiMonitoring => "automatic-k8s-api-monitoring",
            FeatureFlag::AutomaticInjection => "automatic-injection",
            FeatureFlag::LabelVersionDetection => "label-version-detection",
        }
    }

    pub fn deprecated_key(&self) -> Option<&'static str> {
        match self {
            FeatureFlag::OneAgentIgnoreProxy => Some("oa-proxy-ignored"),
            FeatureFlag::ActiveGateUpdates => Some("ag-updates"),
            _ => None,
        }
    }

    pub fn default_value(&self) -> &'static str {
        match self {
            FeatureFlag::OneAgentIgnoreProxy => "false",
            FeatureFlag::ActiveGateUpdates => "true",
            FeatureFlag::OneAgentInitialConnectRetry => "-1",
            FeatureFlag::OneAgentMaxUnavailable => "1",
            FeatureFlag::InitSeccomp => "false",
            FeatureFlag::NoProxy => "",
            FeatureFlag::InjectionFailurePolicy => FAILURE_POLICY_SILENT,
            FeatureFlag::ReadOnlyCsiVolume => "false",
            FeatureFlag::AutomaticK8sApiMonitoring => "true",
            FeatureFlag::AutomaticInjection => "true",
            FeatureFlag::LabelVersionDetection => "false",
        }
    }

    pub fn annotation_key(&self) -> String {
        format!("{FEATURE_FLAG_PREFIX}{}", self.key())
    }

    pub fn deprecated_annotation_key(&self) -> Option<String> {
        self.deprecated_key().map(|k| format!("{FEATURE_FLAG_PREFIX}{k}"))
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum FailurePolicy {
    Fail,
    #[default]
    Silent,
}

impl FailurePolicy {
    // Anything that isn't exactly "fail" is treated as silent
    pub fn parse(value: &str) -> FailurePolicy {
        if value == FAILURE_POLICY_FAIL { FailurePolicy::Fail } else { FailurePolicy::Silent }
    }
}

// Resolves feature flags out of a DynaKube's annotations: new key > deprecated key > default
#[derive(Clone, Copy, Debug)]
pub struct FeatureFlags<'a> {
    annotations: Option<&'a BTreeMap<String, String>>,
}

impl<'a> FeatureFlags<'a> {
    pub fn new(annotations: Option<&'a BTreeMap<String, String>>) -> FeatureFlags<'a> {
        FeatureFlags { annotations }
    }

    fn lookup(&self, key: &str) -> Option<&'a str> {
        self.annotations?.get(key).map(String::as_str)
    }

    // Empty values count as unset, so they never shadow a lower-precedence key
    pub fn raw(&self, flag: FeatureFlag) -> &'a str {
        if let Some(val) = self.lookup(&flag.annotation_key()).filter(|v| !v.is_empty()) {
            return val;
        }

        flag.deprecated_annotation_key()
            .and_then(|k| self.lookup(&k))
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| flag.default_value())
    }

    pub fn bool(&self, flag: FeatureFlag) -> bool {
        self.parsed(flag)
    }

    pub fn int(&self, flag: FeatureFlag) -> i64 {
        self.parsed(flag)
    }

    fn parsed<T: FromStr + Default>(&self, flag: FeatureFlag) -> T {
        let raw = self.raw(flag);
        match raw.trim().parse() {
            Ok(val) => val,
            Err(_) => {
                warn!("invalid value {raw:?} for feature flag {}, using default", flag.key());
                flag.default_value().parse().unwrap_or_default()
            },
        }
    }

    // Full annotation keys of every deprecated flag that is set to a non-empty value
    pub fn deprecated_in_use(&self) -> Vec<String> {
        FeatureFlag::ALL
            .iter()
            .filter_map(|flag| flag.deprecated_annotation_key())
            .filter(|k| self.lookup(k).is_some_and(|v| !v.is_empty()))
            .collect()
    }

    pub fn ignore_proxy(&self) -> bool {
        self.bool(FeatureFlag::OneAgentIgnoreProxy)
    }

    pub fn activegate_updates(&self) -> bool {
        self.bool(FeatureFlag::ActiveGateUpdates)
    }

    pub fn initial_connect_retry(&self) -> i64 {
        self.int(FeatureFlag::OneAgentInitialConnectRetry)
    }

    pub fn max_unavailable(&self) -> i64 {
        self.int(FeatureFlag::OneAgentMaxUnavailable)
    }

    pub fn init_seccomp(&self) -> bool {
        self.bool(FeatureFlag::InitSeccomp)
    }

    pub fn no_proxy(&self) -> &'a str {
        self.raw(FeatureFlag::NoProxy)
    }

    pub fn injection_failure_policy(&self) -> FailurePolicy {
        FailurePolicy::parse(self.raw(FeatureFlag::InjectionFailurePolicy))
    }

    pub fn read_only_csi_volume(&self) -> bool {
        self.bool(FeatureFlag::ReadOnlyCsiVolume)
    }

    pub fn automatic_k8s_api_monitoring(&self) -> bool {
        self.bool(FeatureFlag::AutomaticK8sApiMonitoring)
    }

    pub fn automatic_injection(&self) -> bool {
        self.bool(FeatureFlag::AutomaticInjection)
    }

    pub fn label_version_detection(&self) -> bool {
        self.bool(FeatureFlag::LabelVersionDetection)
    }
}
