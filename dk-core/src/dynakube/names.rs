use dk_api::latest::DynaKube;

use crate::prelude::*;

// Names of the objects the operator creates for a DynaKube, all of the form "<dynakube>-<suffix>"
pub trait DynaKubeNames {
    fn prefixed(&self, suffix: &str) -> String;

    fn tenant_secret_name(&self) -> String {
        self.prefixed(TENANT_SECRET_SUFFIX)
    }

    fn activegate_tls_secret_name(&self) -> String {
        self.prefixed(ACTIVEGATE_TLS_SECRET_SUFFIX)
    }

    fn activegate_auth_token_secret_name(&self) -> String {
        self.prefixed(ACTIVEGATE_AUTH_TOKEN_SECRET_SUFFIX)
    }

    fn oneagent_connection_info_name(&self) -> String {
        self.prefixed(ONEAGENT_CONNECTION_INFO_SUFFIX)
    }

    fn activegate_connection_info_name(&self) -> String {
        self.prefixed(ACTIVEGATE_CONNECTION_INFO_SUFFIX)
    }

    fn pull_secret_name(&self) -> String {
        self.prefixed(PULL_SECRET_SUFFIX)
    }

    fn extensions_token_secret_name(&self) -> String {
        self.prefixed(EXTENSIONS_TOKEN_SUFFIX)
    }

    fn log_monitoring_daemonset_name(&self) -> String {
        self.prefixed(LOGMONITORING_DAEMONSET_SUFFIX)
    }

    fn bootstrapper_config_source_name(&self) -> String {
        self.prefixed(BOOTSTRAPPER_CONFIG_SOURCE_SUFFIX)
    }

    fn bootstrapper_certs_source_name(&self) -> String {
        self.prefixed(BOOTSTRAPPER_CERTS_SOURCE_SUFFIX)
    }
}

impl DynaKubeNames for DynaKube {
    fn prefixed(&self, suffix: &str) -> String {
        format!("{}-{suffix}", self.name_any())
    }
}
