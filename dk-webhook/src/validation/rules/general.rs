use dk_core::prelude::*;
use futures::FutureExt;
use futures::future::BoxFuture;
use lazy_static::lazy_static;
use regex::Regex;
use url::Url;

use crate::validation::ValidationContext;
use crate::validation::validator::{
    Check,
    Validator,
    error,
    warning,
};

pub const EXAMPLE_API_URL: &str = "https://ENVIRONMENTID.live.dynatrace.com/api";
pub const API_URL_SUFFIX: &str = "/api";
pub const THIRD_GEN_URL_MARKER: &str = ".apps.";
pub const ISTIO_API_GROUP: &str = "networking.istio.io";

lazy_static! {
    static ref DNS_1035_REGEX: Regex = Regex::new(r"^[a-z]([-a-z0-9]*[a-z0-9])?$").unwrap();
}

fn name(_: &ValidationContext, dk: &DynaKube) -> String {
    let name = dk.name_any();
    if name.len() > MAX_DYNAKUBE_NAME_LENGTH {
        return format!(
            "the length limit for the name of a DynaKube is {MAX_DYNAKUBE_NAME_LENGTH}, current length is {}",
            name.len()
        );
    }
    if !DNS_1035_REGEX.is_match(&name) {
        return format!("the DynaKube name {name:?} is not a valid DNS-1035 label");
    }
    String::new()
}

pub fn name_validator() -> Validator {
    error("name", Check::Sync(name))
}

fn api_url(_: &ValidationContext, dk: &DynaKube) -> String {
    let api_url = dk.spec.api_url.as_str();
    if api_url.is_empty() || api_url == EXAMPLE_API_URL {
        return "the API URL is missing or still set to the example value".into();
    }
    if !api_url.ends_with(API_URL_SUFFIX) {
        return format!("the API URL {api_url} must end with {API_URL_SUFFIX}");
    }

    let has_tenant = Url::parse(api_url)
        .ok()
        .and_then(|u| u.host_str().map(|h| h.split('.').next().unwrap_or_default().to_string()))
        .is_some_and(|first| !first.is_empty());
    if !has_tenant {
        return format!("the API URL {api_url} does not contain a tenant host");
    }

    if api_url.contains(THIRD_GEN_URL_MARKER) {
        return format!("the API URL {api_url} points to the platform UI; use the environment API URL instead");
    }
    String::new()
}

pub fn api_url_validator() -> Validator {
    error("api_url", Check::Sync(api_url))
}

fn api_url_immutable(ctx: &ValidationContext, dk: &DynaKube) -> String {
    match &ctx.old_dynakube {
        Some(old) if old.spec.api_url != dk.spec.api_url => {
            format!("the API URL cannot be changed (was {}); recreate the DynaKube instead", old.spec.api_url)
        },
        _ => String::new(),
    }
}

pub fn api_url_immutable_validator() -> Validator {
    error("api_url_immutable", Check::Sync(api_url_immutable))
}

fn istio<'a>(ctx: &'a ValidationContext, dk: &'a DynaKube) -> BoxFuture<'a, String> {
    async move {
        if !dk.spec.enable_istio {
            return String::new();
        }

        match ctx.client.list_api_groups().await {
            Ok(groups) if groups.groups.iter().any(|g| g.name == ISTIO_API_GROUP) => String::new(),
            Ok(_) => format!("enableIstio is set, but the {ISTIO_API_GROUP} API is not installed in the cluster"),
            Err(err) => format!("could not check whether Istio is installed: {err}"),
        }
    }
    .boxed()
}

pub fn istio_validator() -> Validator {
    error("istio", Check::Async(istio))
}

fn deprecated_feature_flags(_: &ValidationContext, dk: &DynaKube) -> Vec<String> {
    dk.feature_flags()
        .deprecated_in_use()
        .into_iter()
        .map(|key| format!("deprecated feature flag in use, switch to the new key: {key}"))
        .collect()
}

pub fn deprecated_feature_flags_validator() -> Validator {
    warning("deprecated_feature_flags", Check::Each(deprecated_feature_flags))
}
