use dk_api::latest::{
    DynaKube,
    ImageRefSpec,
};
use lazy_static::lazy_static;
use url::Url;

use super::*;

lazy_static! {
    static ref ONEAGENT_VERSION_REGEX: Regex = Regex::new(r"^\d+\.\d+\.\d+\.\d{8}-\d{6}$").unwrap();
}

// "1.239.14.20220325-164521" -> "1.239.14"; None if the first three segments aren't all numeric
pub fn semver_triplet(version: &str) -> Option<String> {
    let segments: Vec<_> = version.split('.').take(3).collect();
    if segments.len() != 3 || segments.iter().any(|s| s.is_empty() || !s.chars().all(|c| c.is_ascii_digit())) {
        return None;
    }
    Some(segments.join("."))
}

pub fn validate_oneagent_version(version: &str) -> EmptyResult {
    if !ONEAGENT_VERSION_REGEX.is_match(version) || semver_triplet(version).is_none() {
        bail!(DynaKubeError::invalid_version(version));
    }
    Ok(())
}

// Raw tags are passed through, everything else is cut down to major.minor.patch and gets the
// raw suffix appended
pub fn image_tag_from_version(version: &str) -> String {
    if version.is_empty() {
        return DEFAULT_IMAGE_TAG.into();
    }
    if version.ends_with(RAW_IMAGE_SUFFIX) {
        return version.into();
    }

    let truncated = semver_triplet(version).unwrap_or_else(|| version.into());
    format!("{truncated}{RAW_IMAGE_SUFFIX}")
}

pub fn api_url_host(api_url: &str) -> Option<String> {
    let url = Url::parse(api_url).ok()?;
    let host = url.host_str().filter(|h| !h.is_empty())?;
    Some(match url.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.into(),
    })
}

pub fn default_image(api_url: &str, component: &str, version: &str) -> Option<String> {
    let host = api_url_host(api_url)?;
    Some(format!("{host}/linux/{component}:{}", image_tag_from_version(version)))
}

// Unset or empty fields fall back to the given defaults
pub fn image_with_defaults(image: Option<&ImageRefSpec>, default_repo: &str, default_tag: &str) -> String {
    let pick = |v: Option<&String>, default: &str| v.filter(|s| !s.is_empty()).cloned().unwrap_or_else(|| default.into());
    let repo = pick(image.and_then(|i| i.repository.as_ref()), default_repo);
    let tag = pick(image.and_then(|i| i.tag.as_ref()), default_tag);
    format!("{repo}:{tag}")
}

pub trait DynaKubeImages {
    fn default_one_agent_image(&self, version: &str) -> Option<String>;
    fn default_code_modules_image(&self, version: &str) -> Option<String>;
    fn default_active_gate_image(&self, version: &str) -> Option<String>;
}

impl DynaKubeImages for DynaKube {
    fn default_one_agent_image(&self, version: &str) -> Option<String> {
        default_image(&self.spec.api_url, ONEAGENT_IMAGE_COMPONENT, version)
    }

    fn default_code_modules_image(&self, version: &str) -> Option<String> {
        default_image(&self.spec.api_url, CODE_MODULES_IMAGE_COMPONENT, version)
    }

    // ActiveGate images don't use the raw tag scheme
    fn default_active_gate_image(&self, version: &str) -> Option<String> {
        let host = api_url_host(&self.spec.api_url)?;
        let tag = if version.is_empty() { DEFAULT_IMAGE_TAG } else { version };
        Some(format!("{host}/linux/{ACTIVEGATE_IMAGE_COMPONENT}:{tag}"))
    }
}
