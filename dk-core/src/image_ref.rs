use serde::{
    Deserialize,
    Serialize,
};

use crate::errors::*;

const DEFAULT_REGISTRY: &str = "docker.io";
const LOCALHOST: &str = "localhost";

err_impl! {ImageRefError,
    #[error("invalid image reference: {0}")]
    InvalidReference(String),
}

// A container image reference split into its parts, e.g.
// "registry.example.com:5000/team/app:1.2@sha256:abcd"
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageRef {
    pub registry: String,
    pub repository: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,

    #[serde(rename = "imageDigest", skip_serializing_if = "Option::is_none")]
    pub digest: Option<String>,
}

impl ImageRef {
    pub fn parse(image: &str) -> anyhow::Result<ImageRef> {
        let image = image.trim();
        ensure!(!image.is_empty() && !image.contains(char::is_whitespace), ImageRefError::invalid_reference(image));

        let (rest, digest) = match image.split_once('@') {
            Some((rest, digest)) => (rest, Some(digest.to_string())),
            None => (image, None),
        };

        // A first path component is a registry if it looks like a host (has a dot or a port) or
        // is "localhost"; otherwise the whole thing is a docker hub repository
        let (registry, remainder) = match rest.split_once('/') {
            Some((first, remainder)) if first.contains('.') || first.contains(':') || first == LOCALHOST => {
                (first.to_string(), remainder)
            },
            _ => (DEFAULT_REGISTRY.to_string(), rest),
        };

        // The tag separator is the last colon after the last slash, so registry ports are ignored
        let last_slash = remainder.rfind('/').map(|i| i + 1).unwrap_or(0);
        let (repository, tag) = match remainder[last_slash..].rfind(':') {
            Some(i) => (&remainder[..last_slash + i], Some(remainder[last_slash + i + 1..].to_string())),
            None => (remainder, None),
        };

        ensure!(
            !repository.is_empty() && tag.as_deref() != Some("") && digest.as_deref() != Some(""),
            ImageRefError::invalid_reference(image)
        );

        Ok(ImageRef { registry, repository: repository.into(), tag, digest })
    }
}

#[cfg(test)]
mod tests {
    use rstest::*;

    use super::*;

    #[rstest]
    #[case::bare("nginx", DEFAULT_REGISTRY, "nginx", None, None)]
    #[case::tagged("library/nginx:1.27", DEFAULT_REGISTRY, "library/nginx", Some("1.27"), None)]
    #[case::registry_port(
        "registry.example.com:5000/team/app:v2",
        "registry.example.com:5000",
        "team/app",
        Some("v2"),
        None
    )]
    #[case::localhost("localhost/app", LOCALHOST, "app", None, None)]
    #[case::digest(
        "quay.io/app@sha256:0123",
        "quay.io",
        "app",
        None,
        Some("sha256:0123")
    )]
    #[case::tag_and_digest("quay.io/app:1.0@sha256:0123", "quay.io", "app", Some("1.0"), Some("sha256:0123"))]
    fn test_parse_image_ref(
        #[case] image: &str,
        #[case] registry: &str,
        #[case] repository: &str,
        #[case] tag: Option<&str>,
        #[case] digest: Option<&str>,
    ) {
        let res = ImageRef::parse(image).unwrap();
        assert_eq!(res.registry, registry);
        assert_eq!(res.repository, repository);
        assert_eq!(res.tag.as_deref(), tag);
        assert_eq!(res.digest.as_deref(), digest);
    }

    #[rstest]
    #[case::empty("")]
    #[case::empty_tag("quay.io/app:")]
    #[case::whitespace("quay.io/my app")]
    fn test_parse_image_ref_invalid(#[case] image: &str) {
        assert!(ImageRef::parse(image).is_err());
    }

    #[rstest]
    fn test_image_ref_serialization() {
        let res = ImageRef::parse("quay.io/app:1.0").unwrap();
        assert_eq!(
            serde_json::to_string(&res).unwrap(),
            r#"{"registry":"quay.io","repository":"app","tag":"1.0"}"#
        );
    }
}
