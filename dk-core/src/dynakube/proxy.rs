use dk_api::latest::DynaKube;
use tracing::*;

use super::*;

// Inline proxy values win; otherwise the "proxy" key of the referenced secret in the DynaKube's
// namespace.  No proxy configured at all is an empty string.
#[instrument(skip_all, fields(dynakube = dk.namespaced_name()))]
pub async fn proxy_url(dk: &DynaKube, client: kube::Client) -> anyhow::Result<String> {
    let Some(proxy) = &dk.spec.proxy else {
        return Ok(String::new());
    };

    if let Some(secret_name) = proxy.value_from.as_ref().filter(|s| !s.is_empty()) {
        let ns = dk.namespace().unwrap_or_default();
        let api: kube::Api<corev1::Secret> = kube::Api::namespaced(client, &ns);
        let secret = api.get(secret_name).await.map_err(|err| {
            debug!("could not read proxy secret {ns}/{secret_name}: {err}");
            DynaKubeError::missing_proxy_secret(secret_name)
        })?;

        let Some(value) = secret.data.as_ref().and_then(|d| d.get(PROXY_SECRET_KEY)) else {
            bail!(DynaKubeError::missing_proxy_key(secret_name));
        };
        return Ok(String::from_utf8_lossy(&value.0).trim().into());
    }

    Ok(proxy.value.clone().unwrap_or_default())
}
