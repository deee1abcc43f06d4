use url::Url;

use super::*;

// Managed tenants look like "https://<host>/e/<tenant>/api", SaaS tenants like
// "https://<tenant>.live.dynatrace.com/api"
pub fn tenant_uuid_from_api_url(api_url: &str) -> anyhow::Result<String> {
    let url = Url::parse(api_url).map_err(|_| DynaKubeError::invalid_tenant_url(api_url))?;

    let path: Vec<_> = url.path().split('/').filter(|s| !s.is_empty()).collect();
    if let ["e", tenant, "api", ..] = path.as_slice() {
        return Ok((*tenant).into());
    }

    match url.host_str().and_then(|h| h.split('.').find(|s| !s.is_empty())) {
        Some(tenant) => Ok(tenant.into()),
        None => bail!(DynaKubeError::invalid_tenant_url(api_url)),
    }
}
