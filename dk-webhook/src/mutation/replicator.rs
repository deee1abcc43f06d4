use dk_core::errors::*;
use dk_core::k8s::build_object_meta;
use dk_core::prelude::*;
use kube::api::{
    Api,
    PostParams,
};
use tracing::*;

const CONFLICT_CODE: u16 = 409;

err_impl! {ReplicationError,
    #[error("source secret not found: {0}")]
    SourceMissing(String),
}

pub fn is_source_missing(err: &anyhow::Error) -> bool {
    matches!(err.downcast_ref::<ReplicationError>(), Some(ReplicationError::SourceMissing(_)))
}

// Copies `<source_ns>/<source_name>` to `<target_ns>/<target_name>`, leaving the target alone when
// its data already matches.  Concurrent admissions in the same namespace race on the create, so
// losing that race is fine as long as the winner's copy ends up with the right data.
#[instrument(skip(client, dk), fields(dynakube = dk.name_any()))]
pub async fn ensure_replicated(
    client: kube::Client,
    dk: &DynaKube,
    source_ns: &str,
    source_name: &str,
    target_ns: &str,
    target_name: &str,
) -> EmptyResult {
    let source_api: Api<corev1::Secret> = Api::namespaced(client.clone(), source_ns);
    let Some(source) = source_api.get_opt(source_name).await? else {
        bail!(ReplicationError::source_missing(&format!("{source_ns}/{source_name}")));
    };

    let target_api: Api<corev1::Secret> = Api::namespaced(client, target_ns);
    let desired = corev1::Secret {
        metadata: build_object_meta(target_ns, target_name, dk),
        data: source.data.clone(),
        type_: source.type_.clone(),
        ..Default::default()
    };

    let existing = match target_api.get_opt(target_name).await? {
        Some(existing) => existing,
        None => match target_api.create(&PostParams::default(), &desired).await {
            Ok(_) => {
                info!("replicated {source_name} to {target_ns}/{target_name}");
                return Ok(());
            },
            Err(kube::Error::Api(ae)) if ae.code == CONFLICT_CODE => {
                debug!("{target_ns}/{target_name} was created concurrently");
                target_api.get(target_name).await?
            },
            Err(err) => return Err(err.into()),
        },
    };

    if existing.data == source.data {
        debug!("{target_ns}/{target_name} is up to date");
        return Ok(());
    }

    let mut updated = desired;
    updated.metadata.resource_version = existing.metadata.resource_version.clone();
    target_api.replace(target_name, &PostParams::default(), &updated).await?;
    info!("updated {target_ns}/{target_name} from {source_name}");
    Ok(())
}
