mod context;
mod conversion;
mod events;
mod health;
mod mutation;
mod validation;

use std::env;
use std::net::{
    IpAddr,
    Ipv4Addr,
};
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use dk_core::errors::*;
use dk_core::logging;
use dk_core::prelude::*;
use kube::api::Api;
use rocket::config::TlsConfig;
use tracing::*;

use crate::context::WebhookContext;
use crate::events::KubeEventPublisher;

#[derive(Clone, Debug, Parser)]
struct Options {
    #[arg(long, env = POD_NAMESPACE_ENV_VAR)]
    namespace: String,

    #[arg(long, default_value = DEFAULT_WEBHOOK_PORT)]
    port: u16,

    #[arg(long)]
    cert_path: String,

    #[arg(long)]
    key_path: String,

    // Defaults to the image of the webhook's own pod
    #[arg(long)]
    bootstrapper_image: Option<String>,

    #[arg(long)]
    csi_driver_enabled: bool,

    #[arg(long)]
    openshift: bool,

    #[arg(long, default_value = DEFAULT_REQUEST_TIMEOUT_SECONDS)]
    request_timeout_secs: u64,

    #[arg(short, long, default_value = "info")]
    verbosity: String,
}

async fn own_image(client: kube::Client, namespace: &str) -> anyhow::Result<String> {
    let pod_name = env::var(POD_NAME_ENV_VAR)?;
    let pod = Api::<corev1::Pod>::namespaced(client, namespace).get(&pod_name).await?;
    pod.spec()?
        .containers
        .first()
        .and_then(|c| c.image.clone())
        .ok_or_else(|| anyhow!("pod {namespace}/{pod_name} has no container image"))
}

#[instrument(ret, err)]
async fn run(opts: Options) -> EmptyResult {
    let client = kube::Client::try_default().await?;

    let bootstrapper_image = match opts.bootstrapper_image {
        Some(image) => image,
        None => own_image(client.clone(), &opts.namespace).await?,
    };
    info!("using bootstrapper image {bootstrapper_image}");

    let ctx = WebhookContext {
        client: client.clone(),
        operator_namespace: opts.namespace.clone(),
        bootstrapper_image,
        csi_driver_enabled: opts.csi_driver_enabled,
        openshift: opts.openshift,
        request_timeout: Duration::from_secs(opts.request_timeout_secs),
        events: Arc::new(KubeEventPublisher::new(client)),
    };

    let rkt_config = rocket::Config {
        address: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
        port: opts.port,
        tls: Some(TlsConfig::from_paths(&opts.cert_path, &opts.key_path)),
        ..Default::default()
    };
    let server = rocket::custom(&rkt_config)
        .mount(
            "/",
            rocket::routes![
                mutation::handler,
                validation::handler_v1beta3,
                validation::handler_v1beta4,
                validation::handler_v1beta5,
                conversion::handler,
                health::livez,
                health::readyz,
            ],
        )
        .manage(ctx);

    server.launch().await?;
    Ok(())
}

#[tokio::main]
async fn main() {
    let args = Options::parse();
    logging::setup(&format!("{},rocket=warn", args.verbosity));
    if let Err(err) = run(args).await {
        dkerr!(err, "webhook failed");
        std::process::exit(1);
    }
}
