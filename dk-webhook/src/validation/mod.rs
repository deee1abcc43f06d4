mod rules;
mod validation_store;
mod validator;

use dk_api::VersionedDynaKube;
use dk_core::prelude::*;
use kube::api::DynamicObject;
use kube::core::admission::{
    AdmissionRequest,
    AdmissionResponse,
    AdmissionReview,
    Operation,
};
use rocket::serde::json::Json;
use tracing::*;

use self::validation_store::VALIDATORS;
use crate::context::WebhookContext;

// Everything a rule may look at besides the DynaKube itself
pub struct ValidationContext {
    pub client: kube::Client,
    pub csi_driver_enabled: bool,
    pub old_dynakube: Option<DynaKube>,
}

// One route per served version; the object's own apiVersion decides how it's decoded, and every
// rule runs against the hub version
#[rocket::post("/validate-dynatrace-com-v1beta3-dynakube", data = "<body>")]
#[instrument(parent=None, skip_all)]
pub async fn handler_v1beta3(
    ctx: &rocket::State<WebhookContext>,
    body: Json<AdmissionReview<DynamicObject>>,
) -> Json<AdmissionReview<DynamicObject>> {
    Json(review(ctx, body.into_inner()).await)
}

#[rocket::post("/validate-dynatrace-com-v1beta4-dynakube", data = "<body>")]
#[instrument(parent=None, skip_all)]
pub async fn handler_v1beta4(
    ctx: &rocket::State<WebhookContext>,
    body: Json<AdmissionReview<DynamicObject>>,
) -> Json<AdmissionReview<DynamicObject>> {
    Json(review(ctx, body.into_inner()).await)
}

#[rocket::post("/validate-dynatrace-com-v1beta5-dynakube", data = "<body>")]
#[instrument(parent=None, skip_all)]
pub async fn handler_v1beta5(
    ctx: &rocket::State<WebhookContext>,
    body: Json<AdmissionReview<DynamicObject>>,
) -> Json<AdmissionReview<DynamicObject>> {
    Json(review(ctx, body.into_inner()).await)
}

pub async fn review(ctx: &WebhookContext, body: AdmissionReview<DynamicObject>) -> AdmissionReview<DynamicObject> {
    let req: AdmissionRequest<_> = match body.try_into() {
        Ok(r) => r,
        Err(err) => {
            error!("could not parse request: {err:?}");
            return AdmissionResponse::invalid(err).into_review();
        },
    };

    let resp = AdmissionResponse::from(&req);
    if !matches!(req.operation, Operation::Create | Operation::Update) {
        return resp.into_review();
    }

    admit_dynakube(ctx, resp, &req).await.into_review()
}

fn to_hub(obj: &DynamicObject) -> anyhow::Result<DynaKube> {
    let value = serde_json::to_value(obj)?;
    Ok(VersionedDynaKube::from_value(value)?.into_hub()?)
}

#[instrument(skip_all, fields(dynakube = format!("{}/{}", req.namespace.clone().unwrap_or_default(), req.name)))]
pub async fn admit_dynakube(
    ctx: &WebhookContext,
    mut resp: AdmissionResponse,
    req: &AdmissionRequest<DynamicObject>,
) -> AdmissionResponse {
    let Some(obj) = &req.object else {
        return resp;
    };

    let dk = match to_hub(obj) {
        Ok(dk) => dk,
        Err(err) => {
            error!("could not decode DynaKube: {err:?}");
            return resp.deny(err);
        },
    };

    // An old object we can't decode only disables the update-only rules
    let old_dynakube = req.old_object.as_ref().and_then(|old| match to_hub(old) {
        Ok(old) => Some(old),
        Err(err) => {
            warn!("could not decode previous DynaKube: {err:?}");
            None
        },
    });

    let vctx = ValidationContext {
        client: ctx.client.clone(),
        csi_driver_enabled: ctx.csi_driver_enabled,
        old_dynakube,
    };
    let result = VALIDATORS.validate(&vctx, &dk).await;

    if !result.warnings.is_empty() {
        resp.warnings = Some(result.warnings);
    }
    if !result.errors.is_empty() {
        info!("rejecting DynaKube with {} errors", result.errors.len());
        return resp.deny(format!("{DYNAKUBE_KIND} {}: {}", dk.name_any(), result.errors.join("; ")));
    }

    info!("DynaKube is valid");
    resp
}

#[cfg(test)]
mod tests;
