use dk_api::{
    ConversionError,
    VersionedDynaKube,
};
use kube::core::Status;
use kube::core::conversion::{
    ConversionRequest,
    ConversionResponse,
    ConversionReview,
};
use rocket::serde::json::Json;
use serde_json::Value;
use tracing::*;

const CONVERSION_FAILED_REASON: &str = "ConversionFailed";

pub fn convert_objects(objects: Vec<Value>, desired_api_version: &str) -> Result<Vec<Value>, ConversionError> {
    objects
        .into_iter()
        .map(|obj| VersionedDynaKube::from_value(obj)?.convert(desired_api_version)?.into_value())
        .collect()
}

// Conversion failures are server-side errors
fn failure_status(err: &ConversionError) -> Status {
    let mut status = Status::failure(&err.to_string(), CONVERSION_FAILED_REASON);
    status.code = 500;
    status
}

#[rocket::post("/convert", data = "<body>")]
#[instrument(parent=None, skip_all)]
pub async fn handler(body: Json<ConversionReview>) -> Json<ConversionReview> {
    let req = match ConversionRequest::from_review(body.into_inner()) {
        Ok(r) => r,
        Err(err) => {
            error!("could not parse conversion review: {err:?}");
            let status = Status::failure(&err.to_string(), CONVERSION_FAILED_REASON);
            return Json(ConversionResponse::invalid(status).into_review());
        },
    };

    let desired = req.desired_api_version.clone();
    let objects = req.objects.clone();
    debug!("converting {} objects to {desired}", objects.len());

    let resp = ConversionResponse::for_request(req);
    let resp = match convert_objects(objects, &desired) {
        Ok(converted) => resp.success(converted),
        Err(err) => {
            error!("conversion to {desired} failed: {err}");
            resp.failure(failure_status(&err))
        },
    };
    Json(resp.into_review())
}

#[cfg(test)]
mod tests;
