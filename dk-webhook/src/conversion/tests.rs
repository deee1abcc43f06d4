use dk_api::REMOVED_AUTO_UPDATE_ANNOTATION_KEY;
use dk_testutils::*;
use rstest::*;
use serde_json::json;

use super::*;

fn classic_v1beta3() -> Value {
    json!({
        "apiVersion": "dynatrace.com/v1beta3",
        "kind": "DynaKube",
        "metadata": {"name": TEST_DYNAKUBE, "namespace": TEST_OPERATOR_NAMESPACE},
        "spec": {
            "apiUrl": TEST_API_URL,
            "oneAgent": {"classicFullStack": {"autoUpdate": false, "args": ["--set-host-group=foo"]}},
        },
    })
}

fn review(desired: &str, objects: Vec<Value>) -> ConversionReview {
    serde_json::from_value(json!({
        "apiVersion": "apiextensions.k8s.io/v1",
        "kind": "ConversionReview",
        "request": {
            "uid": "conv-1234",
            "desiredAPIVersion": desired,
            "objects": objects,
        },
    }))
    .unwrap()
}

async fn convert(desired: &str, objects: Vec<Value>) -> Value {
    let resp = handler(Json(review(desired, objects))).await;
    serde_json::to_value(resp.0).unwrap()["response"].clone()
}

#[rstest]
#[tokio::test]
async fn test_convert_to_hub() {
    let resp = convert("dynatrace.com/v1beta5", vec![classic_v1beta3()]).await;

    assert_eq!(resp["uid"], "conv-1234");
    assert_eq!(resp["result"]["status"], "Success");

    let converted = &resp["convertedObjects"][0];
    assert_eq!(converted["apiVersion"], "dynatrace.com/v1beta5");
    assert_eq!(converted["spec"]["oneAgent"]["classicFullStack"]["args"], json!(["--set-host-group=foo"]));
    assert_eq!(converted["metadata"]["annotations"][REMOVED_AUTO_UPDATE_ANNOTATION_KEY], "false");
}

#[rstest]
#[tokio::test]
async fn test_convert_down_restores_removed_field() {
    let hub = convert("dynatrace.com/v1beta5", vec![classic_v1beta3()]).await["convertedObjects"][0].clone();

    let resp = convert("dynatrace.com/v1beta3", vec![hub]).await;

    let converted = &resp["convertedObjects"][0];
    assert_eq!(converted["apiVersion"], "dynatrace.com/v1beta3");
    assert_eq!(converted["spec"]["oneAgent"]["classicFullStack"]["autoUpdate"], false);
    assert!(converted["metadata"]["annotations"].is_null());
}

#[rstest]
#[tokio::test]
async fn test_convert_unsupported_version() {
    let resp = convert("dynatrace.com/v1alpha1", vec![classic_v1beta3()]).await;

    assert_eq!(resp["result"]["status"], "Failure");
    assert_eq!(resp["result"]["code"], 500);
    assert!(resp["result"]["message"].as_str().unwrap().contains("unsupported DynaKube apiVersion"));
    assert_eq!(resp["convertedObjects"].as_array().map(Vec::len).unwrap_or_default(), 0);
}

#[rstest]
fn test_convert_objects_same_version() {
    let obj = classic_v1beta3();
    let converted = convert_objects(vec![obj.clone()], "dynatrace.com/v1beta3").unwrap();
    assert_eq!(converted[0]["spec"]["apiUrl"], obj["spec"]["apiUrl"]);
    assert_eq!(converted[0]["apiVersion"], "dynatrace.com/v1beta3");
}
