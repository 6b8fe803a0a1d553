use kube::core::{conversion::ConversionReview, response::StatusSummary};
use machine_api::review;
use serde_json::json;

fn review_for(desired_api_version: &str, objects: serde_json::Value) -> ConversionReview {
    serde_json::from_value(json!({
        "apiVersion": "apiextensions.k8s.io/v1",
        "kind": "ConversionReview",
        "request": {
            "uid": "705ab4f5-6393-4ae5-bb25-119f15e8f0db",
            "desiredAPIVersion": desired_api_version,
            "objects": objects,
        },
    }))
    .expect("hand-written reviews must parse")
}

#[test]
fn downgrade_moves_hub_fields_into_the_side_channel() {
    let review = review_for(
        "infra.hubspoke.dev/v1alpha2",
        json!([{
            "apiVersion": "infra.hubspoke.dev/v1beta1",
            "kind": "Machine",
            "metadata": {"name": "test-machine", "namespace": "default"},
            "spec": {
                "instanceType": "m5.large",
                "imageLookupBaseOS": "amazon-linux",
            },
        }]),
    );

    let response = review::convert(review);

    assert_eq!(response.result.status, Some(StatusSummary::Success));
    assert_eq!(response.uid, "705ab4f5-6393-4ae5-bb25-119f15e8f0db");

    let object = response
        .converted_objects
        .first()
        .expect("one object was sent");
    assert_eq!(object["apiVersion"], "infra.hubspoke.dev/v1alpha2");
    assert_eq!(object["kind"], "Machine");
    assert_eq!(object["spec"]["instanceType"], "m5.large");

    // Not representable in v1alpha2, parked in the annotation instead.
    assert!(object["spec"].get("imageLookupBaseOS").is_none());
    let annotations = &object["metadata"]["annotations"];
    assert!(
        annotations["restored-fields.hubspoke.dev/machine"]
            .as_str()
            .expect("payload must be a string annotation")
            .contains("amazon-linux")
    );
}

#[test]
fn upgrade_restores_fields_from_the_side_channel() {
    let review = review_for(
        "infra.hubspoke.dev/v1beta1",
        json!([{
            "apiVersion": "infra.hubspoke.dev/v1alpha2",
            "kind": "Machine",
            "metadata": {
                "name": "test-machine",
                "namespace": "default",
                "annotations": {
                    "restored-fields.hubspoke.dev/machine":
                        r#"{"format":1,"fields":{"imageLookupBaseOS":"amazon-linux"}}"#,
                },
            },
            "spec": {"instanceType": "m5.large"},
        }]),
    );

    let response = review::convert(review);

    assert_eq!(response.result.status, Some(StatusSummary::Success));
    let object = response
        .converted_objects
        .first()
        .expect("one object was sent");
    assert_eq!(object["apiVersion"], "infra.hubspoke.dev/v1beta1");
    assert_eq!(object["spec"]["imageLookupBaseOS"], "amazon-linux");
}

#[test]
fn desired_version_passes_objects_through() {
    let review = review_for(
        "infra.hubspoke.dev/v1beta1",
        json!([{
            "apiVersion": "infra.hubspoke.dev/v1beta1",
            "kind": "Machine",
            "metadata": {"name": "test-machine"},
            "spec": {"instanceType": "m5.large", "imageLookupBaseOS": "amazon-linux"},
        }]),
    );

    let response = review::convert(review);

    assert_eq!(response.result.status, Some(StatusSummary::Success));
    let object = response
        .converted_objects
        .first()
        .expect("one object was sent");
    assert_eq!(object["spec"]["imageLookupBaseOS"], "amazon-linux");
}

#[test]
fn unknown_desired_version_fails() {
    let review = review_for("infra.hubspoke.dev/v9", json!([]));

    let response = review::convert(review);

    assert_eq!(response.result.status, Some(StatusSummary::Failure));
    assert_eq!(response.result.code, 500);
    assert!(response.result.message.contains("infra.hubspoke.dev/v9"));
}

#[test]
fn wrong_kind_fails() {
    let review = review_for(
        "infra.hubspoke.dev/v1beta1",
        json!([{
            "apiVersion": "infra.hubspoke.dev/v1alpha2",
            "kind": "Cluster",
            "metadata": {"name": "not-a-machine"},
            "spec": {},
        }]),
    );

    let response = review::convert(review);

    assert_eq!(response.result.status, Some(StatusSummary::Failure));
    assert_eq!(response.result.code, 400);
    assert!(response.result.message.contains("\"Cluster\""));
}

#[test]
fn object_without_spec_fails() {
    let review = review_for(
        "infra.hubspoke.dev/v1beta1",
        json!([{
            "apiVersion": "infra.hubspoke.dev/v1alpha2",
            "kind": "Machine",
            "metadata": {"name": "test-machine"},
        }]),
    );

    let response = review::convert(review);

    assert_eq!(response.result.status, Some(StatusSummary::Failure));
    assert_eq!(response.result.code, 400);
    assert!(response.result.message.contains("\"spec\""));
}
