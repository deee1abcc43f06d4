use dk_testutils::*;
use rstest::*;

use super::*;
use crate::macros::*;

fn select_labels(dk: &mut DynaKube, key: &str, value: &str) {
    let sel = metav1::LabelSelector { match_labels: klabel!(key => value), ..Default::default() };
    dk.spec.one_agent.cloud_native_full_stack.as_mut().unwrap().app_injection.namespace_selector = Some(sel);
}

#[rstest]
#[case::operator_ns(TEST_OPERATOR_NAMESPACE, true)]
#[case::kube_system("kube-system", true)]
#[case::openshift("openshift-monitoring", true)]
#[case::user_ns(TEST_NAMESPACE, false)]
#[case::kube_prefix_without_dash("kubeflow", false)]
fn test_is_namespace_ignored(#[case] ns: &str, #[case] expected: bool) {
    assert_eq!(is_namespace_ignored(ns, TEST_OPERATOR_NAMESPACE), expected);
}

#[rstest]
fn test_selects_unset_selector(test_dynakube: DynaKube, test_namespace: corev1::Namespace) {
    assert!(selects(&test_dynakube, &test_namespace, InjectionCapability::OneAgent).unwrap());
    assert!(!selects(&test_dynakube, &test_namespace, InjectionCapability::Enrichment).unwrap());
}

#[rstest]
fn test_selects_label_mismatch(mut test_dynakube: DynaKube, test_namespace: corev1::Namespace) {
    select_labels(&mut test_dynakube, "team", "payments");
    for cap in InjectionCapability::ALL {
        assert!(!selects(&test_dynakube, &test_namespace, cap).unwrap());
    }
}

#[rstest]
fn test_find_dynakube_for_namespace(mut test_dynakube: DynaKube, mut test_namespace: corev1::Namespace) {
    let mut other = test_dynakube.clone();
    other.metadata.name = Some("other".into());
    select_labels(&mut test_dynakube, "team", "payments");
    select_labels(&mut other, "team", "search");
    test_namespace.labels_mut().insert("team".into(), "search".into());

    let dks = vec![test_dynakube, other];
    let res = find_dynakube_for_namespace(&test_namespace, &dks).unwrap().unwrap();
    assert_eq!(res.name_any(), "other");
}

#[rstest]
fn test_find_dynakube_for_namespace_conflict(test_dynakube: DynaKube, test_namespace: corev1::Namespace) {
    let mut other = test_dynakube.clone();
    other.metadata.name = Some("other".into());

    let dks = vec![test_dynakube, other];
    let err = find_dynakube_for_namespace(&test_namespace, &dks).unwrap_err().downcast().unwrap();
    assert!(matches!(err, NamespaceMapperError::ConflictingDynakubes(_)));
}

#[rstest]
fn test_find_dynakube_enrichment_only(mut test_dynakube: DynaKube, test_namespace: corev1::Namespace) {
    test_dynakube.spec.one_agent = Default::default();
    test_dynakube.spec.metadata_enrichment.enabled = Some(true);

    let dks = vec![test_dynakube];
    assert!(find_dynakube_for_namespace(&test_namespace, &dks).unwrap().is_some());
}

#[rstest]
fn test_find_conflicting_dynakubes(mut test_dynakube: DynaKube, test_namespace: corev1::Namespace) {
    let overlapping = {
        let mut dk = test_dynakube.clone();
        dk.metadata.name = Some("overlapping".into());
        dk
    };
    let disjoint = {
        let mut dk = test_dynakube.clone();
        dk.metadata.name = Some("disjoint".into());
        select_labels(&mut dk, "team", "payments");
        dk
    };
    select_labels(&mut test_dynakube, KUBERNETES_IO_METADATA_NAME_KEY, TEST_NAMESPACE);

    let others = vec![test_dynakube.clone(), overlapping, disjoint];
    let res = find_conflicting_dynakubes(&test_dynakube, &others, &[test_namespace]).unwrap();
    assert_eq!(res, vec!["overlapping"]);
}

#[rstest]
fn test_conflict_across_capabilities(mut test_dynakube: DynaKube, test_namespace: corev1::Namespace) {
    select_labels(&mut test_dynakube, KUBERNETES_IO_METADATA_NAME_KEY, TEST_NAMESPACE);
    let mut enrichment_only = test_dynakube.clone();
    enrichment_only.metadata.name = Some("enrichment-only".into());
    enrichment_only.spec.one_agent = Default::default();
    enrichment_only.spec.metadata_enrichment.enabled = Some(true);
    enrichment_only.spec.metadata_enrichment.namespace_selector = Some(metav1::LabelSelector {
        match_labels: klabel!(KUBERNETES_IO_METADATA_NAME_KEY => TEST_NAMESPACE),
        ..Default::default()
    });

    let dks = vec![test_dynakube.clone(), enrichment_only];
    let err = find_dynakube_for_namespace(&test_namespace, &dks).unwrap_err().downcast().unwrap();
    assert!(matches!(err, NamespaceMapperError::ConflictingDynakubes(_)));

    let res = find_conflicting_dynakubes(&test_dynakube, &dks, &[test_namespace]).unwrap();
    assert_eq!(res, vec!["enrichment-only"]);
}
