use dk_api::{
    v1beta3,
    v1beta4,
    v1beta5,
};
use kube::CustomResourceExt;
use kube::core::crd::merge_crds;

fn main() {
    let crds = vec![v1beta3::DynaKube::crd(), v1beta4::DynaKube::crd(), v1beta5::DynaKube::crd()];
    let merged = merge_crds(crds, "v1beta5").unwrap();
    println!("---");
    println!("{}", serde_yaml::to_string(&merged).unwrap());
}
