pub mod constants;
pub mod dynakube;
pub mod errors;
pub mod image_ref;
pub mod k8s;
pub mod logging;
pub mod macros;
pub mod namespace_mapper;

pub mod prelude {
    pub use dk_api::latest::DynaKube;
    pub use k8s_openapi::api::core::v1 as corev1;
    pub use k8s_openapi::apimachinery::pkg::apis::meta::v1 as metav1;
    pub use kube::ResourceExt;

    pub use crate::constants::*;
    pub use crate::dynakube::{
        DynaKubeExt,
        DynaKubeNames,
    };
    pub use crate::errors::EmptyResult;
    pub use crate::k8s::{
        ContainerExt,
        KubeResourceExt,
        PodExt,
    };
}
