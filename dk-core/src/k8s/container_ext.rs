use super::*;
use crate::prelude::*;

// The add_* helpers are idempotent and report whether the container changed
impl ContainerExt for corev1::Container {
    fn has_volume_mount(&self, volume_name: &str, mount_path: &str) -> bool {
        self.volume_mounts
            .iter()
            .flatten()
            .any(|vm| vm.name == volume_name && vm.mount_path == mount_path)
    }

    fn add_volume_mount(&mut self, mount: corev1::VolumeMount) -> bool {
        if self.has_volume_mount(&mount.name, &mount.mount_path) {
            return false;
        }
        self.volume_mounts.get_or_insert_default().push(mount);
        true
    }

    fn has_env(&self, name: &str) -> bool {
        self.env.iter().flatten().any(|e| e.name == name)
    }

    fn add_env(&mut self, env: corev1::EnvVar) -> bool {
        if self.has_env(&env.name) {
            return false;
        }
        self.env.get_or_insert_default().push(env);
        true
    }
}
