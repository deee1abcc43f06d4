pub mod activegate;
pub mod general;
pub mod modules;
pub mod oneagent;
pub mod proxy;
pub mod selectors;

use dk_api::latest::ImageRefSpec;

fn is_set(s: Option<&String>) -> bool {
    s.is_some_and(|s| !s.is_empty())
}

fn has_repository_and_tag(image_ref: Option<&ImageRefSpec>) -> bool {
    image_ref.is_some_and(|i| is_set(i.repository.as_ref()) && is_set(i.tag.as_ref()))
}

#[cfg(test)]
mod tests;
