//! Component source selectors: git, github, gitlab, image
//!
//! At most one selector is expected per component. Whatever is present is
//! copied; rejecting multiples is left to validation and the vendor.

use super::value::{self, Block, block_list};
use crate::wire::{ComponentBase, GitHostedSource, GitSource, ImageSource, RegistryType};
use serde_json::{Map, Value, json};

pub(crate) const SELECTORS: [&str; 4] = ["git", "github", "gitlab", "image"];

pub(crate) fn expand_into(block: &Block, base: &mut ComponentBase) {
    base.git = value::single(block, "git").map(expand_git);
    base.github = value::single(block, "github").map(expand_hosted);
    base.gitlab = value::single(block, "gitlab").map(expand_hosted);
    base.image = value::single(block, "image").map(expand_image);
}

pub(crate) fn flatten_into(base: &ComponentBase, out: &mut Map<String, Value>) {
    out.insert(
        "git".to_string(),
        block_list(base.git.as_ref().map(|git| {
            json!({
                "repo_clone_url": git.repo_clone_url,
                "branch": git.branch,
            })
        })),
    );
    out.insert("github".to_string(), block_list(base.github.as_ref().map(flatten_hosted)));
    out.insert("gitlab".to_string(), block_list(base.gitlab.as_ref().map(flatten_hosted)));
    out.insert(
        "image".to_string(),
        block_list(base.image.as_ref().map(|image| {
            json!({
                "registry_type": image.registry_type.as_str(),
                "registry": image.registry,
                "repository": image.repository,
                "tag": image.tag,
            })
        })),
    );
}

fn expand_git(block: &Block) -> GitSource {
    GitSource {
        repo_clone_url: value::string(block, "repo_clone_url"),
        branch: value::string(block, "branch"),
    }
}

fn expand_hosted(block: &Block) -> GitHostedSource {
    GitHostedSource {
        repo: value::string(block, "repo"),
        branch: value::string(block, "branch"),
        deploy_on_push: value::boolean(block, "deploy_on_push"),
    }
}

fn flatten_hosted(source: &GitHostedSource) -> Value {
    json!({
        "repo": source.repo,
        "branch": source.branch,
        "deploy_on_push": source.deploy_on_push,
    })
}

fn expand_image(block: &Block) -> ImageSource {
    ImageSource {
        registry_type: RegistryType::lenient(&value::string(block, "registry_type"))
            .unwrap_or(RegistryType::Unspecified),
        registry: value::string(block, "registry"),
        repository: value::string(block, "repository"),
        tag: value::string(block, "tag"),
    }
}
