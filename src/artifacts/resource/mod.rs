//! Resource kinds feeding the synchronization engine
//!
//! Every kind of external resource is turned into the same triple: the
//! category its repository lives under, the entity id, and the files the
//! repository should hold. The transform is pure; nothing here touches disk.

pub mod desired_files;

use crate::artifacts::location::category::{Category, KUSTOMIZATION_FILE};
use crate::artifacts::resource::desired_files::DesiredFiles;
use bytes::Bytes;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resource {
    /// Raw files mirrored as they are
    Worktree { id: String, files: DesiredFiles },
    /// Kustomize manifests keyed by file name; the kustomization itself is
    /// carried separately and written as `kustomization.yaml`
    KustomizeDeployment {
        id: String,
        kustomization: Option<Bytes>,
        manifests: BTreeMap<String, Bytes>,
    },
}

impl Resource {
    pub fn id(&self) -> &str {
        match self {
            Resource::Worktree { id, .. } | Resource::KustomizeDeployment { id, .. } => id,
        }
    }

    pub fn category(&self) -> Category {
        match self {
            Resource::Worktree { .. } => Category::Worktrees,
            Resource::KustomizeDeployment { .. } => Category::Deployments,
        }
    }

    pub fn desired_files(&self) -> DesiredFiles {
        match self {
            Resource::Worktree { files, .. } => files.clone(),
            Resource::KustomizeDeployment {
                kustomization,
                manifests,
                ..
            } => {
                let mut files = manifests
                    .iter()
                    .map(|(name, content)| (name.clone(), content.clone()))
                    .collect::<DesiredFiles>();
                if let Some(kustomization) = kustomization {
                    files.insert(KUSTOMIZATION_FILE, kustomization.clone());
                }
                files
            }
        }
    }
}
