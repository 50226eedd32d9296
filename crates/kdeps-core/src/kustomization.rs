//! Kustomization document model and loading
//!
//! Only the fields that name input files are modelled. Everything else in a
//! kustomization (transformers, images, replicas, ...) is accepted and
//! ignored.

use serde::{Deserialize, Deserializer};

use kdeps_fs::{EntryKind, FileSystem, NormalizedPath};

use crate::error::{Error, Result};

/// Recognized kustomization file names, in probe order.
pub const KUSTOMIZATION_FILE_NAMES: &[&str] =
    &["kustomization.yaml", "kustomization.yml", "Kustomization"];

pub const KUSTOMIZATION_KIND: &str = "Kustomization";
pub const KUSTOMIZATION_VERSION: &str = "kustomize.config.k8s.io/v1beta1";
pub const COMPONENT_KIND: &str = "Component";
pub const COMPONENT_VERSION: &str = "kustomize.config.k8s.io/v1alpha1";

/// A parsed kustomization document.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Kustomization {
    #[serde(default, deserialize_with = "nullable")]
    pub api_version: String,
    #[serde(default, deserialize_with = "nullable")]
    pub kind: String,

    #[serde(default, deserialize_with = "nullable")]
    pub resources: Vec<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub components: Vec<String>,
    /// Deprecated alias of `resources`.
    #[serde(default, deserialize_with = "nullable")]
    pub bases: Vec<String>,

    #[serde(default, deserialize_with = "nullable")]
    pub configurations: Vec<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub crds: Vec<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub openapi: OpenApi,

    #[serde(default, deserialize_with = "nullable")]
    pub config_map_generator: Vec<GeneratorArgs>,
    #[serde(default, deserialize_with = "nullable")]
    pub secret_generator: Vec<GeneratorArgs>,

    #[serde(default, deserialize_with = "nullable")]
    pub patches: Vec<Patch>,
    /// Deprecated alias of `patches`.
    #[serde(default, deserialize_with = "nullable")]
    pub patches_json6902: Vec<Patch>,
    #[serde(default, deserialize_with = "nullable")]
    pub patches_strategic_merge: Vec<String>,

    #[serde(default, deserialize_with = "nullable")]
    pub helm_charts: Vec<HelmChart>,
    #[serde(default)]
    pub helm_globals: Option<HelmGlobals>,
}

/// The `openapi` block; only `path` names a file.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct OpenApi {
    #[serde(default)]
    pub path: Option<String>,
}

/// Shared arguments of `configMapGenerator` and `secretGenerator` entries.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratorArgs {
    #[serde(default)]
    pub name: Option<String>,
    /// File sources, each `path` or `key=path`.
    #[serde(default, deserialize_with = "nullable")]
    pub files: Vec<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub envs: Vec<String>,
    /// Deprecated single env source, folded into `envs`.
    #[serde(default)]
    pub env: Option<String>,
}

impl GeneratorArgs {
    /// File-source paths with any `key=` prefix removed.
    pub fn file_paths(&self) -> impl Iterator<Item = &str> {
        self.files
            .iter()
            .map(|source| source.split_once('=').map_or(source.as_str(), |(_, path)| path))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Patch {
    #[serde(default)]
    pub path: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HelmChart {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub values_file: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub additional_values_files: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HelmGlobals {
    #[serde(default)]
    pub chart_home: Option<String>,
}

/// Treat an explicit YAML `null` like an absent key.
fn nullable<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Kustomization {
    /// Parse a kustomization document and apply default normalization.
    pub fn parse(path: &NormalizedPath, content: &[u8]) -> Result<Self> {
        let text = std::str::from_utf8(content).map_err(|e| Error::parse(path, e.to_string()))?;

        let mut kustomization = if text.trim().is_empty() {
            Self::default()
        } else {
            serde_yaml::from_str::<Self>(text).map_err(|e| Error::parse(path, e.to_string()))?
        };
        kustomization.fix();
        Ok(kustomization)
    }

    /// Backfill kind and apiVersion, and fold deprecated fields into their
    /// replacements.
    pub fn fix(&mut self) {
        if self.kind.is_empty() {
            self.kind = KUSTOMIZATION_KIND.to_string();
        }
        if self.api_version.is_empty() {
            self.api_version = if self.kind == COMPONENT_KIND {
                COMPONENT_VERSION.to_string()
            } else {
                KUSTOMIZATION_VERSION.to_string()
            };
        }

        self.resources.append(&mut self.bases);
        self.patches.append(&mut self.patches_json6902);

        for generator in self
            .config_map_generator
            .iter_mut()
            .chain(self.secret_generator.iter_mut())
        {
            if let Some(env) = generator.env.take() {
                if !env.is_empty() {
                    generator.envs.push(env);
                }
            }
        }
    }

    /// All generator entries, config maps first.
    pub fn generators(&self) -> impl Iterator<Item = &GeneratorArgs> {
        self.config_map_generator
            .iter()
            .chain(self.secret_generator.iter())
    }

    /// `patchesStrategicMerge` entries that name a file rather than carry
    /// an inline patch.
    pub fn strategic_merge_paths(&self) -> impl Iterator<Item = &str> {
        self.patches_strategic_merge
            .iter()
            .map(|entry| entry.trim())
            .filter(|entry| !entry.is_empty() && !entry.contains('\n'))
    }
}

/// Find the single kustomization file in `dir`.
///
/// Each name in `file_names` is probed in order; a candidate matches when it
/// exists as a regular file.
pub fn locate(
    fs: &dyn FileSystem,
    dir: &NormalizedPath,
    file_names: &[&str],
) -> Result<NormalizedPath> {
    let mut found = Vec::new();
    for name in file_names {
        let candidate = dir.join(name);
        if fs.entry_kind(&candidate)? == Some(EntryKind::File) {
            found.push(candidate);
        }
    }

    match found.len() {
        0 => Err(Error::MissingKustomization {
            dir: dir.clone(),
            candidates: file_names.iter().map(|n| n.to_string()).collect(),
        }),
        1 => Ok(found.remove(0)),
        _ => Err(Error::AmbiguousKustomization {
            dir: dir.clone(),
            files: found,
        }),
    }
}

/// Locate, read and parse the kustomization in `dir`.
///
/// Returns the document's path together with the parsed document.
pub fn load(
    fs: &dyn FileSystem,
    dir: &NormalizedPath,
    file_names: &[&str],
) -> Result<(NormalizedPath, Kustomization)> {
    let path = locate(fs, dir, file_names)?;
    let content = fs.read(&path)?;
    let kustomization = Kustomization::parse(&path, &content)?;
    Ok((path, kustomization))
}
