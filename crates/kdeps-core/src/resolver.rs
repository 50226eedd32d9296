//! Recursive collection of kustomization inputs
//!
//! The resolver walks a kustomization tree depth-first and records every
//! input it reads into a [`DependencyAccumulator`]:
//!
//! - the kustomization file of every visited directory
//! - file resources, CRDs, configurations and the OpenAPI schema
//! - generator file and env sources
//! - patch files
//! - every file of each referenced helm chart, plus its values files
//!
//! Directory resources and components are resolved as nested kustomizations.
//! References that do not exist locally are recorded as non-file
//! dependencies. Any error aborts the walk.

use kdeps_fs::{FileSystem, NormalizedPath};
use tracing::debug;

use crate::accumulator::DependencyAccumulator;
use crate::classify::{ResourceKind, classify};
use crate::error::{Error, Result};
use crate::kustomization::{self, GeneratorArgs, KUSTOMIZATION_FILE_NAMES, Kustomization};

/// Chart home used when a kustomization declares none.
pub const DEFAULT_CHART_HOME: &str = "charts";

/// Immutable settings for a [`Resolver`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolverOptions {
    /// Kustomization file names probed in each directory, in order.
    pub kustomization_file_names: &'static [&'static str],
    /// Chart home, relative to each kustomization directory.
    pub default_chart_home: &'static str,
}

impl Default for ResolverOptions {
    fn default() -> Self {
        Self {
            kustomization_file_names: KUSTOMIZATION_FILE_NAMES,
            default_chart_home: DEFAULT_CHART_HOME,
        }
    }
}

/// Walks kustomization trees on one filesystem.
///
/// Keeps the chain of directories currently being resolved so that a
/// directory reachable from itself is reported instead of recursing forever.
/// Shared sub-trees reached through different references are walked once per
/// reference.
pub struct Resolver<'a> {
    fs: &'a dyn FileSystem,
    options: ResolverOptions,
    stack: Vec<NormalizedPath>,
}

impl<'a> Resolver<'a> {
    pub fn new(fs: &'a dyn FileSystem) -> Self {
        Self::with_options(fs, ResolverOptions::default())
    }

    pub fn with_options(fs: &'a dyn FileSystem, options: ResolverOptions) -> Self {
        Self {
            fs,
            options,
            stack: Vec::new(),
        }
    }

    /// Record every input of the kustomization rooted at `root`.
    pub fn resolve(&mut self, acc: &mut DependencyAccumulator, root: &NormalizedPath) -> Result<()> {
        if self.stack.contains(root) {
            let mut chain = self.stack.clone();
            chain.push(root.clone());
            return Err(Error::KustomizationCycle {
                dir: root.clone(),
                chain,
            });
        }

        self.stack.push(root.clone());
        let result = self.resolve_dir(acc, root);
        self.stack.pop();
        result
    }

    fn resolve_dir(&mut self, acc: &mut DependencyAccumulator, root: &NormalizedPath) -> Result<()> {
        let (path, k) = kustomization::load(self.fs, root, self.options.kustomization_file_names)?;
        debug!(dir = %root, file = %path, depth = self.stack.len(), "Resolving kustomization");
        acc.record_file(path);

        if let Some(openapi) = k.openapi.path.as_deref().filter(|p| !p.is_empty()) {
            acc.record_file(root.join(openapi));
        }

        for reference in k.resources.iter().chain(k.components.iter()) {
            self.collect_resource(acc, root, reference)?;
        }

        for configuration in &k.configurations {
            acc.record_file(root.join(configuration));
        }

        for crd in &k.crds {
            self.collect_classified(acc, root, crd)?;
        }

        for generator in k.generators() {
            self.collect_generator(acc, root, generator)?;
        }

        for patch in k.patches.iter().filter_map(|p| p.path.as_deref()) {
            if !patch.is_empty() {
                acc.record_file(root.join(patch));
            }
        }
        for patch in k.strategic_merge_paths() {
            acc.record_file(root.join(patch));
        }

        self.collect_charts(acc, root, &k)
    }

    fn collect_resource(
        &mut self,
        acc: &mut DependencyAccumulator,
        root: &NormalizedPath,
        reference: &str,
    ) -> Result<()> {
        let resolved = root.join(reference);
        match classify(self.fs, &resolved)? {
            ResourceKind::File => {
                acc.record_file(resolved);
            }
            ResourceKind::Directory => {
                debug!(from = %root, to = %resolved, "Descending into nested kustomization");
                self.resolve(acc, &resolved)?;
            }
            ResourceKind::Remote => {
                acc.record_remote(reference);
            }
        }
        Ok(())
    }

    /// Record a local path as a file. Anything else keeps its declared
    /// spelling, so URLs survive unmangled.
    fn collect_classified(
        &self,
        acc: &mut DependencyAccumulator,
        root: &NormalizedPath,
        declared: &str,
    ) -> Result<()> {
        let resolved = root.join(declared);
        match classify(self.fs, &resolved)? {
            ResourceKind::Remote => {
                acc.record_remote(declared);
            }
            ResourceKind::File | ResourceKind::Directory => {
                acc.record_file(resolved);
            }
        }
        Ok(())
    }

    fn collect_generator(
        &self,
        acc: &mut DependencyAccumulator,
        root: &NormalizedPath,
        args: &GeneratorArgs,
    ) -> Result<()> {
        for source in args.file_paths().chain(args.envs.iter().map(String::as_str)) {
            self.collect_classified(acc, root, source)?;
        }
        Ok(())
    }

    fn collect_charts(
        &self,
        acc: &mut DependencyAccumulator,
        root: &NormalizedPath,
        k: &Kustomization,
    ) -> Result<()> {
        if k.helm_charts.is_empty() {
            return Ok(());
        }

        let chart_home = match k
            .helm_globals
            .as_ref()
            .and_then(|g| g.chart_home.as_deref())
            .filter(|home| !home.is_empty())
        {
            Some(home) => root.join(home),
            None => root.join(self.options.default_chart_home),
        };

        for chart in &k.helm_charts {
            let chart_dir = chart_home.join(&chart.name);
            let files = self.fs.walk_files(&chart_dir)?;
            debug!(chart = %chart.name, dir = %chart_dir, files = files.len(), "Collected chart");
            for file in files {
                acc.record_file(file);
            }

            // Missing values files are still inputs: creating one changes the build
            for values in &chart.additional_values_files {
                acc.record_file(root.join(values));
            }
            if let Some(values) = chart.values_file.as_deref().filter(|v| !v.is_empty()) {
                acc.record_file(root.join(values));
            }
        }
        Ok(())
    }
}

/// Resolve the tree rooted at `root` with default options.
pub fn resolve(acc: &mut DependencyAccumulator, fs: &dyn FileSystem, root: &NormalizedPath) -> Result<()> {
    Resolver::new(fs).resolve(acc, root)
}
