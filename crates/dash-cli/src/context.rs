use std::ops::Deref;

use anyhow::Context;
use dash_config::DashConfig;
use dash_registry::Registry;
use dash_view::Selection;

use crate::bootstrap;
use crate::cli::GlobalFlags;

/// Registry backing a run: the builtin dataset or one loaded from disk.
pub enum LoadedRegistry {
    Builtin(&'static Registry),
    External(Registry),
}

impl Deref for LoadedRegistry {
    type Target = Registry;

    fn deref(&self) -> &Registry {
        match self {
            Self::Builtin(registry) => *registry,
            Self::External(registry) => registry,
        }
    }
}

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub config: DashConfig,
    pub registry: LoadedRegistry,
    pub selection: Selection,
}

impl AppContext {
    /// Load the dataset and resolve the selection.
    ///
    /// `--data` wins over `data.path`; with neither the builtin dataset is
    /// used.
    pub fn init(config: DashConfig, flags: &GlobalFlags) -> anyhow::Result<Self> {
        let data_path = flags.data.clone().or_else(|| {
            config
                .data
                .is_external()
                .then(|| config.data.path.clone().into())
        });

        let registry = match data_path {
            Some(path) => LoadedRegistry::External(
                Registry::from_path(&path)
                    .with_context(|| format!("failed to load dataset {}", path.display()))?,
            ),
            None => LoadedRegistry::Builtin(
                Registry::builtin().context("failed to load builtin dataset")?,
            ),
        };

        let selection = bootstrap::selection(flags, &config)?;
        for name in &selection.entities {
            if !registry.catalog().contains(name) {
                tracing::warn!(entity = %name, "selected company is not in the dataset");
            }
        }

        Ok(Self {
            config,
            registry,
            selection,
        })
    }
}

/// Emit warnings for likely mistyped env var keys that silently fell back to defaults.
pub fn warn_unconfigured(config: &DashConfig) {
    for warning in collect_unconfigured_warnings(config, std::env::vars()) {
        tracing::warn!("{warning}");
    }
}

fn collect_unconfigured_warnings<I>(config: &DashConfig, env: I) -> Vec<String>
where
    I: IntoIterator<Item = (String, String)>,
{
    let env_keys = env.into_iter().map(|(key, _)| key).collect::<Vec<_>>();

    let mut warnings = Vec::new();

    if !config.data.is_external() && has_single_underscore_key(&env_keys, "GAMEDASH_DATA") {
        warnings.push(
            "Dataset path appears default while GAMEDASH_DATA* env vars exist. Use double underscores (example: GAMEDASH_DATA__PATH)."
                .to_string(),
        );
    }

    if has_single_underscore_key(&env_keys, "GAMEDASH_GENERAL") {
        warnings.push(
            "GAMEDASH_GENERAL* env vars are only read with double underscores (example: GAMEDASH_GENERAL__FOCUS_COMPANY)."
                .to_string(),
        );
    }

    warnings
}

fn has_single_underscore_key(keys: &[String], prefix: &str) -> bool {
    keys.iter().any(|key| {
        key.strip_prefix(prefix)
            .is_some_and(|rest| rest.starts_with('_') && !rest.starts_with("__"))
    })
}
