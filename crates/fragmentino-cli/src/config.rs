mod defaults;

pub use defaults::DefaultsConfig;

use crate::cli::FragmentArgs;
use crate::error::{CliError, Result};
use fragmentino::engine::config as core_config;
use serde::Deserialize;
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialFragmentationConfig {
    #[serde(rename = "max-fragment-size")]
    max_fragment_size: Option<usize>,
    #[serde(rename = "bond-factor")]
    bond_factor: Option<f64>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialCappingConfig {
    enabled: Option<bool>,
    #[serde(rename = "scale-length")]
    scale_length: Option<bool>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialOrderingConfig {
    #[serde(rename = "center-first")]
    center_first: Option<bool>,
    #[serde(rename = "group-by-size")]
    group_by_size: Option<bool>,
}

/// Fragmentation settings as read from a TOML file, before command-line overrides and
/// built-in defaults are applied.
///
/// ```toml
/// [fragmentation]
/// max-fragment-size = 10
/// bond-factor = 1.3
///
/// [capping]
/// enabled = true
/// scale-length = true
///
/// [ordering]
/// center-first = false
/// group-by-size = false
/// ```
#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct PartialFragmentConfig {
    fragmentation: Option<PartialFragmentationConfig>,
    capping: Option<PartialCappingConfig>,
    ordering: Option<PartialOrderingConfig>,
}

impl PartialFragmentConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    /// Reads `path` if given, otherwise starts from an empty configuration.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Resolves the final configuration. Command-line values win over `--set` values,
    /// which win over the file, which wins over `defaults`.
    pub fn merge_with_cli(
        mut self,
        args: &FragmentArgs,
        defaults: &DefaultsConfig,
    ) -> Result<core_config::FragmentationConfig> {
        self.apply_set_values(&args.set_values)?;

        let fragmentation = self.fragmentation.take().unwrap_or_default();
        let capping = self.capping.take().unwrap_or_default();
        let ordering = self.ordering.take().unwrap_or_default();

        let max_fragment_size = args
            .max_fragment_size
            .or(fragmentation.max_fragment_size)
            .ok_or_else(|| {
                CliError::Config(
                    "`fragmentation.max-fragment-size` is required either in the config file or via --max-fragment-size."
                        .to_string(),
                )
            })?;

        let cap_bonds = if args.no_cap {
            false
        } else {
            capping.enabled.unwrap_or(defaults.cap_bonds)
        };
        let center_first = args.center || ordering.center_first.unwrap_or(defaults.center_first);
        let group_by_size =
            args.group_by_size || ordering.group_by_size.unwrap_or(defaults.group_by_size);

        core_config::FragmentationConfigBuilder::new()
            .max_fragment_size(max_fragment_size)
            .bond_factor(
                args.bond_factor
                    .or(fragmentation.bond_factor)
                    .unwrap_or(defaults.bond_factor),
            )
            .cap_bonds(cap_bonds)
            .scale_cap_length(capping.scale_length.unwrap_or(defaults.scale_cap_length))
            .center_first(center_first)
            .group_by_size(group_by_size)
            .build()
            .map_err(|e| CliError::Config(e.to_string()))
    }

    fn apply_set_values(&mut self, set_values: &[String]) -> Result<()> {
        for kv_pair in set_values {
            let Some((key, value_str)) = kv_pair.split_once('=') else {
                return Err(CliError::Config(format!(
                    "Invalid --set format: '{}'. Expected KEY=VALUE.",
                    kv_pair
                )));
            };

            match key {
                "fragmentation.max-fragment-size" => {
                    self.fragmentation
                        .get_or_insert_with(Default::default)
                        .max_fragment_size = Some(parse_value(key, value_str)?);
                }
                "fragmentation.bond-factor" => {
                    self.fragmentation
                        .get_or_insert_with(Default::default)
                        .bond_factor = Some(parse_value(key, value_str)?);
                }
                "capping.enabled" => {
                    self.capping.get_or_insert_with(Default::default).enabled =
                        Some(parse_value(key, value_str)?);
                }
                "capping.scale-length" => {
                    self.capping
                        .get_or_insert_with(Default::default)
                        .scale_length = Some(parse_value(key, value_str)?);
                }
                "ordering.center-first" => {
                    self.ordering
                        .get_or_insert_with(Default::default)
                        .center_first = Some(parse_value(key, value_str)?);
                }
                "ordering.group-by-size" => {
                    self.ordering
                        .get_or_insert_with(Default::default)
                        .group_by_size = Some(parse_value(key, value_str)?);
                }
                _ => {
                    return Err(CliError::Config(format!(
                        "Unsupported configuration key for --set: '{}'",
                        key
                    )));
                }
            }
        }
        Ok(())
    }
}

fn parse_value<T: FromStr>(key: &str, value_str: &str) -> Result<T> {
    value_str.trim().parse().map_err(|_| {
        CliError::Config(format!(
            "Invalid {} value for {}: {}",
            std::any::type_name::<T>(),
            key,
            value_str
        ))
    })
}
