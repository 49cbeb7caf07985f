use crate::cli::EvaluateArgs;
use crate::error::{CliError, Result};
use ljbaseline::engine::config::{self as core_config, EvaluationConfig};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct PartialPotentialConfig {
    parameters_path: Option<PathBuf>,
    cutoff: Option<f64>,
    full_neighbor_list: Option<bool>,
    check_neighbor_list: Option<bool>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct PartialOutputConfig {
    per_atom: Option<bool>,
    energy_unit: Option<String>,
    length_unit: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialSelectionConfig {
    atoms: Option<Vec<usize>>,
}

/// The `evaluate` run configuration as read from TOML, before CLI overrides.
#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct PartialRunConfig {
    potential: Option<PartialPotentialConfig>,
    output: Option<PartialOutputConfig>,
    selection: Option<PartialSelectionConfig>,
}

impl PartialRunConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    /// Resolves the final configuration. Precedence: CLI flags, then `-S`
    /// settings, then the file, then defaults.
    pub fn merge_with_cli(mut self, args: &EvaluateArgs) -> Result<EvaluationConfig> {
        self.apply_set_values(&args.set_values)?;

        let potential = self.potential.take().unwrap_or_default();
        let output = self.output.take().unwrap_or_default();
        let selection = self.selection.take().unwrap_or_default();

        let parameters_path = args
            .parameters
            .clone()
            .or(potential.parameters_path)
            .ok_or_else(|| {
                CliError::Config(
                    "`potential.parameters-path` is required either in the config file or via --parameters."
                        .to_string(),
                )
            })?;
        let cutoff = args.cutoff.or(potential.cutoff).ok_or_else(|| {
            CliError::Config(
                "`potential.cutoff` is required either in the config file or via --cutoff."
                    .to_string(),
            )
        })?;

        let per_atom = args.per_atom
            || args.per_atom_output.is_some()
            || output.per_atom.unwrap_or(false);

        let mut builder = core_config::EvaluationConfigBuilder::new()
            .parameters_path(parameters_path)
            .cutoff(cutoff)
            .full_neighbor_list(
                args.full_neighbor_list || potential.full_neighbor_list.unwrap_or(false),
            )
            .check_neighbor_list(
                args.check_neighbor_list || potential.check_neighbor_list.unwrap_or(false),
            )
            .per_atom(per_atom)
            .selected_atoms(args.select.clone().or(selection.atoms));
        if let Some(unit) = output.energy_unit {
            builder = builder.energy_unit(unit);
        }
        if let Some(unit) = output.length_unit {
            builder = builder.length_unit(unit);
        }

        Ok(builder.build()?)
    }

    fn apply_set_values(&mut self, set_values: &[String]) -> Result<()> {
        for kv_pair in set_values {
            let (key, value_str) = kv_pair.split_once('=').ok_or_else(|| {
                CliError::Config(format!(
                    "Invalid --set format: '{}'. Expected KEY=VALUE.",
                    kv_pair
                ))
            })?;

            match key {
                "potential.parameters-path" => {
                    self.potential_mut().parameters_path = Some(PathBuf::from(value_str));
                }
                "potential.cutoff" => {
                    self.potential_mut().cutoff = Some(parse_value(key, value_str, "float")?);
                }
                "potential.full-neighbor-list" => {
                    self.potential_mut().full_neighbor_list =
                        Some(parse_value(key, value_str, "boolean")?);
                }
                "potential.check-neighbor-list" => {
                    self.potential_mut().check_neighbor_list =
                        Some(parse_value(key, value_str, "boolean")?);
                }
                "output.per-atom" => {
                    self.output_mut().per_atom = Some(parse_value(key, value_str, "boolean")?);
                }
                "output.energy-unit" => {
                    self.output_mut().energy_unit = Some(value_str.to_string());
                }
                "output.length-unit" => {
                    self.output_mut().length_unit = Some(value_str.to_string());
                }
                "selection.atoms" => {
                    let atoms = value_str
                        .split(',')
                        .map(str::trim)
                        .filter(|s| !s.is_empty())
                        .map(|s| parse_value(key, s, "integer"))
                        .collect::<Result<Vec<usize>>>()?;
                    self.selection
                        .get_or_insert_with(Default::default)
                        .atoms = Some(atoms);
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

    fn potential_mut(&mut self) -> &mut PartialPotentialConfig {
        self.potential.get_or_insert_with(Default::default)
    }

    fn output_mut(&mut self) -> &mut PartialOutputConfig {
        self.output.get_or_insert_with(Default::default)
    }
}

fn parse_value<T: FromStr>(key: &str, value: &str, kind: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| CliError::Config(format!("Invalid {} value for {}: {}", kind, key, value)))
}
