use crate::core::models::types::AtomType;
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use thiserror::Error;

/// Single-type Lennard-Jones constants, before any mixing.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct TypeParams {
    pub sigma: f64,
    pub epsilon: f64,
}

impl TypeParams {
    pub fn new(sigma: f64, epsilon: f64) -> Self {
        Self { sigma, epsilon }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ParameterFile {
    types: HashMap<String, TypeParams>,
}

#[derive(Debug, Deserialize)]
struct TypeRecord {
    #[serde(rename = "type")]
    atom_type: String,
    sigma: f64,
    epsilon: f64,
}

#[derive(Debug, Error)]
pub enum ParamLoadError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
    #[error("CSV parsing error for '{path}': {source}")]
    Csv { path: String, source: csv::Error },
    #[error("Unknown atom type '{key}' in '{path}' (expected an integer or an element symbol)")]
    UnknownType { path: String, key: String },
    #[error("Atom type {atom_type} is defined more than once in '{path}'")]
    DuplicateType { path: String, atom_type: AtomType },
}

/// The user-supplied mapping from atom type to `{sigma, epsilon}`.
///
/// Parameter files come in two flavours, selected by extension:
///
/// - TOML (default), one table per type, keyed by atomic number or element symbol:
///
///   ```toml
///   [types.O]
///   sigma = 3.15
///   epsilon = 0.0067
///   ```
///
/// - CSV (`.csv`), with a `type,sigma,epsilon` header.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParameterSet {
    types: BTreeMap<AtomType, TypeParams>,
}

impl ParameterSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_type(mut self, atom_type: AtomType, params: TypeParams) -> Self {
        self.types.insert(atom_type, params);
        self
    }

    pub fn insert(&mut self, atom_type: AtomType, params: TypeParams) -> Option<TypeParams> {
        self.types.insert(atom_type, params)
    }

    pub fn get(&self, atom_type: AtomType) -> Option<&TypeParams> {
        self.types.get(&atom_type)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&AtomType, &TypeParams)> {
        self.types.iter()
    }

    pub fn as_map(&self) -> &BTreeMap<AtomType, TypeParams> {
        &self.types
    }

    pub fn load(path: &Path) -> Result<Self, ParamLoadError> {
        let is_csv = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
        if is_csv {
            Self::load_csv(path)
        } else {
            Self::load_toml(path)
        }
    }

    fn load_toml(path: &Path) -> Result<Self, ParamLoadError> {
        let path_str = path.to_string_lossy().to_string();
        let content = std::fs::read_to_string(path).map_err(|e| ParamLoadError::Io {
            path: path_str.clone(),
            source: e,
        })?;
        Self::parse_toml(&content, &path_str)
    }

    fn parse_toml(content: &str, path: &str) -> Result<Self, ParamLoadError> {
        let file: ParameterFile = toml::from_str(content).map_err(|e| ParamLoadError::Toml {
            path: path.to_string(),
            source: e,
        })?;
        let mut set = Self::new();
        for (key, params) in file.types {
            set.insert_checked(&key, params, path)?;
        }
        Ok(set)
    }

    fn load_csv(path: &Path) -> Result<Self, ParamLoadError> {
        let path_str = path.to_string_lossy().to_string();
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(path)
            .map_err(|e| ParamLoadError::Csv {
                path: path_str.clone(),
                source: e,
            })?;

        let mut set = Self::new();
        for result in reader.deserialize::<TypeRecord>() {
            let record = result.map_err(|e| ParamLoadError::Csv {
                path: path_str.clone(),
                source: e,
            })?;
            set.insert_checked(
                &record.atom_type,
                TypeParams::new(record.sigma, record.epsilon),
                &path_str,
            )?;
        }
        Ok(set)
    }

    fn insert_checked(
        &mut self,
        key: &str,
        params: TypeParams,
        path: &str,
    ) -> Result<(), ParamLoadError> {
        let atom_type: AtomType = key.parse().map_err(|_| ParamLoadError::UnknownType {
            path: path.to_string(),
            key: key.to_string(),
        })?;
        if self.types.insert(atom_type, params).is_some() {
            return Err(ParamLoadError::DuplicateType {
                path: path.to_string(),
                atom_type,
            });
        }
        Ok(())
    }
}

impl FromIterator<(AtomType, TypeParams)> for ParameterSet {
    fn from_iter<I: IntoIterator<Item = (AtomType, TypeParams)>>(iter: I) -> Self {
        Self {
            types: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn load_toml_accepts_numbers_and_symbols_as_keys() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("lj.toml");
        fs::write(
            &file_path,
            r#"
            [types.1]
            sigma = 2.0
            epsilon = 1.0e-6

            [types.O]
            sigma = 3.15
            epsilon = 0.0067
            "#,
        )
        .unwrap();

        let set = ParameterSet::load(&file_path).unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.get(AtomType(1)), Some(&TypeParams::new(2.0, 1.0e-6)));
        assert_eq!(set.get(AtomType(8)), Some(&TypeParams::new(3.15, 0.0067)));
    }

    #[test]
    fn load_toml_rejects_unknown_fields() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("lj.toml");
        fs::write(
            &file_path,
            "[types.1]\nsigma = 2.0\nepsilon = 1.0\nradius = 3.0\n",
        )
        .unwrap();
        let result = ParameterSet::load(&file_path);
        assert!(matches!(result, Err(ParamLoadError::Toml { .. })));
    }

    #[test]
    fn load_toml_rejects_unknown_type_keys() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("lj.toml");
        fs::write(&file_path, "[types.Qq]\nsigma = 2.0\nepsilon = 1.0\n").unwrap();
        let result = ParameterSet::load(&file_path);
        assert!(matches!(
            result,
            Err(ParamLoadError::UnknownType { ref key, .. }) if key == "Qq"
        ));
    }

    #[test]
    fn load_toml_rejects_same_type_under_two_keys() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("lj.toml");
        fs::write(
            &file_path,
            "[types.8]\nsigma = 3.0\nepsilon = 0.1\n[types.O]\nsigma = 3.0\nepsilon = 0.1\n",
        )
        .unwrap();
        let result = ParameterSet::load(&file_path);
        assert!(matches!(
            result,
            Err(ParamLoadError::DuplicateType {
                atom_type: AtomType(8),
                ..
            })
        ));
    }

    #[test]
    fn load_fails_for_missing_file() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("non_existent.toml");
        let result = ParameterSet::load(&file_path);
        assert!(matches!(result, Err(ParamLoadError::Io { .. })));
    }

    #[test]
    fn load_fails_for_malformed_toml() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("malformed.toml");
        fs::write(&file_path, "this is not toml").unwrap();
        let result = ParameterSet::load(&file_path);
        assert!(matches!(result, Err(ParamLoadError::Toml { .. })));
    }

    #[test]
    fn load_csv_succeeds_with_valid_records() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("lj.csv");
        fs::write(&file_path, "type,sigma,epsilon\nC, 3.4, 0.0028\n1,2.5,0.0013\n").unwrap();

        let set = ParameterSet::load(&file_path).unwrap();
        assert_eq!(set.get(AtomType(6)), Some(&TypeParams::new(3.4, 0.0028)));
        assert_eq!(set.get(AtomType(1)), Some(&TypeParams::new(2.5, 0.0013)));
    }

    #[test]
    fn load_csv_fails_for_malformed_rows() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("malformed.csv");
        fs::write(&file_path, "type,sigma,epsilon\nC,not-a-number,0.1\n").unwrap();
        let result = ParameterSet::load(&file_path);
        assert!(matches!(result, Err(ParamLoadError::Csv { .. })));
    }

    #[test]
    fn collected_sets_are_sorted_by_type() {
        let set: ParameterSet = [
            (AtomType(8), TypeParams::new(3.0, 0.1)),
            (AtomType(1), TypeParams::new(2.0, 0.01)),
        ]
        .into_iter()
        .collect();
        let types: Vec<_> = set.iter().map(|(t, _)| *t).collect();
        assert_eq!(types, vec![AtomType(1), AtomType(8)]);
    }
}
