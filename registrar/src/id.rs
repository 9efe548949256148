use std::{collections::BTreeMap, fmt, io, str::FromStr};

use rand::Rng;

use crate::error::RegistrarErr;

/// Identifies a stored artifact by the experiment and run it was logged under.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArtifactId {
    experiment_id: String,
    run_id: String,
}

impl ArtifactId {
    pub fn new(experiment_id: impl Into<String>, run_id: impl Into<String>) -> Self {
        Self {
            experiment_id: experiment_id.into(),
            run_id: run_id.into(),
        }
    }

    /// Creates an id for a fresh run, its run id being 32 random lowercase hex characters.
    pub(crate) fn generate<R: Rng + ?Sized>(experiment_id: &str, rng: &mut R) -> Self {
        Self::new(experiment_id, format!("{:032x}", rng.random::<u128>()))
    }

    pub fn experiment_id(&self) -> &str {
        &self.experiment_id
    }

    pub fn run_id(&self) -> &str {
        &self.run_id
    }
}

impl fmt::Display for ArtifactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.experiment_id, self.run_id)
    }
}

/// Whether `part` can be used as a single directory or file name inside a store.
pub(crate) fn is_path_segment(part: &str) -> bool {
    !part.is_empty() && part != "." && part != ".." && !part.contains(['/', '\\'])
}

/// Rejects a name that would end up outside its directory once joined into a store path.
///
/// # Arguments
/// * `what` - What the name is used as, for the error message.
/// * `part` - The name to check.
pub(crate) fn check_path_segment(what: &str, part: &str) -> Result<(), RegistrarErr> {
    if !is_path_segment(part) {
        return Err(RegistrarErr::StorageUnavailable(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("invalid {what} `{part}`"),
        )));
    }

    Ok(())
}

impl FromStr for ArtifactId {
    type Err = RegistrarErr;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || RegistrarErr::InvalidId(s.to_string());
        let (experiment_id, run_id) = s.split_once('/').ok_or_else(invalid)?;

        if !is_path_segment(experiment_id) || !is_path_segment(run_id) {
            return Err(invalid());
        }

        Ok(Self::new(experiment_id, run_id))
    }
}

/// Free-form run parameters stored next to an artifact.
///
/// Values are kept as strings, whatever they were logged as.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunMetadata {
    params: BTreeMap<String, String>,
}

impl RunMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_param(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl ToString) {
        self.params.insert(key.into(), value.to_string());
    }

    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// Iterates the parameters in key order.
    pub fn params(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    #[test]
    fn id_display_parses_back() {
        let id = ArtifactId::new("0", "3927b8108e2640219c5ca7801208fd56");
        assert_eq!(id.to_string(), "0/3927b8108e2640219c5ca7801208fd56");
        assert_eq!(id.to_string().parse::<ArtifactId>().unwrap(), id);
    }

    #[test]
    fn malformed_ids_are_rejected() {
        for s in ["", "0", "0/", "/abc", "0/a/b", "../abc", "0/..", "0/a\\b"] {
            assert!(
                matches!(s.parse::<ArtifactId>(), Err(RegistrarErr::InvalidId(_))),
                "{s} should not parse"
            );
        }
    }

    #[test]
    fn generated_run_ids_are_32_hex_chars() {
        let mut rng = StdRng::seed_from_u64(3);
        let id = ArtifactId::generate("0", &mut rng);

        assert_eq!(id.experiment_id(), "0");
        assert_eq!(id.run_id().len(), 32);
        assert!(id.run_id().chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
        assert_ne!(ArtifactId::generate("0", &mut rng), id);
    }

    #[test]
    fn metadata_stringifies_values() {
        let meta = RunMetadata::new()
            .with_param("features", 6)
            .with_param("labels", 3)
            .with_param("note", "linear");

        assert_eq!(meta.param("features"), Some("6"));
        assert_eq!(meta.param("labels"), Some("3"));
        assert_eq!(meta.len(), 3);
        assert_eq!(
            meta.params().map(|(k, _)| k).collect::<Vec<_>>(),
            vec!["features", "labels", "note"]
        );
    }
}
