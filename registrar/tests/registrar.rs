use std::{cell::Cell, io};

use artifact::{ModelArtifact, ModelFormat};
use model::LinearModel;
use ndarray::array;
use registrar::{
    ArtifactId, ArtifactRegistrar, ArtifactStore, MemoryStore, RegistrarConfig, RegistrarErr,
    RunMetadata, StoredArtifact,
};
use tempfile::tempdir;

fn artifact(format: ModelFormat) -> ModelArtifact {
    let model = LinearModel::new(array![[1.0, 2.0], [3.0, 4.0]], array![0.5, 0.25]).unwrap();
    ModelArtifact::encode(&model, format).unwrap()
}

/// A store that is never reachable and counts how often it was called.
struct DownStore {
    calls: Cell<usize>,
}

impl DownStore {
    fn fail(&self) -> RegistrarErr {
        self.calls.set(self.calls.get() + 1);
        RegistrarErr::StorageUnavailable(io::Error::new(
            io::ErrorKind::ConnectionRefused,
            "tracking server down",
        ))
    }
}

impl ArtifactStore for DownStore {
    fn put(&mut self, _: &ModelArtifact, _: &RunMetadata) -> registrar::Result<ArtifactId> {
        Err(self.fail())
    }

    fn get(&self, _: &ArtifactId) -> registrar::Result<StoredArtifact> {
        Err(self.fail())
    }
}

#[test]
fn file_registrar_round_trips_artifact_and_params() {
    let root = tempdir().unwrap();
    let config = RegistrarConfig::new(format!("file://{}", root.path().display()))
        .with_artifact_path("np_model");
    let mut registrar = ArtifactRegistrar::open(config).unwrap();

    for format in ModelFormat::ALL {
        let metadata = RunMetadata::new()
            .with_param("features", 2)
            .with_param("labels", 2);
        let id = registrar.store(&artifact(format), metadata.clone()).unwrap();

        let stored = registrar.retrieve_with_metadata(&id).unwrap();
        assert_eq!(stored.artifact, artifact(format));
        assert_eq!(stored.metadata, metadata);
        assert_eq!(registrar.retrieve(&id).unwrap().decode().unwrap().in_features(), 2);
    }
}

#[test]
fn retrieve_by_parsed_id_from_new_registrar() {
    let root = tempdir().unwrap();
    let uri = format!("file://{}", root.path().display());

    let id = ArtifactRegistrar::open(RegistrarConfig::new(uri.clone()))
        .unwrap()
        .store(&artifact(ModelFormat::Native), RunMetadata::new())
        .unwrap()
        .to_string();

    let registrar = ArtifactRegistrar::open(RegistrarConfig::new(uri)).unwrap();
    let artifact = registrar.retrieve(&id.parse().unwrap()).unwrap();
    assert_eq!(artifact.format(), ModelFormat::Native);
}

#[test]
fn memory_registrar_reports_not_found() {
    let registrar = ArtifactRegistrar::open(RegistrarConfig::new("memory://")).unwrap();
    let id = ArtifactId::new("0", "nope");

    assert!(matches!(
        registrar.retrieve(&id),
        Err(RegistrarErr::NotFound(got)) if got == id
    ));
}

#[test]
fn store_failures_pass_through_without_retry() {
    let config = RegistrarConfig::new("memory://");
    let mut registrar = ArtifactRegistrar::with_store(
        config,
        DownStore {
            calls: Cell::new(0),
        },
    );

    let err = registrar
        .store(&artifact(ModelFormat::Native), RunMetadata::new())
        .unwrap_err();
    assert!(matches!(
        err,
        RegistrarErr::StorageUnavailable(ref e) if e.kind() == io::ErrorKind::ConnectionRefused
    ));

    let err = registrar.retrieve(&ArtifactId::new("0", "x")).unwrap_err();
    assert!(matches!(err, RegistrarErr::StorageUnavailable(_)));

    assert_eq!(registrar.backend().calls.get(), 2);
}

#[test]
fn registrar_over_memory_store_generates_distinct_ids() {
    let mut registrar =
        ArtifactRegistrar::with_store(RegistrarConfig::new("memory://"), MemoryStore::new("0"));

    let a = registrar
        .store(&artifact(ModelFormat::Native), RunMetadata::new())
        .unwrap();
    let b = registrar
        .store(&artifact(ModelFormat::Native), RunMetadata::new())
        .unwrap();

    assert_ne!(a, b);
    assert_eq!(a.experiment_id(), "0");
}
