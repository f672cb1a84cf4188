//! Zip-backed scene catalogues.
//!
//! A catalogue is a plain zip archive with one serialized scene per entry.
//! Single-scene files written by [`save_scene`] use the entry name `"scene"`;
//! [`open_scene`] accepts any single-entry archive regardless of the name.

use std::fs::File;
use std::io::{Read, Seek, Write};
use std::path::Path;

use zip::write::{FileOptions, SimpleFileOptions};
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use crate::decode::decode_scene;
use crate::encode::encode_scene;
use crate::error::{ScenewireError, ScenewireResult};
use crate::scene::Scene;

const SINGLE_SCENE_ENTRY: &str = "scene";

/// Streaming catalogue writer over any seekable sink.
pub struct CatalogueWriter<W: Write + Seek> {
    zip: ZipWriter<W>,
}

impl CatalogueWriter<File> {
    /// Creates a catalogue file at `path`, truncating any existing one.
    pub fn create(path: impl AsRef<Path>) -> ScenewireResult<Self> {
        Ok(Self::new(File::create(path)?))
    }
}

impl<W: Write + Seek> CatalogueWriter<W> {
    pub fn new(inner: W) -> Self {
        Self {
            zip: ZipWriter::new(inner),
        }
    }

    /// Encodes `scene` and appends it under `name`.
    #[tracing::instrument(skip(self, scene))]
    pub fn save(&mut self, name: &str, scene: &Scene) -> ScenewireResult<()> {
        let bytes = encode_scene(scene)?;
        let options: SimpleFileOptions =
            FileOptions::default().compression_method(CompressionMethod::Deflated);
        self.zip.start_file(name, options)?;
        self.zip.write_all(&bytes)?;
        Ok(())
    }

    /// Writes the archive trailer and hands back the sink.
    pub fn finish(self) -> ScenewireResult<W> {
        Ok(self.zip.finish()?)
    }
}

/// Catalogue reader over any seekable source.
pub struct CatalogueReader<R: Read + Seek> {
    zip: ZipArchive<R>,
}

impl CatalogueReader<File> {
    pub fn open(path: impl AsRef<Path>) -> ScenewireResult<Self> {
        Self::new(File::open(path)?)
    }
}

impl<R: Read + Seek> CatalogueReader<R> {
    pub fn new(inner: R) -> ScenewireResult<Self> {
        Ok(Self {
            zip: ZipArchive::new(inner)?,
        })
    }

    pub fn len(&self) -> usize {
        self.zip.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zip.is_empty()
    }

    /// Entry names in archive order.
    pub fn names(&self) -> Vec<String> {
        self.zip.file_names().map(str::to_owned).collect()
    }

    /// Loads and decodes the scene stored under `name`.
    #[tracing::instrument(skip(self))]
    pub fn load(&mut self, name: &str) -> ScenewireResult<Scene> {
        let mut entry = self.zip.by_name(name)?;
        let mut bytes = Vec::new();
        entry.read_to_end(&mut bytes)?;
        decode_scene(&bytes)
    }

    /// Loads the scene at archive position `index`.
    pub fn load_index(&mut self, index: usize) -> ScenewireResult<Scene> {
        let mut entry = self.zip.by_index(index)?;
        let mut bytes = Vec::new();
        entry.read_to_end(&mut bytes)?;
        decode_scene(&bytes)
    }
}

/// Writes `scene` as a single-scene catalogue file at `path`.
pub fn save_scene(path: impl AsRef<Path>, scene: &Scene) -> ScenewireResult<()> {
    let mut writer = CatalogueWriter::create(path)?;
    writer.save(SINGLE_SCENE_ENTRY, scene)?;
    writer.finish()?;
    Ok(())
}

/// Reads a single-scene catalogue file written by [`save_scene`].
///
/// Falls back to the first entry when none is called `"scene"`, so archives
/// produced by other tools still open.
pub fn open_scene(path: impl AsRef<Path>) -> ScenewireResult<Scene> {
    let mut reader = CatalogueReader::open(path)?;
    if reader.is_empty() {
        return Err(ScenewireError::catalogue("catalogue holds no scenes"));
    }
    if reader.names().iter().any(|n| n == SINGLE_SCENE_ENTRY) {
        reader.load(SINGLE_SCENE_ENTRY)
    } else {
        reader.load_index(0)
    }
}
