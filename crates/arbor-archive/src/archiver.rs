use crate::error::{ArchiveError, ArchiveResult};
use arbor_val::{Container, Persist};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

/// A text format that can save and load [`Container`] trees.
///
/// Implementors provide [`save`](Archiver::save) and
/// [`load`](Archiver::load) against plain streams. Files, strings and
/// [`Persist`] objects are handled by the provided methods, which only
/// adapt their input and delegate.
///
/// Loading into a container replaces its contents. When a load fails the
/// container must be considered garbage; loading into a [`Persist`] object
/// never touches the object on failure.
pub trait Archiver {
    /// Short format name used in logs and errors, e.g. `"XML"`.
    fn format_name(&self) -> &'static str;

    /// Writes `container` as the top-level element `root_name`.
    fn save(
        &self,
        sink: &mut dyn Write,
        container: &Container,
        root_name: &str,
    ) -> ArchiveResult<()>;

    /// Reads a document whose top-level element is `root_name` into
    /// `container`. A different root name is an error.
    fn load(
        &self,
        source: &mut dyn Read,
        container: &mut Container,
        root_name: &str,
    ) -> ArchiveResult<()>;

    fn save_object(
        &self,
        sink: &mut dyn Write,
        object: &dyn Persist,
        root_name: &str,
    ) -> ArchiveResult<()> {
        self.save(sink, &object.to_container(), root_name)
    }

    /// Creates or truncates the file at `path` and saves into it.
    fn save_file(&self, path: &Path, container: &Container, root_name: &str) -> ArchiveResult<()> {
        tracing::debug!(
            format = self.format_name(),
            path = %path.display(),
            root = root_name,
            "saving file"
        );
        let file = File::create(path).map_err(|source| ArchiveError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let mut writer = BufWriter::new(file);
        self.save(&mut writer, container, root_name)?;
        writer.flush()?;
        Ok(())
    }

    fn save_file_object(
        &self,
        path: &Path,
        object: &dyn Persist,
        root_name: &str,
    ) -> ArchiveResult<()> {
        self.save_file(path, &object.to_container(), root_name)
    }

    fn save_string(&self, container: &Container, root_name: &str) -> ArchiveResult<String> {
        let mut buf = Vec::new();
        self.save(&mut buf, container, root_name)?;
        String::from_utf8(buf).map_err(|e| ArchiveError::Encoding(e.to_string()))
    }

    fn save_string_object(&self, object: &dyn Persist, root_name: &str) -> ArchiveResult<String> {
        self.save_string(&object.to_container(), root_name)
    }

    /// Loads into a scratch container and hands it to `object` only when the
    /// load succeeded.
    fn load_object(
        &self,
        source: &mut dyn Read,
        object: &mut dyn Persist,
        root_name: &str,
    ) -> ArchiveResult<()> {
        let mut container = Container::new();
        self.load(source, &mut container, root_name)?;
        object.from_container(&container);
        Ok(())
    }

    fn load_file(
        &self,
        path: &Path,
        container: &mut Container,
        root_name: &str,
    ) -> ArchiveResult<()> {
        tracing::debug!(
            format = self.format_name(),
            path = %path.display(),
            root = root_name,
            "loading file"
        );
        let file = File::open(path).map_err(|source| ArchiveError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let mut reader = BufReader::new(file);
        self.load(&mut reader, container, root_name)
    }

    fn load_file_object(
        &self,
        path: &Path,
        object: &mut dyn Persist,
        root_name: &str,
    ) -> ArchiveResult<()> {
        let mut container = Container::new();
        self.load_file(path, &mut container, root_name)?;
        object.from_container(&container);
        Ok(())
    }

    fn load_str(
        &self,
        text: &str,
        container: &mut Container,
        root_name: &str,
    ) -> ArchiveResult<()> {
        self.load(&mut text.as_bytes(), container, root_name)
    }

    fn load_str_object(
        &self,
        text: &str,
        object: &mut dyn Persist,
        root_name: &str,
    ) -> ArchiveResult<()> {
        self.load_object(&mut text.as_bytes(), object, root_name)
    }
}

/// Deepest child nesting any archiver saves or loads. The root element is
/// depth 0, so a chain of `MAX_DEPTH` nested children is still accepted.
pub const MAX_DEPTH: usize = 32;

/// Reads the whole of `source` as UTF-8 text.
pub fn read_text(source: &mut dyn Read) -> ArchiveResult<String> {
    let mut bytes = Vec::new();
    source.read_to_end(&mut bytes)?;
    String::from_utf8(bytes).map_err(|e| ArchiveError::Encoding(e.to_string()))
}

/// Fails with [`ArchiveError::RootMismatch`] unless `found` is `expected`.
pub fn check_root(expected: &str, found: &str) -> ArchiveResult<()> {
    if expected == found {
        Ok(())
    } else {
        Err(ArchiveError::root_mismatch(expected, found))
    }
}
