use crate::{reader, writer};
use arbor_archive::{read_text, ArchiveResult, Archiver};
use arbor_val::Container;
use std::io::{Read, Write};

/// Output settings for [`XmlArchiver`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlOptions {
    /// Spaces per nesting level; `None` writes the document on one line.
    pub indent: Option<usize>,
    /// Emit the `<?xml ...?>` declaration.
    pub declaration: bool,
}

impl Default for XmlOptions {
    fn default() -> Self {
        Self {
            indent: Some(2),
            declaration: true,
        }
    }
}

impl XmlOptions {
    pub fn compact() -> Self {
        Self {
            indent: None,
            declaration: false,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct XmlArchiver {
    options: XmlOptions,
}

impl XmlArchiver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: XmlOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &XmlOptions {
        &self.options
    }
}

impl Archiver for XmlArchiver {
    fn format_name(&self) -> &'static str {
        "XML"
    }

    fn save(
        &self,
        sink: &mut dyn Write,
        container: &Container,
        root_name: &str,
    ) -> ArchiveResult<()> {
        let xml = writer::write_document(container, root_name, &self.options)?;
        sink.write_all(xml.as_bytes())?;
        sink.flush()?;
        tracing::debug!(root = root_name, bytes = xml.len(), "saved XML document");
        Ok(())
    }

    fn load(
        &self,
        source: &mut dyn Read,
        container: &mut Container,
        root_name: &str,
    ) -> ArchiveResult<()> {
        let xml = read_text(source)?;
        *container = reader::read_document(&xml, root_name)?;
        tracing::debug!(root = root_name, bytes = xml.len(), "loaded XML document");
        Ok(())
    }
}
