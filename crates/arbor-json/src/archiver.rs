use crate::{decode, encode};
use arbor_archive::{read_text, ArchiveError, ArchiveResult, Archiver};
use arbor_val::Container;
use std::io::{Read, Write};

/// Output settings for [`JsonArchiver`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonOptions {
    /// Indented, multi-line output instead of a single line.
    pub pretty: bool,
}

impl Default for JsonOptions {
    fn default() -> Self {
        Self { pretty: true }
    }
}

#[derive(Debug, Clone, Default)]
pub struct JsonArchiver {
    options: JsonOptions,
}

impl JsonArchiver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: JsonOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &JsonOptions {
        &self.options
    }
}

impl Archiver for JsonArchiver {
    fn format_name(&self) -> &'static str {
        "JSON"
    }

    fn save(
        &self,
        sink: &mut dyn Write,
        container: &Container,
        root_name: &str,
    ) -> ArchiveResult<()> {
        let doc = encode::encode_document(container, root_name)?;
        let json = if self.options.pretty {
            serde_json::to_string_pretty(&doc)
        } else {
            serde_json::to_string(&doc)
        }
        .map_err(|e| ArchiveError::parse("JSON", e.to_string()))?;

        sink.write_all(json.as_bytes())?;
        if self.options.pretty {
            sink.write_all(b"\n")?;
        }
        sink.flush()?;
        tracing::debug!(root = root_name, bytes = json.len(), "saved JSON document");
        Ok(())
    }

    fn load(
        &self,
        source: &mut dyn Read,
        container: &mut Container,
        root_name: &str,
    ) -> ArchiveResult<()> {
        let json = read_text(source)?;
        *container = decode::decode_document(&json, root_name)?;
        tracing::debug!(root = root_name, bytes = json.len(), "loaded JSON document");
        Ok(())
    }
}
