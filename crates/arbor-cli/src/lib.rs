//! Commands behind the `arbor` binary.

use arbor_archive::{Archiver, Format};
use arbor_json::JsonArchiver;
use arbor_val::Container;
use arbor_xml::XmlArchiver;
use miette::{miette, IntoDiagnostic, Result, WrapErr};
use std::path::Path;

pub const DEFAULT_ROOT: &str = "root";

pub fn archiver_for(format: Format) -> Box<dyn Archiver> {
    match format {
        Format::Xml => Box::new(XmlArchiver::new()),
        Format::Json => Box::new(JsonArchiver::new()),
    }
}

/// An explicit format wins; otherwise the file extension decides. `flag`
/// names the option that sets the format, for the error hint.
pub fn resolve_format(explicit: Option<Format>, path: &Path, flag: &str) -> Result<Format> {
    match explicit.or_else(|| Format::from_path(path)) {
        Some(format) => Ok(format),
        None => Err(miette!(
            help = format!("pass the format explicitly, e.g. {} xml", flag),
            "cannot tell the format of {}",
            path.display()
        )),
    }
}

pub fn load(path: &Path, format: Format, root: &str) -> Result<Container> {
    let mut container = Container::new();
    archiver_for(format)
        .load_file(path, &mut container, root)
        .into_diagnostic()
        .wrap_err_with(|| format!("failed to load {} as {}", path.display(), format))?;
    Ok(container)
}

pub fn save(path: &Path, format: Format, container: &Container, root: &str) -> Result<()> {
    archiver_for(format)
        .save_file(path, container, root)
        .into_diagnostic()
        .wrap_err_with(|| format!("failed to save {} as {}", path.display(), format))
}

pub struct ConvertArgs<'a> {
    pub input: &'a Path,
    pub output: &'a Path,
    pub from: Option<Format>,
    pub to: Option<Format>,
    pub root: &'a str,
    pub out_root: Option<&'a str>,
}

/// Loads `input` and saves the same tree to `output`, returning the tree.
pub fn convert(args: &ConvertArgs) -> Result<Container> {
    let from = resolve_format(args.from, args.input, "--from")?;
    let to = resolve_format(args.to, args.output, "--to")?;
    let container = load(args.input, from, args.root)?;
    let out_root = args.out_root.unwrap_or(args.root);
    save(args.output, to, &container, out_root)?;
    tracing::info!(
        input = %args.input.display(),
        output = %args.output.display(),
        %from,
        %to,
        "converted"
    );
    Ok(container)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub containers: usize,
    pub attributes: usize,
}

impl Summary {
    pub fn of(container: &Container) -> Self {
        let mut summary = Summary {
            containers: 0,
            attributes: 0,
        };
        summary.add(container);
        summary
    }

    fn add(&mut self, container: &Container) {
        self.containers += 1;
        self.attributes += container.attribute_count();
        for (_, kid) in container.kids() {
            self.add(kid);
        }
    }
}

pub fn check(input: &Path, format: Option<Format>, root: &str) -> Result<Summary> {
    let format = resolve_format(format, input, "--format")?;
    let container = load(input, format, root)?;
    Ok(Summary::of(&container))
}

pub fn outline(input: &Path, format: Option<Format>, root: &str) -> Result<String> {
    let format = resolve_format(format, input, "--format")?;
    let container = load(input, format, root)?;
    Ok(container.outline(root))
}
