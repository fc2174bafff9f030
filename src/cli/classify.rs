//! Positional argument classification and template load order.
//!
//! Positional arguments are split by extension: a path whose extension equals the
//! active decoder's tag (case-insensitively) is a data source, everything else is a
//! template source. The split never reorders arguments within a partition.
//!
//! Template sources and `--glob` occurrences are then interleaved back into the
//! order they were written on the command line, using the argument indices clap
//! records while parsing. Tera resolves `{% extends %}` when a template is added,
//! so that order decides which parents are visible to which children.

use std::path::{Path, PathBuf};

/// Positional arguments after classification.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassifiedArgs {
    /// Data source files, in command-line order
    pub data_files: Vec<PathBuf>,
    /// Template source files, in command-line order
    pub template_files: Vec<PathBuf>,
}

/// One step of template loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSource {
    /// A `--glob` pattern, expanded when it is reached
    Glob(String),
    /// An explicit template file
    File(PathBuf),
}

/// Whether `path` is a data source for the decoder tagged `tag`.
///
/// The extension is everything from the last `.` of the file name, so a file named
/// `.toml` counts as having the extension `.toml`.
#[must_use]
pub fn is_data_file(path: &Path, tag: &str) -> bool {
    let Some(file_name) = path.file_name().and_then(|name| name.to_str()) else {
        return false;
    };
    file_name
        .rfind('.')
        .is_some_and(|dot| file_name[dot + 1..].eq_ignore_ascii_case(tag))
}

/// Partition positional arguments into data files and template files.
///
/// Each partition is computed by its own pass over `args`, so both preserve the
/// original relative order and every argument lands in exactly one of them.
#[must_use]
pub fn classify(args: &[PathBuf], tag: &str) -> ClassifiedArgs {
    let data_files: Vec<PathBuf> =
        args.iter().filter(|arg| is_data_file(arg, tag)).cloned().collect();
    let template_files: Vec<PathBuf> =
        args.iter().filter(|arg| !is_data_file(arg, tag)).cloned().collect();

    tracing::debug!(
        "classified {} argument(s): {} data, {} template (tag '{}')",
        args.len(),
        data_files.len(),
        template_files.len(),
        tag
    );

    ClassifiedArgs {
        data_files,
        template_files,
    }
}

/// Rebuild the command-line order of globs and template files.
///
/// `globs` and `paths` pair each value with its argument index as recorded by the
/// parser. Paths that are data sources for `tag` are left out.
#[must_use]
pub fn load_order(
    globs: &[(usize, String)],
    paths: &[(usize, PathBuf)],
    tag: &str,
) -> Vec<TemplateSource> {
    let mut steps: Vec<(usize, TemplateSource)> = globs
        .iter()
        .map(|(index, pattern)| (*index, TemplateSource::Glob(pattern.clone())))
        .chain(
            paths
                .iter()
                .filter(|(_, path)| !is_data_file(path, tag))
                .map(|(index, path)| (*index, TemplateSource::File(path.clone()))),
        )
        .collect();

    // Indices are unique across arguments; a stable sort keeps ties (none expected) in place.
    steps.sort_by_key(|(index, _)| *index);
    steps.into_iter().map(|(_, step)| step).collect()
}
