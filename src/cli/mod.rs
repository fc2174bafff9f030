//! Command-line interface for tpl.
//!
//! `tpl` renders one template against structured data merged from files and
//! standard input:
//!
//! ```bash
//! # Template file plus TOML data
//! tpl hello.tmpl data.toml
//!
//! # YAML data piped in, output written to a file
//! cat values.yaml | tpl -d yaml -o config.ini config.ini.tmpl
//!
//! # Partials from a glob; --name picks the entry point
//! tpl -g 'partials/*.tmpl' -n page.tmpl site.toml
//!
//! # Keep the leading comment block of the existing output file
//! tpl -p -o deploy.sh deploy.sh.tmpl env.toml
//! ```
//!
//! # Run stages
//!
//! Every failure is labelled with the stage it happened in:
//! 1. `parse` - flags and positional arguments
//! 2. `load templates` - globs and template files, in command-line order
//! 3. `decode all` - data files, then standard input, merged into one context
//! 4. `select template` - `--name`, else the first template file
//! 5. `render` - Tera execution into memory
//! 6. `file write` - the whole document, in one step
//!
//! `--preserve-preamble` without `--output-file` is rejected before stage 2.

pub mod classify;

use std::ffi::OsString;
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{CommandFactory, FromArgMatches, Parser};

use crate::config::RenderConfig;
use crate::constants::{DEFAULT_SHELL_TIMEOUT_SECS, SHELL_TIMEOUT_ENV, version_line};
use crate::core::TplError;
use crate::data::{DataFormat, DataSources};
use crate::output::{OutputTarget, extract_preamble};
use crate::templating::{Renderer, TemplateRegistry, select_template};
use classify::{TemplateSource, classify, load_order};

/// Command-line arguments of `tpl`.
#[derive(Parser, Debug)]
#[command(
    name = "tpl",
    about = "Render templates against merged JSON, YAML or TOML data",
    long_about = "tpl renders a Tera template against data merged from data files and standard input.\n\n\
                  Positional arguments ending in the decoder's extension (default .toml) are data files; \
                  all others are template files."
)]
pub struct Cli {
    /// Template file glob, loaded where it appears among the template files.
    ///
    /// Can be given several times. Quote the pattern so the shell does not
    /// expand it.
    #[arg(short = 'g', long = "glob", value_name = "PATTERN")]
    globs: Vec<String>,

    /// Name of the template to execute.
    ///
    /// Defaults to the first template file. Required when templates come only
    /// from globs.
    #[arg(short, long)]
    name: Option<String>,

    /// Write the output to this file instead of standard output.
    ///
    /// The file is replaced only after rendering succeeded.
    #[arg(short, long = "output-file", value_name = "PATH")]
    output_file: Option<PathBuf>,

    /// Decoder for data files and standard input.
    ///
    /// Also selects which positional arguments are data files: those whose
    /// extension equals the decoder name.
    #[arg(short, long, value_enum, default_value_t = DataFormat::Toml)]
    decoder: DataFormat,

    /// Do not append a newline after the rendered template.
    #[arg(long)]
    no_newline: bool,

    /// Print the version and exit.
    #[arg(long)]
    version: bool,

    /// Keep the leading comment lines of the existing output file.
    ///
    /// Lines starting with `#`, `//`, `--` or `;` at the top of the file given
    /// with `-o` are written again before the rendered output.
    #[arg(short = 'p', long)]
    preserve_preamble: bool,

    /// Trust the templates: allow `from_file` and `shell`.
    ///
    /// Without this flag a template calling either function aborts the run.
    #[arg(long)]
    trusted: bool,

    /// Seconds a `shell` call may run before it is killed.
    #[arg(long, value_name = "SECS", env = SHELL_TIMEOUT_ENV, default_value_t = DEFAULT_SHELL_TIMEOUT_SECS)]
    shell_timeout: u64,

    /// Log debug information to stderr (`RUST_LOG` takes precedence).
    #[arg(long)]
    verbose: bool,

    /// Template files and data files.
    #[arg(value_name = "PATH")]
    paths: Vec<PathBuf>,
}

/// A parsed command line, including the order of template sources.
#[derive(Debug)]
pub struct Invocation {
    cli: Cli,
    load_order: Vec<TemplateSource>,
}

impl Invocation {
    /// Parse a full argument list (program name first).
    ///
    /// # Errors
    ///
    /// The [`clap::Error`] for usage errors, `--help` included; callers usually
    /// end with [`clap::Error::exit`].
    pub fn try_parse_from<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = Cli::command().try_get_matches_from(args)?;
        let cli = Cli::from_arg_matches(&matches)?;

        let globs: Vec<(usize, String)> = matches
            .indices_of("globs")
            .map(|indices| indices.zip(cli.globs.iter().cloned()).collect())
            .unwrap_or_default();
        let paths: Vec<(usize, PathBuf)> = matches
            .indices_of("paths")
            .map(|indices| indices.zip(cli.paths.iter().cloned()).collect())
            .unwrap_or_default();

        let load_order = load_order(&globs, &paths, cli.decoder.tag());
        tracing::trace!("template load order: {:?}", load_order);

        Ok(Self {
            cli,
            load_order,
        })
    }

    /// Whether `--verbose` was given.
    #[must_use]
    pub const fn verbose(&self) -> bool {
        self.cli.verbose
    }

    /// Globs and template files in command-line order.
    #[must_use]
    pub fn load_order(&self) -> &[TemplateSource] {
        &self.load_order
    }

    /// Run the invocation.
    ///
    /// `read_stdin` yields the bytes of standard input, `None` when it is absent.
    /// It is only called once the run needs data, so `--version` never waits on
    /// a pipe. Rendered output for standard output (and the `--version` line) goes to `out`.
    ///
    /// # Errors
    ///
    /// Any failure, labelled with its stage. Failures of privileged template
    /// functions stay in the error chain for
    /// [`fatal_exit`](crate::core::fatal_exit) to find.
    pub fn execute<F>(self, read_stdin: F, out: &mut dyn Write) -> Result<()>
    where
        F: FnOnce() -> io::Result<Option<Vec<u8>>>,
    {
        let cli = self.cli;

        if cli.version {
            writeln!(out, "{}", version_line()).context("write output")?;
            out.flush().context("write output")?;
            return Ok(());
        }

        let target = OutputTarget::from_option(cli.output_file);
        if cli.preserve_preamble && target.is_stdout() {
            return Err(TplError::PreambleRequiresOutputFile.into());
        }

        let classified = classify(&cli.paths, cli.decoder.tag());
        let config = RenderConfig::new(
            cli.trusted,
            &classified.data_files,
            Duration::from_secs(cli.shell_timeout),
        )
        .context("parse")?;

        let mut registry = TemplateRegistry::new(&config);
        registry.load_all(&self.load_order).context("load templates")?;

        let stdin = read_stdin().context("read stdin")?;
        let context = DataSources::new(classified.data_files, stdin)
            .build_context(cli.decoder)
            .context("decode all")?;

        let name = select_template(&registry, cli.name.as_deref(), &classified.template_files)
            .context("select template")?;

        let preamble = match &target {
            OutputTarget::File(path) if cli.preserve_preamble => extract_preamble(path),
            _ => String::new(),
        };

        let document = Renderer::new(cli.no_newline)
            .render(&registry, &name, &context, &preamble)
            .context("render")?;

        let stage = if target.is_stdout() { "write output" } else { "file write" };
        target.write(&document, out).context(stage)?;
        Ok(())
    }
}
