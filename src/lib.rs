//! tpl - render templates against merged structured data
//!
//! `tpl` loads Tera templates from files and globs, merges data from JSON, YAML or
//! TOML files and standard input into one context, picks the template to execute
//! and writes the result to standard output or, all at once, to a file.
//!
//! # Architecture Overview
//!
//! One invocation runs strictly in sequence:
//!
//! 1. [`cli`] parses flags and splits positional arguments into data files and
//!    template files, remembering where each `--glob` appeared
//! 2. [`templating::TemplateRegistry`] loads globs and template files in that order
//! 3. [`data`] decodes every data source and deep-merges them, standard input last
//! 4. [`templating::selector`] picks the entry point
//! 5. [`templating::Renderer`] renders into memory and [`output`] writes the result
//!
//! # Core Modules
//!
//! - [`cli`] - clap interface, argument classification, run orchestration
//! - [`config`] - run-scoped settings threaded into template functions
//! - [`core`] - error types and their presentation, fatal exit translation
//! - [`data`] - decoders and the deep merge of data sources
//! - [`templating`] - registry, selection, function set and renderer
//! - [`output`] - output targets, atomic file writes, preamble extraction
//! - [`constants`] - shared defaults
//!
//! # Trust model
//!
//! Templates can read files (`from_file`) and run programs (`shell`) only when
//! `--trusted` is given. A template that calls either without it stops the run
//! with a `fatal:` diagnostic before anything is written.
//!
//! # Example
//!
//! ```bash
//! $ echo 'name = "World"' > data.toml
//! $ echo 'Hello {{ name }}' > hello.tmpl
//! $ tpl hello.tmpl data.toml
//! Hello World
//! ```

pub mod cli;
pub mod config;
pub mod constants;
pub mod core;
pub mod data;
pub mod output;
pub mod templating;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
