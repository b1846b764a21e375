mod attrs;
mod format;
mod ingest;
mod output;

use anyhow::{Context, Result, bail};
use arx_core::{
    ArchiveRequest, AttributeGate, CommitRef, FileMode, IdentityFilter, MemoryStore, ObjectId,
    Pathspec, SinkOutcome, Walker, modes,
};
use attrs::GlobAttributes;
use clap::{Parser, Subcommand};
use format::TemplateFormatter;
use output::{IgnoredOutput, OutputWriter};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Arx - archive entry streams from content-addressed trees
#[derive(Parser)]
#[command(name = "arx")]
#[command(about = "Filtered, content-transformed entry streams for archive writers", long_about = None)]
#[command(version)]
struct Cli {
    /// Emit JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    /// Log each emitted entry to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the archive entry stream for a directory
    List {
        /// Directory to archive
        dir: PathBuf,

        /// Prefix prepended to every entry path (a trailing '/' adds a
        /// container root entry)
        #[arg(long, default_value = "")]
        prefix: String,

        /// export-ignore glob, gitignore syntax (repeatable)
        #[arg(long = "ignore")]
        ignore: Vec<String>,

        /// export-subst glob, gitignore syntax (repeatable)
        #[arg(long = "subst")]
        subst: Vec<String>,

        /// Restrict the stream to these literal path prefixes (repeatable)
        #[arg(long = "path")]
        paths: Vec<String>,

        /// Commit id driving $Format:...$ expansion (off when absent)
        #[arg(long)]
        commit_id: Option<String>,
    },

    /// Print one entry's content after filtering and expansion
    Cat {
        /// Directory to archive
        dir: PathBuf,

        /// Entry path relative to the directory root
        path: String,

        /// export-subst glob, gitignore syntax (repeatable)
        #[arg(long = "subst")]
        subst: Vec<String>,

        /// Commit id driving $Format:...$ expansion (off when absent)
        #[arg(long)]
        commit_id: Option<String>,
    },

    /// Check whether a path would be excluded by export-ignore globs
    Ignored {
        /// Path to test (relative, no leading '/')
        path: String,

        /// export-ignore glob, gitignore syntax (repeatable)
        #[arg(long = "ignore", required = true)]
        ignore: Vec<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_target(false)
            .with_writer(io::stderr)
            .init();
    }

    let writer = OutputWriter::new(cli.json);

    match cli.command {
        Commands::List {
            dir,
            prefix,
            ignore,
            subst,
            paths,
            commit_id,
        } => cmd_list(
            &writer,
            &dir,
            prefix,
            &ignore,
            &subst,
            paths,
            commit_id,
            cli.verbose,
        ),
        Commands::Cat {
            dir,
            path,
            subst,
            commit_id,
        } => cmd_cat(&dir, &path, &subst, commit_id),
        Commands::Ignored { path, ignore } => cmd_ignored(&writer, &path, &ignore),
    }
}

#[allow(clippy::too_many_arguments)]
fn cmd_list(
    writer: &OutputWriter,
    dir: &Path,
    prefix: String,
    ignore: &[String],
    subst: &[String],
    paths: Vec<String>,
    commit_id: Option<String>,
    verbose: bool,
) -> Result<()> {
    let mut store = MemoryStore::new();
    let root = ingest::ingest_dir(&mut store, dir)
        .with_context(|| format!("Failed to ingest {}", dir.display()))?;

    let attributes = GlobAttributes::new(ignore, subst)?;
    let formatter = TemplateFormatter::new(root.to_hex());
    let walker = Walker::new(&store, &attributes, &IdentityFilter, &formatter);

    let mut request = ArchiveRequest::new(root).with_base(prefix).verbose(verbose);
    if !paths.is_empty() {
        request = request.with_pathspec(Pathspec::new(paths));
    }
    if let Some(id) = commit_id {
        request = request.with_commit(CommitRef::new(id));
    }

    let mut sink = |path: &str, id: &ObjectId, mode: FileMode, data: Option<&[u8]>| {
        if let Err(err) = writer.write_entry(path, id, mode, data) {
            return SinkOutcome::Abort(err.into());
        }
        if modes::is_directory(mode) {
            SinkOutcome::Recurse
        } else {
            SinkOutcome::Continue
        }
    };
    walker
        .walk(&request, &mut sink)
        .with_context(|| format!("Archive walk failed for {}", dir.display()))?;

    Ok(())
}

fn cmd_cat(dir: &Path, path: &str, subst: &[String], commit_id: Option<String>) -> Result<()> {
    let mut store = MemoryStore::new();
    let root = ingest::ingest_dir(&mut store, dir)
        .with_context(|| format!("Failed to ingest {}", dir.display()))?;

    let attributes = GlobAttributes::new(&[], subst)?;
    let formatter = TemplateFormatter::new(root.to_hex());
    let walker = Walker::new(&store, &attributes, &IdentityFilter, &formatter);

    let target = path.trim_end_matches('/').to_string();
    let mut request = ArchiveRequest::new(root).with_pathspec(Pathspec::new([target.clone()]));
    if let Some(id) = commit_id {
        request = request.with_commit(CommitRef::new(id));
    }

    let mut found = false;
    let stdout = io::stdout();
    let mut sink = |p: &str, _id: &ObjectId, mode: FileMode, data: Option<&[u8]>| {
        if modes::is_directory(mode) {
            return SinkOutcome::Recurse;
        }
        if p == target
            && let Some(bytes) = data
        {
            found = true;
            let mut handle = stdout.lock();
            if let Err(err) = handle.write_all(bytes) {
                return SinkOutcome::Abort(Box::new(err));
            }
        }
        SinkOutcome::Continue
    };
    walker.walk(&request, &mut sink)?;

    if !found {
        bail!("No entry named {} in {}", target, dir.display());
    }

    Ok(())
}

fn cmd_ignored(writer: &OutputWriter, path: &str, ignore: &[String]) -> Result<()> {
    let attributes = GlobAttributes::new(ignore, &[])?;
    let gate = AttributeGate::new(&attributes);
    let ignored = gate.is_ignored(path);

    writer.write(
        &IgnoredOutput {
            path: path.to_string(),
            ignored,
        },
        || {
            format!(
                "{}: {}\n",
                path,
                if ignored { "ignored" } else { "not ignored" }
            )
        },
    )?;

    Ok(())
}
