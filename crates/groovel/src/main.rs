mod db;

use std::process::ExitCode;

use anyhow::Context;
use camino::Utf8PathBuf;
use clap::Parser;
use db::{check_file, parse};
use groovel_errors::{Diagnostic, Renderer};
use groovel_inputs::{Dialect, File, dialect_for_path};
use salsa::DatabaseImpl;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[derive(Parser)]
#[command(version, about = "Recoverable parser for Groovy sources")]
enum Options {
    /// Report syntax errors; exits with a failure status if there are any.
    Check {
        path: Utf8PathBuf,
        /// Treat the file as a template page regardless of its extension.
        #[arg(long)]
        template: bool,
        /// One `path:line:col: kind: message` line per diagnostic.
        #[arg(long)]
        short: bool,
    },
    /// Print the syntax tree.
    Tree {
        path: Utf8PathBuf,
        #[arg(long)]
        template: bool,
    },
}

fn main() -> anyhow::Result<ExitCode> {
    let db = DatabaseImpl::default();

    match Options::parse() {
        Options::Check { path, template, short } => {
            let file = load(&db, path, template)?;
            let diagnostics = check_file::accumulated::<Diagnostic>(&db, file);

            let path = file.path(&db).as_str();
            let text = file.text(&db);

            if short {
                let line_index = file.line_index(&db);
                for diagnostic in &diagnostics {
                    let start = line_index.line_col(diagnostic.range().start());
                    eprintln!(
                        "{path}:{}:{}: {}: {}",
                        start.line + 1,
                        start.col + 1,
                        diagnostic.kind(),
                        diagnostic.message()
                    );
                }
            } else {
                let renderer = Renderer::styled();
                for diagnostic in &diagnostics {
                    eprintln!("{}", diagnostic.render(&renderer, path, text));
                }
            }

            Ok(if diagnostics.is_empty() { ExitCode::SUCCESS } else { ExitCode::FAILURE })
        }
        Options::Tree { path, template } => {
            let file = load(&db, path, template)?;
            print!("{}", parse(&db, file).tree().debug_tree());
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn load(db: &DatabaseImpl, path: Utf8PathBuf, template: bool) -> anyhow::Result<File> {
    let text =
        std::fs::read_to_string(&path).with_context(|| format!("failed to read `{path}`"))?;
    let dialect = if template { Dialect::Template } else { dialect_for_path(&path) };
    Ok(File::new(db, path, text, dialect))
}
