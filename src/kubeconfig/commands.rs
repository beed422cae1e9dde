//! Command handlers

use std::path::{Path, PathBuf};

use crate::cli::{Cli, Command, OutputFormat};
use crate::error::{KconfError, Result};
use crate::output::output_contexts;
use crate::shell::{kubeconfig_value, ShellKind};
use crate::ui::{AssumeYes, StdinPrompt};

use super::lookup::{ChangeAction, OverridePrompt};
use super::operations::{Cascade, DeleteReport};
use super::store::{load_bundle, write_document, KubeconfigStore};

/// Dispatch top-level commands
pub fn run_command(cli: &Cli) -> Result<()> {
    let store = KubeconfigStore::new(cli.kubeconfig.as_deref());
    match &cli.command {
        Command::Add(args) if args.yes => run_add(&store, &args.file, &mut AssumeYes),
        Command::Add(args) => run_add(&store, &args.file, &mut StdinPrompt),
        Command::Delete(args) => run_delete(&store, &args.contexts),
        Command::Export(args) => run_export(&store, &args.contexts, &args.output),
        Command::List(args) => run_list(&store, args.output),
        Command::Env(args) => run_env(&args.files),
    }
}

/// Merge a bundle file into the kubeconfig
fn run_add(store: &KubeconfigStore, file: &Path, prompt: &mut dyn OverridePrompt) -> Result<()> {
    let bundle = load_bundle(file)?;
    let mut doc = store.load()?;

    let changes = doc.add_context(bundle, prompt)?;
    for change in &changes {
        match change.action {
            ChangeAction::Added => println!("✓ Added {} '{}'", change.kind, change.name),
            ChangeAction::Replaced => println!("✓ Updated {} '{}'", change.kind, change.name),
        }
    }

    if let Some(backup) = store.save(&doc)? {
        println!("Backed up previous kubeconfig to {}", backup.display());
    }
    println!("✓ Wrote {}", store.path().display());
    Ok(())
}

/// Delete each named context; names that don't exist are reported and skipped
fn run_delete(store: &KubeconfigStore, names: &[String]) -> Result<()> {
    let mut doc = store.load()?;

    let mut deleted = 0;
    for name in names {
        match doc.delete_context(name) {
            Ok(report) => {
                print_delete_report(&report);
                deleted += 1;
            }
            Err(e) => eprintln!("Could not delete '{}': {}", name, e),
        }
    }

    if deleted == 0 {
        return Err(KconfError::NotFound("No contexts were deleted".to_string()));
    }

    if let Some(backup) = store.save(&doc)? {
        println!("Backed up previous kubeconfig to {}", backup.display());
    }
    println!("✓ Deleted {} context(s)", deleted);
    Ok(())
}

fn print_delete_report(report: &DeleteReport) {
    println!("✓ Deleted context '{}'", report.context);
    for (kind, cascade) in [("cluster", &report.cluster), ("user", &report.user)] {
        match cascade {
            Some(Cascade::Removed(name)) => println!("  Deleted unused {} '{}'", kind, name),
            Some(Cascade::InUse(name)) => {
                println!("  Kept {} '{}', still used by another context", kind, name)
            }
            Some(Cascade::Dangling(_)) | None => {}
        }
    }
    if report.cleared_current {
        println!("  Unset current-context");
    }
}

/// Write the named contexts to a new kubeconfig file
fn run_export(store: &KubeconfigStore, names: &[String], output: &Path) -> Result<()> {
    let doc = store.load()?;
    let export = doc.export_contexts(names)?;

    for name in &export.missing {
        eprintln!("Warning: Context '{}' not found and will be skipped.", name);
    }

    write_document(output, &export.document)?;
    println!(
        "✓ Exported {} context(s) to '{}'",
        export.document.contexts.len(),
        output.display()
    );
    println!(
        "You can use it with: kubectl --kubeconfig {} get pods",
        output.display()
    );
    Ok(())
}

/// List contexts
fn run_list(store: &KubeconfigStore, format: OutputFormat) -> Result<()> {
    let doc = store.load()?;

    if doc.contexts.is_empty() && format == OutputFormat::Table {
        println!("No contexts configured in {}.", store.path().display());
        println!("\nUse 'kconf add -f <FILE>' to add one.");
        return Ok(());
    }

    output_contexts(&doc, format)
}

/// Print the command that points KUBECONFIG at `files`
fn run_env(files: &[PathBuf]) -> Result<()> {
    let value = kubeconfig_value(files)?;
    let value = value.to_string_lossy();
    let shell = ShellKind::detect()?;

    println!("{}", shell.set_command(&value));
    if let Some(startup) = shell.startup_file() {
        eprintln!(
            "\nTo make this permanent, add the line above to ~/{} and open a new terminal.",
            startup
        );
    } else {
        eprintln!("\nRun the command above; it takes effect in new terminals.");
    }
    Ok(())
}
