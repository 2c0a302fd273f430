//! CLI logic for the C4Pad diagram tool.
//!
//! Each subcommand reads a diagram file, runs one library operation and
//! writes the result to `--output` or to the given writer.

pub mod report;

mod args;
mod config;

pub use args::{AddElementArgs, AddRelationArgs, Args, Command};

use std::{fs, io::Write};

use log::{info, warn};

use c4pad::{
    C4padError, DEFAULT_SNIPPET, DiagramEditor, DiagramKind, SourceStructure,
    config::{AppConfig, DiagramConfig},
    edit::{NewElement, NewRelation, Parent},
};

use report::{FindingReport, render};

/// Run the C4Pad CLI application, writing results to stdout.
///
/// # Errors
///
/// Returns `C4padError` for file I/O errors, configuration errors, rejected
/// edits, and structural errors found by `check`.
pub fn run(args: &Args) -> Result<(), C4padError> {
    let stdout = std::io::stdout();
    execute(args, &mut stdout.lock())
}

/// Run the C4Pad CLI application, writing results without `--output` to `out`.
///
/// # Errors
///
/// See [`run`].
pub fn execute(args: &Args, out: &mut impl Write) -> Result<(), C4padError> {
    match &args.command {
        Command::New { output } => emit(DEFAULT_SNIPPET, output.as_deref(), out),
        Command::Outline { input } => {
            let source = fs::read_to_string(input)?;
            let editor = DiagramEditor::new(load_config(args, None)?);
            let structure = editor.outline(&source);
            write_outline(&structure, None, 0, out)?;
            Ok(())
        }
        Command::Check { input } => {
            let source = fs::read_to_string(input)?;
            let editor = DiagramEditor::new(load_config(args, None)?);
            let warnings = editor.check(&source)?;
            for diag in &warnings {
                warn!("{}", render(&FindingReport::new(diag, &source)));
            }
            info!(input, warnings = warnings.len(); "No structural errors");
            writeln!(out, "{input}: ok ({} warning(s))", warnings.len())?;
            Ok(())
        }
        Command::AddElement(add) => {
            let source = fs::read_to_string(&add.input)?;
            let editor = DiagramEditor::new(load_config(args, add.diagram)?);
            let updated = editor.add_element(&source, &new_element(add))?;
            emit(&updated, add.output.as_deref(), out)
        }
        Command::AddRelation(add) => {
            let source = fs::read_to_string(&add.input)?;
            let editor = DiagramEditor::new(load_config(args, None)?);
            let updated = editor.add_relation(&source, &new_relation(add))?;
            emit(&updated, add.output.as_deref(), out)
        }
        Command::Normalize {
            input,
            diagram,
            output,
        } => {
            let source = fs::read_to_string(input)?;
            let editor = DiagramEditor::new(load_config(args, *diagram)?);
            emit(&editor.normalize(&source), output.as_deref(), out)
        }
        Command::Url { input, diagram } => {
            let source = fs::read_to_string(input)?;
            let editor = DiagramEditor::new(load_config(args, *diagram)?);
            match editor.render_url(&source)? {
                Some(url) => writeln!(out, "{url}")?,
                None => warn!(input; "Diagram is empty, nothing to render"),
            }
            Ok(())
        }
    }
}

fn load_config(args: &Args, diagram: Option<DiagramKind>) -> Result<AppConfig, C4padError> {
    let config = config::load_config(args.config.as_ref())?;
    Ok(match diagram {
        Some(kind) => config.with_diagram(DiagramConfig::new(kind)),
        None => config,
    })
}

fn new_element(add: &AddElementArgs) -> NewElement<'_> {
    let parent = add.parent.as_deref().map_or(Parent::Root, Parent::Boundary);
    let mut element = NewElement::new(add.kind, &add.alias, &add.label).with_parent(parent);
    if let Some(technology) = &add.technology {
        element = element.with_technology(technology);
    }
    if let Some(description) = &add.description {
        element = element.with_description(description);
    }
    element
}

fn new_relation(add: &AddRelationArgs) -> NewRelation<'_> {
    let mut relation = NewRelation::new(add.kind, &add.from, &add.to, &add.label);
    if let Some(technology) = &add.technology {
        relation = relation.with_technology(technology);
    }
    if let Some(description) = &add.description {
        relation = relation.with_description(description);
    }
    relation
}

/// Write `text` to `output` if given, else to `out`.
fn emit(text: &str, output: Option<&str>, out: &mut impl Write) -> Result<(), C4padError> {
    match output {
        Some(path) => {
            fs::write(path, text)?;
            info!(output_file = path; "Diagram written");
        }
        None => {
            out.write_all(text.as_bytes())?;
            if !text.ends_with('\n') {
                writeln!(out)?;
            }
        }
    }
    Ok(())
}

fn write_outline(
    structure: &SourceStructure<'_>,
    parent: Option<usize>,
    depth: usize,
    out: &mut impl Write,
) -> std::io::Result<()> {
    for (position, node) in structure.children_at(parent) {
        writeln!(
            out,
            "{:indent$}{} {} \"{}\" (line {})",
            "",
            node.alias(),
            node.macro_name(),
            node.label(),
            node.line() + 1,
            indent = depth * 2
        )?;
        if node.is_boundary() {
            write_outline(structure, Some(position), depth + 1, out)?;
        }
    }
    Ok(())
}
