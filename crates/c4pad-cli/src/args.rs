//! Command-line argument definitions for the C4Pad CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Global options select the configuration file and logging
//! verbosity; each [`Command`] maps to one editing or rendering operation.

use clap::{Parser, Subcommand};

use c4pad::{DiagramKind, ElementKind, RelationKind};

/// Command-line arguments for the C4Pad diagram tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to configuration file (TOML)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "warn", global = true)]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

/// The operation to perform.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write the starter diagram
    New {
        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Print the element tree of a diagram
    Outline {
        /// Path to the input diagram
        input: String,
    },

    /// Report structural problems such as unclosed boundaries
    Check {
        /// Path to the input diagram
        input: String,
    },

    /// Insert an element
    AddElement(AddElementArgs),

    /// Insert a relation between two declared elements
    AddRelation(AddRelationArgs),

    /// Add the wrapper, include and layout lines a diagram is missing
    Normalize {
        /// Path to the input diagram
        input: String,

        /// Diagram level (overrides the configuration)
        #[arg(short, long)]
        diagram: Option<DiagramKind>,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Print the URL that renders a diagram
    Url {
        /// Path to the input diagram
        input: String,

        /// Diagram level (overrides the configuration)
        #[arg(short, long)]
        diagram: Option<DiagramKind>,
    },
}

/// Arguments of [`Command::AddElement`].
#[derive(clap::Args, Debug)]
pub struct AddElementArgs {
    /// Path to the input diagram
    pub input: String,

    /// Element macro, e.g. `Container` or `System_Boundary`
    #[arg(short, long)]
    pub kind: ElementKind,

    /// Alias used to reference the element
    #[arg(short, long)]
    pub alias: String,

    /// Display label
    #[arg(short, long)]
    pub label: String,

    /// Technology, or type for people and systems
    #[arg(short, long)]
    pub technology: Option<String>,

    /// Description
    #[arg(long)]
    pub description: Option<String>,

    /// Alias of the boundary to insert into (document root if omitted)
    #[arg(short, long)]
    pub parent: Option<String>,

    /// Diagram level (overrides the configuration)
    #[arg(short, long)]
    pub diagram: Option<DiagramKind>,

    /// Output file (stdout if omitted)
    #[arg(short, long)]
    pub output: Option<String>,
}

/// Arguments of [`Command::AddRelation`].
#[derive(clap::Args, Debug)]
pub struct AddRelationArgs {
    /// Path to the input diagram
    pub input: String,

    /// Relation macro, e.g. `Rel` or `BiRel_L`
    #[arg(short, long, default_value_t = RelationKind::Rel)]
    pub kind: RelationKind,

    /// Alias of the source element
    #[arg(short, long)]
    pub from: String,

    /// Alias of the target element
    #[arg(long)]
    pub to: String,

    /// Display label
    #[arg(short, long)]
    pub label: String,

    /// Technology
    #[arg(short, long)]
    pub technology: Option<String>,

    /// Description
    #[arg(long)]
    pub description: Option<String>,

    /// Output file (stdout if omitted)
    #[arg(short, long)]
    pub output: Option<String>,
}
