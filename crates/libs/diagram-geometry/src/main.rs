//! Command-line host for the diagram geometry engine: converts serde_json
//! encoded documents between coordinate conventions.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};

use diagram_geometry::{build_bounding_rect, convert_document_geometry, reconstruct_document_geometry};
use diagram_types::{CoordFrame, Document, EdgeAttachment, Frames};

#[derive(Parser, Debug)]
#[clap(
    version,
    about = "Convert hierarchical diagram documents between coordinate conventions"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Rewrite a document into the given frames
    Convert {
        /// Input document (JSON)
        #[arg(short, long)]
        input: PathBuf,

        /// Output document (JSON)
        #[arg(short, long)]
        output: PathBuf,

        /// Frame for node geometry
        #[arg(long, value_enum, default_value = "absolute")]
        node_frame: FrameArg,

        /// Frame for edge endpoints and labels
        #[arg(long, value_enum, default_value = "absolute")]
        edge_frame: FrameArg,

        /// Frame for edge polyline vertices
        #[arg(long, value_enum, default_value = "absolute")]
        polyline_frame: FrameArg,

        /// Where edges terminate on their nodes
        #[arg(long, value_enum, default_value = "border")]
        attachment: AttachmentArg,
    },

    /// Print the document's computed bounding rect
    Bounds {
        /// Input document (JSON)
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Fill in default geometry for nodes that have none
    Reconstruct {
        /// Input document (JSON)
        #[arg(short, long)]
        input: PathBuf,

        /// Output document (JSON)
        #[arg(short, long)]
        output: PathBuf,

        /// Also rebuild the top-level nodes' rects from their children
        #[arg(long)]
        outer: bool,
    },

    /// Dump a document in a human-readable form
    Print {
        /// Input document (JSON)
        #[arg(short, long)]
        input: PathBuf,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum FrameArg {
    Absolute,
    LeftTop,
    LocalCenter,
}

impl From<FrameArg> for CoordFrame {
    fn from(arg: FrameArg) -> Self {
        match arg {
            FrameArg::Absolute => CoordFrame::Absolute,
            FrameArg::LeftTop => CoordFrame::LeftTop,
            FrameArg::LocalCenter => CoordFrame::LocalCenter,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum AttachmentArg {
    Center,
    Border,
}

impl From<AttachmentArg> for EdgeAttachment {
    fn from(arg: AttachmentArg) -> Self {
        match arg {
            AttachmentArg::Center => EdgeAttachment::Center,
            AttachmentArg::Border => EdgeAttachment::Border,
        }
    }
}

fn load_document(path: &PathBuf) -> Result<Document> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("failed to parse document from {}", path.display()))
}

fn save_document(path: &PathBuf, doc: &Document) -> Result<()> {
    let content = serde_json::to_string_pretty(doc).context("failed to encode document")?;
    fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Convert {
            input,
            output,
            node_frame,
            edge_frame,
            polyline_frame,
            attachment,
        } => {
            let mut doc = load_document(&input)?;
            let target = Frames::new(
                node_frame.into(),
                edge_frame.into(),
                polyline_frame.into(),
                attachment.into(),
            );
            convert_document_geometry(&mut doc, target)
                .with_context(|| format!("conversion of {} failed", input.display()))?;
            save_document(&output, &doc)?;
            println!("Converted {} -> {}", input.display(), output.display());
        }
        Commands::Bounds { input } => {
            let doc = load_document(&input)?;
            let bounds = build_bounding_rect(&doc)
                .with_context(|| format!("bounding of {} failed", input.display()))?;
            println!("{bounds}");
        }
        Commands::Reconstruct {
            input,
            output,
            outer,
        } => {
            let mut doc = load_document(&input)?;
            reconstruct_document_geometry(&mut doc, outer)
                .with_context(|| format!("reconstruction of {} failed", input.display()))?;
            save_document(&output, &doc)?;
            println!("Reconstructed {} -> {}", input.display(), output.display());
        }
        Commands::Print { input } => {
            let doc = load_document(&input)?;
            print!("{doc}");
        }
    }

    Ok(())
}
