//! Motif Mark Core Library
//!
//! IUPAC motif compilation, overlapping motif scanning, exon location from
//! case-encoded sequences, and deterministic diagram layout.

pub mod error;
pub mod iupac;
pub mod scan;
pub mod exon;
pub mod types;
pub mod layout;
pub mod annotate;
pub mod io;

// Re-export commonly used types and functions
pub use error::{AnnotateError, AnnotateResult};
pub use iupac::{compile, IupacClass, Pattern};
pub use scan::scan;
pub use exon::locate;
pub use types::{ExonSpan, MotifSet, MotifSpec, SequenceRecord};
pub use layout::{Color, LayoutConfig, LayoutEngine, LayoutGeometry, LegendKind};
pub use annotate::{AnnotationRun, Annotator};

/// Version information for the motif core library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
