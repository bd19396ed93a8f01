//! Layout components: style resolution, height estimation, image
//! interleaving, the flow/pagination engine, and page emission.
//!
//! Data flows strictly forward in a single pass: blocks are resolved to
//! styles, styles drive height estimates, the flow engine accumulates
//! heights and decides break points, and the emitter materializes the
//! finalized pages. There is no backtracking and no I/O inside the loop.

mod emit;
pub mod estimate;
mod flow;
mod interleave;
mod options;
mod style;

pub use flow::{FlowEngine, EMPTY_DOCUMENT_NOTICE};
pub use interleave::{ImageInterleaver, SizedImage};
pub use options::{LayoutOptions, PageGeometry};
pub use style::{body, heading, resolve, Style};
