//! In-process frames over native values.
//!
//! A [`Session`] owns the aggregate registry. [`Session::create_frame`] infers
//! one schema from a batch of rows, and [`LocalFrame::agg`] /
//! [`LocalFrame::group_by`] evaluate aggregates locally.

mod error;
mod frame;
mod session;

pub use error::FrameError;
pub use frame::{GroupedFrame, LocalFrame};
#[cfg(feature = "arrow")]
pub use localframe_arrow as arrow;
pub use localframe_core as core;
pub use localframe_emulator as emulator;
pub use localframe_emulator::{AggregateSpec, FuncArgs};
pub use session::{Session, SessionBuilder};
