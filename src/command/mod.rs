//! Plugin entry point
//!
//! Keeps host-framework types out of the core: a host adapter hands over a
//! [`ModelSnapshot`](crate::model::ModelSnapshot), gets back a
//! [`CommandReport`] or a [`CommandError`], and decides how to show either.

mod command;
mod error;
mod presenter;

pub use command::{preview, CommandReport, ExternalCommand, ModelHealthCommand};
pub use error::{CommandError, CommandResult};
pub use presenter::{LogPresenter, SummaryPresenter};
