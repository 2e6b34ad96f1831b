//! Core type definitions for turning user input into a scan plan.
//!
//! The newtypes here make invalid ports and malformed targets unrepresentable
//! once parsing has succeeded.

mod plan;
mod port;
mod scan_id;
mod target;

pub use plan::{ScanPlan, WorkItem};
pub use port::{Port, PortSpec};
pub use scan_id::ScanId;
pub use target::{expand_targets, TargetSpec};
