//! Scheduling domain models.
//!
//! Provides the data types for single-server, precedence-constrained
//! scheduling problems and their solutions.
//!
//! # Domain Mappings
//!
//! | edf-schedule | Project | Build system | Operations |
//! |--------------|---------|--------------|------------|
//! | Task | Work package | Build step | Job |
//! | Schedule | Project plan | Build order | Run sheet |

mod schedule;
mod task;

pub use schedule::{Schedule, ScheduleEntry, Violation, ViolationType};
pub use task::Task;
