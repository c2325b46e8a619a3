//! Critical Path Method evaluation.
//!
//! Three passes over a topological order of the activity graph: earliest
//! times forward from the source, latest times backward from the sink, then
//! extraction of the zero-slack activities.

mod calculation;
mod topology;
mod types;

pub use calculation::calculate_schedule;
pub use types::{ActivityTiming, ScheduleError, SentinelRole};
