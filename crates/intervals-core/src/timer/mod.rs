mod driver;
mod plan;
mod session;

pub use driver::{run_session, RunOutcome, RunReport, TimerView};
pub use plan::{Phase, Plan};
pub use session::{Cue, Session, Tick};
