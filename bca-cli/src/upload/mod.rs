//! Document upload workflow
//!
//! This layer turns a set of picked files into a tracked extraction job:
//! screening, submission, and status polling until the job finishes.

mod coordinator;
mod display;
mod session;

pub use coordinator::UploadCoordinator;
pub use display::TerminalDisplay;
pub use session::PollState;
