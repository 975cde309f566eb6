//! Command implementations for the neutral-builds CLI

mod doctor;
mod init;
mod notes;
mod page;

pub use doctor::run_doctor;
pub use init::run_init;
pub use notes::run_notes;
pub use page::run_page;
