//! Integration tests for the neutral-builds CLI

mod helpers;
mod test_doctor;
mod test_init;
mod test_page;
