pub mod wizard;

pub use wizard::{run_setup, run_setup_wizard};
