//! Utils

use clap::Parser;

/// Arguments for the demo programs.
#[derive(Debug, Parser)]
pub struct DemoArgs {
    /// Fixture set to use for the menu, stalls, and seed orders
    #[clap(short, long, default_value = "canteen")]
    pub fixture: String,

    /// Customer name placed on the demo order
    #[clap(short, long, default_value = "Maria Santos")]
    pub customer: String,
}
