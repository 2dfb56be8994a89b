//! Actions reachable from the menu and as subcommands.

pub mod deck;
pub mod stats;
pub mod study;

pub use deck::{add_item, list_items};
pub use stats::{report_stats_problem, show_overview};
pub use study::run_session;
