//! Command implementations for SpellFS CLI.

pub mod cat;
pub mod create;
pub mod delz;
pub mod extract;
pub mod info;
pub mod list;
pub mod mklz;
pub mod test;

pub use cat::cmd_cat;
pub use create::cmd_create;
pub use delz::{DelzOptions, cmd_delz};
pub use extract::{ExtractOptions, cmd_extract};
pub use info::cmd_info;
pub use list::cmd_list;
pub use mklz::cmd_mklz;
pub use test::cmd_test;
