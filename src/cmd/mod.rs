/// Batch conversion command.
pub mod convert;
/// Token listing command.
pub mod dump;
/// File-level information command.
pub mod info;

mod util;
