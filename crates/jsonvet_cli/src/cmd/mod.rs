/// Document check command.
pub mod check;
/// `--field` declaration parsing.
pub(crate) mod decl;
pub(crate) mod util;
