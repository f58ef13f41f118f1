/// Presentation layer: the `relmgr` command-line interface
pub mod cli;
