//! Line-oriented console front end: parses commands, runs them through the
//! storefront and renders the results.

pub mod command;
pub mod renderer;
pub mod shell;
