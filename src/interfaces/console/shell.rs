use super::command::{HELP, ShellCommand, parse_line};
use crate::application::commands::Action;
use crate::application::state::AppState;
use crate::application::storefront::Storefront;
use crate::error::Result;
use std::io::{BufRead, Write};
use tracing::debug;

/// Reads commands line by line and dispatches them until `quit` or EOF.
///
/// Catalog and customers are loaded before the first line is read. Parse
/// errors are written to `out` and the session continues. Returns the final
/// state.
pub async fn run<R: BufRead, W: Write>(
    storefront: &mut Storefront,
    input: R,
    mut out: W,
) -> Result<AppState> {
    let mut state = AppState::new();
    storefront.dispatch(&mut state, Action::Refresh).await;

    for line in input.lines() {
        let line = line?;
        match parse_line(&line) {
            Ok(None) => {}
            Ok(Some(ShellCommand::Quit)) => break,
            Ok(Some(ShellCommand::Help)) => writeln!(out, "{HELP}")?,
            Ok(Some(ShellCommand::Dispatch(action))) => {
                debug!(?action, "dispatching");
                storefront.dispatch(&mut state, action).await;
            }
            Err(e) => writeln!(out, "error: {e}")?,
        }
        out.flush()?;
    }

    Ok(state)
}
