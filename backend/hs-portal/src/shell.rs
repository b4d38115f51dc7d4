use crate::command::Command;
use crate::error::Result as PortalErrorResult;
use crate::portal::{Portal, Reply, render_outcome};

use hs_auth::ShutdownGuard;
use hs_guard::NavigationOutcome;
use log::{debug, info, warn};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

/// Read commands line by line until `quit`, end of input or shutdown.
///
/// Auth state changes that happen between commands (a profile lookup
/// finishing, a session expiring) re-run the guard for the current location
/// and print the new outcome.
pub async fn run<R, W>(
    portal: &mut Portal,
    input: R,
    mut output: W,
    mut shutdown: ShutdownGuard,
) -> PortalErrorResult<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = input.lines();
    let mut changes = portal.watch();

    loop {
        tokio::select! {
            _ = shutdown.wait() => {
                info!("Shell interrupted");
                break;
            }
            changed = changes.changed() => {
                if changed.is_err() {
                    debug!("Auth context gone, leaving shell");
                    break;
                }
                if let Some(line) = state_change_line(portal.on_state_change()) {
                    write_line(&mut output, &line).await?;
                }
            }
            line = lines.next_line() => {
                let Some(line) = line? else {
                    debug!("End of input");
                    break;
                };
                if line.trim().is_empty() {
                    continue;
                }

                let reply = match line.parse::<Command>() {
                    Ok(command) => portal.execute(command).await,
                    Err(e) => Err(e),
                };
                match reply {
                    Ok(Reply::Quit) => {
                        write_line(&mut output, &Reply::Quit.to_string()).await?;
                        break;
                    }
                    Ok(reply) => write_line(&mut output, &reply.to_string()).await?,
                    Err(e) => write_line(&mut output, &format!("error: {}", e)).await?,
                }
            }
        }
    }

    output.flush().await?;
    Ok(())
}

/// What to print after the guard re-ran for the current location.
/// A failed re-evaluation is reported like a failed command and the shell
/// keeps reading.
pub(crate) fn state_change_line(
    result: PortalErrorResult<Option<NavigationOutcome>>,
) -> Option<String> {
    match result {
        Ok(outcome) => outcome.map(|outcome| render_outcome(&outcome)),
        Err(e) => {
            warn!("Re-evaluating the current location failed: {}", e);
            Some(format!("error: {}", e))
        }
    }
}

async fn write_line<W: AsyncWrite + Unpin>(output: &mut W, text: &str) -> PortalErrorResult<()> {
    output.write_all(text.as_bytes()).await?;
    output.write_all(b"\n").await?;
    output.flush().await?;
    Ok(())
}
