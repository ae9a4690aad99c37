pub mod account;
pub mod admin;
pub mod airports;
pub mod trips;

use crate::{console::Console, db::Session, error::Result};

/// Print a failed operation and return to the menu; only console loss
/// propagates.
pub fn settle(console: &mut dyn Console, outcome: Result<()>) -> Result<()> {
    match outcome {
        Ok(()) => Ok(()),
        Err(err) if err.is_fatal() => Err(err),
        Err(err) => {
            err.log();
            console.say(&err.to_string());
            Ok(())
        }
    }
}

/// Close a session once its operation succeeded. A failed close only loses
/// the goodbye packet, so it is logged and not reported.
pub async fn release(session: Box<dyn Session>) {
    if let Err(err) = session.close().await {
        tracing::warn!(error = %err, "closing database connection failed");
    }
}
