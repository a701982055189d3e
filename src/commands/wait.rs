//! "Mark as waiting" action.
//!
//! Opens an external-dependency pause on a work order and moves it to the
//! awaiting status. Repeating the command while the order is already waiting
//! only updates the reason and note of the open pause.

use crate::{
    db::orders::Orders,
    libs::{
        error::OrderError,
        messages::Message,
        order::MIN_NOTE_LENGTH,
        pause::OpenPause,
        session::{Action, UserSession},
        timestamp::Timestamp,
    },
    msg_success,
};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct WaitArgs {
    /// Work order identifier
    id: String,

    /// Short classification code of the dependency
    #[arg(short, long, default_value = "SANEAMENTO")]
    reason: String,

    /// Justification shown to managers (at least 3 characters)
    #[arg(short, long)]
    note: String,

    /// When the wait started; defaults to now
    #[arg(long)]
    at: Option<String>,
}

pub fn cmd(args: WaitArgs) -> Result<()> {
    UserSession::load()?.authorize(Action::ManagePauses)?;

    let note = args.note.trim();
    if note.chars().count() < MIN_NOTE_LENGTH {
        return Err(OrderError::NoteTooShort(MIN_NOTE_LENGTH).into());
    }

    let orders = Orders::new()?;
    let order = orders.get(&args.id)?;
    let was_open = order.has_open_pause();

    let mut request = OpenPause::new(args.reason.trim(), note);
    if let Some(at) = args.at.as_deref().map(Timestamp::parse).transpose()?.and_then(|t| t.to_local()) {
        request = request.at(at);
    }

    let updated = order.mark_waiting(request)?;
    orders.save(&updated)?;

    if was_open {
        msg_success!(Message::OrderPauseUpdated(updated.id));
    } else {
        msg_success!(Message::OrderMarkedWaiting(updated.id));
    }
    Ok(())
}
