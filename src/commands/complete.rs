use crate::{
    db::orders::Orders,
    libs::{
        messages::Message,
        session::{Action, UserSession},
        timestamp::Timestamp,
    },
    msg_success,
};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct CompleteArgs {
    /// Work order identifier
    id: String,

    /// Completion time; defaults to now
    #[arg(long)]
    at: Option<String>,
}

/// Marks an order complete. Refused while it awaits an external dependency.
pub fn cmd(args: CompleteArgs) -> Result<()> {
    UserSession::load()?.authorize(Action::Complete)?;

    let orders = Orders::new()?;
    let order = orders.get(&args.id)?;
    let at = args.at.as_deref().map(Timestamp::parse).transpose()?.and_then(|t| t.to_local());

    let completed = order.complete(at)?;
    orders.save(&completed)?;

    msg_success!(Message::OrderCompleted(completed.id));
    Ok(())
}
