use crate::{
    db::orders::Orders,
    libs::{
        messages::Message,
        session::{Action, UserSession},
        timestamp::Timestamp,
    },
    msg_info, msg_success,
};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct ResumeArgs {
    /// Work order identifier
    id: String,

    /// When the dependency was resolved; defaults to now
    #[arg(long)]
    at: Option<String>,
}

/// Closes the open dependency pause and restores the previous status.
pub fn cmd(args: ResumeArgs) -> Result<()> {
    UserSession::load()?.authorize(Action::ManagePauses)?;

    let orders = Orders::new()?;
    let order = orders.get(&args.id)?;

    if !order.has_open_pause() && !order.is_awaiting_dependency() {
        msg_info!(Message::OrderNoOpenPause(order.id));
        return Ok(());
    }

    let ended_at = args.at.as_deref().map(Timestamp::parse).transpose()?.and_then(|t| t.to_local());
    let updated = order.resume(ended_at);
    orders.save(&updated)?;

    msg_success!(Message::OrderResumed(updated.id.clone(), updated.status.clone()));
    Ok(())
}
