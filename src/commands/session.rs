use crate::{
    libs::{
        messages::Message,
        session::{Role, UserSession},
    },
    msg_print, msg_success,
};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct SessionArgs {
    /// Switch the session to this role
    #[arg(short, long, value_enum)]
    role: Option<Role>,
}

/// Shows the current role, or changes it. The "last seen" watermark is kept.
pub fn cmd(args: SessionArgs) -> Result<()> {
    let mut session = UserSession::load()?;

    match args.role {
        Some(role) => {
            session.role = role;
            session.save()?;
            msg_success!(Message::SessionUpdated(role.to_string()));
        }
        None => {
            msg_print!(Message::SessionRole(session.role.to_string()));
        }
    }

    Ok(())
}
