//! `certitrust session` — Interactive verification session on stdin.

use clap::Args;
use std::io::IsTerminal;

use crate::context::Context;
use crate::session::{self, SessionState};

#[derive(Args, Debug)]
pub struct SessionArgs {
    /// Do not print the command help on start.
    #[arg(long)]
    pub quiet: bool,
}

pub fn run(args: &SessionArgs, ctx: &Context) -> anyhow::Result<()> {
    let state = SessionState::new(ctx.store.clone());
    tracing::info!(session = %state.engine.session_id(), "verification session started");

    let stdin = std::io::stdin();
    if !args.quiet && stdin.is_terminal() {
        print!("{}", session::HELP);
    }
    session::run(&state, stdin.lock(), std::io::stdout(), ctx.json)
}
