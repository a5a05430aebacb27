//! `certitrust batch` — Triage many credential ids at once.

use clap::Args;

use certitrust_verify::VerificationEngine;

use crate::context::Context;
use crate::render;

#[derive(Args, Debug)]
pub struct BatchArgs {
    /// Comma-separated credential ids, e.g. "1, 2, 3".
    pub ids: String,
}

pub fn run(args: &BatchArgs, ctx: &Context) -> anyhow::Result<()> {
    let engine = VerificationEngine::new(ctx.store.clone());
    let results = engine.verify_batch_input(&args.ids);

    if ctx.json {
        print!("{}", render::json(&results)?);
    } else {
        print!("{}", render::batch(&results));
    }
    Ok(())
}
