//! `certitrust verify` — Verify one credential by id or wallet address.

use clap::Args;

use certitrust_verify::{VerificationEngine, VerificationQuery};

use crate::context::Context;
use crate::render;

#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// Credential id. Takes precedence over --address.
    #[arg(short, long)]
    pub id: Option<String>,

    /// Learner wallet address.
    #[arg(short, long)]
    pub address: Option<String>,
}

pub fn run(args: &VerifyArgs, ctx: &Context) -> anyhow::Result<()> {
    let engine = VerificationEngine::new(ctx.store.clone());
    let query = VerificationQuery::from_form(
        args.id.as_deref().unwrap_or_default(),
        args.address.as_deref().unwrap_or_default(),
    );
    let result = engine.verify_one(&query);

    if ctx.json {
        print!("{}", render::json(&result)?);
    } else {
        print!("{}", render::verification(&result));
    }
    Ok(())
}
