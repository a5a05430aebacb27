//! `certitrust issue` — Issue a credential into the store.

use clap::Args;
use std::path::Path;
use std::sync::Arc;

use certitrust_core::{Credential, FixtureFile};
use certitrust_verify::{CredentialIssuer, InMemoryCredentialStore, NewCredential};

use crate::context::Context;
use crate::render;

#[derive(Args, Debug)]
pub struct IssueArgs {
    /// Issuing institution, e.g. "University of Technology".
    #[arg(long)]
    pub institution: String,

    /// Learner wallet address the credential is issued to.
    #[arg(long)]
    pub holder: String,

    /// Course or qualification name.
    #[arg(long)]
    pub course: String,

    /// Completion date (YYYY-MM-DD).
    #[arg(long)]
    pub date: String,

    /// Issue as already verified by the institution.
    #[arg(long)]
    pub verified: bool,

    /// Require a permission grant before details are disclosed.
    #[arg(long)]
    pub sensitive: bool,
}

impl IssueArgs {
    fn request(&self) -> NewCredential {
        let mut request =
            NewCredential::new(self.holder.trim(), self.course.trim(), self.date.trim());
        if self.verified {
            request = request.verified();
        }
        if self.sensitive {
            request = request.sensitive();
        }
        request
    }
}

/// Issue into `store` and, when a fixture file is configured, write the
/// whole store back to it.
pub fn issue(
    args: &IssueArgs,
    store: &Arc<InMemoryCredentialStore>,
    fixtures: Option<&Path>,
) -> anyhow::Result<Credential> {
    let issuer = CredentialIssuer::new(args.institution.trim(), store.clone());
    let credential = issuer.issue(args.request())?;

    match fixtures {
        Some(path) => {
            FixtureFile::new(store.list()).save(path)?;
            tracing::info!(path = %path.display(), "fixture file updated");
        }
        None => tracing::warn!(
            credential_id = %credential.id,
            "no fixture file configured; the credential is not persisted"
        ),
    }
    Ok(credential)
}

pub fn run(args: &IssueArgs, ctx: &Context) -> anyhow::Result<()> {
    let credential = issue(args, &ctx.store, ctx.fixtures.as_deref())?;

    if ctx.json {
        print!("{}", render::json(&credential)?);
    } else {
        println!("Credential issued!");
        print!("{}", render::credential_details(&credential));
        if credential.sensitive {
            println!("  Sensitive: permission is required before disclosure.");
        }
    }
    Ok(())
}
