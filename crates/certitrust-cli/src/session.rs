//! Line-oriented interactive session over one verification engine.
//!
//! Grants, history, batch results, and issuer feedback live as long as
//! the session.

use std::io::{BufRead, Write};
use std::sync::Arc;

use certitrust_core::{CredentialId, HolderAddress};
use certitrust_verify::{
    CredentialIssuer, FeedbackBook, InMemoryCredentialStore, NewCredential, VerificationEngine,
    VerificationQuery,
};

use crate::render;

pub const HELP: &str = "\
Commands:
  verify id <id>              verify a credential by id
  verify address <address>    verify the first credential held by an address
  grant <id>                  grant permission to view a sensitive credential
  batch <id>,<id>,...         triage many ids at once (status only)
  history                     show audited verification attempts
  results                     show the last batch results
  grants                      show granted credential ids
  list                        list credential ids and holders
  holder <address>            list every credential id held by an address
  issue <institution> | <holder> | <course> | <date> [| verified] [| sensitive]
                              issue a credential into the store
  feedback <issuer> | <rating 1-5> | <text>
                              rate an issuing institution
  feedbacks                   show issuer feedback
  help                        show this help
  quit                        end the session
";

/// A parsed session command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    VerifyId(String),
    VerifyAddress(String),
    Grant(CredentialId),
    Batch(String),
    History,
    Results,
    Grants,
    List,
    Holder(String),
    Issue {
        institution: String,
        request: NewCredential,
    },
    Feedback {
        issuer: String,
        rating: u8,
        text: String,
    },
    Feedbacks,
    Help,
    Quit,
}

impl SessionCommand {
    /// Parse one input line. Blank lines and `#` comments yield `Ok(None)`.
    pub fn parse(line: &str) -> Result<Option<Self>, String> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let command = match word.to_ascii_lowercase().as_str() {
            "verify" => {
                let (kind, value) = rest
                    .split_once(char::is_whitespace)
                    .map(|(k, v)| (k, v.trim()))
                    .unwrap_or((rest, ""));
                if value.is_empty() {
                    return Err("usage: verify id <id> | verify address <address>".into());
                }
                match kind {
                    "id" => Self::VerifyId(value.to_string()),
                    "address" => Self::VerifyAddress(value.to_string()),
                    other => return Err(format!("unknown lookup kind: {}", other)),
                }
            }
            "grant" => {
                let id = CredentialId::parse(rest).map_err(|e| e.to_string())?;
                Self::Grant(id)
            }
            "batch" => Self::Batch(rest.to_string()),
            "history" => Self::History,
            "results" => Self::Results,
            "grants" => Self::Grants,
            "list" => Self::List,
            "holder" if !rest.is_empty() => Self::Holder(rest.to_string()),
            "holder" => return Err("usage: holder <address>".into()),
            "issue" => parse_issue(rest)?,
            "feedback" => parse_feedback(rest)?,
            "feedbacks" => Self::Feedbacks,
            "help" | "?" => Self::Help,
            "quit" | "exit" => Self::Quit,
            other => return Err(format!("unknown command: {} (try `help`)", other)),
        };
        Ok(Some(command))
    }
}

/// `|`-separated fields, trimmed. Institution and course names contain spaces.
fn fields(rest: &str) -> Vec<&str> {
    rest.split('|').map(str::trim).collect()
}

fn parse_issue(rest: &str) -> Result<SessionCommand, String> {
    const USAGE: &str =
        "usage: issue <institution> | <holder> | <course> | <date> [| verified] [| sensitive]";
    let fields = fields(rest);
    let [institution, holder, course, date, flags @ ..] = fields.as_slice() else {
        return Err(USAGE.into());
    };
    if [institution, holder, course, date].iter().any(|f| f.is_empty()) {
        return Err(USAGE.into());
    }
    let mut request = NewCredential::new(*holder, *course, *date);
    for flag in flags {
        request = match flag.to_ascii_lowercase().as_str() {
            "verified" => request.verified(),
            "sensitive" => request.sensitive(),
            other => return Err(format!("unknown issue flag: {}", other)),
        };
    }
    Ok(SessionCommand::Issue {
        institution: institution.to_string(),
        request,
    })
}

fn parse_feedback(rest: &str) -> Result<SessionCommand, String> {
    const USAGE: &str = "usage: feedback <issuer> | <rating 1-5> | <text>";
    let fields = fields(rest);
    let [issuer, rating, text] = fields.as_slice() else {
        return Err(USAGE.into());
    };
    let rating = rating
        .parse::<u8>()
        .map_err(|_| format!("rating must be a number, got {:?}", rating))?;
    Ok(SessionCommand::Feedback {
        issuer: issuer.to_string(),
        rating,
        text: text.to_string(),
    })
}

/// State shared by every command of one session.
pub struct SessionState {
    pub engine: VerificationEngine,
    pub store: Arc<InMemoryCredentialStore>,
    pub feedback: FeedbackBook,
}

impl SessionState {
    pub fn new(store: Arc<InMemoryCredentialStore>) -> Self {
        Self {
            engine: VerificationEngine::new(store.clone()),
            store,
            feedback: FeedbackBook::new(),
        }
    }
}

/// Run commands from `input` until it ends or `quit` is read.
pub fn run<R: BufRead, W: Write>(
    state: &SessionState,
    input: R,
    mut output: W,
    json: bool,
) -> anyhow::Result<()> {
    for line in input.lines() {
        let line = line?;
        let command = match SessionCommand::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(message) => {
                writeln!(output, "error: {}", message)?;
                continue;
            }
        };
        if command == SessionCommand::Quit {
            break;
        }
        let text = match execute(state, command, json) {
            Ok(text) => text,
            Err(e) => format!("error: {}\n", e),
        };
        output.write_all(text.as_bytes())?;
        output.flush()?;
    }
    tracing::debug!(session = %state.engine.session_id(), "session ended");
    Ok(())
}

fn execute(state: &SessionState, command: SessionCommand, json: bool) -> anyhow::Result<String> {
    let SessionState {
        engine,
        store,
        feedback,
    } = state;
    let text = match command {
        SessionCommand::VerifyId(text) => {
            let result = engine.verify_one(&VerificationQuery::from_form(&text, ""));
            if json {
                render::json(&result)?
            } else {
                render::verification(&result)
            }
        }
        SessionCommand::VerifyAddress(text) => {
            let result = engine.verify_one(&VerificationQuery::from_form("", &text));
            if json {
                render::json(&result)?
            } else {
                render::verification(&result)
            }
        }
        SessionCommand::Grant(id) => {
            if engine.request_permission(id) {
                format!("Permission Granted. You can now view credential {}.\n", id)
            } else {
                format!("Permission for credential {} was already granted.\n", id)
            }
        }
        SessionCommand::Batch(raw) => {
            let results = engine.verify_batch_input(&raw);
            if json {
                render::json(&results)?
            } else {
                render::batch(&results)
            }
        }
        SessionCommand::History => {
            let attempts = engine.history();
            if json {
                render::json(&attempts)?
            } else {
                render::history(&attempts)
            }
        }
        SessionCommand::Results => {
            let results = engine.batch_results();
            if json {
                render::json(&results)?
            } else {
                render::batch(&results)
            }
        }
        SessionCommand::Grants => {
            let ids: Vec<String> = engine.grants().iter().map(|id| id.to_string()).collect();
            format!("Granted: [{}]\n", ids.join(", "))
        }
        SessionCommand::List => listing(store.list().iter().map(|c| (c.id, c.holder_address.clone()))),
        SessionCommand::Holder(address) => {
            let held = store.find_all_by_address(&HolderAddress::new(address));
            listing(held.iter().map(|c| (c.id, c.holder_address.clone())))
        }
        SessionCommand::Issue {
            institution,
            request,
        } => {
            let credential = CredentialIssuer::new(institution, store.clone()).issue(request)?;
            if json {
                render::json(&credential)?
            } else {
                format!(
                    "Credential issued!\n{}",
                    render::credential_details(&credential)
                )
            }
        }
        SessionCommand::Feedback {
            issuer,
            rating,
            text,
        } => {
            let entry = feedback.submit(&issuer, &text, rating)?;
            format!(
                "Feedback for {} recorded ({}/{}).\n",
                entry.issuer,
                entry.rating,
                certitrust_verify::feedback::MAX_RATING
            )
        }
        SessionCommand::Feedbacks => {
            let entries = feedback.entries();
            if json {
                render::json(&entries)?
            } else {
                render::feedback(&entries)
            }
        }
        SessionCommand::Help => HELP.to_string(),
        SessionCommand::Quit => String::new(),
    };
    Ok(text)
}

/// Ids and holders only: listing never discloses credential details.
fn listing(rows: impl Iterator<Item = (CredentialId, HolderAddress)>) -> String {
    let mut out = String::new();
    for (id, holder) in rows {
        out.push_str(&format!("  {}  {}\n", id, holder));
    }
    if out.is_empty() {
        out.push_str("  (none)\n");
    }
    out
}
