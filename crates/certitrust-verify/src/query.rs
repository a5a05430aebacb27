use std::fmt;

use certitrust_core::{CredentialId, HolderAddress};

/// What a single store lookup is keyed on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupKey {
    Id(CredentialId),
    Address(HolderAddress),
    /// An id token that is not a positive integer. Never matches.
    Malformed(String),
}

impl LookupKey {
    /// Interpret a raw id token, trimming surrounding whitespace.
    pub fn from_id_token(token: &str) -> Self {
        match CredentialId::parse(token) {
            Ok(id) => Self::Id(id),
            Err(_) => Self::Malformed(token.trim().to_string()),
        }
    }
}

impl fmt::Display for LookupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "{}", id),
            Self::Address(address) => write!(f, "{}", address),
            Self::Malformed(raw) => write!(f, "{}", raw),
        }
    }
}

/// A single-credential verification request.
///
/// When both an id and an address are supplied, the id wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VerificationQuery {
    id: Option<IdField>,
    address: Option<HolderAddress>,
}

/// A parsed id together with the trimmed text it was parsed from.
#[derive(Debug, Clone, PartialEq, Eq)]
struct IdField {
    key: LookupKey,
    text: String,
}

impl VerificationQuery {
    pub fn new(id: Option<CredentialId>, address: Option<HolderAddress>) -> Self {
        Self {
            id: id.map(|id| IdField {
                key: LookupKey::Id(id),
                text: id.to_string(),
            }),
            address,
        }
    }

    pub fn by_id(id: CredentialId) -> Self {
        Self::new(Some(id), None)
    }

    pub fn by_address(address: impl Into<String>) -> Self {
        Self::new(None, Some(HolderAddress::new(address)))
    }

    /// Build a query from the two free-text fields of a lookup form.
    ///
    /// Fields that are empty or whitespace-only count as absent, so an id
    /// field of `"  "` falls through to the address field rather than
    /// being looked up (and audited) as an id. Id text that is not a
    /// positive integer is kept as a malformed key: it still shadows the
    /// address and the attempt is audited as `Not Found`. Either way the
    /// audit records the trimmed text as typed, so `"02"` stays `"02"`.
    pub fn from_form(id_text: &str, address_text: &str) -> Self {
        let id_text = id_text.trim();
        let address_text = address_text.trim();
        let id = (!id_text.is_empty()).then(|| IdField {
            key: LookupKey::from_id_token(id_text),
            text: id_text.to_string(),
        });
        let address = (!address_text.is_empty()).then(|| HolderAddress::new(address_text));
        Self { id, address }
    }

    /// The key to look up, or `None` when nothing was supplied.
    pub fn key(&self) -> Option<LookupKey> {
        self.resolve().map(|(key, _)| key)
    }

    /// The key to look up paired with the text the caller supplied for it.
    pub fn resolve(&self) -> Option<(LookupKey, String)> {
        match (&self.id, &self.address) {
            (Some(field), _) => Some((field.key.clone(), field.text.clone())),
            (None, Some(address)) => Some((
                LookupKey::Address(address.clone()),
                address.as_str().to_string(),
            )),
            (None, None) => None,
        }
    }
}
