//! Provider construction by name.
//!
//! Maps a provider-name string to a constructed provider instance. Unknown
//! names are signalled by absence, not by an error.

use std::sync::Arc;

use crate::provider::bnm::BnmProvider;
use crate::provider::fixer::FixerProvider;
use crate::provider::RateProvider;

/// The rate providers this crate knows how to construct.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProviderKind {
    /// National Bank of Moldova CSV export
    Bnm,
    /// data.fixer.io JSON API (needs an API key)
    Fixer,
}

impl ProviderKind {
    /// Match a provider name against the provider ID constants.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "BNM" => Some(Self::Bnm),
            "FIXER" => Some(Self::Fixer),
            _ => None,
        }
    }
}

/// Construct a provider by name.
///
/// `api_key` is forwarded only to providers that need one. Returns `None`
/// for unrecognized names, and for keyed providers when no key is supplied.
pub fn get_provider(name: &str, api_key: Option<&str>) -> Option<Arc<dyn RateProvider>> {
    match ProviderKind::from_name(name)? {
        ProviderKind::Bnm => Some(Arc::new(BnmProvider::new())),
        ProviderKind::Fixer => {
            let key = api_key?;
            Some(Arc::new(FixerProvider::new(key.to_string())))
        }
    }
}
