//! Connection string prefix conventions
//!
//! Hosting platforms surface connection strings as environment variables whose
//! names carry a service prefix (`SQLCONNSTR_main`, `REDISCACHECONNSTR_cache`).
//! Matching variables are relocated under the `ConnectionStrings` section, and
//! the database conventions also get a `<name>_ProviderName` companion entry.

use crate::normalize::{combine, normalize, strip_prefix_ignore_case};

/// Section that receives every relocated connection string.
pub const CONNECTION_STRINGS_SECTION: &str = "ConnectionStrings";

/// Suffix appended to a connection string key to form its provider name key.
pub const PROVIDER_NAME_SUFFIX: &str = "_ProviderName";

/// A single connection string convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrefixRule {
    pub prefix: &'static str,
    /// Client library name emitted as `<name>_ProviderName`, when the convention has one
    pub provider_name: Option<&'static str>,
}

impl PrefixRule {
    const fn new(prefix: &'static str, provider_name: Option<&'static str>) -> Self {
        Self {
            prefix,
            provider_name,
        }
    }

    /// Case-insensitive "starts with" test against a raw variable name.
    pub fn matches(&self, key: &str) -> bool {
        self.strip(key).is_some()
    }

    /// The part of `key` after this rule's prefix, when the prefix matches.
    pub fn strip<'a>(&self, key: &'a str) -> Option<&'a str> {
        strip_prefix_ignore_case(key, self.prefix)
    }
}

/// Known conventions, scanned in order; the first match wins.
pub static PREFIX_RULES: [PrefixRule; 11] = [
    PrefixRule::new("MYSQLCONNSTR_", Some("MySql.Data.MySqlClient")),
    PrefixRule::new("SQLAZURECONNSTR_", Some("System.Data.SqlClient")),
    PrefixRule::new("SQLCONNSTR_", Some("System.Data.SqlClient")),
    PrefixRule::new("POSTGRESQLCONNSTR_", Some("Npgsql")),
    PrefixRule::new("APIHUBCONNSTR_", None),
    PrefixRule::new("DOCDBCONNSTR_", None),
    PrefixRule::new("EVENTHUBCONNSTR_", None),
    PrefixRule::new("NOTIFICATIONHUBCONNSTR_", None),
    PrefixRule::new("REDISCACHECONNSTR_", None),
    PrefixRule::new("SERVICEBUSCONNSTR_", None),
    PrefixRule::new("CUSTOMCONNSTR_", None),
];

/// Outcome of classifying one raw variable name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification<'a> {
    /// The name carries a known prefix; `remainder` is the name with it removed.
    ConnectionString {
        rule: &'static PrefixRule,
        remainder: &'a str,
    },
    /// Ordinary configuration variable.
    Generic,
}

/// Match `key` against [`PREFIX_RULES`].
///
/// A key that is exactly a prefix still matches, with an empty remainder.
pub fn classify(key: &str) -> Classification<'_> {
    PREFIX_RULES
        .iter()
        .find_map(|rule| {
            rule.strip(key)
                .map(|remainder| Classification::ConnectionString { rule, remainder })
        })
        .unwrap_or(Classification::Generic)
}

/// Normalized keys a matched connection string expands into.
///
/// Returns the `ConnectionStrings:<name>` key and, when the rule carries a
/// provider name, the `(ConnectionStrings:<name>_ProviderName, provider)` pair.
pub fn expand(
    rule: &PrefixRule,
    remainder: &str,
) -> (String, Option<(String, &'static str)>) {
    let key = combine(&[CONNECTION_STRINGS_SECTION, &normalize(remainder)]);
    let provider = rule
        .provider_name
        .map(|provider| (format!("{}{}", key, PROVIDER_NAME_SUFFIX), provider));
    (key, provider)
}
