//! Core value types used by the console state: wire records and status lines.

use std::fmt;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use zeroize::Zeroizing;

use crate::util::{de_opt_flag, de_opt_u64, de_string_list, de_text, de_truthy};

/// Visual weight of a status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusTone {
    /// Progress or success.
    #[default]
    Neutral,
    /// Failure.
    Error,
}

/// One line of inline status text; a new status always replaces the previous one.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StatusLine {
    /// Message shown to the operator.
    pub text: String,
    /// Neutral or error styling.
    pub tone: StatusTone,
}

impl StatusLine {
    /// Neutral status.
    pub fn neutral(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tone: StatusTone::Neutral,
        }
    }

    /// Error status.
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tone: StatusTone::Error,
        }
    }

    /// `true` when styled as an error.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.tone == StatusTone::Error
    }
}

/// What: Connection settings as reported by `GET /api/settings`.
///
/// Details:
/// - The password itself is never part of this record; only `password_set`.
/// - Every field decodes leniently: null, absent and empty all become `None`/`false`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SettingsRecord {
    /// NNTP server host.
    #[serde(rename = "NNTP_HOST", default, deserialize_with = "de_text")]
    pub host: Option<String>,
    /// NNTP port (number or string on the wire).
    #[serde(rename = "NNTP_PORT", default, deserialize_with = "de_text")]
    pub port: Option<String>,
    /// TLS toggle.
    #[serde(rename = "NNTP_SSL", default, deserialize_with = "de_truthy")]
    pub ssl: bool,
    /// NNTP username.
    #[serde(rename = "NNTP_USER", default, deserialize_with = "de_text")]
    pub user: Option<String>,
    /// Whether the server holds a password.
    #[serde(rename = "NNTP_PASS_SET", default, deserialize_with = "de_truthy")]
    pub password_set: bool,
    /// Article lookback window.
    #[serde(rename = "NNTP_LOOKBACK", default, deserialize_with = "de_text")]
    pub lookback: Option<String>,
    /// Free-text group override.
    #[serde(rename = "NNTP_GROUPS", default, deserialize_with = "de_text")]
    pub groups: Option<String>,
    /// Background scan interval.
    #[serde(
        rename = "TRICERAPOST_SCHEDULER_INTERVAL",
        default,
        deserialize_with = "de_text"
    )]
    pub scheduler_interval: Option<String>,
    /// Write generated NZBs to disk; `None` when the server omitted it.
    #[serde(
        rename = "TRICERAPOST_SAVE_NZBS",
        default,
        deserialize_with = "de_opt_flag"
    )]
    pub save_nzbs: Option<bool>,
    /// Output directory for generated NZBs.
    #[serde(rename = "TRICERAPOST_NZB_DIR", default, deserialize_with = "de_text")]
    pub nzb_dir: Option<String>,
}

/// What: What a settings submission does to the stored NNTP password.
///
/// Details:
/// - Exactly one variant per submission; setting wins over clearing (see [`Self::resolve`]).
/// - Serializes as the fields it contributes to the update payload: nothing, `NNTP_PASS`, or
///   `clear_password: true`.
/// - `Debug` never prints the secret.
#[derive(Clone, Default)]
pub enum SecretEditIntent {
    /// Leave the stored password alone.
    #[default]
    Unchanged,
    /// Replace the stored password.
    SetTo(Zeroizing<String>),
    /// Remove the stored password.
    Clear,
}

impl SecretEditIntent {
    /// What: Decide the intent from the form's secret input and clear checkbox.
    ///
    /// Inputs:
    /// - `typed`: Current secret input (may be empty).
    /// - `clear`: Clear checkbox state.
    ///
    /// Output:
    /// - `SetTo` for any non-empty input, else `Clear` if requested, else `Unchanged`.
    #[must_use]
    pub fn resolve(typed: &str, clear: bool) -> Self {
        if !typed.is_empty() {
            Self::SetTo(Zeroizing::new(typed.to_string()))
        } else if clear {
            Self::Clear
        } else {
            Self::Unchanged
        }
    }
}

impl fmt::Debug for SecretEditIntent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unchanged => f.write_str("Unchanged"),
            Self::SetTo(_) => f.write_str("SetTo(<redacted>)"),
            Self::Clear => f.write_str("Clear"),
        }
    }
}

impl Serialize for SecretEditIntent {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Unchanged => serializer.serialize_map(Some(0))?.end(),
            Self::SetTo(secret) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("NNTP_PASS", secret.as_str())?;
                map.end()
            }
            Self::Clear => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("clear_password", &true)?;
                map.end()
            }
        }
    }
}

/// What: Partial-update payload for `POST /api/settings`.
///
/// Details:
/// - Numeric fields are sent exactly as typed; the backend validates them.
/// - Secret fields come from the flattened [`SecretEditIntent`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct SettingsUpdate {
    /// NNTP server host (trimmed).
    #[serde(rename = "NNTP_HOST")]
    pub host: String,
    /// NNTP port as typed.
    #[serde(rename = "NNTP_PORT")]
    pub port: String,
    /// TLS toggle.
    #[serde(rename = "NNTP_SSL")]
    pub ssl: bool,
    /// NNTP username (trimmed).
    #[serde(rename = "NNTP_USER")]
    pub user: String,
    /// Lookback as typed.
    #[serde(rename = "NNTP_LOOKBACK")]
    pub lookback: String,
    /// Group override (trimmed).
    #[serde(rename = "NNTP_GROUPS")]
    pub groups: String,
    /// Scheduler interval as typed.
    #[serde(rename = "TRICERAPOST_SCHEDULER_INTERVAL")]
    pub scheduler_interval: String,
    /// Save NZBs to disk.
    #[serde(rename = "TRICERAPOST_SAVE_NZBS")]
    pub save_nzbs: bool,
    /// NZB output directory (trimmed).
    #[serde(rename = "TRICERAPOST_NZB_DIR")]
    pub nzb_dir: String,
    /// Password change, if any.
    #[serde(flatten)]
    pub secret: SecretEditIntent,
}

/// Scan counters from `GET /api/status`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScanStatus {
    /// Groups scanned.
    #[serde(default, deserialize_with = "de_text")]
    pub groups_scanned: Option<String>,
    /// Posts scanned.
    #[serde(default, deserialize_with = "de_text")]
    pub posts_scanned: Option<String>,
    /// Candidate sets found.
    #[serde(default, deserialize_with = "de_text")]
    pub sets_found: Option<String>,
    /// Sets rejected by filters.
    #[serde(default, deserialize_with = "de_text")]
    pub sets_rejected: Option<String>,
    /// NZBs found in posts.
    #[serde(default, deserialize_with = "de_text")]
    pub nzbs_found: Option<String>,
    /// NZBs generated locally.
    #[serde(default, deserialize_with = "de_text")]
    pub nzbs_generated: Option<String>,
}

/// Candidate release from `GET /api/releases`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Release {
    /// Subject-derived name.
    #[serde(default, deserialize_with = "de_text")]
    pub name: Option<String>,
    /// Best guess at the release's file name.
    #[serde(default, deserialize_with = "de_text")]
    pub filename_guess: Option<String>,
    /// Human-readable size.
    #[serde(default, deserialize_with = "de_text")]
    pub size_human: Option<String>,
    /// Parts seen so far.
    #[serde(default, deserialize_with = "de_opt_u64")]
    pub parts_received: Option<u64>,
    /// Parts announced by the poster.
    #[serde(default, deserialize_with = "de_opt_u64")]
    pub parts_expected: Option<u64>,
    /// Content type (`movie`, `tv`, `unknown`, ...).
    #[serde(rename = "type", default, deserialize_with = "de_text")]
    pub kind: Option<String>,
    /// Resolution/quality tag.
    #[serde(default, deserialize_with = "de_text")]
    pub quality: Option<String>,
    /// Source tag (`WEB-DL`, `BluRay`, ...).
    #[serde(default, deserialize_with = "de_text")]
    pub source: Option<String>,
    /// Video codec.
    #[serde(default, deserialize_with = "de_text")]
    pub codec: Option<String>,
    /// Audio tag.
    #[serde(default, deserialize_with = "de_text")]
    pub audio: Option<String>,
    /// Subtitles detected.
    #[serde(default, deserialize_with = "de_truthy")]
    pub subtitles: bool,
    /// Detected languages.
    #[serde(default, deserialize_with = "de_string_list")]
    pub languages: Vec<String>,
    /// Newsgroups the release was seen in.
    #[serde(default, deserialize_with = "de_string_list")]
    pub groups: Vec<String>,
    /// An NZB has already been generated for this release.
    #[serde(default, deserialize_with = "de_truthy")]
    pub nzb_created: bool,
}

/// Generated NZB from `GET /api/nzbs`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GeneratedFile {
    /// Display name.
    #[serde(default, deserialize_with = "de_text")]
    pub name: Option<String>,
    /// Origin (`generated`, `found`, ...).
    #[serde(default, deserialize_with = "de_text")]
    pub source: Option<String>,
    /// Payload size.
    #[serde(default, deserialize_with = "de_opt_u64")]
    pub bytes: Option<u64>,
    /// Newsgroup.
    #[serde(default, deserialize_with = "de_text")]
    pub group: Option<String>,
    /// Opaque download key.
    #[serde(default, deserialize_with = "de_text")]
    pub key: Option<String>,
}

/// Reply of `POST /api/nzb/save_all`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SaveAllReply {
    /// Number of NZBs written; absent counts as zero.
    #[serde(default, deserialize_with = "de_opt_u64")]
    pub saved: Option<u64>,
}

/// Body of `POST /api/admin/clear_db`.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ClearDatabaseRequest {
    /// Always `true`; the server refuses the reset otherwise.
    pub confirm: bool,
}

/// Downloaded NZB payload.
#[derive(Debug, Clone)]
pub struct NzbFile {
    /// File name from the server, if supplied.
    pub filename: Option<String>,
    /// File contents.
    pub bytes: Vec<u8>,
}

/// What: Monotonic ids correlating load requests with their responses.
///
/// Details:
/// - Each issued load gets a fresh id; only the response for the latest id is applied so an
///   older, slower reply can never overwrite newer server state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTickets {
    /// Id handed out by the next [`Self::issue`].
    next: u64,
    /// Most recently issued id (0 = none yet).
    latest: u64,
}

impl Default for LoadTickets {
    fn default() -> Self {
        Self { next: 1, latest: 0 }
    }
}

impl LoadTickets {
    /// Issue a new id and mark it as the latest.
    pub const fn issue(&mut self) -> u64 {
        let id = self.next;
        self.next += 1;
        self.latest = id;
        id
    }

    /// `true` when `id` is the most recently issued one.
    #[must_use]
    pub const fn is_latest(&self, id: u64) -> bool {
        id != 0 && id == self.latest
    }
}
