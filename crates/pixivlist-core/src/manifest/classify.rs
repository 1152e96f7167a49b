//! Classification of the first column of a manifest line.
//!
//! Accepted shapes:
//! - `12345` (member id)
//! - `https://www.pixiv.net/member.php?id=12345`
//! - `https://www.pixiv.net/member_illust.php?id=12345`
//! - `https://www.pixiv.net/artworks/67890` and `https://www.pixiv.net/en/artworks/67890/`

use url::Url;

use super::error::LineError;

const MEMBER_PATHS: [&str; 2] = ["/member.php", "/member_illust.php"];
const LOCALE_PREFIX: &str = "/en";
const ARTWORKS_PREFIX: &str = "/artworks/";

/// What a manifest line asks to download.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target {
    /// Every work of a creator.
    Member(u64),
    /// One single work.
    Content(u64),
}

impl Target {
    pub fn id(self) -> u64 {
        match self {
            Target::Member(id) | Target::Content(id) => id,
        }
    }

    pub fn is_content(self) -> bool {
        matches!(self, Target::Content(_))
    }
}

/// Shape of a token, before its identifier is parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind<'a> {
    /// Token does not start with `http`; expected to be a plain member id.
    BareId(&'a str),
    /// Profile link; `id` is the first non-empty `id` query value.
    MemberQueryUrl { id: Option<String> },
    /// Artwork link; `segment` is what follows `/artworks/`, trailing `/` removed.
    ArtworksUrl { segment: String },
    /// Anything else starting with `http`, including unparseable URLs.
    Unsupported,
}

/// Determines the shape of `token` without interpreting its identifier.
pub fn classify_token(token: &str) -> TokenKind<'_> {
    if !token.starts_with("http") {
        return TokenKind::BareId(token);
    }
    let Ok(url) = Url::parse(token) else {
        return TokenKind::Unsupported;
    };

    let path = url.path();
    if MEMBER_PATHS.contains(&path) {
        let id = url
            .query_pairs()
            .find(|(key, value)| key == "id" && !value.is_empty())
            .map(|(_, value)| value.into_owned());
        return TokenKind::MemberQueryUrl { id };
    }

    let unprefixed = path.strip_prefix(LOCALE_PREFIX).unwrap_or(path);
    match unprefixed.strip_prefix(ARTWORKS_PREFIX) {
        Some(rest) => TokenKind::ArtworksUrl {
            segment: rest.trim_end_matches('/').to_string(),
        },
        None => TokenKind::Unsupported,
    }
}

impl TokenKind<'_> {
    /// Parses the identifier carried by this shape. `token` is the original
    /// text, used in error messages.
    pub fn resolve(self, token: &str) -> Result<Target, LineError> {
        match self {
            TokenKind::BareId(raw) => parse_id(raw)
                .map(Target::Member)
                .ok_or_else(|| LineError::InvalidId {
                    token: token.to_string(),
                }),
            TokenKind::MemberQueryUrl { id: Some(raw) } => parse_id(&raw)
                .map(Target::Member)
                .ok_or_else(|| LineError::InvalidId {
                    token: token.to_string(),
                }),
            TokenKind::MemberQueryUrl { id: None } => Err(LineError::MissingMemberId {
                url: token.to_string(),
            }),
            TokenKind::ArtworksUrl { segment } => parse_id(&segment)
                .map(Target::Content)
                .ok_or_else(|| LineError::InvalidContentId {
                    url: token.to_string(),
                }),
            TokenKind::Unsupported => Err(LineError::UnsupportedUrl {
                url: token.to_string(),
            }),
        }
    }
}

/// Classifies `token` and parses its identifier.
pub fn classify(token: &str) -> Result<Target, LineError> {
    classify_token(token).resolve(token)
}

fn parse_id(raw: &str) -> Option<u64> {
    raw.parse().ok()
}
