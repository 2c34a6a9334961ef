//! # Custom Extractors
//!
//! [`PnumPath`] pulls the `{pnum}` path segment and trims it. The trimmed
//! text is what every route echoes back in its `pnum` field, valid or not.
//!
//! A segment whose percent-decoding is not valid UTF-8 is decoded lossily
//! (invalid bytes become U+FFFD) so that it still reaches validation and
//! fails there with an invalid-characters reason.

use axum::extract::path::ErrorKind;
use axum::extract::rejection::PathRejection;
use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;
use percent_encoding::percent_decode_str;
use pnr_core::{Pnum, PnumError};

use crate::error::AppError;

/// Trimmed, not yet validated `{pnum}` path segment.
#[derive(Debug, Clone)]
pub struct PnumPath(pub String);

impl PnumPath {
    /// The trimmed candidate.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Validate the candidate.
    pub fn parse(&self) -> Result<Pnum, PnumError> {
        Pnum::parse(&self.0)
    }
}

impl<S> FromRequestParts<S> for PnumPath
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let raw = match Path::<String>::from_request_parts(parts, state).await {
            Ok(Path(raw)) => raw,
            Err(PathRejection::FailedToDeserializePathParams(err))
                if matches!(err.kind(), ErrorKind::InvalidUtf8InPathParam { .. }) =>
            {
                lossy_last_segment(parts.uri.path())
            }
            Err(err) => return Err(AppError::BadRequest(err.body_text())),
        };
        Ok(Self(raw.trim().to_string()))
    }
}

/// `{pnum}` is the final segment of every route that takes it.
fn lossy_last_segment(path: &str) -> String {
    let segment = path.rsplit('/').next().unwrap_or_default();
    percent_decode_str(segment).decode_utf8_lossy().into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lossy_decode_replaces_invalid_bytes() {
        assert_eq!(lossy_last_segment("/pnums/isvalid/%FF"), "\u{FFFD}");
        assert_eq!(lossy_last_segment("/pnums/age/24%FF97"), "24\u{FFFD}97");
    }

    #[test]
    fn lossy_decode_keeps_valid_escapes() {
        assert_eq!(
            lossy_last_segment("/pnums/isvalid/%2024129745378%20"),
            " 24129745378 "
        );
    }

    #[test]
    fn replacement_character_is_an_invalid_character() {
        let path = PnumPath(lossy_last_segment("/pnums/age/%FF").trim().to_string());
        assert_eq!(path.parse(), Err(PnumError::InvalidCharacters));
    }
}
