//! Token signing
//!
//! The inverse of [`Parser::parse`](crate::Parser::parse): serialize claims,
//! sign `header.payload` and append the signature.

use crate::algorithm::SigningMethod;
use crate::codec;
use crate::error::{Error, Result};
use crate::keys::Key;
use crate::token::Header;

use serde::Serialize;

/// Sign `claims` with a default header (`typ: JWT`)
pub fn sign<C: Serialize + ?Sized>(
    method: &dyn SigningMethod,
    claims: &C,
    key: &Key,
) -> Result<String> {
    sign_with_header(method, Header::new(method.alg()), claims, key)
}

/// Sign `claims` with a caller-supplied header
///
/// `header.alg` is always replaced with the method's own name.
pub fn sign_with_header<C: Serialize + ?Sized>(
    method: &dyn SigningMethod,
    mut header: Header,
    claims: &C,
    key: &Key,
) -> Result<String> {
    header.alg = method.alg().to_string();

    let header_segment = codec::encode_json_segment(&header)
        .map_err(|e| Error::Signing(format!("header serialization: {e}")))?;

    let payload = serde_json::to_vec(claims)
        .map_err(|e| Error::Signing(format!("claims serialization: {e}")))?;
    if payload.first() != Some(&b'{') {
        return Err(Error::Signing(
            "claims must serialize to a JSON object".to_string(),
        ));
    }

    let signing_input = format!("{header_segment}.{}", codec::encode_segment(&payload));
    let signature = method.sign(signing_input.as_bytes(), key)?;

    tracing::trace!(alg = %header.alg, kid = ?header.kid, "token signed");
    Ok(codec::assemble(&signing_input, &signature))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::{NoneMethod, HS256};
    use crate::claims::MapClaims;

    #[test]
    fn test_sign_produces_three_segments() {
        let key = Key::symmetric(b"secret".to_vec());
        let token = sign(&HS256, &MapClaims::new().with("sub", "alice"), &key).unwrap();

        let segments: Vec<&str> = token.split('.').collect();
        assert_eq!(segments.len(), 3);
        assert_eq!(segments[0], "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9");
        assert_eq!(segments[1], "eyJzdWIiOiJhbGljZSJ9");
    }

    #[test]
    fn test_header_alg_is_overwritten() {
        let key = Key::symmetric(b"secret".to_vec());
        let header = Header::new("none").with_kid("k1");
        let token = sign_with_header(&HS256, header, &MapClaims::new(), &key).unwrap();

        let raw = codec::decode(&token).unwrap();
        assert_eq!(raw.header.alg, "HS256");
        assert_eq!(raw.header.kid.as_deref(), Some("k1"));
    }

    #[test]
    fn test_none_method_has_empty_signature() {
        let key = Key::symmetric(b"unused".to_vec());
        let token = sign(&NoneMethod, &MapClaims::new(), &key).unwrap();
        assert!(token.ends_with('.'));
    }

    #[test]
    fn test_non_object_claims_rejected() {
        let key = Key::symmetric(b"secret".to_vec());
        assert!(matches!(
            sign(&HS256, &vec![1, 2, 3], &key),
            Err(Error::Signing(_))
        ));
    }
}
