use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::claims::TokenKind;
use super::errors::ConfigError;
use super::errors::TokenError;

/// Minimum signing-secret length in bytes, enforced at construction.
pub const MIN_SECRET_LEN: usize = 32;

/// Stateless codec for signed session tokens.
///
/// Minting and verification are pure computations over immutable keys; one
/// instance is shared freely across request-handling tasks without locking.
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl TokenCodec {
    /// Build a codec from the process configuration.
    ///
    /// # Arguments
    /// * `secret` - Shared signing secret, at least [`MIN_SECRET_LEN`] bytes
    /// * `algorithm` - Signing algorithm identifier ("HS256", "HS384", "HS512")
    /// * `access_ttl` - Lifetime of access tokens
    /// * `refresh_ttl` - Lifetime of refresh tokens
    ///
    /// # Errors
    /// * `MisconfiguredSecret` - Secret shorter than the minimum
    /// * `UnsupportedAlgorithm` - Identifier is not a known HMAC variant
    /// * `NonPositiveTtl` - Either TTL is zero or negative
    pub fn new(
        secret: &[u8],
        algorithm: &str,
        access_ttl: Duration,
        refresh_ttl: Duration,
    ) -> Result<Self, ConfigError> {
        if secret.len() < MIN_SECRET_LEN {
            return Err(ConfigError::MisconfiguredSecret {
                min: MIN_SECRET_LEN,
                actual: secret.len(),
            });
        }

        let algorithm = parse_algorithm(algorithm)?;

        if access_ttl <= Duration::zero() {
            return Err(ConfigError::NonPositiveTtl("access"));
        }
        if refresh_ttl <= Duration::zero() {
            return Err(ConfigError::NonPositiveTtl("refresh"));
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm,
            access_ttl,
            refresh_ttl,
        })
    }

    /// TTL applied to tokens of the given kind.
    pub fn ttl(&self, kind: TokenKind) -> Duration {
        match kind {
            TokenKind::Access => self.access_ttl,
            TokenKind::Refresh => self.refresh_ttl,
        }
    }

    /// Mint a signed token for `subject`, issued at `now`.
    ///
    /// Two mints within the same second for the same subject and kind may
    /// produce identical tokens; uniqueness is not guaranteed, only
    /// freshness bounded by the one-second timestamp resolution.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token signing failed
    pub fn mint(
        &self,
        subject: i64,
        kind: TokenKind,
        now: DateTime<Utc>,
    ) -> Result<String, TokenError> {
        let claims = Claims {
            sub: subject.to_string(),
            exp: (now + self.ttl(kind)).timestamp(),
            iat: now.timestamp(),
            kind,
        };

        encode(&Header::new(self.algorithm), &claims, &self.encoding_key)
            .map_err(|e| TokenError::EncodingFailed(e.to_string()))
    }

    /// Verify a token's signature, expiry, and kind at instant `now`.
    ///
    /// Tokens are valid on `[iat, exp)`: presentation at exactly the
    /// expiration timestamp is already rejected. Expiry is checked against
    /// the caller-supplied clock with no leeway, not the JWT library's
    /// internal clock.
    ///
    /// # Errors
    /// * `Malformed` - Structure cannot be parsed or the signature fails
    /// * `Expired` - `now >= exp`
    /// * `WrongKind` - Claim kind differs from `expected_kind`
    pub fn verify(
        &self,
        token: &str,
        expected_kind: TokenKind,
        now: DateTime<Utc>,
    ) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(self.algorithm);
        // Expiry is enforced below against the caller's clock.
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|e| TokenError::Malformed(e.to_string()))?;
        let claims = token_data.claims;

        if now.timestamp() >= claims.exp {
            return Err(TokenError::Expired);
        }

        if claims.kind != expected_kind {
            return Err(TokenError::WrongKind {
                expected: expected_kind,
                actual: claims.kind,
            });
        }

        Ok(claims)
    }
}

fn parse_algorithm(identifier: &str) -> Result<Algorithm, ConfigError> {
    match identifier {
        "HS256" => Ok(Algorithm::HS256),
        "HS384" => Ok(Algorithm::HS384),
        "HS512" => Ok(Algorithm::HS512),
        other => Err(ConfigError::UnsupportedAlgorithm(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    const SECRET: &[u8] = b"test_secret_key_at_least_32_bytes!";

    fn test_codec() -> TokenCodec {
        TokenCodec::new(SECRET, "HS256", Duration::minutes(30), Duration::days(7))
            .expect("Failed to build codec")
    }

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_mint_and_verify_roundtrip() {
        let codec = test_codec();
        let now = fixed_now();

        let token = codec
            .mint(42, TokenKind::Access, now)
            .expect("Failed to mint");

        let claims = codec
            .verify(&token, TokenKind::Access, now)
            .expect("Failed to verify");

        assert_eq!(claims.subject().unwrap(), 42);
        assert_eq!(claims.kind, TokenKind::Access);
        assert_eq!(claims.iat, now.timestamp());
        assert_eq!(claims.exp, (now + Duration::minutes(30)).timestamp());
    }

    #[test]
    fn test_token_valid_until_just_before_expiry() {
        let codec = test_codec();
        let now = fixed_now();
        let token = codec
            .mint(1, TokenKind::Access, now)
            .expect("Failed to mint");

        let last_valid_instant = now + Duration::minutes(30) - Duration::seconds(1);
        assert!(codec
            .verify(&token, TokenKind::Access, last_valid_instant)
            .is_ok());
    }

    #[test]
    fn test_token_invalid_at_exact_expiry() {
        let codec = test_codec();
        let now = fixed_now();
        let token = codec
            .mint(1, TokenKind::Access, now)
            .expect("Failed to mint");

        // Valid on [iat, exp): the boundary instant is already rejected
        let at_expiry = now + Duration::minutes(30);
        assert!(matches!(
            codec.verify(&token, TokenKind::Access, at_expiry),
            Err(TokenError::Expired)
        ));

        let after_expiry = now + Duration::minutes(31);
        assert!(matches!(
            codec.verify(&token, TokenKind::Access, after_expiry),
            Err(TokenError::Expired)
        ));
    }

    #[test]
    fn test_kind_confusion_rejected() {
        let codec = test_codec();
        let now = fixed_now();

        let access = codec
            .mint(1, TokenKind::Access, now)
            .expect("Failed to mint");
        let refresh = codec
            .mint(1, TokenKind::Refresh, now)
            .expect("Failed to mint");

        assert!(matches!(
            codec.verify(&access, TokenKind::Refresh, now),
            Err(TokenError::WrongKind {
                expected: TokenKind::Refresh,
                actual: TokenKind::Access,
            })
        ));
        assert!(matches!(
            codec.verify(&refresh, TokenKind::Access, now),
            Err(TokenError::WrongKind { .. })
        ));
    }

    #[test]
    fn test_expired_wrong_kind_token_rejected() {
        let codec = test_codec();
        let now = fixed_now();
        let access = codec
            .mint(1, TokenKind::Access, now)
            .expect("Failed to mint");

        // Wrong kind and expired: still fails, whichever check fires
        let much_later = now + Duration::days(30);
        assert!(codec.verify(&access, TokenKind::Refresh, much_later).is_err());
    }

    #[test]
    fn test_garbage_token_is_malformed() {
        let codec = test_codec();

        assert!(matches!(
            codec.verify("not.a.token", TokenKind::Access, fixed_now()),
            Err(TokenError::Malformed(_))
        ));
        assert!(matches!(
            codec.verify("", TokenKind::Access, fixed_now()),
            Err(TokenError::Malformed(_))
        ));
    }

    #[test]
    fn test_wrong_secret_is_malformed() {
        let codec = test_codec();
        let other = TokenCodec::new(
            b"another_secret_key_also_32_bytes!!",
            "HS256",
            Duration::minutes(30),
            Duration::days(7),
        )
        .expect("Failed to build codec");

        let now = fixed_now();
        let token = codec
            .mint(1, TokenKind::Access, now)
            .expect("Failed to mint");

        assert!(matches!(
            other.verify(&token, TokenKind::Access, now),
            Err(TokenError::Malformed(_))
        ));
    }

    #[test]
    fn test_access_and_refresh_ttls_differ() {
        let codec = test_codec();
        let now = fixed_now();

        let access = codec
            .mint(1, TokenKind::Access, now)
            .expect("Failed to mint");
        let refresh = codec
            .mint(1, TokenKind::Refresh, now)
            .expect("Failed to mint");

        let access_claims = codec.verify(&access, TokenKind::Access, now).unwrap();
        let refresh_claims = codec.verify(&refresh, TokenKind::Refresh, now).unwrap();

        assert_eq!(
            access_claims.exp,
            (now + Duration::minutes(30)).timestamp()
        );
        assert_eq!(refresh_claims.exp, (now + Duration::days(7)).timestamp());
    }

    #[test]
    fn test_same_second_mints_collide() {
        let codec = test_codec();
        let now = fixed_now();

        // Accepted property of the design: identical inputs within one
        // second of resolution produce identical tokens.
        let first = codec.mint(1, TokenKind::Access, now).unwrap();
        let second = codec.mint(1, TokenKind::Access, now).unwrap();
        assert_eq!(first, second);

        let later = codec
            .mint(1, TokenKind::Access, now + Duration::seconds(1))
            .unwrap();
        assert_ne!(first, later);
    }

    #[test]
    fn test_short_secret_rejected() {
        let result = TokenCodec::new(
            b"too_short",
            "HS256",
            Duration::minutes(30),
            Duration::days(7),
        );

        assert!(matches!(
            result,
            Err(ConfigError::MisconfiguredSecret { min: 32, actual: 9 })
        ));
    }

    #[test]
    fn test_unknown_algorithm_rejected() {
        let result = TokenCodec::new(SECRET, "RS256", Duration::minutes(30), Duration::days(7));

        assert!(matches!(
            result,
            Err(ConfigError::UnsupportedAlgorithm(_))
        ));
    }

    #[test]
    fn test_non_positive_ttl_rejected() {
        let result = TokenCodec::new(SECRET, "HS256", Duration::zero(), Duration::days(7));
        assert!(matches!(result, Err(ConfigError::NonPositiveTtl("access"))));

        let result = TokenCodec::new(SECRET, "HS256", Duration::minutes(30), Duration::seconds(-1));
        assert!(matches!(result, Err(ConfigError::NonPositiveTtl("refresh"))));
    }

    #[test]
    fn test_hs512_roundtrip() {
        let codec = TokenCodec::new(SECRET, "HS512", Duration::minutes(5), Duration::days(1))
            .expect("Failed to build codec");
        let now = fixed_now();

        let token = codec
            .mint(9, TokenKind::Refresh, now)
            .expect("Failed to mint");
        let claims = codec
            .verify(&token, TokenKind::Refresh, now)
            .expect("Failed to verify");

        assert_eq!(claims.subject().unwrap(), 9);
    }

    #[test]
    fn test_token_shape_is_three_segments() {
        let codec = test_codec();
        let token = codec
            .mint(1, TokenKind::Access, fixed_now())
            .expect("Failed to mint");

        assert_eq!(token.split('.').count(), 3);
    }
}
