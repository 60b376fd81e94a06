mod common;

use common::*;
use jwtkit::*;
use std::time::Duration;

fn token_for(claims: &MapClaims) -> String {
    sign(&HS256, claims, &hmac_keys().signing).unwrap()
}

fn claim_errors<C: FromPayload + StandardClaims + std::fmt::Debug>(
    result: Result<Token<C>>,
) -> ClaimErrors {
    match result {
        Err(Error::ClaimsInvalid(errors)) => errors,
        other => panic!("expected ClaimsInvalid, got {other:?}"),
    }
}

fn parse(builder: ParserBuilder, claims: &MapClaims) -> Result<Token<MapClaims>> {
    builder
        .build()
        .parse::<MapClaims, _>(&token_for(claims), &hmac_keys().verification)
}

#[test]
fn expiration_boundary() {
    let at_expiry = MapClaims::new().with("exp", NOW);
    assert!(parse(parser(), &at_expiry).is_ok());

    let just_expired = MapClaims::new().with("exp", NOW - 1);
    let errors = claim_errors(parse(parser(), &just_expired));
    assert!(matches!(
        errors.as_slice(),
        [ClaimError::Expired { expired_at, .. }] if *expired_at == (NOW - 1) as f64
    ));
}

#[test]
fn one_second_of_leeway_covers_one_second_late() {
    let claims = MapClaims::new().with("exp", NOW - 1);
    assert!(parse(parser().leeway(Duration::from_secs(1)), &claims).is_ok());
    assert!(parse(parser().leeway(Duration::from_secs(60)), &claims).is_ok());
}

#[test]
fn fractional_expiration() {
    let claims = MapClaims::new().with("exp", NOW as f64 - 0.5);
    assert!(matches!(
        claim_errors(parse(parser(), &claims)).as_slice(),
        [ClaimError::Expired { .. }]
    ));
}

#[test]
fn leeway_extends_every_time_check() {
    let claims = MapClaims::new()
        .with("exp", NOW - 30)
        .with("nbf", NOW + 30)
        .with("iat", NOW + 30);

    assert_eq!(claim_errors(parse(parser(), &claims)).len(), 3);
    assert!(parse(parser().leeway(Duration::from_secs(30)), &claims).is_ok());
    assert_eq!(
        claim_errors(parse(parser().leeway(Duration::from_secs(29)), &claims)).len(),
        3
    );
}

#[test]
fn not_before_boundary() {
    assert!(parse(parser(), &MapClaims::new().with("nbf", NOW)).is_ok());
    assert!(matches!(
        claim_errors(parse(parser(), &MapClaims::new().with("nbf", NOW + 1))).as_slice(),
        [ClaimError::NotYetValid { .. }]
    ));
}

#[test]
fn issued_in_the_future() {
    assert!(parse(parser(), &MapClaims::new().with("iat", NOW)).is_ok());
    assert!(matches!(
        claim_errors(parse(parser(), &MapClaims::new().with("iat", NOW + 60))).as_slice(),
        [ClaimError::UsedBeforeIssued { .. }]
    ));
}

#[test]
fn audience_string_or_array() {
    let single = MapClaims::new().with("aud", "api");
    let many = MapClaims::new().with("aud", vec!["web", "api"]);
    let other = MapClaims::new().with("aud", vec!["web", "mobile"]);

    assert!(parse(parser().audience("api"), &single).is_ok());
    assert!(parse(parser().audience("api"), &many).is_ok());

    let errors = claim_errors(parse(parser().audience("api"), &other));
    assert_eq!(
        errors.as_slice(),
        [ClaimError::AudienceMismatch {
            expected: "api".to_string(),
            found: vec!["web".to_string(), "mobile".to_string()],
        }]
    );
}

#[test]
fn audience_membership() {
    let claims = MapClaims::new().with("aud", vec!["a", "b"]);

    assert!(parse(parser().audience("b"), &claims).is_ok());
    assert!(matches!(
        claim_errors(parse(parser().audience("c"), &claims)).as_slice(),
        [ClaimError::AudienceMismatch { .. }]
    ));
    assert!(parse(parser().audience("c").skip_audience_validation(), &claims).is_ok());
}

#[test]
fn missing_audience_fails_when_expected() {
    let errors = claim_errors(parse(parser().audience("api"), &MapClaims::new()));
    assert!(matches!(
        errors.as_slice(),
        [ClaimError::AudienceMismatch { found, .. }] if found.is_empty()
    ));

    assert!(parse(
        parser().audience("api").skip_audience_validation(),
        &MapClaims::new()
    )
    .is_ok());
}

#[test]
fn audience_ignored_when_not_configured() {
    let claims = MapClaims::new().with("aud", "somebody-else");
    assert!(parse(parser(), &claims).is_ok());
}

#[test]
fn issuer_and_subject_must_match_exactly() {
    let claims = MapClaims::new()
        .with("iss", "https://issuer.example/")
        .with("sub", "Alice");

    let errors = claim_errors(parse(
        parser().issuer("https://issuer.example").subject("alice"),
        &claims,
    ));
    assert_eq!(errors.len(), 2);
    assert!(errors.contains(|e| matches!(e, ClaimError::IssuerMismatch { .. })));
    assert!(errors.contains(|e| matches!(e, ClaimError::SubjectMismatch { .. })));
}

#[test]
fn require_expiration() {
    let errors = claim_errors(parse(parser().require_expiration(), &MapClaims::new()));
    assert_eq!(errors.as_slice(), [ClaimError::MissingClaim("exp".to_string())]);

    let claims = MapClaims::new().with("exp", NOW + 1);
    assert!(parse(parser().require_expiration(), &claims).is_ok());
}

#[test]
fn every_failure_reported_together() {
    let claims = MapClaims::new()
        .with("exp", NOW - 100)
        .with("nbf", NOW + 100)
        .with("iat", NOW + 100)
        .with("aud", "web")
        .with("iss", "rogue")
        .with("sub", "mallory");

    let errors = claim_errors(parse(
        parser().audience("api").issuer("trusted").subject("alice"),
        &claims,
    ));
    assert_eq!(errors.len(), 6);

    let message = Error::ClaimsInvalid(errors).to_string();
    assert!(message.contains("expired"), "{message}");
    assert!(message.contains("issuer"), "{message}");
}

#[test]
fn wrong_claim_types_are_reported() {
    let claims = MapClaims::new()
        .with("exp", "tomorrow")
        .with("iss", 42_i64)
        .with("aud", vec![ClaimValue::from("api"), ClaimValue::from(7_i64)]);

    let errors = claim_errors(parse(parser().issuer("x").audience("api"), &claims));
    assert_eq!(errors.len(), 3);
    assert!(errors
        .iter()
        .all(|e| matches!(e, ClaimError::InvalidType { .. })));
}

#[test]
fn null_registered_claim_is_invalid_type() {
    let claims = MapClaims::new().with("exp", ClaimValue::Null);
    assert_eq!(
        claim_errors(parse(parser(), &claims)).as_slice(),
        [ClaimError::InvalidType {
            claim: "exp".to_string(),
            expected: "number",
        }]
    );
}

#[test]
fn skip_claims_validation_accepts_anything_signed() {
    let claims = MapClaims::new()
        .with("exp", NOW - 100)
        .with("iss", "rogue");
    let parsed = parse(
        parser().issuer("trusted").require_expiration().skip_claims_validation(),
        &claims,
    )
    .unwrap();
    assert_eq!(parsed.claims().get_str("iss"), Some("rogue"));
}

#[test]
fn decimal_numbers_keep_their_text() {
    let keys = hmac_keys();
    let payload = r#"{"amount":12345678901234567890.123456789,"exp":1700000060,"big":18446744073709551617}"#;
    let unsigned = forge(r#"{"alg":"HS256"}"#, payload, b"");
    let input = signing_input(&unsigned);
    let signature = HS256.sign(input.as_bytes(), &keys.signing).unwrap();
    let token = jwtkit::codec::assemble(input, &signature);

    let decimal = parser()
        .use_decimal_numbers()
        .build()
        .parse::<MapClaims, _>(&token, &keys.verification)
        .unwrap();
    let amount = decimal.claims().get("amount").and_then(ClaimValue::as_number);
    assert_eq!(
        amount.and_then(Number::as_decimal),
        Some("12345678901234567890.123456789")
    );
    assert_eq!(
        decimal
            .claims()
            .get("big")
            .and_then(ClaimValue::as_number)
            .map(ToString::to_string)
            .as_deref(),
        Some("18446744073709551617")
    );
    // Time checks still see the numeric value
    assert_eq!(decimal.claims().get_f64("exp"), Some(1_700_000_060.0));

    let float = parser()
        .build()
        .parse::<MapClaims, _>(&token, &keys.verification)
        .unwrap();
    let amount = float.claims().get("amount").and_then(ClaimValue::as_number);
    assert_eq!(amount.and_then(Number::as_decimal), None);
    assert!(amount.and_then(Number::as_f64).is_some());
}

#[test]
fn decimal_expiration_is_validated() {
    let keys = hmac_keys();
    let unsigned = forge(r#"{"alg":"HS256"}"#, r#"{"exp":1699999999.000}"#, b"");
    let input = signing_input(&unsigned);
    let signature = HS256.sign(input.as_bytes(), &keys.signing).unwrap();
    let token = jwtkit::codec::assemble(input, &signature);

    let result = parser()
        .use_decimal_numbers()
        .build()
        .parse::<MapClaims, _>(&token, &keys.verification);
    assert!(matches!(
        claim_errors(result).as_slice(),
        [ClaimError::Expired { .. }]
    ));
}

#[test]
fn out_of_range_dates_rejected_in_decimal_mode() {
    let keys = hmac_keys();
    for payload in [r#"{"exp":1e400}"#, r#"{"nbf":-1e400}"#] {
        let unsigned = forge(r#"{"alg":"HS256"}"#, payload, b"");
        let input = signing_input(&unsigned);
        let signature = HS256.sign(input.as_bytes(), &keys.signing).unwrap();
        let token = jwtkit::codec::assemble(input, &signature);

        let result = parser()
            .use_decimal_numbers()
            .build()
            .parse::<MapClaims, _>(&token, &keys.verification);
        assert!(
            matches!(
                claim_errors(result).as_slice(),
                [ClaimError::InvalidType { expected: "number", .. }]
            ),
            "{payload}"
        );

        let float = parser()
            .build()
            .parse::<MapClaims, _>(&token, &keys.verification);
        assert!(matches!(float, Err(Error::MalformedToken(_))), "{payload}");
    }
}

#[test]
fn decimal_mode_round_trip_compares_equal() {
    let claims = MapClaims::new()
        .with("sub", "alice")
        .with("exp", NOW + 60)
        .with("ratio", 0.25)
        .with("tags", vec!["a", "b"]);

    let parsed = parse(parser().use_decimal_numbers(), &claims).unwrap();
    assert_eq!(parsed.claims(), &claims);
    assert_eq!(
        parsed.claims().get("exp").and_then(ClaimValue::as_number).and_then(Number::as_decimal),
        Some("1700000060")
    );
}

#[test]
fn validation_helper_reusable_outside_parser() {
    let helper = ValidationHelper::new()
        .clock(FixedClock::new(NOW))
        .audience("api");

    let claims = MapClaims::new().with("aud", "api").with("exp", NOW + 1);
    assert!(helper.validate(&claims).is_ok());

    let claims = RegisteredClaims {
        expiration: Some(NumericDate::from(NOW - 1)),
        ..Default::default()
    };
    assert_eq!(helper.validate(&claims).unwrap_err().len(), 2);
}

#[test]
fn system_clock_accepts_fresh_token() {
    let now = NumericDate::from_system_time(std::time::SystemTime::now());
    let claims = MapClaims::new()
        .with("iat", now.as_seconds())
        .with("exp", now.add(Duration::from_secs(300)).as_seconds());

    let result = Parser::builder()
        .build()
        .parse::<MapClaims, _>(&token_for(&claims), &hmac_keys().verification);
    assert!(result.is_ok());
}
