//! Email address syntax check.
//!
//! Follows the usual web-framework rules: a dot-atom or quoted local part, an
//! `@`, then a dotted hostname with an alphanumeric TLD, an IP literal in
//! brackets, or `localhost`.

use std::{net::IpAddr, sync::LazyLock};

use regex::Regex;

use crate::error::ValidationError;

const MAX_LENGTH: usize = 320;

static USER_DOT_ATOM: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"(?i)^[-!#$%&'*+/=?^_`{}|~0-9a-z]+(\.[-!#$%&'*+/=?^_`{}|~0-9a-z]+)*$")
    .expect("dot-atom regex")
});

static USER_QUOTED: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(
    r#"(?i)^"([\x01-\x08\x0b\x0c\x0e-\x1f!#-\[\]-\x7f]|\\[\x01-\x09\x0b\x0c\x0e-\x7f])*"$"#,
  )
  .expect("quoted-string regex")
});

static DOMAIN: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"(?i)^(?:[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?\.)+[a-z0-9-]{1,62}[a-z0-9]$")
    .expect("domain regex")
});

fn valid_domain(domain: &str) -> bool {
  if domain.eq_ignore_ascii_case("localhost") || DOMAIN.is_match(domain) {
    return true;
  }
  domain
    .strip_prefix('[')
    .and_then(|d| d.strip_suffix(']'))
    .map(|literal| literal.strip_prefix("IPv6:").unwrap_or(literal))
    .is_some_and(|ip| ip.parse::<IpAddr>().is_ok())
}

pub fn is_valid_email(raw: &str) -> bool {
  if raw.is_empty() || raw.len() > MAX_LENGTH {
    return false;
  }
  let Some((user, domain)) = raw.rsplit_once('@') else {
    return false;
  };
  (USER_DOT_ATOM.is_match(user) || USER_QUOTED.is_match(user))
    && valid_domain(domain)
}

pub fn validate_email(raw: &str) -> Result<(), ValidationError> {
  if is_valid_email(raw) {
    Ok(())
  } else {
    Err(ValidationError::new("Enter a valid email address."))
  }
}
