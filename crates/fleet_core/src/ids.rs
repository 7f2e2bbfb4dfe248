//! crates/fleet_core/src/ids.rs
//! Token ids for rules/vehicles/OD pairs/routes and digest-derived output ids.
//! Deterministic, ASCII-only, strict shapes; no I/O.

use alloc::borrow::ToOwned;
use alloc::string::String;
use core::fmt;
use core::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

const MAX_ID_LEN: usize = 256;
const HEX64_LEN: usize = 64;
const TOKEN_MAX_LEN: usize = 64;

/// Quickly verify ASCII (no NUL).
#[inline]
fn is_ascii_no_nul(s: &str) -> bool {
    !s.as_bytes().iter().any(|&b| b == 0 || b > 0x7F)
}

/// Lowercase hex (length must be exactly 64).
#[inline]
pub fn is_valid_sha256(s: &str) -> bool {
    if s.len() != HEX64_LEN || !is_ascii_no_nul(s) {
        return false;
    }
    s.as_bytes()
        .iter()
        .all(|&b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
}

/// Token for rule/vehicle/route ids: ^[A-Za-z0-9_.:-]{1,64}$ (ASCII only)
#[inline]
pub fn is_valid_token(s: &str) -> bool {
    let bs = s.as_bytes();
    let len = bs.len();
    if len == 0 || len > TOKEN_MAX_LEN || !is_ascii_no_nul(s) {
        return false;
    }
    bs.iter()
        .all(|&b| b.is_ascii_alphanumeric() || matches!(b, b'_' | b'.' | b':' | b'-'))
}

/// OD ids carry free text (station names); only control characters are refused.
#[inline]
pub fn is_valid_od_label(s: &str) -> bool {
    !s.is_empty() && !s.chars().any(char::is_control)
}

macro_rules! simple_string_newtype {
    ($(#[$m:meta])* $name:ident) => {
        $(#[$m])*
        #[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
        #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
        #[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
        pub struct $name(String);

        impl $name {
            #[inline] pub fn as_str(&self) -> &str { &self.0 }
        }

        impl fmt::Display for $name {
            #[inline]
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
        }

        impl AsRef<str> for $name {
            #[inline]
            fn as_ref(&self) -> &str { &self.0 }
        }

        impl TryFrom<&str> for $name {
            type Error = CoreError;
            #[inline]
            fn try_from(value: &str) -> Result<Self, Self::Error> { value.parse() }
        }

        impl TryFrom<String> for $name {
            type Error = CoreError;
            #[inline]
            fn try_from(value: String) -> Result<Self, Self::Error> { value.parse() }
        }

        impl From<$name> for String {
            #[inline]
            fn from(value: $name) -> String { value.0 }
        }
    };
}

macro_rules! token_from_str {
    ($($name:ident),+ $(,)?) => {
        $(
            impl FromStr for $name {
                type Err = CoreError;
                fn from_str(s: &str) -> Result<Self, Self::Err> {
                    if !is_ascii_no_nul(s) { return Err(CoreError::NonAscii); }
                    if s.len() > MAX_ID_LEN { return Err(CoreError::TooLong); }
                    if !is_valid_token(s) { return Err(CoreError::BadShape); }
                    Ok($name(s.to_owned()))
                }
            }
        )+
    };
}

// === Token ids (no prefixes) ===

simple_string_newtype!(
    /// Origin-destination pair id, e.g. `od1` or `北站-东门`.
    OdId
);
simple_string_newtype!(
    /// Physical vehicle token from the vehicle pool, e.g. `VH-001`.
    VehicleId
);
simple_string_newtype!(
    /// Scheduling rule token (one rule binds one vehicle to a route).
    RuleId
);
simple_string_newtype!(
    /// Route token, e.g. `r1`.
    RouteId
);

token_from_str!(VehicleId, RuleId, RouteId);

impl FromStr for OdId {
    type Err = CoreError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() > MAX_ID_LEN { return Err(CoreError::TooLong); }
        if !is_valid_od_label(s) { return Err(CoreError::BadShape); }
        Ok(OdId(s.to_owned()))
    }
}

// === Digest ids ===

simple_string_newtype!(
    /// Generic 64-hex lowercase SHA-256 digest newtype.
    Sha256
);
simple_string_newtype!(
    /// "RES:" + 64-hex lowercase
    ResultId
);

impl FromStr for Sha256 {
    type Err = CoreError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if !is_ascii_no_nul(s) { return Err(CoreError::NonAscii); }
        if s.len() > MAX_ID_LEN { return Err(CoreError::TooLong); }
        if !is_valid_sha256(s) { return Err(CoreError::BadShape); }
        Ok(Sha256(s.to_owned()))
    }
}

impl Sha256 {
    #[inline] pub fn as_hex(&self) -> &str { &self.0 }
}

#[inline]
fn is_res_shape(s: &str) -> bool {
    s.len() == 4 + HEX64_LEN
        && s.as_bytes().get(0..4) == Some(b"RES:")
        && is_valid_sha256(&s[4..])
}

impl FromStr for ResultId {
    type Err = CoreError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if !is_ascii_no_nul(s) { return Err(CoreError::NonAscii); }
        if s.len() > MAX_ID_LEN { return Err(CoreError::TooLong); }
        if !is_res_shape(s) { return Err(CoreError::BadShape); }
        Ok(ResultId(s.to_owned()))
    }
}

impl ResultId {
    /// Build from a digest; the shape is guaranteed by `Sha256`.
    pub fn from_digest(digest: &Sha256) -> Self {
        let mut s = String::with_capacity(4 + HEX64_LEN);
        s.push_str("RES:");
        s.push_str(digest.as_hex());
        ResultId(s)
    }

    #[inline] pub fn as_hex(&self) -> &str { &self.0[4..] }
}

// === Tests ===
