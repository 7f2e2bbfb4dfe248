//! crates/fleet_io/src/hasher.rs
//!
//! Deterministic hashing and id builders for canonical artifacts.
//!
//! - Use `sha256_canonical(..)` for JSON values/structs (goes through canonical_json).
//! - Use `sha256_hex(..)` for raw bytes.
//! - `RES:` ids derive from canonical result bytes; `RUN:` ids add a normalized
//!   RFC3339-UTC timestamp in front of the run digest.
//! - Hex digests are lowercase.

use serde::Serialize;
use sha2::{Digest, Sha256 as Sha256Hasher};

use fleet_core::{ResultId, Sha256};

use crate::canonical_json::to_canonical_bytes;
use crate::{IoError, IoResult};

/// Encode bytes as lowercase hex.
fn to_lower_hex(bytes: &[u8]) -> String {
    const LUT: &[u8; 16] = b"0123456789abcdef";
    let mut out = String::with_capacity(bytes.len() * 2);
    for &b in bytes {
        out.push(LUT[(b >> 4) as usize] as char);
        out.push(LUT[(b & 0x0F) as usize] as char);
    }
    out
}

/// SHA-256 over raw bytes.
pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256Hasher::new();
    hasher.update(bytes);
    to_lower_hex(&hasher.finalize())
}

/// SHA-256 over the canonical JSON bytes of any serializable value.
pub fn sha256_canonical<T: Serialize + ?Sized>(value: &T) -> IoResult<Sha256> {
    let bytes = to_canonical_bytes(value)?;
    sha256_hex(&bytes)
        .parse()
        .map_err(|e| IoError::Hash(format!("digest shape: {e}")))
}

/// `RES:<hex>` for `result.json`.
pub fn res_id_from_canonical<T: Serialize + ?Sized>(value: &T) -> IoResult<ResultId> {
    Ok(ResultId::from_digest(&sha256_canonical(value)?))
}

/// `RUN:<timestamp>:<hex>` for `run_record.json`.
///
/// `timestamp_utc` must be RFC3339 UTC; it is normalized to whole seconds + `Z`.
pub fn run_id_from_canonical<T: Serialize + ?Sized>(timestamp_utc: &str, value: &T) -> IoResult<String> {
    let ts = normalize_rfc3339_utc_seconds(timestamp_utc)?;
    let digest = sha256_canonical(value)?;
    Ok(format!("RUN:{ts}:{}", digest.as_hex()))
}

/// Accepts `YYYY-MM-DDTHH:MM:SS[.frac](Z|+00:00|-00:00)`; returns `YYYY-MM-DDTHH:MM:SSZ`.
pub fn normalize_rfc3339_utc_seconds(ts: &str) -> IoResult<String> {
    let bad = || IoError::Invalid(format!("timestamp is not RFC3339 UTC: {ts}"));
    let b = ts.as_bytes();
    if b.len() < 20 {
        return Err(bad());
    }
    for (idx, sep) in [(4, b'-'), (7, b'-'), (10, b'T'), (13, b':'), (16, b':')] {
        if b[idx] != sep {
            return Err(bad());
        }
    }
    let num = |r: core::ops::Range<usize>| -> IoResult<u32> {
        let s = ts.get(r).ok_or_else(bad)?;
        if !s.bytes().all(|c| c.is_ascii_digit()) {
            return Err(bad());
        }
        s.parse::<u32>().map_err(|_| bad())
    };
    let (y, m, d) = (num(0..4)?, num(5..7)?, num(8..10)?);
    let (hh, mm, ss) = (num(11..13)?, num(14..16)?, num(17..19)?);
    if !(1..=12).contains(&m) || !(1..=31).contains(&d) || hh > 23 || mm > 59 || ss > 59 {
        return Err(bad());
    }

    let mut idx = 19;
    if b.get(idx) == Some(&b'.') {
        idx += 1;
        let start = idx;
        while idx < b.len() && b[idx].is_ascii_digit() && idx - start < 9 {
            idx += 1;
        }
        if idx == start {
            return Err(bad());
        }
    }
    match ts.get(idx..) {
        Some("Z" | "+00:00" | "-00:00") => Ok(format!("{y:04}-{m:02}-{d:02}T{hh:02}:{mm:02}:{ss:02}Z")),
        _ => Err(bad()),
    }
}
