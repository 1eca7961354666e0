// Copyright (c) 2024-present, fjall-rs
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

//! Prime sizing for table growth and compaction

/// Returns `true` if `n` is prime.
#[must_use]
pub fn is_prime(n: u64) -> bool {
    if n <= 1 {
        return false;
    }
    if n <= 3 {
        return true;
    }
    if n % 2 == 0 || n % 3 == 0 {
        return false;
    }

    let mut i = 5u64;
    while i.saturating_mul(i) <= n {
        if n % i == 0 || n % (i + 2) == 0 {
            return false;
        }
        i += 6;
    }

    true
}

/// Returns the smallest prime `>= n`.
#[must_use]
pub fn next_prime(n: u64) -> u64 {
    if n <= 2 {
        return 2;
    }

    let mut candidate = n | 1;
    while !is_prime(candidate) {
        candidate += 2;
    }
    candidate
}

/// Returns the largest prime `<= n`, but never less than `floor`.
///
/// `floor` is expected to be prime itself.
#[must_use]
pub fn prev_prime(n: u64, floor: u64) -> u64 {
    if n <= floor {
        return floor;
    }

    let mut candidate = if n % 2 == 0 { n - 1 } else { n };
    while candidate > floor && !is_prime(candidate) {
        candidate -= 2;
    }
    candidate.max(floor)
}
