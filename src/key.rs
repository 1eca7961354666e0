// Copyright (c) 2024-present, fjall-rs
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

use std::borrow::Cow;

/// Stored key type
pub type UserKey = String;

/// Types that can be used as table keys
///
/// Keys are always hashed and compared as strings, integers are normalized
/// to their decimal representation, so `42` and `"42"` are the same key.
pub trait AsKey {
    /// Returns the string form of the key.
    fn as_key(&self) -> Cow<'_, str>;
}

impl AsKey for str {
    fn as_key(&self) -> Cow<'_, str> {
        Cow::Borrowed(self)
    }
}

impl AsKey for String {
    fn as_key(&self) -> Cow<'_, str> {
        Cow::Borrowed(self.as_str())
    }
}

impl<T: AsKey + ?Sized> AsKey for &T {
    fn as_key(&self) -> Cow<'_, str> {
        (**self).as_key()
    }
}

macro_rules! impl_integer_key {
    ($($t:ty),*) => {
        $(
            impl AsKey for $t {
                fn as_key(&self) -> Cow<'_, str> {
                    Cow::Owned(self.to_string())
                }
            }
        )*
    };
}

impl_integer_key!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);
