use std::hash::Hasher;

use crate::hash::Hashable;

macro_rules! impl_write {
    ($(($ty:ident, $meth:ident),)*) => {$(
        impl<H: Hasher> Hashable<H> for $ty {
            fn hash(&self, state: &mut H) {
                state.$meth(*self)
            }
        }
    )*}
}

impl_write! {
    (u16, write_u16),
    (u32, write_u32),
    (u64, write_u64),
    (u128, write_u128),
    (usize, write_usize),
    (i8, write_i8),
    (i16, write_i16),
    (i32, write_i32),
    (i64, write_i64),
    (i128, write_i128),
    (isize, write_isize),
}

impl<H: Hasher> Hashable<H> for u8 {
    fn hash(&self, state: &mut H) {
        state.write_u8(*self)
    }

    fn hash_slice(data: &[u8], state: &mut H) {
        state.write(data)
    }
}

impl<H: Hasher> Hashable<H> for bool {
    fn hash(&self, state: &mut H) {
        state.write_u8(u8::from(*self))
    }
}

impl<H: Hasher> Hashable<H> for char {
    fn hash(&self, state: &mut H) {
        state.write_u32(u32::from(*self))
    }
}

// A string on its own feeds its raw bytes, so that a leaf built from "a" is
// exactly H("a"). As an element of a composite it is length prefixed.
impl<H: Hasher> Hashable<H> for str {
    fn hash(&self, state: &mut H) {
        state.write(self.as_bytes());
    }

    fn hash_delimited(&self, state: &mut H) {
        self.len().hash(state);
        state.write(self.as_bytes());
    }
}

impl<H: Hasher> Hashable<H> for String {
    fn hash(&self, state: &mut H) {
        self.as_str().hash(state)
    }

    fn hash_delimited(&self, state: &mut H) {
        self.as_str().hash_delimited(state)
    }
}

impl<H: Hasher, T: Hashable<H>> Hashable<H> for [T] {
    fn hash(&self, state: &mut H) {
        self.len().hash(state);
        Hashable::hash_slice(self, state)
    }
}

impl<H: Hasher, T: Hashable<H>> Hashable<H> for Vec<T> {
    fn hash(&self, state: &mut H) {
        self.as_slice().hash(state)
    }
}

// Fixed size arrays have no length prefix.
impl<H: Hasher, T: Hashable<H>, const N: usize> Hashable<H> for [T; N] {
    fn hash(&self, state: &mut H) {
        Hashable::hash_slice(&self[..], state)
    }
}

impl<H: Hasher, T: ?Sized + Hashable<H>> Hashable<H> for &T {
    fn hash(&self, state: &mut H) {
        (**self).hash(state);
    }

    fn hash_delimited(&self, state: &mut H) {
        (**self).hash_delimited(state);
    }
}

impl<H: Hasher, A: Hashable<H>, B: Hashable<H>> Hashable<H> for (A, B) {
    fn hash(&self, state: &mut H) {
        self.0.hash_delimited(state);
        self.1.hash_delimited(state);
    }
}

impl<H: Hasher, A: Hashable<H>, B: Hashable<H>, C: Hashable<H>> Hashable<H> for (A, B, C) {
    fn hash(&self, state: &mut H) {
        self.0.hash_delimited(state);
        self.1.hash_delimited(state);
        self.2.hash_delimited(state);
    }
}
