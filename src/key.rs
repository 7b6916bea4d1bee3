//! Key contract: caller-supplied hashing and equality plus a null sentinel.

use core::hash::Hash;
use std::rc::Rc;
use std::sync::Arc;

/// A type usable as a table key.
///
/// Identity comes only from `Hash` and `Eq`; the table never looks at
/// where a key lives in memory. `is_null` marks the absence sentinel of the
/// type, which every operation rejects before hashing. Most types have no
/// such value and keep the default:
///
/// ```
/// use assoc_table::TableKey;
///
/// #[derive(Hash, PartialEq, Eq)]
/// struct VertexId(u32);
///
/// impl TableKey for VertexId {}
/// ```
pub trait TableKey: Hash + Eq {
    fn is_null(&self) -> bool {
        false
    }
}

macro_rules! never_null {
    ($($t:ty),* $(,)?) => {
        $(impl TableKey for $t {})*
    };
}

never_null!(
    u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, bool, char, String, str,
);

/// `None` is the null key.
impl<T: TableKey> TableKey for Option<T> {
    fn is_null(&self) -> bool {
        self.is_none()
    }
}

impl<T: ?Sized + TableKey> TableKey for &T {
    fn is_null(&self) -> bool {
        (**self).is_null()
    }
}

impl<T: ?Sized + TableKey> TableKey for Box<T> {
    fn is_null(&self) -> bool {
        (**self).is_null()
    }
}

impl<T: ?Sized + TableKey> TableKey for Rc<T> {
    fn is_null(&self) -> bool {
        (**self).is_null()
    }
}

impl<T: ?Sized + TableKey> TableKey for Arc<T> {
    fn is_null(&self) -> bool {
        (**self).is_null()
    }
}

impl<T: Hash + Eq> TableKey for Vec<T> {}
impl<T: Hash + Eq> TableKey for [T] {}

impl<A: TableKey, B: TableKey> TableKey for (A, B) {}
impl<A: TableKey, B: TableKey, C: TableKey> TableKey for (A, B, C) {}
