//! The payload carried by every list node.
//!
//! A [`Slot`] holds one value of any supported primitive type, an opaque
//! address, or a shared reference. Every slot also exposes a fixed-width raw
//! word through [`Slot::word`], which is what the default ordering and the
//! stock comparators in [`crate::compare`] operate on.
//!
//! # Examples
//!
//! ```
//! use gll_collections::slot::{Slot, SlotValue};
//!
//! let slot = Slot::from(1.5f32);
//! assert_eq!(slot.word(), 1.5f32.to_bits() as u64);
//! assert_eq!(f32::from_slot(&slot), Some(1.5));
//! assert_eq!(u32::from_slot(&slot), None);
//! ```

use core::any::Any;
use core::fmt;
use core::mem;
use std::sync::Arc;

/// A type-tagged, fixed-width list payload.
#[derive(Clone)]
pub enum Slot {
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    Isize(isize),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    Usize(usize),
    F32(f32),
    F64(f64),
    Char(char),
    Bool(bool),
    /// A non-owning address. The list never dereferences or frees it; a
    /// configured deallocator may.
    Addr(usize),
    /// Shared text. Cloning a slot shares the allocation.
    Text(Arc<str>),
    /// Any shared value. Cloning a slot shares the allocation.
    Shared(Arc<dyn Any + Send + Sync>),
}

impl Slot {
    /// Wrap an arbitrary value in a shared slot.
    pub fn shared<T: Any + Send + Sync>(value: T) -> Self {
        Slot::Shared(Arc::new(value))
    }

    /// Store a raw pointer as an opaque address.
    pub fn from_ptr<T>(ptr: *const T) -> Self {
        Slot::Addr(ptr as usize)
    }

    /// The raw storage word of this slot.
    ///
    /// Signed integers are sign-extended, unsigned integers zero-extended,
    /// floats are bit-reinterpreted and references yield the address of the
    /// shared allocation.
    pub fn word(&self) -> u64 {
        match self {
            Slot::I8(v) => *v as i64 as u64,
            Slot::I16(v) => *v as i64 as u64,
            Slot::I32(v) => *v as i64 as u64,
            Slot::I64(v) => *v as u64,
            Slot::Isize(v) => *v as i64 as u64,
            Slot::U8(v) => *v as u64,
            Slot::U16(v) => *v as u64,
            Slot::U32(v) => *v as u64,
            Slot::U64(v) => *v,
            Slot::Usize(v) => *v as u64,
            Slot::F32(v) => v.to_bits() as u64,
            Slot::F64(v) => v.to_bits(),
            Slot::Char(v) => *v as u64,
            Slot::Bool(v) => *v as u64,
            Slot::Addr(v) => *v as u64,
            Slot::Text(v) => Arc::as_ptr(v) as *const u8 as usize as u64,
            Slot::Shared(v) => Arc::as_ptr(v) as *const () as usize as u64,
        }
    }

    /// Whether the slot holds a shared reference rather than a scalar.
    pub fn is_reference(&self) -> bool {
        matches!(self, Slot::Text(_) | Slot::Shared(_))
    }

    /// Whether the slot is a scalar whose raw word is zero.
    pub fn is_zero(&self) -> bool {
        !self.is_reference() && self.word() == 0
    }

    /// Decode the slot as `T`, if it was encoded from a `T`.
    pub fn decode<T: SlotValue>(&self) -> Option<T> {
        T::from_slot(self)
    }

    pub fn addr(&self) -> Option<usize> {
        match self {
            Slot::Addr(addr) => Some(*addr),
            _ => None,
        }
    }

    /// The stored address as a typed pointer.
    pub fn as_ptr<T>(&self) -> Option<*const T> {
        self.addr().map(|addr| addr as *const T)
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            Slot::Text(text) => Some(text.as_ref()),
            _ => None,
        }
    }

    /// Borrow the shared value as `T`.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        match self {
            Slot::Shared(value) => value.downcast_ref::<T>(),
            _ => None,
        }
    }

    /// Take another handle to the shared value as `T`.
    pub fn downcast_arc<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        match self {
            Slot::Shared(value) => Arc::clone(value).downcast::<T>().ok(),
            _ => None,
        }
    }

    fn variant_name(&self) -> &'static str {
        match self {
            Slot::I8(_) => "I8",
            Slot::I16(_) => "I16",
            Slot::I32(_) => "I32",
            Slot::I64(_) => "I64",
            Slot::Isize(_) => "Isize",
            Slot::U8(_) => "U8",
            Slot::U16(_) => "U16",
            Slot::U32(_) => "U32",
            Slot::U64(_) => "U64",
            Slot::Usize(_) => "Usize",
            Slot::F32(_) => "F32",
            Slot::F64(_) => "F64",
            Slot::Char(_) => "Char",
            Slot::Bool(_) => "Bool",
            Slot::Addr(_) => "Addr",
            Slot::Text(_) => "Text",
            Slot::Shared(_) => "Shared",
        }
    }
}

/// Slots are equal when they carry the same variant and the same raw word.
/// Floats therefore compare bitwise and references by identity.
impl PartialEq for Slot {
    fn eq(&self, other: &Self) -> bool {
        mem::discriminant(self) == mem::discriminant(other) && self.word() == other.word()
    }
}

impl Eq for Slot {}

impl fmt::Debug for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.variant_name();
        match self {
            Slot::I8(v) => write!(f, "{}({})", name, v),
            Slot::I16(v) => write!(f, "{}({})", name, v),
            Slot::I32(v) => write!(f, "{}({})", name, v),
            Slot::I64(v) => write!(f, "{}({})", name, v),
            Slot::Isize(v) => write!(f, "{}({})", name, v),
            Slot::U8(v) => write!(f, "{}({})", name, v),
            Slot::U16(v) => write!(f, "{}({})", name, v),
            Slot::U32(v) => write!(f, "{}({})", name, v),
            Slot::U64(v) => write!(f, "{}({})", name, v),
            Slot::Usize(v) => write!(f, "{}({})", name, v),
            Slot::F32(v) => write!(f, "{}({})", name, v),
            Slot::F64(v) => write!(f, "{}({})", name, v),
            Slot::Char(v) => write!(f, "{}({:?})", name, v),
            Slot::Bool(v) => write!(f, "{}({})", name, v),
            Slot::Text(v) => write!(f, "{}({:?})", name, v),
            Slot::Addr(_) | Slot::Shared(_) => write!(f, "{}({:#x})", name, self.word()),
        }
    }
}

/// Conversion between a native value and a [`Slot`].
///
/// `from_slot` only succeeds on the variant `into_slot` produces, so a value
/// can never be read back under a different type than it was stored with.
pub trait SlotValue: Sized {
    /// Encode the value into a slot.
    fn into_slot(self) -> Slot;

    /// Decode the value from a slot.
    fn from_slot(slot: &Slot) -> Option<Self>;
}

macro_rules! scalar_slot {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl SlotValue for $ty {
                #[inline]
                fn into_slot(self) -> Slot {
                    Slot::$variant(self)
                }

                #[inline]
                fn from_slot(slot: &Slot) -> Option<Self> {
                    match slot {
                        Slot::$variant(value) => Some(*value),
                        _ => None,
                    }
                }
            }

            impl From<$ty> for Slot {
                #[inline]
                fn from(value: $ty) -> Self {
                    Slot::$variant(value)
                }
            }
        )*
    };
}

scalar_slot! {
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    isize => Isize,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    usize => Usize,
    f32 => F32,
    f64 => F64,
    char => Char,
    bool => Bool,
}

impl SlotValue for Arc<str> {
    fn into_slot(self) -> Slot {
        Slot::Text(self)
    }

    fn from_slot(slot: &Slot) -> Option<Self> {
        match slot {
            Slot::Text(text) => Some(Arc::clone(text)),
            _ => None,
        }
    }
}

impl SlotValue for String {
    fn into_slot(self) -> Slot {
        Slot::Text(Arc::from(self))
    }

    fn from_slot(slot: &Slot) -> Option<Self> {
        slot.text().map(str::to_owned)
    }
}

impl From<Arc<str>> for Slot {
    fn from(value: Arc<str>) -> Self {
        Slot::Text(value)
    }
}

impl From<String> for Slot {
    fn from(value: String) -> Self {
        Slot::Text(Arc::from(value))
    }
}

impl From<&str> for Slot {
    fn from(value: &str) -> Self {
        Slot::Text(Arc::from(value))
    }
}
