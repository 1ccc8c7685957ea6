//! Typed access to grid elements.
//!
//! Grids store raw bytes. [`Element`] converts between those bytes and the
//! primitive number types, always in native byte order, so that a grid
//! allocated with `element_size == size_of::<T>()` behaves like a `T` array.

/// A plain value that can be stored in a grid cell.
pub trait Element: Copy {
    /// Size of the value in bytes. Must equal the grid's `element_size`.
    const SIZE: usize;

    /// Decode a value from exactly [`Self::SIZE`] bytes.
    fn from_ne_slice(bytes: &[u8]) -> Self;

    /// Encode the value into exactly [`Self::SIZE`] bytes.
    fn write_ne_slice(self, out: &mut [u8]);
}

macro_rules! impl_element {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Element for $ty {
                const SIZE: usize = std::mem::size_of::<$ty>();

                fn from_ne_slice(bytes: &[u8]) -> Self {
                    let mut buf = [0u8; std::mem::size_of::<$ty>()];
                    buf.copy_from_slice(bytes);
                    <$ty>::from_ne_bytes(buf)
                }

                fn write_ne_slice(self, out: &mut [u8]) {
                    out.copy_from_slice(&self.to_ne_bytes());
                }
            }
        )*
    };
}

impl_element!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, f32, f64);

/// Check that `T` matches the grid's element size.
///
/// # Panics
///
/// Panics on mismatch; reinterpreting a cell as a differently sized type
/// would read into the neighbouring element.
pub(crate) fn check_size<T: Element>(element_size: usize) {
    assert!(
        T::SIZE == element_size,
        "element type is {} bytes but grid elements are {element_size} bytes",
        T::SIZE,
    );
}
