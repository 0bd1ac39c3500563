use std::fmt;
use std::fs::File;
use std::io::{self, Read, Write};
use std::path::Path;
use std::slice;

use crate::common::SourceLocation;

/// File I/O proceeds in chunks of this size, and decoded output is staged
/// through scratch buffers of the same size before being concatenated into
/// the final buffer.
pub const CHUNK_SIZE: usize = 8192;

/// Maximum number of bytes a buffer may hold. Matches the largest object
/// size Rust itself permits, so any length at or under this limit can be
/// addressed with a valid `isize` offset.
pub const MAX_SIZE: usize = isize::MAX as usize;

mod sealed {
    pub trait Sealed {}

    impl Sealed for u8 {}
    impl Sealed for i8 {}
}

/// A byte flavor a [`ByteBuffer`] can store: `u8` (unsigned octet, the raw
/// byte type) or `i8` (signed octet). The two have identical layout; the
/// parameter records intent in the type the way a C++ `std::byte` /
/// `signed char` split would.
pub trait BufferByte:
    sealed::Sealed + Copy + Default + PartialEq + Eq + fmt::Debug + Send + Sync + 'static
{
    fn from_u8(byte: u8) -> Self;
    fn to_u8(self) -> u8;
}

impl BufferByte for u8 {
    #[inline]
    fn from_u8(byte: u8) -> Self {
        byte
    }

    #[inline]
    fn to_u8(self) -> u8 {
        self
    }
}

impl BufferByte for i8 {
    #[inline]
    fn from_u8(byte: u8) -> Self {
        byte as i8
    }

    #[inline]
    fn to_u8(self) -> u8 {
        self as u8
    }
}

/// What went wrong in a buffer operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The buffer holds no bytes but the operation needs some.
    EmptyBuffer,
    /// Pointer/length combination that cannot describe a valid region.
    InvalidArguments,
    /// Failed to open the file.
    OpenFile,
    /// Failed to read from the file.
    ReadFromFile,
    /// Failed to write to the file.
    WriteToFile,
    /// Position at or past the end of the buffer.
    OutOfRange,
    /// The operation would push the length past [`MAX_SIZE`].
    SizeLimit,
    /// The allocator refused to provide storage.
    Allocation,
}

/// Error raised by [`ByteBuffer`] operations, carrying the kind, a
/// human-readable message and the source position of the raise site.
#[derive(Debug, Clone)]
pub struct Error {
    kind: ErrorKind,
    message: String,
    location: SourceLocation,
}

impl Error {
    #[track_caller]
    pub(crate) fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            location: SourceLocation::capture(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn location(&self) -> SourceLocation {
        self.location
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Error {}

/// An owned, heap-backed, contiguous byte sequence.
///
/// The buffer is the binary-mode counterpart of `String` in the codec
/// surface: codecs encode out of it and decode into it, and it moves whole
/// files in and out of memory in [`CHUNK_SIZE`] steps. It is exclusively
/// owned — copying is an explicit `clone()`, moving is cheap, and sharing
/// a mutable buffer across threads requires external synchronization.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ByteBuffer<T: BufferByte = u8> {
    bytes: Vec<T>,
}

impl<T: BufferByte> ByteBuffer<T> {
    /// Creates an empty buffer. Allocates nothing.
    pub fn new() -> Self {
        Self { bytes: Vec::new() }
    }

    /// Creates a zero-filled buffer of `size` bytes.
    pub fn with_size(size: usize) -> Result<Self, Error> {
        if size > MAX_SIZE {
            return Err(Error::new(
                ErrorKind::SizeLimit,
                format!("requested size {} exceeds the maximum buffer size", size),
            ));
        }

        let mut bytes = Vec::new();
        if bytes.try_reserve_exact(size).is_err() {
            return Err(Error::new(
                ErrorKind::Allocation,
                format!("failed to allocate {} bytes", size),
            ));
        }
        bytes.resize(size, T::default());

        Ok(Self { bytes })
    }

    /// Creates a buffer holding a copy of `slice`.
    pub fn from_slice(slice: &[T]) -> Result<Self, Error> {
        let mut bytes = Vec::new();
        if bytes.try_reserve_exact(slice.len()).is_err() {
            return Err(Error::new(
                ErrorKind::Allocation,
                format!("failed to allocate {} bytes", slice.len()),
            ));
        }
        bytes.extend_from_slice(slice);

        Ok(Self { bytes })
    }

    /// Creates a buffer by copying `size` bytes starting at `pointer`.
    ///
    /// An empty region must be described by a null pointer and a zero
    /// length together; mixing them is `InvalidArguments`.
    ///
    /// # Safety
    ///
    /// When `size > 0`, `pointer` must be valid for reads of `size`
    /// bytes and properly aligned for `T`.
    pub unsafe fn from_raw_parts(pointer: *const T, size: usize) -> Result<Self, Error> {
        if size > MAX_SIZE {
            return Err(Error::new(
                ErrorKind::SizeLimit,
                format!("requested size {} exceeds the maximum buffer size", size),
            ));
        }
        if size > 0 && pointer.is_null() {
            return Err(Error::new(
                ErrorKind::InvalidArguments,
                "null pointer with a non-zero length",
            ));
        }
        if size == 0 && !pointer.is_null() {
            return Err(Error::new(
                ErrorKind::InvalidArguments,
                "non-null pointer with a zero length",
            ));
        }
        if size == 0 {
            return Ok(Self::new());
        }

        Self::from_slice(unsafe { slice::from_raw_parts(pointer, size) })
    }

    /// Creates a buffer that takes ownership of `bytes` without copying.
    pub fn from_vec(bytes: Vec<T>) -> Result<Self, Error> {
        if bytes.len() > MAX_SIZE {
            return Err(Error::new(
                ErrorKind::SizeLimit,
                format!("vector of {} bytes exceeds the maximum buffer size", bytes.len()),
            ));
        }

        Ok(Self { bytes })
    }

    /// Creates a buffer holding the verbatim contents of the file at `path`.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, Error> {
        let mut buffer = Self::new();
        buffer.read_from_file(path)?;
        Ok(buffer)
    }

    /// Creates a buffer from raw octets, staging through [`CHUNK_SIZE`]
    /// scratch buffers that are concatenated into the result. This is the
    /// assembly path the decoders use, so growth cost is amortized the
    /// same way regardless of which codec produced the bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        let mut buffer = Self::new();

        for chunk in bytes.chunks(CHUNK_SIZE) {
            let mut staging = Self::with_size(chunk.len())?;
            for (dst, src) in staging.bytes.iter_mut().zip(chunk) {
                *dst = T::from_u8(*src);
            }
            buffer.concat(&staging)?;
        }

        Ok(buffer)
    }

    /// Number of bytes held.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// True when the buffer holds no bytes (and thus no storage worth
    /// speaking of).
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Borrows the contents as a slice.
    pub fn as_slice(&self) -> &[T] {
        &self.bytes
    }

    /// Borrows the contents as a mutable slice.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.bytes
    }

    /// Borrows the contents as raw octets regardless of `T`.
    pub fn as_bytes(&self) -> &[u8] {
        // SAFETY: u8 and i8 have identical size and alignment, and every
        // bit pattern is valid for both.
        unsafe { slice::from_raw_parts(self.bytes.as_ptr() as *const u8, self.bytes.len()) }
    }

    /// Copies the contents into a plain vector.
    pub fn to_vec(&self) -> Vec<T> {
        self.bytes.clone()
    }

    /// Borrows the byte at `position`.
    pub fn at(&self, position: usize) -> Result<&T, Error> {
        self.bytes.get(position).ok_or_else(|| {
            Error::new(
                ErrorKind::OutOfRange,
                format!("position {} is out of range for a buffer of {} bytes", position, self.bytes.len()),
            )
        })
    }

    /// Mutably borrows the byte at `position`.
    pub fn at_mut(&mut self, position: usize) -> Result<&mut T, Error> {
        let len = self.bytes.len();
        self.bytes.get_mut(position).ok_or_else(|| {
            Error::new(
                ErrorKind::OutOfRange,
                format!("position {} is out of range for a buffer of {} bytes", position, len),
            )
        })
    }

    /// Sets every byte to `byte`.
    pub fn fill(&mut self, byte: T) {
        self.bytes.fill(byte);
    }

    /// Resizes to `size` bytes, zero-filling any appended positions.
    /// The common prefix of old and new lengths is preserved.
    pub fn resize(&mut self, size: usize) -> Result<(), Error> {
        self.resize_with(size, T::default())
    }

    /// Resizes to `size` bytes, filling any appended positions with `byte`.
    /// On allocation failure the buffer is reset to empty before the error
    /// is returned, so no partially initialized state survives.
    pub fn resize_with(&mut self, size: usize, byte: T) -> Result<(), Error> {
        if size > MAX_SIZE {
            return Err(Error::new(
                ErrorKind::SizeLimit,
                format!("requested size {} exceeds the maximum buffer size", size),
            ));
        }

        if size <= self.bytes.len() {
            self.bytes.truncate(size);
            return Ok(());
        }

        if self.bytes.try_reserve_exact(size - self.bytes.len()).is_err() {
            self.clear();
            return Err(Error::new(
                ErrorKind::Allocation,
                format!("failed to allocate {} bytes", size),
            ));
        }
        self.bytes.resize(size, byte);

        Ok(())
    }

    /// Appends a copy of `other`, so that `self` becomes `self ∥ other`.
    /// On overflow of the size limit, or on allocation failure, `self` is
    /// reset to empty before the error is returned.
    pub fn concat(&mut self, other: &Self) -> Result<(), Error> {
        if other.is_empty() {
            return Ok(());
        }

        let next_size = match self.bytes.len().checked_add(other.bytes.len()) {
            Some(size) if size <= MAX_SIZE => size,
            _ => {
                self.clear();
                return Err(Error::new(
                    ErrorKind::SizeLimit,
                    "concatenation exceeds the maximum buffer size",
                ));
            }
        };

        if self.bytes.try_reserve_exact(next_size - self.bytes.len()).is_err() {
            self.clear();
            return Err(Error::new(
                ErrorKind::Allocation,
                format!("failed to allocate {} bytes", next_size),
            ));
        }
        self.bytes.extend_from_slice(&other.bytes);

        Ok(())
    }

    /// Empties the buffer and releases its storage.
    pub fn clear(&mut self) {
        self.bytes = Vec::new();
    }

    /// Exchanges contents and lengths with `other`.
    pub fn swap(&mut self, other: &mut Self) {
        std::mem::swap(&mut self.bytes, &mut other.bytes);
    }

    /// Replaces the contents with the file at `path`, reading in
    /// [`CHUNK_SIZE`] steps and appending each chunk. On any failure the
    /// buffer is reset to empty before the error is returned.
    pub fn read_from_file(&mut self, path: impl AsRef<Path>) -> Result<(), Error> {
        self.clear();

        let path = path.as_ref();
        let mut file = match File::open(path) {
            Ok(file) => file,
            Err(e) => {
                return Err(Error::new(
                    ErrorKind::OpenFile,
                    format!("failed to open {}: {}", path.display(), e),
                ));
            }
        };

        let mut chunk = [0u8; CHUNK_SIZE];

        loop {
            let count = match file.read(&mut chunk) {
                Ok(0) => break,
                Ok(count) => count,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    self.clear();
                    return Err(Error::new(
                        ErrorKind::ReadFromFile,
                        format!("failed to read from {}: {}", path.display(), e),
                    ));
                }
            };

            if self.bytes.try_reserve(count).is_err() {
                self.clear();
                return Err(Error::new(
                    ErrorKind::Allocation,
                    format!("failed to allocate {} bytes", count),
                ));
            }
            self.bytes.extend(chunk[..count].iter().map(|&b| T::from_u8(b)));
        }

        Ok(())
    }

    /// Writes the whole buffer to the file at `path`, truncating it first.
    /// Emits full [`CHUNK_SIZE`] chunks followed by the short tail.
    /// Writing an empty buffer is `EmptyBuffer` — a zero-length output
    /// file is almost always a caller bug, not a request.
    pub fn write_to_file(&self, path: impl AsRef<Path>) -> Result<(), Error> {
        if self.is_empty() {
            return Err(Error::new(ErrorKind::EmptyBuffer, "buffer holds no bytes to write"));
        }

        let path = path.as_ref();
        let mut file = match File::create(path) {
            Ok(file) => file,
            Err(e) => {
                return Err(Error::new(
                    ErrorKind::OpenFile,
                    format!("failed to open {}: {}", path.display(), e),
                ));
            }
        };

        for chunk in self.as_bytes().chunks(CHUNK_SIZE) {
            if let Err(e) = file.write_all(chunk) {
                return Err(Error::new(
                    ErrorKind::WriteToFile,
                    format!("failed to write to {}: {}", path.display(), e),
                ));
            }
        }

        Ok(())
    }

    /// Iterates over the bytes.
    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.bytes.iter()
    }
}

impl<'a, T: BufferByte> IntoIterator for &'a ByteBuffer<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.bytes.iter()
    }
}
