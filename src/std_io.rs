extern crate std;

use core::ptr;
use std::io::{self, IoSlice, Write};

use crate::Vector;

impl Vector<u8> {
    /// Makes room for `additional` more bytes with the same doubling as `push_back`.
    fn reserve_for_write(&mut self, additional: usize) -> io::Result<()> {
        self.try_reserve_amortized(additional)
            .map_err(|err| io::Error::new(io::ErrorKind::OutOfMemory, err))
    }

    /// Appends `buf`; room for it must have been reserved.
    #[inline(always)]
    unsafe fn append_unchecked(&mut self, buf: &[u8]) {
        let len = self.len();
        unsafe {
            ptr::copy_nonoverlapping(buf.as_ptr(), self.as_mut_ptr().add(len), buf.len());
            self.set_len(len + buf.len());
        }
    }
}

/// Write is implemented for `Vector<u8>` by appending to the vector.
/// The vector will grow as needed.
///
/// An allocation failure is reported as [`io::ErrorKind::OutOfMemory`] and leaves
/// the vector unchanged.
impl Write for Vector<u8> {
    #[inline]
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.reserve_for_write(buf.len())?;
        unsafe { self.append_unchecked(buf) };
        Ok(buf.len())
    }

    #[inline(always)]
    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }

    #[inline]
    fn write_vectored(&mut self, bufs: &[IoSlice<'_>]) -> io::Result<usize> {
        let num = bufs.iter().map(|b| b.len()).sum::<usize>();

        self.reserve_for_write(num)?;
        for buf in bufs {
            unsafe { self.append_unchecked(buf) };
        }

        Ok(num)
    }

    #[inline]
    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        Write::write(self, buf)?;
        Ok(())
    }
}
