//! Unbuffered full-transfer loops.
//!
//! Both functions issue one single-shot call per iteration against the
//! remaining tail of the caller's slice and classify the outcome:
//!
//! | single-shot result | `readn`            | `writen`           |
//! |--------------------|--------------------|--------------------|
//! | `Err(EINTR)`       | retry              | retry              |
//! | `Err(e)`           | fail with `e`      | fail with `e`      |
//! | `Ok(0)`            | stop (end-of-stream) | fail (`WriteZero`) |
//! | `Ok(k)`            | advance by `k`     | advance by `k`     |

use crate::errno;
use crate::error::RioError;
use crate::sys::Descriptor;

/// Read until `dst` is full or the stream ends.
///
/// Returns the number of bytes placed in `dst`; a value below `dst.len()`
/// means end-of-stream was reached and is not an error.
pub fn readn<D: Descriptor + ?Sized>(descriptor: &mut D, dst: &mut [u8]) -> Result<usize, RioError> {
    let mut done = 0usize;
    while done < dst.len() {
        match descriptor.read_once(&mut dst[done..]) {
            Ok(0) => break,
            Ok(n) => done += n,
            Err(e) if errno::is_transient(e) => continue,
            Err(e) => return Err(RioError::from_errno(e)),
        }
    }
    Ok(done)
}

/// Write all of `src`.
///
/// Returns `src.len()` on success. There is no partial success: a hard error
/// or a zero-byte write aborts the loop.
pub fn writen<D: Descriptor + ?Sized>(descriptor: &mut D, src: &[u8]) -> Result<usize, RioError> {
    let mut done = 0usize;
    while done < src.len() {
        match descriptor.write_once(&src[done..]) {
            Ok(0) => return Err(RioError::WriteZero),
            Ok(n) => done += n,
            Err(e) if errno::is_transient(e) => continue,
            Err(e) => return Err(RioError::from_errno(e)),
        }
    }
    Ok(done)
}
