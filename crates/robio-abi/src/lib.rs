// All extern "C" exports accept raw pointers from C callers and validate what
// they can (null, length range) before handing safe slices to the core.
#![allow(clippy::missing_safety_doc)]
//! # robio-abi
//!
//! `extern "C"` boundary for robio. Produces a `cdylib` exporting the classic
//! robust-I/O entry points:
//!
//! ```text
//! ssize_t rio_readn(int fd, void *usrbuf, size_t n);
//! ssize_t rio_writen(int fd, const void *usrbuf, size_t n);
//! rio_t  *rio_readinitb(int fd);
//! rio_t  *rio_readinitb_sized(int fd, size_t bufsize);
//! void    rio_free(rio_t *rp);
//! ssize_t rio_readnb(rio_t *rp, void *usrbuf, size_t n);
//! ssize_t rio_readlineb(rio_t *rp, void *usrbuf, size_t maxlen);
//! ```
//!
//! Failures return `-1` with `errno` set. `rio_t` is opaque: C callers only
//! ever hold a pointer obtained from `rio_readinitb`.
//!
//! The capitalised `Rio_*` variants in [`fatal_abi`] print a diagnostic and
//! terminate the process instead of returning `-1`.
//!
//! ```text
//! C caller -> ABI entry (this crate) -> argument checks -> robio-core -> return / errno
//! ```

pub mod fatal_abi;
pub mod rio_abi;
mod util;

pub use rio_abi::rio_t;
