//! Scoped ownership of transport connections.

use std::io;
use std::ops::{Deref, DerefMut};

use hopfetch_core::{Connection, ResponseBody, UNKNOWN_CONTENT_LENGTH};
use tracing::trace;

/// Header carrying the declared body length.
const CONTENT_LENGTH: &str = "Content-Length";

/// Owns an open connection and disconnects it exactly once.
///
/// The connection is released by an explicit [`ConnectionGuard::disconnect`]
/// or, failing that, when the guard is dropped.
#[derive(Debug)]
pub struct ConnectionGuard<C: Connection> {
    inner: C,
    disconnected: bool,
}

impl<C: Connection> ConnectionGuard<C> {
    /// Takes ownership of an open connection.
    pub fn new(inner: C) -> Self {
        Self {
            inner,
            disconnected: false,
        }
    }

    /// Returns the declared content length, or
    /// [`UNKNOWN_CONTENT_LENGTH`] if absent, unparseable, or negative.
    pub fn content_length(&self) -> i64 {
        self.inner
            .header(CONTENT_LENGTH)
            .and_then(|v| v.trim().parse::<i64>().ok())
            .filter(|len| *len >= 0)
            .unwrap_or(UNKNOWN_CONTENT_LENGTH)
    }

    /// Takes the response body from the connection.
    ///
    /// # Errors
    ///
    /// Returns an error if the body is unavailable.
    pub fn body(&mut self) -> io::Result<ResponseBody> {
        self.inner.body()
    }

    /// Disconnects the connection if it is still open.
    pub fn disconnect(&mut self) {
        if !self.disconnected {
            self.disconnected = true;
            trace!("Disconnecting");
            self.inner.disconnect();
        }
    }
}

impl<C: Connection> Deref for ConnectionGuard<C> {
    type Target = C;

    fn deref(&self) -> &C {
        &self.inner
    }
}

impl<C: Connection> DerefMut for ConnectionGuard<C> {
    fn deref_mut(&mut self) -> &mut C {
        &mut self.inner
    }
}

impl<C: Connection> Drop for ConnectionGuard<C> {
    fn drop(&mut self) {
        self.disconnect();
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    struct CountingConnection {
        disconnects: Rc<Cell<u32>>,
        content_length: Option<&'static str>,
    }

    impl CountingConnection {
        fn new(disconnects: &Rc<Cell<u32>>) -> Self {
            Self {
                disconnects: Rc::clone(disconnects),
                content_length: None,
            }
        }
    }

    impl Connection for CountingConnection {
        fn status_code(&mut self) -> io::Result<u16> {
            Ok(200)
        }

        fn header(&self, name: &str) -> Option<String> {
            if name.eq_ignore_ascii_case("content-length") {
                self.content_length.map(str::to_string)
            } else {
                None
            }
        }

        fn body(&mut self) -> io::Result<ResponseBody> {
            Ok(Box::new(io::empty()))
        }

        fn disconnect(&mut self) {
            self.disconnects.set(self.disconnects.get() + 1);
        }
    }

    #[test]
    fn test_explicit_disconnect_runs_once() {
        let count = Rc::new(Cell::new(0));
        let mut guard = ConnectionGuard::new(CountingConnection::new(&count));

        guard.disconnect();
        guard.disconnect();
        drop(guard);

        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_drop_disconnects() {
        let count = Rc::new(Cell::new(0));
        {
            let _guard = ConnectionGuard::new(CountingConnection::new(&count));
        }
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_content_length_parsing() {
        let count = Rc::new(Cell::new(0));
        let cases = [
            (Some("1024"), 1024),
            (Some(" 12 "), 12),
            (Some("-5"), UNKNOWN_CONTENT_LENGTH),
            (Some("lots"), UNKNOWN_CONTENT_LENGTH),
            (None, UNKNOWN_CONTENT_LENGTH),
        ];

        for (header, expected) in cases {
            let mut conn = CountingConnection::new(&count);
            conn.content_length = header;
            let guard = ConnectionGuard::new(conn);
            assert_eq!(guard.content_length(), expected, "header {header:?}");
        }
    }
}
