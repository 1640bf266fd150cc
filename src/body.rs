use std::fmt;
use std::io::{self, Cursor, Read};

/// Request or response payload.
///
/// A body is either empty, a buffer held in memory, or a stream that is read
/// lazily. Streams can only be read once.
pub struct Body {
    kind: Kind,
}

enum Kind {
    Empty,
    Bytes(Cursor<Vec<u8>>),
    Reader(Box<dyn Read + Send>),
}

impl Body {
    pub fn empty() -> Self {
        Body { kind: Kind::Empty }
    }

    pub fn from_reader<R>(reader: R) -> Self
    where
        R: Read + Send + 'static,
    {
        Body {
            kind: Kind::Reader(Box::new(reader)),
        }
    }

    pub fn is_empty(&self) -> bool {
        match &self.kind {
            Kind::Empty => true,
            Kind::Bytes(bytes) => bytes.get_ref().is_empty(),
            Kind::Reader(_) => false,
        }
    }

    /// The in-memory contents, `None` for streams.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match &self.kind {
            Kind::Empty => Some(&[]),
            Kind::Bytes(bytes) => Some(bytes.get_ref()),
            Kind::Reader(_) => None,
        }
    }

    pub(crate) fn into_reqwest(self) -> Option<reqwest::blocking::Body> {
        match self.kind {
            Kind::Empty => None,
            Kind::Bytes(bytes) => Some(bytes.into_inner().into()),
            Kind::Reader(reader) => Some(reqwest::blocking::Body::new(reader)),
        }
    }
}

impl Default for Body {
    fn default() -> Self {
        Body::empty()
    }
}

impl Read for Body {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match &mut self.kind {
            Kind::Empty => Ok(0),
            Kind::Bytes(bytes) => bytes.read(buf),
            Kind::Reader(reader) => reader.read(buf),
        }
    }
}

impl fmt::Debug for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            Kind::Empty => f.write_str("Body::Empty"),
            Kind::Bytes(bytes) => f
                .debug_tuple("Body::Bytes")
                .field(&bytes.get_ref().len())
                .finish(),
            Kind::Reader(_) => f.write_str("Body::Reader"),
        }
    }
}

impl From<Vec<u8>> for Body {
    fn from(bytes: Vec<u8>) -> Self {
        Body {
            kind: Kind::Bytes(Cursor::new(bytes)),
        }
    }
}

impl From<&[u8]> for Body {
    fn from(bytes: &[u8]) -> Self {
        bytes.to_vec().into()
    }
}

impl From<String> for Body {
    fn from(body: String) -> Self {
        body.into_bytes().into()
    }
}

impl From<&str> for Body {
    fn from(body: &str) -> Self {
        body.as_bytes().into()
    }
}
