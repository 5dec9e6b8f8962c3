//! Request kinds carried on `req/<tag>` topics.
//!
//! The receiving side of the relay reacts to the last topic segment; the
//! handler uses the same classification to annotate inbound data.

use core::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Request {
    Call,
    Drink,
    Eat,
    Sleep,
}

impl Request {
    pub const ALL: [Request; 4] = [Request::Call, Request::Drink, Request::Eat, Request::Sleep];

    /// Classify by the last `/`-separated segment of `topic`.
    pub fn from_topic(topic: &[u8]) -> Option<Self> {
        let tag = topic.rsplit(|b| *b == b'/').next()?;
        match tag {
            b"call" => Some(Request::Call),
            b"drink" => Some(Request::Drink),
            b"eat" => Some(Request::Eat),
            b"sleep" => Some(Request::Sleep),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Request::Call => "call",
            Request::Drink => "drink",
            Request::Eat => "eat",
            Request::Sleep => "sleep",
        }
    }

    /// Canonical topic for this request.
    pub fn topic(self) -> &'static str {
        match self {
            Request::Call => "req/call",
            Request::Drink => "req/drink",
            Request::Eat => "req/eat",
            Request::Sleep => "req/sleep",
        }
    }
}

impl fmt::Display for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
