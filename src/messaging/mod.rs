//! Publish/subscribe messaging: the client seam, its events, the event
//! handler and the connection hand-off to the publishing task.

pub mod client;
pub mod connect;
pub mod event;
pub mod handler;
pub mod request;

pub use client::{MessageId, MessagingClient, QoS};
pub use connect::ConnectLatch;
pub use event::{event_id, ClientEvent};
pub use handler::{ClientEventHandler, Handled};
pub use request::Request;
