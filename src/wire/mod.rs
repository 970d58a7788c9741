mod link;
pub mod protocol;

pub use link::{read_line, write_line};
pub use protocol::{classify, decode_event, encode_event, DealerMessage, Incoming, PlayerMessage, WireError};
