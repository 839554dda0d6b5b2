//! Gateway: the completion endpoint.
//!
//! `POST /api/chat` takes a conversation, injects the system instruction and walks
//! the model chain; it always answers with usable content unless the body is malformed.

mod fallback;
mod protocol;
mod server;

pub use fallback::FallbackChain;
pub use protocol::{parse_chat_request, ChatErrorReply, ChatReply, ChatRequest, InboundError};
pub use server::{router, run_gateway, run_gateway_with_chain, GatewayState};
