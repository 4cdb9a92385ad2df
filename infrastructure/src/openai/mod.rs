//! OpenAI-compatible chat-completions adapter
//!
//! Implements [`LlmGateway`](arena_application::LlmGateway) over `reqwest`
//! for any endpoint accepting `POST {base_url}/chat/completions`.
//!
//! | HTTP outcome | [`GatewayError`](arena_application::GatewayError) |
//! |--------------|------------------|
//! | connect failure | `ConnectionError` |
//! | request timeout | `Timeout` |
//! | 429 | `RateLimited` |
//! | 401 / 403, or no key configured | `Unauthorized` |
//! | other non-2xx | `RequestFailed` |
//! | undecodable body, zero choices, null content | `InvalidResponse` |

mod error;
mod gateway;
mod protocol;

pub use error::OpenAiError;
pub use gateway::OpenAiGateway;
