//! completion 엔드포인트 호출 모듈.
//! OpenAI 호환 chat-completions API를 호출하고 응답 텍스트를 표준화한다.

mod api_runner;
mod chat_completions;

pub use api_runner::{build_api_client, extract_error_message, extract_message_content};
pub use chat_completions::{ChatCompletionsProvider, build_payload, completions_endpoint};
