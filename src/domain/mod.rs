//! Domain layer
//! 감사 요청/결과, 프롬프트 구성, 응답 해석, 표시 정책을 외부 I/O 없이 표현한다.

pub mod audit;
pub mod interpret;
pub mod prompt;
pub mod style;
