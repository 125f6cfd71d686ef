//! completion 게이트웨이 팩토리 포트 구현 어댑터.

use anyhow::Result;

use crate::application::config::Config;
use crate::application::ports::{CompletionGateway, CompletionGatewayFactory};
use crate::infrastructure::providers::ChatCompletionsProvider;

pub struct ChatCompletionsGatewayFactory;

impl CompletionGatewayFactory for ChatCompletionsGatewayFactory {
    fn build(&self, config: &Config) -> Result<Box<dyn CompletionGateway>> {
        let provider = ChatCompletionsProvider::from_config(&config.provider)?;
        Ok(Box::new(provider))
    }
}
