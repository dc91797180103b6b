use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use tracing::debug;

use crate::application::{ChatClient, DatasetSource};
use crate::{
    AskQuestionUseCase, CsvDatasetSource, LoadDatasetUseCase, MockChatClient, OllamaClient,
    OllamaConfig, SendMessageUseCase,
};

pub struct ContainerConfig {
    pub dataset_path: PathBuf,
    pub ollama: OllamaConfig,
    /// Answer with [`MockChatClient`] instead of calling the server.
    pub mock_llm: bool,
}

pub struct Container {
    chat_client: Arc<dyn ChatClient>,
    dataset_source: Arc<dyn DatasetSource>,
    config: ContainerConfig,
}

impl Container {
    pub fn new(config: ContainerConfig) -> Result<Self> {
        let chat_client: Arc<dyn ChatClient> = if config.mock_llm {
            debug!("Using mock chat client");
            Arc::new(MockChatClient::new())
        } else {
            debug!(
                "Using Ollama at {} with model {}",
                config.ollama.url, config.ollama.model
            );
            Arc::new(OllamaClient::new(config.ollama.clone())?)
        };

        let dataset_source: Arc<dyn DatasetSource> =
            Arc::new(CsvDatasetSource::new(config.dataset_path.clone()));

        Ok(Self {
            chat_client,
            dataset_source,
            config,
        })
    }

    /// Build a container around already constructed services.
    pub fn with_services(
        config: ContainerConfig,
        chat_client: Arc<dyn ChatClient>,
        dataset_source: Arc<dyn DatasetSource>,
    ) -> Self {
        Self {
            chat_client,
            dataset_source,
            config,
        }
    }

    pub fn load_dataset_use_case(&self) -> LoadDatasetUseCase {
        LoadDatasetUseCase::new(self.dataset_source.clone())
    }

    pub fn ask_use_case(&self) -> AskQuestionUseCase {
        AskQuestionUseCase::new(self.chat_client.clone())
    }

    pub fn send_message_use_case(&self) -> SendMessageUseCase {
        SendMessageUseCase::new(self.chat_client.clone())
    }

    pub fn model(&self) -> &str {
        if self.config.mock_llm {
            "mock"
        } else {
            self.config.ollama.model.as_str()
        }
    }
}
