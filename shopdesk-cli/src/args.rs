use clap::Parser;
use shopdesk_agent::{AgentConfig, DEFAULT_MAX_ITERATIONS, DEFAULT_MEMORY_WINDOW};
use shopdesk_llm::{GroqBackendFactory, SelectionPlan, DEFAULT_FALLBACK_MODELS, DEFAULT_PRIMARY_MODEL};

/// Chat with the shopdesk customer-service agent.
#[derive(Debug, Parser)]
#[command(name = "shopdesk", version, about, long_about = None)]
pub struct Args {
    /// Groq API key.
    #[arg(long, env = "GROQ_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// OpenAI-compatible endpoint.
    #[arg(long, env = "GROQ_BASE_URL", default_value = GroqBackendFactory::DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Primary model.
    #[arg(long, default_value = DEFAULT_PRIMARY_MODEL)]
    pub model: String,

    /// Fallback model tried when the primary cannot start. Repeatable.
    #[arg(long = "fallback-model", value_name = "MODEL")]
    pub fallback_models: Vec<String>,

    #[arg(long, default_value_t = DEFAULT_MAX_ITERATIONS)]
    pub max_iterations: usize,

    /// Exchanges kept in conversation memory.
    #[arg(long, default_value_t = DEFAULT_MEMORY_WINDOW)]
    pub memory_window: usize,

    #[arg(long)]
    pub session_id: Option<String>,

    /// Log in as this customer before the first message.
    #[arg(long)]
    pub customer_id: Option<String>,

    #[arg(long)]
    pub customer_email: Option<String>,

    /// Send one message, print the reply and exit.
    #[arg(long, short)]
    pub message: Option<String>,

    /// OpenWeatherMap key. Without it weather is simulated.
    #[arg(long, env = "WEATHER_API_KEY", hide_env_values = true)]
    pub weather_api_key: Option<String>,

    /// Debug logging on stderr.
    #[arg(long, short)]
    pub verbose: bool,
}

impl Args {
    pub fn selection_plan(&self) -> SelectionPlan {
        let fallbacks: Vec<String> = if self.fallback_models.is_empty() {
            DEFAULT_FALLBACK_MODELS.iter().map(|m| m.to_string()).collect()
        } else {
            self.fallback_models.clone()
        };
        SelectionPlan::new(self.model.clone()).with_fallbacks(fallbacks)
    }

    pub fn agent_config(&self) -> AgentConfig {
        AgentConfig::default()
            .with_max_iterations(self.max_iterations)
            .with_memory_window(self.memory_window)
    }
}
