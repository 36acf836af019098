mod react;
mod template;

pub use react::{
    customer_service_prompt, AGENT_SCRATCHPAD, CHAT_HISTORY, CUSTOMER_SERVICE_TEMPLATE, INPUT,
    TOOLS, TOOL_NAMES,
};
pub use template::PromptTemplate;
