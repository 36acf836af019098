mod common;

use std::sync::Arc;
use std::time::Duration;

use common::ScriptedLlm;
use shopdesk_agent::{
    AgentConfig, AgentExecutor, Termination, ToolRegistry, EMPTY_OUTPUT_MESSAGE, ITERATION_CEILING_MESSAGE,
    RATE_LIMIT_MESSAGE, TIMEOUT_MESSAGE,
};
use shopdesk_core::{LlmError, ShopdeskError};
use shopdesk_prompt::customer_service_prompt;
use shopdesk_session::SessionContext;
use shopdesk_tools::{default_tools, ShopData};

const ORDER_LOOKUP: &str = "Thought: I should look the order up\nAction: order_status\nAction Input: ORD001";

fn executor(llm: &ScriptedLlm) -> AgentExecutor {
    let tools = ToolRegistry::builder()
        .register_all(default_tools(&ShopData::seeded(), None))
        .build()
        .expect("registry");
    AgentExecutor::new(
        Arc::new(llm.clone()),
        Arc::new(tools),
        customer_service_prompt(),
    )
}

#[tokio::test]
async fn direct_final_answer_finishes_in_one_call() {
    let llm = ScriptedLlm::new(["Final Answer: Hello!"]);
    let report = executor(&llm)
        .run_turn("hi", "", &SessionContext::new())
        .await;

    assert_eq!(report.output, "Hello!");
    assert_eq!(report.termination, Termination::Finished);
    assert!(report.steps.is_empty());
    assert_eq!(llm.calls(), 1);
}

#[tokio::test]
async fn tool_observation_is_fed_back_through_the_scratchpad() {
    let llm = ScriptedLlm::new([
        ORDER_LOOKUP,
        "Thought: I now know how to respond\nFinal Answer: Your order ORD001 has shipped.",
    ]);
    let report = executor(&llm)
        .run_turn("Where is ORD001?", "Human: hi\nAI: Hello!\n", &SessionContext::new())
        .await;

    assert_eq!(report.output, "Your order ORD001 has shipped.");
    assert_eq!(report.termination, Termination::Finished);
    assert_eq!(report.steps.len(), 1);
    assert_eq!(report.steps[0].action.tool_name, "order_status");
    assert_eq!(report.steps[0].thought, "I should look the order up");
    assert!(report.steps[0].observation.contains("Status: Shipped"));

    let prompts = llm.prompts();
    assert_eq!(prompts.len(), 2);
    assert!(prompts[0].contains("order_status: Check the status of an order"));
    assert!(prompts[0].contains("Action: one of [order_status, cancel_order,"));
    assert!(prompts[0].contains("Human: hi\nAI: Hello!\n"));
    assert!(prompts[0].ends_with("Question: Where is ORD001?\nThought:"));
    assert!(prompts[1].contains(
        "Thought: I should look the order up\nAction: order_status\nAction Input: ORD001\nObservation: RESULT: Order Details Found"
    ));
    assert!(prompts[1].ends_with("Thought:"));
}

#[tokio::test]
async fn unknown_tool_does_not_end_the_turn() {
    let llm = ScriptedLlm::new([
        "Action: nonexistent_tool\nAction Input: x",
        "Final Answer: Let me help another way.",
    ]);
    let report = executor(&llm)
        .run_turn("do something odd", "", &SessionContext::new())
        .await;

    assert_eq!(report.termination, Termination::Finished);
    assert_eq!(report.output, "Let me help another way.");
    assert!(report.steps[0].observation.contains("not found"));
    assert!(llm.prompts()[1].contains("Tool 'nonexistent_tool' not found"));
}

#[tokio::test]
async fn endless_actions_stop_at_the_ceiling() {
    let llm = ScriptedLlm::repeating(ORDER_LOOKUP);
    let report = executor(&llm)
        .run_turn("loop forever", "", &SessionContext::new())
        .await;

    assert_eq!(report.termination, Termination::IterationCeiling);
    assert_eq!(report.output, ITERATION_CEILING_MESSAGE);
    assert_eq!(report.steps.len(), 5);
    assert_eq!(llm.calls(), 5);
}

#[tokio::test]
async fn ceiling_is_configurable() {
    let llm = ScriptedLlm::repeating(ORDER_LOOKUP);
    let report = executor(&llm)
        .with_config(&AgentConfig::default().with_max_iterations(2))
        .unwrap()
        .run_turn("loop", "", &SessionContext::new())
        .await;

    assert_eq!(report.termination, Termination::IterationCeiling);
    assert_eq!(llm.calls(), 2);
}

#[test]
fn zero_iteration_ceiling_is_rejected() {
    let llm = ScriptedLlm::repeating(ORDER_LOOKUP);
    let err = executor(&llm)
        .with_config(&AgentConfig::default().with_max_iterations(0))
        .err()
        .expect("zero ceiling must be rejected");

    assert!(matches!(err, ShopdeskError::InvalidConfig(_)));
    assert_eq!(llm.calls(), 0);
}

#[tokio::test]
async fn backend_failure_is_classified() {
    let llm = ScriptedLlm::failing(LlmError::RateLimited("429 Too Many Requests".to_string()));
    let report = executor(&llm)
        .run_turn("hello", "", &SessionContext::new())
        .await;

    assert_eq!(report.termination, Termination::BackendFailure);
    assert_eq!(report.output, RATE_LIMIT_MESSAGE);
}

#[tokio::test]
async fn failure_after_a_step_keeps_the_trace() {
    let llm = ScriptedLlm::new([ORDER_LOOKUP])
        .then(Err(LlmError::Timeout(Duration::from_secs(120))));
    let report = executor(&llm)
        .run_turn("Where is ORD001?", "", &SessionContext::new())
        .await;

    assert_eq!(report.termination, Termination::BackendFailure);
    assert_eq!(report.output, TIMEOUT_MESSAGE);
    assert_eq!(report.steps.len(), 1);
}

#[tokio::test]
async fn empty_answer_is_replaced_with_an_apology() {
    let llm = ScriptedLlm::new(["Final Answer:   "]);
    let report = executor(&llm)
        .run_turn("hello", "", &SessionContext::new())
        .await;

    assert_eq!(report.output, EMPTY_OUTPUT_MESSAGE);
}

#[tokio::test]
async fn session_context_annotates_the_question() {
    let llm = ScriptedLlm::new(["Final Answer: ok"]);
    let context = SessionContext::new()
        .with("customer_id", "CUST001")
        .with("customer_email", "john.doe@email.com");
    executor(&llm).run_turn("my orders?", "", &context).await;

    assert!(llm.prompts()[0].contains(
        "Question: my orders?\nCustomer Context: customer_email=john.doe@email.com, customer_id=CUST001\n"
    ));
}
