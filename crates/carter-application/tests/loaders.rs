mod common;

use async_trait::async_trait;
use carter_application::loaders::{chat_page, layout};
use carter_application::{DATA_DEPENDENCY, InvokeBackend, LoadEvent, Route};
use carter_core::error::{CarterError, Result};
use carter_core::invoke::{Invoke, commands};
use common::{Call, RecordingBackend, agent, chat, record, records};
use serde_json::{Value, json};
use std::sync::Arc;

fn event(path: &str) -> LoadEvent {
    LoadEvent::new(Route::resolve(path))
}

#[tokio::test]
async fn test_landing_route_makes_no_calls() {
    let backend = RecordingBackend::with_agents(vec![agent("A1", true)]);
    let mut event = event("/");

    let data = layout::load(&backend, &mut event).await.unwrap();

    assert!(data.is_none());
    assert!(backend.calls().is_empty());
    assert!(event.dependencies().contains(DATA_DEPENDENCY));
}

#[tokio::test]
async fn test_store_not_ready_short_circuits() {
    let backend = RecordingBackend {
        ready: false,
        ..RecordingBackend::with_agents(vec![agent("A1", true)])
    };

    for path in ["/chat", "/chat/C1", "/settings"] {
        let data = layout::load(&backend, &mut event(path)).await.unwrap();
        assert!(data.is_none(), "{} should not load data", path);
    }

    assert_eq!(backend.calls(), vec![Call::IsDbReady; 3]);
}

#[tokio::test]
async fn test_flagged_agent_becomes_current_without_selection() {
    let backend = RecordingBackend::with_agents(vec![agent("A0", false), agent("A1", true)]);

    let data = layout::load(&backend, &mut event("/chat"))
        .await
        .unwrap()
        .unwrap();

    assert_eq!(data.current_agent.unwrap().id(), Some("A1"));
    assert!(
        !backend
            .calls()
            .iter()
            .any(|call| matches!(call, Call::SetSelectedAgent { .. }))
    );
}

#[tokio::test]
async fn test_first_agent_is_selected_when_none_flagged() {
    let backend = RecordingBackend::with_agents(vec![agent("B", false), agent("A", false)]);

    let data = layout::load(&backend, &mut event("/chat"))
        .await
        .unwrap()
        .unwrap();

    let current = data.current_agent.unwrap();
    assert_eq!(current.id(), Some("B"));
    assert!(current.is_selected());
    assert_eq!(
        backend.calls(),
        vec![
            Call::IsDbReady,
            Call::ListAgents,
            Call::SetSelectedAgent { id: "B".to_string() },
            Call::ListChats {
                agent_id: "B".to_string()
            },
        ]
    );
    // The list itself is returned as the backend gave it.
    assert_eq!(
        data.agents,
        Some(records(&[agent("B", false), agent("A", false)]).unwrap())
    );
}

#[tokio::test]
async fn test_current_agent_is_the_backend_selection_record() {
    let mut returned = agent("A9", true);
    returned.name = "Chosen by backend".to_string();
    let backend = RecordingBackend {
        selection_override: Some(returned.clone()),
        ..RecordingBackend::with_agents(vec![agent("A1", false)])
    };

    let data = layout::load(&backend, &mut event("/chat"))
        .await
        .unwrap()
        .unwrap();

    assert_eq!(data.current_agent, Some(record(&returned)));
    assert!(backend.calls().contains(&Call::ListChats {
        agent_id: "A9".to_string()
    }));
}

#[tokio::test]
async fn test_empty_agent_list_loads_no_chats() {
    let backend = RecordingBackend::with_agents(Vec::new());

    let data = layout::load(&backend, &mut event("/chat"))
        .await
        .unwrap()
        .unwrap();

    assert!(data.current_agent.is_none());
    assert_eq!(data.agents, Some(Vec::new()));
    assert!(data.chats.is_empty());
    assert_eq!(backend.calls(), vec![Call::IsDbReady, Call::ListAgents]);
}

#[tokio::test]
async fn test_absent_agent_list_loads_no_chats() {
    let backend = RecordingBackend {
        agents: None,
        ..RecordingBackend::default()
    };

    let data = layout::load(&backend, &mut event("/chat"))
        .await
        .unwrap()
        .unwrap();

    assert!(data.current_agent.is_none());
    assert!(data.agents.is_none());
    assert!(data.chats.is_empty());
    assert_eq!(backend.calls(), vec![Call::IsDbReady, Call::ListAgents]);
}

#[tokio::test]
async fn test_chats_are_scoped_to_current_agent_verbatim() {
    let backend = RecordingBackend {
        chats: vec![
            chat("C1", "A1", &["hello"]),
            chat("C2", "A2", &["other agent"]),
            chat("C3", "A1", &[]),
        ],
        ..RecordingBackend::with_agents(vec![agent("A1", true), agent("A2", false)])
    };

    let data = layout::load(&backend, &mut event("/chat"))
        .await
        .unwrap()
        .unwrap();

    let expected: Vec<_> = backend
        .chats
        .iter()
        .filter(|c| c.agent_id == "A1")
        .map(|c| record(&c.summary()))
        .collect();
    assert_eq!(data.chats, expected);
    assert_eq!(
        backend.calls().last(),
        Some(&Call::ListChats {
            agent_id: "A1".to_string()
        })
    );
}

#[tokio::test]
async fn test_chat_page_returns_backend_record_unmodified() {
    let stored = chat("C42", "A1", &["one", "two"]);
    let backend = RecordingBackend {
        chats: vec![stored.clone()],
        ..RecordingBackend::default()
    };

    let data = chat_page::load(&backend, "C42").await.unwrap();

    assert_eq!(data.chat, Some(record(&stored)));
    assert_eq!(
        backend.calls(),
        vec![Call::GetChat {
            chat_id: "C42".to_string()
        }]
    );
}

#[tokio::test]
async fn test_chat_page_unknown_id_is_passed_through() {
    let backend = RecordingBackend::default();
    let data = chat_page::load(&backend, "missing").await.unwrap();
    assert!(data.chat.is_none());
}

#[tokio::test]
async fn test_any_failed_call_fails_the_whole_load() {
    let agents = vec![agent("A1", false)];
    for operation in ["is_db_ready", "list_agents", "set_selected_agent", "list_chats"] {
        let backend = RecordingBackend::with_agents(agents.clone()).failing_on(operation);

        let err = layout::load(&backend, &mut event("/chat"))
            .await
            .unwrap_err();

        assert_eq!(err.operation(), operation);
        assert!(matches!(
            backend.calls().last(),
            Some(call) if call_name(call) == operation
        ));
    }

    let backend = RecordingBackend::default().failing_on("get_chat");
    let err = chat_page::load(&backend, "C1").await.unwrap_err();
    assert_eq!(err.operation(), "get_chat");
}

fn call_name(call: &Call) -> &'static str {
    match call {
        Call::IsDbReady => "is_db_ready",
        Call::ListAgents => "list_agents",
        Call::SetSelectedAgent { .. } => "set_selected_agent",
        Call::ListChats { .. } => "list_chats",
        Call::GetChat { .. } => "get_chat",
    }
}

#[tokio::test]
async fn test_layout_data_serializes_like_the_view_expects() {
    let backend = RecordingBackend::with_agents(Vec::new());
    let data = layout::load(&backend, &mut event("/chat"))
        .await
        .unwrap()
        .unwrap();

    let value = serde_json::to_value(&data).unwrap();

    assert!(value.get("currentAgent").is_none());
    assert_eq!(value["agents"], serde_json::json!([]));
    assert_eq!(value["chats"], serde_json::json!([]));
}

/// Bridge answering every command with a fixed JSON value.
struct FixedBridge(Vec<(&'static str, Value)>);

#[async_trait]
impl Invoke for FixedBridge {
    async fn invoke(&self, command: &str, _args: Value) -> Result<Value> {
        self.0
            .iter()
            .find(|(name, _)| *name == command)
            .map(|(_, value)| value.clone())
            .ok_or_else(|| CarterError::invoke(command, "unscripted"))
    }
}

#[tokio::test]
async fn test_bridge_records_reach_the_view_unchanged() {
    let agent = json!({"id": "A1", "isSelected": true, "avatar": "a.png"});
    let summary = json!({
        "id": "C42",
        "title": "t",
        "messages": [{"content": "hi", "conversationId": "C42"}],
        "pinned": true
    });
    let untitled = json!({"id": "C42", "messages": []});
    let backend = InvokeBackend::new(Arc::new(FixedBridge(vec![
        (commands::IS_DB_READY, json!(true)),
        (commands::LIST_AGENTS, json!([agent.clone()])),
        (commands::LIST_CHATS, json!([summary.clone()])),
        (commands::GET_CHAT, untitled.clone()),
    ])));

    let layout_data = layout::load(&backend, &mut event("/chat/C42"))
        .await
        .unwrap()
        .unwrap();
    let page = chat_page::load(&backend, "C42").await.unwrap();

    assert_eq!(
        serde_json::to_value(&layout_data).unwrap(),
        json!({"currentAgent": agent, "agents": [agent], "chats": [summary]})
    );
    assert_eq!(
        serde_json::to_value(&page).unwrap(),
        json!({ "chat": untitled })
    );
}

#[tokio::test]
async fn test_first_agent_without_id_fails_the_load() {
    let backend = InvokeBackend::new(Arc::new(FixedBridge(vec![
        (commands::IS_DB_READY, json!(true)),
        (commands::LIST_AGENTS, json!([{"name": "nameless"}])),
    ])));

    let err = layout::load(&backend, &mut event("/chat"))
        .await
        .unwrap_err();

    assert_eq!(err.operation(), "set_selected_agent");
}
