//! Command-line front end: every subcommand goes through the command router.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Result, anyhow, bail};
use carter_application::{InvokeBackend, Navigation, Navigator, render};
use carter_core::api::{ChatResponse, OpenerResponse, Plugin};
use carter_core::invoke::commands;
use carter_core::{Agent, Chat, ChatSummary, Message};
use carter_infrastructure::CarterPaths;
use clap::{Parser, Subcommand};
use serde_json::{Value, json};

use crate::commands::CommandRouter;

#[derive(Parser, Debug)]
#[command(name = "carter", version, about = "Carter desktop client")]
pub struct Cli {
    /// Root directory for both config and data (defaults to the platform dirs)
    #[arg(long, global = true)]
    pub base_dir: Option<PathBuf>,

    /// Directory holding the library and logs
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Base URL of the Carter API
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    pub fn paths(&self) -> CarterPaths {
        CarterPaths::new(self.base_dir.as_deref())
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Navigate to a view path (e.g. `/chat/<id>`) and print its data
    Load { path: String },
    /// Manage agents
    #[command(subcommand)]
    Agent(AgentCommand),
    /// Manage chats
    #[command(subcommand)]
    Chat(ChatCommand),
    /// Print the rendering and packaging posture
    BuildInfo,
}

#[derive(Subcommand, Debug)]
pub enum AgentCommand {
    List,
    Selected,
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        key: String,
    },
    Update {
        id: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        key: String,
    },
    Select { id: String },
    Remove { id: String },
}

#[derive(Subcommand, Debug)]
pub enum ChatCommand {
    /// List chats of an agent (the selected agent by default)
    List {
        #[arg(long)]
        agent: Option<String>,
    },
    Show { id: String },
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        agent: String,
        /// Chat id; a UUID is generated when omitted
        #[arg(long)]
        id: Option<String>,
    },
    Delete { id: String },
    /// Append a message to a chat
    Say {
        id: String,
        content: String,
        #[arg(long)]
        from_agent: bool,
    },
    /// Send a message to the chat's agent and record the reply
    Send { id: String, input: String },
    /// Let the chat's agent open the conversation
    Open { id: String },
    /// List the plugins of the chat's agent
    Plugins { id: String },
}

/// Runs one subcommand and returns its JSON output.
pub async fn run(command: Command, router: Arc<CommandRouter>) -> Result<Value> {
    let backend = InvokeBackend::new(router);

    let output = match command {
        Command::Load { path } => {
            let navigator = Navigator::new(Arc::new(backend));
            match navigator.navigate(&path).await? {
                Navigation::Loaded(data) => serde_json::to_value(data)?,
                Navigation::Superseded => bail!("navigation to {} was superseded", path),
            }
        }
        Command::BuildInfo => serde_json::to_value(render::build_posture())?,
        Command::Agent(command) => run_agent(command, &backend).await?,
        Command::Chat(command) => run_chat(command, &backend).await?,
    };
    Ok(output)
}

async fn run_agent(command: AgentCommand, backend: &InvokeBackend<CommandRouter>) -> Result<Value> {
    let output = match command {
        AgentCommand::List => {
            let agents: Vec<Agent> = backend.invoke(commands::LIST_AGENTS, json!({})).await?;
            serde_json::to_value(agents)?
        }
        AgentCommand::Selected => {
            let agent: Option<Agent> = backend
                .invoke(commands::GET_SELECTED_AGENT, json!({}))
                .await?;
            serde_json::to_value(agent)?
        }
        AgentCommand::Create { name, key } => {
            let agent: Agent = backend
                .invoke(commands::CREATE_AGENT, json!({ "name": name, "key": key }))
                .await?;
            serde_json::to_value(agent)?
        }
        AgentCommand::Update { id, name, key } => {
            let agent: Agent = backend
                .invoke(
                    commands::UPDATE_AGENT,
                    json!({ "id": id, "name": name, "key": key }),
                )
                .await?;
            serde_json::to_value(agent)?
        }
        AgentCommand::Select { id } => {
            let agent: Agent = backend
                .invoke(commands::SET_SELECTED_AGENT, json!({ "id": id }))
                .await?;
            serde_json::to_value(agent)?
        }
        AgentCommand::Remove { id } => {
            let agent: Agent = backend
                .invoke(commands::REMOVE_AGENT, json!({ "id": id }))
                .await?;
            serde_json::to_value(agent)?
        }
    };
    Ok(output)
}

async fn run_chat(command: ChatCommand, backend: &InvokeBackend<CommandRouter>) -> Result<Value> {
    let output = match command {
        ChatCommand::List { agent } => {
            let agent_id = match agent {
                Some(id) => id,
                None => {
                    let selected: Option<Agent> = backend
                        .invoke(commands::GET_SELECTED_AGENT, json!({}))
                        .await?;
                    selected
                        .map(|agent| agent.id)
                        .ok_or_else(|| anyhow!("No agent selected; pass --agent"))?
                }
            };
            let chats: Vec<ChatSummary> = backend
                .invoke(commands::LIST_CHATS, json!({ "agentId": agent_id }))
                .await?;
            serde_json::to_value(chats)?
        }
        ChatCommand::Show { id } => {
            let chat: Option<Chat> = backend
                .invoke(commands::GET_CHAT, json!({ "chatId": id }))
                .await?;
            serde_json::to_value(chat.ok_or_else(|| anyhow!("Chat not found: {}", id))?)?
        }
        ChatCommand::Create { title, agent, id } => {
            let id = id.unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
            let chat: Chat = backend
                .invoke(
                    commands::CREATE_CHAT,
                    json!({ "title": title, "id": id, "agentId": agent }),
                )
                .await?;
            serde_json::to_value(chat)?
        }
        ChatCommand::Delete { id } => {
            let chat: Chat = backend
                .invoke(commands::DELETE_CHAT, json!({ "id": id }))
                .await?;
            serde_json::to_value(chat)?
        }
        ChatCommand::Say {
            id,
            content,
            from_agent,
        } => {
            let message: Message = backend
                .invoke(
                    commands::APPEND_MESSAGE,
                    json!({ "chatId": id, "content": content, "isFromAgent": from_agent }),
                )
                .await?;
            serde_json::to_value(message)?
        }
        ChatCommand::Send { id, input } => {
            let agent_key = agent_key_for_chat(backend, &id).await?;
            let response: ChatResponse = backend
                .invoke(
                    commands::CHAT,
                    json!({ "chatId": id, "agentKey": agent_key, "input": input }),
                )
                .await?;
            serde_json::to_value(response)?
        }
        ChatCommand::Open { id } => {
            let agent_key = agent_key_for_chat(backend, &id).await?;
            let response: OpenerResponse = backend
                .invoke(commands::OPENER, json!({ "chatId": id, "agentKey": agent_key }))
                .await?;
            serde_json::to_value(response)?
        }
        ChatCommand::Plugins { id } => {
            let agent_key = agent_key_for_chat(backend, &id).await?;
            let plugins: Vec<Plugin> = backend
                .invoke(
                    commands::LIST_PLUGINS,
                    json!({ "chatId": id, "agentKey": agent_key }),
                )
                .await?;
            serde_json::to_value(plugins)?
        }
    };
    Ok(output)
}

/// Key of the agent that owns `chat_id`.
async fn agent_key_for_chat(backend: &InvokeBackend<CommandRouter>, chat_id: &str) -> Result<String> {
    let chat: Option<Chat> = backend
        .invoke(commands::GET_CHAT, json!({ "chatId": chat_id }))
        .await?;
    let chat = chat.ok_or_else(|| anyhow!("Chat not found: {}", chat_id))?;

    let agents: Vec<Agent> = backend.invoke(commands::LIST_AGENTS, json!({})).await?;
    agents
        .into_iter()
        .find(|agent| agent.id == chat.agent_id)
        .map(|agent| agent.key)
        .ok_or_else(|| anyhow!("Agent {} of chat {} not found", chat.agent_id, chat_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::bootstrap;
    use carter_core::CarterApi;
    use carter_infrastructure::CarterClient;
    use clap::CommandFactory;
    use tempfile::TempDir;

    fn offline_api() -> Arc<dyn CarterApi> {
        Arc::new(CarterClient::new("http://127.0.0.1:9"))
    }

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["carter", "load", "/chat/C1", "--base-dir", "/tmp/x"]);
        assert_eq!(cli.base_dir, Some(PathBuf::from("/tmp/x")));
        assert!(matches!(cli.command, Command::Load { ref path } if path == "/chat/C1"));
    }

    #[tokio::test]
    async fn test_end_to_end_load_selects_first_agent() {
        let temp_dir = TempDir::new().unwrap();
        let boot = bootstrap(&CarterPaths::new(Some(temp_dir.path())), offline_api())
            .await
            .unwrap();
        let router = boot.router.clone();

        let first = run(
            Command::Agent(AgentCommand::Create {
                name: "First".to_string(),
                key: "k1".to_string(),
            }),
            router.clone(),
        )
        .await
        .unwrap();
        run(
            Command::Agent(AgentCommand::Create {
                name: "Second".to_string(),
                key: "k2".to_string(),
            }),
            router.clone(),
        )
        .await
        .unwrap();
        let first_id = first["id"].as_str().unwrap().to_string();
        run(
            Command::Chat(ChatCommand::Create {
                title: "Hello".to_string(),
                agent: first_id.clone(),
                id: Some("C1".to_string()),
            }),
            router.clone(),
        )
        .await
        .unwrap();
        run(
            Command::Chat(ChatCommand::Say {
                id: "C1".to_string(),
                content: "Hi, I am First".to_string(),
                from_agent: true,
            }),
            router.clone(),
        )
        .await
        .unwrap();

        let page = run(
            Command::Load {
                path: "/chat/C1".to_string(),
            },
            router.clone(),
        )
        .await
        .unwrap();

        assert_eq!(page["layout"]["currentAgent"]["id"], json!(first_id));
        assert_eq!(page["layout"]["currentAgent"]["isSelected"], json!(true));
        assert_eq!(page["layout"]["agents"].as_array().unwrap().len(), 2);
        assert_eq!(
            page["layout"]["chats"][0]["messages"][0]["content"],
            json!("Hi, I am First")
        );
        assert_eq!(page["page"]["chat"]["id"], json!("C1"));

        let selected = run(Command::Agent(AgentCommand::Selected), router.clone())
            .await
            .unwrap();
        assert_eq!(selected["id"], json!(first_id));

        let chats = run(Command::Chat(ChatCommand::List { agent: None }), router)
            .await
            .unwrap();
        assert_eq!(chats.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_landing_load_has_no_layout() {
        let temp_dir = TempDir::new().unwrap();
        let boot = bootstrap(&CarterPaths::new(Some(temp_dir.path())), offline_api())
            .await
            .unwrap();

        let page = run(Command::Load { path: "/".to_string() }, boot.router)
            .await
            .unwrap();

        assert_eq!(page["layout"], Value::Null);
        assert_eq!(page["route"]["kind"], json!("landing"));
    }

    #[tokio::test]
    async fn test_chat_list_without_selection_fails() {
        let temp_dir = TempDir::new().unwrap();
        let boot = bootstrap(&CarterPaths::new(Some(temp_dir.path())), offline_api())
            .await
            .unwrap();

        let err = run(Command::Chat(ChatCommand::List { agent: None }), boot.router)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("No agent selected"));
    }

    #[tokio::test]
    async fn test_send_uses_the_chat_agents_key() {
        let temp_dir = TempDir::new().unwrap();
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/chat")
            .match_body(mockito::Matcher::PartialJson(
                json!({"key": "k-ada", "user_id": "C1", "text": "how are you?"}),
            ))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(json!({"output": {"text": "Great, thanks!"}}).to_string())
            .create_async()
            .await;
        let boot = bootstrap(
            &CarterPaths::new(Some(temp_dir.path())),
            Arc::new(CarterClient::new(server.url())),
        )
        .await
        .unwrap();
        let router = boot.router.clone();

        let ada = run(
            Command::Agent(AgentCommand::Create {
                name: "Ada".to_string(),
                key: "k-ada".to_string(),
            }),
            router.clone(),
        )
        .await
        .unwrap();
        run(
            Command::Chat(ChatCommand::Create {
                title: "Catch-up".to_string(),
                agent: ada["id"].as_str().unwrap().to_string(),
                id: Some("C1".to_string()),
            }),
            router.clone(),
        )
        .await
        .unwrap();

        let response = run(
            Command::Chat(ChatCommand::Send {
                id: "C1".to_string(),
                input: "how are you?".to_string(),
            }),
            router.clone(),
        )
        .await
        .unwrap();

        mock.assert_async().await;
        assert_eq!(response["output"]["text"], json!("Great, thanks!"));
        let chat = run(Command::Chat(ChatCommand::Show { id: "C1".to_string() }), router)
            .await
            .unwrap();
        assert_eq!(chat["messages"].as_array().unwrap().len(), 2);
    }
}
