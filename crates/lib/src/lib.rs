//! EquiED core library: completion gateway, provider client and the chat
//! client (conversation state, commands, favorites) used by the CLI.

pub mod calculator;
pub mod client;
pub mod commands;
pub mod config;
pub mod conversation;
pub mod favorites;
pub mod gateway;
pub mod init;
pub mod knowledge;
pub mod llm;
pub mod prompt;
pub mod session;
pub mod share;
