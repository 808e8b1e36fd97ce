//! memo-graphql - GraphQL-backed gateway implementation.
//!
//! Talks to a managed notes backend: a GraphQL endpoint for the note
//! collection and auth session, plus a key-addressed object-storage
//! surface for binary assets.

mod client;
mod gateway;
mod operations;

pub use client::GraphqlClient;
pub use gateway::GraphqlGateway;
