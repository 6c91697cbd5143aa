//! Trellis Core Types and Definitions
//!
//! This crate provides the foundational types for the Trellis diagram
//! pipeline. It includes:
//!
//! - **Identifiers**: Efficient string-interned identifiers ([`identifier::Id`])
//! - **Dialects**: The closed set of recognized diagram notations ([`dialect::Dialect`])
//! - **Sources**: The immutable diagram source value ([`source::DiagramSource`])
//! - **Graphs**: The intermediate graph-description program and its
//!   deterministic DOT serializer ([`graph`] module)

pub mod dialect;
pub mod graph;
pub mod identifier;
pub mod source;
