//! # Mundart Harness
//!
//! A confidence-scored extraction pipeline for German-to-Franconian dialect
//! records from the BDO "Wörterbuch von Bayerisch-Franken" (WBF) corpus.
//!
//! The pipeline has three stages: compile a validated search request into
//! flat corpus query parameters, extract translation records from a corpus
//! XML document, and score each record's semantic fit against the search
//! word with a deterministic heuristic in `[0, 1]`.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────┐   ┌──────────┐   ┌───────────┐
//! │ Request  │──▶│  Params  │   │ Document  │
//! │ validate │   │ compile  │   │   (XML)   │
//! └──────────┘   └──────────┘   └────┬──────┘
//!                                    ▼
//!                               ┌──────────┐   ┌──────────┐
//!                               │ Extract  │──▶│  Score   │
//!                               │ + drop   │   │ + rank   │
//!                               └──────────┘   └────┬─────┘
//!                                                   │
//!                               ┌──────────┐   ┌────┴─────┐
//!                               │   CLI    │   │   HTTP   │
//!                               │(mundart) │   │  (MCP)   │
//!                               └──────────┘   └──────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! mundart scopes                         # list geographic scopes
//! mundart compile Haus --scope area_ansbach
//! mundart extract response.xml Haus      # extract and rank records
//! mundart serve mcp                      # start HTTP server
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`models`] | Core data types |
//! | [`scope`] | Geographic scope catalog |
//! | [`request`] | Request boundary validation |
//! | [`params`] | Query parameter compilation |
//! | [`extract`] | Validated XML record extraction |
//! | [`score`] | Heuristic confidence scoring |
//! | [`pipeline`] | Extract, score and rank |
//! | [`server`] | MCP HTTP server |

pub mod config;
pub mod extract;
pub mod models;
pub mod params;
pub mod pipeline;
pub mod request;
pub mod scope;
pub mod score;
pub mod server;
