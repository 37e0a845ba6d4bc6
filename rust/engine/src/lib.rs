//! # nightdealer-engine: Night Dealer Rules Engine
//!
//! A deterministic rules engine for Night Dealer, a two-player tile game on a
//! 3×3 grid. Players spend five randomized wheels per round to place typed
//! tiles (ATK, HEX, WARD and the wildcard ECLIPSE) that fight by a
//! rock-paper-scissors relation resolved simultaneously for the whole board.
//!
//! ## Core Modules
//!
//! - [`tiles`] - Players, faces, tiles, curse marks and flips
//! - [`board`] - Fixed nine-cell board and its adjacency table
//! - [`wheels`] - Per-player wheel slots and the seeded face roller
//! - [`rules`] - Turn caps, placement and reroll legality
//! - [`effects`] - Ward, Hex and Eclipse placement effects
//! - [`combat`] - Simultaneous RPS pass plus trap and curse triggers
//! - [`omen`] - One-flip reversal
//! - [`game`] - Turn/round/match state machine
//! - [`engine`] - Action API, snapshots and look-ahead simulation
//! - [`action`] / [`scheduler`] - Serializable actions and the delayed action queue
//! - [`record`] - Turn and match records for JSONL output
//! - [`errors`] - Rejection reasons
//!
//! ## Quick Start
//!
//! ```rust
//! use nightdealer_engine::config::RulesConfig;
//! use nightdealer_engine::effects::HexChoice;
//! use nightdealer_engine::engine::Engine;
//! use nightdealer_engine::tiles::{Face, PlayerId};
//!
//! let mut engine = Engine::with_starter(42, RulesConfig::default(), PlayerId::One).unwrap();
//! engine.set_faces(PlayerId::One, [Face::Atk; 5]);
//! engine.place(0, 4).unwrap();
//! engine.validate_turn().unwrap();
//!
//! engine.set_faces(PlayerId::Two, [Face::Hex; 5]);
//! engine.place(0, 1).unwrap();
//! // A Hex next to an enemy must pick a curse or a trap before validating
//! engine.resolve_hex_choice(HexChoice::Trap(0)).unwrap();
//! let record = engine.validate_turn().unwrap();
//! // HEX@1 sits next to ATK@4 and loses it straight away
//! assert_eq!(record.flips.len(), 1);
//! assert_eq!(engine.board().owner_at(1), Some(PlayerId::One));
//! ```
//!
//! ## Deterministic Gameplay
//!
//! Wheel faces and starting players come from a seeded ChaCha20 stream:
//!
//! ```rust
//! use nightdealer_engine::config::RulesConfig;
//! use nightdealer_engine::engine::Engine;
//!
//! let a = Engine::new(Some(9), RulesConfig::default()).unwrap();
//! let b = Engine::new(Some(9), RulesConfig::default()).unwrap();
//! assert_eq!(a.snapshot(), b.snapshot());
//! ```

pub mod action;
pub mod board;
pub mod combat;
pub mod config;
pub mod effects;
pub mod engine;
pub mod errors;
pub mod game;
pub mod omen;
pub mod record;
pub mod rules;
pub mod scheduler;
pub mod snapshot;
pub mod tiles;
pub mod wheels;
