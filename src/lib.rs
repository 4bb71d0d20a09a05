//! snatch: a forced-capture chess variant engine.
//!
//! The side to move must capture whenever a capture is legal; everything in
//! the engine, from move enumeration to evaluation, is built around that
//! rule. Board mechanics come from the `chess` crate; this crate supplies
//! the search, evaluation, transposition table, time management and the
//! xboard protocol front end.

pub mod board;
pub mod engine;
pub mod eval;
pub mod forced;
pub mod ordering;
pub mod search;
pub mod tt;
pub mod xboard;
