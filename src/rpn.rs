//! Main module for rpn library functionality
//!
//! Stages, leaves first:
//!
//!     token     Token model shared by every stage.
//!     lexing    Hand-built DFA turning a line into tokens.
//!     grammar   FIRST/FOLLOW sets and the prediction table for the fixed grammar.
//!     parsing   Table-guided recursive descent producing the derivation tree.
//!     ast       The derivation tree itself.
//!
//! Around the core:
//!
//!     formats   Renderers for tokens, trees and grammar reports.
//!     pipeline  Multi-line processing with per-line error isolation.

pub mod ast;
pub mod formats;
pub mod grammar;
pub mod lexing;
pub mod parsing;
pub mod pipeline;
pub mod token;
