//! # Infrastructure Layer
//!
//! Wire-level plumbing: the Borsh byte cursor, writer and the recursive
//! codec that drives them from a [`Type`](crate::domain::schema::Type).

pub mod borsh;
