//! # Example Schemas
//!
//! Ready-made schemas for common Solana-style account layouts, usable as
//! starting points and as named schemas on the command line.

use crate::application::error::{ApplicationError, ApplicationResult};
use crate::domain::schema::{Field, PrimitiveType, Schema, Type, Variant};

/// Name of the simple account schema.
pub const SIMPLE_ACCOUNT: &str = "simple_account";
/// Name of the token account schema.
pub const TOKEN_ACCOUNT: &str = "token_account";
/// Name of the user profile schema.
pub const USER_PROFILE: &str = "user_profile";

/// Names of all built-in schemas.
pub const NAMES: [&str; 3] = [SIMPLE_ACCOUNT, TOKEN_ACCOUNT, USER_PROFILE];

fn prim(primitive: PrimitiveType) -> Type {
    Type::primitive(primitive)
}

/// A minimal account: owner, balance, data length and executable flag.
#[must_use]
pub fn simple_account() -> Schema {
    Schema::new(
        SIMPLE_ACCOUNT,
        Type::structure(vec![
            Field::new("owner", prim(PrimitiveType::Pubkey)),
            Field::new("lamports", prim(PrimitiveType::U64)),
            Field::new("data_len", prim(PrimitiveType::U32)),
            Field::new("executable", prim(PrimitiveType::Bool)),
        ]),
    )
    .with_description("Basic account with owner, lamports and executable flag")
}

/// An SPL-style token account.
#[must_use]
pub fn token_account() -> Schema {
    let state = Type::enumeration(vec![
        Variant::unit("Uninitialized"),
        Variant::unit("Initialized"),
        Variant::unit("Frozen"),
    ]);

    Schema::new(
        TOKEN_ACCOUNT,
        Type::structure(vec![
            Field::new("mint", prim(PrimitiveType::Pubkey)),
            Field::new("owner", prim(PrimitiveType::Pubkey)),
            Field::new("amount", prim(PrimitiveType::U64)),
            Field::new("delegate", Type::option(prim(PrimitiveType::Pubkey))),
            Field::new("state", state),
            Field::new("is_native", Type::option(prim(PrimitiveType::U64))),
            Field::new("delegated_amount", prim(PrimitiveType::U64)),
            Field::new("close_authority", Type::option(prim(PrimitiveType::Pubkey))),
        ]),
    )
    .with_description("SPL token account layout")
}

/// A user profile with variable-length fields.
#[must_use]
pub fn user_profile() -> Schema {
    Schema::new(
        USER_PROFILE,
        Type::structure(vec![
            Field::new("username", prim(PrimitiveType::String)),
            Field::new("age", prim(PrimitiveType::U8)),
            Field::new("is_active", prim(PrimitiveType::Bool)),
            Field::new("tags", Type::vec(prim(PrimitiveType::String))),
            Field::new("balance", prim(PrimitiveType::U64)),
        ]),
    )
    .with_description("User profile with strings and a tag list")
}

/// Returns every built-in schema.
#[must_use]
pub fn all() -> Vec<Schema> {
    vec![simple_account(), token_account(), user_profile()]
}

/// Looks up a built-in schema by name.
///
/// # Errors
///
/// Returns `ApplicationError::UnknownSchema` if no schema has that name.
pub fn by_name(name: &str) -> ApplicationResult<Schema> {
    match name {
        SIMPLE_ACCOUNT => Ok(simple_account()),
        TOKEN_ACCOUNT => Ok(token_account()),
        USER_PROFILE => Ok(user_profile()),
        other => Err(ApplicationError::UnknownSchema(other.to_string())),
    }
}
