//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` when a migration changes a table.

diesel::table! {
    /// Registered accounts. `email` and `user_name` carry unique constraints.
    users (id) {
        id -> Uuid,
        full_name -> Varchar,
        /// Lower-cased before insert.
        email -> Varchar,
        user_name -> Varchar,
        password_hash -> Varchar,
        /// `admin` or `employee`.
        role -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Current stock.
    inventory_items (id) {
        id -> Uuid,
        name -> Varchar,
        category -> Varchar,
        quantity -> Int4,
        price -> Float8,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Append-only audit trail.
    history_entries (id) {
        id -> Uuid,
        /// Insertion sequence; breaks ties between equal `recorded_at` values.
        seq -> Int8,
        /// `Added`, `Updated` or `Deleted`.
        action -> Varchar,
        /// JSON snapshot of the item at mutation time.
        product -> Jsonb,
        recorded_at -> Timestamptz,
    }
}

diesel::allow_tables_to_appear_in_same_query!(users, inventory_items, history_entries);
