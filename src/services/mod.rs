// Service exports
pub mod memory;
pub mod postgres;
pub mod store;
pub mod supabase;

pub use memory::InMemoryStore;
pub use postgres::PostgresStore;
pub use store::{MatchStore, StoreError};
pub use supabase::{SupabaseClient, SupabaseTables};
