// Service exports
pub mod completion;
pub mod oracle;
pub mod store;
pub mod supabase;

pub use completion::ChatCompletionClient;
pub use oracle::{Oracle, OracleError};
pub use store::{CatalogStore, StoreError};
pub use supabase::{SupabaseClient, SupabaseTables};
