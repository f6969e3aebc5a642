pub mod account;
pub mod memory;
pub mod todo;

pub use account::PostgresAccountRepository;
pub use memory::InMemoryAccountRepository;
pub use memory::InMemoryTodoRepository;
pub use todo::PostgresTodoRepository;
