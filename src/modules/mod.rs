pub mod books;

use std::sync::Arc;

use bookshelf_db::Database;
use bookshelf_kernel::{settings::Settings, ModuleRegistry};

use books::repository::MongoBookRepository;

/// Register all project-specific modules with the registry
pub fn register_all(registry: &mut ModuleRegistry, database: &Database, settings: &Settings) {
    let repository = MongoBookRepository::new(database, &settings.database.collection);
    registry.register_custom(books::create_module(Arc::new(repository)));
}
