pub mod books;

use std::sync::Arc;

use bookshelf_kernel::ModuleRegistry;

use books::store::BookRepository;

/// Register all application modules with the registry
pub fn register_all(
    registry: &mut ModuleRegistry,
    books: Arc<dyn BookRepository>,
) -> anyhow::Result<()> {
    registry.register(books::create_module(books))?;
    Ok(())
}
