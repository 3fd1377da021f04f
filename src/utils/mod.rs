pub mod selection_store;
