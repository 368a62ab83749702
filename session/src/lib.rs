pub mod manager;
pub mod model;
pub mod selection;
pub mod store;
pub mod view;
