//! Side-effect middleware.
//!
//! Both middleware forward every action down the chain before doing anything
//! else, so reducers always see an action before its side effects start.

mod todos;
mod ui;

pub use todos::TodosMiddleware;
pub use ui::UiMiddleware;
