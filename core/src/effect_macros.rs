//! Declarative macros for ergonomic effect construction

/// Create an `Effect::Future` from an async block
///
/// The block is moved into the future; it must evaluate to `Option<Action>`.
///
/// # Example
///
/// ```rust,ignore
/// use essential_todos_core::async_effect;
///
/// let api = Arc::clone(&self.api);
/// async_effect! {
///     let todos = api.get_all().await.ok()?;
///     Some(AppAction::LoadTodosSuccess(todos))
/// }
/// ```
#[macro_export]
macro_rules! async_effect {
    ($($body:tt)*) => {
        $crate::effect::Effect::Future(
            ::std::boxed::Box::pin(async move { $($body)* })
        )
    };
}
