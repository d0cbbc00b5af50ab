//! Render observer port
//!
//! The host calls [`RenderObserver::on_mutation`] after each change to a
//! rendered element. Calls are frequent while a reply streams, so
//! implementations must return quickly and never block.

use relay_domain::Mutation;

/// Callback for rendering-surface changes.
pub trait RenderObserver: Send + Sync {
    fn on_mutation(&self, mutation: &Mutation);
}

/// Observer that ignores every mutation
pub struct NoRenderObserver;

impl RenderObserver for NoRenderObserver {
    fn on_mutation(&self, _mutation: &Mutation) {}
}
