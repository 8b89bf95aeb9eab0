//! JSON REST API for the club site.
//!
//! Exposes an axum [`Router`] backed by any [`RecordStore`]. Reads of the
//! public collections and contact-form submission are open; everything else
//! requires the admin's Basic-auth credentials.
//!
//! # Mounting
//!
//! ```rust,ignore
//! let app = clubsite_api::router(state);
//! axum::serve(listener, app).await?;
//! ```

pub mod auth;
pub mod collections;
pub mod contact;
pub mod error;
pub mod events;
pub mod tasks;
pub mod view;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post},
};
use clubsite_core::{store::RecordStore, task::TaskQueue};
use tower_http::trace::TraceLayer;

pub use error::ApiError;

use auth::AuthConfig;
use collections::{
  Affiliates, Announcements, Events, MeetingAddresses, Projects,
};

// ─── Application state ───────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
#[derive(Clone)]
pub struct AppState<S: RecordStore> {
  pub store: Arc<S>,
  pub auth:  Arc<AuthConfig>,
  pub tasks: Arc<dyn TaskQueue>,
}

// ─── Router ──────────────────────────────────────────────────────────────────

/// Build the API router for `state`.
pub fn router<S>(state: AppState<S>) -> Router
where
  S: RecordStore + Clone + 'static,
{
  Router::new()
    // Public collections; writes are admin-only.
    .route(
      "/affiliates",
      get(collections::list::<S, Affiliates>)
        .post(collections::create::<S, Affiliates>),
    )
    .route(
      "/affiliates/{id}",
      get(collections::get_one::<S, Affiliates>)
        .put(collections::update::<S, Affiliates>)
        .delete(collections::delete::<S, Affiliates>),
    )
    .route(
      "/announcements",
      get(collections::list::<S, Announcements>)
        .post(collections::create::<S, Announcements>),
    )
    .route(
      "/announcements/{id}",
      get(collections::get_one::<S, Announcements>)
        .put(collections::update::<S, Announcements>)
        .delete(collections::delete::<S, Announcements>),
    )
    .route(
      "/events",
      get(events::list::<S>).post(collections::create::<S, Events>),
    )
    .route(
      "/events/{id}",
      get(events::get_one::<S>)
        .put(collections::update::<S, Events>)
        .delete(collections::delete::<S, Events>),
    )
    .route(
      "/projects",
      get(collections::list::<S, Projects>)
        .post(collections::create::<S, Projects>),
    )
    .route(
      "/projects/{id}",
      get(collections::get_one::<S, Projects>)
        .put(collections::update::<S, Projects>)
        .delete(collections::delete::<S, Projects>),
    )
    // Admin-only collection
    .route(
      "/meeting-addresses",
      get(collections::admin_list::<S, MeetingAddresses>)
        .post(collections::create::<S, MeetingAddresses>),
    )
    .route(
      "/meeting-addresses/{id}",
      get(collections::admin_get_one::<S, MeetingAddresses>)
        .put(collections::update::<S, MeetingAddresses>)
        .delete(collections::delete::<S, MeetingAddresses>),
    )
    // Contact forms
    .route(
      "/contact/{kind}",
      get(contact::list::<S>).post(contact::submit::<S>),
    )
    .route(
      "/contact/{kind}/{id}",
      get(contact::get_one::<S>)
        .put(contact::update::<S>)
        .delete(contact::delete::<S>),
    )
    .route(
      "/contact/{kind}/{id}/comments",
      get(contact::list_comments::<S>).post(contact::add_comment::<S>),
    )
    .route("/contact-infos", post(contact::add_contact_info::<S>))
    .route(
      "/contact-infos/{id}",
      axum::routing::delete(contact::delete_contact_info::<S>),
    )
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}

#[cfg(test)]
mod tests;
