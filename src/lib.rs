//! # Storefront
//!
//! Cart and order core of an online store, served over HTTP.
//!
//! ## Architecture
//!
//! Every document collection is owned by a [`ResourceActor`](actor_framework::ResourceActor)
//! from the `actor-framework` crate: one Tokio task per collection, requests handled one
//! at a time, so every single-document read-modify-write is atomic without locks.
//!
//! ```text
//!            HTTP (axum)
//!        /cart/*      /order/*
//!           |             |
//!      CartClient    OrderClient
//!           |             |
//!      Cart actor <--- Order actor ---> User actor
//!           |             |
//!           +--> Product actor <--+
//! ```
//!
//! ## Module Tour
//!
//! - [`model`]: documents and payloads (`Cart`, `Order`, `Product`, `User`, typed ids).
//! - [`pricing`]: shipping, tax and totals. Pure functions, no I/O.
//! - [`coupons`]: the coupon registry seam.
//! - [`cart_actor`]: the Cart Ledger.
//! - [`order_actor`]: the Order Factory (checkout) and the Order Lifecycle.
//! - [`product_actor`], [`user_actor`]: the catalog and user directory the core reads.
//! - [`clients`]: typed clients over the generic actor channel.
//! - [`lifecycle`]: [`StoreSystem`](lifecycle::StoreSystem) wiring, seeding and shutdown,
//!   plus tracing setup.
//! - [`http`]: routes, caller identity and the error-to-status mapping.
//! - [`config`]: YAML configuration and command-line arguments.
//!
//! ## Running
//!
//! ```bash
//! RUST_LOG=info cargo run -- --config config/storefront.yaml
//! curl -H 'x-user-id: user_1' localhost:3000/cart
//! ```

pub mod cart_actor;
pub mod clients;
pub mod config;
pub mod coupons;
pub mod http;
pub mod lifecycle;
pub mod model;
pub mod order_actor;
pub mod pricing;
pub mod product_actor;
pub mod user_actor;
