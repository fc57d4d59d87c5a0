//! Storefront cart
//!
//! Client-side state for a storefront page: a shopping cart, a wishlist, toast
//! notifications, the newsletter popup and the page's panel toggles. All of it
//! lives in a [`storefront::Storefront`], which pushes rendering through a
//! [`presenter::Presenter`] and runs its timers on a virtual clock.

pub mod cart;
pub mod catalog;
pub mod config;
pub mod items;
pub mod newsletter;
pub mod prelude;
pub mod presenter;
pub mod prices;
pub mod pricing;
pub mod render;
pub mod scheduler;
pub mod script;
pub mod storefront;
pub mod toasts;
pub mod wishlist;
