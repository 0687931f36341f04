//! Table-of-contents sidebar for static documentation pages.
//!
//! `docnav` turns the `h1`/`h2` headings of a page's content container into a
//! navigation list, smooth-scrolls to a section when its entry is clicked,
//! keeps the entry of the section in view marked active while the reader
//! scrolls, and stretches short pages so their section fills the viewport.
//!
//! The logic lives in [`PageController`], which talks to the document only
//! through the [`Page`] trait. On `wasm32` the crate ships a browser binding
//! that implements [`Page`] over `web-sys` and wires the DOM events; call
//! `mount()` from JavaScript:
//!
//! ```javascript
//! import init, { mount } from './pkg/docnav.js';
//!
//! await init();
//! mount({ headerClearance: 116 });
//! ```
//!
//! Elsewhere, [`MemoryPage`] provides an in-memory document.
//!
//! ```
//! use docnav::{MemoryPage, NavConfig, PageController};
//!
//! let page = MemoryPage::new()
//!     .heading(1, "Intro", 0.0)
//!     .heading(2, "Getting Started", 1000.0);
//! let mut nav = PageController::new(page, NavConfig::default());
//! nav.build();
//!
//! assert_eq!(nav.sections()[1].id, "getting-started");
//! assert_eq!(nav.click_entry(1, 0.0).unwrap(), 884.0);
//! ```

pub mod config;
pub mod controller;
pub mod error;
pub mod layout;
pub mod memory;
pub mod page;
pub mod router;
pub mod slug;
pub mod toc;
pub mod tracker;

#[cfg(target_arch = "wasm32")]
mod web;

pub use config::NavConfig;
pub use controller::PageController;
pub use error::NavError;
pub use memory::MemoryPage;
pub use page::{Heading, NavEntry, Page, SectionBox, Viewport};
pub use slug::{slugify, SlugRegistry};
pub use toc::Section;

#[cfg(target_arch = "wasm32")]
pub use web::{mount, WebPage};
