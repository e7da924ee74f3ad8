//! Hash-fragment navigation core.
//!
//! Maps one piece of environment-owned state, the location fragment
//! (`#about`), onto a validated route and keeps the two in sync across the
//! initial snapshot, external changes (back/forward, address bar), and
//! programmatic navigation. The crate is split into:
//!
//! - **[`core`]**: Pure, deterministic logic (route table validation, fragment
//!   normalization, resolution, active-link computation). No state, fully
//!   testable in isolation.
//! - **[`io`]**: The [`io::signal::NavigationSignal`] seam over the
//!   environment, an in-memory binding, and TOML configuration.
//! - **[`store`]**, **[`watcher`]**, **[`controller`]**: the single-threaded
//!   runtime. Every transition completes synchronously inside the call that
//!   triggered it.
//!
//! ```
//! use std::rc::Rc;
//!
//! use hashroute::controller::NavigationController;
//! use hashroute::core::table::RouteTable;
//! use hashroute::io::signal::MemorySignal;
//!
//! let table = RouteTable::new(
//!     [("home", "pages/home"), ("about", "pages/about")],
//!     "home",
//! )
//! .unwrap();
//! let signal = Rc::new(MemorySignal::new(""));
//! let controller = NavigationController::new(table, signal.clone());
//!
//! controller.navigate("about").unwrap();
//! assert_eq!(controller.current_route().to_string(), "about");
//! ```

pub mod controller;
pub mod core;
pub mod exit_codes;
pub mod io;
pub mod logging;
pub mod script;
pub mod store;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
pub mod watcher;
