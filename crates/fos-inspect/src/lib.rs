//! fOS Element Inspector
//!
//! Point at an element, get a CSS selector for it. While a session is
//! active the hovered element is outlined, a click emits a selector for
//! the clicked element instead of running the page's default action,
//! and the cancel key (Escape by default) ends the session.
//!
//! ```
//! use fos_inspect::{css_path, CssPathOptions};
//!
//! let doc = fos_html::parse(r#"<div id="main"><p class="lead">Hi</p></div>"#);
//! let p = fos_css::query_selector(&doc, "p").unwrap();
//! assert_eq!(css_path(&doc, p, CssPathOptions::default()), "div#main p.lead");
//! ```

mod config;
mod css_path;
mod events;
mod host;
mod page;
mod session;
mod sink;

pub use config::{ConfigError, InspectorConfig, CLEARED_OUTLINE, DEFAULT_HIGHLIGHT, ESCAPE_KEY};
pub use css_path::{css_path, element_index, CssPathOptions, Segment, SelectorPath};
pub use events::{CaptureEvents, EventKind, EventSource, HostEvent, LegacyEvents};
pub use host::InspectHost;
pub use page::{DispatchOutcome, Page};
pub use session::{Inspector, SessionState};
pub use sink::{CollectSink, LogSink, SelectorSink};
