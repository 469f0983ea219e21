//! Span highlighting, rule tooltips and zoom-to-parent navigation for
//! translation analysis sheets. Front ends implement [`surface::Surface`] and
//! forward pointer events to a [`viewer::Viewer`].

pub mod highlight;
pub mod ids;
pub mod index;
pub mod position;
pub mod sheet;
pub mod style;
pub mod surface;
pub mod tables;
pub mod utils;
pub mod viewer;

pub use highlight::Highlighter;
pub use ids::{ElementId, IdError, NodeId, RangeId, Role, TextSpanId};
pub use sheet::{AnalysisSheet, SheetError, SheetIssue};
pub use surface::{InlineStyles, Surface};
pub use viewer::{ClickOutcome, PointerEvent, Viewer};
