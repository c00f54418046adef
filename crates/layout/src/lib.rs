use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    #[error("{0} items have no layout")]
    NoLayout(&'static str),
    #[error("{0} item is already drained")]
    Drained(&'static str),
}

pub mod algorithms;
pub mod elements;
pub mod environment;
pub mod fsm;
pub mod geometry;
pub mod item;
pub mod measure;
pub mod painting;

pub use self::algorithms::pagination::{Band, SliceCursor, SliceLimits, SlicePlan, plan_slice};
pub use self::elements::{
    Clipped, FillElement, LayoutElement, Offset, PositionedElement, RecordingSurface, RuleElement,
    Surface, TextElement,
};
pub use self::environment::LayoutEnvironment;
pub use self::fsm::{ItemLayout, LayoutState};
pub use self::geometry::TableGeometry;
pub use self::item::{
    GroupItem, Message, OutputItem, Severity, SharedItem, TableItem, TextItem, TextKind,
};
pub use self::measure::{FixedPitchMeasurer, TextLine, TextMeasurer};

#[cfg(test)]
mod fsm_test;
#[cfg(test)]
mod test_utils;
