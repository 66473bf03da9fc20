//! Events - Store 变更与编辑器提示的发布

mod publisher;

pub use publisher::{EditorNotice, EventPublisher, StoreChange, StoreEvent};
