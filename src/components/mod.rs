//! UI Components
//!
//! Leptos components for the position hierarchy screen.

mod delete_position_button;
mod notification_toasts;
mod position_drawer;
mod position_form;
mod position_tree_view;
mod tree_node_row;

pub use delete_position_button::DeletePositionButton;
pub use notification_toasts::NotificationToasts;
pub use position_drawer::PositionDrawer;
pub use position_form::PositionForm;
pub use position_tree_view::PositionTreeView;
pub use tree_node_row::{TreeNodeRow, TreeRow};
