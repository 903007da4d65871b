pub mod panels;
pub mod state;
pub mod theme;

pub use panels::{SceneStats, UiActions, draw_side_panel, draw_view_overlay};
pub use state::UiState;
pub use theme::apply_theme;
